//! Error types for HAL rendering and parsing

use hal_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, rendering or parsing HAL documents
#[derive(Error, Debug)]
pub enum HalError {
    /// Invalid link, relation or curie
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The embedded aggregator was built without a relation provider
    #[error("Embedded aggregator requires a link relation provider")]
    MissingRelationProvider,

    /// A default curie that was never registered
    #[error("Unknown curie '{name}'")]
    UnknownCurie { name: String },

    /// An embedded wrapper whose relation cannot be determined
    #[error("Invalid embedded wrapper: {message}")]
    InvalidEmbeddedWrapper { message: String },

    /// Non-object content cannot carry links or embedded resources
    #[error("Content of type {found} cannot carry links or embedded resources")]
    NonObjectContent { found: &'static str },

    /// A `_links` field held something other than an object or array
    #[error("Malformed link block: relation '{relation}' holds {found}, expected object or array")]
    MalformedLinks { relation: String, found: &'static str },

    /// The `_embedded` block was not an object
    #[error("Malformed embedded block: expected object, found {found}")]
    MalformedEmbedded { found: &'static str },

    /// A link object without `href`
    #[error("Link for relation '{relation}' has no href")]
    MissingHref { relation: String },

    /// A plain JSON link object without `rel`
    #[error("Link has no rel")]
    MissingRelation,

    /// A document root that is not a JSON object
    #[error("Expected a JSON object document, found {found}")]
    NotAnObject { found: &'static str },

    /// A render-mode pattern that does not compile
    #[error("Invalid relation pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// No format strategy for a media type and no fallback configured
    #[error("No format strategy registered for media type '{media_type}'")]
    UnsupportedMediaType { media_type: String },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HalError {
    /// Create an invalid wrapper error
    pub fn invalid_wrapper(message: impl Into<String>) -> Self {
        Self::InvalidEmbeddedWrapper {
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Errors from configuration file loading
#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

impl From<HalError> for ConfigFileError {
    fn from(e: HalError) -> Self {
        ConfigFileError::InvalidValue(e.to_string())
    }
}

/// Name of a JSON value's kind, for error messages
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Result type for HAL operations
pub type Result<T> = std::result::Result<T, HalError>;
