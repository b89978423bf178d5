//! Error types for model construction

use thiserror::Error;

/// Errors raised when building links, relations or curies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A link was created without a target
    #[error("Link href must not be empty")]
    EmptyHref,

    /// A link or curie was given an empty relation
    #[error("Link relation must not be empty")]
    EmptyRelation,

    /// A curie was registered without a name
    #[error("Curie name must not be empty")]
    EmptyCurieName,

    /// A curie template does not declare exactly one variable
    #[error("Curie template '{template}' must contain exactly one variable, found {variables}")]
    InvalidCurieTemplate { template: String, variables: usize },
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
