use colored::Colorize;
use std::fmt;
use std::process;

/// Exit codes for the CLI.
#[allow(dead_code)]
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Unified error type for CLI operations.
pub enum CliError {
    /// Rendering or parsing failed.
    Hal(hal_format::HalError),
    /// Settings file could not be loaded or is invalid.
    Config(hal_format::ConfigFileError),
    /// Unreadable input or malformed JSON.
    Input(String),
    /// Argument / usage errors.
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Hal(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Config(e) => write!(
                f,
                "{} {e}\n  {} check the file passed with --config",
                "error:".red().bold(),
                "help:".cyan().bold(),
            ),
            CliError::Input(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Usage(msg) => write!(f, "{} {msg}", "error:".red().bold()),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<hal_format::HalError> for CliError {
    fn from(e: hal_format::HalError) -> Self {
        CliError::Hal(e)
    }
}

impl From<hal_model::ModelError> for CliError {
    fn from(e: hal_model::ModelError) -> Self {
        CliError::Hal(e.into())
    }
}

impl From<hal_format::ConfigFileError> for CliError {
    fn from(e: hal_format::ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Input(format!("invalid JSON: {e}"))
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => EXIT_USAGE,
            _ => EXIT_ERROR,
        }
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Print the error to stderr and exit with the matching code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("{err}");
    process::exit(err.exit_code());
}
