use crate::config::ConfigValidationError;
use crate::config::setup::SetupError;
use std::fmt::Display;

/// Errors that stop the `lumen` host.
///
/// The theme controller itself never fails; these only cover the host's own
/// startup and output: loading configuration, installing the logger and
/// writing to the terminal.
///
/// # Examples
///
/// ```no_run
/// use lumen::config;
/// use lumen::error::AppError;
///
/// match config::load_config(None) {
///     Ok(config) => println!("poll every {:?}", config.theme().poll_interval()),
///     Err(AppError::Config(msg)) => eprintln!("fix your config.toml: {msg}"),
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration loading and validation errors.
    ///
    /// Raised when `config.toml` or the `LUMEN__*` environment cannot be
    /// parsed, or contains out-of-range values.
    Config(String),

    /// Terminal or filesystem output failures.
    Io(String),

    /// Logger installation failures.
    Logging(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Io(msg) => write!(f, "I/O Error: {msg}"),
            AppError::Logging(msg) => write!(f, "Logging Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigValidationError> for AppError {
    fn from(error: ConfigValidationError) -> Self {
        AppError::Config(error.user_message())
    }
}

impl From<SetupError> for AppError {
    fn from(error: SetupError) -> Self {
        AppError::Config(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Io(error.to_string())
    }
}

impl From<log::SetLoggerError> for AppError {
    fn from(error: log::SetLoggerError) -> Self {
        AppError::Logging(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Io(format!("Failed to encode output: {error}"))
    }
}

/// Result type alias for host operations
pub type AppResult<T> = Result<T, AppError>;
