use thiserror::Error;

/// Failures the theme subsystem can encounter while talking to the outside world.
///
/// None of these ever reach a caller of
/// [`ThemeController`](crate::controller::ThemeController): the controller
/// recovers from each of them locally and only emits a diagnostic.
///
/// # Recovery
///
/// - [`StorageUnavailable`] - treated as "no stored value" on read, skipped on write
/// - [`InvalidStoredValue`] - treated as "no stored value"
/// - [`OsQueryUnsupported`] - the OS appearance is assumed to be light
///
/// [`StorageUnavailable`]: ThemeError::StorageUnavailable
/// [`InvalidStoredValue`]: ThemeError::InvalidStoredValue
/// [`OsQueryUnsupported`]: ThemeError::OsQueryUnsupported
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// The persisted key-value entry could not be read or written.
    #[error("Theme storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    /// A stored value is not one of `light`, `dark` or `system`.
    #[error("Invalid stored theme value: '{value}'")]
    InvalidStoredValue { value: String },

    /// The host cannot report whether it prefers a dark appearance.
    #[error("OS appearance query unsupported: {reason}")]
    OsQueryUnsupported { reason: String },
}

impl ThemeError {
    pub fn storage(reason: impl Into<String>) -> Self {
        ThemeError::StorageUnavailable {
            reason: reason.into(),
        }
    }

    pub fn os_unsupported(reason: impl Into<String>) -> Self {
        ThemeError::OsQueryUnsupported {
            reason: reason.into(),
        }
    }
}

/// Result type alias for theme operations
pub type ThemeResult<T> = Result<T, ThemeError>;
