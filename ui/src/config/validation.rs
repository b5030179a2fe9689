/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid poll_interval_ms: {configured} (min: {min_limit}, max: {max_limit})")]
    PollInterval {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid logging level: '{configured}'")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::PollInterval {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "OS appearance poll interval out of range!\n\n\
                    Your configured value: {configured} ms\n\
                    Valid range: {min_limit} - {max_limit} ms\n\n\
                    Please update theme.poll_interval_ms in config.toml."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown logging level '{configured}'!\n\n\
                    Valid levels: trace, debug, info, warn, error\n\n\
                    Please update logging.level in config.toml."
                )
            }
        }
    }
}
