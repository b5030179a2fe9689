use super::{
    LoggingConfig, limits::*, theme::ThemeSettings, validation::ConfigValidationError,
};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    theme: ThemeSettings,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let poll_interval = self.theme.poll_interval_ms();
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&poll_interval) {
            errors.push(ConfigValidationError::PollInterval {
                configured: poll_interval,
                min_limit: MIN_POLL_INTERVAL_MS,
                max_limit: MAX_POLL_INTERVAL_MS,
            });
        }

        let level = self.logging.level().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}
