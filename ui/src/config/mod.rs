use crate::constants::env_vars::{ENV_PREFIX, ENV_SEPARATOR};
use crate::error::{AppError, AppResult};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub mod app;
pub mod limits;
pub mod setup;
pub mod theme;
pub mod validation;

pub use app::AppConfig;
pub use theme::ThemeSettings;
pub use validation::ConfigValidationError;

/// Load configuration from `config.toml` and `LUMEN__*` environment variables.
///
/// An explicit `path` must exist. Without one, the discovered config file is
/// optional and defaults apply. Environment entries override file values.
pub fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    dotenv::dotenv().ok();

    let mut builder = Config::builder();
    match path {
        Some(path) => {
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(found) = setup::find_config_file() {
                log::debug!("Using configuration file: {}", found.display());
                builder = builder.add_source(File::from(found).required(false));
            }
        }
    }

    let env_source = Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true);

    let config = builder.add_source(env_source).build().map_err(|e| {
        AppError::Config(format!(
            "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
        ))
    })?;

    let app_config = config
        .try_deserialize::<AppConfig>()
        .map_err(|e| AppError::Config(format!("Failed to deserialize config: {e}")))?;

    if let Err(errors) = app_config.validate() {
        let message = errors
            .iter()
            .map(ConfigValidationError::user_message)
            .collect::<Vec<_>>()
            .join("\n\n");
        return Err(AppError::Config(message));
    }

    Ok(app_config)
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
