use crate::config::LoggingConfig;
use crate::error::AppResult;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info, // Default to Info for any other value
    }
}

/// Install the global logger.
///
/// Logs go to stderr so command output on stdout stays machine-readable, and
/// additionally to `logging.file` when one is configured.
pub fn setup_logger(config: &LoggingConfig) -> AppResult<()> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(parse_level(config.level()))
        .chain(std::io::stderr());

    if let Some(file_path) = config.file() {
        match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(file) => {
                dispatch = dispatch.chain(file);
            }
            Err(e) => {
                eprintln!("Warning: Failed to open log file '{file_path}': {e}");
                eprintln!("Continuing without file logging.");
            }
        }
    }

    dispatch.apply()?;

    log::debug!("Logger initialized with level: {}", config.level());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_falls_back_to_info() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
