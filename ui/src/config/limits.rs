/// Bounds for configurable values

/// Fastest allowed OS appearance poll (milliseconds)
pub const MIN_POLL_INTERVAL_MS: u64 = 250;

/// Slowest allowed OS appearance poll (milliseconds)
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Default OS appearance poll (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
