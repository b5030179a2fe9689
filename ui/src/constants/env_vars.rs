/// Environment variable name constants
/// Configuration keys are read from `LUMEN__<TABLE>__<KEY>`, e.g.
/// `LUMEN__THEME__DEFAULT_PREFERENCE=dark` or `LUMEN__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "LUMEN";
pub const ENV_SEPARATOR: &str = "__";
