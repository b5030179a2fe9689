use super::limits::DEFAULT_POLL_INTERVAL_MS;
use lumen_core::{ResolvedAppearance, ThemePreference};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Theme controller configuration (`[theme]` table)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeSettings {
    /// Preference used when nothing valid is persisted (default: system)
    default_preference: Option<ThemePreference>,
    /// Where the `theme` entry is persisted (default: config dir/state.toml)
    state_file: Option<PathBuf>,
    /// How often the watcher polls the OS appearance (default: 2000ms)
    poll_interval_ms: Option<u64>,
    /// Pin the OS appearance instead of querying the desktop
    assume_os: Option<ResolvedAppearance>,
}

impl ThemeSettings {
    pub fn default_preference(&self) -> ThemePreference {
        self.default_preference.unwrap_or_default()
    }

    pub fn state_file(&self) -> Option<&PathBuf> {
        self.state_file.as_ref()
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms())
    }

    pub fn assume_os(&self) -> Option<ResolvedAppearance> {
        self.assume_os
    }

    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    pub fn with_assume_os(mut self, appearance: ResolvedAppearance) -> Self {
        self.assume_os = Some(appearance);
        self
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = Some(poll_interval_ms);
        self
    }

    pub fn with_default_preference(mut self, preference: ThemePreference) -> Self {
        self.default_preference = Some(preference);
        self
    }
}
