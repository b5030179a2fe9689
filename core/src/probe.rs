//! On-demand queries of the host's light/dark appearance.

use crate::errors::{ThemeError, ThemeResult};
use crate::preference::ResolvedAppearance;
use std::sync::Mutex;

/// Source of the OS-level "prefers dark appearance" signal.
pub trait AppearanceProbe: Send + Sync {
    /// Ask the host whether it prefers a dark appearance.
    fn prefers_dark(&self) -> ThemeResult<bool>;

    /// Current OS appearance; hosts that cannot answer are treated as light.
    fn appearance(&self) -> ResolvedAppearance {
        match self.prefers_dark() {
            Ok(dark) => ResolvedAppearance::from_prefers_dark(dark),
            Err(e) => {
                log::debug!("{e}; assuming light appearance");
                ResolvedAppearance::Light
            }
        }
    }
}

/// Asks the desktop environment through `dark_light`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl SystemProbe {
    pub fn new() -> Self {
        Self
    }
}

impl AppearanceProbe for SystemProbe {
    fn prefers_dark(&self) -> ThemeResult<bool> {
        prefers_dark_from_mode(dark_light::detect())
    }
}

/// `Default` means the platform has no light/dark setting to report
fn prefers_dark_from_mode(mode: dark_light::Mode) -> ThemeResult<bool> {
    match mode {
        dark_light::Mode::Dark => Ok(true),
        dark_light::Mode::Light => Ok(false),
        dark_light::Mode::Default => Err(ThemeError::os_unsupported(
            "desktop reports no light/dark preference",
        )),
    }
}

/// Probe with a fixed or externally driven answer.
///
/// Used when configuration pins the OS appearance, and to simulate hosts in tests.
#[derive(Debug)]
pub struct StaticProbe {
    answer: Mutex<Option<bool>>,
}

impl StaticProbe {
    pub fn new(appearance: ResolvedAppearance) -> Self {
        Self {
            answer: Mutex::new(Some(appearance.is_dark())),
        }
    }

    /// Probe for a host that cannot report its appearance
    pub fn unsupported() -> Self {
        Self {
            answer: Mutex::new(None),
        }
    }

    pub fn set(&self, appearance: ResolvedAppearance) {
        if let Ok(mut answer) = self.answer.lock() {
            *answer = Some(appearance.is_dark());
        }
    }
}

impl AppearanceProbe for StaticProbe {
    fn prefers_dark(&self) -> ThemeResult<bool> {
        let answer = self
            .answer
            .lock()
            .map_err(|e| ThemeError::os_unsupported(format!("probe lock poisoned: {e}")))?;
        answer.ok_or_else(|| ThemeError::os_unsupported("host reports no appearance"))
    }
}
