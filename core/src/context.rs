use crate::controller::ThemeController;
use crate::preference::{ResolvedAppearance, ThemePreference, ThemeState};

/// Read/write view of the theme handed to presentation code.
///
/// Consumers can observe the preference and the resolved appearance, and may
/// only change the theme through [`ThemeContext::set_preference`].
#[derive(Clone)]
pub struct ThemeContext {
    controller: ThemeController,
}

impl ThemeContext {
    pub fn new(controller: ThemeController) -> Self {
        Self { controller }
    }

    pub fn preference(&self) -> ThemePreference {
        self.controller.snapshot().preference
    }

    pub fn resolved(&self) -> ResolvedAppearance {
        self.controller.snapshot().resolved
    }

    /// Both values read under one lock
    pub fn state(&self) -> ThemeState {
        self.controller.snapshot()
    }

    pub fn set_preference(&self, preference: ThemePreference) {
        self.controller.set_preference(preference);
    }
}

impl From<&ThemeController> for ThemeContext {
    fn from(controller: &ThemeController) -> Self {
        Self::new(controller.clone())
    }
}
