use crate::preference::ResolvedAppearance;
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// Class toggled on the document root while the dark appearance is active
pub const DARK_CLASS: &str = "dark";

/// The single presentation-level toggle the theme controller drives.
pub trait AppearanceSink: Send + Sync {
    /// Make `value` the visually active appearance. Must be idempotent.
    fn apply(&self, value: ResolvedAppearance);
}

/// Class list of the rendered document's root element.
#[derive(Debug, Default)]
pub struct RootClassList {
    classes: Mutex<BTreeSet<String>>,
}

impl RootClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.lock().contains(class)
    }

    pub fn is_dark(&self) -> bool {
        self.contains(DARK_CLASS)
    }

    pub fn add(&self, class: &str) {
        self.lock().insert(class.to_string());
    }

    pub fn remove(&self, class: &str) {
        self.lock().remove(class);
    }

    /// Space-separated class attribute, in sorted order
    pub fn class_name(&self) -> String {
        self.lock()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.classes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AppearanceSink for RootClassList {
    fn apply(&self, value: ResolvedAppearance) {
        if value.is_dark() {
            self.add(DARK_CLASS);
        } else {
            self.remove(DARK_CLASS);
        }
    }
}
