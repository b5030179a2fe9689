//! # Lumen Core Library
//!
//! Theme resolution for the Lumen document editor. Resolves the user's theme
//! preference (`light`, `dark` or `system`) against the OS appearance and the
//! persisted state, applies the result to the document root, and follows OS
//! changes while `system` is selected.
//!
//! ## Modules
//!
//! - [`controller`] - [`ThemeController`], the owner of the theme state
//! - [`context`] - Consumer-facing read/write view of the theme
//! - [`preference`] - Preference, resolved appearance and state types
//! - [`storage`] - Persisted key-value entry (in-memory and TOML file)
//! - [`probe`] - OS appearance queries
//! - [`presentation`] - Root class list toggled by the resolved appearance
//! - [`watcher`] - Polling fallback that pushes OS changes into the controller
//! - [`errors`] - Error types, all recovered locally by the controller
//!
//! ## Usage
//!
//! ```no_run
//! use lumen_core::{
//!     FileStore, RootClassList, SystemProbe, ThemeController, ThemePreference,
//! };
//! use std::sync::Arc;
//!
//! let store = Arc::new(FileStore::new("state.toml"));
//! let root = Arc::new(RootClassList::new());
//! let controller = ThemeController::initialize(
//!     store,
//!     Arc::new(SystemProbe::new()),
//!     root.clone(),
//!     ThemePreference::System,
//! );
//!
//! let handle = controller.subscribe_to_os_preference_change(|resolved| {
//!     println!("now rendering {resolved}");
//! });
//! controller.set_preference(ThemePreference::Dark);
//! assert!(root.is_dark());
//! handle.unsubscribe();
//! ```

pub mod context;
pub mod controller;
pub mod errors;
pub mod preference;
pub mod presentation;
pub mod probe;
pub mod storage;
pub mod watcher;

pub use context::ThemeContext;
pub use controller::{AppearanceCallback, ThemeController, Unsubscribe};
pub use errors::{ThemeError, ThemeResult};
pub use preference::{ResolvedAppearance, ThemePreference, ThemeState};
pub use presentation::{AppearanceSink, DARK_CLASS, RootClassList};
pub use probe::{AppearanceProbe, StaticProbe, SystemProbe};
pub use storage::{FileStore, MemoryStore, PreferenceStore, THEME_KEY};
pub use watcher::OsPreferenceWatcher;
