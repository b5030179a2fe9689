//! # Theme Module
//!
//! Host-side wiring of the Lumen theme controller.
//!
//! - **[`ThemeManager`]** - Composition root: builds the one
//!   [`ThemeController`](lumen_core::ThemeController) from configuration,
//!   persists to the state file and starts the OS watcher
//! - **[`selector`]** - Theme selection menu model: options, status line and
//!   the "dark because of system" indicator
//!
//! ## Usage
//!
//! ```no_run
//! use lumen::config::ThemeSettings;
//! use lumen::theme::{ThemeManager, selector};
//! use lumen_core::ThemePreference;
//!
//! let manager = ThemeManager::init(&ThemeSettings::default())?;
//! let theme = manager.context();
//!
//! theme.set_preference(ThemePreference::Dark);
//! println!("{}", selector::status_line(&theme.state()));
//! # Ok::<(), lumen::error::AppError>(())
//! ```
//!
//! ## Error Handling and Fallbacks
//!
//! - **Missing or corrupt state file** - Falls back to `theme.default_preference`
//! - **Read-only state file** - Preference changes still apply for the session
//! - **No OS appearance query** - System preference resolves to light

pub mod manager;
pub mod selector;

pub use manager::ThemeManager;
