//! # Lumen
//!
//! Command-line host for the Lumen theme controller. Plays the part of the
//! editor's root composition: it builds the single theme controller from
//! configuration, exposes the consumer view to commands, renders the theme
//! selection menu and follows OS appearance changes.
//!
//! ## Modules
//!
//! - [`commands`] - `show`, `set`, `options` and `watch`
//! - [`config`] - Configuration loading, validation and file locations
//! - [`constants`] - Environment variable names
//! - [`error`] - Host error types
//! - [`logger`] - Logging configuration
//! - [`theme`] - Theme composition root and selection menu model

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod theme;

pub use error::{AppError, AppResult};
