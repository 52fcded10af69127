//! # routewire-core
//!
//! Error types, settings, and logging shared by the routewire crates.
//! This crate knows nothing about templates or routes; it provides the
//! foundation the routing engine is built on.
//!
//! ## Modules
//!
//! - [`error`] - The routing error taxonomy and result alias
//! - [`settings`] - Engine settings and the global settings container
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{RoutingError, RoutingResult};
pub use settings::{RoutingSettings, Settings, SETTINGS};
