//! Settings for the routewire engine.
//!
//! This module provides the [`Settings`] struct, which holds all engine
//! configuration, and [`LazySettings`], a globally-accessible, lazily-initialized
//! settings instance.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Routing engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// The registered name of the resolving implementation new declarations
    /// are seeded with.
    pub resolving: String,
    /// Whether each registered route is logged at `debug` level.
    pub log_registrations: bool,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            resolving: "default".to_string(),
            log_registrations: true,
        }
    }
}

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use routewire_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.routing.resolving, "default");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled. Selects human-readable log output.
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or filter directive (e.g. `info`, `routewire_http=debug`).
    pub log_level: String,

    // ── Routing ──────────────────────────────────────────────────────

    /// Routing engine configuration.
    pub routing: RoutingSettings,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            routing: RoutingSettings::default(),
            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, if any.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.routing.resolving, "default");
        assert!(s.routing.log_registrations);
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_settings_roundtrip_through_json_value() {
        let mut s = Settings::default();
        s.routing.resolving = "audited".to_string();
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["routing"]["resolving"], "audited");
        let back: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(back.routing.resolving, "audited");
    }

    #[test]
    fn test_lazy_settings_configure_and_get() {
        let lazy = LazySettings::new();
        assert!(!lazy.is_configured());
        assert!(lazy.try_get().is_none());

        let mut settings = Settings::default();
        settings.debug = false;
        lazy.configure(settings);

        assert!(lazy.is_configured());
        assert!(!lazy.get().debug);
    }

    #[test]
    #[should_panic(expected = "already been configured")]
    fn test_lazy_settings_double_configure_panics() {
        let lazy = LazySettings::new();
        lazy.configure(Settings::default());
        lazy.configure(Settings::default());
    }

    #[test]
    #[should_panic(expected = "not been configured")]
    fn test_lazy_settings_get_before_configure_panics() {
        let lazy = LazySettings::new();
        let _ = lazy.get();
    }
}
