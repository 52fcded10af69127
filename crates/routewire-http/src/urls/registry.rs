//! Named, pluggable [`Resolving`] implementations.
//!
//! Deployments choose an implementation by name in
//! [`RoutingSettings::resolving`](routewire_core::RoutingSettings). Every
//! registered factory returns a `Box<dyn Resolving>`, so conformance to the
//! interface is checked when the factory is registered rather than when it is
//! looked up.

use std::collections::HashMap;

use routewire_core::{RoutingError, RoutingResult};

use super::resolving::{Resolving, ResolvingRecord};

/// Produces an empty [`Resolving`] for a new declaration.
pub type ResolvingFactory = fn() -> Box<dyn Resolving>;

/// The name the stock [`ResolvingRecord`] is registered under.
pub const DEFAULT_RESOLVING: &str = "default";

/// A name-to-factory registry.
///
/// # Examples
///
/// ```
/// use routewire_http::urls::registry::ComponentRegistry;
///
/// let registry = ComponentRegistry::with_builtins();
/// assert!(registry.resolving_factory("default").is_ok());
/// assert!(registry.resolving_factory("missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    resolving: HashMap<String, ResolvingFactory>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the stock implementations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_RESOLVING, ResolvingRecord::boxed);
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: ResolvingFactory) -> &mut Self {
        let name = name.into();
        tracing::debug!(name = %name, "Registered resolving implementation");
        self.resolving.insert(name, factory);
        self
    }

    /// Looks up the factory registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidClassName`] if nothing is registered
    /// under `name`.
    pub fn resolving_factory(&self, name: &str) -> RoutingResult<ResolvingFactory> {
        self.resolving
            .get(name)
            .copied()
            .ok_or_else(|| RoutingError::InvalidClassName {
                name: name.to_string(),
                interface: "Resolving".to_string(),
            })
    }

    /// The registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resolving.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urls::signature::CallbackHandle;

    #[derive(Debug, Default)]
    struct Audited(ResolvingRecord);

    impl Resolving for Audited {
        fn set_action(&mut self, action: CallbackHandle) {
            self.0.set_action(action);
        }

        fn action(&self) -> RoutingResult<&CallbackHandle> {
            self.0.action()
        }

        fn add_filter_before(&mut self, filter: CallbackHandle) {
            self.0.add_filter_before(filter);
        }

        fn filters_before(&self) -> &[CallbackHandle] {
            self.0.filters_before()
        }

        fn add_filter_after(&mut self, filter: CallbackHandle) {
            self.0.add_filter_after(filter);
        }

        fn filters_after(&self) -> &[CallbackHandle] {
            self.0.filters_after()
        }

        fn is_serializable(&self) -> bool {
            false
        }
    }

    fn audited() -> Box<dyn Resolving> {
        Box::new(Audited::default())
    }

    #[test]
    fn test_builtins() {
        let registry = ComponentRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["default"]);
        let record = registry.resolving_factory("default").unwrap()();
        assert!(record.action().is_err());
    }

    #[test]
    fn test_unknown_name() {
        let err = ComponentRegistry::new().resolving_factory("nope").unwrap_err();
        assert!(matches!(
            err,
            RoutingError::InvalidClassName { ref name, ref interface }
                if name == "nope" && interface == "Resolving"
        ));
    }

    #[test]
    fn test_register_custom() {
        let mut registry = ComponentRegistry::with_builtins();
        registry.register("audited", audited);
        assert_eq!(registry.names(), vec!["audited", "default"]);

        let record = registry.resolving_factory("audited").unwrap()();
        assert!(!record.is_serializable());
        assert!(format!("{record:?}").contains("Audited"));
    }
}
