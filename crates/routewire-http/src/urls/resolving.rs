//! The per-declaration bundle of an action and its filters.

use std::fmt;

use routewire_core::{RoutingError, RoutingResult};

use super::signature::{Callback, CallbackHandle};

/// What a route resolves to: one action plus ordered before/after filters.
///
/// A builder fills a `Resolving` through `&mut self` while a declaration is
/// open; once routes are constructed it is frozen behind an
/// `Arc<dyn Resolving>` and only the read accessors remain reachable.
///
/// Custom implementations can be plugged in through
/// [`ComponentRegistry`](super::registry::ComponentRegistry).
pub trait Resolving: Send + Sync + fmt::Debug {
    /// Binds the action, replacing any previous one.
    fn set_action(&mut self, action: CallbackHandle);

    /// Returns the bound action.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::ActionNotSet`] if no action has been bound.
    fn action(&self) -> RoutingResult<&CallbackHandle>;

    /// Appends a filter run before the action.
    fn add_filter_before(&mut self, filter: CallbackHandle);

    fn filters_before(&self) -> &[CallbackHandle];

    /// Appends a filter run after the action.
    fn add_filter_after(&mut self, filter: CallbackHandle);

    fn filters_after(&self) -> &[CallbackHandle];

    /// Whether the action and every filter can be persisted.
    ///
    /// An unbound action counts as not serializable.
    fn is_serializable(&self) -> bool {
        self.action().is_ok_and(Callback::is_serializable)
            && self.filters_before().iter().all(Callback::is_serializable)
            && self.filters_after().iter().all(Callback::is_serializable)
    }
}

/// The stock [`Resolving`] implementation.
#[derive(Debug, Clone, Default)]
pub struct ResolvingRecord {
    action: Option<CallbackHandle>,
    filters_before: Vec<CallbackHandle>,
    filters_after: Vec<CallbackHandle>,
}

impl ResolvingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory matching [`ResolvingFactory`](super::registry::ResolvingFactory).
    pub fn boxed() -> Box<dyn Resolving> {
        Box::new(Self::new())
    }
}

impl Resolving for ResolvingRecord {
    fn set_action(&mut self, action: CallbackHandle) {
        self.action = Some(action);
    }

    fn action(&self) -> RoutingResult<&CallbackHandle> {
        self.action.as_ref().ok_or(RoutingError::ActionNotSet)
    }

    fn add_filter_before(&mut self, filter: CallbackHandle) {
        self.filters_before.push(filter);
    }

    fn filters_before(&self) -> &[CallbackHandle] {
        &self.filters_before
    }

    fn add_filter_after(&mut self, filter: CallbackHandle) {
        self.filters_after.push(filter);
    }

    fn filters_after(&self) -> &[CallbackHandle] {
        &self.filters_after
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::urls::signature::{ActionPointer, ActionSignature};

    fn pointer(member: &str) -> CallbackHandle {
        Arc::new(ActionSignature::pointer(ActionPointer::new("Ctl", member)))
    }

    fn closure(label: &str) -> CallbackHandle {
        Arc::new(ActionSignature::closure(label))
    }

    #[test]
    fn test_action_not_set() {
        let record = ResolvingRecord::new();
        assert!(matches!(record.action(), Err(RoutingError::ActionNotSet)));
        assert!(!record.is_serializable());
    }

    #[test]
    fn test_set_action() {
        let mut record = ResolvingRecord::new();
        record.set_action(pointer("index"));
        assert_eq!(record.action().unwrap().describe(), "Ctl::index");

        record.set_action(pointer("show"));
        assert_eq!(record.action().unwrap().describe(), "Ctl::show");
    }

    #[test]
    fn test_filters_keep_order() {
        let mut record = ResolvingRecord::new();
        record.add_filter_before(pointer("a"));
        record.add_filter_before(pointer("b"));
        record.add_filter_after(pointer("c"));

        let before: Vec<String> = record.filters_before().iter().map(|f| f.describe()).collect();
        assert_eq!(before, vec!["Ctl::a", "Ctl::b"]);
        assert_eq!(record.filters_after().len(), 1);
    }

    #[test]
    fn test_serializable_requires_every_callback() {
        let mut record = ResolvingRecord::new();
        record.set_action(pointer("index"));
        record.add_filter_before(pointer("auth"));
        assert!(record.is_serializable());

        record.add_filter_after(closure("log"));
        assert!(!record.is_serializable());
    }

    #[test]
    fn test_closure_action_is_not_serializable() {
        let mut record = ResolvingRecord::new();
        record.set_action(closure("inline"));
        assert!(!record.is_serializable());
    }

    #[test]
    fn test_boxed_factory() {
        let mut boxed = ResolvingRecord::boxed();
        boxed.set_action(pointer("x"));
        assert!(boxed.action().is_ok());
    }
}
