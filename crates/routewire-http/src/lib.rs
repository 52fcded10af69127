//! # routewire-http
//!
//! The routing engine of routewire: typed URL templates compiled to anchored
//! matchers, routes validated against the signature of the action they bind,
//! and a fluent router that fans declarations out into routes.

pub mod urls;

pub use urls::builder::{BuilderPrototype, RouteBuilder};
pub use urls::parameter::{ParameterKind, ParameterSpec, ParameterValue};
pub use urls::pattern::CompiledPattern;
pub use urls::registry::{ComponentRegistry, ResolvingFactory};
pub use urls::resolving::{Resolving, ResolvingRecord};
pub use urls::route::Route;
pub use urls::router::{RouteMatch, RouteRequest, Router};
pub use urls::signature::{
    ActionParameter, ActionPointer, ActionSignature, ActionTarget, Callback, CallbackHandle,
    DeclaredType,
};
