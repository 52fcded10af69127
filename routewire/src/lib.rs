//! # routewire
//!
//! Typed URL templates bound to validated actions.
//!
//! This is the meta-crate that re-exports the routewire crates. Depend on
//! `routewire` for everything, or on the individual crates for finer-grained
//! control.
//!
//! # Examples
//!
//! ```
//! use routewire::prelude::*;
//!
//! let settings = Settings::default();
//! let mut router = Router::from_settings(&settings, &ComponentRegistry::with_builtins()).unwrap();
//! router
//!     .on_post(["/posts/{slug|str}/publish"])
//!     .unwrap()
//!     .call(
//!         ActionSignature::pointer(ActionPointer::new("Posts", "publish"))
//!             .param(ActionParameter::required("slug", DeclaredType::String)),
//!     )
//!     .unwrap();
//!
//! assert!(router.resolve(&("POST", "/posts/hello/publish")).is_some());
//! ```

/// Errors, settings, and logging.
pub use routewire_core as core;

/// Templates, routes, builders, and the router.
pub use routewire_http as routing;

/// Re-exported so applications resolve `http::Request`s without a separate dependency.
pub use http;

/// The types most applications need.
pub mod prelude {
    pub use routewire_core::{RoutingError, RoutingResult, RoutingSettings, Settings};
    pub use routewire_http::{
        ActionParameter, ActionPointer, ActionSignature, BuilderPrototype, Callback,
        CallbackHandle, CompiledPattern, ComponentRegistry, DeclaredType, ParameterKind,
        ParameterValue, Resolving, ResolvingRecord, Route, RouteBuilder, RouteMatch, RouteRequest,
        Router,
    };
}
