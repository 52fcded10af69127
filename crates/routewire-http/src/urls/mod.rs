//! Route declaration, validation, and resolution.
//!
//! - [`parameter`]: Placeholder kinds (`{id|int}`, `{k|enum:a,b}`, ...)
//! - [`pattern`]: Template compilation to anchored matchers
//! - [`signature`]: What a bound action accepts
//! - [`resolving`]: The action and filters a route resolves to
//! - [`route`]: Routes validated against their action
//! - [`builder`]: Fluent, single-use declarations
//! - [`router`]: The ordered route registry and resolution
//! - [`registry`]: Named resolving implementations
//!
//! # Examples
//!
//! ```
//! use routewire_http::urls::parameter::ParameterValue;
//! use routewire_http::urls::router::Router;
//! use routewire_http::urls::signature::{
//!     ActionParameter, ActionPointer, ActionSignature, DeclaredType,
//! };
//!
//! let mut router = Router::new();
//! router
//!     .on_get(["/users/{id|int}", "/members/{id|int}"])
//!     .unwrap()
//!     .call(
//!         ActionSignature::pointer(ActionPointer::new("Users", "show"))
//!             .param(ActionParameter::required("id", DeclaredType::Int)),
//!     )
//!     .unwrap();
//!
//! let m = router.find("GET", "/members/42/").unwrap();
//! assert_eq!(m.route().template(), "/members/{id|int}");
//! assert_eq!(m.values().unwrap(), vec![("id", ParameterValue::Int(42))]);
//!
//! // The template and the action must agree
//! let err = router
//!     .on_get(["/users/{slug|str}"])
//!     .unwrap()
//!     .call(
//!         ActionSignature::pointer(ActionPointer::new("Users", "show"))
//!             .param(ActionParameter::required("id", DeclaredType::Int)),
//!     )
//!     .unwrap_err();
//! assert!(err.is_bootstrap_error());
//! ```

pub mod builder;
pub mod parameter;
pub mod pattern;
pub mod registry;
pub mod resolving;
pub mod route;
pub mod router;
pub mod signature;
