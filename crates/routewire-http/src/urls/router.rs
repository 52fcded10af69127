//! The route registry and request resolution.
//!
//! A [`Router`] holds routes in registration order. Verb methods such as
//! [`Router::on_get`] start a fluent declaration; [`Router::resolve`] returns
//! the resolving record of the first route matching a request.

use std::sync::Arc;

use routewire_core::{RoutingResult, Settings};

use super::builder::{BuilderPrototype, RouteBuilder};
use super::parameter::ParameterValue;
use super::registry::ComponentRegistry;
use super::resolving::Resolving;
use super::route::Route;

/// What resolution needs from a request.
pub trait RouteRequest {
    /// The HTTP method, e.g. `GET`.
    fn method(&self) -> &str;

    /// The request target matched against templates.
    fn target(&self) -> &str;
}

impl<B> RouteRequest for http::Request<B> {
    fn method(&self) -> &str {
        self.method().as_str()
    }

    fn target(&self) -> &str {
        self.uri().path()
    }
}

impl RouteRequest for (&str, &str) {
    fn method(&self) -> &str {
        self.0
    }

    fn target(&self) -> &str {
        self.1
    }
}

/// A route that matched a target, with the captured segments.
#[derive(Debug)]
pub struct RouteMatch<'r> {
    route: &'r Route,
    captures: Vec<String>,
}

impl<'r> RouteMatch<'r> {
    pub const fn route(&self) -> &'r Route {
        self.route
    }

    pub const fn resolving(&self) -> &'r Arc<dyn Resolving> {
        self.route.resolving()
    }

    /// `(name, raw value)` pairs in template order.
    pub fn params(&self) -> Vec<(&str, &str)> {
        self.route
            .parameters()
            .iter()
            .zip(&self.captures)
            .map(|(spec, value)| (spec.name(), value.as_str()))
            .collect()
    }

    /// The raw value captured for `name`. When a name repeats, the last
    /// occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params()
            .into_iter()
            .rev()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value)
    }

    /// `(name, typed value)` pairs in template order.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidParameterValue`](routewire_core::RoutingError::InvalidParameterValue)
    /// if a captured segment does not convert, e.g. an `int` that overflows.
    pub fn values(&self) -> RoutingResult<Vec<(&str, ParameterValue)>> {
        self.route
            .parameters()
            .iter()
            .zip(&self.captures)
            .map(|(spec, raw)| spec.parse_value(raw).map(|value| (spec.name(), value)))
            .collect()
    }
}

/// An ordered collection of routes.
///
/// # Examples
///
/// ```
/// use routewire_http::urls::router::Router;
/// use routewire_http::urls::signature::{ActionPointer, ActionSignature};
///
/// let mut router = Router::new();
/// router
///     .on_any(["/health"])
///     .unwrap()
///     .call(ActionSignature::pointer(ActionPointer::new("Health", "check")))
///     .unwrap();
///
/// assert!(router.resolve(&("GET", "/health")).is_some());
/// assert!(router.resolve(&("POST", "/health/")).is_some());
/// assert!(router.resolve(&("GET", "/missing")).is_none());
/// ```
#[derive(Debug, Default)]
pub struct Router {
    prototype: BuilderPrototype,
    routes: Vec<Route>,
}

impl Router {
    /// Creates an empty router using the stock resolving record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty router whose declarations start from `prototype`.
    pub const fn with_prototype(prototype: BuilderPrototype) -> Self {
        Self {
            prototype,
            routes: Vec::new(),
        }
    }

    /// Creates an empty router configured from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidClassName`](routewire_core::RoutingError::InvalidClassName)
    /// if `settings.routing.resolving` is not in `registry`.
    pub fn from_settings(settings: &Settings, registry: &ComponentRegistry) -> RoutingResult<Self> {
        let prototype = BuilderPrototype::from_settings(&settings.routing, registry)?;
        Ok(Self::with_prototype(prototype))
    }

    pub const fn prototype(&self) -> &BuilderPrototype {
        &self.prototype
    }

    /// Starts a declaration for `GET`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::PatternNotSet`](routewire_core::RoutingError::PatternNotSet)
    /// if `templates` is empty.
    pub fn on_get<T, S>(&mut self, templates: T) -> RoutingResult<RouteBuilder<'_>>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_match(["GET"], templates)
    }

    /// Starts a declaration for `POST`.
    ///
    /// # Errors
    ///
    /// See [`on_get`](Self::on_get).
    pub fn on_post<T, S>(&mut self, templates: T) -> RoutingResult<RouteBuilder<'_>>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_match(["POST"], templates)
    }

    /// Starts a declaration for `PUT`.
    ///
    /// # Errors
    ///
    /// See [`on_get`](Self::on_get).
    pub fn on_put<T, S>(&mut self, templates: T) -> RoutingResult<RouteBuilder<'_>>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_match(["PUT"], templates)
    }

    /// Starts a declaration for `DELETE`.
    ///
    /// # Errors
    ///
    /// See [`on_get`](Self::on_get).
    pub fn on_delete<T, S>(&mut self, templates: T) -> RoutingResult<RouteBuilder<'_>>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_match(["DELETE"], templates)
    }

    /// Starts a declaration for `OPTIONS`.
    ///
    /// # Errors
    ///
    /// See [`on_get`](Self::on_get).
    pub fn on_options<T, S>(&mut self, templates: T) -> RoutingResult<RouteBuilder<'_>>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_match(["OPTIONS"], templates)
    }

    /// Starts a declaration matching any method.
    ///
    /// # Errors
    ///
    /// See [`on_get`](Self::on_get).
    pub fn on_any<T, S>(&mut self, templates: T) -> RoutingResult<RouteBuilder<'_>>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_match(Vec::<String>::new(), templates)
    }

    /// Starts a declaration for the given methods; an empty list means any
    /// method.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::PatternNotSet`](routewire_core::RoutingError::PatternNotSet)
    /// if `templates` is empty, or
    /// [`RoutingError::InvalidArgument`](routewire_core::RoutingError::InvalidArgument)
    /// for an invalid method.
    pub fn on_match<M, MS, T, TS>(
        &mut self,
        methods: M,
        templates: T,
    ) -> RoutingResult<RouteBuilder<'_>>
    where
        M: IntoIterator<Item = MS>,
        MS: Into<String>,
        T: IntoIterator<Item = TS>,
        TS: Into<String>,
    {
        let mut builder = self.prototype.begin();
        builder.init(methods, templates)?;
        builder.set_router(self);
        Ok(builder)
    }

    /// Appends a route. Earlier routes take priority.
    pub fn add(&mut self, route: Route) -> &mut Self {
        self.routes.push(route);
        self
    }

    /// The routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the first route registered for `method` (or for any method)
    /// whose pattern matches `target`.
    pub fn find(&self, method: &str, target: &str) -> Option<RouteMatch<'_>> {
        let found = self.routes.iter().find_map(|route| {
            if !route.matches_method(method) {
                return None;
            }
            let captures = route.pattern().captures(target)?;
            Some(RouteMatch {
                route,
                captures: captures.into_iter().map(String::from).collect(),
            })
        });

        if let Some(m) = &found {
            tracing::trace!(method, target, template = m.route.template(), "Route matched");
        } else {
            tracing::trace!(method, target, "No route matched");
        }
        found
    }

    /// Returns the resolving record of the first route matching `request`.
    pub fn resolve(&self, request: &impl RouteRequest) -> Option<Arc<dyn Resolving>> {
        self.find(request.method(), request.target())
            .map(|m| Arc::clone(m.resolving()))
    }
}
