//! Fluent route declarations.
//!
//! A [`RouteBuilder`] collects HTTP methods, templates, filters and finally
//! one action, then fans the declaration out into one [`Route`] per
//! (method, template) pair. Builders are single-use: a second
//! [`call`](RouteBuilder::call) fails with [`RoutingError::DuplicateBinding`].
//!
//! New builders come from a [`BuilderPrototype`], which holds the
//! configuration every declaration starts from. [`BuilderPrototype::begin`]
//! returns a builder with no methods, templates, filters or action.

use std::sync::Arc;

use routewire_core::logging::registration_span;
use routewire_core::{RoutingError, RoutingResult, RoutingSettings};

use super::registry::{ComponentRegistry, ResolvingFactory};
use super::resolving::{Resolving, ResolvingRecord};
use super::route::Route;
use super::router::Router;
use super::signature::{Callback, CallbackHandle};

/// The immutable configuration new declarations start from.
#[derive(Debug, Clone, Copy)]
pub struct BuilderPrototype {
    resolving_factory: ResolvingFactory,
    log_registrations: bool,
}

impl Default for BuilderPrototype {
    fn default() -> Self {
        Self::new(ResolvingRecord::boxed)
    }
}

impl BuilderPrototype {
    pub const fn new(resolving_factory: ResolvingFactory) -> Self {
        Self {
            resolving_factory,
            log_registrations: true,
        }
    }

    /// Builds a prototype from routing settings, looking the resolving
    /// implementation up by name.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidClassName`] if `settings.resolving` is
    /// not registered.
    pub fn from_settings(
        settings: &RoutingSettings,
        registry: &ComponentRegistry,
    ) -> RoutingResult<Self> {
        let factory = registry.resolving_factory(&settings.resolving)?;
        Ok(Self::new(factory).with_log_registrations(settings.log_registrations))
    }

    /// Sets whether each registered route is logged at `debug` level.
    #[must_use]
    pub const fn with_log_registrations(mut self, enabled: bool) -> Self {
        self.log_registrations = enabled;
        self
    }

    pub const fn resolving_factory(&self) -> ResolvingFactory {
        self.resolving_factory
    }

    /// Starts a new, empty declaration.
    pub const fn begin<'r>(&self) -> RouteBuilder<'r> {
        RouteBuilder {
            prototype: *self,
            router: None,
            http_methods: Vec::new(),
            templates: Vec::new(),
            resolving: None,
            bound: false,
        }
    }
}

/// A single-use, fluent route declaration.
///
/// # Examples
///
/// ```
/// use routewire_http::urls::router::Router;
/// use routewire_http::urls::signature::{
///     ActionParameter, ActionPointer, ActionSignature, DeclaredType,
/// };
///
/// let mut router = Router::new();
/// router
///     .on_get(["/users/{id|int}"])
///     .unwrap()
///     .filter(ActionSignature::pointer(ActionPointer::new("Auth", "check")))
///     .call(
///         ActionSignature::pointer(ActionPointer::new("Users", "show"))
///             .param(ActionParameter::required("id", DeclaredType::Int)),
///     )
///     .unwrap();
/// assert_eq!(router.len(), 1);
/// ```
#[derive(Debug)]
pub struct RouteBuilder<'r> {
    prototype: BuilderPrototype,
    router: Option<&'r mut Router>,
    http_methods: Vec<String>,
    templates: Vec<String>,
    /// Created on first use
    resolving: Option<Box<dyn Resolving>>,
    bound: bool,
}

impl<'r> RouteBuilder<'r> {
    /// Attaches the router that [`call`](Self::call) registers routes with.
    pub fn set_router(&mut self, router: &'r mut Router) -> &mut Self {
        self.router = Some(router);
        self
    }

    /// Sets the declaration's methods and templates.
    ///
    /// An empty method list means any method. An empty string in the list
    /// also means any method.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::PatternNotSet`] if `templates` is empty, or
    /// [`RoutingError::InvalidArgument`] if a method is not a valid HTTP
    /// method token.
    pub fn init<M, MS, T, TS>(&mut self, methods: M, templates: T) -> RoutingResult<&mut Self>
    where
        M: IntoIterator<Item = MS>,
        MS: Into<String>,
        T: IntoIterator<Item = TS>,
        TS: Into<String>,
    {
        let http_methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        let templates: Vec<String> = templates.into_iter().map(Into::into).collect();

        if templates.is_empty() {
            return Err(RoutingError::PatternNotSet(
                "at least one URL template is required".to_string(),
            ));
        }
        for method in &http_methods {
            if !method.is_empty() && http::Method::from_bytes(method.as_bytes()).is_err() {
                return Err(RoutingError::InvalidArgument(format!(
                    "\"{method}\" is not a valid HTTP method"
                )));
            }
        }

        self.http_methods = http_methods;
        self.templates = templates;
        Ok(self)
    }

    /// Appends a filter run before the action.
    pub fn filter(&mut self, filter: impl Into<CallbackHandle>) -> &mut Self {
        self.record().add_filter_before(filter.into());
        self
    }

    /// Appends a filter run after the action.
    pub fn out(&mut self, filter: impl Into<CallbackHandle>) -> &mut Self {
        self.record().add_filter_after(filter.into());
        self
    }

    /// Appends an authorization check to the before-filters.
    pub fn when(&mut self, authorization: impl Into<CallbackHandle>) -> &mut Self {
        self.filter(authorization)
    }

    /// Binds `action` and registers one route per (method, template) pair,
    /// template by template.
    ///
    /// All routes are validated before any is registered, so a failing
    /// template registers nothing. The routes share one frozen resolving
    /// record.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::RouterNotSet`] if no router is attached.
    /// - [`RoutingError::PatternNotSet`] if no templates were set.
    /// - [`RoutingError::DuplicateBinding`] if `call` already ran on this builder.
    /// - Any [`Route::new`] error.
    pub fn call(&mut self, action: impl Into<CallbackHandle>) -> RoutingResult<()> {
        if self.router.is_none() {
            return Err(RoutingError::RouterNotSet);
        }
        if self.templates.is_empty() {
            return Err(RoutingError::PatternNotSet(
                "call() requires templates; use init() first".to_string(),
            ));
        }
        if self.bound {
            return Err(RoutingError::DuplicateBinding);
        }
        self.bound = true;

        let action = action.into();
        let description = action.describe();
        let mut record = self
            .resolving
            .take()
            .unwrap_or_else(self.prototype.resolving_factory);
        record.set_action(action);
        let resolving: Arc<dyn Resolving> = Arc::from(record);

        let methods: Vec<&str> = if self.http_methods.is_empty() {
            vec![""]
        } else {
            self.http_methods.iter().map(String::as_str).collect()
        };

        let mut routes = Vec::with_capacity(methods.len() * self.templates.len());
        for template in &self.templates {
            for method in &methods {
                let span = registration_span(method, template);
                let _guard = span.enter();
                routes.push(Route::new(*method, template, Arc::clone(&resolving))?);
            }
        }

        if let Some(target) = self.router.as_deref_mut() {
            for route in routes {
                if self.prototype.log_registrations {
                    tracing::debug!(
                        method = route.http_method(),
                        template = route.template(),
                        action = %description,
                        "Registered route"
                    );
                }
                target.add(route);
            }
        }
        Ok(())
    }

    /// Consumes the builder and returns an empty one attached to the same
    /// router.
    #[must_use]
    pub fn fresh(self) -> Self {
        let mut builder = self.prototype.begin();
        builder.router = self.router;
        builder
    }

    /// The declared methods; empty means any method.
    pub fn http_methods(&self) -> &[String] {
        &self.http_methods
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Whether [`call`](Self::call) has run.
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    fn record(&mut self) -> &mut Box<dyn Resolving> {
        let factory = self.prototype.resolving_factory;
        self.resolving.get_or_insert_with(factory)
    }
}
