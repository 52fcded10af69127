//! Validated routes.
//!
//! A [`Route`] binds one HTTP method and one compiled template to a frozen
//! [`Resolving`]. Construction cross-checks the template's parameters against
//! the bound action's signature; a `Route` that exists is known to be
//! consistent and is never re-validated.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use routewire_core::{RoutingError, RoutingResult};

use super::parameter::ParameterSpec;
use super::pattern::CompiledPattern;
use super::resolving::Resolving;
use super::signature::{ActionParameter, Callback};

/// An immutable method + pattern + resolving binding.
pub struct Route {
    /// The HTTP method, or empty for any method
    http_method: String,
    pattern: CompiledPattern,
    resolving: Arc<dyn Resolving>,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("http_method", &self.http_method)
            .field("template", &self.pattern.template())
            .field("resolving", &self.resolving)
            .finish()
    }
}

impl Route {
    /// Compiles `template` and validates it against the action bound to
    /// `resolving`.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::UnrecognizedParameterKind`] / [`RoutingError::InvalidPattern`]
    ///   if the template does not compile.
    /// - [`RoutingError::DuplicatePatternParameter`] if a parameter name repeats.
    /// - [`RoutingError::ActionNotSet`] if `resolving` has no action.
    /// - [`RoutingError::MissingRouteParameter`] if a required action parameter
    ///   is absent from the template.
    /// - [`RoutingError::UnboundPatternParameter`] if a template parameter is
    ///   not accepted by the action.
    /// - [`RoutingError::ParameterTypeMismatch`] if a template parameter's kind
    ///   does not fit the action parameter's declared type.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use routewire_http::urls::resolving::{Resolving, ResolvingRecord};
    /// use routewire_http::urls::route::Route;
    /// use routewire_http::urls::signature::{
    ///     ActionParameter, ActionPointer, ActionSignature, DeclaredType,
    /// };
    ///
    /// let mut record = ResolvingRecord::new();
    /// record.set_action(Arc::new(
    ///     ActionSignature::pointer(ActionPointer::new("Users", "show"))
    ///         .param(ActionParameter::required("id", DeclaredType::Int)),
    /// ));
    /// let record: Arc<dyn Resolving> = Arc::new(record);
    ///
    /// assert!(Route::new("GET", "/users/{id|int}", Arc::clone(&record)).is_ok());
    /// assert!(Route::new("GET", "/users/{other}", record).is_err());
    /// ```
    pub fn new(
        http_method: impl Into<String>,
        template: &str,
        resolving: Arc<dyn Resolving>,
    ) -> RoutingResult<Self> {
        let pattern = CompiledPattern::compile(template)?;
        validate(&pattern, resolving.as_ref())?;
        Ok(Self {
            http_method: http_method.into(),
            pattern,
            resolving,
        })
    }

    /// The HTTP method; empty means any method.
    pub fn http_method(&self) -> &str {
        &self.http_method
    }

    pub const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        self.pattern.parameters()
    }

    pub const fn resolving(&self) -> &Arc<dyn Resolving> {
        &self.resolving
    }

    /// Whether the route's action and filters can all be persisted.
    pub fn is_serializable(&self) -> bool {
        self.resolving.is_serializable()
    }

    /// Whether a request with `method` can be served by this route.
    pub fn matches_method(&self, method: &str) -> bool {
        self.http_method.is_empty() || self.http_method == method
    }
}

fn validate(pattern: &CompiledPattern, resolving: &dyn Resolving) -> RoutingResult<()> {
    let template = pattern.template();

    let mut seen = HashSet::new();
    for spec in pattern.parameters() {
        if !seen.insert(spec.name()) {
            return Err(RoutingError::DuplicatePatternParameter {
                template: template.to_string(),
                parameter: spec.name().to_string(),
            });
        }
    }

    let action = resolving.action()?;
    let accepted: HashMap<&str, &ActionParameter> = action
        .parameters()
        .iter()
        .map(|parameter| (parameter.name(), parameter))
        .collect();

    for parameter in action.parameters() {
        if !parameter.is_optional() && !seen.contains(parameter.name()) {
            return Err(RoutingError::MissingRouteParameter {
                template: template.to_string(),
                parameter: parameter.name().to_string(),
            });
        }
    }

    for spec in pattern.parameters() {
        let Some(parameter) = accepted.get(spec.name()) else {
            return Err(RoutingError::UnboundPatternParameter {
                template: template.to_string(),
                parameter: spec.name().to_string(),
            });
        };
        if !spec.accepts(parameter) {
            return Err(RoutingError::ParameterTypeMismatch {
                template: template.to_string(),
                parameter: spec.name().to_string(),
                kind: spec.kind().to_string(),
                declared: parameter.declared_name().to_string(),
            });
        }
    }

    Ok(())
}
