//! Error types for the routewire engine.
//!
//! This module provides [`RoutingError`], a single enum covering every way a
//! route declaration can be rejected, plus the handful of failures that can
//! happen after routes are registered (typed value conversion, configuration
//! loading). All errors are fail-fast: nothing in the engine retries.

use thiserror::Error;

/// The primary error type for the routewire engine.
///
/// Declaration-time variants are raised while the application wires its
/// routes. They are meant to abort startup; see
/// [`RoutingError::is_bootstrap_error`].
#[derive(Error, Debug)]
pub enum RoutingError {
    // ── Template parsing ─────────────────────────────────────────────

    /// A `{...}` token in a template matches no registered parameter grammar.
    #[error("Route parameter \"{token}\" in template \"{template}\" does not match any parameter type")]
    UnrecognizedParameterKind {
        /// The template containing the token.
        template: String,
        /// The raw token text, braces included.
        token: String,
    },

    /// The regex synthesized from a template failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    // ── Route validation ─────────────────────────────────────────────

    /// The bound action requires a parameter that the template does not declare.
    #[error("Action bound to route \"{template}\" expects a required parameter ${parameter} which is not present in the route template")]
    MissingRouteParameter {
        /// The route template.
        template: String,
        /// The action parameter name.
        parameter: String,
    },

    /// The template declares a parameter that the bound action does not accept.
    #[error("Route template \"{template}\" contains parameter {{{parameter}}} which is not accepted by the bound action")]
    UnboundPatternParameter {
        /// The route template.
        template: String,
        /// The template parameter name.
        parameter: String,
    },

    /// A template parameter's kind is incompatible with the action's declared type.
    #[error("Action bound to route \"{template}\" expects parameter ${parameter} of type \"{declared}\", which does not match the \"{kind}\" type described in the route template")]
    ParameterTypeMismatch {
        /// The route template.
        template: String,
        /// The parameter name.
        parameter: String,
        /// The parameter kind from the template.
        kind: String,
        /// The declared type of the action parameter.
        declared: String,
    },

    /// The same parameter name appears more than once in one template.
    #[error("Route template \"{template}\" declares parameter {{{parameter}}} more than once")]
    DuplicatePatternParameter {
        /// The route template.
        template: String,
        /// The repeated parameter name.
        parameter: String,
    },

    // ── Resolving record & builder ───────────────────────────────────

    /// The resolving record's action was read before one was bound.
    #[error("Resolving action is not set")]
    ActionNotSet,

    /// A builder was initialised or invoked without any templates.
    #[error("Pattern not set: {0}")]
    PatternNotSet(String),

    /// A builder was invoked without a router to register routes with.
    #[error("Router not set: a router must be attached to the builder before call()")]
    RouterNotSet,

    /// `call` was invoked more than once on the same builder.
    #[error("Duplicate binding: an action is already bound to this route declaration")]
    DuplicateBinding,

    /// A named implementation is not registered.
    #[error("Invalid class name \"{name}\": no implementation of {interface} is registered under that name")]
    InvalidClassName {
        /// The requested implementation name.
        name: String,
        /// The interface the implementation was required to provide.
        interface: String,
    },

    /// An argument to a declaration method was malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ── Matching ─────────────────────────────────────────────────────

    /// A captured URL segment could not be converted to its typed value.
    #[error("Invalid value \"{value}\" for parameter {{{parameter}}}: {reason}")]
    InvalidParameterValue {
        /// The parameter name.
        parameter: String,
        /// The raw captured value.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RoutingError {
    /// Returns `true` if this error can only arise while routes are being
    /// declared, meaning application startup should be aborted.
    pub const fn is_bootstrap_error(&self) -> bool {
        !matches!(self, Self::InvalidParameterValue { .. } | Self::Io(_))
    }
}

/// A convenience type alias for `Result<T, RoutingError>`.
pub type RoutingResult<T> = Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_route_parameter_display() {
        let err = RoutingError::MissingRouteParameter {
            template: "/x/{other}".into(),
            parameter: "id".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/x/{other}"));
        assert!(msg.contains("$id"));
    }

    #[test]
    fn test_unbound_pattern_parameter_display() {
        let err = RoutingError::UnboundPatternParameter {
            template: "/x/{id}".into(),
            parameter: "id".into(),
        };
        assert!(err.to_string().contains("{id} which is not accepted"));
    }

    #[test]
    fn test_type_mismatch_display_names_both_types() {
        let err = RoutingError::ParameterTypeMismatch {
            template: "/users/{id|int}".into(),
            parameter: "id".into(),
            kind: "int".into(),
            declared: "string".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"string\""));
        assert!(msg.contains("\"int\""));
        assert!(msg.contains("/users/{id|int}"));
    }

    #[test]
    fn test_unrecognized_kind_display() {
        let err = RoutingError::UnrecognizedParameterKind {
            template: "/a/{b|float}".into(),
            token: "{b|float}".into(),
        };
        assert_eq!(
            err.to_string(),
            "Route parameter \"{b|float}\" in template \"/a/{b|float}\" does not match any parameter type"
        );
    }

    #[test]
    fn test_bootstrap_classification() {
        assert!(RoutingError::DuplicateBinding.is_bootstrap_error());
        assert!(RoutingError::RouterNotSet.is_bootstrap_error());
        assert!(RoutingError::PatternNotSet("x".into()).is_bootstrap_error());
        assert!(!RoutingError::InvalidParameterValue {
            parameter: "id".into(),
            value: "x".into(),
            reason: "not a number".into(),
        }
        .is_bootstrap_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RoutingError = io_err.into();
        assert!(!err.is_bootstrap_error());
        assert!(err.to_string().contains("file missing"));
    }
}
