//! Logging integration for routewire.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-declaration spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. `debug`, `info`,
/// `routewire_http=trace`). In debug mode a pretty, human-readable format is
/// used; otherwise a structured JSON format is used. Calling this more than
/// once is harmless; only the first subscriber is installed.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one route declaration.
///
/// An empty `method` is rendered as `*` (any method).
///
/// # Examples
///
/// ```
/// use routewire_core::logging::registration_span;
///
/// let span = registration_span("GET", "/users/{id|int}");
/// let _guard = span.enter();
/// tracing::debug!("compiling route");
/// ```
pub fn registration_span(method: &str, template: &str) -> tracing::Span {
    let method = if method.is_empty() { "*" } else { method };
    tracing::info_span!("route", method, template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_is_idempotent() {
        let mut settings = Settings::default();
        settings.log_level = "not a valid ===== directive".to_string();
        setup_logging(&settings);
        settings.debug = false;
        setup_logging(&settings);
    }

    #[test]
    fn test_registration_span_enters() {
        let span = registration_span("", "/anything");
        let _guard = span.enter();
        tracing::debug!("inside registration span");
    }
}
