//! Template compilation.
//!
//! [`CompiledPattern::compile`] turns a template such as
//! `/users/{id|int}/posts/{slug|str}` into an anchored, case-insensitive
//! matcher plus the ordered list of its [`ParameterSpec`]s. Each parameter
//! becomes exactly one capture group, so captures line up with
//! [`CompiledPattern::parameters`] by position.

use std::fmt;

use regex::Regex;

use routewire_core::{RoutingError, RoutingResult};

use super::parameter::{self, ParameterSpec};

/// Accepts no trailing slash, one trailing slash, or a slash followed by a
/// `?` query string.
const SUFFIX: &str = r"(?:/?|/\?.*)";

/// A template compiled to a matcher.
#[derive(Clone)]
pub struct CompiledPattern {
    /// The template exactly as given
    template: String,
    /// Parameters in order of occurrence; duplicate names are kept
    parameters: Vec<ParameterSpec>,
    /// The anchored matcher
    regex: Regex,
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("template", &self.template)
            .field("regex", &self.regex.as_str())
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl CompiledPattern {
    /// Compiles a template.
    ///
    /// One trailing `/` is dropped from the template before compilation, and
    /// literal text is regex-escaped.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::UnrecognizedParameterKind`] if a `{...}` token
    /// is not a known parameter kind, or [`RoutingError::InvalidPattern`] if
    /// the resulting regex does not compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use routewire_http::urls::pattern::CompiledPattern;
    ///
    /// let pattern = CompiledPattern::compile("/users/{id|int}").unwrap();
    /// assert_eq!(pattern.captures("/users/42"), Some(vec!["42"]));
    /// assert!(pattern.is_match("/users/42/"));
    /// assert!(!pattern.is_match("/users/abc"));
    /// ```
    pub fn compile(template: &str) -> RoutingResult<Self> {
        let body = template.strip_suffix('/').unwrap_or(template);
        let found = parameter::scan(template)?;

        let mut source = String::from("(?is)^");
        let mut cursor = 0;
        let mut parameters = Vec::with_capacity(found.len());

        for (range, spec) in found {
            source.push_str(&regex::escape(&body[cursor..range.start]));
            source.push('(');
            source.push_str(&spec.url_pattern());
            source.push(')');
            cursor = range.end;
            parameters.push(spec);
        }
        source.push_str(&regex::escape(&body[cursor..]));
        source.push_str(SUFFIX);
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| RoutingError::InvalidPattern(format!("{template}: {e}")))?;

        Ok(Self {
            template: template.to_string(),
            parameters,
            regex,
        })
    }

    /// Returns the template exactly as it was given to [`compile`](Self::compile).
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the parameters in order of occurrence.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Returns the compiled regex.
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether `target` matches as a whole.
    pub fn is_match(&self, target: &str) -> bool {
        self.regex.is_match(target)
    }

    /// Matches `target` and returns the captured segments, aligned with
    /// [`parameters`](Self::parameters).
    pub fn captures<'t>(&self, target: &'t str) -> Option<Vec<&'t str>> {
        let captures = self.regex.captures(target)?;
        (1..=self.parameters.len())
            .map(|index| captures.get(index).map(|m| m.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urls::parameter::ParameterKind;

    fn compile(template: &str) -> CompiledPattern {
        CompiledPattern::compile(template).unwrap()
    }

    #[test]
    fn test_static_template() {
        let p = compile("/about");
        assert!(p.is_match("/about"));
        assert!(p.is_match("/about/"));
        assert!(p.is_match("/about/?lang=en"));
        assert!(!p.is_match("/about-us"));
        assert!(!p.is_match("/about/team"));
        assert!(p.parameters().is_empty());
        assert_eq!(p.captures("/about"), Some(vec![]));
    }

    #[test]
    fn test_int_parameter() {
        let p = compile("/users/{id|int}");
        assert_eq!(p.captures("/users/42"), Some(vec!["42"]));
        assert_eq!(p.captures("/users/42/"), Some(vec!["42"]));
        assert_eq!(p.captures("/users/abc"), None);
        assert_eq!(p.captures("/users/"), None);
    }

    #[test]
    fn test_query_suffix_requires_slash() {
        let p = compile("/users/{id|int}");
        assert!(p.is_match("/users/42/?page=2"));
        assert!(!p.is_match("/users/42?page=2"));
    }

    #[test]
    fn test_multiple_parameters_in_order() {
        let p = compile("/users/{id|int}/posts/{slug|str}");
        assert_eq!(
            p.captures("/users/7/posts/hello-world"),
            Some(vec!["7", "hello-world"])
        );
        let names: Vec<&str> = p.parameters().iter().map(ParameterSpec::name).collect();
        assert_eq!(names, vec!["id", "slug"]);
    }

    #[test]
    fn test_enum_parameter() {
        let p = compile("/items/{k|enum:red,green,blue}");
        assert_eq!(p.captures("/items/green"), Some(vec!["green"]));
        assert!(!p.is_match("/items/purple"));
        assert!(!p.is_match("/items/greenish"));
    }

    #[test]
    fn test_enum_matches_case_insensitively() {
        let p = compile("/items/{k|enum:red,green,blue}");
        assert_eq!(p.captures("/items/GREEN"), Some(vec!["GREEN"]));
    }

    #[test]
    fn test_enum_variants_are_literal() {
        let p = compile("/v/{ver|enum:v1.0,v2.0}");
        assert!(p.is_match("/v/v1.0"));
        assert!(!p.is_match("/v/v1x0"));
    }

    #[test]
    fn test_case_insensitive() {
        let p = compile("/Items/{slug|str}");
        assert!(p.is_match("/items/ABC"));
        assert!(p.is_match("/ITEMS/abc"));
    }

    #[test]
    fn test_array_spans_segments() {
        let p = compile("/files/{path|arr}/raw");
        assert_eq!(p.captures("/files/a/b/c.txt/raw"), Some(vec!["a/b/c.txt"]));

        let p = compile("/ids/{ids|arr-int}");
        assert_eq!(p.captures("/ids/1/2/3"), Some(vec!["1/2/3"]));
        assert!(!p.is_match("/ids/1/x"));
    }

    #[test]
    fn test_array_capture_keeps_trailing_slash() {
        let p = compile("/files/{path|arr}");
        assert_eq!(p.captures("/files/a/b/"), Some(vec!["a/b/"]));
    }

    #[test]
    fn test_bool_parameter() {
        let p = compile("/flags/{on|bool}");
        assert!(p.is_match("/flags/1"));
        assert!(p.is_match("/flags/0"));
        assert!(!p.is_match("/flags/2"));
        assert!(!p.is_match("/flags/10"));
    }

    #[test]
    fn test_trailing_slash_in_template() {
        let p = compile("/users/{id|int}/");
        assert_eq!(p.template(), "/users/{id|int}/");
        assert!(p.is_match("/users/1"));
        assert!(p.is_match("/users/1/"));
    }

    #[test]
    fn test_root_template() {
        let p = compile("/");
        assert!(p.is_match(""));
        assert!(p.is_match("/"));
        assert!(!p.is_match("/x"));
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let p = compile("/a.b/(c)/{x}");
        assert!(p.is_match("/a.b/(c)/y"));
        assert!(!p.is_match("/axb/(c)/y"));
    }

    #[test]
    fn test_repeated_token_text_is_substituted_per_occurrence() {
        let p = compile("/{id}/{id}");
        assert_eq!(p.parameters().len(), 2);
        assert_eq!(p.captures("/a/b"), Some(vec!["a", "b"]));
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let p = compile("/{id|int}/{id|str}");
        assert_eq!(p.parameters()[0].kind(), ParameterKind::Int);
        assert_eq!(p.parameters()[1].kind(), ParameterKind::Str);
    }

    #[test]
    fn test_unrecognized_parameter_kind() {
        let err = CompiledPattern::compile("/a/{b|float}").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Route parameter "{b|float}" in template "/a/{b|float}" does not match any parameter type"#
        );
    }

    #[test]
    fn test_error_names_full_template() {
        let err = CompiledPattern::compile("/a/{b|float}/").unwrap_err();
        assert!(err.to_string().contains("\"/a/{b|float}/\""));
    }

    #[test]
    fn test_template_round_trip() {
        for template in ["/", "", "/a/{b}/", "/x/{k|enum:a,b}", "/UPPER/{ID|INT}"] {
            assert_eq!(compile(template).template(), template);
        }
    }

    #[test]
    fn test_substituted_url_patterns_match() {
        let template = "/s/{a}/{b|bool}/{c|int}/{d|str}/{e|arr-int}/{f|enum:x,y}";
        let p = compile(template);
        assert_eq!(
            p.captures("/s/foo/1/99/bar.baz/4/5/y"),
            Some(vec!["foo", "1", "99", "bar.baz", "4/5", "y"])
        );
    }

    #[test]
    fn test_debug_shows_template_and_regex() {
        let debug = format!("{:?}", compile("/a/{id|int}"));
        assert!(debug.contains("CompiledPattern"));
        assert!(debug.contains("/a/{id|int}"));
        assert!(debug.contains("[0-9]+"));
    }
}
