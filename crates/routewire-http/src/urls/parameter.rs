//! Typed placeholder tokens in URL templates.
//!
//! A template such as `/users/{id|int}/posts/{slug|str}` contains placeholder
//! tokens. Each token is recognized as one [`ParameterKind`] and parsed into a
//! [`ParameterSpec`], which knows the regex a matching URL segment must satisfy
//! and which action parameter types it can be bound to.
//!
//! # Parameter kinds
//!
//! | Token                   | Kind     | URL segment regex      | Value          |
//! |-------------------------|----------|------------------------|----------------|
//! | `{name}`                | `Untyped`| `[a-z0-9\-_.:]+`       | `Str`          |
//! | `{name\|bool}`          | `Bool`   | `[01]`                 | `Bool`         |
//! | `{name\|int}`           | `Int`    | `[0-9]+`               | `Int`          |
//! | `{name\|str}`           | `Str`    | `[a-z0-9\-_.:]+`       | `Str`          |
//! | `{name\|arr}`           | `Arr`    | `[a-z0-9\-_.:/]+`      | `Arr`          |
//! | `{name\|arr-int}`       | `ArrInt` | `[0-9/]+`              | `ArrInt`       |
//! | `{name\|arr-str}`       | `ArrStr` | `[a-z0-9\-_.:/]+`      | `Arr`          |
//! | `{name\|enum:a,b,...}`  | `Enum`   | `a\|b\|...` (escaped)  | `Str`          |
//!
//! Names match `[_a-z][_a-z0-9]*`; all grammars are case-insensitive.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use routewire_core::{RoutingError, RoutingResult};

use super::signature::{ActionParameter, DeclaredType};

/// Anything shaped like a placeholder. Every such token must be recognized.
fn token_shape() -> &'static Regex {
    static TOKEN_SHAPE: OnceLock<Regex> = OnceLock::new();
    TOKEN_SHAPE.get_or_init(|| Regex::new(r"\{[^{}]*\}").expect("token shape regex is valid"))
}

/// The anchored alternation of every kind's grammar, one capture group per
/// kind in [`ParameterKind::PRIORITY`] order.
fn token_grammar() -> &'static Regex {
    static TOKEN_GRAMMAR: OnceLock<Regex> = OnceLock::new();
    TOKEN_GRAMMAR.get_or_init(|| {
        Regex::new(&format!("(?i)^(?:{})$", combined_pattern()))
            .expect("parameter grammars form a valid regex")
    })
}

/// The closed set of placeholder kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// `{name}`
    Untyped,
    /// `{name|bool}`
    Bool,
    /// `{name|int}`
    Int,
    /// `{name|str}`
    Str,
    /// `{name|arr}`
    Arr,
    /// `{name|arr-int}`
    ArrInt,
    /// `{name|arr-str}`
    ArrStr,
    /// `{name|enum:v1,v2,...}`
    Enum,
}

impl ParameterKind {
    /// Recognition order. For any token the first kind whose grammar matches wins.
    pub const PRIORITY: [Self; 8] = [
        Self::Untyped,
        Self::Bool,
        Self::Int,
        Self::Str,
        Self::Arr,
        Self::ArrInt,
        Self::ArrStr,
        Self::Enum,
    ];

    /// The regex recognizing this kind's token syntax, braces included.
    ///
    /// Callers apply case-insensitivity.
    pub const fn match_pattern(self) -> &'static str {
        match self {
            Self::Untyped => r"\{[_a-z][_a-z0-9]*\}",
            Self::Bool => r"\{[_a-z][_a-z0-9]*\|bool\}",
            Self::Int => r"\{[_a-z][_a-z0-9]*\|int\}",
            Self::Str => r"\{[_a-z][_a-z0-9]*\|str\}",
            Self::Arr => r"\{[_a-z][_a-z0-9]*\|arr\}",
            Self::ArrInt => r"\{[_a-z][_a-z0-9]*\|arr-int\}",
            Self::ArrStr => r"\{[_a-z][_a-z0-9]*\|arr-str\}",
            Self::Enum => r"\{[_a-z][_a-z0-9]*\|enum:[a-z0-9\-_.:]+(?:,[a-z0-9\-_.:]+)*\}",
        }
    }

    /// The regex a URL segment must satisfy, for every kind but `Enum`
    /// (whose regex depends on its variants).
    const fn fixed_url_pattern(self) -> Option<&'static str> {
        match self {
            Self::Untyped | Self::Str => Some(r"[a-z0-9\-_.:]+"),
            Self::Bool => Some("[01]"),
            Self::Int => Some("[0-9]+"),
            Self::Arr | Self::ArrStr => Some(r"[a-z0-9\-_.:/]+"),
            Self::ArrInt => Some("[0-9/]+"),
            Self::Enum => None,
        }
    }

    /// The kind's name as written after the `|` in a token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Untyped => "untyped",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Str => "str",
            Self::Arr => "arr",
            Self::ArrInt => "arr-int",
            Self::ArrStr => "arr-str",
            Self::Enum => "enum",
        }
    }

    /// Recognizes a raw token, braces included.
    ///
    /// Returns the first kind in [`PRIORITY`](Self::PRIORITY) order whose
    /// grammar matches the whole token, or `None`.
    pub fn recognize(token: &str) -> Option<Self> {
        let captures = token_grammar().captures(token)?;
        Self::PRIORITY
            .iter()
            .enumerate()
            .find(|(index, _)| captures.get(index + 1).is_some())
            .map(|(_, kind)| *kind)
    }

    /// Whether an action parameter can receive values of this kind.
    ///
    /// Parameters without a declared type accept every kind.
    pub fn accepts(self, parameter: &ActionParameter) -> bool {
        let Some(declared) = parameter.declared() else {
            return true;
        };
        match self {
            Self::Untyped => matches!(
                declared,
                DeclaredType::String | DeclaredType::Int | DeclaredType::Bool
            ),
            Self::Bool => declared == DeclaredType::Bool,
            Self::Int => declared == DeclaredType::Int,
            Self::Str | Self::Enum => declared == DeclaredType::String,
            Self::Arr | Self::ArrStr => {
                declared == DeclaredType::Array
                    || (parameter.is_variadic() && declared == DeclaredType::String)
            }
            Self::ArrInt => {
                declared == DeclaredType::Array
                    || (parameter.is_variadic() && declared == DeclaredType::Int)
            }
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every kind's grammar joined into one alternation, in priority order, each
/// wrapped in its own capture group.
pub fn combined_pattern() -> String {
    ParameterKind::PRIORITY
        .iter()
        .map(|kind| format!("({})", kind.match_pattern()))
        .collect::<Vec<_>>()
        .join("|")
}

/// A typed value converted from a captured URL segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    /// From a `bool` parameter.
    Bool(bool),
    /// From an `int` parameter.
    Int(i64),
    /// From an untyped, `str` or `enum` parameter.
    Str(String),
    /// From an `arr` or `arr-str` parameter; one element per path segment.
    Arr(Vec<String>),
    /// From an `arr-int` parameter; one element per path segment.
    ArrInt(Vec<i64>),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", u8::from(*v)),
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Arr(v) => f.write_str(&v.join("/")),
            Self::ArrInt(v) => {
                let parts: Vec<String> = v.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join("/"))
            }
        }
    }
}

/// One parsed placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    name: String,
    kind: ParameterKind,
    variants: Vec<String>,
    token: String,
}

impl ParameterSpec {
    /// Parses a single raw token such as `{id|int}`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::UnrecognizedParameterKind`] if the token matches
    /// no grammar. `template` is only used for the error message.
    pub fn from_token(template: &str, token: &str) -> RoutingResult<Self> {
        let kind =
            ParameterKind::recognize(token).ok_or_else(|| RoutingError::UnrecognizedParameterKind {
                template: template.to_string(),
                token: token.to_string(),
            })?;

        let inner = token.trim_start_matches('{').trim_end_matches('}');
        let (name, suffix) = inner.split_once('|').unwrap_or((inner, ""));

        let variants = if kind == ParameterKind::Enum {
            // The grammar guarantees the `enum:` prefix, in any case.
            suffix
                .get("enum:".len()..)
                .unwrap_or_default()
                .split(',')
                .map(String::from)
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            name: name.to_string(),
            kind,
            variants,
            token: token.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The enum variants, in template order. Empty for other kinds.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// The raw token text as it appears in the template.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The regex a matching URL segment must satisfy (without a capture group).
    pub fn url_pattern(&self) -> Cow<'static, str> {
        self.kind.fixed_url_pattern().map_or_else(
            || {
                Cow::Owned(
                    self.variants
                        .iter()
                        .map(|variant| regex::escape(variant))
                        .collect::<Vec<_>>()
                        .join("|"),
                )
            },
            Cow::Borrowed,
        )
    }

    /// Whether the given action parameter can receive this parameter's values.
    pub fn accepts(&self, parameter: &ActionParameter) -> bool {
        self.kind.accepts(parameter)
    }

    /// Converts a captured URL segment to its typed value.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidParameterValue`] if `raw` is not a valid
    /// value of this kind (including integer overflow).
    pub fn parse_value(&self, raw: &str) -> RoutingResult<ParameterValue> {
        let invalid = |reason: String| RoutingError::InvalidParameterValue {
            parameter: self.name.clone(),
            value: raw.to_string(),
            reason,
        };

        match self.kind {
            ParameterKind::Bool => match raw {
                "1" => Ok(ParameterValue::Bool(true)),
                "0" => Ok(ParameterValue::Bool(false)),
                _ => Err(invalid("expected 0 or 1".to_string())),
            },
            ParameterKind::Int => raw
                .parse::<i64>()
                .map(ParameterValue::Int)
                .map_err(|e| invalid(e.to_string())),
            ParameterKind::Untyped | ParameterKind::Str => {
                if raw.is_empty() {
                    Err(invalid("value is empty".to_string()))
                } else {
                    Ok(ParameterValue::Str(raw.to_string()))
                }
            }
            ParameterKind::Enum => self
                .variants
                .iter()
                .find(|variant| variant.eq_ignore_ascii_case(raw))
                .map(|variant| ParameterValue::Str(variant.clone()))
                .ok_or_else(|| invalid(format!("expected one of {}", self.variants.join(", ")))),
            ParameterKind::Arr | ParameterKind::ArrStr => Ok(ParameterValue::Arr(
                segments(raw).map(String::from).collect(),
            )),
            ParameterKind::ArrInt => segments(raw)
                .map(str::parse::<i64>)
                .collect::<Result<Vec<_>, _>>()
                .map(ParameterValue::ArrInt)
                .map_err(|e| invalid(e.to_string())),
        }
    }
}

fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('/').filter(|segment| !segment.is_empty())
}

/// Finds every placeholder token in `template`, left to right, with its byte
/// range.
///
/// # Errors
///
/// Returns [`RoutingError::UnrecognizedParameterKind`] for the first
/// `{...}`-shaped token that matches no grammar.
pub(crate) fn scan(template: &str) -> RoutingResult<Vec<(Range<usize>, ParameterSpec)>> {
    token_shape()
        .find_iter(template)
        .map(|m| ParameterSpec::from_token(template, m.as_str()).map(|spec| (m.range(), spec)))
        .collect()
}

/// Parses every placeholder token in `template`, in order of occurrence.
///
/// Repeated names are kept.
///
/// # Errors
///
/// Returns [`RoutingError::UnrecognizedParameterKind`] for the first
/// unrecognized token.
pub fn extract(template: &str) -> RoutingResult<Vec<ParameterSpec>> {
    Ok(scan(template)?.into_iter().map(|(_, spec)| spec).collect())
}
