//! Action signatures and callable handles.
//!
//! Routes never invoke their actions; they only need to know what an action
//! accepts so a template can be checked against it. The [`Callback`] trait is
//! that view of a callable: its ordered parameter list and whether it can be
//! persisted (for example in a cached route table).
//!
//! [`ActionSignature`] is the stock implementation. Applications whose
//! handlers carry their own metadata can implement [`Callback`] directly.

use std::fmt;
use std::sync::Arc;

/// The declared type of an action parameter.
///
/// An untyped parameter is represented as `Option::<DeclaredType>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// A boolean parameter.
    Bool,
    /// An integer parameter.
    Int,
    /// A string parameter.
    String,
    /// An array parameter.
    Array,
}

impl DeclaredType {
    /// Returns the lowercase name used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::String => "string",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parameter of a bound action, as reported by its [`Callback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionParameter {
    name: String,
    declared: Option<DeclaredType>,
    optional: bool,
    variadic: bool,
}

impl ActionParameter {
    /// A required parameter with the given declared type.
    pub fn required(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared: Some(declared),
            optional: false,
            variadic: false,
        }
    }

    /// An optional parameter with the given declared type.
    pub fn optional(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            optional: true,
            ..Self::required(name, declared)
        }
    }

    /// A required parameter without a declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: None,
            optional: false,
            variadic: false,
        }
    }

    /// Marks the parameter as variadic. Variadic parameters are optional.
    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self.optional = true;
        self
    }

    /// Marks the parameter as optional.
    #[must_use]
    pub fn into_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn declared(&self) -> Option<DeclaredType> {
        self.declared
    }

    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    pub const fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Returns the declared type name, or `"none"` for untyped parameters.
    pub fn declared_name(&self) -> &'static str {
        self.declared.map_or("none", DeclaredType::as_str)
    }
}

/// An introspectable, possibly persistable callable: an action or a filter.
pub trait Callback: Send + Sync + fmt::Debug {
    /// The callable's parameters, in declaration order.
    fn parameters(&self) -> &[ActionParameter];

    /// Whether the callable can be stored and restored by reference.
    fn is_serializable(&self) -> bool;

    /// A human-readable description used in logs.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// A shared handle to a [`Callback`].
pub type CallbackHandle = Arc<dyn Callback>;

impl<C: Callback + ?Sized> Callback for Arc<C> {
    fn parameters(&self) -> &[ActionParameter] {
        (**self).parameters()
    }

    fn is_serializable(&self) -> bool {
        (**self).is_serializable()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Points at a member of an owner type, e.g. a controller method.
///
/// A pointer is always exactly an `(owner, member)` pair, so nothing else can
/// be smuggled along with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionPointer {
    owner: String,
    member: String,
}

impl ActionPointer {
    pub fn new(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            member: member.into(),
        }
    }

    /// Points at `member` on the type `T`, named by its Rust type path.
    pub fn of<T: ?Sized>(member: impl Into<String>) -> Self {
        Self::new(std::any::type_name::<T>(), member)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn member(&self) -> &str {
        &self.member
    }
}

impl fmt::Display for ActionPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.member)
    }
}

/// What an [`ActionSignature`] describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// A named member; can be persisted by reference.
    Pointer(ActionPointer),
    /// An anonymous closure, identified by a label only; cannot be persisted.
    Closure(String),
}

/// A declared action signature: a target plus its ordered parameters.
///
/// # Examples
///
/// ```
/// use routewire_http::urls::signature::{
///     ActionParameter, ActionPointer, ActionSignature, Callback, DeclaredType,
/// };
///
/// let show = ActionSignature::pointer(ActionPointer::new("UserController", "show"))
///     .param(ActionParameter::required("id", DeclaredType::Int));
/// assert!(show.is_serializable());
/// assert_eq!(show.parameters().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSignature {
    target: ActionTarget,
    parameters: Vec<ActionParameter>,
}

impl ActionSignature {
    /// A signature for a pointed-at member.
    pub const fn pointer(pointer: ActionPointer) -> Self {
        Self {
            target: ActionTarget::Pointer(pointer),
            parameters: Vec::new(),
        }
    }

    /// A signature for an anonymous closure.
    pub fn closure(label: impl Into<String>) -> Self {
        Self {
            target: ActionTarget::Closure(label.into()),
            parameters: Vec::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, parameter: ActionParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub const fn target(&self) -> &ActionTarget {
        &self.target
    }
}

impl Callback for ActionSignature {
    fn parameters(&self) -> &[ActionParameter] {
        &self.parameters
    }

    fn is_serializable(&self) -> bool {
        matches!(self.target, ActionTarget::Pointer(_))
    }

    fn describe(&self) -> String {
        match &self.target {
            ActionTarget::Pointer(pointer) => pointer.to_string(),
            ActionTarget::Closure(label) => format!("closure({label})"),
        }
    }
}

impl From<ActionSignature> for CallbackHandle {
    fn from(signature: ActionSignature) -> Self {
        Arc::new(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parameter_constructors() {
        let p = ActionParameter::required("id", DeclaredType::Int);
        assert_eq!(p.name(), "id");
        assert_eq!(p.declared(), Some(DeclaredType::Int));
        assert!(!p.is_optional());
        assert!(!p.is_variadic());

        let p = ActionParameter::optional("page", DeclaredType::Int);
        assert!(p.is_optional());

        let p = ActionParameter::untyped("slug");
        assert_eq!(p.declared(), None);
        assert_eq!(p.declared_name(), "none");
    }

    #[test]
    fn test_variadic_implies_optional() {
        let p = ActionParameter::required("tags", DeclaredType::String).variadic();
        assert!(p.is_variadic());
        assert!(p.is_optional());
    }

    #[test]
    fn test_declared_type_display() {
        assert_eq!(DeclaredType::Bool.to_string(), "bool");
        assert_eq!(DeclaredType::Int.to_string(), "int");
        assert_eq!(DeclaredType::String.to_string(), "string");
        assert_eq!(DeclaredType::Array.to_string(), "array");
    }

    #[test]
    fn test_pointer_is_serializable_closure_is_not() {
        let pointer = ActionSignature::pointer(ActionPointer::new("Posts", "index"));
        let closure = ActionSignature::closure("inline");
        assert!(pointer.is_serializable());
        assert!(!closure.is_serializable());
        assert_eq!(pointer.describe(), "Posts::index");
        assert_eq!(closure.describe(), "closure(inline)");
    }

    #[test]
    fn test_pointer_of_type() {
        struct ArticleController;
        let pointer = ActionPointer::of::<ArticleController>("show");
        assert!(pointer.owner().ends_with("ArticleController"));
        assert_eq!(pointer.member(), "show");
    }

    #[test]
    fn test_signature_into_handle() {
        let handle: CallbackHandle = ActionSignature::closure("x").into();
        assert_eq!(handle.describe(), "closure(x)");
    }

    #[test]
    fn test_arc_delegates() {
        let handle: CallbackHandle = Arc::new(
            ActionSignature::closure("x").param(ActionParameter::untyped("a")),
        );
        let wrapped = Arc::new(handle);
        assert_eq!(wrapped.parameters().len(), 1);
        assert!(!wrapped.is_serializable());
        assert_eq!(wrapped.describe(), "closure(x)");
    }
}
