// crates/value-dump/src/model/types.rs
// ============================================================================
// Module: Type Descriptors
// Description: Display names, pointee links, time classification, method sets.
// Purpose: Describe the static shape of a dynamic value for annotation and probing.
// Dependencies: std::rc
// ============================================================================

//! ## Overview
//! A [`Type`] is the static half of a dynamic value: the name printed in type
//! annotations, the pointee type for pointer types, whether the type is
//! time-like, and the zero-argument text/error rendering capabilities the
//! method invoker probes for. Types are reference counted and cheap to clone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::rc::Rc;

use crate::model::value::Value;

// ============================================================================
// SECTION: Method Sets
// ============================================================================

/// Rendering hook invoked with the value being rendered.
pub type RenderFn = Rc<dyn Fn(&Value) -> String>;

/// Receiver form a rendering capability is declared on.
///
/// # Invariants
/// - `Pointer` capabilities are only callable on addressable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// Callable on the value itself and on any pointer to it.
    Value,
    /// Callable only through a pointer to the value.
    Pointer,
}

/// A zero-argument rendering capability bound to a receiver form.
#[derive(Clone)]
pub struct Method {
    /// Receiver form the capability was declared on.
    receiver: Receiver,
    /// Foreign rendering code.
    render: RenderFn,
}

impl Method {
    /// Creates a capability from a receiver form and rendering hook.
    #[must_use]
    pub fn new(receiver: Receiver, render: RenderFn) -> Self {
        Self {
            receiver,
            render,
        }
    }

    /// Returns the receiver form the capability was declared on.
    #[must_use]
    pub const fn receiver(&self) -> Receiver {
        self.receiver
    }

    /// Runs the rendering hook. Callers are responsible for panic containment.
    pub(crate) fn call(&self, value: &Value) -> String {
        (self.render)(value)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method").field("receiver", &self.receiver).finish_non_exhaustive()
    }
}

/// Rendering capabilities exposed by a type.
#[derive(Debug, Clone, Default)]
pub struct MethodSet {
    /// Renders the value as text.
    text: Option<Method>,
    /// Renders the value as an error message.
    error: Option<Method>,
}

impl MethodSet {
    /// Returns the text rendering capability, if any.
    #[must_use]
    pub const fn text(&self) -> Option<&Method> {
        self.text.as_ref()
    }

    /// Returns the error rendering capability, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Method> {
        self.error.as_ref()
    }

    /// Returns true when neither capability is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.error.is_none()
    }
}

// ============================================================================
// SECTION: Time Classification
// ============================================================================

/// How a struct type relates to the canonical time type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeKind {
    /// The canonical `time.Time` type.
    Genuine,
    /// A distinct type with the same layout as `time.Time`.
    Convertible,
}

// ============================================================================
// SECTION: Type Descriptor
// ============================================================================

/// Shared type descriptor attached to every [`Value`].
///
/// # Invariants
/// - `elem` is set for pointer types and names the pointee type.
/// - The display name is never empty for builtin constructors.
#[derive(Clone)]
pub struct Type(Rc<TypeInner>);

/// Backing storage for [`Type`].
#[derive(Clone)]
struct TypeInner {
    /// Display name used in type annotations.
    name: String,
    /// Pointee type for pointer types.
    elem: Option<Type>,
    /// Time classification for time-like struct types.
    time: Option<TimeKind>,
    /// Rendering capabilities.
    methods: MethodSet,
}

/// Generates constructors for builtin scalar type names.
macro_rules! builtin_types {
    ($($fn_name:ident => $name:literal),* $(,)?) => {
        $(
            #[doc = concat!("Returns the builtin `", $name, "` type.")]
            #[must_use]
            pub fn $fn_name() -> Self {
                Self::named($name)
            }
        )*
    };
}

impl Type {
    /// Creates a plain named type with no capabilities.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(Rc::new(TypeInner {
            name: name.into(),
            elem: None,
            time: None,
            methods: MethodSet::default(),
        }))
    }

    builtin_types! {
        bool => "bool",
        int => "int",
        int8 => "int8",
        int16 => "int16",
        int32 => "int32",
        int64 => "int64",
        uint => "uint",
        uint8 => "uint8",
        uint16 => "uint16",
        uint32 => "uint32",
        uint64 => "uint64",
        float32 => "float32",
        float64 => "float64",
        complex64 => "complex64",
        complex128 => "complex128",
        string => "string",
        unsafe_pointer => "unsafe.Pointer",
    }

    /// Returns the empty interface type.
    #[must_use]
    pub fn interface() -> Self {
        Self::named("interface {}")
    }

    /// Returns the builtin error interface type.
    #[must_use]
    pub fn error_interface() -> Self {
        Self::named("error")
    }

    /// Returns the canonical time type with its own text rendering.
    #[must_use]
    pub fn time() -> Self {
        Self::named("time.Time")
            .with_time_kind(TimeKind::Genuine)
            .with_text(Receiver::Value, |value| {
                value.instant().map_or_else(String::new, crate::runtime::time::time_text)
            })
    }

    /// Returns the pointer type whose pointee is `elem`.
    #[must_use]
    pub fn pointer_to(elem: &Self) -> Self {
        Self(Rc::new(TypeInner {
            name: format!("*{}", elem.name()),
            elem: Some(elem.clone()),
            time: None,
            methods: MethodSet::default(),
        }))
    }

    /// Returns the slice type with element type `elem`.
    #[must_use]
    pub fn slice_of(elem: &Self) -> Self {
        Self::named(format!("[]{}", elem.name()))
    }

    /// Returns the array type with `len` elements of type `elem`.
    #[must_use]
    pub fn array_of(elem: &Self, len: usize) -> Self {
        Self::named(format!("[{len}]{}", elem.name()))
    }

    /// Returns the map type from `key` to `value`.
    #[must_use]
    pub fn map_of(key: &Self, value: &Self) -> Self {
        Self::named(format!("map[{}]{}", key.name(), value.name()))
    }

    /// Returns the channel type carrying `elem`.
    #[must_use]
    pub fn chan_of(elem: &Self) -> Self {
        Self::named(format!("chan {}", elem.name()))
    }

    /// Marks the type as structurally convertible to the canonical time type.
    #[must_use]
    pub fn time_like(self) -> Self {
        self.with_time_kind(TimeKind::Convertible)
    }

    /// Attaches a text rendering capability.
    #[must_use]
    pub fn with_text(
        self,
        receiver: Receiver,
        render: impl Fn(&Value) -> String + 'static,
    ) -> Self {
        self.update(|inner| inner.methods.text = Some(Method::new(receiver, Rc::new(render))))
    }

    /// Attaches an error rendering capability.
    #[must_use]
    pub fn with_error(
        self,
        receiver: Receiver,
        render: impl Fn(&Value) -> String + 'static,
    ) -> Self {
        self.update(|inner| inner.methods.error = Some(Method::new(receiver, Rc::new(render))))
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the pointee type for pointer types.
    #[must_use]
    pub fn elem(&self) -> Option<&Self> {
        self.0.elem.as_ref()
    }

    /// Returns the time classification of the type.
    #[must_use]
    pub fn time_kind(&self) -> Option<TimeKind> {
        self.0.time
    }

    /// Returns the rendering capabilities of the type.
    #[must_use]
    pub fn methods(&self) -> &MethodSet {
        &self.0.methods
    }

    /// Sets the time classification.
    fn with_time_kind(self, kind: TimeKind) -> Self {
        self.update(|inner| inner.time = Some(kind))
    }

    /// Applies an in-place edit, cloning the descriptor when shared.
    fn update(self, edit: impl FnOnce(&mut TypeInner)) -> Self {
        let mut inner = Rc::unwrap_or_clone(self.0);
        edit(&mut inner);
        Self(Rc::new(inner))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Type").field(&self.name()).finish()
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.name() == other.name()
    }
}

impl Eq for Type {}
