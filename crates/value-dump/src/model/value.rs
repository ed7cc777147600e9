// crates/value-dump/src/model/value.rs
// ============================================================================
// Module: Dynamic Values
// Description: Kind-tagged value handles with shared pointer and map nodes.
// Purpose: Model arbitrary runtime value graphs, including cyclic ones.
// Dependencies: std::{cell, rc}, time
// ============================================================================

//! ## Overview
//! A [`Value`] pairs a [`Type`] with kind-specific data. Scalars, strings,
//! sequences and structs are immutable and cheap to clone; pointers and maps
//! are shared nodes with an allocation identity, which is the only way a
//! graph can refer back to itself. The dumper guards exactly those two kinds,
//! so every graph built from this model renders in finite steps.
//!
//! Reference cycles are never collected; values are meant for short-lived
//! test fixtures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use time::OffsetDateTime;

use crate::model::types::Type;

// ============================================================================
// SECTION: Kind
// ============================================================================

/// Dynamic category of a value.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Boolean.
    Bool,
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    Uint,
    /// Floating point number.
    Float,
    /// Complex number.
    Complex,
    /// UTF-8 string.
    String,
    /// Growable sequence, possibly nil.
    Slice,
    /// Fixed-length sequence.
    Array,
    /// Key/value table, possibly nil.
    Map,
    /// Ordered named fields.
    Struct,
    /// Reference to a slot, possibly nil.
    Pointer,
    /// Dynamic wrapper around one concrete value, possibly nil.
    Interface,
    /// Opaque channel handle.
    Channel,
    /// Opaque function handle.
    Function,
    /// Raw untyped address.
    UnsafePointer,
    /// Absent value.
    Invalid,
}

// ============================================================================
// SECTION: Scalar Widths
// ============================================================================

/// Integer storage width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntWidth {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
    /// Platform word.
    Word,
}

/// Floating point payload with its storage precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Float {
    /// Single precision.
    F32(f32),
    /// Double precision.
    F64(f64),
}

impl Float {
    /// Widens the payload to double precision.
    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Self::F32(value) => f64::from(value),
            Self::F64(value) => value,
        }
    }
}

/// Complex payload with its storage precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Complex {
    /// Two single precision parts.
    C64(f32, f32),
    /// Two double precision parts.
    C128(f64, f64),
}

impl Complex {
    /// Returns the real and imaginary parts as floats of the stored precision.
    pub(crate) const fn parts(self) -> (Float, Float) {
        match self {
            Self::C64(re, im) => (Float::F32(re), Float::F32(im)),
            Self::C128(re, im) => (Float::F64(re), Float::F64(im)),
        }
    }
}

// ============================================================================
// SECTION: Composite Storage
// ============================================================================

/// Element storage for slices and arrays.
#[derive(Debug, Clone)]
pub(crate) enum Items {
    /// Generic element values.
    Values(Vec<Value>),
    /// Packed `uint8` elements.
    Bytes(Vec<u8>),
}

/// Slice or array contents.
#[derive(Debug, Clone)]
pub(crate) struct Sequence {
    /// Element storage.
    pub(crate) items: Items,
    /// Reported capacity; at least the element count.
    pub(crate) cap: usize,
}

impl Sequence {
    /// Returns the element count.
    pub(crate) fn len(&self) -> usize {
        match &self.items {
            Items::Values(values) => values.len(),
            Items::Bytes(bytes) => bytes.len(),
        }
    }

    /// Returns the element at `index`.
    pub(crate) fn get(&self, index: usize) -> Option<Value> {
        match &self.items {
            Items::Values(values) => values.get(index).cloned(),
            Items::Bytes(bytes) => bytes.get(index).map(|byte| Value::uint8(*byte)),
        }
    }
}

/// Named struct field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name as declared.
    name: String,
    /// Field value.
    value: Value,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

/// Struct contents.
#[derive(Debug, Clone)]
pub(crate) struct StructData {
    /// Fields in declaration order.
    pub(crate) fields: Vec<Field>,
    /// Canonical instant for time-like structs.
    pub(crate) instant: Option<OffsetDateTime>,
}

/// Addressable storage cell a pointer refers to.
///
/// # Invariants
/// - The allocation address is stable for the slot's lifetime and is the
///   pointer identity used for cycle detection.
#[derive(Clone)]
pub struct Slot(Rc<RefCell<Value>>);

impl Slot {
    /// Creates a slot holding `value`.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Replaces the slot contents, returning the previous value.
    pub fn set(&self, value: Value) -> Value {
        self.0.replace(value)
    }

    /// Returns a handle to the current contents.
    #[must_use]
    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    /// Returns the identity address of the slot.
    #[must_use]
    pub fn address(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({:#x})", self.address())
    }
}

/// Shared map entry table.
#[derive(Clone)]
pub(crate) struct MapRef(Rc<RefCell<Vec<(Value, Value)>>>);

impl MapRef {
    /// Returns the identity address of the table.
    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }

    /// Returns a snapshot of the entries in insertion order.
    pub(crate) fn entries(&self) -> Vec<(Value, Value)> {
        self.0.borrow().clone()
    }

    /// Returns the entry count.
    pub(crate) fn len(&self) -> usize {
        self.0.borrow().len()
    }
}

impl std::fmt::Debug for MapRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapRef({:#x})", self.address())
    }
}

/// Kind-specific payload of a value.
#[derive(Debug, Clone)]
pub(crate) enum Data {
    /// Absent value.
    Invalid,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64, IntWidth),
    /// Unsigned integer.
    Uint(u64, IntWidth),
    /// Floating point number.
    Float(Float),
    /// Complex number.
    Complex(Complex),
    /// String.
    String(Rc<str>),
    /// Slice; `None` is nil.
    Slice(Option<Rc<Sequence>>),
    /// Array.
    Array(Rc<Sequence>),
    /// Map; `None` is nil.
    Map(Option<MapRef>),
    /// Struct.
    Struct(Rc<StructData>),
    /// Pointer; `None` is nil.
    Pointer(Option<Slot>),
    /// Interface; `None` is nil.
    Interface(Option<Box<Value>>),
    /// Channel handle.
    Channel {
        /// Identity address; zero is nil.
        addr: usize,
        /// Buffered element count.
        len: usize,
        /// Buffer capacity.
        cap: usize,
    },
    /// Function handle; zero is nil.
    Function(usize),
    /// Raw address; zero is nil.
    UnsafePointer(usize),
}

// ============================================================================
// SECTION: Value Handle
// ============================================================================

/// Handle to an arbitrary dynamic value.
///
/// # Invariants
/// - Cloning is O(1); clones of pointers and maps share identity.
#[derive(Clone)]
pub struct Value {
    /// Static type descriptor.
    ty: Type,
    /// Kind-specific payload.
    data: Data,
}

/// Generates constructors for builtin scalar values.
macro_rules! scalar_constructors {
    ($($fn_name:ident($rust:ty) => $ty:ident, $variant:ident, $width:ident;)*) => {
        $(
            #[doc = concat!("Creates a builtin `", stringify!($ty), "` value.")]
            #[must_use]
            pub fn $fn_name(value: $rust) -> Self {
                Self::from_parts(Type::$ty(), Data::$variant(value.into(), IntWidth::$width))
            }
        )*
    };
}

impl Value {
    /// Assembles a value from its parts.
    pub(crate) const fn from_parts(ty: Type, data: Data) -> Self {
        Self {
            ty,
            data,
        }
    }

    /// Returns the absent value.
    #[must_use]
    pub fn invalid() -> Self {
        Self::from_parts(Type::named("<invalid>"), Data::Invalid)
    }

    /// Creates a builtin `bool` value.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::from_parts(Type::bool(), Data::Bool(value))
    }

    scalar_constructors! {
        int(i64) => int, Int, Word;
        int8(i8) => int8, Int, W8;
        int16(i16) => int16, Int, W16;
        int32(i32) => int32, Int, W32;
        int64(i64) => int64, Int, W64;
        uint(u64) => uint, Uint, Word;
        uint8(u8) => uint8, Uint, W8;
        uint16(u16) => uint16, Uint, W16;
        uint32(u32) => uint32, Uint, W32;
        uint64(u64) => uint64, Uint, W64;
    }

    /// Creates a builtin `float32` value.
    #[must_use]
    pub fn float32(value: f32) -> Self {
        Self::from_parts(Type::float32(), Data::Float(Float::F32(value)))
    }

    /// Creates a builtin `float64` value.
    #[must_use]
    pub fn float64(value: f64) -> Self {
        Self::from_parts(Type::float64(), Data::Float(Float::F64(value)))
    }

    /// Creates a builtin `complex64` value.
    #[must_use]
    pub fn complex64(re: f32, im: f32) -> Self {
        Self::from_parts(Type::complex64(), Data::Complex(Complex::C64(re, im)))
    }

    /// Creates a builtin `complex128` value.
    #[must_use]
    pub fn complex128(re: f64, im: f64) -> Self {
        Self::from_parts(Type::complex128(), Data::Complex(Complex::C128(re, im)))
    }

    /// Creates a builtin `string` value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        let text: String = value.into();
        Self::from_parts(Type::string(), Data::String(Rc::from(text)))
    }

    /// Creates a slice of `elem` values.
    #[must_use]
    pub fn slice(elem: &Type, values: Vec<Self>) -> Self {
        let cap = values.len();
        Self::slice_with_cap(elem, values, cap)
    }

    /// Creates a slice of `elem` values with an explicit capacity.
    #[must_use]
    pub fn slice_with_cap(elem: &Type, values: Vec<Self>, cap: usize) -> Self {
        let cap = cap.max(values.len());
        let sequence = Sequence {
            items: Items::Values(values),
            cap,
        };
        Self::from_parts(Type::slice_of(elem), Data::Slice(Some(Rc::new(sequence))))
    }

    /// Creates a nil slice of `elem` values.
    #[must_use]
    pub fn nil_slice(elem: &Type) -> Self {
        Self::from_parts(Type::slice_of(elem), Data::Slice(None))
    }

    /// Creates a `[]uint8` slice backed by packed bytes.
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let cap = bytes.len();
        let sequence = Sequence {
            items: Items::Bytes(bytes),
            cap,
        };
        Self::from_parts(Type::slice_of(&Type::uint8()), Data::Slice(Some(Rc::new(sequence))))
    }

    /// Creates a fixed-length array of `elem` values.
    #[must_use]
    pub fn array(elem: &Type, values: Vec<Self>) -> Self {
        let len = values.len();
        let sequence = Sequence {
            items: Items::Values(values),
            cap: len,
        };
        Self::from_parts(Type::array_of(elem, len), Data::Array(Rc::new(sequence)))
    }

    /// Creates an empty map from `key` to `value` types.
    #[must_use]
    pub fn map(key: &Type, value: &Type) -> Self {
        Self::map_from(key, value, Vec::new())
    }

    /// Creates a map holding `entries` in the given order.
    #[must_use]
    pub fn map_from(key: &Type, value: &Type, entries: Vec<(Self, Self)>) -> Self {
        let table = MapRef(Rc::new(RefCell::new(entries)));
        Self::from_parts(Type::map_of(key, value), Data::Map(Some(table)))
    }

    /// Creates a nil map from `key` to `value` types.
    #[must_use]
    pub fn nil_map(key: &Type, value: &Type) -> Self {
        Self::from_parts(Type::map_of(key, value), Data::Map(None))
    }

    /// Creates a struct of type `ty` with fields in declaration order.
    #[must_use]
    pub fn structure<N: Into<String>>(ty: Type, fields: Vec<(N, Self)>) -> Self {
        let fields = fields.into_iter().map(|(name, value)| Field::new(name, value)).collect();
        let data = StructData {
            fields,
            instant: None,
        };
        Self::from_parts(ty, Data::Struct(Rc::new(data)))
    }

    /// Creates a canonical `time.Time` value.
    #[must_use]
    pub fn time(instant: OffsetDateTime) -> Self {
        Self::time_struct(Type::time(), instant)
    }

    /// Creates a value of a time-like type holding `instant`.
    ///
    /// The type is marked time-like when it is not already.
    #[must_use]
    pub fn time_like(ty: Type, instant: OffsetDateTime) -> Self {
        let ty = if ty.time_kind().is_some() { ty } else { ty.time_like() };
        Self::time_struct(ty, instant)
    }

    /// Builds the struct layout shared by time-like values.
    fn time_struct(ty: Type, instant: OffsetDateTime) -> Self {
        let fields = vec![
            Field::new("sec", Self::int64(instant.unix_timestamp())),
            Field::new("nsec", Self::uint32(instant.nanosecond())),
            Field::new("offset", Self::int32(instant.offset().whole_seconds())),
        ];
        let data = StructData {
            fields,
            instant: Some(instant),
        };
        Self::from_parts(ty, Data::Struct(Rc::new(data)))
    }

    /// Creates a pointer to `slot`, typed after the slot's current contents.
    #[must_use]
    pub fn pointer(slot: &Slot) -> Self {
        let ty = Type::pointer_to(slot.get().ty());
        Self::from_parts(ty, Data::Pointer(Some(slot.clone())))
    }

    /// Creates a pointer of type `ty` to `slot`.
    #[must_use]
    pub fn pointer_typed(ty: Type, slot: &Slot) -> Self {
        Self::from_parts(ty, Data::Pointer(Some(slot.clone())))
    }

    /// Creates a pointer to a fresh slot holding `value`.
    #[must_use]
    pub fn pointer_to(value: Self) -> Self {
        Self::pointer(&Slot::new(value))
    }

    /// Creates a nil pointer to `elem`.
    #[must_use]
    pub fn nil_pointer(elem: &Type) -> Self {
        Self::from_parts(Type::pointer_to(elem), Data::Pointer(None))
    }

    /// Wraps `value` in the empty interface.
    #[must_use]
    pub fn interface(value: Self) -> Self {
        Self::interface_typed(Type::interface(), Some(value))
    }

    /// Returns a nil empty interface.
    #[must_use]
    pub fn nil_interface() -> Self {
        Self::interface_typed(Type::interface(), None)
    }

    /// Creates an interface of type `ty`, nil when `value` is `None`.
    #[must_use]
    pub fn interface_typed(ty: Type, value: Option<Self>) -> Self {
        Self::from_parts(ty, Data::Interface(value.map(Box::new)))
    }

    /// Creates a channel handle; an `addr` of zero is a nil channel.
    #[must_use]
    pub fn channel(elem: &Type, addr: usize, len: usize, cap: usize) -> Self {
        let data = Data::Channel {
            addr,
            len,
            cap: cap.max(len),
        };
        Self::from_parts(Type::chan_of(elem), data)
    }

    /// Creates a function handle; an `addr` of zero is a nil function.
    #[must_use]
    pub fn function(ty: Type, addr: usize) -> Self {
        Self::from_parts(ty, Data::Function(addr))
    }

    /// Creates a raw address; zero is nil.
    #[must_use]
    pub fn unsafe_pointer(addr: usize) -> Self {
        Self::from_parts(Type::unsafe_pointer(), Data::UnsafePointer(addr))
    }

    /// Returns the same value under a different type, keeping its payload.
    #[must_use]
    pub fn with_type(self, ty: Type) -> Self {
        Self {
            ty,
            data: self.data,
        }
    }

    /// Appends an entry to a non-nil map.
    ///
    /// Returns false when the value is not a non-nil map. Keys are not
    /// deduplicated; entries keep insertion order.
    pub fn insert(&self, key: Self, value: Self) -> bool {
        match &self.data {
            Data::Map(Some(table)) => {
                table.0.borrow_mut().push((key, value));
                true
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the dynamic kind.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match &self.data {
            Data::Invalid => Kind::Invalid,
            Data::Bool(_) => Kind::Bool,
            Data::Int(..) => Kind::Int,
            Data::Uint(..) => Kind::Uint,
            Data::Float(_) => Kind::Float,
            Data::Complex(_) => Kind::Complex,
            Data::String(_) => Kind::String,
            Data::Slice(_) => Kind::Slice,
            Data::Array(_) => Kind::Array,
            Data::Map(_) => Kind::Map,
            Data::Struct(_) => Kind::Struct,
            Data::Pointer(_) => Kind::Pointer,
            Data::Interface(_) => Kind::Interface,
            Data::Channel {
                ..
            } => Kind::Channel,
            Data::Function(_) => Kind::Function,
            Data::UnsafePointer(_) => Kind::UnsafePointer,
        }
    }

    /// Returns the type descriptor.
    #[must_use]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the display type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Returns the kind-specific payload.
    pub(crate) const fn data(&self) -> &Data {
        &self.data
    }

    /// Returns true for nil slices, maps, pointers, interfaces and handles.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        match &self.data {
            Data::Slice(items) => items.is_none(),
            Data::Map(table) => table.is_none(),
            Data::Pointer(slot) => slot.is_none(),
            Data::Interface(inner) => inner.is_none(),
            Data::Channel {
                addr,
                ..
            }
            | Data::Function(addr)
            | Data::UnsafePointer(addr) => *addr == 0,
            _ => false,
        }
    }

    /// Returns the length for strings, sequences, maps and channels; else 0.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            Data::String(text) => text.len(),
            Data::Slice(Some(sequence)) | Data::Array(sequence) => sequence.len(),
            Data::Map(Some(table)) => table.len(),
            Data::Channel {
                len,
                ..
            } => *len,
            _ => 0,
        }
    }

    /// Returns true when [`Value::len`] is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the capacity for sequences and channels; else 0.
    #[must_use]
    pub fn cap(&self) -> usize {
        match &self.data {
            Data::Slice(Some(sequence)) | Data::Array(sequence) => sequence.cap,
            Data::Channel {
                cap,
                ..
            } => *cap,
            _ => 0,
        }
    }

    /// Returns the sequence element at `index`.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<Self> {
        match &self.data {
            Data::Slice(Some(sequence)) | Data::Array(sequence) => sequence.get(index),
            _ => None,
        }
    }

    /// Returns a snapshot of map entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Self, Self)> {
        match &self.data {
            Data::Map(Some(table)) => table.entries(),
            _ => Vec::new(),
        }
    }

    /// Returns struct fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match &self.data {
            Data::Struct(data) => &data.fields,
            _ => &[],
        }
    }

    /// Returns the struct field named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        self.fields().iter().find(|field| field.name() == name).map(Field::value)
    }

    /// Returns the slot a non-nil pointer refers to.
    #[must_use]
    pub const fn slot(&self) -> Option<&Slot> {
        match &self.data {
            Data::Pointer(slot) => slot.as_ref(),
            _ => None,
        }
    }

    /// Returns the current pointee of a non-nil pointer.
    #[must_use]
    pub fn pointee(&self) -> Option<Self> {
        self.slot().map(Slot::get)
    }

    /// Returns the concrete value wrapped by a non-nil interface.
    #[must_use]
    pub fn elem(&self) -> Option<&Self> {
        match &self.data {
            Data::Interface(inner) => inner.as_deref(),
            _ => None,
        }
    }

    /// Returns the identity address of reference-like values; else 0.
    #[must_use]
    pub fn address(&self) -> usize {
        match &self.data {
            Data::Pointer(Some(slot)) => slot.address(),
            Data::Map(Some(table)) => table.address(),
            Data::Channel {
                addr,
                ..
            }
            | Data::Function(addr)
            | Data::UnsafePointer(addr) => *addr,
            _ => 0,
        }
    }

    /// Returns the canonical instant of a time-like struct.
    #[must_use]
    pub fn instant(&self) -> Option<OffsetDateTime> {
        match &self.data {
            Data::Struct(data) => data.instant,
            _ => None,
        }
    }

    /// Returns the boolean payload.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match &self.data {
            Data::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the signed integer payload.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match &self.data {
            Data::Int(value, _) => Some(*value),
            _ => None,
        }
    }

    /// Returns the unsigned integer payload.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match &self.data {
            Data::Uint(value, _) => Some(*value),
            _ => None,
        }
    }

    /// Returns the floating point payload widened to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match &self.data {
            Data::Float(value) => Some(value.as_f64()),
            _ => None,
        }
    }

    /// Returns the string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            Data::String(text) => Some(&**text),
            _ => None,
        }
    }
}
