//! Canonical record kind and flag definitions.
//!
//! Discriminant values are the frozen contract between the compiler's type
//! extraction stage, the emitted module, and the runtime manifest reader.
//! Never renumber.

/// Record kind discriminators.
///
/// The first scalar of every non-stub type record. `Counter` is the
/// dedicated tag of the summary record at slot 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum RecordKind {
    /// Class declaration descriptor.
    Class = 0,
    /// Instance of a class, produced by a `new` binding.
    ClassInstance = 1,
    /// Function, method, constructor, or accessor descriptor.
    Function = 2,
    /// Object literal descriptor (structural stub, serializes empty).
    ObjectLiteral = 3,
    /// Type imported from another compilation unit.
    External = 4,
    /// Summary record counting the unit's classes and redirects.
    Counter = 5,
}

impl RecordKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Class),
            1 => Some(Self::ClassInstance),
            2 => Some(Self::Function),
            3 => Some(Self::ObjectLiteral),
            4 => Some(Self::External),
            5 => Some(Self::Counter),
            _ => None,
        }
    }

    /// Lowercase name for dumps and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::ClassInstance => "class_instance",
            Self::Function => "function",
            Self::ObjectLiteral => "object_literal",
            Self::External => "external",
            Self::Counter => "counter",
        }
    }
}

/// Built-in primitive types.
///
/// Primitives occupy the first `PRIMITIVE_SLOT_COUNT` entries of the index
/// space and are never stored in the type table. The gap between
/// `Undefined` and `PRIMITIVE_SLOT_COUNT` is headroom for future
/// primitives; user-defined indices start past it so new primitives never
/// force a renumbering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum PrimitiveType {
    Any = 0,
    Number = 1,
    Boolean = 2,
    String = 3,
    Symbol = 4,
    Null = 5,
    Undefined = 6,
}

/// Index slots reserved for primitives. User-defined indices start here.
pub const PRIMITIVE_SLOT_COUNT: i32 = 50;

impl PrimitiveType {
    /// Convert from a raw index value, if it names a primitive.
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::Any),
            1 => Some(Self::Number),
            2 => Some(Self::Boolean),
            3 => Some(Self::String),
            4 => Some(Self::Symbol),
            5 => Some(Self::Null),
            6 => Some(Self::Undefined),
            _ => None,
        }
    }

    /// Annotation keyword spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Null => "null",
            Self::Undefined => "undefined",
        }
    }
}

/// Member visibility, serialized into field and function records.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum AccessFlag {
    #[default]
    Public = 0,
    Private = 1,
    Protected = 2,
}

impl AccessFlag {
    /// Convert from raw discriminant.
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::Public),
            1 => Some(Self::Private),
            2 => Some(Self::Protected),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
        }
    }
}
