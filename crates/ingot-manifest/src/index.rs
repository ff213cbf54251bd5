//! The unified type index space.
//!
//! One signed integer identifies every type the pipeline can reference:
//!
//! - `-1` is the unresolved sentinel (a recorded "don't know", not an error)
//! - `[0, 50)` are the fixed primitive slots
//! - `>= 50` are user-defined types, `index - 50` being the table slot
//!
//! Raw table slots never leak into records or bindings; everything stored
//! downstream is a `TypeIndex`.

use std::fmt;

use crate::kind::{PRIMITIVE_SLOT_COUNT, PrimitiveType};

/// Externally visible identity of a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TypeIndex(i32);

impl TypeIndex {
    /// Sentinel for references that could not be resolved.
    pub const UNRESOLVED: TypeIndex = TypeIndex(-1);

    /// Index of a fixed primitive slot.
    #[inline]
    pub fn primitive(p: PrimitiveType) -> Self {
        Self(p as i32)
    }

    /// Shifted index of a user-defined type at the given table slot.
    #[inline]
    pub fn user(slot: u32) -> Self {
        Self(slot as i32 + PRIMITIVE_SLOT_COUNT)
    }

    /// Reconstruct from a raw serialized value. Use only when decoding.
    #[inline]
    pub fn from_raw(v: i32) -> Self {
        Self(v)
    }

    /// Raw value as serialized into records.
    #[inline]
    pub fn as_i32(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn is_unresolved(self) -> bool {
        self.0 < 0
    }

    /// Whether this index names a fixed primitive slot.
    #[inline]
    pub fn is_primitive(self) -> bool {
        (0..PRIMITIVE_SLOT_COUNT).contains(&self.0)
    }

    /// Whether this index names a user-defined table entry.
    #[inline]
    pub fn is_user_defined(self) -> bool {
        self.0 >= PRIMITIVE_SLOT_COUNT
    }

    /// The primitive this index names, if any.
    pub fn as_primitive(self) -> Option<PrimitiveType> {
        if self.is_primitive() {
            PrimitiveType::from_i32(self.0)
        } else {
            None
        }
    }

    /// Inverse of [`TypeIndex::user`]: the table slot behind a shifted index.
    pub fn table_slot(self) -> Option<u32> {
        if self.is_user_defined() {
            Some((self.0 - PRIMITIVE_SLOT_COUNT) as u32)
        } else {
            None
        }
    }
}

impl fmt::Display for TypeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
