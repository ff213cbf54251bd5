//! Tagged scalar literals and the per-record literal buffer.
//!
//! A serialized type is an ordered sequence of scalars. Only two shapes
//! exist: signed integers (tags, counts, indices, flags) and strings
//! (names, redirect paths). Field order within a record is the frozen
//! contract; the byte framing below is this crate's own and carries no
//! record boundaries of its own.

use crate::index::TypeIndex;

/// One scalar in a type record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(i32),
    String(String),
}

impl Literal {
    pub fn tag(&self) -> LiteralTag {
        match self {
            Literal::Integer(_) => LiteralTag::Integer,
            Literal::String(_) => LiteralTag::String,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Literal::Integer(v) => Some(*v),
            Literal::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Integer(_) => None,
            Literal::String(s) => Some(s.as_str()),
        }
    }
}

/// Scalar shape discriminator in the byte framing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum LiteralTag {
    Integer = 2,
    String = 5,
}

impl LiteralTag {
    /// Convert from raw tag byte.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            2 => Some(Self::Integer),
            5 => Some(Self::String),
            _ => None,
        }
    }
}

/// Ordered scalar buffer holding one serialized type record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralBuf {
    literals: Vec<Literal>,
}

impl LiteralBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_integer(&mut self, v: i32) {
        self.literals.push(Literal::Integer(v));
    }

    pub fn push_string(&mut self, s: impl Into<String>) {
        self.literals.push(Literal::String(s.into()));
    }

    /// Push a type index as its raw integer value.
    pub fn push_index(&mut self, index: TypeIndex) {
        self.push_integer(index.as_i32());
    }

    /// Push a boolean flag as `1`/`0`.
    pub fn push_flag(&mut self, flag: bool) {
        self.push_integer(flag as i32);
    }

    /// Scalar count of this record.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Literal> {
        self.literals.get(index)
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Append the byte framing of every scalar to `out`.
    ///
    /// Integers are a tag byte plus 4 bytes little-endian. Strings are a
    /// tag byte, a `u32` little-endian byte length, and the UTF-8 bytes.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        for literal in &self.literals {
            match literal {
                Literal::Integer(v) => {
                    out.push(LiteralTag::Integer as u8);
                    out.extend_from_slice(&v.to_le_bytes());
                }
                Literal::String(s) => {
                    out.push(LiteralTag::String as u8);
                    out.extend_from_slice(&(s.len() as u32).to_le_bytes());
                    out.extend_from_slice(s.as_bytes());
                }
            }
        }
    }

    /// Encode to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out);
        out
    }
}

impl FromIterator<Literal> for LiteralBuf {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self {
            literals: iter.into_iter().collect(),
        }
    }
}
