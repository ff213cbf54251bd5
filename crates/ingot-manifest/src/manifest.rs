//! The per-unit type manifest.
//!
//! The extraction stage produces one manifest per compilation unit: the
//! serialized records of every table slot, in slot order, with the summary
//! record always at slot 0. The module-emission stage embeds the manifest
//! whole; nothing here knows about files.

use crate::literal::{Literal, LiteralBuf};
use crate::reader::{ReadError, TypeRecord, decode_record, read_literal};

/// Serialized type table of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeManifest {
    records: Vec<LiteralBuf>,
}

impl TypeManifest {
    pub fn new(records: Vec<LiteralBuf>) -> Self {
        Self { records }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LiteralBuf] {
        &self.records
    }

    pub fn get(&self, slot: usize) -> Option<&LiteralBuf> {
        self.records.get(slot)
    }

    /// The summary record. Slot 0 in every well-formed manifest.
    pub fn summary(&self) -> Option<&LiteralBuf> {
        self.records.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiteralBuf> {
        self.records.iter()
    }

    /// Decode every record into its typed view, in slot order.
    pub fn decode(&self) -> Result<Vec<TypeRecord<'_>>, ReadError> {
        self.records.iter().map(decode_record).collect()
    }

    /// Encode for embedding: record count, then each record as a scalar
    /// count followed by its literal bytes. Counts are `u32` little-endian.
    ///
    /// Record boundaries live only in this envelope; the scalars inside a
    /// record stay free of byte-level length prefixes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        for record in &self.records {
            out.extend_from_slice(&(record.len() as u32).to_le_bytes());
            record.write_bytes(&mut out);
        }
        out
    }

    /// Decode an embedded manifest produced by [`TypeManifest::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReadError> {
        let mut offset = 0;
        let record_count = read_u32_le(bytes, &mut offset)? as usize;

        let mut records = Vec::with_capacity(record_count);
        for _ in 0..record_count {
            let scalar_count = read_u32_le(bytes, &mut offset)? as usize;
            let (literals, consumed) = take_literals(&bytes[offset..], scalar_count)?;
            offset += consumed;
            records.push(literals.into_iter().collect());
        }
        if offset != bytes.len() {
            return Err(ReadError::TruncatedLiteral);
        }

        Ok(Self { records })
    }
}

fn read_u32_le(bytes: &[u8], pos: &mut usize) -> Result<u32, ReadError> {
    let end = pos.checked_add(4).filter(|&e| e <= bytes.len());
    let end = end.ok_or(ReadError::TruncatedLiteral)?;
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[*pos..end]);
    *pos = end;
    Ok(u32::from_le_bytes(raw))
}

/// Decode exactly `count` literals from the front of `bytes`, returning
/// them with the number of bytes consumed.
fn take_literals(bytes: &[u8], count: usize) -> Result<(Vec<Literal>, usize), ReadError> {
    let mut literals = Vec::with_capacity(count);
    let mut pos = 0;
    for _ in 0..count {
        literals.push(read_literal(bytes, &mut pos)?);
    }
    Ok((literals, pos))
}
