//! Sequential decoding of serialized type records.
//!
//! A record stream has no byte-level length prefixes: every count scalar is
//! followed by exactly that many sub-records, so the reader derives each
//! record's extent from its leading tag alone. Consumption is strictly
//! sequential; a shape mismatch is a hard error, never a resync.

use crate::index::TypeIndex;
use crate::kind::{AccessFlag, RecordKind};
use crate::literal::{Literal, LiteralBuf, LiteralTag};

/// Errors produced while decoding literal bytes or record shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("record ended early: wanted scalar {offset}, record has {len}")]
    UnexpectedEnd { offset: usize, len: usize },
    #[error("expected integer scalar at offset {0}")]
    ExpectedInteger(usize),
    #[error("expected string scalar at offset {0}")]
    ExpectedString(usize),
    #[error("unknown record tag {tag}")]
    UnknownRecordKind { tag: i32 },
    #[error("negative count {count} at offset {offset}")]
    NegativeCount { count: i32, offset: usize },
    #[error("invalid access flag {value} at offset {offset}")]
    InvalidAccessFlag { value: i32, offset: usize },
    #[error("trailing scalars after record end: consumed {consumed} of {len}")]
    TrailingScalars { consumed: usize, len: usize },
    #[error("unknown literal tag byte {0:#04x}")]
    UnknownLiteralTag(u8),
    #[error("literal payload extends past end of buffer")]
    TruncatedLiteral,
    #[error("string literal is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Decoded view of one type record. Borrows strings from the literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRecord<'a> {
    Class(ClassRecord<'a>),
    ClassInstance(ClassInstanceRecord),
    Function(FunctionRecord<'a>),
    /// The structural stub. Serializes as an empty record.
    ObjectLiteral,
    External(ExternalRecord<'a>),
    Summary(SummaryRecord<'a>),
}

impl TypeRecord<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            TypeRecord::Class(_) => RecordKind::Class,
            TypeRecord::ClassInstance(_) => RecordKind::ClassInstance,
            TypeRecord::Function(_) => RecordKind::Function,
            TypeRecord::ObjectLiteral => RecordKind::ObjectLiteral,
            TypeRecord::External(_) => RecordKind::External,
            TypeRecord::Summary(_) => RecordKind::Counter,
        }
    }
}

/// One `(name, type, access, readonly)` field tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord<'a> {
    pub name: &'a str,
    pub type_index: TypeIndex,
    pub access: AccessFlag,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord<'a> {
    pub is_abstract: bool,
    pub heritages: Vec<TypeIndex>,
    pub static_fields: Vec<FieldRecord<'a>>,
    pub static_methods: Vec<TypeIndex>,
    pub fields: Vec<FieldRecord<'a>>,
    pub methods: Vec<TypeIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInstanceRecord {
    /// Shifted index of the instantiated class.
    pub class_index: TypeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord<'a> {
    pub access: AccessFlag,
    pub is_static: bool,
    pub name: &'a str,
    pub params: Vec<TypeIndex>,
    pub return_type: TypeIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalRecord<'a> {
    /// `#<importedName>#<modulePath>` provenance string.
    pub redirect: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord<'a> {
    pub class_count: usize,
    pub redirects: Vec<&'a str>,
}

/// Cursor over a record's scalars.
pub struct RecordReader<'a> {
    literals: &'a [Literal],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(literals: &'a [Literal]) -> Self {
        Self { literals, pos: 0 }
    }

    /// Scalars consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.literals.len()
    }

    fn next(&mut self) -> Result<&'a Literal, ReadError> {
        let literal = self.literals.get(self.pos).ok_or(ReadError::UnexpectedEnd {
            offset: self.pos,
            len: self.literals.len(),
        })?;
        self.pos += 1;
        Ok(literal)
    }

    fn next_integer(&mut self) -> Result<i32, ReadError> {
        let offset = self.pos;
        self.next()?
            .as_integer()
            .ok_or(ReadError::ExpectedInteger(offset))
    }

    fn next_string(&mut self) -> Result<&'a str, ReadError> {
        let offset = self.pos;
        self.next()?
            .as_str()
            .ok_or(ReadError::ExpectedString(offset))
    }

    fn next_index(&mut self) -> Result<TypeIndex, ReadError> {
        Ok(TypeIndex::from_raw(self.next_integer()?))
    }

    fn next_count(&mut self) -> Result<usize, ReadError> {
        let offset = self.pos;
        let count = self.next_integer()?;
        if count < 0 {
            return Err(ReadError::NegativeCount { count, offset });
        }
        Ok(count as usize)
    }

    fn next_flag(&mut self) -> Result<bool, ReadError> {
        Ok(self.next_integer()? != 0)
    }

    fn next_access(&mut self) -> Result<AccessFlag, ReadError> {
        let offset = self.pos;
        let value = self.next_integer()?;
        AccessFlag::from_i32(value).ok_or(ReadError::InvalidAccessFlag { value, offset })
    }

    /// Decode one record starting at the cursor.
    pub fn read_record(&mut self) -> Result<TypeRecord<'a>, ReadError> {
        let tag = self.next_integer()?;
        let kind = match u8::try_from(tag).ok().and_then(RecordKind::from_u8) {
            Some(kind) => kind,
            None => return Err(ReadError::UnknownRecordKind { tag }),
        };

        match kind {
            RecordKind::Class => Ok(TypeRecord::Class(self.read_class()?)),
            RecordKind::ClassInstance => Ok(TypeRecord::ClassInstance(ClassInstanceRecord {
                class_index: self.next_index()?,
            })),
            RecordKind::Function => Ok(TypeRecord::Function(self.read_function()?)),
            RecordKind::ObjectLiteral => Ok(TypeRecord::ObjectLiteral),
            RecordKind::External => Ok(TypeRecord::External(ExternalRecord {
                redirect: self.next_string()?,
            })),
            RecordKind::Counter => Ok(TypeRecord::Summary(self.read_summary()?)),
        }
    }

    fn read_class(&mut self) -> Result<ClassRecord<'a>, ReadError> {
        let is_abstract = self.next_flag()?;

        let heritage_count = self.next_count()?;
        let heritages = self.read_index_list(heritage_count)?;

        let static_field_count = self.next_count()?;
        let static_fields = self.read_field_tuples(static_field_count)?;

        let static_method_count = self.next_count()?;
        let static_methods = self.read_index_list(static_method_count)?;

        let field_count = self.next_count()?;
        let fields = self.read_field_tuples(field_count)?;

        let method_count = self.next_count()?;
        let methods = self.read_index_list(method_count)?;

        Ok(ClassRecord {
            is_abstract,
            heritages,
            static_fields,
            static_methods,
            fields,
            methods,
        })
    }

    fn read_function(&mut self) -> Result<FunctionRecord<'a>, ReadError> {
        let access = self.next_access()?;
        let is_static = self.next_flag()?;
        let name = self.next_string()?;

        let param_count = self.next_count()?;
        let params = self.read_index_list(param_count)?;

        let return_type = self.next_index()?;

        Ok(FunctionRecord {
            access,
            is_static,
            name,
            params,
            return_type,
        })
    }

    fn read_summary(&mut self) -> Result<SummaryRecord<'a>, ReadError> {
        let class_count = self.next_count()?;
        let redirect_count = self.next_count()?;
        let mut redirects = Vec::with_capacity(redirect_count);
        for _ in 0..redirect_count {
            redirects.push(self.next_string()?);
        }
        Ok(SummaryRecord {
            class_count,
            redirects,
        })
    }

    fn read_index_list(&mut self, count: usize) -> Result<Vec<TypeIndex>, ReadError> {
        let mut indices = Vec::with_capacity(count);
        for _ in 0..count {
            indices.push(self.next_index()?);
        }
        Ok(indices)
    }

    fn read_field_tuples(&mut self, count: usize) -> Result<Vec<FieldRecord<'a>>, ReadError> {
        let mut fields = Vec::with_capacity(count);
        for _ in 0..count {
            let name = self.next_string()?;
            let type_index = self.next_index()?;
            let access = self.next_access()?;
            let readonly = self.next_flag()?;
            fields.push(FieldRecord {
                name,
                type_index,
                access,
                readonly,
            });
        }
        Ok(fields)
    }
}

/// Decode a flat scalar stream into records, deriving each record's extent
/// from its leading tag.
///
/// Only tagged records can appear here; the empty form of the
/// object-literal stub has no scalars to find.
pub fn decode_manifest(literals: &[Literal]) -> Result<Vec<TypeRecord<'_>>, ReadError> {
    let mut reader = RecordReader::new(literals);
    let mut records = Vec::new();
    while !reader.is_at_end() {
        records.push(reader.read_record()?);
    }
    Ok(records)
}

/// Decode a whole record buffer, rejecting trailing scalars.
///
/// An empty buffer is the object-literal stub.
pub fn decode_record(record: &LiteralBuf) -> Result<TypeRecord<'_>, ReadError> {
    if record.is_empty() {
        return Ok(TypeRecord::ObjectLiteral);
    }
    let mut reader = RecordReader::new(record.literals());
    let decoded = reader.read_record()?;
    if !reader.is_at_end() {
        return Err(ReadError::TrailingScalars {
            consumed: reader.position(),
            len: record.len(),
        });
    }
    Ok(decoded)
}

/// Decode the byte framing back into scalars.
pub fn decode_literals(bytes: &[u8]) -> Result<Vec<Literal>, ReadError> {
    let mut literals = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        literals.push(read_literal(bytes, &mut pos)?);
    }
    Ok(literals)
}

/// Decode one framed literal at `*pos`, advancing it.
pub(crate) fn read_literal(bytes: &[u8], pos: &mut usize) -> Result<Literal, ReadError> {
    let tag_byte = *bytes.get(*pos).ok_or(ReadError::TruncatedLiteral)?;
    let tag = LiteralTag::from_u8(tag_byte).ok_or(ReadError::UnknownLiteralTag(tag_byte))?;
    *pos += 1;

    match tag {
        LiteralTag::Integer => {
            let end = pos.checked_add(4).filter(|&e| e <= bytes.len());
            let end = end.ok_or(ReadError::TruncatedLiteral)?;
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&bytes[*pos..end]);
            *pos = end;
            Ok(Literal::Integer(i32::from_le_bytes(raw)))
        }
        LiteralTag::String => {
            let len_end = pos.checked_add(4).filter(|&e| e <= bytes.len());
            let len_end = len_end.ok_or(ReadError::TruncatedLiteral)?;
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&bytes[*pos..len_end]);
            let len = u32::from_le_bytes(raw) as usize;

            let end = len_end.checked_add(len).filter(|&e| e <= bytes.len());
            let end = end.ok_or(ReadError::TruncatedLiteral)?;
            let s = std::str::from_utf8(&bytes[len_end..end])?;
            *pos = end;
            Ok(Literal::String(s.to_owned()))
        }
    }
}
