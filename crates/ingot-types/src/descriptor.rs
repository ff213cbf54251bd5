//! Staged type descriptors and their manifest serialization.
//!
//! Descriptors are the mutable, in-memory form a type takes while the
//! extraction pass fills it in. Once the pass finishes, each descriptor
//! serializes to one manifest record. The scalar orders written here are a
//! frozen wire contract shared with downstream consumers; treat them as
//! append-only.

use indexmap::IndexMap;
use ingot_core::{Interner, Symbol};
use ingot_manifest::{AccessFlag, LiteralBuf, PrimitiveType, RecordKind, TypeIndex};

/// Access and mutability facts recorded for one class field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub type_index: TypeIndex,
    pub access: AccessFlag,
    pub readonly: bool,
}

/// A class shape: heritage plus static and instance member partitions.
///
/// Field maps keep first-insertion order while a later write under the same
/// name replaces the earlier entry, so redeclared members behave like
/// repeated map writes in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassType {
    pub is_abstract: bool,
    pub heritages: Vec<TypeIndex>,
    pub static_fields: IndexMap<Symbol, FieldInfo>,
    pub static_methods: Vec<TypeIndex>,
    pub fields: IndexMap<Symbol, FieldInfo>,
    pub methods: Vec<TypeIndex>,
}

/// An instance of a class, pointing back at the class it instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInstanceType {
    pub class_index: TypeIndex,
}

/// A function or method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub name: Symbol,
    pub access: AccessFlag,
    pub is_static: bool,
    pub params: Vec<TypeIndex>,
    pub return_type: TypeIndex,
}

impl FunctionType {
    /// A public, non-static signature with no parameters. The return type
    /// starts at ANY and stays there unless an annotation resolves.
    pub fn new(name: Symbol) -> Self {
        FunctionType {
            name,
            access: AccessFlag::Public,
            is_static: false,
            params: Vec::new(),
            return_type: TypeIndex::primitive(PrimitiveType::Any),
        }
    }
}

/// Shape of an object literal. Extraction never populates one yet; the
/// variant exists so the record tag stays reserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLiteralType {
    pub properties: IndexMap<Symbol, TypeIndex>,
    pub methods: Vec<TypeIndex>,
}

/// A type defined in another unit, reached through a redirect string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalType {
    /// `#exported_name#module_path`.
    pub redirect: Symbol,
}

/// The per-unit summary stored in slot 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSummary {
    /// User-defined classes in the unit, instances not counted.
    pub class_count: u32,
    /// Redirect strings for anonymous exported types, in registration order.
    pub redirects: Vec<Symbol>,
}

/// One slot of the type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Reserved but not yet filled. Serializes to nothing.
    Placeholder,
    Class(ClassType),
    ClassInstance(ClassInstanceType),
    Function(FunctionType),
    ObjectLiteral(ObjectLiteralType),
    External(ExternalType),
    Summary(TypeSummary),
}

impl TypeDescriptor {
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            TypeDescriptor::Placeholder => None,
            TypeDescriptor::Class(_) => Some(RecordKind::Class),
            TypeDescriptor::ClassInstance(_) => Some(RecordKind::ClassInstance),
            TypeDescriptor::Function(_) => Some(RecordKind::Function),
            TypeDescriptor::ObjectLiteral(_) => Some(RecordKind::ObjectLiteral),
            TypeDescriptor::External(_) => Some(RecordKind::External),
            TypeDescriptor::Summary(_) => Some(RecordKind::Counter),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TypeDescriptor::Placeholder)
    }

    /// Flattens the descriptor into its manifest record.
    pub fn serialize(&self, interner: &Interner) -> LiteralBuf {
        match self {
            TypeDescriptor::Placeholder => LiteralBuf::new(),
            TypeDescriptor::Class(class) => serialize_class(class, interner),
            TypeDescriptor::ClassInstance(instance) => {
                let mut buf = LiteralBuf::new();
                buf.push_integer(RecordKind::ClassInstance as i32);
                buf.push_index(instance.class_index);
                buf
            }
            TypeDescriptor::Function(function) => serialize_function(function, interner),
            // Literal shapes are not extracted; the record stays empty.
            TypeDescriptor::ObjectLiteral(_) => LiteralBuf::new(),
            TypeDescriptor::External(external) => {
                let mut buf = LiteralBuf::new();
                buf.push_integer(RecordKind::External as i32);
                buf.push_string(interner.resolve(external.redirect));
                buf
            }
            TypeDescriptor::Summary(summary) => serialize_summary(summary, interner),
        }
    }
}

fn serialize_class(class: &ClassType, interner: &Interner) -> LiteralBuf {
    let mut buf = LiteralBuf::new();
    buf.push_integer(RecordKind::Class as i32);
    buf.push_flag(class.is_abstract);
    write_indices(&mut buf, &class.heritages);
    write_fields(&mut buf, &class.static_fields, interner);
    write_indices(&mut buf, &class.static_methods);
    write_fields(&mut buf, &class.fields, interner);
    write_indices(&mut buf, &class.methods);
    buf
}

fn serialize_function(function: &FunctionType, interner: &Interner) -> LiteralBuf {
    let mut buf = LiteralBuf::new();
    buf.push_integer(RecordKind::Function as i32);
    buf.push_integer(function.access as i32);
    buf.push_flag(function.is_static);
    buf.push_string(interner.resolve(function.name));
    write_indices(&mut buf, &function.params);
    buf.push_index(function.return_type);
    buf
}

fn serialize_summary(summary: &TypeSummary, interner: &Interner) -> LiteralBuf {
    let mut buf = LiteralBuf::new();
    buf.push_integer(RecordKind::Counter as i32);
    buf.push_integer(summary.class_count as i32);
    buf.push_integer(summary.redirects.len() as i32);
    for redirect in &summary.redirects {
        buf.push_string(interner.resolve(*redirect));
    }
    buf
}

fn write_indices(buf: &mut LiteralBuf, indices: &[TypeIndex]) {
    buf.push_integer(indices.len() as i32);
    for index in indices {
        buf.push_index(*index);
    }
}

fn write_fields(buf: &mut LiteralBuf, fields: &IndexMap<Symbol, FieldInfo>, interner: &Interner) {
    buf.push_integer(fields.len() as i32);
    for (name, info) in fields {
        buf.push_string(interner.resolve(*name));
        buf.push_index(info.type_index);
        buf.push_integer(info.access as i32);
        buf.push_flag(info.readonly);
    }
}
