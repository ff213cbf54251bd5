#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Type manifest format for Ingot bytecode modules.
//!
//! This crate defines the wire contract between the compiler's type
//! extraction stage and the runtime manifest reader:
//! - The unified index space (`TypeIndex`, `PrimitiveType`): primitives in
//!   `[0, 50)`, user-defined types shifted past them, `-1` unresolved
//! - Tagged scalar records (`Literal`, `LiteralBuf`, `RecordKind`) with a
//!   frozen per-variant field order
//! - The sequential `RecordReader` decoding records back into typed views
//! - The `TypeManifest` container and a debugging `dump_manifest`
//!
//! Discriminant values and field orders here are load-bearing for every
//! stage downstream. Treat them as append-only.

mod dump;
mod index;
mod kind;
mod literal;
mod manifest;
mod reader;


pub use dump::dump_manifest;
pub use index::TypeIndex;
pub use kind::{AccessFlag, PRIMITIVE_SLOT_COUNT, PrimitiveType, RecordKind};
pub use literal::{Literal, LiteralBuf, LiteralTag};
pub use manifest::TypeManifest;
pub use reader::{
    ClassInstanceRecord, ClassRecord, ExternalRecord, FieldRecord, FunctionRecord, ReadError,
    RecordReader, SummaryRecord, TypeRecord, decode_literals, decode_manifest, decode_record,
};
