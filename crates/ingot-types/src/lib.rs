//! Ingot type extraction: static types for one compilation unit.
//!
//! This crate walks a unit's declarations and produces the type manifest
//! that travels with its compiled output:
//! - `decl` - the declaration model handed over by the front end
//! - `descriptor` - staged type descriptors and their record serialization
//! - `extract` - the type table, the recorder, and the pass driving them
//! - `diagnostics` - findings collected while extracting
//!
//! The pass is deliberately forgiving: names that do not resolve and
//! declaration kinds it cannot model become diagnostics plus the unresolved
//! sentinel, never aborts. Only structurally malformed input is fatal.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod decl;
pub mod diagnostics;

mod descriptor;
mod error;
mod extract;


pub use decl::{NodeId, Program};
pub use descriptor::{
    ClassInstanceType, ClassType, ExternalType, FieldInfo, FunctionType, ObjectLiteralType,
    TypeDescriptor, TypeSummary,
};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use error::{ExtractError, ExtractResult};
pub use extract::{
    TableSlot, TypeExtractor, TypeRecorder, TypeTable, UnitTypes, VariableType, extract_program,
};
