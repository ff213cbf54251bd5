#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared across the Ingot compiler's type pipeline.
//!
//! Currently two pieces:
//! - **Interning** (`Interner`/`Symbol`): cheap handles for the property
//!   names, type names, and redirect paths that flow into type records
//! - **Spans** (`Span`): byte-offset ranges the front end attaches to
//!   declarations, consumed by diagnostics

mod interner;
mod span;

pub use interner::{Interner, Symbol};
pub use span::Span;
