//! Type extraction: table, recorder, and the pass that drives them.

mod extractor;
mod recorder;
mod table;

#[cfg(test)]
mod recorder_tests;
#[cfg(test)]
mod table_tests;

pub use extractor::{TypeExtractor, UnitTypes, extract_program};
pub use recorder::{TypeRecorder, VariableType};
pub use table::{TableSlot, TypeTable};
