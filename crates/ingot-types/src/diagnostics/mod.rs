//! Diagnostics produced while extracting types.
//!
//! Resolution failures are ordinary outcomes here, not aborts: the pass keeps
//! going and records what it saw. Findings accumulate in [`Diagnostics`] and
//! can be rendered against source text with [`DiagnosticsPrinter`].

mod message;
mod printer;

#[cfg(test)]
mod tests;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use ingot_core::Span;
use message::RelatedInfo;

/// All findings from one extraction pass, in emission order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Starts a diagnostic of `kind` at `span`. The builder must be finished
    /// with [`DiagnosticBuilder::emit`] to land in the collection.
    pub fn report(&mut self, kind: DiagnosticKind, span: Span) -> DiagnosticBuilder<'_> {
        let message = DiagnosticMessage::new(kind, span, kind.message(None));
        DiagnosticBuilder {
            diagnostics: self,
            message,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_warning)
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_warning()).count()
    }

    /// Appends all findings from `other`, preserving their order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// In-flight diagnostic. Dropping it without [`emit`](Self::emit) loses the
/// finding, hence the `must_use`.
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl DiagnosticBuilder<'_> {
    /// Substitutes `detail` into the kind's message template.
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.message.message = self.message.kind().message(Some(detail.as_ref()));
        self
    }

    pub fn related_to(mut self, message: impl Into<String>, span: Span) -> Self {
        self.message.related.push(RelatedInfo::new(span, message));
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
