use ingot_core::Span;

/// Failures that abort extraction for the whole unit.
///
/// Almost nothing here is fatal; resolution misses and unsupported
/// declarations are reported as [`Diagnostics`](crate::Diagnostics) and the
/// pass keeps going. Only structurally malformed input lands in this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A class member whose name extraction cannot represent, such as a
    /// private `#name`.
    #[error("invalid property name in class member at {span}")]
    InvalidPropertyName { span: Span },
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
