use ingot_core::Span;

/// What went wrong, independent of where.
///
/// Each kind carries a default severity, a fallback message, and an optional
/// hint so call sites only supply the detail that varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A type name resolved to a declaration kind extraction cannot model.
    UnsupportedDeclaration,
    /// A type name with no matching declaration in the unit.
    UnresolvedTypeName,
    /// A declaration that needs an annotation to get a useful type.
    MissingTypeAnnotation,
    /// An object-literal initializer, which extraction does not type yet.
    ObjectLiteralNotSupported,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnsupportedDeclaration => Severity::Error,
            DiagnosticKind::UnresolvedTypeName
            | DiagnosticKind::MissingTypeAnnotation
            | DiagnosticKind::ObjectLiteralNotSupported => Severity::Warning,
        }
    }

    /// Message used when the call site provides no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedDeclaration => {
                "declaration kind is not supported by type extraction"
            }
            DiagnosticKind::UnresolvedTypeName => "cannot resolve type name",
            DiagnosticKind::MissingTypeAnnotation => "missing type annotation",
            DiagnosticKind::ObjectLiteralNotSupported => {
                "object literal types are not extracted yet"
            }
        }
    }

    /// Template applied to call-site detail, `{}` marking the slot.
    pub fn custom_message(&self) -> String {
        match self {
            DiagnosticKind::UnsupportedDeclaration => {
                "cannot extract a type from {} declarations".to_string()
            }
            DiagnosticKind::UnresolvedTypeName => "cannot resolve type name `{}`".to_string(),
            DiagnosticKind::MissingTypeAnnotation => {
                "missing type annotation for `{}`".to_string()
            }
            DiagnosticKind::ObjectLiteralNotSupported => {
                "cannot type the object literal initializing `{}`".to_string()
            }
        }
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            DiagnosticKind::MissingTypeAnnotation => {
                Some("annotate the declaration or initialize it with a `new` expression")
            }
            DiagnosticKind::ObjectLiteralNotSupported => {
                Some("declare a class and construct it with `new` to keep the type")
            }
            DiagnosticKind::UnsupportedDeclaration | DiagnosticKind::UnresolvedTypeName => None,
        }
    }

    /// Formats the final message, substituting `detail` into the kind's
    /// template when present.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            Some(detail) => self.custom_message().replace("{}", detail),
            None => self.fallback_message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A secondary location that gives the primary message context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        RelatedInfo {
            span,
            message: message.into(),
        }
    }
}

/// A single finding: kind, severity, location, rendered message, and any
/// related spans or hints attached while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span, message: String) -> Self {
        let hints = kind.default_hint().map(String::from).into_iter().collect();
        DiagnosticMessage {
            kind,
            severity: kind.default_severity(),
            span,
            message,
            related: Vec::new(),
            hints,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.span, self.message)?;
        for related in &self.related {
            write!(f, " (related at {}: {})", related.span, related.message)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
