use std::fmt;

use tyco_ir::TypeRefParseError;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A reportable registry problem.
///
/// Registry errors stay typed inside the library; they become `Diagnostic`s at
/// the edge (CLI, logs) where only the rendered form matters.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Additional notes providing context.
    pub notes: Vec<String>,
    /// Simple text suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Check if this is an error (vs warning).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }

        Ok(())
    }
}

/// Create a diagnostic for malformed type reference text.
pub fn type_ref_syntax(source: &str, err: &TypeRefParseError) -> Diagnostic {
    if let TypeRefParseError::Intern(intern) = err {
        return Diagnostic::error(ErrorCode::E9001)
            .with_message(format!("cannot intern identifiers of `{source}`: {intern}"));
    }

    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message(format!("invalid type reference `{source}`: {err}"));

    match err {
        TypeRefParseError::Empty => {
            diag.with_suggestion("write a type such as `List` or `Pair<String, Integer>`")
        }
        TypeRefParseError::EmptyArguments { .. } => {
            diag.with_suggestion("drop the `<>` or list at least one type argument")
        }
        TypeRefParseError::UnexpectedEnd { .. } => diag.with_suggestion("close every `<` with `>`"),
        TypeRefParseError::UnexpectedChar { .. } | TypeRefParseError::TrailingInput { .. } => {
            diag.with_note("identifiers may contain letters, digits, `_`, `.`, `$` and `:`")
        }
        TypeRefParseError::TooDeep { limit, .. } => {
            diag.with_note(format!("type arguments may nest at most {limit} levels"))
        }
        TypeRefParseError::Intern(_) => diag,
    }
}
