use std::fmt;

/// Error codes for all registry diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Syntax errors (type references, manifests)
/// - E1xxx: Registry construction errors (fatal, no registry is produced)
/// - E2xxx: Codec resolution errors (returned per lookup)
/// - E9xxx: Internal errors
/// - W1xxx: Construction warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Syntax Errors (E0xxx)
    /// Malformed type reference text
    E0001,
    /// Malformed descriptor manifest
    E0002,

    // Construction Errors (E1xxx)
    /// Declared parent has no descriptor
    E1001,
    /// Declared parent is a parameterized type
    E1002,
    /// Raw type registered more than once (strict duplicate policy)
    E1003,
    /// Parameter slot name repeated within one descriptor
    E1004,

    // Resolution Errors (E2xxx)
    /// Wrong number of type arguments
    E2001,
    /// No parameterized descriptor for the raw type
    E2002,
    /// No codec for a nested argument or field type
    E2003,
    /// Resolution nested deeper than the configured limit
    E2004,

    // Internal Errors (E9xxx)
    /// Identifier interner exhausted
    E9001,
    /// Descriptor manifest could not be read
    E9002,

    // Construction Warnings (W1xxx)
    /// Concrete binding overwritten by a later registration
    W1001,
    /// Parameterized descriptor shadowed by an earlier one with the same raw type
    W1002,
}

impl ErrorCode {
    /// Check if this is a syntax error (E0xxx range).
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a construction error (E1xxx range).
    pub fn is_construction_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a resolution error (E2xxx range).
    pub fn is_resolution_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Get the numeric code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
        }
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
