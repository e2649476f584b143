//! Registry errors and warnings.
//!
//! Construction errors (`RegistryError`) abort the build: no partially usable
//! registry is ever returned. Resolution errors (`ResolveError`) are returned
//! to the caller of one lookup and leave the registry untouched.
//!
//! Type names are rendered to strings when an error is created, so errors can
//! be displayed without access to the interner.

use tyco_diagnostic::{Diagnostic, ErrorCode};
use tyco_ir::InternError;

/// Fatal registry construction error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A descriptor names a parent that no descriptor describes.
    #[error("`{child}` declares parent `{parent}`, which has no descriptor")]
    MissingParent { child: String, parent: String },

    /// A descriptor names a parent that only exists as a parameterized type.
    #[error("`{child}` declares parent `{parent}`, which is a parameterized type")]
    ParameterizedParent { child: String, parent: String },

    /// A raw type was registered twice under the strict duplicate policy.
    #[error("`{raw_type}` is registered more than once (by `{first}` and `{second}`)")]
    DuplicateRegistration {
        raw_type: String,
        first: String,
        second: String,
    },

    /// A descriptor lists the same parameter slot twice.
    #[error("`{raw_type}` declares parameter slot `{slot}` more than once")]
    DuplicateSlot { raw_type: String, slot: String },

    /// The identifier interner is exhausted.
    #[error(transparent)]
    Intern(#[from] InternError),
}

impl RegistryError {
    /// The error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::MissingParent { .. } => ErrorCode::E1001,
            RegistryError::ParameterizedParent { .. } => ErrorCode::E1002,
            RegistryError::DuplicateRegistration { .. } => ErrorCode::E1003,
            RegistryError::DuplicateSlot { .. } => ErrorCode::E1004,
            RegistryError::Intern(_) => ErrorCode::E9001,
        }
    }

    /// Convert to a diagnostic with a fix hint.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            RegistryError::MissingParent { parent, .. } => {
                diag.with_suggestion(format!("register a descriptor for `{parent}`"))
            }
            RegistryError::ParameterizedParent { parent, .. } => diag
                .with_note("a parent is named by raw type only, so it cannot take type arguments")
                .with_suggestion(format!("register a non-generic descriptor for `{parent}`")),
            RegistryError::DuplicateRegistration { .. } => diag.with_suggestion(
                "remove one registration, or build with the last-wins duplicate policy",
            ),
            RegistryError::DuplicateSlot { slot, .. } => {
                diag.with_suggestion(format!("rename one of the `{slot}` slots"))
            }
            RegistryError::Intern(_) => diag,
        }
    }
}

/// Error returned by a codec lookup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The matched descriptor has a different number of parameter slots.
    #[error(
        "invalid number of type arguments: `{raw_type}` expects {expected}, received {received}"
    )]
    Arity {
        raw_type: String,
        expected: usize,
        received: usize,
    },

    /// No parameterized descriptor has this raw type.
    ///
    /// Not a failure of the registry: callers may fall back to the concrete
    /// registry or report the type as unsupported.
    #[error("no parameterized codec is registered for `{raw_type}`")]
    NoMatch { raw_type: String },

    /// A bare type with no concrete codec was requested directly.
    #[error("no codec is registered for `{ty}`")]
    UnknownType { ty: String },

    /// A type argument or field type has no codec.
    #[error("no codec for `{ty}`, required by `{required_by}`")]
    MissingCodec { ty: String, required_by: String },

    /// The type graph kept expanding past the depth limit.
    #[error("resolving `{ty}` exceeded the maximum nesting depth of {limit}")]
    DepthExceeded { ty: String, limit: usize },
}

impl ResolveError {
    /// True for the "no descriptor, try elsewhere" signal.
    pub fn is_no_match(&self) -> bool {
        matches!(self, ResolveError::NoMatch { .. })
    }

    /// The error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::Arity { .. } => ErrorCode::E2001,
            ResolveError::NoMatch { .. } => ErrorCode::E2002,
            ResolveError::UnknownType { .. } | ResolveError::MissingCodec { .. } => {
                ErrorCode::E2003
            }
            ResolveError::DepthExceeded { .. } => ErrorCode::E2004,
        }
    }

    /// Convert to a diagnostic with a fix hint.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            ResolveError::Arity {
                expected, received, ..
            } => diag.with_suggestion(if received > expected {
                "remove extra type arguments"
            } else {
                "add missing type arguments"
            }),
            ResolveError::NoMatch { .. } => {
                diag.with_note("only descriptors with parameter slots accept type arguments")
            }
            ResolveError::UnknownType { ty } | ResolveError::MissingCodec { ty, .. } => {
                diag.with_suggestion(format!("register a descriptor for `{ty}`"))
            }
            ResolveError::DepthExceeded { .. } => diag.with_note(
                "a field type that wraps its own type parameter expands without bound",
            ),
        }
    }
}

/// A non-fatal construction finding.
///
/// Produced under the last-wins duplicate policy, where the same input would
/// be a [`RegistryError::DuplicateRegistration`] under the strict one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryWarning {
    /// A later concrete registration replaced an earlier binding.
    Overwritten {
        raw_type: String,
        previous: String,
        replacement: String,
    },

    /// A parameterized descriptor can never be reached because an earlier one
    /// has the same raw type.
    Unreachable {
        raw_type: String,
        arity: usize,
        reachable_arity: usize,
    },
}

impl RegistryWarning {
    /// Convert to a warning diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RegistryWarning::Overwritten {
                raw_type,
                previous,
                replacement,
            } => Diagnostic::warning(ErrorCode::W1001)
                .with_message(format!(
                    "`{raw_type}` is bound to `{replacement}`, replacing `{previous}`"
                ))
                .with_note("the later registration wins"),
            RegistryWarning::Unreachable {
                raw_type,
                arity,
                reachable_arity,
            } => Diagnostic::warning(ErrorCode::W1002)
                .with_message(format!(
                    "parameterized descriptor `{raw_type}` with {arity} slot(s) is unreachable"
                ))
                .with_note(format!(
                    "lookups for `{raw_type}` always use the earlier descriptor with {reachable_arity} slot(s)"
                )),
        }
    }
}
