//! Diagnostics for registry construction and codec resolution.
//!
//! Every failure the registry can report maps to an `ErrorCode`, so tooling
//! and logs can be searched by code:
//! - what went wrong (message)
//! - which type it concerns (notes)
//! - how to fix it (suggestions)

mod diagnostic;
mod error_code;

pub use diagnostic::{type_ref_syntax, Diagnostic, Severity};
pub use error_code::ErrorCode;
