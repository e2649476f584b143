//! Tyco IR - identifiers and type references.
//!
//! This crate holds the plain data the codec registry is keyed on:
//! - `Name` for interned raw type identifiers
//! - `StringInterner` / `SharedInterner` for producing and reading names
//! - `TypeRef` for (possibly generic) type instantiations such as `Pair<String, Integer>`
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: raw type identifiers become `Name(u32)` so registry
//!   lookups hash and compare a single integer.
//! - **Values, not handles**: a `TypeRef` owns its argument tree and is compared
//!   structurally, so it can key a resolution cache directly.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod type_ref;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use type_ref::{TypeRef, TypeRefDisplay, TypeRefParseError, MAX_TYPE_NESTING};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, TypeRef};
    // Name is a bare u32 handle.
    crate::static_assert_size!(Name, 4);
    // TypeRef: Name (4, padded to 8) + Vec<TypeRef> (24).
    crate::static_assert_size!(TypeRef, 32);
}
