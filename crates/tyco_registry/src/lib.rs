//! Tyco codec registry.
//!
//! Maps data types to the codecs that convert them to and from the wire
//! representation. The registry is built once per process and then only read.
//!
//! # Architecture
//!
//! ```text
//! Descriptor (builtin set + discovered types)
//!     ↓
//! DescriptorTable   (ordered, builtins first, no dedup)
//!     ↓ construct pass, then link pass
//! ConcreteRegistry  (raw type → singleton codec)
//!     ↓ at each generic lookup
//! Resolver          (TypeRef → freshly built ParameterizedCodec graph)
//! ```
//!
//! # Lookups
//!
//! - [`Registry::lookup_concrete`] answers non-generic types in O(1), always
//!   with the same singleton.
//! - [`Registry::resolve_parameterized`] builds the codec for one generic
//!   instantiation, checking arity and resolving arguments and fields
//!   recursively. Self-referential type graphs link back to the node being
//!   built.
//! - [`Registry::codec_for`] picks between the two.

mod builtins;
mod cell;
mod codec;
mod concrete;
mod descriptor;
mod error;
mod registry;
mod resolve;
mod table;

pub use builtins::{BuiltinCodec, BUILTIN_BINDINGS, BUILTIN_OWNER};
pub use cell::RegistryCell;
pub use codec::{
    Codec, CodecId, CodecKind, CodecRef, InitState, ParamId, ParameterizedCodec, ResolveState,
    ResolvedCodec,
};
pub use concrete::ConcreteRegistry;
pub use descriptor::{Descriptor, DescriptorId, DescriptorOrigin, FieldDecl};
pub use error::{RegistryError, RegistryWarning, ResolveError};
pub use registry::{DuplicatePolicy, Registry, RegistryBuilder};
pub use resolve::{ResolutionCache, DEFAULT_MAX_DEPTH};
pub use table::DescriptorTable;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{CodecId, CodecRef, ParamId};
    tyco_ir::static_assert_size!(CodecId, 4);
    tyco_ir::static_assert_size!(ParamId, 4);
    // Tag + u32 payload.
    tyco_ir::static_assert_size!(CodecRef, 8);
}
