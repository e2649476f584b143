//! The fixed builtin codec set.
//!
//! Builtins are registered ahead of every discovered descriptor. Container
//! codecs are bound under more than one raw type; all bindings of one
//! `BuiltinCodec` share a single instance.

use tyco_ir::{InternError, StringInterner};

use crate::{Descriptor, DescriptorOrigin};

/// Namespace recorded as the owner of every builtin descriptor.
pub const BUILTIN_OWNER: &str = "tyco.builtin";

/// A builtin codec construction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinCodec {
    /// UTF-8 string.
    String,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Boolean.
    Boolean,
    /// Untyped fallback for any value.
    Object,
    /// Untyped list.
    List,
    /// Untyped string-keyed map.
    Map,
}

impl BuiltinCodec {
    /// Name of the codec unit.
    pub fn codec_name(self) -> &'static str {
        match self {
            BuiltinCodec::String => "StringCodec",
            BuiltinCodec::Integer => "IntegerCodec",
            BuiltinCodec::Long => "LongCodec",
            BuiltinCodec::Float => "FloatCodec",
            BuiltinCodec::Double => "DoubleCodec",
            BuiltinCodec::Boolean => "BooleanCodec",
            BuiltinCodec::Object => "ObjectCodec",
            BuiltinCodec::List => "ListCodec",
            BuiltinCodec::Map => "MapCodec",
        }
    }

    /// True for the untyped container codecs, which accept any element type.
    pub fn is_container(self) -> bool {
        matches!(self, BuiltinCodec::List | BuiltinCodec::Map)
    }
}

/// Raw type bindings for the builtin set, in registration order.
pub const BUILTIN_BINDINGS: &[(&str, BuiltinCodec)] = &[
    ("String", BuiltinCodec::String),
    ("Integer", BuiltinCodec::Integer),
    ("Long", BuiltinCodec::Long),
    ("Float", BuiltinCodec::Float),
    ("Double", BuiltinCodec::Double),
    ("Boolean", BuiltinCodec::Boolean),
    ("Object", BuiltinCodec::Object),
    ("List", BuiltinCodec::List),
    ("ArrayList", BuiltinCodec::List),
    ("Map", BuiltinCodec::Map),
    ("HashMap", BuiltinCodec::Map),
];

/// Build one descriptor per builtin binding.
pub fn builtin_descriptors(interner: &StringInterner) -> Result<Vec<Descriptor>, InternError> {
    let owner = interner.try_intern(BUILTIN_OWNER)?;
    BUILTIN_BINDINGS
        .iter()
        .map(|&(raw, codec)| {
            let mut descriptor = Descriptor::user(interner.try_intern(raw)?, owner)
                .with_codec_name(interner.try_intern(codec.codec_name())?);
            descriptor.origin = DescriptorOrigin::Builtin(codec);
            Ok(descriptor)
        })
        .collect()
}
