//! Codec descriptors: the build-time metadata for one raw type.
//!
//! Descriptors arrive from two places: the fixed builtin set (see
//! [`builtins`](crate::builtins)) and whatever external type discovery step
//! feeds the [`RegistryBuilder`](crate::RegistryBuilder). Once the table is
//! built they are never mutated.

use tyco_ir::{Name, StringLookup, TypeRef};

use crate::BuiltinCodec;

/// Index of a descriptor within its [`DescriptorTable`](crate::DescriptorTable).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct DescriptorId(u32);

impl DescriptorId {
    /// Create an id from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position in the table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where a descriptor came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DescriptorOrigin {
    /// One of the fixed builtin codecs. Several raw types may share one
    /// builtin construction (`List` and `ArrayList`).
    Builtin(BuiltinCodec),
    /// Supplied by type discovery.
    User,
}

/// A declared field and its type.
///
/// In a parameterized descriptor the type may mention the descriptor's own
/// parameter slots, e.g. `next: Node<T>`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    /// Field name.
    pub name: Name,
    /// Declared field type.
    pub ty: TypeRef,
}

/// Construction metadata for the codec of one raw type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Descriptor {
    /// The unparameterized type this descriptor describes.
    pub raw_type: Name,

    /// Namespace the generated codec lives in.
    pub owner: Name,

    /// Name of the generated codec unit. `None` means `<raw>Codec`.
    pub codec_name: Option<Name>,

    /// Generic parameter slots, in declaration order. The count is the arity.
    pub type_params: Vec<Name>,

    /// Abstract types get a codec (to serve as a parent) but no binding.
    pub is_abstract: bool,

    /// Raw type of the declared supertype, if any.
    pub parent: Option<Name>,

    /// Builtin or user-supplied.
    pub origin: DescriptorOrigin,

    /// Declared fields, in declaration order.
    pub fields: Vec<FieldDecl>,
}

impl Descriptor {
    /// A concrete, non-generic user descriptor with no parent and no fields.
    pub fn user(raw_type: Name, owner: Name) -> Self {
        Descriptor {
            raw_type,
            owner,
            codec_name: None,
            type_params: Vec::new(),
            is_abstract: false,
            parent: None,
            origin: DescriptorOrigin::User,
            fields: Vec::new(),
        }
    }

    /// Declare generic parameter slots.
    #[must_use]
    pub fn with_params(mut self, params: Vec<Name>) -> Self {
        self.type_params = params;
        self
    }

    /// Declare a supertype.
    #[must_use]
    pub fn with_parent(mut self, parent: Name) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Mark the type abstract.
    #[must_use]
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Override the generated codec name.
    #[must_use]
    pub fn with_codec_name(mut self, codec_name: Name) -> Self {
        self.codec_name = Some(codec_name);
        self
    }

    /// Append a field declaration.
    #[must_use]
    pub fn with_field(mut self, name: Name, ty: TypeRef) -> Self {
        self.fields.push(FieldDecl { name, ty });
        self
    }

    /// Number of generic parameter slots.
    #[inline]
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    /// True for descriptors with at least one parameter slot.
    #[inline]
    pub fn is_parameterized(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// True for descriptors from the builtin set.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        matches!(self.origin, DescriptorOrigin::Builtin(_))
    }

    /// Codec name, falling back to `<raw>Codec`.
    pub fn codec_name(&self, names: &dyn StringLookup) -> String {
        match self.codec_name {
            Some(name) => names.lookup(name).to_owned(),
            None => format!("{}Codec", names.lookup(self.raw_type)),
        }
    }

    /// Stable upper-snake symbol for the codec, e.g. `COM_ACME_PAIRCODEC`.
    ///
    /// Built from `owner` and the codec name with `.` and `$` mapped to `_`.
    pub fn codec_symbol(&self, names: &dyn StringLookup) -> String {
        let owner = names.lookup(self.owner);
        let codec = self.codec_name(names);
        let qualified = if owner.is_empty() {
            codec
        } else {
            format!("{owner}.{codec}")
        };
        qualified
            .chars()
            .map(|c| match c {
                '.' | '$' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tyco_ir::StringInterner;

    #[test]
    fn user_descriptor_defaults() {
        let interner = StringInterner::new();
        let d = Descriptor::user(interner.intern("Pair"), interner.intern("com.acme"));
        assert_eq!(d.arity(), 0);
        assert!(!d.is_parameterized());
        assert!(!d.is_builtin());
        assert!(!d.is_abstract);
        assert_eq!(d.parent, None);
    }

    #[test]
    fn codec_symbol_mangles_owner_and_name() {
        let interner = StringInterner::new();
        let d = Descriptor::user(interner.intern("Pair"), interner.intern("com.acme"));
        assert_eq!(d.codec_name(&interner), "PairCodec");
        assert_eq!(d.codec_symbol(&interner), "COM_ACME_PAIRCODEC");

        let nested = Descriptor::user(interner.intern("Outer$Inner"), interner.intern("org.x"))
            .with_codec_name(interner.intern("Outer$Inner$$Mapper"));
        assert_eq!(nested.codec_symbol(&interner), "ORG_X_OUTER_INNER__MAPPER");
    }

    #[test]
    fn codec_symbol_without_owner() {
        let interner = StringInterner::new();
        let d = Descriptor::user(interner.intern("Leaf"), Name::EMPTY);
        assert_eq!(d.codec_symbol(&interner), "LEAFCODEC");
    }
}
