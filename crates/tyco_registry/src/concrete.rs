//! The concrete registry: one singleton codec per zero-arity raw type.
//!
//! # Initialization Barrier
//!
//! Construction runs in exactly two passes over the zero-arity descriptors,
//! in table order:
//!
//! 1. **Construct**: every codec is instantiated (abstract ones included) and
//!    recorded by raw type. Non-abstract codecs are also bound for lookup.
//! 2. **Link**: only once every codec exists, each one resolves its declared
//!    parent against the map of *all* constructed codecs.
//!
//! The passes are separate types: `Constructed` can only become a
//! [`ConcreteRegistry`] by linking, so a registry whose parents are not yet
//! resolved is never handed out.

use rustc_hash::FxHashMap;
use tyco_ir::{Name, StringLookup};

use crate::{
    Codec, CodecId, CodecKind, DescriptorOrigin, DescriptorTable, InitState, RegistryError,
};

/// Frozen map from raw type to singleton codec.
#[derive(Clone, Debug)]
pub struct ConcreteRegistry {
    /// Every constructed codec, in construction order.
    codecs: Vec<Codec>,

    /// Raw type -> codec, non-abstract only. Last registration wins.
    bindable: FxHashMap<Name, CodecId>,

    /// Raw type -> codec, abstract included. Parent links resolve here.
    all: FxHashMap<Name, CodecId>,
}

/// Output of the construct pass: every codec exists, no parent is linked.
struct Constructed {
    codecs: Vec<Codec>,
    bindable: FxHashMap<Name, CodecId>,
    all: FxHashMap<Name, CodecId>,
}

impl ConcreteRegistry {
    /// Build the registry from the zero-arity descriptors of `table`.
    ///
    /// # Errors
    /// Fails if a codec declares a parent with no zero-arity descriptor.
    #[tracing::instrument(level = "debug", skip_all, fields(descriptors = table.len()))]
    pub fn build(
        table: &DescriptorTable,
        names: &dyn StringLookup,
    ) -> Result<Self, RegistryError> {
        let constructed = Constructed::construct(table);
        tracing::debug!(codecs = constructed.codecs.len(), "construct pass complete");
        let registry = constructed.link(table, names)?;
        tracing::debug!(bindings = registry.bindable.len(), "link pass complete");
        Ok(registry)
    }

    /// The bound codec for a raw type. Abstract codecs are not bound.
    #[inline]
    pub fn lookup(&self, raw: Name) -> Option<&Codec> {
        self.lookup_id(raw).and_then(|id| self.codec(id))
    }

    /// Id of the bound codec for a raw type.
    #[inline]
    pub fn lookup_id(&self, raw: Name) -> Option<CodecId> {
        self.bindable.get(&raw).copied()
    }

    /// Id of the codec constructed for a raw type, abstract included.
    #[inline]
    pub fn lookup_any(&self, raw: Name) -> Option<CodecId> {
        self.all.get(&raw).copied()
    }

    /// Get a codec by id.
    #[inline]
    pub fn codec(&self, id: CodecId) -> Option<&Codec> {
        self.codecs.get(id.index())
    }

    /// All codecs, in construction order.
    #[inline]
    pub fn codecs(&self) -> &[Codec] {
        &self.codecs
    }

    /// All lookup bindings, in no particular order.
    pub fn bindings(&self) -> impl Iterator<Item = (Name, CodecId)> + '_ {
        self.bindable.iter().map(|(&raw, &id)| (raw, id))
    }

    /// Check whether every codec has passed the link pass.
    pub fn is_ready(&self) -> bool {
        self.codecs
            .iter()
            .all(|c| c.state() == InitState::ParentResolved)
    }
}

impl Constructed {
    fn construct(table: &DescriptorTable) -> Self {
        let mut codecs: Vec<Codec> = Vec::new();
        let mut bindable = FxHashMap::default();
        let mut all = FxHashMap::default();
        let mut shared = FxHashMap::default();

        for (descriptor_id, descriptor) in table.zero_arity() {
            let kind = match descriptor.origin {
                DescriptorOrigin::Builtin(builtin) => CodecKind::Builtin(builtin),
                DescriptorOrigin::User => CodecKind::Generated,
            };

            let existing = match kind {
                CodecKind::Builtin(builtin) => shared.get(&builtin).copied(),
                CodecKind::Generated => None,
            };
            let id = if let Some(id) = existing {
                id
            } else {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "one codec per descriptor, and descriptor ids are u32"
                )]
                let id = CodecId::from_raw(codecs.len() as u32);
                codecs.push(Codec::construct(
                    id,
                    descriptor.raw_type,
                    descriptor_id,
                    kind,
                    descriptor.is_abstract,
                ));
                if let CodecKind::Builtin(builtin) = kind {
                    shared.insert(builtin, id);
                }
                id
            };

            all.insert(descriptor.raw_type, id);
            if !descriptor.is_abstract {
                bindable.insert(descriptor.raw_type, id);
            }
        }

        Constructed {
            codecs,
            bindable,
            all,
        }
    }

    fn link(
        mut self,
        table: &DescriptorTable,
        names: &dyn StringLookup,
    ) -> Result<ConcreteRegistry, RegistryError> {
        for codec in &mut self.codecs {
            let declared = table.get(codec.descriptor()).and_then(|d| d.parent);
            let parent = match declared {
                None => None,
                Some(parent) => match self.all.get(&parent) {
                    Some(&id) => Some(id),
                    None => return Err(parent_error(table, codec.raw_type(), parent, names)),
                },
            };
            codec.link_parent(parent);
        }

        Ok(ConcreteRegistry {
            codecs: self.codecs,
            bindable: self.bindable,
            all: self.all,
        })
    }
}

/// The error for a declared parent with no zero-arity descriptor.
pub(crate) fn parent_error(
    table: &DescriptorTable,
    child: Name,
    parent: Name,
    names: &dyn StringLookup,
) -> RegistryError {
    let child = names.lookup(child).to_owned();
    let parent_str = names.lookup(parent).to_owned();
    if table.first_parameterized(parent).is_some() {
        RegistryError::ParameterizedParent {
            child,
            parent: parent_str,
        }
    } else {
        RegistryError::MissingParent {
            child,
            parent: parent_str,
        }
    }
}
