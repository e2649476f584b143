//! The registry facade and its builder.
//!
//! `RegistryBuilder::build` is the only way to obtain a [`Registry`]. It
//! registers the builtin set, appends the supplied descriptors in order,
//! validates the table, runs the two-pass concrete construction, and only then
//! returns. A returned registry is immutable and can be shared across threads
//! by reference.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tyco_ir::{Name, SharedInterner, StringLookup, TypeRef, TypeRefParseError};

use crate::concrete::parent_error;
use crate::resolve::{Resolver, DEFAULT_MAX_DEPTH};
use crate::{
    Codec, CodecId, CodecRef, ConcreteRegistry, Descriptor, DescriptorTable, ParamId,
    RegistryError, RegistryWarning, ResolutionCache, ResolveError, ResolvedCodec,
};

/// What to do when a raw type is registered more than once.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DuplicatePolicy {
    /// Keep going. A later concrete registration replaces the earlier
    /// binding; a later parameterized one is unreachable. Both are reported
    /// as warnings.
    #[default]
    LastWins,
    /// Fail the build with [`RegistryError::DuplicateRegistration`].
    Reject,
}

/// Collects descriptors and settings for one registry build.
#[derive(Debug)]
pub struct RegistryBuilder {
    interner: SharedInterner,
    policy: DuplicatePolicy,
    max_depth: usize,
    descriptors: Vec<Descriptor>,
}

impl RegistryBuilder {
    /// Start a build whose names come from `interner`.
    pub fn new(interner: SharedInterner) -> Self {
        RegistryBuilder {
            interner,
            policy: DuplicatePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            descriptors: Vec::new(),
        }
    }

    /// Set the duplicate registration policy.
    #[must_use]
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set how deeply a single resolution may nest.
    #[must_use]
    pub fn max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Register one descriptor after those already added.
    #[must_use]
    pub fn descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Register descriptors in iteration order.
    #[must_use]
    pub fn descriptors(mut self, descriptors: impl IntoIterator<Item = Descriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    /// Any construction error aborts the build; no registry is produced.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(descriptors = self.descriptors.len(), policy = ?self.policy)
    )]
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut table = DescriptorTable::with_builtins(&self.interner)?;
        for descriptor in self.descriptors {
            table.push(descriptor);
        }

        let warnings = validate(&table, self.policy, &self.interner)?;
        let concrete = ConcreteRegistry::build(&table, &self.interner)?;
        check_parameterized_parents(&table, &concrete, &self.interner)?;

        tracing::debug!(
            codecs = concrete.codecs().len(),
            warnings = warnings.len(),
            "registry built"
        );
        Ok(Registry {
            interner: self.interner,
            table,
            concrete,
            warnings,
            max_depth: self.max_depth,
        })
    }
}

/// Check slot names and duplicate registrations, in table order.
fn validate(
    table: &DescriptorTable,
    policy: DuplicatePolicy,
    names: &dyn StringLookup,
) -> Result<Vec<RegistryWarning>, RegistryError> {
    let mut warnings = Vec::new();
    let mut concrete: FxHashMap<Name, &Descriptor> = FxHashMap::default();
    let mut parameterized: FxHashMap<Name, &Descriptor> = FxHashMap::default();

    for (_, descriptor) in table.iter() {
        let raw_type = || names.lookup(descriptor.raw_type).to_owned();

        for (i, slot) in descriptor.type_params.iter().enumerate() {
            if descriptor.type_params[..i].contains(slot) {
                return Err(RegistryError::DuplicateSlot {
                    raw_type: raw_type(),
                    slot: names.lookup(*slot).to_owned(),
                });
            }
        }

        let seen = if descriptor.is_parameterized() {
            &mut parameterized
        } else {
            &mut concrete
        };
        let mut entry = match seen.entry(descriptor.raw_type) {
            Entry::Vacant(entry) => {
                entry.insert(descriptor);
                continue;
            }
            Entry::Occupied(entry) => entry,
        };
        let previous = *entry.get();

        if policy == DuplicatePolicy::Reject {
            return Err(RegistryError::DuplicateRegistration {
                raw_type: raw_type(),
                first: previous.codec_symbol(names),
                second: descriptor.codec_symbol(names),
            });
        }

        let warning = if descriptor.is_parameterized() {
            RegistryWarning::Unreachable {
                raw_type: raw_type(),
                arity: descriptor.arity(),
                reachable_arity: previous.arity(),
            }
        } else {
            entry.insert(descriptor);
            RegistryWarning::Overwritten {
                raw_type: raw_type(),
                previous: previous.codec_symbol(names),
                replacement: descriptor.codec_symbol(names),
            }
        };
        let diagnostic = warning.to_diagnostic();
        tracing::warn!(code = %diagnostic.code, "{}", diagnostic.message);
        warnings.push(warning);
    }

    Ok(warnings)
}

/// Parents of parameterized descriptors link at resolution time, so they are
/// checked here rather than in the link pass.
fn check_parameterized_parents(
    table: &DescriptorTable,
    concrete: &ConcreteRegistry,
    names: &dyn StringLookup,
) -> Result<(), RegistryError> {
    for (_, descriptor) in table.parameterized() {
        if let Some(parent) = descriptor.parent {
            if concrete.lookup_any(parent).is_none() {
                return Err(parent_error(table, descriptor.raw_type, parent, names));
            }
        }
    }
    Ok(())
}

/// A built, immutable codec registry.
#[derive(Debug)]
pub struct Registry {
    interner: SharedInterner,
    table: DescriptorTable,
    concrete: ConcreteRegistry,
    warnings: Vec<RegistryWarning>,
    max_depth: usize,
}

impl Registry {
    /// Start building a registry.
    pub fn builder(interner: SharedInterner) -> RegistryBuilder {
        RegistryBuilder::new(interner)
    }

    /// The interner every name in this registry comes from.
    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// The descriptor table, builtins first.
    #[inline]
    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }

    /// The concrete singleton registry.
    #[inline]
    pub fn concrete(&self) -> &ConcreteRegistry {
        &self.concrete
    }

    /// Warnings collected while building.
    #[inline]
    pub fn warnings(&self) -> &[RegistryWarning] {
        &self.warnings
    }

    /// The nesting limit for one resolution.
    #[inline]
    pub fn max_resolution_depth(&self) -> usize {
        self.max_depth
    }

    /// The singleton codec bound to a raw type.
    ///
    /// Returns the same instance on every call.
    #[inline]
    pub fn lookup_concrete(&self, raw: Name) -> Option<&Codec> {
        self.concrete.lookup(raw)
    }

    /// Like [`lookup_concrete`](Self::lookup_concrete), by string.
    ///
    /// Never interns: an unknown string is simply not found.
    pub fn lookup_concrete_str(&self, raw: &str) -> Option<&Codec> {
        self.lookup_concrete(self.interner.get(raw)?)
    }

    /// Get a concrete codec by id.
    #[inline]
    pub fn codec(&self, id: CodecId) -> Option<&Codec> {
        self.concrete.codec(id)
    }

    /// The descriptor that constructed a codec.
    #[inline]
    pub fn descriptor_of(&self, codec: &Codec) -> Option<&Descriptor> {
        self.table.get(codec.descriptor())
    }

    /// The linked parent of a codec.
    pub fn parent_of(&self, codec: &Codec) -> Option<&Codec> {
        self.codec(codec.parent()?)
    }

    /// Parse a type reference against this registry's interner.
    pub fn parse_type(&self, text: &str) -> Result<TypeRef, TypeRefParseError> {
        TypeRef::parse(text, &self.interner)
    }

    /// Resolve a generic instantiation into a freshly built codec graph.
    ///
    /// # Errors
    /// [`ResolveError::NoMatch`] if no parameterized descriptor has the raw
    /// type, [`ResolveError::Arity`] on an argument count mismatch, or any
    /// error from resolving the arguments and fields.
    pub fn resolve_parameterized(&self, ty: &TypeRef) -> Result<ResolvedCodec, ResolveError> {
        let mut cache = ResolutionCache::new();
        let root = self.resolve_parameterized_with(ty, &mut cache)?;
        Ok(cache.into_resolved(CodecRef::Parameterized(root)))
    }

    /// Resolve a generic instantiation into a caller-supplied cache.
    ///
    /// Instantiations already in the cache are reused. On error the cache is
    /// left as it was before the call.
    pub fn resolve_parameterized_with(
        &self,
        ty: &TypeRef,
        cache: &mut ResolutionCache,
    ) -> Result<ParamId, ResolveError> {
        with_rollback(cache, |cache| self.resolver().resolve_generic(ty, cache, 0))
    }

    /// Find the codec for any type reference.
    ///
    /// Bare references use the concrete registry, generic ones the resolver.
    ///
    /// # Errors
    /// [`ResolveError::UnknownType`] when neither applies.
    pub fn codec_for(&self, ty: &TypeRef) -> Result<ResolvedCodec, ResolveError> {
        let mut cache = ResolutionCache::new();
        let root = self.codec_for_with(ty, &mut cache)?;
        Ok(cache.into_resolved(root))
    }

    /// Like [`codec_for`](Self::codec_for), into a caller-supplied cache.
    pub fn codec_for_with(
        &self,
        ty: &TypeRef,
        cache: &mut ResolutionCache,
    ) -> Result<CodecRef, ResolveError> {
        with_rollback(cache, |cache| self.resolver().resolve_any(ty, cache, 0))
    }

    /// Resolve the declared fields of a concrete codec, in declaration order.
    pub fn resolve_fields(
        &self,
        codec: &Codec,
        cache: &mut ResolutionCache,
    ) -> Result<Vec<(Name, CodecRef)>, ResolveError> {
        let Some(descriptor) = self.descriptor_of(codec) else {
            return Ok(Vec::new());
        };
        let owner = TypeRef::new(codec.raw_type());
        with_rollback(cache, |cache| {
            let resolver = self.resolver();
            descriptor
                .fields
                .iter()
                .map(|field| -> Result<_, ResolveError> {
                    let codec = resolver.resolve_nested(&field.ty, &owner, cache, 1)?;
                    Ok((field.name, codec))
                })
                .collect()
        })
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver {
            table: &self.table,
            concrete: &self.concrete,
            names: &self.interner,
            max_depth: self.max_depth,
        }
    }
}

fn with_rollback<T>(
    cache: &mut ResolutionCache,
    resolve: impl FnOnce(&mut ResolutionCache) -> Result<T, ResolveError>,
) -> Result<T, ResolveError> {
    let mark = cache.mark();
    let result = resolve(cache);
    if result.is_err() {
        cache.rollback(mark);
    }
    result
}
