//! Parameterized codec resolution.
//!
//! Resolving `Pair<String, Integer>`:
//!
//! 1. Take the first parameterized descriptor whose raw type is `Pair`. No
//!    such descriptor is a [`NoMatch`](ResolveError::NoMatch), not a failure.
//! 2. Check the argument count against the descriptor's slots.
//! 3. Reserve a node for `Pair<String, Integer>` in the [`ResolutionCache`]
//!    before anything else is resolved, so a type graph that reaches back to
//!    this instantiation links to the reserved node instead of recursing.
//! 4. Resolve each argument: bare references come from the concrete registry,
//!    generic ones recurse.
//! 5. Resolve each declared field with the slots substituted by the
//!    arguments, the same way.
//!
//! A generic argument with no parameterized descriptor falls back to the
//! builtin container codec bound to its raw type (`List<String>` uses the
//! `List` codec), since those codecs accept any element type.

use rustc_hash::FxHashMap;
use tyco_ir::{Name, StringLookup, TypeRef};

use crate::{
    CodecId, CodecKind, CodecRef, ConcreteRegistry, DescriptorId, DescriptorTable,
    ParamId, ParameterizedCodec, ResolveError, ResolveState, ResolvedCodec,
};

/// Default limit on how deeply a resolution may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Memo of the parameterized codecs built within one resolution graph.
///
/// Scoped to one top-level call by [`Registry::resolve_parameterized`](crate::Registry::resolve_parameterized);
/// callers that want to share instances across calls pass their own cache to
/// [`Registry::resolve_parameterized_with`](crate::Registry::resolve_parameterized_with).
/// Not synchronized: one cache belongs to one thread at a time.
#[derive(Clone, Debug, Default)]
pub struct ResolutionCache {
    by_type: FxHashMap<TypeRef, ParamId>,
    nodes: Vec<ParameterizedCodec>,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The node already built (or being built) for an instantiation.
    #[inline]
    pub fn get(&self, ty: &TypeRef) -> Option<ParamId> {
        self.by_type.get(ty).copied()
    }

    /// Get a node by id.
    #[inline]
    pub fn node(&self, id: ParamId) -> Option<&ParameterizedCodec> {
        self.nodes.get(id.index())
    }

    /// All nodes, in reservation order.
    #[inline]
    pub fn nodes(&self) -> &[ParameterizedCodec] {
        &self.nodes
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hand the graph to the caller, rooted at `root`.
    pub fn into_resolved(self, root: CodecRef) -> ResolvedCodec {
        ResolvedCodec::new(root, self.nodes)
    }

    /// Reserve a placeholder node for `ty`.
    pub(crate) fn reserve(&mut self, ty: TypeRef, descriptor: DescriptorId) -> ParamId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "graphs are bounded by the depth limit, far below u32::MAX"
        )]
        let id = ParamId::from_raw(self.nodes.len() as u32);
        self.by_type.insert(ty.clone(), id);
        self.nodes.push(ParameterizedCodec {
            ty,
            descriptor,
            args: Vec::new(),
            fields: Vec::new(),
            parent: None,
            state: ResolveState::Resolving,
        });
        id
    }

    /// Fill in a reserved node.
    pub(crate) fn complete(
        &mut self,
        id: ParamId,
        args: Vec<CodecRef>,
        fields: Vec<(Name, CodecRef)>,
        parent: Option<CodecId>,
    ) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.args = args;
            node.fields = fields;
            node.parent = parent;
            node.state = ResolveState::Resolved;
        }
    }

    /// Current size, for a later [`rollback`](Self::rollback).
    #[inline]
    pub(crate) fn mark(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node reserved since `mark`.
    ///
    /// Used when a resolution fails, so a shared cache never keeps
    /// placeholders that will not be completed.
    pub(crate) fn rollback(&mut self, mark: usize) {
        if self.nodes.len() <= mark {
            return;
        }
        self.nodes.truncate(mark);
        self.by_type.retain(|_, id| id.index() < mark);
    }
}

/// One resolution pass over a built registry.
pub(crate) struct Resolver<'r> {
    pub(crate) table: &'r DescriptorTable,
    pub(crate) concrete: &'r ConcreteRegistry,
    pub(crate) names: &'r dyn StringLookup,
    pub(crate) max_depth: usize,
}

impl Resolver<'_> {
    /// Resolve a generic instantiation through its parameterized descriptor.
    pub(crate) fn resolve_generic(
        &self,
        ty: &TypeRef,
        cache: &mut ResolutionCache,
        depth: usize,
    ) -> Result<ParamId, ResolveError> {
        if let Some(id) = cache.get(ty) {
            tracing::trace!(ty = %ty.display(self.names), "reusing resolved codec");
            return Ok(id);
        }

        let Some((descriptor_id, descriptor)) = self.table.first_parameterized(ty.raw()) else {
            return Err(ResolveError::NoMatch {
                raw_type: self.names.lookup(ty.raw()).to_owned(),
            });
        };

        if descriptor.arity() != ty.arity() {
            return Err(ResolveError::Arity {
                raw_type: self.names.lookup(ty.raw()).to_owned(),
                expected: descriptor.arity(),
                received: ty.arity(),
            });
        }

        if depth > self.max_depth {
            return Err(ResolveError::DepthExceeded {
                ty: self.render(ty),
                limit: self.max_depth,
            });
        }

        tracing::trace!(ty = %ty.display(self.names), depth, "constructing parameterized codec");
        let id = cache.reserve(ty.clone(), descriptor_id);

        let args = ty
            .args()
            .iter()
            .map(|arg| self.resolve_nested(arg, ty, cache, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let fields = descriptor
            .fields
            .iter()
            .map(|field| -> Result<_, ResolveError> {
                let field_ty = field.ty.substitute(&descriptor.type_params, ty.args());
                let codec = self.resolve_nested(&field_ty, ty, cache, depth + 1)?;
                Ok((field.name, codec))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let parent = descriptor
            .parent
            .and_then(|parent| self.concrete.lookup_any(parent));

        cache.complete(id, args, fields, parent);
        Ok(id)
    }

    /// Resolve any reference: concrete, parameterized, or an erased container.
    pub(crate) fn resolve_any(
        &self,
        ty: &TypeRef,
        cache: &mut ResolutionCache,
        depth: usize,
    ) -> Result<CodecRef, ResolveError> {
        if ty.is_bare() {
            return self
                .concrete
                .lookup_id(ty.raw())
                .map(CodecRef::Concrete)
                .ok_or_else(|| self.unknown(ty));
        }

        match self.resolve_generic(ty, cache, depth) {
            Ok(id) => Ok(CodecRef::Parameterized(id)),
            Err(err) if err.is_no_match() => self
                .erased_container(ty.raw())
                .map(CodecRef::Concrete)
                .ok_or_else(|| self.unknown(ty)),
            Err(err) => Err(err),
        }
    }

    /// Resolve a type that `owner` depends on.
    pub(crate) fn resolve_nested(
        &self,
        ty: &TypeRef,
        owner: &TypeRef,
        cache: &mut ResolutionCache,
        depth: usize,
    ) -> Result<CodecRef, ResolveError> {
        self.resolve_any(ty, cache, depth).map_err(|err| match err {
            ResolveError::UnknownType { ty } => ResolveError::MissingCodec {
                ty,
                required_by: self.render(owner),
            },
            err => err,
        })
    }

    fn erased_container(&self, raw: Name) -> Option<CodecId> {
        let codec = self.concrete.lookup(raw)?;
        match codec.kind() {
            CodecKind::Builtin(builtin) if builtin.is_container() => Some(codec.id()),
            _ => None,
        }
    }

    fn unknown(&self, ty: &TypeRef) -> ResolveError {
        ResolveError::UnknownType {
            ty: self.render(ty),
        }
    }

    fn render(&self, ty: &TypeRef) -> String {
        ty.display(self.names).to_string()
    }
}
