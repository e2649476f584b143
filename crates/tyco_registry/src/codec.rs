//! Codec instances and the handles that point at them.
//!
//! # Ownership
//!
//! - Concrete (zero-arity) codecs live in the
//!   [`ConcreteRegistry`](crate::ConcreteRegistry) and are addressed by
//!   [`CodecId`]. There is exactly one instance per construction.
//! - Parameterized codecs live in the [`ResolutionCache`](crate::ResolutionCache)
//!   of the call that built them and are addressed by [`ParamId`]. A finished
//!   resolution hands them to the caller as a [`ResolvedCodec`].
//!
//! Links between codecs (type arguments, fields, parents) are these handles,
//! never pointers, so a self-referential type graph is just an index that
//! points back at its own node.

use tyco_ir::{Name, TypeRef};

use crate::{BuiltinCodec, DescriptorId};

/// Handle to a concrete codec singleton.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct CodecId(u32);

impl CodecId {
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

    /// Position in construction order.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a parameterized codec inside one resolution graph.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct ParamId(u32);

impl ParamId {
    /// Create an id from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Position in the resolution graph.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A link to any codec.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CodecRef {
    /// A registry singleton.
    Concrete(CodecId),
    /// A node of the resolution graph the link was produced in.
    Parameterized(ParamId),
}

impl CodecRef {
    /// The singleton id, if this links to one.
    pub fn as_concrete(self) -> Option<CodecId> {
        match self {
            CodecRef::Concrete(id) => Some(id),
            CodecRef::Parameterized(_) => None,
        }
    }

    /// The graph node id, if this links to one.
    pub fn as_parameterized(self) -> Option<ParamId> {
        match self {
            CodecRef::Parameterized(id) => Some(id),
            CodecRef::Concrete(_) => None,
        }
    }
}

/// What kind of codec unit an instance is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CodecKind {
    /// A builtin codec.
    Builtin(BuiltinCodec),
    /// The generated codec of a user descriptor.
    Generated,
}

/// Initialization state of a concrete codec.
///
/// `Uninitialized` is not represented: a codec that has not been constructed
/// has no `Codec` value at all.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InitState {
    /// Constructed; the parent link has not been resolved yet.
    Constructed,
    /// Parent link resolved (or known to be absent). Ready for traffic.
    ParentResolved,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum ParentLink {
    Pending,
    Resolved(Option<CodecId>),
}

/// A concrete codec singleton.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Codec {
    id: CodecId,
    raw_type: Name,
    descriptor: DescriptorId,
    kind: CodecKind,
    is_abstract: bool,
    parent: ParentLink,
}

impl Codec {
    pub(crate) fn construct(
        id: CodecId,
        raw_type: Name,
        descriptor: DescriptorId,
        kind: CodecKind,
        is_abstract: bool,
    ) -> Self {
        Codec {
            id,
            raw_type,
            descriptor,
            kind,
            is_abstract,
            parent: ParentLink::Pending,
        }
    }

    /// Record the resolved parent. Later calls are no-ops.
    pub(crate) fn link_parent(&mut self, parent: Option<CodecId>) {
        if self.parent == ParentLink::Pending {
            self.parent = ParentLink::Resolved(parent);
        }
    }

    /// This codec's handle.
    #[inline]
    pub fn id(&self) -> CodecId {
        self.id
    }

    /// Raw type of the descriptor that constructed this codec.
    ///
    /// For a shared builtin this is the first raw type bound to it.
    #[inline]
    pub fn raw_type(&self) -> Name {
        self.raw_type
    }

    /// The descriptor that constructed this codec.
    #[inline]
    pub fn descriptor(&self) -> DescriptorId {
        self.descriptor
    }

    /// Builtin or generated.
    #[inline]
    pub fn kind(&self) -> CodecKind {
        self.kind
    }

    /// True if this codec exists only to serve as a parent.
    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Current initialization state.
    pub fn state(&self) -> InitState {
        match self.parent {
            ParentLink::Pending => InitState::Constructed,
            ParentLink::Resolved(_) => InitState::ParentResolved,
        }
    }

    /// The parent codec, once linked.
    pub fn parent(&self) -> Option<CodecId> {
        match self.parent {
            ParentLink::Resolved(parent) => parent,
            ParentLink::Pending => None,
        }
    }
}

/// Progress of a parameterized codec through resolution.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ResolveState {
    /// Reserved in the graph; arguments and fields are still being resolved.
    Resolving,
    /// All arguments and fields resolved.
    Resolved,
}

/// A codec constructed for one specific instantiation such as `Pair<String, Integer>`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParameterizedCodec {
    pub(crate) ty: TypeRef,
    pub(crate) descriptor: DescriptorId,
    pub(crate) args: Vec<CodecRef>,
    pub(crate) fields: Vec<(Name, CodecRef)>,
    pub(crate) parent: Option<CodecId>,
    pub(crate) state: ResolveState,
}

impl ParameterizedCodec {
    /// The instantiation this codec handles.
    #[inline]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// The descriptor it was built from.
    #[inline]
    pub fn descriptor(&self) -> DescriptorId {
        self.descriptor
    }

    /// Codecs for the type arguments, in order.
    #[inline]
    pub fn args(&self) -> &[CodecRef] {
        &self.args
    }

    /// Codecs for the declared fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[(Name, CodecRef)] {
        &self.fields
    }

    /// Codec for a field by name.
    pub fn field(&self, name: Name) -> Option<CodecRef> {
        self.fields
            .iter()
            .find_map(|&(n, codec)| (n == name).then_some(codec))
    }

    /// The declared parent's codec.
    #[inline]
    pub fn parent(&self) -> Option<CodecId> {
        self.parent
    }

    /// Resolution progress.
    #[inline]
    pub fn state(&self) -> ResolveState {
        self.state
    }
}

/// The finished result of a resolution call, owned by the caller.
///
/// `root` is the requested codec; `nodes` holds every parameterized codec
/// built along the way, indexed by [`ParamId`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ResolvedCodec {
    root: CodecRef,
    nodes: Vec<ParameterizedCodec>,
}

impl ResolvedCodec {
    pub(crate) fn new(root: CodecRef, nodes: Vec<ParameterizedCodec>) -> Self {
        ResolvedCodec { root, nodes }
    }

    /// Link to the requested codec.
    #[inline]
    pub fn root(&self) -> CodecRef {
        self.root
    }

    /// The requested codec, when it is parameterized.
    pub fn root_node(&self) -> Option<&ParameterizedCodec> {
        self.root.as_parameterized().and_then(|id| self.node(id))
    }

    /// A parameterized codec in this graph.
    #[inline]
    pub fn node(&self, id: ParamId) -> Option<&ParameterizedCodec> {
        self.nodes.get(id.index())
    }

    /// All parameterized codecs in this graph, in reservation order.
    #[inline]
    pub fn nodes(&self) -> &[ParameterizedCodec] {
        &self.nodes
    }
}
