//! The ordered descriptor table.
//!
//! Registration order is significant: it decides which concrete binding wins
//! when a raw type is registered twice, and which parameterized descriptor is
//! reachable when two share a raw type. The table itself never deduplicates.

use rustc_hash::FxHashMap;
use tyco_ir::{InternError, Name, StringInterner};

use crate::builtins::builtin_descriptors;
use crate::{Descriptor, DescriptorId};

/// Builtins first, then discovered descriptors, in registration order.
#[derive(Clone, Debug, Default)]
pub struct DescriptorTable {
    entries: Vec<Descriptor>,

    /// Number of leading builtin entries.
    builtin_count: usize,

    /// Raw type -> first parameterized descriptor with that raw type.
    ///
    /// Equivalent to a front-to-back scan of `entries`, since later
    /// registrations never replace an existing key.
    first_parameterized: FxHashMap<Name, DescriptorId>,
}

impl DescriptorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the builtin set.
    pub fn with_builtins(interner: &StringInterner) -> Result<Self, InternError> {
        let mut table = Self::new();
        for descriptor in builtin_descriptors(interner)? {
            table.push(descriptor);
        }
        table.builtin_count = table.entries.len();
        Ok(table)
    }

    /// Append a descriptor, returning its id.
    pub fn push(&mut self, descriptor: Descriptor) -> DescriptorId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "descriptor counts are bounded by the interner's u32 name space"
        )]
        let id = DescriptorId::from_raw(self.entries.len() as u32);
        if descriptor.is_parameterized() {
            self.first_parameterized
                .entry(descriptor.raw_type)
                .or_insert(id);
        }
        self.entries.push(descriptor);
        id
    }

    /// Get a descriptor by id.
    #[inline]
    pub fn get(&self, id: DescriptorId) -> Option<&Descriptor> {
        self.entries.get(id.index())
    }

    /// Iterate over all descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &Descriptor)> {
        self.entries.iter().enumerate().map(|(i, d)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "push() guarantees every index fits in u32"
            )]
            let id = DescriptorId::from_raw(i as u32);
            (id, d)
        })
    }

    /// Iterate over zero-arity descriptors in registration order.
    pub fn zero_arity(&self) -> impl Iterator<Item = (DescriptorId, &Descriptor)> {
        self.iter().filter(|(_, d)| !d.is_parameterized())
    }

    /// Iterate over parameterized descriptors in registration order.
    pub fn parameterized(&self) -> impl Iterator<Item = (DescriptorId, &Descriptor)> {
        self.iter().filter(|(_, d)| d.is_parameterized())
    }

    /// The first parameterized descriptor registered for `raw`.
    ///
    /// A later parameterized descriptor with the same raw type is never
    /// returned, whatever its arity.
    pub fn first_parameterized(&self, raw: Name) -> Option<(DescriptorId, &Descriptor)> {
        let id = *self.first_parameterized.get(&raw)?;
        self.get(id).map(|d| (id, d))
    }

    /// Check whether any descriptor, of any arity, has this raw type.
    pub fn contains_raw(&self, raw: Name) -> bool {
        self.entries.iter().any(|d| d.raw_type == raw)
    }

    /// Number of leading builtin descriptors.
    #[inline]
    pub fn builtin_count(&self) -> usize {
        self.builtin_count
    }

    /// Total number of descriptors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
