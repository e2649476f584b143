//! String interner for raw type identifiers.
//!
//! Interning happens while descriptors are assembled; afterwards the registry
//! only reads. Reads take a shared lock, so lookups from many threads proceed
//! in parallel.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// More distinct identifiers than a `Name` can address.
    #[error("interner exceeded capacity: {count} strings, max is {max}", max = u32::MAX)]
    Overflow { count: usize },
}

/// Storage behind the lock.
struct InternTable {
    /// Map from string content to its name.
    map: FxHashMap<&'static str, Name>,
    /// Storage for string contents, indexed by `Name::index`.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, Name::EMPTY);
        Self {
            map,
            strings: vec![empty],
        }
    }
}

/// Thread-safe string interner.
///
/// Interned strings are leaked and live for the rest of the process, which
/// matches the lifetime of a codec registry.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner holding only the empty string.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(name) = self.get(s) {
            return Ok(name);
        }

        let mut guard = self.table.write();

        // Another writer may have won the race between the locks.
        if let Some(&name) = guard.map.get(s) {
            return Ok(name);
        }

        let raw = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(raw);
        guard.strings.push(leaked);
        guard.map.insert(leaked, name);
        Ok(name)
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the name of an already-interned string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied()
    }

    /// Look up the string for a Name.
    ///
    /// Names from another interner resolve to the empty string rather than
    /// panicking.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner holds only the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for looking up interned string names.
///
/// Display helpers accept any `StringLookup` so they work with both a borrowed
/// `StringInterner` and a `SharedInterner`.
pub trait StringLookup {
    /// Look up the string for an interned name.
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

/// Shared interner handle.
///
/// The registry keeps one of these so it can render names in diagnostics and
/// answer string-keyed lookups; callers clone it to intern type references
/// against the same table.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedInterner")
            .field("len", &self.0.len())
            .finish()
    }
}
