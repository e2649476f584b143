//! Shared fixtures.

use tyco_ir::{Name, SharedInterner, TypeRef};
use tyco_registry::{Descriptor, Registry, RegistryBuilder};

/// Builds descriptors against one interner.
pub struct Fixture {
    pub interner: SharedInterner,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            interner: SharedInterner::new(),
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn ty(&self, text: &str) -> TypeRef {
        TypeRef::parse(text, &self.interner).expect("valid type reference")
    }

    /// A concrete descriptor in the `com.acme` namespace.
    pub fn concrete(&self, raw: &str) -> Descriptor {
        Descriptor::user(self.name(raw), self.name("com.acme"))
    }

    /// A generic descriptor with the given slots.
    pub fn generic(&self, raw: &str, slots: &[&str]) -> Descriptor {
        self.concrete(raw)
            .with_params(slots.iter().map(|s| self.name(s)).collect())
    }

    /// Add a field whose type is given in textual form.
    pub fn field(&self, descriptor: Descriptor, name: &str, ty: &str) -> Descriptor {
        descriptor.with_field(self.name(name), self.ty(ty))
    }

    pub fn builder(&self) -> RegistryBuilder {
        RegistryBuilder::new(self.interner.clone())
    }

    pub fn build(&self, descriptors: impl IntoIterator<Item = Descriptor>) -> Registry {
        self.builder()
            .descriptors(descriptors)
            .build()
            .expect("registry builds")
    }
}
