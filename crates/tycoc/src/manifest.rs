//! The TOML descriptor manifest.
//!
//! A manifest stands in for type discovery: it lists the descriptors to
//! register, in order, plus the build settings.
//!
//! ```toml
//! [registry]
//! duplicates = "reject"
//! max_depth = 32
//!
//! [[types]]
//! raw = "Pair"
//! owner = "com.acme"
//! params = ["A", "B"]
//! fields = [{ name = "first", type = "A" }, { name = "second", type = "B" }]
//! ```

use std::path::Path;

use serde::Deserialize;
use tyco_diagnostic::{type_ref_syntax, Diagnostic, ErrorCode};
use tyco_ir::{InternError, Name, SharedInterner, TypeRef, TypeRefParseError};
use tyco_registry::{Descriptor, DuplicatePolicy, RegistryBuilder, DEFAULT_MAX_DEPTH};

/// A parsed manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Build settings.
    #[serde(default)]
    pub registry: RegistrySettings,
    /// Descriptors, in registration order.
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// The `[registry]` table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Duplicate registration policy.
    pub duplicates: DuplicatesSetting,
    /// Resolution depth limit.
    pub max_depth: usize,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        RegistrySettings {
            duplicates: DuplicatesSetting::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Manifest spelling of [`DuplicatePolicy`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatesSetting {
    #[default]
    LastWins,
    Reject,
}

impl From<DuplicatesSetting> for DuplicatePolicy {
    fn from(setting: DuplicatesSetting) -> Self {
        match setting {
            DuplicatesSetting::LastWins => DuplicatePolicy::LastWins,
            DuplicatesSetting::Reject => DuplicatePolicy::Reject,
        }
    }
}

/// One `[[types]]` entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub raw: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// A field of a `[[types]]` entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Failure to turn a manifest into a registry builder.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("field `{field}` of `{raw}` has an invalid type: {source}")]
    FieldType {
        raw: String,
        field: String,
        text: String,
        #[source]
        source: TypeRefParseError,
    },

    #[error(transparent)]
    Intern(#[from] InternError),
}

impl ManifestError {
    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::Io { .. } => {
                Diagnostic::error(ErrorCode::E9002).with_message(self.to_string())
            }
            ManifestError::Toml(err) => Diagnostic::error(ErrorCode::E0002)
                .with_message(format!("malformed manifest: {}", err.message()))
                .with_note("see `tyco help` for the manifest format"),
            ManifestError::FieldType {
                raw,
                field,
                text,
                source,
            } => type_ref_syntax(text, source).with_note(format!("in field `{field}` of `{raw}`")),
            ManifestError::Intern(_) => {
                Diagnostic::error(ErrorCode::E9001).with_message(self.to_string())
            }
        }
    }
}

impl Manifest {
    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded manifest");
        Self::parse(&text)
    }

    /// Intern every entry into a descriptor, in order.
    pub fn descriptors(&self, interner: &SharedInterner) -> Result<Vec<Descriptor>, ManifestError> {
        self.types
            .iter()
            .map(|entry| entry.to_descriptor(interner))
            .collect()
    }

    /// A builder configured from `[registry]` and holding every descriptor.
    pub fn builder(&self, interner: SharedInterner) -> Result<RegistryBuilder, ManifestError> {
        let descriptors = self.descriptors(&interner)?;
        Ok(RegistryBuilder::new(interner)
            .duplicate_policy(self.registry.duplicates.into())
            .max_resolution_depth(self.registry.max_depth)
            .descriptors(descriptors))
    }
}

impl TypeEntry {
    fn to_descriptor(&self, interner: &SharedInterner) -> Result<Descriptor, ManifestError> {
        let params = self
            .params
            .iter()
            .map(|p| interner.try_intern(p))
            .collect::<Result<Vec<Name>, _>>()?;

        let mut descriptor =
            Descriptor::user(interner.try_intern(&self.raw)?, interner.try_intern(&self.owner)?)
                .with_params(params)
                .with_abstract(self.is_abstract);
        if let Some(parent) = &self.parent {
            descriptor = descriptor.with_parent(interner.try_intern(parent)?);
        }
        if let Some(codec) = &self.codec {
            descriptor = descriptor.with_codec_name(interner.try_intern(codec)?);
        }

        for field in &self.fields {
            let ty = TypeRef::parse(&field.ty, interner).map_err(|source| {
                ManifestError::FieldType {
                    raw: self.raw.clone(),
                    field: field.name.clone(),
                    text: field.ty.clone(),
                    source,
                }
            })?;
            descriptor = descriptor.with_field(interner.try_intern(&field.name)?, ty);
        }
        Ok(descriptor)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
