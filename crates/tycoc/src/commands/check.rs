//! The `check` command: build the registry and resolve every concrete type's
//! declared fields.

use tyco_registry::ResolutionCache;

use super::{build_registry, Report};
use crate::manifest::Manifest;

/// Validate a manifest.
///
/// Reports construction errors, duplicate warnings, and any field of a
/// concrete type that has no codec.
pub fn check(manifest: &Manifest) -> Report {
    let mut report = Report::default();
    let Some(registry) = build_registry(manifest, &mut report) else {
        return report;
    };

    let mut cache = ResolutionCache::new();
    for codec in registry.concrete().codecs() {
        if let Err(err) = registry.resolve_fields(codec, &mut cache) {
            report.emit(err.to_diagnostic());
        }
    }

    if !report.has_errors() {
        let table = registry.table();
        let generic = table.parameterized().count();
        report.line(format!(
            "OK: {} descriptors ({} builtin), {} concrete codecs, {generic} generic",
            table.len(),
            table.builtin_count(),
            registry.concrete().codecs().len(),
        ));
    }
    report
}
