//! The `dump` command: list every binding and generic descriptor.

use tyco_ir::StringLookup;

use super::{build_registry, symbol_of, Report};
use crate::manifest::Manifest;

/// Print the registry's bindings sorted by raw type, then its generic
/// descriptors in registration order.
pub fn dump(manifest: &Manifest) -> Report {
    let mut report = Report::default();
    let Some(registry) = build_registry(manifest, &mut report) else {
        return report;
    };
    let names: &dyn StringLookup = registry.interner();
    let concrete = registry.concrete();

    let mut rows: Vec<(&str, String)> = concrete
        .bindings()
        .filter_map(|(raw, id)| {
            let codec = concrete.codec(id)?;
            let parent = registry
                .parent_of(codec)
                .map(|p| format!(" (parent: {})", names.lookup(p.raw_type())))
                .unwrap_or_default();
            Some((names.lookup(raw), format!("{}{parent}", symbol_of(&registry, codec))))
        })
        .collect();
    for codec in concrete.codecs().iter().filter(|c| c.is_abstract()) {
        rows.push((
            names.lookup(codec.raw_type()),
            format!("{} (abstract)", symbol_of(&registry, codec)),
        ));
    }
    rows.sort();

    report.line("concrete:");
    for (raw, row) in rows {
        report.line(format!("  {raw}: {row}"));
    }

    report.line("generic:");
    let table = registry.table();
    for (id, descriptor) in table.parameterized() {
        let params: Vec<&str> = descriptor
            .type_params
            .iter()
            .map(|&p| names.lookup(p))
            .collect();
        let reachable = table
            .first_parameterized(descriptor.raw_type)
            .is_some_and(|(first, _)| first == id);
        report.line(format!(
            "  {}<{}>: {}{}",
            names.lookup(descriptor.raw_type),
            params.join(", "),
            descriptor.codec_symbol(names),
            if reachable { "" } else { " (unreachable)" },
        ));
    }
    report
}
