//! The `resolve` command: look up codecs for type references.

use tyco_diagnostic::type_ref_syntax;
use tyco_ir::StringLookup;

use super::{build_registry, describe_ref, Report};
use crate::manifest::Manifest;

/// Resolve each type and print its codec graph.
///
/// Every type is attempted; one failure does not stop the rest.
pub fn resolve(manifest: &Manifest, types: &[String]) -> Report {
    let mut report = Report::default();
    let Some(registry) = build_registry(manifest, &mut report) else {
        return report;
    };
    let names: &dyn StringLookup = registry.interner();

    for text in types {
        let ty = match registry.parse_type(text) {
            Ok(ty) => ty,
            Err(err) => {
                report.emit(type_ref_syntax(text, &err));
                continue;
            }
        };

        let resolved = match registry.codec_for(&ty) {
            Ok(resolved) => resolved,
            Err(err) => {
                report.emit(err.to_diagnostic());
                continue;
            }
        };

        report.line(describe_ref(&registry, &resolved, resolved.root()));
        for node in resolved.nodes() {
            report.line(format!("  {}", node.ty().display(names)));
            for (i, &arg) in node.args().iter().enumerate() {
                report.line(format!("    [{i}] {}", describe_ref(&registry, &resolved, arg)));
            }
            for &(field, codec) in node.fields() {
                report.line(format!(
                    "    .{} {}",
                    names.lookup(field),
                    describe_ref(&registry, &resolved, codec)
                ));
            }
            if let Some(parent) = node.parent().and_then(|id| registry.codec(id)) {
                report.line(format!("    ^ {}", names.lookup(parent.raw_type())));
            }
        }
    }
    report
}
