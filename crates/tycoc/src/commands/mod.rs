//! Command handlers for the `tyco` CLI.
//!
//! Each handler takes a parsed manifest and returns a [`Report`]; printing and
//! the exit status are left to the binary.

use tyco_diagnostic::Diagnostic;
use tyco_ir::{SharedInterner, StringLookup};
use tyco_registry::{Codec, CodecRef, Registry, ResolvedCodec};

use crate::manifest::Manifest;

mod check;
mod dump;
mod resolve;

pub use check::check;
pub use dump::dump;
pub use resolve::resolve;

/// What a command produced.
#[derive(Debug, Default)]
pub struct Report {
    /// Text for stdout.
    pub output: String,
    /// Errors and warnings for stderr, in the order they arose.
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Build the manifest's registry, reporting warnings and errors.
fn build_registry(manifest: &Manifest, report: &mut Report) -> Option<Registry> {
    let builder = match manifest.builder(SharedInterner::new()) {
        Ok(builder) => builder,
        Err(err) => {
            report.emit(err.to_diagnostic());
            return None;
        }
    };

    match builder.build() {
        Ok(registry) => {
            for warning in registry.warnings() {
                report.emit(warning.to_diagnostic());
            }
            Some(registry)
        }
        Err(err) => {
            report.emit(err.to_diagnostic());
            None
        }
    }
}

/// The codec symbol of a concrete codec.
fn symbol_of(registry: &Registry, codec: &Codec) -> String {
    registry
        .descriptor_of(codec)
        .map(|d| d.codec_symbol(registry.interner()))
        .unwrap_or_default()
}

/// `Type: SYMBOL` for any link inside a resolved graph.
fn describe_ref(registry: &Registry, resolved: &ResolvedCodec, codec: CodecRef) -> String {
    let names: &dyn StringLookup = registry.interner();
    match codec {
        CodecRef::Concrete(id) => registry
            .codec(id)
            .map(|c| format!("{}: {}", names.lookup(c.raw_type()), symbol_of(registry, c)))
            .unwrap_or_default(),
        CodecRef::Parameterized(id) => {
            let Some(node) = resolved.node(id) else {
                return String::new();
            };
            let symbol = registry
                .table()
                .get(node.descriptor())
                .map(|d| d.codec_symbol(names))
                .unwrap_or_default();
            format!("{}: {symbol}", node.ty().display(names))
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
