//! Tyco CLI
//!
//! Checks, dumps, and queries codec registries described by a manifest.

use std::path::Path;

use tycoc::commands::{check, dump, resolve, Report};
use tycoc::init_tracing;
use tycoc::manifest::Manifest;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: tyco check <manifest.toml>");
                std::process::exit(1);
            }
            finish(&check(&load(&args[2])));
        }
        "dump" => {
            if args.len() < 3 {
                eprintln!("Usage: tyco dump <manifest.toml>");
                std::process::exit(1);
            }
            finish(&dump(&load(&args[2])));
        }
        "resolve" => {
            if args.len() < 4 {
                eprintln!("Usage: tyco resolve <manifest.toml> <type>...");
                eprintln!();
                eprintln!("Quote generic types for the shell: 'Pair<String, Integer>'");
                std::process::exit(1);
            }
            finish(&resolve(&load(&args[2]), &args[3..]));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("tyco {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Load a manifest or exit with its diagnostic.
fn load(path: &str) -> Manifest {
    match Manifest::load(Path::new(path)) {
        Ok(manifest) => manifest,
        Err(err) => {
            eprintln!("{}", err.to_diagnostic());
            std::process::exit(1);
        }
    }
}

/// Print a report and exit non-zero if it holds an error.
fn finish(report: &Report) {
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    print!("{}", report.output);
    if report.has_errors() {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Tyco codec registry");
    println!();
    println!("Usage: tyco <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <manifest>            Build the registry and resolve concrete fields");
    println!("  dump <manifest>             List concrete bindings and generic descriptors");
    println!("  resolve <manifest> <type>.. Resolve type references, e.g. 'Pair<String, Long>'");
    println!("  help                        Show this help message");
    println!("  version                     Show version information");
    println!();
    println!("Manifest format:");
    println!("  [registry]");
    println!("  duplicates = \"last-wins\"    # or \"reject\"");
    println!("  max_depth = 64");
    println!();
    println!("  [[types]]");
    println!("  raw = \"Pair\"");
    println!("  owner = \"com.acme\"");
    println!("  params = [\"A\", \"B\"]");
    println!("  abstract = false");
    println!("  parent = \"Base\"             # optional");
    println!("  codec = \"PairCodec\"         # optional");
    println!("  fields = [{{ name = \"first\", type = \"A\" }}]");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=tyco_registry=debug) to trace registry construction.");
}
