//! Rebar Synthesis Driver
//!
//! Reads a `BeamParams` JSON file, runs one synthesis pass, and writes the
//! resulting geometry graph, zones, and verification ledger as JSON. All
//! geometry derivation lives in the library; this binary only moves bytes.
//!
//! Usage:
//!   cargo run --bin synthesize -- <params.json> [options]
//!
//! Options:
//!   --output <path>    Write the result JSON here (default: stdout)
//!   --compact          Emit compact JSON instead of pretty-printed
//!
//! Exit codes: 0 = pass, 1 = usage/IO error, 2 = synthesis rejected the input.

use std::env;
use std::fs;

use rebar_core::params::BeamParams;
use rebar_core::synthesis::synthesize;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        std::process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let params_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut compact = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                if i + 1 < args.len() {
                    output_path = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("--output requires a path");
                    std::process::exit(1);
                }
            }
            "--compact" => compact = true,
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(params_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {}", params_path, e);
            std::process::exit(1);
        }
    };

    let params: BeamParams = match serde_json::from_str(&input) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Error parsing {}: {}", params_path, e);
            std::process::exit(1);
        }
    };

    let result = match synthesize(&params) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Synthesis failed [{}]: {}", e.error_code(), e);
            std::process::exit(2);
        }
    };

    let json = if compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!(
                "Wrote {} nodes / {} segments to {} ({} checks, {})",
                result.graph.node_count(),
                result.graph.segment_count(),
                path,
                result.ledger.checks().len(),
                if result.passed() { "PASS" } else { "FAIL" }
            );
        }
        None => println!("{}", json),
    }
}

fn print_usage() {
    eprintln!("Usage: synthesize <params.json> [--output <path>] [--compact]");
    eprintln!();
    eprintln!("Runs one rebar/duct synthesis pass over a beam parameter file");
    eprintln!("and emits the geometry graph plus verification ledger as JSON.");
}
