//! `vmgen`: runs one generation pass over a type-graph snapshot.
//!
//! Reads the snapshot the host compiler exported, writes one `.g.cs` unit
//! per generated view model and prints every diagnostic.
//!
//! **Usage:**
//! ```text
//! vmgen --input <graph.json> [--out <dir>] [--config <vmgen.toml>] [--format text|json]
//! ```
//!
//! Without `--out` the pass runs but nothing is written. Exits non-zero if
//! any error diagnostic was reported.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use vmgen_clients::logging::init_tracing;
use vmgen_clients::output::{render_pass, OutputFormat};
use vmgen_codegen::{generate, write_units, CancellationToken, GeneratorOptions};
use vmgen_model::TypeGraph;

/// Generate view-model members from a type-graph snapshot.
#[derive(Parser)]
#[command(
    name = "vmgen",
    about = "Generate MVVM view-model boilerplate from a type-graph snapshot"
)]
struct Args {
    /// Path to the JSON type-graph snapshot.
    #[arg(long)]
    input: PathBuf,

    /// Directory the generated units are written to.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Generator options file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let options = match &args.config {
        Some(path) => GeneratorOptions::load(path)?,
        None => GeneratorOptions::default(),
    };
    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let graph = TypeGraph::from_json(&json)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    tracing::info!(types = graph.types.len(), "snapshot loaded");

    let output = generate(&graph, &options, &CancellationToken::new())?;

    if let Some(out) = &args.out {
        write_units(out, &output.units)?;
        tracing::info!(units = output.units.len(), out = %out.display(), "units written");
    }

    print!("{}", render_pass(&output, args.format)?);
    if args.format == OutputFormat::Json {
        println!();
    }

    if output.has_errors() {
        process::exit(1);
    }
    Ok(())
}
