//! `vmgen-conformance`: runs the conformance suite.
//!
//! Checks the diagnostic table, runs the bundled fixture snapshots through
//! the generator twice and validates the layout of every emitted unit.
//! With `--generated` the `*.g.cs` files of a real build are checked too.
//!
//! **Usage:**
//! ```text
//! vmgen-conformance [--generated <dir>] [--config <vmgen.toml>] [--format text|json]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use vmgen_clients::logging::init_tracing;
use vmgen_clients::output::{render_report, OutputFormat};
use vmgen_codegen::GeneratorOptions;
use vmgen_conformance::{run_all, SuiteConfig};

/// Run the vmgen conformance suite.
#[derive(Parser)]
#[command(
    name = "vmgen-conformance",
    about = "Validate vmgen output against its layout and stability contracts"
)]
struct Args {
    /// Directory of previously generated units to validate as well.
    #[arg(long)]
    generated: Option<PathBuf>,

    /// Generator options file (TOML) used for the fixture passes.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let generator = match &args.config {
        Some(path) => GeneratorOptions::load(path)?,
        None => GeneratorOptions::default(),
    };
    let config = SuiteConfig {
        generator,
        generated: args.generated,
    };

    let report = run_all(&config)?;
    print!("{}", render_report(&report, args.format)?);
    if args.format == OutputFormat::Json {
        println!();
    }

    let failed = report.failure_count();
    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    if args.format == OutputFormat::Text {
        println!("Conformance PASSED.");
    }
    Ok(())
}
