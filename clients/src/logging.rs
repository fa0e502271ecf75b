//! Tracing setup for the binaries.
//!
//! Output format is picked by `VMGEN_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `json`: one JSON object per event
//!
//! ```bash
//! VMGEN_LOG=debug vmgen --input graph.json --out obj/generated
//! VMGEN_LOG="vmgen_codegen::resolve=trace" VMGEN_LOG_FORMAT=json vmgen --input graph.json
//! ```
//!
//! Nothing is installed unless `VMGEN_LOG` or `RUST_LOG` is set. All output
//! goes to stderr; stdout carries diagnostics and reports.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flat text lines.
    Text,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parses a `VMGEN_LOG_FORMAT` value. Anything unrecognised is text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("VMGEN_LOG_FORMAT").unwrap_or_default())
    }
}

/// `VMGEN_LOG` wins over `RUST_LOG`; both use the `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("VMGEN_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Installs the global subscriber when logging was requested.
pub fn init_tracing() {
    let requested = std::env::var("VMGEN_LOG").is_ok() || std::env::var("RUST_LOG").is_ok();
    if !requested {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
