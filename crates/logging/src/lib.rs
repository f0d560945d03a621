#![warn(missing_docs)]

//! Shared logging helpers and CLI argument definitions for the wavetray
//! workspace: a [`LogArgs`] group for clap, filter-spec computation scoped to
//! our crates, and subscriber installation.

use std::env;

use clap::Args;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging controls for the CLI.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "hotkeys=trace,prefs=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        "wavetray",
        "wavetray_protocol",
        "prefs",
        "hotkeys",
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of our
/// crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(args: &LogArgs) -> String {
    if let Some(spec) = &args.log_filter {
        return spec.clone();
    }
    if args.trace {
        return level_spec_for("trace");
    }
    if args.debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = &args.log_level {
        return level_spec_for(lvl);
    }
    env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
}

/// Install the process-wide subscriber: env filter from `args` plus compact
/// fmt output without timestamps. Safe to call more than once; later calls
/// are ignored.
pub fn init(args: &LogArgs) {
    let spec = compute_spec(args);
    tracing_subscriber::registry()
        .with(EnvFilter::new(spec))
        .with(fmt::layer().without_time())
        .try_init()
        .ok();
}
