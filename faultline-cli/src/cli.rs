//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Faultline -- scenario composition for KV-store robustness testing.
///
/// Use `faultline <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "faultline", version, about, long_about = None)]
pub struct Cli {
    /// Path to the faultline.toml configuration file.
    ///
    /// When omitted, defaults and `FAULTLINE_*` environment overrides are used.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Which generator(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suite {
    /// Broad matrix gated on environment capabilities.
    Exploratory,
    /// Fixed historical defect reproductions.
    Regression,
    /// Exploratory followed by regression.
    All,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List generated scenarios.
    List(ListArgs),

    /// Show the full cluster plan of one scenario.
    Show(ShowArgs),

    /// Resolve the randomized axes of one scenario into a concrete cluster.
    Resolve(ResolveArgs),

    /// Report environment capabilities and the installed binary version.
    Probe,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- list ----

/// List scenarios produced by the selected suite.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Generator suite.
    #[arg(long, default_value = "all")]
    pub suite: Suite,
}

// ---- show ----

/// Show one scenario's layers, axes and groups.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Scenario name (e.g. `Kubernetes/LowTraffic/ClusterOfSize1/LazyFS`).
    pub name: String,

    /// Generator suite to search.
    #[arg(long, default_value = "all")]
    pub suite: Suite,
}

// ---- resolve ----

/// Resolve one scenario with a seeded chooser.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Scenario name.
    pub name: String,

    /// Seed for the group chooser (default: derived from the clock and printed).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generator suite to search.
    #[arg(long, default_value = "all")]
    pub suite: Suite,
}

// ---- config ----

/// Manage faultline configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, binaries).
        #[arg(long)]
        section: Option<String>,
    },
}
