//! Command-line and environment configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::solvers::{MemoSolver, OverlapPolicy};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `<restaurant_id> <price>` or `Nil`.
    Text,

    /// A JSON object, or `null` when no restaurant matches.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Solver settings.
#[derive(Debug, Args)]
pub struct SolverConfig {
    /// Whether a requested item may be covered by more than one chosen offering
    #[arg(long, env = "PLATTER_OVERLAP", value_enum, default_value_t = OverlapPolicy::Exact)]
    pub overlap: OverlapPolicy,

    /// Price restaurants concurrently
    #[arg(long, env = "PLATTER_PARALLEL", default_value_t = false)]
    pub parallel: bool,
}

impl SolverConfig {
    /// Build the configured cover solver.
    pub fn solver(&self) -> MemoSolver {
        MemoSolver::new(self.overlap)
    }
}

/// Output settings.
#[derive(Debug, Args)]
pub struct OutputConfig {
    /// Result format (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Print a table of the chosen offerings after the result line
    #[arg(long, default_value_t = false)]
    pub explain: bool,
}

/// Platter configuration
#[derive(Debug, Parser)]
#[command(
    name = "platter",
    about = "Find the cheapest restaurant that serves every requested item",
    long_about = None
)]
pub struct Config {
    /// Path to the menu table (`restaurant_id, price, item, ...`)
    #[arg(env = "MENU_TABLE")]
    pub table: PathBuf,

    /// Requested item names
    pub items: Vec<String>,

    /// Solver settings.
    #[command(flatten)]
    pub solver: SolverConfig,

    /// Output settings.
    #[command(flatten)]
    pub output: OutputConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
