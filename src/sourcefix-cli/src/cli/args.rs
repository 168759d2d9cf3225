//! CLI argument structures and parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Sourcefix - patch known unsafe shapes in generated UI sources
///
/// If no subcommand is specified, runs every enabled rule over the
/// configured root.
#[derive(Parser, Debug)]
#[command(name = "sourcefix")]
#[command(author, version)]
#[command(about = "Patch known unsafe shapes in generated UI sources", long_about = None)]
pub struct Cli {
    /// Config file (default: ./sourcefix.toml when present)
    #[arg(long = "config", short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Enable trace-level logging for debugging
    #[arg(long = "trace", global = true)]
    pub trace: bool,

    /// Log level for diagnostics written to stderr
    #[arg(long = "log-level", global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Effective log level: `--trace`, then `--verbose`, then
    /// `SOURCEFIX_LOG_LEVEL`, then `--log-level`.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.trace {
            LogLevel::Trace
        } else if self.verbose {
            LogLevel::Debug
        } else if let Ok(env_level) = std::env::var("SOURCEFIX_LOG_LEVEL") {
            LogLevel::from_str_loose(&env_level).unwrap_or(self.log_level)
        } else {
            self.log_level
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite matching files in place (default)
    Run(RunArgs),

    /// Report files that would change without writing; exits 1 if any would
    Check(RunArgs),

    /// List the built-in rules in application order
    Rules,
}

/// Arguments shared by `run` and `check`.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Directory to scan (default: `root` from config, else the current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// File-name glob selecting candidate files
    #[arg(long = "glob", short = 'g', value_name = "PATTERN")]
    pub glob: Option<String>,

    /// Descend into subdirectories
    #[arg(long = "recursive", short = 'r')]
    pub recursive: bool,

    /// Report what would change without writing
    #[arg(long = "dry-run", short = 'n')]
    pub dry_run: bool,

    /// Only apply these rules (repeatable)
    #[arg(long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,
}
