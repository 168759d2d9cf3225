//! Sourcefix CLI - Main entry point.
//!
//! Runs the built-in rewrite rules over a directory of generated UI sources
//! and prints one line per changed file plus a final count.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use sourcefix_cli::cli::{Cli, dispatch_command, init_logging};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);
    dispatch_command(cli)
}
