//! Sourcefix CLI library module.
//!
//! - `cli/` - argument parsing, logging setup and command dispatch

pub mod cli;
