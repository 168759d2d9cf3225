//! Sourcefix engine - rule-driven patching of generated UI sources.
//!
//! This crate scans a directory of TypeScript/TSX files and rewrites known
//! unsafe or incomplete code shapes into safer equivalents:
//! - Parsing a fetch response before checking its status
//! - Guarding possibly-undefined state arrays
//! - Clearing hard-coded mock data constants
//!
//! Each fix is a [`Rule`]: a regular expression over the whole file content
//! plus a [`Template`] that builds the replacement from the captures. Rules
//! are applied in order by a [`RuleSet`]; every rule is idempotent, so
//! running the tool twice leaves already-fixed files untouched.
//!
//! # Example
//!
//! ```no_run
//! use sourcefix_engine::{FileFilter, Fixer, RuleSet, RulesConfig};
//! use std::path::Path;
//!
//! let rules = RuleSet::builtin(&RulesConfig::default())?;
//! let fixer = Fixer::new(rules, FileFilter::new("*.tsx", false)?);
//! let report = fixer.run(Path::new("src/app/tenant-admin/sections"))?;
//! println!("{}", report.summary());
//! # Ok::<(), sourcefix_engine::FixError>(())
//! ```

mod config;
mod enumerate;
mod error;
mod fixer;
mod report;
mod rule;
mod ruleset;
mod writer;

pub mod rules;

pub use config::{DEFAULT_CONFIG_FILE, FixConfig, RulesConfig};
pub use enumerate::{FileFilter, enumerate};
pub use error::{ConfigError, FixError, FixResult};
pub use fixer::Fixer;
pub use report::{FileOutcome, FileReport, RuleHit, RunReport};
pub use rule::{FixKind, Rule, Template};
pub use ruleset::{Rewrite, RuleSet};
pub use writer::atomic_write;

/// Re-export regex so custom templates can name `Captures`.
pub use regex;
