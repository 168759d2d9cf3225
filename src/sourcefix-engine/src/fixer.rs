//! Run orchestration: enumerate, rewrite, write back, report.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::FixConfig;
use crate::enumerate::{FileFilter, enumerate};
use crate::error::{FixError, FixResult};
use crate::report::{FileReport, RuleHit, RunReport};
use crate::ruleset::RuleSet;
use crate::writer::atomic_write;

/// A file opened for processing. Lives only for one file's step.
#[derive(Debug)]
struct FileRecord {
    path: PathBuf,
    original: String,
    working: String,
    hits: Vec<RuleHit>,
}

impl FileRecord {
    fn open(path: PathBuf) -> FixResult<Self> {
        let original = fs::read_to_string(&path).map_err(|e| FixError::read(&path, e))?;
        Ok(Self {
            working: original.clone(),
            original,
            path,
            hits: Vec::new(),
        })
    }

    fn rewrite(mut self, rules: &RuleSet) -> Self {
        let rewrite = rules.apply(&self.working);
        self.working = rewrite.content;
        self.hits = rewrite.hits;
        self
    }

    fn changed(&self) -> bool {
        self.working.as_bytes() != self.original.as_bytes()
    }
}

/// Applies a rule set to every candidate file under a root.
///
/// Files are processed one at a time in enumeration order. A failure in one
/// file is recorded in the report and never stops the run.
#[derive(Debug)]
pub struct Fixer {
    rules: RuleSet,
    filter: FileFilter,
    dry_run: bool,
}

impl Fixer {
    pub fn new(rules: RuleSet, filter: FileFilter) -> Self {
        Self {
            rules,
            filter,
            dry_run: false,
        }
    }

    /// Built-in rules narrowed by `enabled_rules`, or else minus
    /// `disabled_rules`, with the configured filter.
    pub fn from_config(config: &FixConfig) -> FixResult<Self> {
        let rules = RuleSet::builtin(&config.rules)?;
        let rules = if config.enabled_rules.is_empty() {
            rules.without(&config.disabled_rules)?
        } else {
            rules.select(&config.enabled_rules)?
        };
        let filter = FileFilter::new(&config.glob, config.recursive)?;
        Ok(Self::new(rules, filter).dry_run(config.dry_run))
    }

    /// Compute outcomes without writing anything.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Process every candidate under `root`.
    ///
    /// Only a missing root fails the whole run; every per-file problem becomes
    /// an error entry in the returned report.
    pub fn run(&self, root: &Path) -> FixResult<RunReport> {
        let files = enumerate(root, &self.filter)?;
        info!(
            "Fixing {} under {} with {} rule(s){}",
            self.filter.glob(),
            root.display(),
            self.rules.len(),
            if self.dry_run { " (dry run)" } else { "" }
        );

        let entries = files
            .map(|entry| match entry {
                Ok(path) => self.process(path),
                Err(err) => {
                    let path = match &err {
                        FixError::Walk { path, .. } => path.clone(),
                        _ => PathBuf::new(),
                    };
                    warn!("{}", err);
                    FileReport::error(path, err.to_string())
                }
            })
            .collect();
        let report = RunReport::new(entries, self.dry_run);

        info!("Fix run complete: {}", report.summary());
        Ok(report)
    }

    /// Process a single file, converting any failure into an error entry.
    pub fn process(&self, path: PathBuf) -> FileReport {
        match self.fix_file(&path) {
            Ok(Some(hits)) => FileReport::changed(path, hits),
            Ok(None) => FileReport::unchanged(path),
            Err(err) => {
                warn!("{}", err);
                FileReport::error(path, err.to_string())
            }
        }
    }

    /// Returns the rules that fired when the file changed, `None` otherwise.
    fn fix_file(&self, path: &Path) -> FixResult<Option<Vec<RuleHit>>> {
        let record = FileRecord::open(path.to_path_buf())?.rewrite(&self.rules);
        if !record.changed() {
            debug!("Unchanged: {}", record.path.display());
            return Ok(None);
        }

        if self.dry_run {
            debug!("Dry run: would rewrite {}", record.path.display());
        } else {
            atomic_write(&record.path, record.working.as_bytes())
                .map_err(|e| FixError::write(&record.path, e))?;
            debug!("Rewrote {}", record.path.display());
        }
        Ok(Some(record.hits))
    }
}
