//! Per-run outcome reporting.

use std::fmt;
use std::path::PathBuf;

/// How many times a rule fired in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub rule: String,
    pub count: usize,
}

/// Outcome for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content was rewritten (or would be, in dry-run mode).
    Changed,
    /// No rule changed the content; nothing was written.
    Unchanged,
    /// Reading, rewriting or writing failed. The file was not modified.
    Error(String),
}

/// Report entry for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
    /// Rules that changed this file, in application order.
    pub hits: Vec<RuleHit>,
}

impl FileReport {
    pub fn changed(path: PathBuf, hits: Vec<RuleHit>) -> Self {
        Self {
            path,
            outcome: FileOutcome::Changed,
            hits,
        }
    }

    pub fn unchanged(path: PathBuf) -> Self {
        Self {
            path,
            outcome: FileOutcome::Unchanged,
            hits: Vec::new(),
        }
    }

    pub fn error(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            outcome: FileOutcome::Error(message.into()),
            hits: Vec::new(),
        }
    }

    /// Short description of the rules applied, e.g. `guard-jsx-map x2`.
    pub fn hits_summary(&self) -> String {
        self.hits
            .iter()
            .map(|hit| {
                if hit.count == 1 {
                    hit.rule.clone()
                } else {
                    format!("{} x{}", hit.rule, hit.count)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Ordered record of per-file outcomes for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunReport {
    pub fn new(files: Vec<FileReport>, dry_run: bool) -> Self {
        Self { files, dry_run }
    }

    pub fn changed(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Changed)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Error(_)))
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Unchanged)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// True when no file failed.
    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    /// One-line count summary.
    pub fn summary(&self) -> String {
        let changed = if self.dry_run {
            "would change"
        } else {
            "changed"
        };
        format!(
            "{} {}, {} unchanged, {} error(s)",
            self.changed_count(),
            changed,
            self.unchanged_count(),
            self.error_count()
        )
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(dry_run: bool) -> RunReport {
        RunReport::new(
            vec![
                FileReport::changed(
                    PathBuf::from("a.tsx"),
                    vec![
                        RuleHit {
                            rule: "guard-jsx-map".to_string(),
                            count: 2,
                        },
                        RuleHit {
                            rule: "guard-length-check".to_string(),
                            count: 1,
                        },
                    ],
                ),
                FileReport::unchanged(PathBuf::from("b.tsx")),
                FileReport::error(PathBuf::from("c.tsx"), "Failed to read"),
            ],
            dry_run,
        )
    }

    #[test]
    fn test_counts_and_summary() {
        let report = report(false);
        assert_eq!(report.changed_count(), 1);
        assert_eq!(report.unchanged_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert!(!report.is_success());
        assert_eq!(report.summary(), "1 changed, 1 unchanged, 1 error(s)");
    }

    #[test]
    fn test_dry_run_summary() {
        assert_eq!(
            report(true).to_string(),
            "1 would change, 1 unchanged, 1 error(s)"
        );
    }

    #[test]
    fn test_hits_summary() {
        let report = report(false);
        assert_eq!(
            report.files[0].hits_summary(),
            "guard-jsx-map x2, guard-length-check"
        );
    }
}
