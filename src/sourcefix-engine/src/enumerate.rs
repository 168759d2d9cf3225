//! Candidate file enumeration.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::error::{FixError, FixResult};

/// Directories never descended into when walking recursively.
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "build", "out", "coverage"];

/// Which files under the root are candidates.
#[derive(Debug, Clone)]
pub struct FileFilter {
    pattern: Pattern,
    recursive: bool,
}

impl FileFilter {
    /// Build a filter from a file-name glob such as `*.tsx`.
    pub fn new(glob: &str, recursive: bool) -> FixResult<Self> {
        let pattern = Pattern::new(glob).map_err(|source| FixError::InvalidGlob {
            pattern: glob.to_string(),
            source,
        })?;
        Ok(Self { pattern, recursive })
    }

    pub fn glob(&self) -> &str {
        self.pattern.as_str()
    }

    fn matches(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.pattern.matches(name))
    }
}

/// Lazily enumerate candidate files under `root` in lexical order.
///
/// Fails up front with [`FixError::NotFound`] when `root` is not an existing
/// directory. Entries that cannot be read while walking are yielded as
/// [`FixError::Walk`] items so the caller can report them per entry.
pub fn enumerate(
    root: &Path,
    filter: &FileFilter,
) -> FixResult<impl Iterator<Item = FixResult<PathBuf>> + use<>> {
    if !root.is_dir() {
        return Err(FixError::not_found(root));
    }

    let max_depth = if filter.recursive { usize::MAX } else { 1 };
    let filter = filter.clone();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

    Ok(walker.filter_map(move |entry| match entry {
        Ok(entry) if filter.matches(&entry) => Some(Ok(entry.into_path())),
        Ok(_) => None,
        Err(err) => {
            let path = err.path().map(Path::to_path_buf).unwrap_or_default();
            Some(Err(FixError::Walk {
                path,
                message: err.to_string(),
            }))
        }
    }))
}

/// Hidden entries (including our own temp files) and vendor directories.
fn is_skipped(entry: &DirEntry) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name))
}
