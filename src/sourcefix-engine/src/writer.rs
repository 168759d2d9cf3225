//! Atomic write-back of rewritten files.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Write `content` to `path` atomically: write a temp file next to it, then
/// rename over the original. Readers never observe partial content, and on
/// failure the original is left untouched and the temp file removed.
///
/// The original file's permissions are carried over to the new file.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "Path has no file name")
    })?;

    // Same directory, so the rename never crosses filesystems.
    let temp_path = parent.join(format!(
        ".{}.sourcefix.{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));
    let permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let result = write_temp(&temp_path, content, permissions)
        .and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(path: &Path, content: &[u8], permissions: Option<fs::Permissions>) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()?;
    if let Some(permissions) = permissions {
        fs::set_permissions(path, permissions)?;
    }
    Ok(())
}
