//! In-place text substitution across files and directory trees.

use std::path::Path;

use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{FsError, Result};

/// Directory names never descended into during substitution.
const SKIPPED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "target",
    "node_modules",
    ".venv",
    "__pycache__",
];

/// How many leading bytes are sniffed to classify a file as binary.
const BINARY_SNIFF_LEN: usize = 1024;

/// Apply `replacements` (old → new pairs) to every text file under the
/// given paths.
///
/// Each path may be a single file or a directory walked recursively.
/// Version-control and build directories are skipped, as are binary files
/// (NUL byte in the first kilobyte) and files that do not decode as UTF-8.
/// When `extensions` is given, only files with one of those extensions are
/// touched.
///
/// Fails with [`FsError::NotFound`] if any of the paths does not exist.
pub async fn replace_in_files(
    paths: &[impl AsRef<Path>],
    replacements: &[(&str, &str)],
    extensions: Option<&[&str]>,
) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FsError::NotFound(path.display().to_string()));
        }

        if path.is_file() {
            replace_in_file(path, replacements, extensions).await?;
            continue;
        }

        let walker = WalkDir::new(path).into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && SKIPPED_DIRS.contains(&entry.file_name().to_string_lossy().as_ref()))
        });
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                replace_in_file(entry.path(), replacements, extensions).await?;
            }
        }
    }

    Ok(())
}

async fn replace_in_file(
    path: &Path,
    replacements: &[(&str, &str)],
    extensions: Option<&[&str]>,
) -> Result<()> {
    if let Some(extensions) = extensions {
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);
        if !matches {
            return Ok(());
        }
    }

    let bytes = fs::read(path).await?;
    if bytes[..bytes.len().min(BINARY_SNIFF_LEN)].contains(&0) {
        debug!("skipping binary file {}", path.display());
        return Ok(());
    }
    let Ok(content) = String::from_utf8(bytes) else {
        debug!("skipping non-utf8 file {}", path.display());
        return Ok(());
    };

    let mut updated = content.clone();
    for (old, new) in replacements {
        updated = updated.replace(old, new);
    }
    if updated != content {
        fs::write(path, updated).await?;
    }

    Ok(())
}
