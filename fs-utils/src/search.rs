//! File searching by name pattern and by content.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Find files whose name matches a glob pattern.
///
/// Searches `directory`, recursively unless `recursive` is false. With
/// `case_sensitive` false both pattern and file names are lowercased
/// before matching.
pub fn find_files_by_name(
    directory: impl AsRef<Path>,
    pattern: &str,
    recursive: bool,
    case_sensitive: bool,
) -> Result<Vec<PathBuf>> {
    let pattern = if case_sensitive {
        glob::Pattern::new(pattern)?
    } else {
        glob::Pattern::new(&pattern.to_lowercase())?
    };

    let mut matches = Vec::new();
    for entry in walker(directory.as_ref(), recursive) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let candidate = if case_sensitive { name.to_string() } else { name.to_lowercase() };
        if pattern.matches(&candidate) {
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

/// Find files containing `needle`.
///
/// `file_pattern` optionally restricts which file names are read.
/// Unreadable or non-text files are skipped with a debug log, mirroring
/// ordinary search-tool behavior rather than failing the whole scan.
pub fn find_files_by_content(
    directory: impl AsRef<Path>,
    needle: &str,
    file_pattern: Option<&str>,
    recursive: bool,
    case_sensitive: bool,
) -> Result<Vec<PathBuf>> {
    let file_pattern = file_pattern.map(glob::Pattern::new).transpose()?;
    let needle = if case_sensitive { needle.to_string() } else { needle.to_lowercase() };

    let mut matches = Vec::new();
    for entry in walker(directory.as_ref(), recursive) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(pattern) = &file_pattern {
            if !pattern.matches(&entry.file_name().to_string_lossy()) {
                continue;
            }
        }

        let content = match std::fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                debug!("could not read {}: {e}", entry.path().display());
                continue;
            }
        };
        let haystack = if case_sensitive { content } else { content.to_lowercase() };
        if haystack.contains(&needle) {
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

fn walker(directory: &Path, recursive: bool) -> walkdir::IntoIter {
    let walk = if recursive { WalkDir::new(directory) } else { WalkDir::new(directory).max_depth(1) };
    walk.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("alpha.rs"), "fn alpha() {}").unwrap();
        fs::write(dir.path().join("Beta.RS"), "fn beta() {}").unwrap();
        fs::write(dir.path().join("sub/gamma.rs"), "fn gamma() { alpha(); }").unwrap();
        fs::write(dir.path().join("notes.md"), "about alpha").unwrap();
        dir
    }

    #[test]
    fn name_search_is_case_sensitive_by_default() {
        let dir = fixture();
        let found = find_files_by_name(dir.path(), "*.rs", true, true).unwrap();
        let mut names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["alpha.rs", "gamma.rs"]);
    }

    #[test]
    fn name_search_can_ignore_case() {
        let dir = fixture();
        let found = find_files_by_name(dir.path(), "*.rs", true, false).unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn name_search_can_stay_shallow() {
        let dir = fixture();
        let found = find_files_by_name(dir.path(), "*.rs", false, true).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("alpha.rs"));
    }

    #[test]
    fn content_search_honors_file_pattern() {
        let dir = fixture();
        let found =
            find_files_by_content(dir.path(), "alpha", Some("*.rs"), true, true).unwrap();
        let mut names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["alpha.rs", "gamma.rs"]);
    }

    #[test]
    fn content_search_can_ignore_case() {
        let dir = fixture();
        let found = find_files_by_content(dir.path(), "ALPHA", None, true, false).unwrap();
        assert_eq!(found.len(), 3);
    }
}
