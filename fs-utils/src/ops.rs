//! Copy, create, remove, and rename operations.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{FsError, Result};

/// Create a directory (and any missing parents), succeeding if it already
/// exists.
pub async fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    fs::create_dir_all(path.as_ref()).await?;
    Ok(())
}

/// Remove a directory and all its contents.
///
/// With `ignore_errors`, removal failures (including a missing directory)
/// are logged and swallowed.
pub async fn remove_dir(path: impl AsRef<Path>, ignore_errors: bool) -> Result<()> {
    let path = path.as_ref();
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if ignore_errors => {
            debug!("ignoring error removing {}: {e}", path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Create `path` as an empty directory.
///
/// Fails with [`FsError::DestinationExists`] when the path exists, unless
/// `overwrite` is set, in which case the existing tree is removed first.
pub async fn create_dir_fresh(path: impl AsRef<Path>, overwrite: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        if !overwrite {
            return Err(FsError::DestinationExists(path.display().to_string()));
        }
        remove_dir(path, false).await?;
    }
    ensure_dir(path).await?;
    Ok(path.to_path_buf())
}

/// Copy a single file, creating the destination's parent directories.
///
/// Fails with [`FsError::SourceNotFound`] when the source is missing and
/// [`FsError::DestinationExists`] when the destination exists and
/// `overwrite` is not set.
pub async fn copy_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    overwrite: bool,
) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if !source.exists() {
        return Err(FsError::SourceNotFound(source.display().to_string()));
    }
    if destination.exists() && !overwrite {
        return Err(FsError::DestinationExists(destination.display().to_string()));
    }
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).await?;
    }

    fs::copy(source, destination).await?;
    Ok(())
}

/// Copy a directory tree into `destination`, merging with anything already
/// there.
///
/// Entries whose file name matches any of `ignore_patterns` (glob syntax)
/// are skipped, directories along with their whole subtree.
pub async fn copy_dir(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    ignore_patterns: &[&str],
) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if !source.exists() {
        return Err(FsError::SourceNotFound(source.display().to_string()));
    }

    let ignored: Vec<glob::Pattern> = ignore_patterns
        .iter()
        .map(|p| glob::Pattern::new(p))
        .collect::<std::result::Result<_, _>>()?;

    let walker = WalkDir::new(source).into_iter().filter_entry(|entry| {
        let name = entry.file_name().to_string_lossy();
        !ignored.iter().any(|pattern| pattern.matches(&name))
    });

    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).await?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::copy(entry.path(), &target).await?;
        }
    }

    Ok(())
}

/// Copy a file or a directory, dispatching on what the source is.
pub async fn copy_path(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    overwrite: bool,
    ignore_patterns: &[&str],
) -> Result<()> {
    let source = source.as_ref();
    if !source.exists() {
        return Err(FsError::SourceNotFound(source.display().to_string()));
    }

    if source.is_file() {
        copy_file(source, destination, overwrite).await
    } else {
        copy_dir(source, destination, ignore_patterns).await
    }
}

/// Rename a subdirectory of `parent` from `old_name` to `new_name`.
///
/// Prefers an atomic rename; when that fails (e.g. across mount points) it
/// falls back to copy-then-remove, cleaning up a partial destination on
/// failure as best it can.
pub async fn rename_subdir(
    parent: impl AsRef<Path>,
    old_name: &str,
    new_name: &str,
    overwrite: bool,
) -> Result<()> {
    let parent = parent.as_ref();
    let old_path = parent.join(old_name);
    let new_path = parent.join(new_name);

    if !old_path.exists() {
        return Err(FsError::SourceNotFound(old_path.display().to_string()));
    }
    if new_path.exists() {
        if !overwrite {
            return Err(FsError::DestinationExists(new_path.display().to_string()));
        }
        remove_dir(&new_path, false).await?;
    }
    if let Some(target_parent) = new_path.parent() {
        fs::create_dir_all(target_parent).await?;
    }

    match fs::rename(&old_path, &new_path).await {
        Ok(()) => Ok(()),
        Err(rename_error) => {
            debug!(
                "rename {} -> {} failed ({rename_error}), copying instead",
                old_path.display(),
                new_path.display()
            );
            if let Err(copy_error) = copy_dir(&old_path, &new_path, &[]).await {
                if new_path.exists() {
                    if let Err(cleanup_error) = remove_dir(&new_path, false).await {
                        warn!(
                            "could not clean up partial copy at {}: {cleanup_error}",
                            new_path.display()
                        );
                    }
                }
                return Err(copy_error);
            }
            remove_dir(&old_path, false).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn copy_file_requires_existing_source() {
        let dir = TempDir::new().unwrap();
        let result = copy_file(dir.path().join("missing"), dir.path().join("out"), false).await;
        assert!(matches!(result, Err(FsError::SourceNotFound(_))));
    }

    #[tokio::test]
    async fn copy_file_refuses_existing_destination_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, b"new").await.unwrap();
        fs::write(&dst, b"old").await.unwrap();

        let result = copy_file(&src, &dst, false).await;
        assert!(matches!(result, Err(FsError::DestinationExists(_))));

        copy_file(&src, &dst, true).await.unwrap();
        assert_eq!(fs::read(&dst).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn copy_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("a/b/c/dst.txt");
        fs::write(&src, b"payload").await.unwrap();

        copy_file(&src, &dst, false).await.unwrap();
        assert_eq!(fs::read(&dst).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn copy_dir_skips_ignored_subtrees() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("keep")).await.unwrap();
        fs::create_dir_all(src.join("node_modules/dep")).await.unwrap();
        fs::write(src.join("keep/a.txt"), b"a").await.unwrap();
        fs::write(src.join("node_modules/dep/b.txt"), b"b").await.unwrap();
        fs::write(src.join("notes.log"), b"log").await.unwrap();

        let dst = dir.path().join("dst");
        copy_dir(&src, &dst, &["node_modules", "*.log"]).await.unwrap();

        assert!(dst.join("keep/a.txt").exists());
        assert!(!dst.join("node_modules").exists());
        assert!(!dst.join("notes.log").exists());
    }

    #[tokio::test]
    async fn copy_dir_merges_into_existing_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(&src).await.unwrap();
        fs::create_dir_all(&dst).await.unwrap();
        fs::write(src.join("new.txt"), b"new").await.unwrap();
        fs::write(dst.join("old.txt"), b"old").await.unwrap();

        copy_dir(&src, &dst, &[]).await.unwrap();
        assert!(dst.join("new.txt").exists());
        assert!(dst.join("old.txt").exists());
    }

    #[tokio::test]
    async fn create_dir_fresh_honors_overwrite() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("project");
        fs::create_dir_all(&target).await.unwrap();
        fs::write(target.join("stale.txt"), b"stale").await.unwrap();

        let result = create_dir_fresh(&target, false).await;
        assert!(matches!(result, Err(FsError::DestinationExists(_))));

        create_dir_fresh(&target, true).await.unwrap();
        assert!(target.exists());
        assert!(!target.join("stale.txt").exists());
    }

    #[tokio::test]
    async fn rename_subdir_moves_contents() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("old/inner")).await.unwrap();
        fs::write(dir.path().join("old/inner/f.txt"), b"f").await.unwrap();

        rename_subdir(dir.path(), "old", "new", false).await.unwrap();
        assert!(!dir.path().join("old").exists());
        assert!(dir.path().join("new/inner/f.txt").exists());
    }

    #[tokio::test]
    async fn rename_subdir_refuses_occupied_destination() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("old")).await.unwrap();
        fs::create_dir_all(dir.path().join("new")).await.unwrap();

        let result = rename_subdir(dir.path(), "old", "new", false).await;
        assert!(matches!(result, Err(FsError::DestinationExists(_))));

        rename_subdir(dir.path(), "old", "new", true).await.unwrap();
        assert!(dir.path().join("new").exists());
    }

    #[tokio::test]
    async fn remove_dir_can_ignore_missing_targets() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        assert!(remove_dir(&missing, false).await.is_err());
        remove_dir(&missing, true).await.unwrap();
    }
}
