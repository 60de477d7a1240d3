//! Size and content inspection.

use std::path::Path;

use tokio::fs;
use walkdir::WalkDir;

use crate::error::{FsError, Result};

/// Size of a file in bytes.
pub async fn file_size(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).await.map_err(|e| not_found_or_io(path, e))?;
    Ok(metadata.len())
}

/// Total size of a directory's files in bytes, recursively.
pub fn dir_size(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FsError::NotFound(path.display().to_string()));
    }

    let mut total = 0;
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

/// Read a file's contents as a string.
pub async fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).await.map_err(|e| not_found_or_io(path, e))
}

fn not_found_or_io(path: &Path, error: std::io::Error) -> FsError {
    if error.kind() == std::io::ErrorKind::NotFound {
        FsError::NotFound(path.display().to_string())
    } else {
        FsError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_size_reports_bytes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.bin");
        fs::write(&file, vec![0u8; 1234]).await.unwrap();

        assert_eq!(file_size(&file).await.unwrap(), 1234);
    }

    #[tokio::test]
    async fn file_size_distinguishes_missing_paths() {
        let dir = TempDir::new().unwrap();
        let result = file_size(dir.path().join("missing")).await;
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }

    #[tokio::test]
    async fn dir_size_sums_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).await.unwrap();
        fs::write(dir.path().join("a/one.bin"), vec![0u8; 100]).await.unwrap();
        fs::write(dir.path().join("a/b/two.bin"), vec![0u8; 50]).await.unwrap();

        assert_eq!(dir_size(dir.path()).unwrap(), 150);
    }

    #[tokio::test]
    async fn read_to_string_round_trips() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("note.txt");
        fs::write(&file, "hello").await.unwrap();

        assert_eq!(read_to_string(&file).await.unwrap(), "hello");
        assert!(matches!(
            read_to_string(dir.path().join("absent")).await,
            Err(FsError::NotFound(_))
        ));
    }
}
