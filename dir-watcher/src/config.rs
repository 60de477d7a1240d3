//! Configuration for the file system observer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a [`FileSystemObserver`](crate::observer::FileSystemObserver).
///
/// Holds the ordered list of directories to watch, include/exclude glob
/// patterns, and an optional lock-file name used to suppress processing
/// while another process is writing into the watched tree.
///
/// The configuration is immutable once constructed: all fields are private
/// and the builder methods consume `self`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Directories to watch, in the order they were supplied.
    directories: Vec<PathBuf>,

    /// Glob patterns a path must match to be reported (empty = all).
    include_patterns: Vec<String>,

    /// Glob patterns that remove a path from reporting.
    exclude_patterns: Vec<String>,

    /// File name whose presence in any watched directory pauses processing.
    lock_file: Option<String>,
}

impl ObserverConfig {
    /// Create a configuration watching one or many directories.
    ///
    /// Accepts a single path or a sequence of paths; either form is
    /// normalized into a uniform list.
    pub fn new(directories: impl Into<WatchPaths>) -> Self {
        Self {
            directories: directories.into().0,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            lock_file: None,
        }
    }

    /// Add an include pattern. Whitespace around the pattern is trimmed.
    pub fn include(mut self, pattern: impl AsRef<str>) -> Self {
        self.include_patterns.push(pattern.as_ref().trim().to_string());
        self
    }

    /// Add an exclude pattern. Whitespace around the pattern is trimmed.
    pub fn exclude(mut self, pattern: impl AsRef<str>) -> Self {
        self.exclude_patterns.push(pattern.as_ref().trim().to_string());
        self
    }

    /// Set the lock-file name.
    pub fn with_lock_file(mut self, name: impl Into<String>) -> Self {
        self.lock_file = Some(name.into());
        self
    }

    /// The watched directories.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// The include patterns.
    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    /// The exclude patterns.
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    /// The configured lock-file name, if any.
    pub fn lock_file(&self) -> Option<&str> {
        self.lock_file.as_deref()
    }

    /// Candidate lock-file locations: `<dir>/<lock name>` for every watched
    /// directory. Empty when no lock file is configured.
    pub fn lock_file_paths(&self) -> Vec<PathBuf> {
        match &self.lock_file {
            Some(name) => self.directories.iter().map(|dir| dir.join(name)).collect(),
            None => Vec::new(),
        }
    }

    /// Whether `path` names the configured lock file.
    pub fn is_lock_file(&self, path: &Path) -> bool {
        match (&self.lock_file, path.file_name()) {
            (Some(name), Some(file_name)) => file_name == std::ffi::OsStr::new(name),
            _ => false,
        }
    }

    /// Whether `path` survives the include/exclude patterns.
    ///
    /// A path passes when the include list is empty or any include glob
    /// matches, and no exclude glob matches. Patterns are tried against
    /// both the full path and the bare file name, so `*.tmp` matches
    /// `/watched/a.tmp`.
    pub fn matches(&self, path: &Path) -> bool {
        let included = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| pattern_matches(p, path));
        let excluded = self.exclude_patterns.iter().any(|p| pattern_matches(p, path));
        included && !excluded
    }
}

fn pattern_matches(pattern: &str, path: &Path) -> bool {
    let Ok(glob) = glob::Pattern::new(pattern) else {
        return false;
    };
    if glob.matches(&path.to_string_lossy()) {
        return true;
    }
    path.file_name()
        .map(|name| glob.matches(&name.to_string_lossy()))
        .unwrap_or(false)
}

/// One-or-many watch paths, normalized into a uniform list.
///
/// Lets [`ObserverConfig::new`] accept a single `&str`/`Path`/`PathBuf` or
/// a sequence of them without separate constructors.
#[derive(Debug, Clone, Default)]
pub struct WatchPaths(pub(crate) Vec<PathBuf>);

impl From<&str> for WatchPaths {
    fn from(path: &str) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl From<String> for WatchPaths {
    fn from(path: String) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl From<&Path> for WatchPaths {
    fn from(path: &Path) -> Self {
        Self(vec![path.to_path_buf()])
    }
}

impl From<PathBuf> for WatchPaths {
    fn from(path: PathBuf) -> Self {
        Self(vec![path])
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for WatchPaths {
    fn from(paths: Vec<P>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl From<&[PathBuf]> for WatchPaths {
    fn from(paths: &[PathBuf]) -> Self {
        Self(paths.to_vec())
    }
}
