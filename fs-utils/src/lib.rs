//! # Filesystem Utilities
//!
//! General-purpose file and directory helpers for the bedrock toolkit:
//! copying with overwrite/ignore control, size inspection, recursive text
//! substitution, and file searching. Failures mirror ordinary file system
//! causes (not found, already exists, I/O) and are reported through
//! [`FsError`]; nothing here retries or recovers on the caller's behalf.

pub mod edit;
pub mod error;
pub mod inspect;
pub mod ops;
pub mod search;

pub use edit::replace_in_files;
pub use error::{FsError, Result};
pub use inspect::{dir_size, file_size, read_to_string};
pub use ops::{
    copy_dir, copy_file, copy_path, create_dir_fresh, ensure_dir, remove_dir, rename_subdir,
};
pub use search::{find_files_by_content, find_files_by_name};
