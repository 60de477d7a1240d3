//! # Directory Watcher
//!
//! This crate provides the bedrock toolkit's file system monitoring
//! pipeline: an observer that turns raw file system notifications into
//! debounced change batches, and a processor that filters those batches
//! and hands the survivors to an application-supplied responder.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     Watch Pipeline                             │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ObserverConfig ──► FileSystemObserver ──► ChangeStream        │
//! │        │                                        │              │
//! │        ▼                                        ▼              │
//! │  include/exclude            FileSystemChangeProcessor          │
//! │  + lock file                             │                     │
//! │                                          ▼                     │
//! │                                   ChangeResponder              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Batches are aggregated over a fixed 500 ms debounce window so rapid
//! bursts of writes arrive as one set. Processing is suppressed entirely
//! while a configured lock file is present in any watched directory.

pub mod config;
pub mod error;
pub mod event;
pub mod observer;
pub mod processor;

pub use config::{ObserverConfig, WatchPaths};
pub use error::{Result, WatchError};
pub use event::{ChangeBatch, ChangeEvent, ChangeKind};
pub use observer::{ChangeStream, FileSystemObserver, StopHandle, DEBOUNCE_WINDOW};
pub use processor::{ChangeResponder, FileSystemChangeProcessor};
