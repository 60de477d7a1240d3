//! # Registry
//!
//! An in-memory store mapping generated identifiers to registered values,
//! with optional human-readable aliases. Unlike a cache it has no eviction
//! or expiry; it is a shared associative store for long-lived components.
//!
//! Registries are plain values: construct one, share it behind an `Arc`,
//! and hand it to whatever needs it. There is deliberately no process-wide
//! default instance, which keeps test isolation trivial.

pub mod error;
pub mod registerable;
pub mod registry;

pub use error::{RegistryError, Result};
pub use registerable::Registerable;
pub use registry::{EntryId, Registry};
