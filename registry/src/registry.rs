//! The registry store.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{RegistryError, Result};

/// Generated identifier for a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

/// A store of values keyed by generated [`EntryId`]s, with optional
/// human-readable aliases.
///
/// Values are handed out as `Arc<T>` clones, so retrieval by identifier and
/// by alias resolve to the identical stored object. A duplicate alias is
/// rejected at registration time rather than silently replacing the
/// previous entry.
#[derive(Debug, Default)]
pub struct Registry<T> {
    entries: RwLock<HashMap<EntryId, Arc<T>>>,
    aliases: RwLock<HashMap<String, EntryId>>,
}

impl<T> Registry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            aliases: RwLock::new(HashMap::new()),
        }
    }

    /// Register a value and return its generated identifier.
    pub async fn register(&self, value: T) -> EntryId {
        let id = EntryId::generate();
        self.entries.write().await.insert(id, Arc::new(value));
        debug!("registered entry {id}");
        id
    }

    /// Register a value under an alias as well as a generated identifier.
    ///
    /// Fails with [`RegistryError::AliasTaken`] if the alias is already in
    /// use; the value is not stored in that case.
    pub async fn register_with_alias(&self, value: T, alias: impl Into<String>) -> Result<EntryId> {
        let alias = alias.into();
        // Lock order: entries before aliases, everywhere.
        let mut entries = self.entries.write().await;
        let mut aliases = self.aliases.write().await;
        if aliases.contains_key(&alias) {
            return Err(RegistryError::AliasTaken(alias));
        }

        let id = EntryId::generate();
        entries.insert(id, Arc::new(value));
        aliases.insert(alias.clone(), id);
        debug!("registered entry {id} with alias '{alias}'");
        Ok(id)
    }

    /// Look up an entry by its identifier.
    pub async fn get(&self, id: &EntryId) -> Result<Arc<T>> {
        self.entries
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Look up an entry by its alias.
    pub async fn get_by_alias(&self, alias: &str) -> Result<Arc<T>> {
        let id = {
            let aliases = self.aliases.read().await;
            aliases
                .get(alias)
                .copied()
                .ok_or_else(|| RegistryError::NotFound(alias.to_string()))?
        };
        self.get(&id).await
    }

    /// Resolve a textual identifier: aliases first, then identifiers.
    pub async fn resolve(&self, identifier: &str) -> Result<Arc<T>> {
        if let Ok(entry) = self.get_by_alias(identifier).await {
            return Ok(entry);
        }
        let id = EntryId::from_str(identifier)
            .map_err(|_| RegistryError::NotFound(identifier.to_string()))?;
        self.get(&id).await
    }

    /// Remove an entry, returning the stored value handle.
    ///
    /// Any aliases pointing at the entry are dropped with it.
    pub async fn remove(&self, id: &EntryId) -> Result<Arc<T>> {
        let removed = self
            .entries
            .write()
            .await
            .remove(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        self.aliases.write().await.retain(|_, target| target != id);
        debug!("removed entry {id}");
        Ok(removed)
    }

    /// All registered identifiers.
    pub async fn ids(&self) -> Vec<EntryId> {
        self.entries.read().await.keys().copied().collect()
    }

    /// All registered aliases.
    pub async fn aliases(&self) -> Vec<String> {
        self.aliases.read().await.keys().cloned().collect()
    }

    /// Number of registered entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the registry holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry and alias.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        self.aliases.write().await.clear();
        debug!("registry cleared");
    }
}
