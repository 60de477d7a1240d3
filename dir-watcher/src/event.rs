//! Change events and debounced batches.

use std::collections::HashSet;
use std::collections::hash_set;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Kind of file system change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Path was created.
    Created,

    /// Path contents or metadata were modified.
    Modified,

    /// Path was deleted.
    Deleted,
}

impl ChangeKind {
    /// Map a raw `notify` event kind onto a change kind.
    ///
    /// Access events and unclassified events carry no content change and
    /// map to `None`, dropping them from the pipeline. Rename halves map to
    /// the delete/create pair they amount to.
    pub fn from_notify(kind: &notify::EventKind) -> Option<Self> {
        use notify::EventKind;
        use notify::event::{ModifyKind, RenameMode};

        match kind {
            EventKind::Create(_) => Some(Self::Created),
            EventKind::Remove(_) => Some(Self::Deleted),
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some(Self::Deleted),
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(Self::Created),
            EventKind::Modify(ModifyKind::Name(_)) => Some(Self::Modified),
            EventKind::Modify(_) => Some(Self::Modified),
            EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
        }
    }
}

/// A single `(kind, path)` change observed in a watched directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEvent {
    kind: ChangeKind,
    path: PathBuf,
}

impl ChangeEvent {
    /// Create a new change event.
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self { kind, path: path.into() }
    }

    /// The kind of change.
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// The affected path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A set of change events delivered together after debounce aggregation.
///
/// Batches are transient: the observer produces one per debounce window and
/// the processor consumes it exactly once. Set semantics mean a path that
/// changed the same way several times inside one window appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    events: HashSet<ChangeEvent>,
}

impl ChangeBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the batch.
    pub fn insert(&mut self, event: ChangeEvent) {
        self.events.insert(event);
    }

    /// Whether the batch contains `event`.
    pub fn contains(&self, event: &ChangeEvent) -> bool {
        self.events.contains(event)
    }

    /// Number of distinct events in the batch.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the batch holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over the events.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.events.iter()
    }

    /// Keep only events satisfying `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&ChangeEvent) -> bool) {
        self.events.retain(keep);
    }
}

impl FromIterator<ChangeEvent> for ChangeBatch {
    fn from_iter<I: IntoIterator<Item = ChangeEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}

impl IntoIterator for ChangeBatch {
    type Item = ChangeEvent;
    type IntoIter = hash_set::IntoIter<ChangeEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeBatch {
    type Item = &'a ChangeEvent;
    type IntoIter = hash_set::Iter<'a, ChangeEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind, RenameMode};
    use pretty_assertions::assert_eq;

    #[test]
    fn notify_kinds_map_to_change_kinds() {
        assert_eq!(
            ChangeKind::from_notify(&EventKind::Create(CreateKind::File)),
            Some(ChangeKind::Created)
        );
        assert_eq!(
            ChangeKind::from_notify(&EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            Some(ChangeKind::Modified)
        );
        assert_eq!(
            ChangeKind::from_notify(&EventKind::Remove(RemoveKind::File)),
            Some(ChangeKind::Deleted)
        );
    }

    #[test]
    fn rename_halves_map_to_delete_and_create() {
        assert_eq!(
            ChangeKind::from_notify(&EventKind::Modify(ModifyKind::Name(RenameMode::From))),
            Some(ChangeKind::Deleted)
        );
        assert_eq!(
            ChangeKind::from_notify(&EventKind::Modify(ModifyKind::Name(RenameMode::To))),
            Some(ChangeKind::Created)
        );
    }

    #[test]
    fn access_events_are_dropped() {
        assert_eq!(ChangeKind::from_notify(&EventKind::Access(AccessKind::Read)), None);
        assert_eq!(ChangeKind::from_notify(&EventKind::Any), None);
    }

    #[test]
    fn batch_deduplicates_identical_events() {
        let mut batch = ChangeBatch::new();
        batch.insert(ChangeEvent::new(ChangeKind::Modified, "/tmp/a.txt"));
        batch.insert(ChangeEvent::new(ChangeKind::Modified, "/tmp/a.txt"));
        batch.insert(ChangeEvent::new(ChangeKind::Deleted, "/tmp/a.txt"));

        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn batch_retain_filters_events() {
        let mut batch: ChangeBatch = [
            ChangeEvent::new(ChangeKind::Created, "/tmp/a.txt"),
            ChangeEvent::new(ChangeKind::Created, "/tmp/b.txt"),
        ]
        .into_iter()
        .collect();

        batch.retain(|event| event.path() == Path::new("/tmp/a.txt"));
        assert_eq!(batch.len(), 1);
        assert!(batch.contains(&ChangeEvent::new(ChangeKind::Created, "/tmp/a.txt")));
    }
}
