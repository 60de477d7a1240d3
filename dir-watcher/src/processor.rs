//! Change processor: filters batches and dispatches them to a responder.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ObserverConfig;
use crate::error::Result;
use crate::event::ChangeBatch;
use crate::observer::{FileSystemObserver, StopHandle};

/// Decides whether and how to react to directory changes.
///
/// Implemented by the calling application, not this crate. The predicate is
/// consulted per event; surviving non-empty batches are handed to the
/// handler. Handler errors propagate to the caller unmodified; there is no
/// retry logic.
#[async_trait]
pub trait ChangeResponder: Send {
    /// Whether a change at `path` is worth processing.
    fn should_process_change(&self, path: &Path) -> bool;

    /// React to a batch of changes that passed filtering.
    async fn handle_directory_change(&mut self, changes: ChangeBatch) -> anyhow::Result<()>;
}

/// Drives a [`FileSystemObserver`] and dispatches surviving batches to a
/// [`ChangeResponder`].
pub struct FileSystemChangeProcessor<R> {
    observer: FileSystemObserver,
    responder: R,
}

impl<R: ChangeResponder> FileSystemChangeProcessor<R> {
    /// Create a processor watching the configured directories.
    pub fn new(config: ObserverConfig, responder: R) -> Self {
        Self {
            observer: FileSystemObserver::new(config),
            responder,
        }
    }

    /// The underlying observer.
    pub fn observer(&self) -> &FileSystemObserver {
        &self.observer
    }

    /// A handle that can stop processing from another task.
    pub fn stop_handle(&self) -> StopHandle {
        self.observer.stop_handle()
    }

    /// Consume the observer's batches until the stream ends.
    ///
    /// Each batch keeps only events that pass the responder's predicate,
    /// are not the lock file itself, and arrive while no lock file is
    /// present; non-empty survivors are dispatched to the responder.
    /// Responder and observer errors end the loop and propagate.
    pub async fn process_changes(&mut self) -> Result<()> {
        let mut stream = self.observer.observe()?;

        while let Some(batch) = stream.next_batch().await {
            let batch = batch?;
            let actionable = actionable_changes(
                batch,
                &self.responder,
                self.observer.config(),
                self.observer.is_lock_file_present(),
            );
            if actionable.is_empty() {
                continue;
            }
            debug!("dispatching {} change(s)", actionable.len());
            self.responder.handle_directory_change(actionable).await?;
        }

        Ok(())
    }

    /// Ask the observer to stop; cooperative, not immediate.
    pub fn stop_observing(&self) {
        self.observer.stop();
    }
}

/// Filter one batch down to the events the responder should see.
///
/// A present lock file suppresses the whole batch; the lock file's own
/// change events are never dispatched.
fn actionable_changes<R: ChangeResponder + ?Sized>(
    batch: ChangeBatch,
    responder: &R,
    config: &ObserverConfig,
    lock_file_present: bool,
) -> ChangeBatch {
    if lock_file_present {
        return ChangeBatch::new();
    }

    batch
        .into_iter()
        .filter(|event| {
            responder.should_process_change(event.path()) && !config.is_lock_file(event.path())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ChangeEvent, ChangeKind};
    use pretty_assertions::assert_eq;

    /// Accepts every path except those containing a configured fragment.
    struct FragmentResponder {
        rejected_fragment: Option<&'static str>,
    }

    impl FragmentResponder {
        fn accept_all() -> Self {
            Self { rejected_fragment: None }
        }

        fn rejecting(fragment: &'static str) -> Self {
            Self { rejected_fragment: Some(fragment) }
        }
    }

    #[async_trait]
    impl ChangeResponder for FragmentResponder {
        fn should_process_change(&self, path: &Path) -> bool {
            match self.rejected_fragment {
                Some(fragment) => !path.to_string_lossy().contains(fragment),
                None => true,
            }
        }

        async fn handle_directory_change(&mut self, _changes: ChangeBatch) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn batch(events: &[(ChangeKind, &str)]) -> ChangeBatch {
        events
            .iter()
            .map(|(kind, path)| ChangeEvent::new(*kind, *path))
            .collect()
    }

    #[test]
    fn lock_file_event_is_always_excluded() {
        let config = ObserverConfig::new("/tmp/proj").with_lock_file("LOCK");
        let responder = FragmentResponder::accept_all();

        let incoming = batch(&[
            (ChangeKind::Modified, "/tmp/proj/a.txt"),
            (ChangeKind::Modified, "/tmp/proj/LOCK"),
        ]);
        let actionable = actionable_changes(incoming, &responder, &config, false);

        assert_eq!(
            actionable,
            batch(&[(ChangeKind::Modified, "/tmp/proj/a.txt")])
        );
    }

    #[test]
    fn present_lock_file_suppresses_the_whole_batch() {
        let config = ObserverConfig::new("/tmp/proj").with_lock_file("LOCK");
        let responder = FragmentResponder::accept_all();

        let incoming = batch(&[
            (ChangeKind::Created, "/tmp/proj/a.txt"),
            (ChangeKind::Deleted, "/tmp/proj/b.txt"),
        ]);
        let actionable = actionable_changes(incoming, &responder, &config, true);

        assert!(actionable.is_empty());
    }

    #[test]
    fn responder_predicate_filters_events() {
        let config = ObserverConfig::new("/tmp/proj");
        let responder = FragmentResponder::rejecting("ignored");

        let incoming = batch(&[
            (ChangeKind::Modified, "/tmp/proj/kept.txt"),
            (ChangeKind::Modified, "/tmp/proj/ignored.txt"),
        ]);
        let actionable = actionable_changes(incoming, &responder, &config, false);

        assert_eq!(
            actionable,
            batch(&[(ChangeKind::Modified, "/tmp/proj/kept.txt")])
        );
    }

    #[test]
    fn no_lock_file_configured_passes_everything_through() {
        let config = ObserverConfig::new("/tmp/proj");
        let responder = FragmentResponder::accept_all();

        let incoming = batch(&[(ChangeKind::Modified, "/tmp/proj/LOCK")]);
        let actionable = actionable_changes(incoming, &responder, &config, false);

        assert_eq!(actionable.len(), 1);
    }
}
