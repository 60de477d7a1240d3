//! File system observer: raw notifications in, debounced batches out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout};
use tracing::{debug, error};

use crate::config::ObserverConfig;
use crate::error::{Result, WatchError};
use crate::event::{ChangeBatch, ChangeEvent, ChangeKind};

/// How long events are aggregated before a batch is delivered.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// How often the batch pump wakes to notice a stop request while idle.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Buffered batches between the pump task and the consumer.
const BATCH_CHANNEL_CAPACITY: usize = 16;

/// Observes a set of directories and yields debounced change batches.
///
/// Each [`observe`](Self::observe) call starts a fresh underlying watcher
/// and returns an independent [`ChangeStream`], so observation is
/// restartable per call. [`stop`](Self::stop) is cooperative: it sets a
/// flag checked at the top of each debounce iteration.
pub struct FileSystemObserver {
    config: Arc<ObserverConfig>,
    observing: Arc<AtomicBool>,
}

impl FileSystemObserver {
    /// Create an observer for the given configuration.
    pub fn new(config: ObserverConfig) -> Self {
        Self {
            config: Arc::new(config),
            observing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The observer's configuration.
    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Whether the configured lock file currently exists in at least one
    /// watched directory. Always false when no lock file is configured.
    pub fn is_lock_file_present(&self) -> bool {
        self.config.lock_file_paths().iter().any(|path| path.exists())
    }

    /// Request that observation end.
    ///
    /// Best-effort, not immediate: the stream finishes its current
    /// iteration before terminating.
    pub fn stop(&self) {
        self.observing.store(false, Ordering::SeqCst);
    }

    /// A clonable handle that can stop this observer from another task.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            observing: Arc::clone(&self.observing),
        }
    }

    /// Start watching and return a lazy, infinite stream of change batches.
    ///
    /// Events are aggregated over [`DEBOUNCE_WINDOW`] and filtered through
    /// the configuration's include/exclude patterns; only non-empty batches
    /// are delivered. The stream ends when [`stop`](Self::stop) is called,
    /// when it is dropped, or when the underlying watcher reports an error,
    /// in which case the error is logged and yielded as the final item.
    pub fn observe(&self) -> Result<ChangeStream> {
        for dir in self.config.directories() {
            if !dir.exists() {
                return Err(WatchError::DirectoryNotFound(dir.display().to_string()));
            }
            if !dir.is_dir() {
                return Err(WatchError::NotADirectory(dir.display().to_string()));
            }
        }

        self.observing.store(true, Ordering::SeqCst);

        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| {
                let _ = raw_tx.send(res);
            },
        )?;

        for dir in self.config.directories() {
            watcher.watch(dir, RecursiveMode::Recursive)?;
            debug!("watching {}", dir.display());
        }

        let (batch_tx, batch_rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);
        tokio::spawn(pump_batches(
            Arc::clone(&self.config),
            Arc::clone(&self.observing),
            raw_rx,
            batch_tx,
        ));

        Ok(ChangeStream {
            batches: batch_rx,
            _watcher: watcher,
        })
    }
}

/// Stops a [`FileSystemObserver`] from another task.
#[derive(Clone)]
pub struct StopHandle {
    observing: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request that observation end; same semantics as
    /// [`FileSystemObserver::stop`].
    pub fn stop(&self) {
        self.observing.store(false, Ordering::SeqCst);
    }
}

/// A sequence of debounced change batches produced by one
/// [`FileSystemObserver::observe`] call.
///
/// Dropping the stream tears down the underlying watcher.
pub struct ChangeStream {
    batches: mpsc::Receiver<Result<ChangeBatch>>,
    _watcher: RecommendedWatcher,
}

impl ChangeStream {
    /// Wait for the next batch.
    ///
    /// Suspends the calling task until a batch is ready. Returns `None`
    /// once observation has stopped; an `Err` item is the final one.
    pub async fn next_batch(&mut self) -> Option<Result<ChangeBatch>> {
        self.batches.recv().await
    }
}

type RawReceiver = mpsc::UnboundedReceiver<std::result::Result<notify::Event, notify::Error>>;

/// Aggregates raw watcher events into debounced batches.
async fn pump_batches(
    config: Arc<ObserverConfig>,
    observing: Arc<AtomicBool>,
    mut raw_rx: RawReceiver,
    batch_tx: mpsc::Sender<Result<ChangeBatch>>,
) {
    'pump: loop {
        // Wait for the first event of the next window, waking periodically
        // so a stop request does not sit unnoticed behind a quiet watch.
        let first = loop {
            if !observing.load(Ordering::SeqCst) {
                break 'pump;
            }
            match timeout(STOP_POLL_INTERVAL, raw_rx.recv()).await {
                Ok(Some(res)) => break res,
                Ok(None) => break 'pump,
                Err(_) => continue,
            }
        };

        let mut batch = ChangeBatch::new();
        let mut failure = None;
        match first {
            Ok(event) => absorb_event(&config, &mut batch, event),
            Err(e) => failure = Some(e),
        }

        if failure.is_none() {
            let deadline = Instant::now() + DEBOUNCE_WINDOW;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                match timeout(remaining, raw_rx.recv()).await {
                    Ok(Some(Ok(event))) => absorb_event(&config, &mut batch, event),
                    Ok(Some(Err(e))) => {
                        failure = Some(e);
                        break;
                    }
                    Ok(None) => break,
                    Err(_) => break,
                }
            }
        }

        if let Some(e) = failure {
            error!("error observing directories: {e}");
            let _ = batch_tx.send(Err(WatchError::Notify(e))).await;
            break;
        }

        if !batch.is_empty() && batch_tx.send(Ok(batch)).await.is_err() {
            break;
        }
    }

    observing.store(false, Ordering::SeqCst);
}

/// Fold one raw watcher event into the current batch, applying the
/// configuration's include/exclude patterns.
fn absorb_event(config: &ObserverConfig, batch: &mut ChangeBatch, event: notify::Event) {
    // A single rename event carrying both halves becomes the delete/create
    // pair it amounts to.
    if matches!(event.kind, EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
        && event.paths.len() == 2
    {
        let mut paths = event.paths.into_iter();
        if let (Some(from), Some(to)) = (paths.next(), paths.next()) {
            if config.matches(&from) {
                batch.insert(ChangeEvent::new(ChangeKind::Deleted, from));
            }
            if config.matches(&to) {
                batch.insert(ChangeEvent::new(ChangeKind::Created, to));
            }
        }
        return;
    }

    let Some(kind) = ChangeKind::from_notify(&event.kind) else {
        return;
    };
    for path in event.paths {
        if config.matches(&path) {
            batch.insert(ChangeEvent::new(kind, path));
        }
    }
}
