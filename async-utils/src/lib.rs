//! # Async Utilities
//!
//! Small bridges between synchronous and asynchronous code: driving a
//! future to completion from blocking contexts, and hosting a long-lived
//! runtime on a background thread so non-cooperative callers (signal
//! handlers, GUI threads, callback-based APIs) can schedule async work.

use std::future::Future;
use std::io;
use std::thread;

use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

/// Drive a future to completion on a fresh current-thread runtime.
///
/// For callers outside any async context. Must not be called from inside a
/// runtime (tokio panics on nested `block_on`).
pub fn run_blocking<F: Future>(future: F) -> io::Result<F::Output> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}

/// A dedicated background thread hosting a long-lived tokio runtime.
///
/// Useful for components that receive events on foreign threads and need
/// somewhere to run async work. Tasks are scheduled through
/// [`handle`](Self::handle) or [`spawn`](Self::spawn); the runtime shuts
/// down when the `BackgroundRuntime` is dropped.
pub struct BackgroundRuntime {
    handle: Handle,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl BackgroundRuntime {
    /// Start the background thread and its runtime.
    pub fn start() -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name("bedrock-background".to_string())
            .spawn(move || {
                debug!("background runtime started");
                // Park the runtime on the shutdown signal; spawned tasks
                // keep running alongside it until then.
                let _ = runtime.block_on(shutdown_rx);
                debug!("background runtime stopped");
            })?;

        Ok(Self {
            handle,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    /// Handle to the background runtime, usable from any thread.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Spawn a future onto the background runtime.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }
}

impl Drop for BackgroundRuntime {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_blocking_returns_the_future_output() {
        let value = run_blocking(async { 2 + 2 }).unwrap();
        assert_eq!(value, 4);
    }

    #[test]
    fn background_runtime_executes_spawned_tasks() {
        let runtime = BackgroundRuntime::start().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();

        runtime.spawn(async move {
            tx.send(21 * 2).ok();
        });

        let result = rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn background_runtime_shuts_down_on_drop() {
        let runtime = BackgroundRuntime::start().unwrap();
        runtime.spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        });

        // Dropping must cancel the sleeping task and join the thread
        // instead of hanging for an hour.
        drop(runtime);
    }
}
