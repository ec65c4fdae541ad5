//! Debounced persistence for rapid edits.
//!
//! Every tutorial edit schedules a save. Only the latest scheduled save runs,
//! once edits have been quiet for the delay. A save that already started is
//! never cancelled; saves run one at a time, in the order they fire, so the
//! newest pages are always written last.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Mutex as RunLock;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(400);

struct Pending {
    handle: JoinHandle<()>,
    started: Arc<AtomicBool>,
}

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
    // Held while a task runs; tokio's mutex queues waiters in FIFO order.
    running: Arc<RunLock<()>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
            running: Arc::new(RunLock::new(())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the quiet period, replacing a pending one.
    ///
    /// Must be called within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let started = Arc::new(AtomicBool::new(false));
        let delay = self.delay;
        let flag = started.clone();
        let running = self.running.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _turn = running.lock().await;
            flag.store(true, Ordering::SeqCst);
            task.await;
        });

        let previous = self.pending.lock().replace(Pending { handle, started });
        if let Some(previous) = previous {
            if !previous.started.load(Ordering::SeqCst) {
                tracing::trace!("Superseding pending debounced task");
                previous.handle.abort();
            }
        }
    }
}
