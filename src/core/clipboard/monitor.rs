use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::history::{preview_of, ClipboardEntry};
use super::store::{ClipboardStore, PollOutcome};

/// Fixed polling cadence
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Log the first failure and then every Nth consecutive one
const ERROR_LOG_EVERY: u32 = 10;

type InsertObserver = Arc<dyn Fn(&ClipboardEntry) + Send + Sync>;

struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Background poller driving [`ClipboardStore::poll`] at a fixed rate
pub struct ClipboardMonitor {
    store: Arc<ClipboardStore>,
    interval: Duration,
    observer: Option<InsertObserver>,
    worker: Mutex<Option<Worker>>,
}

impl ClipboardMonitor {
    /// Create a monitor polling every [`POLL_INTERVAL`]
    pub fn new(store: Arc<ClipboardStore>) -> Self {
        Self::with_interval(store, POLL_INTERVAL)
    }

    pub fn with_interval(store: Arc<ClipboardStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            observer: None,
            worker: Mutex::new(None),
        }
    }

    /// Callback run on the monitor thread after every accepted insert
    pub fn on_insert<F>(mut self, observer: F) -> Self
    where
        F: Fn(&ClipboardEntry) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    fn worker(&self) -> MutexGuard<'_, Option<Worker>> {
        match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("clipboard monitor mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Start polling. Returns `false` if already running or the thread
    /// could not be spawned.
    pub fn start(&self) -> bool {
        let mut worker = self.worker();
        if worker.is_some() {
            return false;
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let store = Arc::clone(&self.store);
        let observer = self.observer.clone();
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("clipboard-monitor".to_string())
            .spawn(move || {
                tracing::info!(interval_ms = interval.as_millis() as u64, "clipboard monitor started");
                let mut consecutive_errors = 0u32;
                let mut next_tick = Instant::now();

                loop {
                    let wait = next_tick.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    tick(&store, observer.as_deref(), &mut consecutive_errors);

                    next_tick += interval;
                    let now = Instant::now();
                    if next_tick < now {
                        // Fell behind (slow OS read); skip missed ticks instead of bursting
                        next_tick = now + interval;
                    }
                }

                tracing::info!("clipboard monitor stopped");
            });

        match spawned {
            Ok(handle) => {
                *worker = Some(Worker { stop_tx, handle });
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to spawn clipboard monitor thread");
                false
            }
        }
    }

    /// Stop polling and wait for the thread to exit.
    ///
    /// Safe to call repeatedly. Once this returns no further poll runs.
    /// Returns whether a running poller was stopped.
    pub fn stop(&self) -> bool {
        let mut worker = self.worker();
        let Some(Worker { stop_tx, handle }) = worker.take() else {
            return false;
        };

        // A send error only means the thread already exited
        let _ = stop_tx.send(());
        if handle.join().is_err() {
            tracing::error!("clipboard monitor thread panicked");
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.worker().is_some()
    }

    /// Pause when running, resume when paused. Returns the new running state.
    pub fn toggle(&self) -> bool {
        if self.stop() {
            false
        } else {
            self.start()
        }
    }

    pub fn store(&self) -> &Arc<ClipboardStore> {
        &self.store
    }
}

impl Drop for ClipboardMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick(
    store: &ClipboardStore,
    observer: Option<&(dyn Fn(&ClipboardEntry) + Send + Sync)>,
    consecutive_errors: &mut u32,
) {
    match store.poll() {
        Ok(outcome) => {
            *consecutive_errors = 0;
            if let PollOutcome::Inserted(entry) = outcome {
                tracing::debug!(
                    id = %entry.id(),
                    preview = %short_preview(entry.content()),
                    "clipboard entry captured"
                );
                if let Some(observer) = observer {
                    observer(&entry);
                }
            }
        }
        Err(e) => {
            *consecutive_errors += 1;
            if *consecutive_errors == 1 || *consecutive_errors % ERROR_LOG_EVERY == 0 {
                tracing::warn!(
                    error = %e,
                    consecutive = *consecutive_errors,
                    "failed to read clipboard, skipping tick"
                );
            }
        }
    }
}

fn short_preview(content: &str) -> String {
    let preview = preview_of(content);
    match preview.char_indices().nth(20) {
        Some((cut, _)) => format!("{}...", &preview[..cut]),
        None => preview,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::clipboard::MemoryClipboard;
    use std::sync::mpsc::Receiver;

    const FAST: Duration = Duration::from_millis(5);
    const WAIT: Duration = Duration::from_secs(2);

    fn monitor() -> (Arc<MemoryClipboard>, ClipboardMonitor, Receiver<String>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let store = Arc::new(ClipboardStore::new(clipboard.clone()));
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let monitor = ClipboardMonitor::with_interval(store, FAST).on_insert(move |entry| {
            let _ = tx.lock().unwrap().send(entry.content().to_string());
        });
        (clipboard, monitor, rx)
    }

    #[test]
    fn test_first_poll_is_immediate() {
        let (clipboard, monitor, rx) = monitor();
        clipboard.set_text("already there");

        assert!(monitor.start());
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), "already there");
        assert!(monitor.stop());
    }

    #[test]
    fn test_picks_up_changes_in_order() {
        let (clipboard, monitor, rx) = monitor();
        monitor.start();

        clipboard.set_text("one");
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), "one");
        clipboard.set_text("two");
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), "two");

        monitor.stop();
        assert_eq!(monitor.store().snapshot().contents(), vec!["two", "one"]);
    }

    #[test]
    fn test_no_poll_after_stop_returns() {
        let (clipboard, monitor, _rx) = monitor();
        monitor.start();
        thread::sleep(Duration::from_millis(30));

        monitor.stop();
        let reads = clipboard.read_count();
        thread::sleep(Duration::from_millis(50));

        assert!(reads > 0);
        assert_eq!(clipboard.read_count(), reads);
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (_clipboard, monitor, _rx) = monitor();
        assert!(!monitor.stop());

        monitor.start();
        assert!(monitor.stop());
        assert!(!monitor.stop());
        assert!(!monitor.stop());
    }

    #[test]
    fn test_double_start_is_rejected() {
        let (_clipboard, monitor, _rx) = monitor();
        assert!(monitor.start());
        assert!(!monitor.start());
        monitor.stop();
    }

    #[test]
    fn test_restart_after_stop() {
        let (clipboard, monitor, rx) = monitor();
        monitor.start();
        monitor.stop();

        clipboard.set_text("after restart");
        assert!(monitor.start());
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), "after restart");
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let (_clipboard, monitor, _rx) = monitor();
        assert!(monitor.toggle());
        assert!(monitor.is_running());
        assert!(!monitor.toggle());
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_read_errors_do_not_kill_the_poller() {
        let (clipboard, monitor, rx) = monitor();
        for _ in 0..25 {
            clipboard.fail_next_read("locked");
        }
        clipboard.set_text("survived");

        monitor.start();
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), "survived");
    }

    #[test]
    fn test_drop_stops_thread() {
        let (clipboard, monitor, _rx) = monitor();
        monitor.start();
        drop(monitor);

        let reads = clipboard.read_count();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(clipboard.read_count(), reads);
    }

    #[test]
    fn test_short_preview_truncates_for_logs() {
        assert_eq!(short_preview("tiny"), "tiny");
        assert_eq!(short_preview(&"y".repeat(40)), format!("{}...", "y".repeat(20)));
    }
}
