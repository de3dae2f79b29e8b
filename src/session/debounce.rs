use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Minimum trimmed query length before a search is scheduled.
pub const MIN_QUERY_LEN: usize = 2;

/// A search invocation released by the debouncer
///
/// `token` is compared against the live counter when the response arrives; a
/// mismatch means this trigger was superseded and its result must be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTrigger {
    pub token: u64,
    pub query: String,
}

/// Outcome of feeding one keystroke to the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Query too short; any pending timer was cancelled and dependent
    /// results should be hidden.
    Cleared,
    /// A trigger was (re)scheduled to fire after the quiet period.
    Scheduled,
}

/// Trailing-edge debouncer for the search input
///
/// At most one timer is pending at a time; each keystroke replaces it. The
/// timer task claims the session token at fire time, so reading the counter
/// when a response arrives identifies the newest fired search.
pub struct QueryDebouncer {
    quiet_period: Duration,
    counter: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    trigger_tx: UnboundedSender<SearchTrigger>,
    trigger_rx: UnboundedReceiver<SearchTrigger>,
}

impl QueryDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
        Self {
            quiet_period,
            counter: Arc::new(AtomicU64::new(0)),
            pending: None,
            trigger_tx,
            trigger_rx,
        }
    }

    /// Feed one keystroke's worth of raw input.
    pub fn on_input(&mut self, raw: &str) -> InputOutcome {
        let query = raw.trim().to_string();

        self.cancel_pending();

        if query.chars().count() < MIN_QUERY_LEN {
            return InputOutcome::Cleared;
        }

        let counter = Arc::clone(&self.counter);
        let trigger_tx = self.trigger_tx.clone();
        let quiet_period = self.quiet_period;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let token = counter.fetch_add(1, Ordering::SeqCst) + 1;
            // A closed receiver means the session is gone; nothing to do.
            let _ = trigger_tx.send(SearchTrigger { token, query });
        }));

        InputOutcome::Scheduled
    }

    /// Immediate path (Enter key / search button): bypasses the timer but
    /// claims a token through the same bookkeeping. Returns false for an
    /// empty trimmed query.
    pub fn submit_now(&mut self, raw: &str) -> bool {
        let query = raw.trim().to_string();
        if query.is_empty() {
            return false;
        }

        self.cancel_pending();
        let token = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.trigger_tx.send(SearchTrigger { token, query });
        true
    }

    /// Cancel any pending timer. Idempotent: cancelling an already-fired or
    /// already-cancelled timer is a no-op.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Token of the newest fired search.
    pub fn current_token(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// True when `token` still identifies the newest fired search.
    pub fn is_current(&self, token: u64) -> bool {
        token == self.current_token()
    }

    /// Await the next fired trigger.
    pub async fn next_trigger(&mut self) -> Option<SearchTrigger> {
        self.trigger_rx.recv().await
    }

    /// Non-blocking variant of [`Self::next_trigger`].
    pub fn try_trigger(&mut self) -> Option<SearchTrigger> {
        self.trigger_rx.try_recv().ok()
    }
}
