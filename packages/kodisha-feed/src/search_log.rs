//! Fire-and-forget search logging with a trailing-edge debounce.
//!
//! Keystrokes arrive far faster than we want to log, so submissions replace
//! a single pending slot and only the version that survives a full quiet
//! window is sent. Logging is analytics only: failures are swallowed after
//! a debug log and never surface to the caller.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::query::{classify, SearchAnalysis};
use crate::traits::BasePropertyApi;

/// Quiet window a query must survive before it is logged.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_secs(1);

/// Handle to the background logging task. Dropping it cancels the task and
/// discards any pending, unflushed query.
pub struct SearchLogger {
    tx: UnboundedSender<SearchAnalysis>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SearchLogger {
    /// Spawn the logger with the standard one-second window.
    pub fn spawn(api: Arc<dyn BasePropertyApi>) -> Self {
        Self::spawn_with_debounce(api, SEARCH_DEBOUNCE)
    }

    pub fn spawn_with_debounce(api: Arc<dyn BasePropertyApi>, window: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_logger(api, rx, cancel.clone(), window));
        Self {
            tx,
            cancel,
            task: Some(task),
        }
    }

    /// Submit an analysis. Restarts the quiet window and replaces whatever
    /// was pending.
    pub fn submit(&self, analysis: SearchAnalysis) {
        // Send only fails once the task is gone; late submissions just drop.
        let _ = self.tx.send(analysis);
    }

    /// Classify `query` and submit it if valid; invalid queries are ignored.
    pub fn submit_query(&self, query: &str) {
        if let Some(analysis) = classify(query) {
            self.submit(analysis);
        }
    }

    /// Cancel the task and wait for it to wind down. Any pending query is
    /// discarded, not flushed.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SearchLogger {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_logger(
    api: Arc<dyn BasePropertyApi>,
    mut rx: UnboundedReceiver<SearchAnalysis>,
    cancel: CancellationToken,
    window: Duration,
) {
    let mut pending: Option<SearchAnalysis> = None;
    let mut last_sent: Option<String> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            received = rx.recv() => match received {
                // Each arrival re-enters the loop, which restarts the sleep.
                Some(analysis) => pending = Some(analysis),
                None => break,
            },
            _ = tokio::time::sleep(window), if pending.is_some() => {
                if let Some(analysis) = pending.take() {
                    flush(api.as_ref(), &mut last_sent, analysis).await;
                }
            }
        }
    }

    tracing::debug!("search logger stopped");
}

async fn flush(api: &dyn BasePropertyApi, last_sent: &mut Option<String>, analysis: SearchAnalysis) {
    if last_sent.as_deref() == Some(analysis.normalized_query.as_str()) {
        tracing::trace!(query = %analysis.normalized_query, "duplicate search not logged");
        return;
    }
    last_sent.replace(analysis.normalized_query.clone());

    let record = analysis.to_record(Utc::now());
    if let Err(err) = api.store_search(record).await {
        tracing::debug!(error = %err, "search log dropped");
    }
}
