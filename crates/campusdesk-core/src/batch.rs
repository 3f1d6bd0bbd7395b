//! Sequential batch mutations with per-item failure accounting.
//!
//! [`BatchReducer`] applies one asynchronous remote operation to every ID in a
//! selection, strictly one after another in the selection's order. A failing
//! item is counted and logged, and the loop moves on to the next ID.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::batch::BatchReducer;
//!
//! let mut reducer = BatchReducer::new("delete_users").with_cancellation(token.clone());
//! let outcome = reducer.run(selection.iter(), |id| api.delete_user(id)).await;
//! println!("{}", outcome.summary("Deleted", "user(s)"));
//! ```

use std::fmt::Display;
use std::future::Future;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Lifecycle of one reducer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Idle,
    Running,
    Completed,
}

/// Aggregate result of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub fail_count: usize,
    /// IDs never attempted because the run was cancelled.
    pub skipped_count: usize,
    pub cancelled: bool,
}

impl BatchOutcome {
    pub fn attempted(&self) -> usize {
        self.success_count + self.fail_count
    }

    pub fn is_clean(&self) -> bool {
        self.fail_count == 0 && !self.cancelled
    }

    /// Caller-facing message, e.g. `"Deleted 2 user(s) successfully. 1 failed."`.
    pub fn summary(&self, verb: &str, noun: &str) -> String {
        let mut message = format!("{verb} {} {noun} successfully.", self.success_count);
        if self.fail_count > 0 {
            message.push_str(&format!(" {} failed.", self.fail_count));
        }
        if self.cancelled {
            message.push_str(&format!(" Cancelled, {} skipped.", self.skipped_count));
        }
        message
    }
}

/// Applies an operation to a set of IDs sequentially, never aborting on failure.
#[derive(Debug)]
pub struct BatchReducer {
    label: &'static str,
    state: BatchState,
    cancel: CancellationToken,
}

impl BatchReducer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: BatchState::Idle,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops the run before the next ID once `token` is cancelled.
    ///
    /// An operation already in flight is awaited to completion.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub async fn run<I, Id, F, Fut, E>(&mut self, ids: I, mut op: F) -> BatchOutcome
    where
        I: IntoIterator<Item = Id>,
        Id: Display + Copy,
        F: FnMut(Id) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        let ids: Vec<Id> = ids.into_iter().collect();
        let mut outcome = BatchOutcome::default();

        self.state = BatchState::Running;
        info!(batch = self.label, total = ids.len(), "Batch started");

        for (index, id) in ids.iter().copied().enumerate() {
            if self.cancel.is_cancelled() {
                outcome.cancelled = true;
                outcome.skipped_count = ids.len() - index;
                warn!(
                    batch = self.label,
                    skipped = outcome.skipped_count,
                    "Batch cancelled"
                );
                break;
            }

            match op(id).await {
                Ok(()) => outcome.success_count += 1,
                Err(err) => {
                    outcome.fail_count += 1;
                    warn!(batch = self.label, id = %id, error = %err, "Batch item failed");
                }
            }
        }

        self.state = BatchState::Completed;
        info!(
            batch = self.label,
            succeeded = outcome.success_count,
            failed = outcome.fail_count,
            "Batch completed"
        );

        outcome
    }
}
