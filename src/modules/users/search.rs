//! Client-side search over an already-loaded user list.

use std::time::Duration;

use campusdesk_models::User;
use tokio::sync::mpsc;
use tracing::trace;

/// Users whose full name, username or email contains `query`,
/// case-insensitively. A blank query keeps every user.
///
/// Input order is preserved.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return users.iter().collect();
    }
    users.iter().filter(|u| u.matches(&needle)).collect()
}

/// Debounces search keystrokes.
///
/// Every [`push`](Self::push) restarts the quiet period; only the latest
/// query is emitted once no new keystroke arrived for the whole period.
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    output: mpsc::UnboundedReceiver<String>,
}

impl SearchDebouncer {
    /// Spawns the debounce task on the current runtime.
    pub fn spawn(quiet: Duration) -> Self {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output) = mpsc::unbounded_channel();
        tokio::spawn(debounce(input_rx, output_tx, quiet));
        Self { input, output }
    }

    pub fn push(&self, query: impl Into<String>) {
        // The task only stops once `self` is dropped.
        let _ = self.input.send(query.into());
    }

    /// Waits for the next settled query.
    pub async fn next(&mut self) -> Option<String> {
        self.output.recv().await
    }

    /// Closes the input and returns the query still inside its quiet period,
    /// if any, without waiting for the period to end.
    pub async fn finish(self) -> Option<String> {
        let Self { input, mut output } = self;
        drop(input);

        let mut last = None;
        while let Some(query) = output.recv().await {
            last = Some(query);
        }
        last
    }
}

async fn debounce(
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
    quiet: Duration,
) {
    while let Some(mut latest) = input.recv().await {
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(query) => latest = query,
                    None => {
                        let _ = output.send(latest);
                        return;
                    }
                },
                _ = tokio::time::sleep(quiet) => break,
            }
        }

        trace!(query = %latest, "Search query settled");
        if output.send(latest).is_err() {
            return;
        }
    }
}
