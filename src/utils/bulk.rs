//! Glue between a selection and the batch reducer.

use campusdesk_core::{BatchOutcome, BatchReducer};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use tokio_util::sync::CancellationToken;

use crate::utils::selection::Selection;

/// What a bulk action reports back to the screen that started it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkActionReport {
    pub outcome: BatchOutcome,
    pub message: String,
    /// Set when the list reload after the batch failed.
    pub reload_error: Option<String>,
}

impl BulkActionReport {
    pub fn new(outcome: BatchOutcome, message: String) -> Self {
        Self {
            outcome,
            message,
            reload_error: None,
        }
    }
}

/// Runs `op` over the selected IDs in selection order, then clears the
/// selection whether or not any item failed.
pub async fn run_on_selection<Id, F, Fut, E>(
    label: &'static str,
    selection: &mut Selection<Id>,
    cancel: &CancellationToken,
    op: F,
) -> BatchOutcome
where
    Id: Copy + Eq + Hash + Display,
    F: FnMut(Id) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let ids: Vec<Id> = selection.iter().collect();
    let mut reducer = BatchReducer::new(label).with_cancellation(cancel.clone());
    let outcome = reducer.run(ids, op).await;
    selection.clear();
    outcome
}
