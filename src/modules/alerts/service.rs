use campusdesk_client::AlertApi;
use campusdesk_core::ApiResult;
use campusdesk_models::{Alert, AlertFilterParams, AlertId, UpdateAlertDto};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::utils::{BulkActionReport, Selection, run_on_selection};

/// The operator's own alert list with its checkbox selection.
#[derive(Debug, Default)]
pub struct AlertInbox {
    filter: AlertFilterParams,
    alerts: Vec<Alert>,
    selection: Selection<AlertId>,
}

impl AlertInbox {
    pub fn new(filter: AlertFilterParams) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.is_read).count()
    }

    pub fn selection(&self) -> &Selection<AlertId> {
        &self.selection
    }

    /// Adds `id` to the selection; selecting it twice keeps one entry.
    pub fn select(&mut self, id: AlertId) -> bool {
        self.selection.insert(id)
    }

    pub fn toggle(&mut self, id: AlertId) -> bool {
        self.selection.toggle(id)
    }

    pub fn select_unread(&mut self) {
        let ids: Vec<AlertId> = self.alerts.iter().filter(|a| !a.is_read).map(|a| a.id).collect();
        self.selection.select_all(ids);
    }

    #[instrument(skip(self, api))]
    pub async fn reload<A>(&mut self, api: &A) -> ApiResult<()>
    where
        A: AlertApi + ?Sized,
    {
        self.alerts = api.list_alerts(self.filter).await?;
        let alerts = &self.alerts;
        self.selection
            .retain_present(|id| alerts.iter().any(|a| a.id == id));
        Ok(())
    }

    /// Marks each selected alert read with its own update call.
    #[instrument(skip(self, api, cancel), fields(selected = self.selection.len()))]
    pub async fn mark_selected_read<A>(
        &mut self,
        api: &A,
        cancel: &CancellationToken,
    ) -> BulkActionReport
    where
        A: AlertApi + ?Sized,
    {
        let outcome = run_on_selection("mark_alerts_read", &mut self.selection, cancel, |id| {
            api.update_alert(id, UpdateAlertDto { is_read: true })
        })
        .await;

        let mut report = BulkActionReport::new(outcome, outcome.summary("Marked", "alert(s) as read"));
        info!(message = %report.message, "Bulk mark-read finished");
        self.reload_into(api, &mut report).await;
        report
    }

    /// Marks every alert read with the single server-side call.
    #[instrument(skip(self, api))]
    pub async fn mark_all_read<A>(&mut self, api: &A) -> ApiResult<()>
    where
        A: AlertApi + ?Sized,
    {
        api.mark_all_read().await?;
        self.selection.clear();
        self.reload(api).await
    }

    async fn reload_into<A>(&mut self, api: &A, report: &mut BulkActionReport)
    where
        A: AlertApi + ?Sized,
    {
        if let Err(err) = self.reload(api).await {
            warn!(error = %err, "Failed to reload alerts");
            report.reload_error = Some(err.detail());
        }
    }
}
