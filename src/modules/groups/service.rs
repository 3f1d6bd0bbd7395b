use campusdesk_client::{AlertApi, GroupApi};
use campusdesk_core::{ApiResult, PaginationParams};
use campusdesk_models::{CreateAlertDto, Group, GroupId, GroupRole, UserId};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::utils::{BulkActionReport, Selection, run_on_selection};

/// One page of the groups list with its checkbox selection.
///
/// Both group bulk flows end with a reload of this page so member counts
/// reflect what the backend accepted.
#[derive(Debug, Default)]
pub struct GroupDirectory {
    params: PaginationParams,
    groups: Vec<Group>,
    selection: Selection<GroupId>,
}

impl GroupDirectory {
    pub fn new(params: PaginationParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn selection(&self) -> &Selection<GroupId> {
        &self.selection
    }

    /// Adds `id` to the selection; selecting it twice keeps one entry.
    pub fn select(&mut self, id: GroupId) -> bool {
        self.selection.insert(id)
    }

    pub fn toggle(&mut self, id: GroupId) -> bool {
        self.selection.toggle(id)
    }

    #[instrument(skip(self, api))]
    pub async fn reload<A>(&mut self, api: &A) -> ApiResult<()>
    where
        A: GroupApi + ?Sized,
    {
        self.groups = api.list_groups(self.params.to_request()).await?;
        Ok(())
    }

    /// Adds each selected user to `group_id` with the same role, then reloads.
    #[instrument(skip(self, api, users, cancel), fields(users = users.len()))]
    pub async fn add_members<A>(
        &mut self,
        api: &A,
        group_id: GroupId,
        users: &mut Selection<UserId>,
        role: GroupRole,
        cancel: &CancellationToken,
    ) -> BulkActionReport
    where
        A: GroupApi + ?Sized,
    {
        let outcome = run_on_selection("add_group_members", users, cancel, |user_id| {
            api.add_member(group_id, user_id, role)
        })
        .await;

        let mut report = BulkActionReport::new(outcome, outcome.summary("Added", "member(s)"));
        info!(%group_id, message = %report.message, "Group membership update finished");
        self.reload_into(api, &mut report).await;
        report
    }

    /// Sends one copy of `alert` to each selected group, in selection order.
    ///
    /// The alert is validated once up front; an invalid alert sends nothing
    /// and leaves the selection untouched. Otherwise every group is attempted,
    /// the selection is cleared and the list reloaded.
    #[instrument(skip(self, api, alert, cancel), fields(groups = self.selection.len()))]
    pub async fn broadcast_to_groups<A>(
        &mut self,
        api: &A,
        alert: &CreateAlertDto,
        cancel: &CancellationToken,
    ) -> ApiResult<BulkActionReport>
    where
        A: AlertApi + GroupApi + ?Sized,
    {
        alert.validate()?;

        let outcome = run_on_selection("broadcast_alert", &mut self.selection, cancel, |group_id| async move {
            api.create_alert(&alert.for_group(group_id)).await.map(|_| ())
        })
        .await;

        let mut report = BulkActionReport::new(outcome, outcome.summary("Sent alert to", "group(s)"));
        info!(message = %report.message, "Alert broadcast finished");
        self.reload_into(api, &mut report).await;
        Ok(report)
    }

    async fn reload_into<A>(&mut self, api: &A, report: &mut BulkActionReport)
    where
        A: GroupApi + ?Sized,
    {
        if let Err(err) = self.reload(api).await {
            warn!(error = %err, "Failed to reload groups");
            report.reload_error = Some(err.detail());
        }
    }
}
