use campusdesk_client::{AdminApi, UserApi};
use campusdesk_core::ApiResult;
use campusdesk_models::{User, UserFilterParams, UserId};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::modules::users::search::filter_users;
use crate::utils::{BulkActionReport, Selection, run_on_selection};

/// The user management list: a snapshot from the backend, the search query
/// applied to it and the rows the operator has ticked.
#[derive(Debug, Default)]
pub struct UserDirectory {
    filter: UserFilterParams,
    users: Vec<User>,
    query: String,
    selection: Selection<UserId>,
}

impl UserDirectory {
    pub fn new(filter: UserFilterParams) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Rows currently shown: the snapshot narrowed by the search query.
    pub fn visible(&self) -> Vec<&User> {
        filter_users(&self.users, &self.query)
    }

    pub fn selection(&self) -> &Selection<UserId> {
        &self.selection
    }

    /// Adds `id` to the selection; selecting it twice keeps one entry.
    pub fn select(&mut self, id: UserId) -> bool {
        self.selection.insert(id)
    }

    pub fn toggle(&mut self, id: UserId) -> bool {
        self.selection.toggle(id)
    }

    /// Selects every visible row, in display order.
    pub fn select_visible(&mut self) {
        let ids: Vec<UserId> = self.visible().iter().map(|u| u.id).collect();
        self.selection.select_all(ids);
    }

    /// Replaces the snapshot and drops selected IDs that are no longer listed.
    #[instrument(skip(self, api))]
    pub async fn reload<A>(&mut self, api: &A) -> ApiResult<()>
    where
        A: UserApi + ?Sized,
    {
        self.users = api.get_users(&self.filter).await?;
        let users = &self.users;
        self.selection
            .retain_present(|id| users.iter().any(|u| u.id == id));
        Ok(())
    }

    /// Deletes every selected user one at a time.
    ///
    /// Failures are counted, never fatal. The selection is cleared and the
    /// list reloaded afterwards regardless of the outcome.
    #[instrument(skip(self, api, cancel), fields(selected = self.selection.len()))]
    pub async fn delete_selected<A>(
        &mut self,
        api: &A,
        cancel: &CancellationToken,
    ) -> BulkActionReport
    where
        A: UserApi + AdminApi + ?Sized,
    {
        let outcome = run_on_selection("delete_users", &mut self.selection, cancel, |id| {
            api.delete_user(id)
        })
        .await;

        let mut report = BulkActionReport::new(outcome, outcome.summary("Deleted", "user(s)"));
        info!(message = %report.message, "Bulk delete finished");

        if let Err(err) = self.reload(api).await {
            warn!(error = %err, "Failed to reload users after bulk delete");
            report.reload_error = Some(err.detail());
        }

        report
    }
}
