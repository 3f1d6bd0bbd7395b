use std::future::Future;

use campusdesk_client::{AcademicApi, DepartmentApi, UserApi};
use campusdesk_config::FetchConfig;
use campusdesk_core::{ApiError, ApiResult, PaginationParams};
use campusdesk_models::{
    ClassFilter, CohortFilter, Department, DepartmentId, ProgramFilter, UserFilterParams, UserRole,
};
use futures::future::try_join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::modules::departments::model::{DepartmentHierarchy, DetailState};

pub struct DepartmentService;

impl DepartmentService {
    /// Loads the full academic hierarchy of a department.
    ///
    /// Levels are fetched strictly in order: department, programs, cohorts of
    /// every program, classes of every cohort, then students and staff. Any
    /// failure aborts the whole load; nothing partial is returned.
    ///
    /// Returns `Ok(None)` when the department does not exist.
    #[instrument(skip(api, fetch, cancel))]
    pub async fn load_hierarchy<A>(
        api: &A,
        department_id: DepartmentId,
        fetch: &FetchConfig,
        cancel: &CancellationToken,
    ) -> ApiResult<Option<DepartmentHierarchy>>
    where
        A: DepartmentApi + AcademicApi + UserApi + ?Sized,
    {
        if department_id.get() <= 0 {
            return Err(ApiError::Validation(format!(
                "Invalid department id: {department_id}"
            )));
        }

        let department = match cancellable(cancel, api.get_department(department_id)).await {
            Ok(department) => department,
            Err(err) if err.is_not_found() => {
                info!(%department_id, "Department not found");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let programs =
            cancellable(cancel, api.list_programs(ProgramFilter::department(department_id)))
                .await?;

        let cohorts = fetch_level(&programs, fetch.fan_out, cancel, |program| {
            api.list_cohorts(CohortFilter::program(program.id))
        })
        .await?;

        let orphaned = cohorts
            .iter()
            .filter(|c| !programs.iter().any(|p| p.id == c.program_id))
            .count();
        if orphaned > 0 {
            warn!(orphaned, "Cohorts returned for programs outside this department");
        }

        let classes = fetch_level(&cohorts, fetch.fan_out, cancel, |cohort| {
            api.list_classes(ClassFilter::cohort(cohort.id))
        })
        .await?;

        let students = cancellable(
            cancel,
            api.get_users(&UserFilterParams::department_role(
                department_id,
                UserRole::Student,
            )),
        )
        .await?;

        let staff = cancellable(
            cancel,
            api.get_users(&UserFilterParams::department_role(
                department_id,
                UserRole::Staff,
            )),
        )
        .await?;

        info!(
            programs = programs.len(),
            cohorts = cohorts.len(),
            classes = classes.len(),
            students = students.len(),
            staff = staff.len(),
            "Department hierarchy loaded"
        );

        Ok(Some(DepartmentHierarchy {
            department,
            programs,
            cohorts,
            classes,
            students,
            staff,
        }))
    }

    /// One page of the department list screen.
    #[instrument(skip(api))]
    pub async fn list_departments<A>(
        api: &A,
        params: &PaginationParams,
    ) -> ApiResult<Vec<Department>>
    where
        A: DepartmentApi + ?Sized,
    {
        let departments = api.list_departments(params.to_request()).await?;
        debug!(
            count = departments.len(),
            has_more = params.has_more(departments.len()),
            "Department page fetched"
        );
        Ok(departments)
    }
}

/// Fetches the children of every parent and concatenates them in parent order.
///
/// With `fan_out` the requests run concurrently; `try_join_all` keeps the
/// results in input order and fails on the first error.
async fn fetch_level<P, T, F, Fut>(
    parents: &[P],
    fan_out: bool,
    cancel: &CancellationToken,
    fetch: F,
) -> ApiResult<Vec<T>>
where
    F: Fn(&P) -> Fut,
    Fut: Future<Output = ApiResult<Vec<T>>>,
{
    if fan_out {
        let batches = cancellable(cancel, try_join_all(parents.iter().map(&fetch))).await?;
        return Ok(batches.into_iter().flatten().collect());
    }

    let mut items = Vec::new();
    for parent in parents {
        items.extend(cancellable(cancel, fetch(parent)).await?);
    }
    Ok(items)
}

/// Races `fut` against the token; a cancelled token drops the in-flight request.
async fn cancellable<T, Fut>(cancel: &CancellationToken, fut: Fut) -> ApiResult<T>
where
    Fut: Future<Output = ApiResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        result = fut => result,
    }
}

/// View state of the department detail screen.
///
/// The view owns a cancellation token. Cancelling it (the view was closed)
/// aborts an in-flight load and the late result is discarded instead of
/// being written into the state.
#[derive(Debug)]
pub struct DepartmentDetail {
    department_id: DepartmentId,
    state: DetailState,
    cancel: CancellationToken,
}

impl DepartmentDetail {
    pub fn new(department_id: DepartmentId) -> Self {
        Self {
            department_id,
            state: DetailState::Idle,
            cancel: CancellationToken::new(),
        }
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Handle for closing the view while a load is running.
    pub fn close_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs the whole aggregation from the department fetch onward. Also used
    /// for the retry action.
    pub async fn load<A>(&mut self, api: &A, fetch: &FetchConfig) -> &DetailState
    where
        A: DepartmentApi + AcademicApi + UserApi + ?Sized,
    {
        if self.is_closed() {
            return &self.state;
        }

        let previous = std::mem::replace(&mut self.state, DetailState::Loading);
        let result =
            DepartmentService::load_hierarchy(api, self.department_id, fetch, &self.cancel).await;

        if self.is_closed() {
            debug!(department_id = %self.department_id, "View closed, discarding load result");
            self.state = previous;
            return &self.state;
        }

        self.state = match result {
            Ok(Some(hierarchy)) => DetailState::Loaded(Box::new(hierarchy)),
            Ok(None) => DetailState::NotFound,
            Err(err) => {
                warn!(department_id = %self.department_id, error = %err, "Failed to load department");
                DetailState::Failed(err.detail())
            }
        };

        &self.state
    }
}
