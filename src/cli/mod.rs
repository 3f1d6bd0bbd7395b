//! Command handlers behind the `campusdesk` binary.
//!
//! Each handler drives one dashboard workflow against an [`HttpClient`] and
//! prints the result for an operator.

use std::time::Duration;

use anyhow::{Context, bail, ensure};
use campusdesk_client::{AuthApi, HttpClient};
use campusdesk_config::FetchConfig;
use campusdesk_core::{BatchOutcome, PaginationParams};
use campusdesk_models::{
    AlertFilterParams, AlertId, AlertType, CreateAlertDto, DepartmentId, GroupId, GroupRole,
    UserFilterParams, UserId, UserRole,
};
use dialoguer::{Confirm, Input, Password};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::modules::alerts::AlertInbox;
use crate::modules::departments::{DepartmentDetail, DepartmentService, DetailState};
use crate::modules::groups::GroupDirectory;
use crate::modules::users::{SearchDebouncer, UserDirectory};
use crate::utils::{BulkActionReport, Selection};

pub async fn handle_login(
    client: &HttpClient,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?,
    };

    let user = client.login(&username, &password).await?;
    let token = client.session().token().await.unwrap_or_default();

    println!("✅ Logged in as {} ({})", user.full_name, user.role);
    println!("   export CAMPUSDESK_TOKEN={token}");
    Ok(())
}

pub async fn handle_departments(client: &HttpClient, params: PaginationParams) -> anyhow::Result<()> {
    let departments = DepartmentService::list_departments(client, &params).await?;

    for department in &departments {
        println!("{:>6}  {:<8} {}", department.id, department.code, department.name);
    }
    if params.has_more(departments.len()) {
        println!("… more from offset {}", params.next().offset());
    }
    Ok(())
}

pub async fn handle_department(
    client: &HttpClient,
    id: i64,
    fetch: &FetchConfig,
    json: bool,
) -> anyhow::Result<()> {
    let mut detail = DepartmentDetail::new(DepartmentId::new(id));

    match detail.load(client, fetch).await {
        DetailState::Loaded(hierarchy) => {
            if json {
                println!("{}", serde_json::to_string_pretty(hierarchy)?);
                return Ok(());
            }

            let counts = hierarchy.tab_counts();
            println!("{} ({})", hierarchy.department.name, hierarchy.department.code);
            println!(
                "Programs: {}  Cohorts: {}  Classes: {}  Students: {}  Staff: {}",
                counts.programs, counts.cohorts, counts.classes, counts.students, counts.staff
            );

            for program in &hierarchy.programs {
                println!("├─ {} [{}]", program.name, program.code);
                for cohort in hierarchy.cohorts_for_program(program.id) {
                    println!("│  ├─ {} ({})", cohort.name, cohort.admission_year);
                    for class in hierarchy.classes_for_cohort(cohort.id) {
                        println!("│  │  └─ {}", class.display_name());
                    }
                }
            }
            Ok(())
        }
        DetailState::NotFound => bail!("Department {id} not found"),
        DetailState::Failed(detail) => bail!("Failed to load department {id}: {detail}"),
        DetailState::Idle | DetailState::Loading => bail!("Department {id} was not loaded"),
    }
}

pub async fn handle_search_users(
    client: &HttpClient,
    query: String,
    role: Option<UserRole>,
    department_id: Option<i64>,
    debounce: Option<Duration>,
) -> anyhow::Result<()> {
    let filter = UserFilterParams {
        department_id: department_id.map(DepartmentId::new),
        role,
    };
    let mut directory = UserDirectory::new(filter);
    directory.reload(client).await?;
    directory.set_query(query);
    print_users(&directory);

    let Some(quiet) = debounce else {
        return Ok(());
    };

    let mut debouncer = SearchDebouncer::spawn(quiet);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => debouncer.push(line),
                None => break,
            },
            Some(query) = debouncer.next() => {
                directory.set_query(query);
                print_users(&directory);
            }
        }
    }

    if let Some(query) = debouncer.finish().await {
        directory.set_query(query);
        print_users(&directory);
    }
    Ok(())
}

fn print_users(directory: &UserDirectory) {
    let visible = directory.visible();
    for user in &visible {
        println!(
            "{:>6}  {:<16} {:<28} {:<32} {}",
            user.id, user.username, user.full_name, user.email, user.role
        );
    }
    println!("{} of {} user(s)", visible.len(), directory.users().len());
}

pub async fn handle_delete_users(client: &HttpClient, ids: Vec<i64>, yes: bool) -> anyhow::Result<()> {
    ensure_user_manager(client).await?;

    if !yes && !confirm(&format!("Delete {} user(s)?", ids.len()))? {
        println!("Aborted");
        return Ok(());
    }

    let mut directory = UserDirectory::new(UserFilterParams::default());
    directory.reload(client).await?;
    for id in ids {
        directory.select(UserId::new(id));
    }

    let report = directory.delete_selected(client, &CancellationToken::new()).await;
    print_report(&report);
    ensure_clean(&report.outcome)
}

pub async fn handle_alerts(client: &HttpClient, unread: bool) -> anyhow::Result<()> {
    let filter = AlertFilterParams {
        is_read: unread.then_some(false),
    };
    let mut inbox = AlertInbox::new(filter);
    inbox.reload(client).await?;

    for alert in inbox.alerts() {
        let marker = if alert.is_read { " " } else { "•" };
        println!(
            "{marker} {:>6}  {}  {:?}  {}",
            alert.id,
            alert.created_at.format("%Y-%m-%d %H:%M"),
            alert.alert_type,
            alert.title
        );
    }
    println!("{} unread", inbox.unread_count());
    Ok(())
}

pub async fn handle_mark_alerts_read(client: &HttpClient, ids: Vec<i64>, all: bool) -> anyhow::Result<()> {
    let mut inbox = AlertInbox::default();

    if all {
        inbox.mark_all_read(client).await?;
        println!("✅ All alerts marked as read");
        return Ok(());
    }

    inbox.reload(client).await?;
    for id in ids {
        inbox.select(AlertId::new(id));
    }

    let report = inbox.mark_selected_read(client, &CancellationToken::new()).await;
    print_report(&report);
    ensure_clean(&report.outcome)
}

pub async fn handle_broadcast_alert(
    client: &HttpClient,
    title: String,
    message: String,
    alert_type: AlertType,
    groups: Vec<i64>,
) -> anyhow::Result<()> {
    let alert = CreateAlertDto {
        title,
        message,
        alert_type,
        group_id: None,
        user_id: None,
    };
    let mut directory = GroupDirectory::default();
    for id in groups {
        directory.select(GroupId::new(id));
    }

    let report = directory
        .broadcast_to_groups(client, &alert, &CancellationToken::new())
        .await?;
    print_report(&report);
    ensure_clean(&report.outcome)
}

pub async fn handle_groups(client: &HttpClient, params: PaginationParams) -> anyhow::Result<()> {
    let mut directory = GroupDirectory::new(params);
    directory.reload(client).await?;
    for group in directory.groups() {
        println!("{:>6}  {:<32} {} member(s)", group.id, group.name, group.member_count);
    }
    Ok(())
}

pub async fn handle_add_group_members(
    client: &HttpClient,
    group_id: i64,
    users: Vec<i64>,
    role: GroupRole,
) -> anyhow::Result<()> {
    let mut selection: Selection<UserId> = users.into_iter().map(UserId::new).collect();

    let report = GroupDirectory::default()
        .add_members(
            client,
            GroupId::new(group_id),
            &mut selection,
            role,
            &CancellationToken::new(),
        )
        .await;
    print_report(&report);
    ensure_clean(&report.outcome)
}

/// Loads the current user into the session and checks the admin role.
async fn ensure_user_manager(client: &HttpClient) -> anyhow::Result<()> {
    if !client.session().is_authenticated().await {
        bail!("Not logged in. Run `campusdesk login` or set CAMPUSDESK_TOKEN");
    }

    if client.session().current_user().await.is_none() {
        let user = client.me().await?;
        client.session().set_user(user).await;
    }

    if !client.session().can_manage_users().await {
        bail!("Only super admins and college admins can delete users");
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn print_report(report: &BulkActionReport) {
    if report.outcome.is_clean() {
        println!("✅ {}", report.message);
    } else {
        println!("⚠️  {}", report.message);
    }
    if let Some(error) = &report.reload_error {
        eprintln!("   Could not refresh the list: {error}");
    }
}

/// Turns a batch with failures or a cancellation into an error so the
/// process exits non-zero after `main` has unwound.
fn ensure_clean(outcome: &BatchOutcome) -> anyhow::Result<()> {
    ensure!(
        outcome.is_clean(),
        "{} of {} item(s) did not complete",
        outcome.fail_count + outcome.skipped_count,
        outcome.attempted() + outcome.skipped_count
    );
    Ok(())
}
