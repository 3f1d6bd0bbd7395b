use campusdesk::cli;
use campusdesk::logging::init_tracing;
use campusdesk_client::HttpClient;
use campusdesk_config::{ClientConfig, FetchConfig, LogConfig};
use campusdesk_core::PaginationParams;
use campusdesk_models::{AlertType, GroupRole, UserRole};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusdesk")]
#[command(about = "Campusdesk - College administration from the terminal", long_about = None)]
struct Cli {
    /// Backend base URL (overrides CAMPUSDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides CAMPUSDESK_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(long)]
    page: Option<i64>,

    /// Rows per page
    #[arg(long)]
    limit: Option<i64>,
}

impl From<PageArgs> for PaginationParams {
    fn from(args: PageArgs) -> Self {
        PaginationParams {
            limit: args.limit.or(PaginationParams::default().limit),
            offset: None,
            page: Some(args.page.unwrap_or(1)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print a token for later commands
    Login {
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// List departments
    Departments {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a department with its programs, cohorts, classes, students and staff
    Department {
        id: i64,

        /// Fetch sibling cohorts and classes concurrently
        #[arg(long)]
        fan_out: bool,

        /// Print the hierarchy as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search users by name, username or email
    SearchUsers {
        #[arg(default_value = "")]
        query: String,

        #[arg(long)]
        role: Option<UserRole>,

        #[arg(long)]
        department: Option<i64>,

        /// Read queries from stdin, applying each once typing pauses
        #[arg(long)]
        watch: bool,
    },
    /// Delete users one by one and report how many succeeded
    DeleteUsers {
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// List your alerts
    Alerts {
        #[arg(long)]
        unread: bool,
    },
    /// Mark alerts as read
    MarkAlertsRead {
        #[arg(required_unless_present = "all")]
        ids: Vec<i64>,

        /// Mark every alert with a single request
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// Send the same alert to several groups
    BroadcastAlert {
        #[arg(short = 't', long)]
        title: String,

        #[arg(short = 'm', long)]
        message: String,

        #[arg(long = "type", default_value = "info", value_parser = parse_alert_type)]
        alert_type: AlertType,

        #[arg(short = 'g', long = "group", required = true)]
        groups: Vec<i64>,
    },
    /// List groups
    Groups {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Add users to a group
    AddGroupMembers {
        group: i64,

        #[arg(required = true)]
        users: Vec<i64>,

        #[arg(long, default_value = "member")]
        role: GroupRole,
    },
}

fn parse_alert_type(value: &str) -> Result<AlertType, String> {
    match serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase())) {
        Ok(AlertType::Unknown) | Err(_) => Err(format!("unknown alert type: {value}")),
        Ok(alert_type) => Ok(alert_type),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = init_tracing(&LogConfig::from_env())?;
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_base_url(api_url);
    }
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }

    let mut fetch = FetchConfig::from_env();
    let client = HttpClient::new(config, fetch.clone())?;

    match cli.command {
        Commands::Login { username, password } => {
            cli::handle_login(&client, username, password).await
        }
        Commands::Departments { page } => cli::handle_departments(&client, page.into()).await,
        Commands::Department { id, fan_out, json } => {
            if fan_out {
                fetch = fetch.with_fan_out(true);
            }
            cli::handle_department(&client, id, &fetch, json).await
        }
        Commands::SearchUsers {
            query,
            role,
            department,
            watch,
        } => {
            let debounce = watch.then(|| fetch.search_debounce());
            cli::handle_search_users(&client, query, role, department, debounce).await
        }
        Commands::DeleteUsers { ids, yes } => cli::handle_delete_users(&client, ids, yes).await,
        Commands::Alerts { unread } => cli::handle_alerts(&client, unread).await,
        Commands::MarkAlertsRead { ids, all } => {
            cli::handle_mark_alerts_read(&client, ids, all).await
        }
        Commands::BroadcastAlert {
            title,
            message,
            alert_type,
            groups,
        } => cli::handle_broadcast_alert(&client, title, message, alert_type, groups).await,
        Commands::Groups { page } => cli::handle_groups(&client, page.into()).await,
        Commands::AddGroupMembers { group, users, role } => {
            cli::handle_add_group_members(&client, group, users, role).await
        }
    }
}
