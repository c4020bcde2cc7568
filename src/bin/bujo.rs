//! CLI binary for bujo.

use std::path::PathBuf;
use std::sync::Arc;

use bujo::api::myself::{Myself, MyselfApi, PatchMyselfParams};
use bujo::api::projects::{Project, ProjectsApi, ProjectsFetch};
use bujo::notify::{LogNotifier, Notifier};
use bujo::{ApiClient, BujoConfig, ReminderBeforeTask, SearchAction, SearchOutcome, SearchSaga, Store};
use bujo_search::HttpSearchBackend;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// BuJo: Bullet Journal task manager client.
#[derive(Parser)]
#[command(name = "bujo", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search projects, tasks, notes and transactions.
    Search {
        /// Search term, at least three characters.
        term: String,

        /// Number of pages to load, following the scroll cursor.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Show or change the signed-in user's profile.
    Myself {
        #[command(subcommand)]
        action: MyselfCommand,
    },

    /// List owned and shared projects.
    Projects,
}

#[derive(Subcommand)]
enum MyselfCommand {
    /// Print the profile.
    Show {
        /// Fetch the expanded profile.
        #[arg(long)]
        expand: bool,
    },
    /// Update profile settings.
    Patch {
        #[arg(long)]
        timezone: Option<String>,
        /// Reminder code 0-6 (0 = at due time, 6 = no reminder).
        #[arg(long)]
        reminder_before_task: Option<u8>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        theme: Option<String>,
    },
    /// End the server session.
    Logout,
    /// Reset server-side profile state.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bujo=info,bujo_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => BujoConfig::from_file(path)?,
        None => {
            let path = BujoConfig::default_config_path();
            if path.exists() {
                BujoConfig::from_file(&path)?
            } else {
                BujoConfig::default()
            }
        }
    };
    config.validate()?;

    let client = ApiClient::new(&config.api)?;

    match cli.command {
        Command::Search { term, pages } => run_search(&config, client, term, pages).await,
        Command::Myself { action } => run_myself(MyselfApi::new(client), action).await,
        Command::Projects => list_projects(ProjectsApi::new(client)).await,
    }
}

async fn run_search(
    config: &BujoConfig,
    client: ApiClient,
    term: String,
    pages: u32,
) -> anyhow::Result<()> {
    let backend = HttpSearchBackend::with_client(client.http().clone(), client.base_url().as_str())?;
    let store = Store::spawn();
    let notifier = Arc::new(LogNotifier);
    let saga = SearchSaga::new(
        backend,
        store.clone(),
        notifier.clone(),
        config.search_config(),
    );

    let mut action = SearchAction::new(term.clone());
    for page in 1..=pages.max(1) {
        match saga.dispatch(action).await? {
            SearchOutcome::Completed { items } => info!(page, items, "page loaded"),
            SearchOutcome::Rejected | SearchOutcome::Failed => {
                anyhow::bail!("search did not complete")
            }
            SearchOutcome::Superseded => break,
        }
        let state = store.get_state().await?;
        match state.search_result.and_then(|r| r.scroll_id) {
            Some(scroll_id) if page < pages => {
                action = SearchAction::load_more(term.clone(), scroll_id);
            }
            _ => break,
        }
    }

    let state = store.get_state().await?;
    let Some(result) = state.search_result else {
        notifier.info("no results");
        return Ok(());
    };
    notifier.info(&format!("{} results loaded", result.len()));
    for item in &result.search_result_item_list {
        println!("{:<12} {:>8}  {}", item.content_type, item.id, item.name);
    }
    if let Some(total) = result.total_hits {
        println!("{} of {total} hits", result.len());
    }
    Ok(())
}

async fn run_myself(api: MyselfApi, action: MyselfCommand) -> anyhow::Result<()> {
    match action {
        MyselfCommand::Show { expand } => print_myself(&api.fetch_myself(expand).await?),
        MyselfCommand::Patch {
            timezone,
            reminder_before_task,
            currency,
            theme,
        } => {
            let params = PatchMyselfParams {
                timezone,
                reminder_before_task: reminder_before_task
                    .map(ReminderBeforeTask::try_from)
                    .transpose()
                    .map_err(anyhow::Error::msg)?,
                currency,
                theme,
            };
            if params.is_empty() {
                anyhow::bail!("nothing to update");
            }
            print_myself(&api.patch_myself(&params).await?);
        }
        MyselfCommand::Logout => api.logout_user().await?,
        MyselfCommand::Clear => api.clear_myself().await?,
    }
    Ok(())
}

fn print_myself(myself: &Myself) {
    println!("username: {}", myself.username);
    let fields = [
        ("timezone", myself.timezone.as_deref()),
        ("currency", myself.currency.as_deref()),
        ("theme", myself.theme.as_deref()),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            println!("{name}: {value}");
        }
    }
    if let Some(reminder) = myself.reminder_before_task {
        println!("reminder: {}", reminder.text());
    }
    if let Some(points) = myself.points {
        println!("points: {points}");
    }
}

async fn list_projects(api: ProjectsApi) -> anyhow::Result<()> {
    let ProjectsFetch::Modified { projects, .. } = api.get_projects(None).await? else {
        return Ok(());
    };
    for project in &projects.owned {
        print_project(project, 0);
    }
    for shared in &projects.shared {
        println!("shared by {}:", shared.owner);
        for project in &shared.projects {
            print_project(project, 1);
        }
    }
    Ok(())
}

fn print_project(project: &Project, depth: usize) {
    println!(
        "{:indent$}{} [{:?}] #{}",
        "",
        project.name,
        project.project_type,
        project.id,
        indent = depth * 2
    );
    for sub in &project.sub_projects {
        print_project(sub, depth + 1);
    }
}
