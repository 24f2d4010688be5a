mod config;
mod render;
mod shell;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Args, Parser, Subcommand};
use dotenvy::dotenv;
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{
    Dashboard, EmployeeClient, EmployeeId, Field, HttpTransport, LoadState, SortKey, Transport,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "employee-ace", version, about = "Employee performance dashboard")]
struct Cli {
    /// GraphQL endpoint; overrides APP_ENV and GRAPHQL_ENDPOINT.
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the employee table with its statistics.
    List(ListCommand),
    /// Create an employee, then print the refreshed table.
    Create(CreateCommand),
    /// Replace an employee's metrics, then print the refreshed table.
    Update(UpdateCommand),
    /// Delete an employee after confirmation, then print the refreshed table.
    Delete(DeleteCommand),
    /// Interactive dashboard on stdin/stdout.
    Dashboard,
}

#[derive(Args, Debug)]
struct ListCommand {
    #[arg(long, help = "Case-insensitive substring of the employee name")]
    search: Option<String>,
    #[arg(long, value_name = "COLUMN")]
    sort: Option<SortKey>,
    #[arg(long, requires = "sort", help = "Sort descending")]
    desc: bool,
}

#[derive(Args, Debug)]
struct MetricArgs {
    #[arg(long)]
    metric1: String,
    #[arg(long)]
    metric2: String,
    #[arg(long)]
    metric3: String,
}

#[derive(Args, Debug)]
struct CreateCommand {
    #[arg(long)]
    name: String,
    #[command(flatten)]
    metrics: MetricArgs,
}

#[derive(Args, Debug)]
struct UpdateCommand {
    #[arg(long)]
    id: String,
    #[command(flatten)]
    metrics: MetricArgs,
}

#[derive(Args, Debug)]
struct DeleteCommand {
    #[arg(long)]
    id: String,
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let tracing_guard = init_tracing(ObsConfig::default().verbosity(cli.verbose))?;
    let config = AppConfig::load()?.with_endpoint_override(cli.endpoint)?;
    info!(
        endpoint = %config.endpoint,
        environment = ?config.environment,
        otlp = tracing_guard.exporting(),
        "using employee API"
    );

    let client = EmployeeClient::new(HttpTransport::new(config.endpoint.clone()));
    let mut dashboard = Dashboard::new(client);
    match cli.command {
        Command::List(cmd) => list(&mut dashboard, cmd).await,
        Command::Create(cmd) => create(&mut dashboard, cmd).await,
        Command::Update(cmd) => update(&mut dashboard, cmd).await,
        Command::Delete(cmd) => delete(&mut dashboard, cmd).await,
        Command::Dashboard => shell::run(&mut dashboard).await,
    }
}

fn print_screen<T: Transport>(dashboard: &Dashboard<T>) -> Result<()> {
    if let LoadState::Failed(message) = dashboard.load_state() {
        return Err(anyhow!(message.clone()).context("failed to load employees"));
    }
    println!("{}", render::screen(&dashboard.screen(), dashboard.query()));
    Ok(())
}

async fn list<T: Transport>(dashboard: &mut Dashboard<T>, cmd: ListCommand) -> Result<()> {
    if let Some(search) = cmd.search {
        dashboard.set_search(search);
    }
    if let Some(key) = cmd.sort {
        dashboard.sort_by(key);
        if cmd.desc {
            dashboard.sort_by(key);
        }
    }
    dashboard.refresh().await;
    print_screen(dashboard)
}

fn fill_metrics<T: Transport>(dashboard: &mut Dashboard<T>, metrics: MetricArgs) -> Result<()> {
    let draft = dashboard
        .editor_mut()
        .draft_mut()
        .context("edit form did not open")?;
    draft.set(Field::Metric1, metrics.metric1);
    draft.set(Field::Metric2, metrics.metric2);
    draft.set(Field::Metric3, metrics.metric3);
    Ok(())
}

async fn save<T: Transport>(dashboard: &mut Dashboard<T>) -> Result<()> {
    let outcome = dashboard.save().await?;
    print_screen(dashboard)?;
    let employee = outcome.context("the server did not accept the change")?;
    info!(id = %employee.id, score = employee.performance_score, "employee saved");
    Ok(())
}

async fn create<T: Transport>(dashboard: &mut Dashboard<T>, cmd: CreateCommand) -> Result<()> {
    dashboard.open_create();
    fill_metrics(dashboard, cmd.metrics)?;
    if let Some(draft) = dashboard.editor_mut().draft_mut() {
        draft.set(Field::Name, cmd.name);
    }
    save(dashboard).await
}

async fn update<T: Transport>(dashboard: &mut Dashboard<T>, cmd: UpdateCommand) -> Result<()> {
    // The form is populated from the current list, so load it first.
    dashboard.refresh().await;
    if let LoadState::Failed(message) = dashboard.load_state() {
        return Err(anyhow!(message.clone()).context("failed to load employees"));
    }
    dashboard.open_edit(&EmployeeId::new(cmd.id)).await?;
    fill_metrics(dashboard, cmd.metrics)?;
    save(dashboard).await
}

async fn delete<T: Transport>(dashboard: &mut Dashboard<T>, cmd: DeleteCommand) -> Result<()> {
    let id = EmployeeId::new(cmd.id);
    dashboard.request_delete(id.clone());
    if !cmd.yes && !ask_confirmation(&id).await? {
        dashboard.cancel_delete();
        println!("deletion cancelled");
        return Ok(());
    }
    let outcome = dashboard.confirm_delete().await?;
    print_screen(dashboard)?;
    outcome.with_context(|| format!("failed to delete employee {id}"))?;
    Ok(())
}

async fn ask_confirmation(id: &EmployeeId) -> Result<bool> {
    println!("Delete employee {id}? This action cannot be undone. [y/N]");
    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "confirm"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn endpoint_and_verbosity_are_global() {
        let cli = Cli::try_parse_from([
            "employee-ace",
            "list",
            "--endpoint",
            "http://127.0.0.1:5000/graphql",
            "-vv",
            "--sort",
            "score",
            "--desc",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:5000/graphql"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::List(list) => {
                assert_eq!(list.sort, Some(SortKey::Score));
                assert!(list.desc);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn desc_requires_a_sort_column() {
        assert!(Cli::try_parse_from(["employee-ace", "list", "--desc"]).is_err());
    }
}
