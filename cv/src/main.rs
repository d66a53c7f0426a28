//! cv - Checkvist command-line client
//!
//! CLI entry point: list checklists, create task hierarchies from text, delete tasks.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use checkvist::api::{CheckvistApi, CheckvistClient, TaskRef};
use checkvist::cli::{Cli, Command, USAGE_EXAMPLES};
use checkvist::config::{ApiConfig, Config, Credentials};
use checkvist::creator::HierarchyCreator;
use checkvist::parser::{ParseError, ParsedStructure, parse_lines};
use checkvist::source::LineSource;
use checkvist::{render, trace};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > WARN
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
                tracing::Level::WARN
            }
        },
        None => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to install tracing subscriber: {}", e))?;

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Peek at the log level before the full config load so its warnings are visible
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::List { list_id, notes }) => cmd_list(&config, list_id, notes).await,
        Some(Command::Create {
            files,
            no_stdin,
            list_id,
            dry_run,
        }) => cmd_create(&config, files, !no_stdin, list_id, dry_run).await,
        Some(Command::Delete { task_id, list_id }) => cmd_delete(&config, task_id, list_id).await,
        None => {
            debug!("main: no command specified, printing usage");
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Load credentials or exit; nothing is sent before this succeeds
fn load_credentials(config: &ApiConfig) -> Credentials {
    match Credentials::from_env(config) {
        Ok(credentials) => {
            debug!(?credentials, "load_credentials: loaded");
            credentials
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn connect(config: &Config) -> Result<CheckvistClient> {
    let credentials = load_credentials(&config.api);
    CheckvistClient::new(&config.api, credentials).context("Failed to build API client")
}

fn resolve_list(config: &Config, list_id: Option<u64>) -> Result<u64> {
    list_id.or(config.api.default_list).ok_or_else(|| {
        eyre::eyre!("No checklist given. Pass --list <ID> or set api.default-list in the config file.")
    })
}

/// Show the user and their checklists, or one checklist's tasks
async fn cmd_list(config: &Config, list_id: Option<u64>, notes: bool) -> Result<()> {
    debug!(?list_id, notes, "cmd_list: called");
    let api = connect(config)?;

    trace::value("login", api.login().await.context("Login failed")?);
    let user = trace::value("current_user", api.current_user().await?);
    println!("Logged in as {} <{}>", user.username.cyan(), user.email);

    let Some(list_id) = list_id else {
        let lists = trace::list("lists", api.lists().await?);
        if lists.is_empty() {
            println!("No checklists found");
        }
        for list in &lists {
            println!("{}", render::checklist_line(list));
        }
        return Ok(());
    };

    let list = trace::value("list", api.list(list_id).await?);
    println!("{}", render::checklist_line(&list));

    let tasks = trace::list("tasks", api.tasks(list_id).await?);
    for (depth, task) in render::task_tree(&tasks) {
        println!("{}", render::task_line(depth + 1, task));
        if notes && task.comments_count > 0 {
            let target = TaskRef {
                id: task.id,
                checklist_id: list_id,
            };
            let task_notes = trace::list("notes", api.notes(target).await?);
            for note in &task_notes {
                for line in render::note_lines(depth + 1, note) {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

/// Parse input into a hierarchy and create it
async fn cmd_create(
    config: &Config,
    files: Vec<PathBuf>,
    read_stdin: bool,
    list_id: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    debug!(?files, read_stdin, ?list_id, dry_run, "cmd_create: called");

    let target = if dry_run {
        None
    } else {
        Some((connect(config)?, resolve_list(config, list_id)?))
    };

    let source = LineSource::new(read_stdin, &files);
    for unreadable in source.unreadable() {
        warn!(path = %unreadable.path.display(), reason = %unreadable.reason, "Skipping unreadable file");
        eprintln!("{} Skipping unreadable file {}", "warning:".yellow(), unreadable);
    }

    let structure = match parse_lines(source.into_lines().map(|line| line.text)) {
        Ok(structure) => trace::value("structure", structure),
        Err(ParseError::EmptyInput) => {
            eprintln!("{}", USAGE_EXAMPLES);
            return Err(ParseError::EmptyInput).context("Nothing to create: pipe text into `cv create` or pass files");
        }
    };

    let Some((api, list_id)) = target else {
        print_structure(&structure);
        return Ok(());
    };

    let created = HierarchyCreator::new(&api, list_id)
        .create(&structure)
        .await
        .context("Task creation stopped; tasks created before the failure were kept")?;
    info!(parent = created.parent.id, children = created.children.len(), "cmd_create: done");

    println!(
        "{} Created {} in list {} with {} subtasks{}",
        "✓".green(),
        format!("#{}", created.parent.id).cyan(),
        list_id,
        created.children.len(),
        if created.note.is_some() { " and a note" } else { "" }
    );
    Ok(())
}

fn print_structure(structure: &ParsedStructure) {
    println!("{}", structure.title.bold());
    for child in &structure.children {
        println!("  {}. {}", child.position, child.text);
    }
    if structure.has_note() {
        println!();
        for line in structure.note.lines() {
            println!("  {} {}", "|".dimmed(), line);
        }
    }
}

async fn cmd_delete(config: &Config, task_id: u64, list_id: Option<u64>) -> Result<()> {
    debug!(task_id, ?list_id, "cmd_delete: called");
    let api = connect(config)?;
    let list_id = resolve_list(config, list_id)?;

    api.delete_task(task_id, list_id)
        .await
        .context(format!("Failed to delete task {}", task_id))?;
    println!("{} Deleted task {} from list {}", "✓".green(), task_id, list_id);
    Ok(())
}
