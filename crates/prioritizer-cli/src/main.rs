use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prioritizer_core::app::{FormInput, Session, SessionBuilder, TaskView};
use prioritizer_core::config::ClientConfig;
use prioritizer_core::domain::Strategy;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prioritizer", about = "Rank tasks with a remote scoring service")]
struct Cli {
    /// TOML config file
    #[arg(long, env = "PRIORITIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Scoring service root, e.g. http://127.0.0.1:8000
    #[arg(long, env = "PRIORITIZER_BASE_URL")]
    base_url: Option<String>,

    /// smart_balance, fastest_wins, high_impact or deadline_driven
    #[arg(long)]
    strategy: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Re-score every task in a JSON file
    Analyze { tasks: PathBuf },
    /// Show the top 3 tasks from a JSON file
    Suggest { tasks: PathBuf },
    /// Interactive session
    Shell,
}

const HELP: &str = "\
commands:
  add <title>|<hours>|<importance>[|<due date>[|<deps, comma separated>]]
  load <path>        replace tasks with a JSON file
  json <text>        replace tasks with inline JSON
  strategy [name]    show or change the strategy
  list               show current tasks
  analyze            score all tasks
  suggest            top 3 tasks for today
  help
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(?config, "configuration loaded");
    let mut session = SessionBuilder::from_config(&config)?.build()?;

    match cli.command {
        Command::Analyze { tasks } => {
            load_file(&mut session, &tasks)?;
            let result = session.analyze().await;
            render(&session);
            result?;
        }
        Command::Suggest { tasks } => {
            load_file(&mut session, &tasks)?;
            let result = session.suggest().await;
            render(&session);
            result?;
        }
        Command::Shell => shell(&mut session).await?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(strategy) = &cli.strategy {
        config.default_strategy = Strategy::new(strategy.as_str());
    }
    Ok(config)
}

fn load_file(session: &mut Session, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    session.load_json(&raw)?;
    Ok(())
}

async fn shell(session: &mut Session) -> Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        // Failures are already recorded as the session status.
        let _ = match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "add" => session.add_task(&parse_add(rest)).map(|_| ()),
            "load" => match std::fs::read_to_string(rest) {
                Ok(raw) => session.load_json(&raw).map(|_| ()),
                Err(e) => {
                    println!("! failed to read {rest}: {e}");
                    continue;
                }
            },
            "json" => session.load_json(rest).map(|_| ()),
            "strategy" => {
                if !rest.is_empty() {
                    session.set_strategy(rest);
                }
                println!("strategy: {}", session.strategy());
                continue;
            }
            "list" => Ok(()),
            "analyze" => session.analyze().await.map(|_| ()),
            "suggest" => session.suggest().await.map(|_| ()),
            other => {
                println!("unknown command {other:?}, try `help`");
                continue;
            }
        };
        render(session);
    }
    Ok(())
}

/// `title|hours|importance|due|deps`; missing trailing parts are empty.
fn parse_add(rest: &str) -> FormInput {
    let mut parts = rest.splitn(5, '|').map(str::trim);
    let mut next = || parts.next().unwrap_or("").to_string();
    let (title, hours, importance) = (next(), next(), next());
    FormInput::new(title, hours, importance)
        .due_date(next())
        .dependencies(next())
}

fn render(session: &Session) {
    if let Some(status) = session.status() {
        let marker = if status.is_error { "!" } else { "*" };
        println!("{marker} {}", status.text);
    }
    for view in session.display() {
        print_card(view);
    }
}

fn print_card(view: &TaskView) {
    println!("[{:<6}] {}  {}", view.tier, view.score_label, view.title);
    println!(
        "          due: {}  hours: {}  importance: {}  deps: {}",
        view.due_date, view.estimated_hours, view.importance, view.dependencies
    );
    if !view.explanation.is_empty() {
        println!("          {}", view.explanation);
    }
}
