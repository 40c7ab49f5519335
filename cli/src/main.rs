mod render;

use std::io::{self, IsTerminal};

use clap::{Args, Parser, Subcommand};
use time::{Month, OffsetDateTime};
use tracing::Level;

use unwind::config::{ClientConfig, ConfigError};
use unwind::net::{ApiError, HttpApi, JournalApi};
use unwind::state::calendar::CalendarState;
use unwind::state::compose::{ComposeState, SubmitOutcome};
use unwind::state::dashboard::{DashboardState, GenerateOutcome};
use unwind::state::history::HistoryState;
use unwind::state::insights::InsightsState;
use unwind::state::streak::StreakState;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("client setup failed: {0}")]
    Client(#[from] ApiError),
    #[error("failed to read entry from stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("{0}")]
    ActionFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "unwind", about = "Unwind journaling client", version)]
struct Cli {
    #[arg(long, env = "UNWIND_BACKEND_URL", help = "Backend base URL (default http://127.0.0.1:5000)")]
    base_url: Option<String>,

    #[arg(short, long, global = true, help = "Log request details to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a journal entry and show its detected emotion.
    /// Reads the entry from stdin when TEXT is omitted.
    Write { text: Option<String> },
    /// List journal entries in the order the backend returns.
    History,
    /// Delete one journal entry by its timestamp key.
    Delete { timestamp: String },
    /// Mood timeline, emotion distribution, goals and insights.
    Dashboard,
    /// Generate a coaching suggestion from recent entries.
    Suggest {
        #[arg(long, help = "Add the generated suggestion to your goals")]
        accept: bool,
    },
    Goals(GoalsCommand),
    /// Current journaling streak.
    Streak,
    /// Observations about recurring topics in your entries.
    Insights,
    /// Month view marking days with entries.
    Calendar {
        #[arg(long, value_parser = parse_year_month, help = "Month to show (YYYY-MM)")]
        month: Option<YearMonth>,
    },
}

#[derive(Args, Debug)]
struct GoalsCommand {
    #[command(subcommand)]
    command: GoalsSubcommand,
}

#[derive(Subcommand, Debug)]
enum GoalsSubcommand {
    List,
    Add { text: String },
    Complete { id: String },
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct YearMonth {
    year: i32,
    month: Month,
}

fn parse_year_month(raw: &str) -> Result<YearMonth, String> {
    let invalid = || format!("invalid month '{raw}'; expected YYYY-MM");
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month
        .parse::<u8>()
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(invalid)?;
    Ok(YearMonth { year, month })
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    tracing::debug!(base_url = %config.base_url, "using backend");
    let api = HttpApi::new(&config)?;

    match cli.command {
        Command::Write { text } => run_write(&api, text).await,
        Command::History => run_history(&api).await,
        Command::Delete { timestamp } => run_delete(&api, &timestamp).await,
        Command::Dashboard => run_dashboard(&api).await,
        Command::Suggest { accept } => run_suggest(&api, accept).await,
        Command::Goals(goals) => run_goals(&api, goals).await,
        Command::Streak => {
            let mut state = StreakState::default();
            state.load(&api).await;
            println!("{}", render::streak(&state));
            Ok(())
        }
        Command::Insights => {
            let mut state = InsightsState::default();
            state.load(&api).await;
            print!("{}", render::insights(&state));
            Ok(())
        }
        Command::Calendar { month } => run_calendar(&api, month).await,
    }
}

async fn run_write(api: &dyn JournalApi, text: Option<String>) -> Result<(), CliError> {
    let text = match text {
        Some(text) => text,
        None => {
            if io::stdin().is_terminal() {
                eprintln!("How are you feeling today? (end with Ctrl+D)");
            }
            io::read_to_string(io::stdin())?
        }
    };

    let mut state = ComposeState::new(text);
    match state.submit(api).await {
        SubmitOutcome::Skipped => {
            println!("Nothing to analyze; the entry is empty.");
            Ok(())
        }
        SubmitOutcome::Classified(prediction) => {
            println!("{}", render::prediction(&prediction));
            Ok(())
        }
        SubmitOutcome::Failed => Err(CliError::ActionFailed("could not analyze the entry".to_owned())),
    }
}

async fn run_history(api: &dyn JournalApi) -> Result<(), CliError> {
    let mut state = HistoryState::default();
    state.load(api).await;
    print!("{}", render::history(&state));
    Ok(())
}

async fn run_delete(api: &dyn JournalApi, timestamp: &str) -> Result<(), CliError> {
    let mut state = HistoryState::default();
    if !state.delete(api, timestamp).await {
        return Err(CliError::ActionFailed(format!("could not delete entry {timestamp}")));
    }
    println!("{}", render::entry_deleted(timestamp));
    Ok(())
}

async fn run_dashboard(api: &dyn JournalApi) -> Result<(), CliError> {
    let mut dashboard = DashboardState::default();
    let mut streak = StreakState::default();
    let mut insights = InsightsState::default();
    tokio::join!(dashboard.load(api), streak.load(api), insights.load(api));

    print!("{}", render::dashboard(&dashboard, &streak, &insights));
    Ok(())
}

async fn run_suggest(api: &dyn JournalApi, accept: bool) -> Result<(), CliError> {
    let mut dashboard = DashboardState::default();
    dashboard.load(api).await;

    let card = match dashboard.generate_suggestion(api).await {
        GenerateOutcome::Disabled => {
            println!("{}", render::suggestion_locked(dashboard.entries.len()));
            return Ok(());
        }
        GenerateOutcome::Shown(card) => card,
    };

    if !accept {
        println!("{}", render::suggestion(&card));
        return Ok(());
    }
    println!("Suggestion: {}", card.message());
    if !card.can_accept() {
        return Ok(());
    }
    match dashboard.accept_suggestion(api).await {
        Some(goal) => {
            println!("Added goal {}.", goal.id);
            Ok(())
        }
        None => Err(CliError::ActionFailed("could not add the suggestion to your goals".to_owned())),
    }
}

async fn run_goals(api: &dyn JournalApi, goals: GoalsCommand) -> Result<(), CliError> {
    let mut dashboard = DashboardState::default();
    dashboard.load(api).await;

    match goals.command {
        GoalsSubcommand::List => {}
        GoalsSubcommand::Add { text } => {
            if dashboard.add_goal(api, &text).await.is_none() {
                return Err(CliError::ActionFailed("could not add goal".to_owned()));
            }
        }
        GoalsSubcommand::Complete { id } => {
            if !dashboard.complete_goal(api, &id).await {
                return Err(CliError::ActionFailed(format!("could not complete goal {id}")));
            }
        }
        GoalsSubcommand::Delete { id } => {
            if !dashboard.delete_goal(api, &id).await {
                return Err(CliError::ActionFailed(format!("could not delete goal {id}")));
            }
        }
    }
    print!("{}", render::goals(&dashboard));
    Ok(())
}

async fn run_calendar(api: &dyn JournalApi, month: Option<YearMonth>) -> Result<(), CliError> {
    let mut state = CalendarState::default();
    state.load(api).await;

    let (year, month) = match month {
        Some(YearMonth { year, month }) => (year, month),
        None => render::default_month(&state, OffsetDateTime::now_utc().date()),
    };
    print!("{}", render::calendar(&state, year, month));
    Ok(())
}
