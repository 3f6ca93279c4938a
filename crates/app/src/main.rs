use std::fmt;
use std::sync::Arc;

use progress_core::model::{ActivityType, MAX_WINDOW_DAYS};
use serde_json::json;
use services::{Clock, HttpProgressApi, ProgressApiConfig, ProgressTracker, SessionService};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

const DEFAULT_WEEKLY_DAYS: u32 = 7;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    InvalidDays { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing argument: <{name}>"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDays { raw } => write!(f, "invalid --days value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [--db <sqlite_url>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  progress                        per-subject counters");
    eprintln!("  weekly [--days <n>]             daily activity for the last n days (default 7)");
    eprintln!("  history                         learning timeline, most recent first");
    eprintln!("  streak                          consecutive-day streak");
    eprintln!("  summary                         headline totals and scores");
    eprintln!("  record <subject> <pdf|ai|test>  record one activity");
    eprintln!("  chat <text>                     record an AI question by detected subject");
    eprintln!("  reset                           clear all progress");
    eprintln!("  login --email <e> --token <t>   store a session");
    eprintln!("  logout                          forget the session");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:progress.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PROGRESS_DB_URL, PROGRESS_API_URL, PROGRESS_API_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Progress,
    Weekly { days: u32 },
    History,
    Streak,
    Summary,
    Record { subject: String, activity: String },
    Chat { text: String },
    Reset,
    Login { email: String, token: String },
    Logout,
}

struct Args {
    db_url: String,
    command: Command,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PROGRESS_DB_URL")
            .ok()
            .map_or_else(
                || normalize_sqlite_url("sqlite:progress.sqlite3".into()),
                normalize_sqlite_url,
            );
        let mut args = args.peekable();

        while let Some(arg) = args.next_if(|arg| arg.starts_with('-')) {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let name = args.next().ok_or(ArgsError::MissingArgument { name: "command" })?;
        let command = Self::parse_command(&name, &mut args)?;
        if let Some(extra) = args.next() {
            return Err(ArgsError::UnknownArg(extra));
        }
        Ok(Self { db_url, command })
    }

    fn parse_command(
        name: &str,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Command, ArgsError> {
        let command = match name {
            "progress" => Command::Progress,
            "history" => Command::History,
            "streak" => Command::Streak,
            "summary" => Command::Summary,
            "reset" => Command::Reset,
            "logout" => Command::Logout,
            "weekly" => {
                let mut days = DEFAULT_WEEKLY_DAYS;
                if let Some(flag) = args.next() {
                    if flag != "--days" {
                        return Err(ArgsError::UnknownArg(flag));
                    }
                    let value = require_value(args, "--days")?;
                    days = value
                        .parse::<u32>()
                        .ok()
                        .filter(|days| (1..=MAX_WINDOW_DAYS).contains(days))
                        .ok_or_else(|| ArgsError::InvalidDays { raw: value.clone() })?;
                }
                Command::Weekly { days }
            }
            "record" => {
                let subject = args
                    .next()
                    .ok_or(ArgsError::MissingArgument { name: "subject" })?;
                let activity = args
                    .next()
                    .ok_or(ArgsError::MissingArgument { name: "activity" })?;
                Command::Record { subject, activity }
            }
            "chat" => {
                let words: Vec<String> = args.collect();
                if words.is_empty() {
                    return Err(ArgsError::MissingArgument { name: "text" });
                }
                Command::Chat {
                    text: words.join(" "),
                }
            }
            "login" => {
                let mut email = None;
                let mut token = None;
                while let Some(flag) = args.next() {
                    match flag.as_str() {
                        "--email" => email = Some(require_value(args, "--email")?),
                        "--token" => token = Some(require_value(args, "--token")?),
                        _ => return Err(ArgsError::UnknownArg(flag)),
                    }
                }
                Command::Login {
                    email: email.ok_or(ArgsError::MissingValue { flag: "--email" })?,
                    token: token.ok_or(ArgsError::MissingValue { flag: "--token" })?,
                }
            }
            other => return Err(ArgsError::UnknownArg(other.to_string())),
        };
        Ok(command)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Storage and HTTP wiring stay in the binary so core/services remain testable.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let api_config = ProgressApiConfig::from_env()?;
    let remote = Arc::new(HttpProgressApi::new(&api_config)?);
    let tracker = ProgressTracker::new(Clock::default_clock(), Arc::clone(&storage.kv), remote);
    let sessions = SessionService::new(Arc::clone(&storage.kv));

    match parsed.command {
        Command::Progress => print_json(&tracker.progress_snapshot().await)?,
        Command::Weekly { days } => print_json(&tracker.weekly_window(days).await)?,
        Command::History => print_json(&tracker.history_snapshot().await)?,
        Command::Streak => print_json(&tracker.streak().await)?,
        Command::Summary => print_json(&tracker.summary().await)?,
        Command::Record { subject, activity } => {
            tracker
                .record_activity(&subject, &ActivityType::from(activity))
                .await;
            print_json(&tracker.progress_snapshot().await)?;
        }
        Command::Chat { text } => {
            let detected = tracker.record_chat_message(&text).await;
            print_json(&json!({ "subject": detected.map(|s| s.name()) }))?;
        }
        Command::Reset => {
            tracker.reset_progress().await;
            print_json(&tracker.progress_snapshot().await)?;
        }
        Command::Login { email, token } => {
            sessions.save_session(&token, &email).await?;
            print_json(&json!({ "email": email }))?;
        }
        Command::Logout => {
            sessions.clear_session().await?;
            print_json(&json!({ "email": null }))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
