#![forbid(unsafe_code)]

mod render;
mod vm;

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use hafiz_core::model::{JuzId, JuzIdError, Stage, ThemeMode};
use services::{AppServices, Clock, RecordedProgress, ambient_theme_from_env};

use crate::render::Palette;
use crate::vm::{
    ContinueCardVm, JuzCardVm, StatsVm, map_history_rows, map_juz_cards, map_stage_options,
};

#[derive(Debug, Parser)]
#[command(name = "hafiz", version, about = "Track your reading across the 30 Juz")]
struct Cli {
    /// SQLite database URL or path.
    #[arg(long, env = "HAFIZ_DB_URL", default_value = "sqlite://hafiz.sqlite3")]
    db: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Where you left off, a reflection, and overall progress.
    Status,
    /// All 30 Juz with their stages.
    List,
    /// Details for one Juz.
    Show { juz: String },
    /// Record a stage for a Juz (number 0-5 or name such as `half`).
    Record { juz: String, stage: String },
    /// Mark a Juz as not started.
    Clear { juz: String },
    /// Record a stage for the last active Juz.
    Continue { stage: String },
    /// Most recent updates, newest first.
    History,
    /// Completion summary.
    Stats,
    /// Show or change the color theme.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Delete all saved progress and settings.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || ArgsError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid().into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        log::info!("creating database file {}", path.display());
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Parse a Juz argument. Numbers outside `1..=30` yield `None` after a notice.
fn select_juz(palette: Palette, raw: &str) -> Result<Option<JuzId>, hafiz_core::Error> {
    match raw.parse::<JuzId>() {
        Ok(id) => Ok(Some(id)),
        Err(JuzIdError::OutOfRange(_)) => {
            render::notice(
                palette,
                &format!(
                    "There is no Juz {}; choose one from 1 to 30. Nothing changed.",
                    raw.trim()
                ),
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_stage(raw: &str) -> Result<Stage, hafiz_core::Error> {
    Ok(raw.parse::<Stage>()?)
}

fn report_recorded(palette: Palette, recorded: &RecordedProgress) {
    let id = recorded.entry.juz();
    render::juz_detail(palette, &JuzCardVm::for_juz(&recorded.state, id));
    if !recorded.persisted {
        render::warning("Could not save to disk; this update lasts only for this run.");
    }
}

fn confirm_reset() -> io::Result<bool> {
    print!("This deletes all progress, history and settings. Continue? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.db.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: cli.db }.into());
    }
    let db_url = normalize_sqlite_url(&cli.db);
    log::debug!("using database {db_url}");
    // Open + migrate SQLite at startup so the services only ever see a ready store.
    prepare_sqlite_file(&db_url)?;
    let services =
        AppServices::new_sqlite(&db_url, Clock::system(), ambient_theme_from_env()).await?;

    let progress = services.progress();
    let themes = services.theme();
    let palette = Palette::new(themes.load().await);

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => {
            let state = progress.snapshot();
            render::continue_card(palette, &ContinueCardVm::from(&state));
            println!();

            let reflection = services.reflection();
            reflection.refresh(state.last_active()).await;
            render::reflection(palette, &reflection.current());
            println!();

            render::stats(palette, &StatsVm::from(progress.stats()));
        }
        Command::List => {
            render::juz_grid(palette, &map_juz_cards(&progress.snapshot()));
        }
        Command::Show { juz } => {
            if let Some(id) = select_juz(palette, &juz)? {
                let state = progress.snapshot();
                render::juz_detail(palette, &JuzCardVm::for_juz(&state, id));
                println!();
                render::stage_options(palette, &map_stage_options(state.stage_of(id)));
            }
        }
        Command::Record { juz, stage } => {
            let stage = parse_stage(&stage)?;
            if let Some(id) = select_juz(palette, &juz)? {
                report_recorded(palette, &progress.record_progress(id, stage).await);
            }
        }
        Command::Clear { juz } => {
            if let Some(id) = select_juz(palette, &juz)? {
                report_recorded(palette, &progress.clear_progress(id).await);
            }
        }
        Command::Continue { stage } => {
            let stage = parse_stage(&stage)?;
            let (id, _) = progress.last_active();
            report_recorded(palette, &progress.record_progress(id, stage).await);
        }
        Command::History => {
            render::history(palette, &map_history_rows(&progress.snapshot()));
        }
        Command::Stats => {
            render::stats(palette, &StatsVm::from(progress.stats()));
        }
        Command::Theme { action } => {
            let mode = match action {
                None => themes.load().await,
                Some(ThemeAction::Light) => themes.set(ThemeMode::Light).await,
                Some(ThemeAction::Dark) => themes.set(ThemeMode::Dark).await,
                Some(ThemeAction::Toggle) => themes.toggle().await,
            };
            render::theme(Palette::new(mode), mode);
        }
        Command::Reset { yes } => {
            if !yes && !confirm_reset()? {
                render::notice(palette, "Reset cancelled.");
                return Ok(());
            }
            progress.reset().await?;
            render::notice(palette, "All progress cleared.");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        render::warning(&err.to_string());
        std::process::exit(2);
    }
}
