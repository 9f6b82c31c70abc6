use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ConfigLoader, CONFIG_ENV};

pub mod commands;

use self::commands::{ListArgs, SummaryArgs};

#[derive(Parser, Debug)]
#[command(
    name = "studytrack",
    version,
    about = "Terminal checklist for tracking study progress"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the config file location (takes precedence over STUDYTRACK_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Load questions from a TOML catalog instead of the built-in lists
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive tracker (default)
    Tui,
    /// Print catalog items with their identifiers
    List(ListArgs),
    /// Print progress statistics for a set of completed identifiers
    Summary(SummaryArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var(CONFIG_ENV, path);
    }

    let loader = ConfigLoader::discover()?;
    loader.paths().ensure_directories()?;
    let paths = loader.paths().clone();
    let command = cli.command.unwrap_or(Commands::Tui);

    let log_target = match command {
        Commands::Tui => LogTarget::File(paths.log_file()),
        _ => LogTarget::Stderr,
    };
    init_tracing(&cli.log_level, &log_target)
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;

    let mut config = loader.load_or_init()?;
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    let catalog = config.load_catalog()?;
    let config = Arc::new(config);

    match command {
        Commands::Tui => commands::run_tui(config, catalog),
        Commands::List(args) => commands::list_items(&catalog, args),
        Commands::Summary(args) => commands::print_summary(&catalog, args),
    }
}

enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn init_tracing(level: &str, target: &LogTarget) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
        match target {
            LogTarget::Stderr => {
                fmt()
                    .with_env_filter(env_filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            LogTarget::File(path) => {
                let file = open_log_file(path)?;
                fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
        }
        Ok::<(), anyhow::Error>(())
    })
    .map(|_| ())
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}
