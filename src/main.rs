mod calc;
mod cmd;
mod data;
mod logging;
mod net;
mod state;
mod ui;

use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "yearcal", about = "year-at-a-glance calendar with holidays and schedules")]
struct Cli {
    /// Directory holding config.yaml and logs (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Write the log to this file instead of <config-dir>/logs
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// trace | debug | info | warn | error | off (RUST_LOG takes precedence)
    #[arg(long, default_value = logging::default_log_level())]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml
    Init,
    /// Fetch and list the public holidays of a year
    Holidays {
        /// Year to list (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Print a year grid as text
    Grid {
        /// Year to print (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve config_dir to an absolute path so file I/O is independent of later cwd changes.
    let config_dir = if cli.config_dir.is_absolute() {
        cli.config_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.config_dir)
    };
    data::persistence::set_config_dir(config_dir.clone());

    let log_target = logging::LogTarget::resolve(cli.log_file.as_deref(), &config_dir);
    let _logger = match logging::init_logging(&cli.log_level, &log_target) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logging disabled: {e:#}");
            None
        }
    };

    // Auto-init when config.yaml is missing and the user did not explicitly invoke `init`.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && config_needs_init(&config_dir) {
        eprintln!(
            "No config found in '{}', running init...",
            config_dir.display()
        );
        if let Err(e) = cmd::init::run_in_dir(&config_dir) {
            warn!("auto-init failed: {e:#}");
        }
    }

    let settings = match data::AppSettings::load_from(&config_dir) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("using default settings: {e:#}");
            data::AppSettings::default()
        }
    };
    info!("config loaded from {}", config_dir.display());

    let this_year = Local::now().year();
    match cli.command {
        None => cmd::root::run(settings).await,
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Holidays { year }) => {
            cmd::holidays::run(&settings, year.unwrap_or(this_year)).await
        }
        Some(Commands::Grid { year }) => cmd::grid::run(&settings, year.unwrap_or(this_year)).await,
    }
}

/// Returns true when `dir` has no config.yaml yet.
fn config_needs_init(dir: &Path) -> bool {
    !dir.join("config.yaml").exists()
}
