use anyhow::{Context, Result};
use clap::Parser;
use snake_mania::game::Level;
use snake_mania::modes::HumanMode;
use snake_mania::settings::Settings;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_mania")]
#[command(version, about = "Grid snake with walls and three levels")]
struct Cli {
    /// Difficulty level: easy, medium or hard
    #[arg(long)]
    level: Option<Level>,

    /// Grid width (defaults to fitting the terminal)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (defaults to fitting the terminal)
    #[arg(long)]
    height: Option<usize>,

    /// Play on an open board without walls
    #[arg(long)]
    no_obstacles: bool,

    /// TOML settings file; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            level: self.level,
            width: self.width,
            height: self.height,
            obstacles: self.no_obstacles.then_some(false),
            log_file: self.log_file.clone(),
        }
    }
}

/// Logs go to a file since the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = cli.settings();
    if let Some(path) = &cli.config {
        settings = Settings::load(path)?.merge(settings);
    }

    if let Some(path) = &settings.log_file {
        init_logging(path)?;
    }

    let config = settings.game_config()?;
    tracing::info!(?config, "Starting snake_mania");

    let mut human_mode = HumanMode::new(config, settings.grid_sizing());
    human_mode.run().await?;

    Ok(())
}
