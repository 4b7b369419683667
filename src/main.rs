use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use mode_snake::app::TerminalApp;
use mode_snake::game::{GameConfig, GameMode};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mode_snake")]
#[command(version, about = "Snake with five rule sets")]
struct Cli {
    /// Mode highlighted in the menu at launch
    #[arg(long, default_value = "classic")]
    mode: Mode,

    /// Milliseconds between ticks at the start of a game
    #[arg(long, default_value = "500")]
    tick_ms: u64,

    /// Fixed seed for food and wall placement
    #[arg(long)]
    seed: Option<u64>,

    /// File the log is written to (the terminal belongs to the game)
    #[arg(long, default_value = "mode_snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Eat, grow, avoid edges and yourself
    Classic,
    /// Every meal speeds the snake up
    Speed,
    /// Edges wrap, self-crossing allowed
    NoDie,
    /// Two food cells that teleport into each other
    Portal,
    /// Every meal leaves a wall
    Walls,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Classic => GameMode::Classic,
            Mode::Speed => GameMode::Speed,
            Mode::NoDie => GameMode::NoDie,
            Mode::Portal => GameMode::Portal,
            Mode::Walls => GameMode::Walls,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    // Create game configuration from CLI arguments
    let config = GameConfig {
        seed: cli.seed,
        ..GameConfig::default()
    }
    .with_tick_ms(cli.tick_ms);

    info!("starting with {:?}", config);

    let mut app = TerminalApp::new(config, cli.mode.into());
    app.run().await
}
