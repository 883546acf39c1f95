use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use bowling_arcade::config::AppConfig;
use bowling_arcade::ui::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

/// Play a three-frame bowling game in the terminal.
#[derive(Parser)]
#[command(name = "bowling_arcade", about = "Three-frame bowling in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "bowling.toml")]
    config: PathBuf,

    /// Seed the lane for reproducible pinfall
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        config.lane.seed = Some(seed);
    }

    let mut app = App::new(&config).context("creating game")?;
    run_terminal(&mut app)
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_terminal(app: &mut App) -> Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running game")
}
