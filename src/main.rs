use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use connect_four::config::AppConfig;
use connect_four::game::Engine;
use connect_four::logging;
use connect_four::ui::App;

/// Play Connect Four against the computer in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Seed for the computer player
    #[arg(long)]
    seed: Option<u64>,

    /// Override the pause between fall steps, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Override the log filter (e.g. "debug")
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(delay) = cli.delay_ms {
        config.engine.step_delay_ms = delay;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate().context("validating configuration")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.logging).context("initializing logging")?;
    info!(config = %cli.config.display(), seed = ?config.engine.seed, "starting");

    let engine = Engine::from_config(&config.engine);
    let mut app = App::new(engine, &config.ui);
    run(&mut app).context("running terminal UI")
}

fn run(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
