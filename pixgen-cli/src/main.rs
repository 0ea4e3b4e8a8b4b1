use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};

mod logging;
mod oneshot;
mod tui;

use pixgen_core::{Config, Settings};
use pixgen_engine::{GenerationSession, StabilityClient};
use tui::app::TuiApp;

/// Generate images from text prompts with Stability AI.
#[derive(Debug, Parser)]
#[command(name = "pixgen", version, about)]
struct Args {
    /// Generate one image for this prompt and exit instead of opening the TUI
    #[arg(short, long)]
    prompt: Option<String>,

    /// Directory for saved images (overrides output.dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not write generated images to disk
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(dir) = args.output {
        config.settings.output.dir = dir;
    }
    if args.no_save {
        config.settings.output.save = false;
    }

    logging::init(&config.settings.logging, args.prompt.is_none())?;
    info!("Settings loaded from {}", Settings::config_path()?.display());

    let client = StabilityClient::from_config(&config)?;
    let output = config.settings.output.clone();
    let mut session = GenerationSession::new(Arc::new(client), config.settings.generation);

    match args.prompt {
        Some(prompt) => {
            let report = oneshot::run(&mut session, &prompt, &output).await?;
            println!("{}", report);
            Ok(())
        }
        None => run_tui(session, output).await,
    }
}

async fn run_tui(
    session: GenerationSession,
    output: pixgen_core::OutputSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(session, output);

    let result = match app.run(&mut terminal).await {
        Ok(()) => {
            info!("Application exited normally");
            Ok(())
        }
        Err(e) => {
            error!("Application error: {}", e);
            Err(e)
        }
    };

    // Restore terminal
    terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
