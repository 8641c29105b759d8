use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use meshrider_console::app::ConsoleApp;
use meshrider_console::config::ConsoleConfig;
use meshrider_console::diagnostics::DiagnosticCategory;
use meshrider_console::error::{ConsoleError, Result};
use meshrider_console::event::{Event, EventHandler};
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "meshrider-console")]
#[command(author, version, about = "Simulated diagnostic console for MeshRider mesh radios")]
struct Args {
    /// Path to config file (default: ~/.config/meshrider/console.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start straight into a diagnostic flow
    #[arg(long, value_enum)]
    scan: Option<DiagnosticCategory>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if log file is specified
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting meshrider-console");
        }
    }

    let config = match args.config {
        Some(ref path) => ConsoleConfig::load_from(path),
        None => ConsoleConfig::load(),
    }
    .unwrap_or_else(|e| {
        error!("Failed to load config, using defaults: {}", e);
        ConsoleConfig::default()
    });

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;

    let result = run_console(&mut terminal, config, args.scan).await;

    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Console error: {}", e);
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| ConsoleError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| ConsoleError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| ConsoleError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| ConsoleError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen).map_err(|e| ConsoleError::Terminal(e.to_string()))?;
    Ok(())
}

async fn run_console(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: ConsoleConfig,
    scan: Option<DiagnosticCategory>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.tick_rate_ms.max(16));
    let mut events = EventHandler::new(tick_rate);
    let mut app = ConsoleApp::new(config);

    if let Some(category) = scan {
        info!("Starting {} diagnostic from command line", category);
        app.start_diagnostic(category);
    }

    loop {
        terminal
            .draw(|frame| meshrider_console::ui::draw(frame, &app))
            .map_err(|e| ConsoleError::Terminal(e.to_string()))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Event::Key(key)) => app.handle_key(key),
                Some(Event::Tick) => app.tick(),
                Some(Event::Resize) => {}
                None => break,
            },
            update = app.next_flow_update() => app.handle_flow_update(update),
        }

        if app.should_exit {
            break;
        }
    }

    info!("Exiting meshrider-console");
    Ok(())
}
