use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use notion_dashboard::{
    events, export, pipeline, ui, App, DashboardConfig, FileSource, NotionSource, Outcome,
    RecordSource,
};

#[derive(Parser, Debug)]
#[command(name = "notion-dashboard")]
#[command(about = "Terminal dashboard for project records stored in a Notion database")]
struct Args {
    /// Path to the TOML config file (missing file is allowed)
    #[arg(short, long, default_value = "dashboard.toml")]
    config: PathBuf,

    /// Read a saved query response instead of calling the Notion API
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Export the computed dashboard to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.export.is_some() {
        init_logging_stderr();
    } else if let Some(ref path) = args.log_file {
        init_logging_file(path)?;
    }

    let config = DashboardConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    tracing::debug!(?config, "configuration loaded");

    let source = build_source(&args, &config)?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(source, &config, export_path);
    }

    run_tui(source, config)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

/// Stdout belongs to the terminal UI, so TUI-mode logs go to a file.
fn init_logging_file(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Pick the saved-response file when given, the Notion API otherwise.
fn build_source(args: &Args, config: &DashboardConfig) -> Result<Box<dyn RecordSource>> {
    if let Some(ref path) = args.input {
        return Ok(Box::new(FileSource::new(path)));
    }
    let source = NotionSource::from_config(config)?;
    Ok(Box::new(source))
}

/// Run the TUI with the given record source
fn run_tui(source: Box<dyn RecordSource>, config: DashboardConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, config);
    app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll with a timeout so the footer's load age keeps ticking
        if let Some(event) = events::poll_event(Duration::from_millis(250))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Run the pipeline once and write the outcome to a JSON file
fn export_to_file(
    mut source: Box<dyn RecordSource>,
    config: &DashboardConfig,
    export_path: &Path,
) -> Result<()> {
    let outcome = pipeline::run(source.as_mut(), config);
    export::write_outcome(&outcome, export_path)?;

    if let Outcome::Failed(err) = outcome {
        return Err(err).context(format!(
            "Fetch from {} failed (details in {})",
            source.description(),
            export_path.display()
        ));
    }

    println!("Exported dashboard state to: {}", export_path.display());
    Ok(())
}
