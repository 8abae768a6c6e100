// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use serde::Deserialize;

mod app;
mod client;
mod data;
mod events;
mod ui;

use app::{App, View};
use client::{worker, VitalsClient, DEFAULT_DEVICE_ID, DEFAULT_MONTHS_BACK};
use data::{SoftCache, DEFAULT_CACHE_FILE};

#[derive(Parser, Debug)]
#[command(name = "carelink-monitor")]
#[command(about = "Terminal dashboard for the CareLink remote health monitoring API")]
struct Args {
    /// Base URL of the CareLink API (e.g. an API gateway stage URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Device identifier reported with every request
    #[arg(short, long)]
    device_id: Option<String>,

    /// Months of history requested on fetch
    #[arg(short, long)]
    months_back: Option<u32>,

    /// Path to a TOML config file (api.base_url, api.device_id, api.months_back)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch the latest report, print it as JSON, and exit
    #[arg(long, conflicts_with = "submit_file")]
    fetch: bool,

    /// Publish a JSON array of readings from a file and exit
    #[arg(long)]
    submit_file: Option<PathBuf>,

    /// Disable the on-disk display cache
    #[arg(long)]
    no_cache: bool,

    /// Path of the display cache file
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    cache_file: PathBuf,
}

/// Optional settings file; CLI flags take precedence over it.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    api: ApiSettings,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSettings {
    base_url: Option<String>,
    device_id: Option<String>,
    months_back: Option<u32>,
}

fn load_file_config(path: &std::path::Path) -> Result<FileConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    Ok(settings.try_deserialize()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };

    let base_url = args
        .base_url
        .or(file_config.api.base_url)
        .context("no base URL configured; pass --base-url or set api.base_url in a config file")?;
    let device_id =
        args.device_id.or(file_config.api.device_id).unwrap_or_else(|| DEFAULT_DEVICE_ID.into());
    let months_back =
        args.months_back.or(file_config.api.months_back).unwrap_or(DEFAULT_MONTHS_BACK);

    let client = VitalsClient::new(base_url, device_id);

    // One-shot modes log to stderr; the TUI keeps stderr clean so the
    // alternate screen is never corrupted
    if args.fetch {
        init_tracing();
        return fetch_once(client, months_back);
    }
    if let Some(ref path) = args.submit_file {
        init_tracing();
        return submit_file(client, path);
    }

    let cache = (!args.no_cache).then(|| SoftCache::new(&args.cache_file));
    run_with_client(client, months_back, cache)
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Fetch the latest report and print it as JSON (non-interactive)
fn fetch_once(client: VitalsClient, months_back: u32) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(client.fetch_latest(months_back))?;

    let output = serde_json::json!({
        "vitals_history": report.vitals_history,
        "risk_score": report.risk_score,
        "risk_level": report.risk_level().map(|l| l.label()),
        "summary": report.summary,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Publish a batch of readings from a JSON file (non-interactive)
fn submit_file(client: VitalsClient, path: &std::path::Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let rt = tokio::runtime::Runtime::new()?;
    let count = rt.block_on(client.submit_batch(&raw))?;

    println!("Published {} readings as {}", count, client.device_id());
    Ok(())
}

/// Run the TUI wired to a client worker
fn run_with_client(
    client: VitalsClient,
    months_back: u32,
    cache: Option<SoftCache>,
) -> Result<()> {
    // The runtime lives here so in-flight requests keep resolving while
    // the TUI loop runs on this thread
    let rt = tokio::runtime::Runtime::new()?;
    let (handle, feed) = {
        let _guard = rt.enter();
        worker::spawn(client)
    };

    let app = App::new(handle, feed, months_back, cache);
    run_tui(app)
}

/// Run the TUI with the given app state
fn run_tui(mut app: App) -> Result<()> {
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
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

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
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with risk at a glance
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Dashboard => ui::dashboard::render(frame, app, chunks[2]),
                View::Submit => ui::submit::render(frame, app, chunks[2]),
                View::History => ui::history::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Take in any worker responses that arrived; fetches stay manual
        app.pump_responses();
    }

    Ok(())
}
