//! mangalag - See how many chapters behind you are on your reading list
//!
//! A terminal UI that fetches a reading list from the aggregation API, works
//! out how many chapters behind each title is, and caches the result locally.

mod app;
mod ui;

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use mangalag::cache::default_cache_dir;
use mangalag::cli::{Cli, OutputMode, StartupConfig};
use mangalag::data::OutdatedEntry;
use mangalag::format::{clean_number, DEFAULT_PRECISION};
use mangalag::refresh::ReadingList;

use app::App;

/// File name of the log written next to the cache
const LOG_FILE_NAME: &str = "mangalag.log";

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Builds the log filter from `RUST_LOG`, falling back to `default`
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initializes tracing
///
/// Print mode logs warnings to stderr. The TUI owns the terminal, so it logs
/// to a file instead; the returned guard flushes that file on drop. Without a
/// usable log location the TUI runs without logging.
fn init_logging(config: &StartupConfig) -> io::Result<Option<WorkerGuard>> {
    if config.mode == OutputMode::Print {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter("warn"))
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    }

    let log_path = config.log_file.clone().or_else(|| {
        config
            .reading_list
            .cache_dir
            .clone()
            .or_else(default_cache_dir)
            .map(|dir| dir.join(LOG_FILE_NAME))
    });
    let Some(log_path) = log_path else {
        return Ok(None);
    };

    let dir = log_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = log_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME));
    fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}

/// Formats one entry for print mode: `+<left>  <title> (<read>/<total>)`
fn print_line(entry: &OutdatedEntry) -> String {
    format!(
        "+{}  {} ({}/{})",
        clean_number(entry.chapters_left, DEFAULT_PRECISION),
        entry.title,
        clean_number(entry.chapters_read, DEFAULT_PRECISION),
        clean_number(entry.total_chapters, DEFAULT_PRECISION)
    )
}

/// Prints the list to stdout, refreshing first if the cache is cold
async fn run_print(config: &StartupConfig) -> Result<(), Box<dyn Error>> {
    let mut list = ReadingList::new(&config.reading_list);

    let cached = list.load_cache().len();
    if cached == 0 || config.refresh_on_start {
        list.refresh(config.force_clear).await;
    }

    let mut stdout = io::stdout().lock();
    if list.entries().is_empty() {
        writeln!(stdout, "No titles behind.")?;
    }
    for entry in list.entries() {
        writeln!(stdout, "{}", print_line(entry))?;
    }
    Ok(())
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_reading_list(frame, app);
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Main event loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.poll_refresh();
        app.process_refresh_request();

        terminal.draw(|f| render_ui(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Runs the interactive terminal UI
fn run_tui(config: &StartupConfig) -> Result<(), Box<dyn Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    let list = ReadingList::new(&config.reading_list);
    let mut app = App::new(list, config.reading_list.username.clone());

    // Show the cached list right away; fetch if there is none
    let has_cache = app.load_cache();
    if !has_cache || config.refresh_on_start {
        app.start_refresh(config.force_clear);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    let _log_guard = init_logging(&config)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        username = %config.reading_list.username,
        base_url = %config.reading_list.base_url,
        "starting mangalag"
    );

    match config.mode {
        OutputMode::Print => run_print(&config).await,
        OutputMode::Tui => run_tui(&config),
    }
}
