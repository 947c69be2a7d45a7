mod api;
mod config;
mod models;
mod render;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::Level;

use api::OpenClassClient;
use config::Config;
use tui::{Trigger, ViewController};

#[derive(Parser)]
#[command(name = "openclass", version, about = "A terminal client for the OpenClass course API")]
struct Cli {
    /// Backend base URL, overriding the config file and OPENCLASS_URL.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Log at DEBUG instead of INFO.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the course list and exit.
    Courses,
    /// Print assignments grouped by course and exit.
    Assignments,
    /// Write a default config file.
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    if let Some(Command::Init) = cli.command {
        let path = Config::generate_default()?;
        println!("Generated config file at: {}", path.display());
        println!("Edit base_url to point at your OpenClass backend, then run openclass.");
        return Ok(());
    }

    let mut config = Config::load().with_context(|| {
        "Failed to load configuration.\n\
         Run `openclass init` to generate a config file,\n\
         or set OPENCLASS_URL."
    })?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }

    let client = OpenClassClient::new(&config.base_url, config.request_timeout())?;

    match cli.command {
        Some(Command::Courses) => print_once(client, Trigger::Courses, level).await,
        Some(Command::Assignments) => print_once(client, Trigger::Assignments, level).await,
        Some(Command::Init) | None => run_tui(client, level).await,
    }
}

/// One fetch-and-render cycle written to stdout. Logs go to stderr.
async fn print_once(client: OpenClassClient, trigger: Trigger, level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut vc = ViewController::new(client);
    vc.activate(trigger).await;
    print!("{}", vc.display());
    Ok(())
}

async fn run_tui(client: OpenClassClient, level: Level) -> Result<()> {
    // The terminal belongs to the UI, so logs go to a file. Without one the
    // UI still runs, just unlogged.
    if let Some(file) = dirs::cache_dir().and_then(|d| open_log_file(&d.join("openclass")).ok()) {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
    }

    Ok(())
}

fn open_log_file(dir: &Path) -> Result<File> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("openclass.log"))
        .with_context(|| format!("Failed to open log file in {}", dir.display()))
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: OpenClassClient,
) -> Result<()> {
    let mut vc = ViewController::new(client);

    // Courses load as soon as the view is up.
    vc.trigger(Trigger::Courses);

    loop {
        vc.frame_count = vc.frame_count.wrapping_add(1);
        terminal.draw(|f| tui::ui::render(f, &mut vc))?;

        if let Some(Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        })) = tui::event::poll_event(Duration::from_millis(100))?
        {
            tui::event::handle_key(&mut vc, code, modifiers);
        }

        if !vc.running {
            break;
        }

        // Apply completed fetches without blocking.
        vc.poll_results();
    }

    Ok(())
}
