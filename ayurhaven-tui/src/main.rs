use anyhow::Result;
use ayurhaven::{AppContext, Settings};
use ayurhaven_tui::{handle_key_event, handle_paste, ui, App};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, time::Duration};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "ayurhaven-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::default();
    std::fs::create_dir_all(&settings.data_dir)?;

    // The terminal belongs to the UI, so logs go to a file in the data dir
    let file_appender = tracing_appender::rolling::never(&settings.data_dir, LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ayurhaven=info,ayurhaven_tui=debug")),
        )
        .init();

    tracing::info!("Starting AyurHaven TUI with data dir {}", settings.data_dir.display());

    let ctx = AppContext::load(&settings)?;
    let mut app = App::new(ctx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("TUI exited with error: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.process_completions();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Paste(data) => handle_paste(app, &data),
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
                _ => {}
            }
        }

        if app.should_quit {
            tracing::info!("Exiting AyurHaven TUI");
            return Ok(());
        }

        // Let spawned completion tasks make progress between frames
        tokio::task::yield_now().await;
    }
}
