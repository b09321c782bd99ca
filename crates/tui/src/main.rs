mod app;
mod config;
mod error;
mod logging;

use crate::app::handlers::{handle_key, handle_mouse, handle_paste};
use crate::app::runtime::{AppEvent, Dispatcher, ProcessGateway, SessionOrchestrator};
use crate::app::view::ui::draw_ui;
use crate::app::AppState;
use crate::config::Config;
use crate::error::Result;
use crate::logging::init_logging;
use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MAX_EVENTS_PER_TICK: usize = 64;

struct TerminalRestoreGuard;

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableBracketedPaste);
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

fn process_app_events(app: &mut AppState, rx: &Receiver<AppEvent>) -> bool {
    let mut changed = false;
    for _ in 0..MAX_EVENTS_PER_TICK {
        match rx.try_recv() {
            Ok(event) => {
                app.apply_event(event);
                changed = true;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    changed
}

fn main() -> Result<()> {
    let config = Config::load();
    init_logging(&config)?;
    info!(backend = %config.backend.program, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let gateway = {
        let _guard = runtime.enter();
        ProcessGateway::spawn(&config.backend)?
    };

    let mut app = AppState::new(&config);
    let orchestrator = SessionOrchestrator::new(
        Arc::new(gateway),
        app.transcript.clone(),
        app.session.clone(),
        app.notifications.clone(),
    );
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(
        runtime.handle().clone(),
        orchestrator,
        app.fetching.clone(),
        tx,
    );

    let mut stdout = std::io::stdout();
    let _restore_guard = TerminalRestoreGuard;
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    // Multi-line paste arrives as one Event::Paste instead of a burst of key presses.
    let _ = stdout.execute(EnableBracketedPaste);
    stdout.execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let mut needs_redraw = true;
    loop {
        if process_app_events(&mut app, &rx) {
            needs_redraw = true;
        }
        if let Some(action) = app.sync_screen() {
            dispatcher.dispatch(action);
            needs_redraw = true;
        }

        if event::poll(POLL_INTERVAL)? {
            let outcome = match event::read()? {
                Event::Key(key) => Some(handle_key(&mut app, key)),
                Event::Paste(text) => {
                    needs_redraw |= handle_paste(&mut app, &text);
                    None
                }
                Event::Mouse(mouse) => {
                    needs_redraw |= handle_mouse(&mut app, mouse, Instant::now());
                    None
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                    None
                }
                _ => None,
            };
            if let Some(outcome) = outcome {
                if outcome.quit {
                    debug!("quit requested");
                    break;
                }
                needs_redraw |= outcome.redraw;
                if let Some(action) = outcome.action {
                    dispatcher.dispatch(action);
                }
            }
        }

        if app.tick(Instant::now()) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| draw_ui(f, &mut app))?;
            needs_redraw = false;
        }
    }

    drop(terminal);
    drop(dispatcher);
    runtime.shutdown_timeout(Duration::from_millis(500));
    info!("exiting");
    Ok(())
}
