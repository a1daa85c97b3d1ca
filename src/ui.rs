// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;

use crate::controller::ChatController;
use crate::errors::{ChatError, ChatResult};
use crate::key_handlers::{handle_chat_input, KeyAction};
use crate::App;
use crossterm::{
    event::{self, Event as CEvent, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Runs the terminal chat page until the user quits.
pub async fn run_ui(mut app: App) -> ChatResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        log::error!("UI loop stopped: {}", err);
    }

    res
}

/// Events feeding the page loop.
enum Event {
    Input(CEvent),
    Tick,
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> ChatResult<()> {
    let (tx, rx) = mpsc::channel::<Event>(100);

    // crossterm polling blocks, so it gets its own thread
    tokio::task::spawn_blocking(move || {
        let tick_rate = Duration::from_millis(100);
        let mut last_tick = Instant::now();
        loop {
            match event::poll(tick_rate) {
                Ok(true) => {
                    if let Ok(event) = event::read() {
                        if tx.blocking_send(Event::Input(event)).is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    log::error!("Failed to poll terminal events: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    event_loop(terminal, app, rx).await
}

/// Redraws and dispatches until the user quits. Fails once the input thread
/// is gone, since no key can reach the page after that.
async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut rx: mpsc::Receiver<Event>,
) -> ChatResult<()> {
    let mut revisions = app.controller.lock().await.subscribe();

    loop {
        draw_page(terminal, app).await?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(key, app).await;
                }
                Some(Event::Input(_)) => {}
                Some(Event::Tick) => app.status_indicator.update_spinner(),
                None => {
                    return Err(ChatError::Io(io::Error::other(
                        "terminal event stream closed",
                    )));
                }
            },
            Ok(()) = revisions.changed() => app.scroll_to_latest(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn handle_key(key: KeyEvent, app: &mut App) {
    let showing_prompts = app.controller.lock().await.shows_prompt_suggestions();

    match handle_chat_input(key, app, showing_prompts) {
        KeyAction::None => {}
        KeyAction::Quit => app.should_quit = true,
        KeyAction::Submit(text) => {
            if app.send(&text).await {
                app.input.clear();
            }
        }
        KeyAction::SelectPrompt(prompt) => {
            app.send(&prompt).await;
        }
    }
}

async fn draw_page<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> ChatResult<()> {
    let controller = Arc::clone(&app.controller);
    let guard = controller.lock().await;
    let awaiting = guard.is_awaiting_reply();
    app.status_indicator.set_thinking(awaiting);
    if !awaiting {
        app.status_indicator.clear_status();
    }

    terminal.draw(|f| draw(f, app, &guard))?;
    Ok(())
}

/// Greeting and prompt cards before the first exchange, the message list
/// after it. Input, status and footer are always present.
pub fn draw(f: &mut Frame, app: &mut App, controller: &ChatController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let showing_prompts = controller.shows_prompt_suggestions();
    if showing_prompts {
        let greeting = controller
            .messages()
            .first()
            .map(|m| m.text.as_str())
            .unwrap_or_default();
        header::draw_greeting(f, chunks[0], greeting, &app.prompt_cards);
    } else {
        chat::draw_messages(f, app, controller.messages(), chunks[0]);
    }

    app.status_indicator.render(f, chunks[1]);
    chat::draw_input(f, app, chunks[2]);
    footer::draw_footer(f, chunks[3], showing_prompts);
}
