mod controller;
mod state;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::interval;

pub use controller::AppController;
pub use state::App;
use state::FocusArea;

pub async fn run(mut app: App) -> Result<()> {
    app.bootstrap();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut reader = EventStream::new();
    let mut ticker = interval(Duration::from_millis(200));

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        tokio::select! {
            _ = ticker.tick() => {},
            maybe_event = reader.next() => {
                if let Some(Ok(event)) = maybe_event {
                    handle_event(&mut app, event);
                }
            }
            Some(message) = app.msg_rx.recv() => {
                app.handle_message(message);
            }
        }

        if app.should_quit {
            break;
        }
    }

    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    if let Event::Key(key_event) = event {
        if key_event.kind == KeyEventKind::Press {
            handle_key_event(app, key_event);
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        // Letters belong to the search box while it has focus.
        KeyCode::Char('q') if app.focus != FocusArea::Search => {
            app.should_quit = true;
        }
        KeyCode::Char('s') if app.focus != FocusArea::Search => app.cycle_sort(),
        KeyCode::Esc => match app.focus {
            FocusArea::Search => app.clear_search(),
            FocusArea::Groups => app.select_group_tab(0),
            _ => {}
        },
        KeyCode::Tab => app.next_focus(),
        KeyCode::BackTab => app.previous_focus(),
        _ => match app.focus {
            FocusArea::Search => handle_search_keys(app, key),
            FocusArea::Groups => handle_group_keys(app, key),
            FocusArea::Results => handle_results_keys(app, key),
            FocusArea::Logs => {}
        },
    }
}

fn handle_search_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Down => app.focus = FocusArea::Results,
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::ALT)
                && !key.modifiers.contains(KeyModifiers::CONTROL)
            {
                app.push_search_char(ch);
            }
        }
        _ => {}
    }
}

fn handle_group_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.move_group_tab(-1),
        KeyCode::Right => app.move_group_tab(1),
        KeyCode::Home => app.select_group_tab(0),
        _ => {}
    }
}

fn handle_results_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_result_selection(-1),
        KeyCode::Down => app.move_result_selection(1),
        KeyCode::PageUp => app.move_result_selection(-10),
        KeyCode::PageDown => app.move_result_selection(10),
        KeyCode::Left => app.move_group_tab(-1),
        KeyCode::Right => app.move_group_tab(1),
        _ => {}
    }
}
