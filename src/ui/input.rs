//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the sidebar or
//! the article list depending on which one has focus.

use crate::app::{App, AppEvent};
use crate::state::FeedView;
use crate::util::validate_url_for_open;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::start_load;
use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    if app.sidebar.open {
        return Ok(handle_sidebar_input(app, code, event_tx));
    }

    handle_list_input(app, code, event_tx)
}

/// Input while the category sidebar is open.
fn handle_sidebar_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Esc => {
            app.handle_escape();
        }
        KeyCode::Tab | KeyCode::Char('c') => app.toggle_sidebar(),
        KeyCode::Char('j') | KeyCode::Down => app.sidebar_down(),
        KeyCode::Char('k') | KeyCode::Up => app.sidebar_up(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let ticket = app.select_category(app.sidebar.cursor);
            if start_load(app, ticket, event_tx) {
                let label = app.active_category().label.clone();
                app.set_status(format!("Loading {}...", label));
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Input on the article list.
fn handle_list_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),
        KeyCode::Tab | KeyCode::Char('c') => app.toggle_sidebar(),
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Char('g') | KeyCode::Home => app.selected = 0,
        KeyCode::Char('m') | KeyCode::Char(' ') => press_load_more(app, event_tx),
        KeyCode::Char('r') => {
            let ticket = app.retry();
            if !start_load(app, ticket, event_tx) {
                app.set_status("Already loading");
            }
        }
        KeyCode::Enter => {
            if app.is_load_more_selected() {
                press_load_more(app, event_tx);
            } else if app.feed.view() == FeedView::Error {
                let ticket = app.retry();
                start_load(app, ticket, event_tx);
            } else {
                open_selected(app)?;
            }
        }
        KeyCode::Char('o') => open_selected(app)?,
        _ => {}
    }
    Ok(Action::Continue)
}

fn press_load_more(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let ticket = app.load_more();
    start_load(app, ticket, event_tx);
}

/// Open the selected article's link in the system browser.
fn open_selected(app: &mut App) -> Result<()> {
    let Some(card) = app.selected_card() else {
        return Ok(());
    };
    let url = card.url.clone();

    match validate_url_for_open(&url) {
        Ok(valid) => {
            tracing::debug!(url = %valid, "Opening article in browser");
            if let Err(e) = open::that(valid.as_str()) {
                app.set_status(format!("Failed to open browser: {}", e));
            }
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Refusing to open article link");
            app.set_status(format!("Cannot open link: {}", e));
        }
    }
    Ok(())
}
