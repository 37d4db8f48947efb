//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching to the appropriate
//! panel based on the feed's view state.

use crate::app::App;
use crate::state::FeedView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{articles, panels, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Widest the sidebar drawer gets.
const SIDEBAR_WIDTH: u16 = 28;

/// Main render dispatch function.
///
/// Lays out header, body and status bar, then draws the sidebar over the
/// body when it is open. Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    status::render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    status::render(f, app, chunks[2]);

    if app.sidebar.open {
        let drawer = sidebar_area(chunks[1]);
        f.render_widget(Clear, drawer);
        sidebar::render(f, app, drawer);
    }
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    match app.feed.view() {
        FeedView::Loading => panels::render_loading(f, app, area),
        FeedView::Error => panels::render_error(f, app, area),
        FeedView::Empty => panels::render_empty(f, area),
        FeedView::Articles => articles::render(f, app, area),
    }
}

/// Left-anchored drawer over the body.
fn sidebar_area(body: Rect) -> Rect {
    let width = SIDEBAR_WIDTH.min(body.width / 2).max(1);
    Rect::new(body.x, body.y, width, body.height)
}
