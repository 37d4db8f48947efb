//! Full-body panels shown in place of the article list.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::loop_runner::SPINNER_FRAMES;

const SPINNER: [&str; SPINNER_FRAMES] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(super) const LOADING_TEXT: &str = "Loading news...";
pub(super) const ERROR_TITLE: &str = "Oops! Something went wrong";
pub(super) const ERROR_BODY: &str =
    "We couldn't load the news. Please check your internet connection and try again.";
pub(super) const EMPTY_TITLE: &str = "No news found";
pub(super) const EMPTY_BODY: &str =
    "We couldn't find any news for this category. Please try another category.";

fn panel(f: &mut Frame, lines: Vec<Line<'_>>, area: Rect) {
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Vertical padding that roughly centers `content` lines in `area`.
fn padding(area: Rect, content: u16) -> Vec<Line<'static>> {
    let rows = area.height.saturating_sub(2).saturating_sub(content) / 2;
    (0..rows).map(|_| Line::from("")).collect()
}

/// Loading notice. The first load of the session has no spinner.
pub(super) fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let text = if app.feed.is_initial_load() {
        LOADING_TEXT.to_string()
    } else {
        format!("{} {}", SPINNER[app.spinner_frame % SPINNER_FRAMES], LOADING_TEXT)
    };
    let mut lines = padding(area, 1);
    lines.push(Line::from(Span::styled(
        text,
        Style::default().fg(Color::Yellow),
    )));
    panel(f, lines, area);
}

pub(super) fn render_error(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = padding(area, 7);
    lines.push(Line::from(Span::styled(
        ERROR_TITLE,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(ERROR_BODY));
    if let Some(detail) = app.feed.last_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            detail.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[r] Retry",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    panel(f, lines, area);
}

pub(super) fn render_empty(f: &mut Frame, area: Rect) {
    let mut lines = padding(area, 3);
    lines.push(Line::from(Span::styled(
        EMPTY_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(EMPTY_BODY));
    panel(f, lines, area);
}
