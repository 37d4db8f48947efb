use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Menu button glyph, reflecting the sidebar state.
pub(super) fn menu_glyph(app: &App) -> &'static str {
    if app.sidebar.open {
        "✕"
    } else {
        "☰"
    }
}

/// Render the header bar
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", menu_glyph(app)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Headlines",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}", app.active_category().label)),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_widget(paragraph, area);
}

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else if app.sidebar.open {
        Cow::Borrowed("[j/k]move [Enter]select [Esc]close [q]uit")
    } else {
        Cow::Borrowed("[c]ategories [j/k]move [o]pen [m]ore [r]eload [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);

    let paragraph = Paragraph::new(text).style(style);
    f.render_widget(paragraph, area);
}
