use crate::app::App;
use crate::state::LoadMoreState;
use crate::util::truncate_to_width;
use crate::view::{ArticleCard, Thumbnail};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Build the lines for one card, clipped to `width` columns.
fn card_item(card: &ArticleCard, width: usize) -> ListItem<'_> {
    let thumb = match &card.thumbnail {
        Thumbnail::Image { host } => format!("[img: {}]", host),
        Thumbnail::Placeholder => "[no image]".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&card.title, width).into_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_to_width(&card.meta, width).into_owned(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(truncate_to_width(&card.excerpt, width).into_owned()),
        Line::from(vec![
            Span::styled(
                truncate_to_width(&card.link_label, width.saturating_sub(thumb.len() + 2))
                    .into_owned(),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(format!("  {}", thumb), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];
    ListItem::new(lines)
}

fn load_more_item(state: LoadMoreState) -> ListItem<'static> {
    let style = match state {
        LoadMoreState::Failed => Style::default().fg(Color::Red),
        LoadMoreState::Loading => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::Cyan),
    };
    ListItem::new(Line::from(Span::styled(
        format!("[ {} ]", state.label()),
        style.add_modifier(Modifier::BOLD),
    )))
}

/// Render the article card list
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let mut items: Vec<ListItem> = app
        .cards
        .cards()
        .iter()
        .map(|card| card_item(card, width))
        .collect();

    if app.show_load_more() {
        items.push(load_more_item(app.feed.load_more()));
    }

    let title = format!(
        "{} - {} articles",
        app.active_category().label,
        app.cards.len()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}
