// Title bar component
//
// App name, data source, route and page position, plus a spinner while a
// request is in flight.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let ctx = app.list.context();

    let position = match ctx.total_count {
        Some(_) => format!("page {}/{}", ctx.current_page, ctx.total_pages().max(1)),
        None => format!("page {}", ctx.current_page),
    };

    let activity = if ctx.is_fetching {
        format!(" {} {}", app.spinner_char(), ctx.status.as_str())
    } else {
        String::new()
    };

    let filters: Vec<String> = app
        .list
        .filters()
        .to_pairs()
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    let filter_text = if filters.is_empty() {
        String::new()
    } else {
        format!(" [{}]", filters.join(" "))
    };

    let title_text = format!(
        " ▤ carelist ──── {}{} ──── {}{}",
        app.list.route(),
        filter_text,
        position,
        activity
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" {} ", app.source)).right_aligned()),
        );

    f.render_widget(title, area);
}
