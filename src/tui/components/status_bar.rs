// Status bar component
//
// Refresh button (from the refresh slot), key hints and the last error.

use crate::tui::app::App;
use crate::tui::traits::Interactive;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let ctx = app.list.context();
    let button = app.refresh.render(&ctx);

    let button_text = if button.spinning {
        format!("[ {} {} ]", app.spinner_char(), button.label)
    } else {
        format!("[ ⟳ {} ]", button.label)
    };
    let button_style = if button.disabled {
        Style::default().fg(app.theme.muted)
    } else {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(button_text, button_style),
        Span::raw(" r"),
        Span::styled(" │ ", Style::default().fg(app.theme.border)),
        Span::raw("←→ page  Home/End  "),
        Span::raw(app.list_panel.keybind_hints()),
        Span::raw("  L logs  q quit"),
    ];

    if let Some(err) = ctx.error {
        spans.push(Span::styled(" │ ", Style::default().fg(app.theme.border)));
        spans.push(Span::styled(
            format!("⚠ {}", err),
            Style::default().fg(app.theme.error),
        ));
    }

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
