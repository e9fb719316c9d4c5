// Views module - screen layout
//
// One screen: title bar, list panel, optional logs panel, paginator bar and
// status bar, with the toast drawn over everything.

use super::app::App;
use crate::tui::components::{list_panel, logs_panel, paginator_bar, status_bar, title_bar};
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the logs panel when shown
const LOGS_HEIGHT: u16 = 10;

/// Render one frame
pub fn draw(f: &mut Frame, app: &App) {
    f.render_widget(Block::default().style(app.theme.base()), f.area());

    let logs_height = if app.show_logs { LOGS_HEIGHT } else { 0 };
    let [title_area, list_area, logs_area, paginator_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(logs_height),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(f.area());

    title_bar::render(f, title_area, app);

    let ctx = app.list.context();
    app.list_panel
        .render(f, list_area, &ctx, &app.columns, &app.theme);

    if app.show_logs {
        logs_panel::render(f, logs_area, &app.log_buffer, &app.theme);
    }

    paginator_bar::render(f, paginator_area, app.paginator_view().as_ref(), &app.theme);
    status_bar::render(f, status_area, app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

/// Plain text of a rendered buffer, one line per row (for tests)
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
