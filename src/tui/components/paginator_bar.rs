// Paginator bar component
//
// Renders the paginator slot as a single line of page controls with the
// visible range on the right. Blank while loading or when the paginator hides.

use crate::paginated::{PageControl, PaginatorView};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, view: Option<&PaginatorView>, theme: &Theme) {
    let Some(view) = view else {
        return;
    };

    let [controls_area, range_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(24)]).areas(area);

    f.render_widget(Paragraph::new(control_line(view, theme)), controls_area);
    f.render_widget(
        Paragraph::new(format!("Showing {} ", view.range_label()))
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.muted)),
        range_area,
    );
}

/// `‹ Prev  1 … 4 [5] 6 … 10  Next ›`
pub fn control_line<'a>(view: &PaginatorView, theme: &Theme) -> Line<'a> {
    let enabled = Style::default().fg(theme.foreground);
    let disabled = Style::default().fg(theme.muted);
    let active = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let mut spans = vec![Span::raw(" ")];
    for control in &view.controls {
        match control {
            PageControl::Previous(target) => {
                let style = if target.is_some() { enabled } else { disabled };
                spans.push(Span::styled("‹ Prev", style));
                spans.push(Span::raw("  "));
            }
            PageControl::Page { number, active: true } => {
                spans.push(Span::styled(format!(" {} ", number), active));
                spans.push(Span::raw(" "));
            }
            PageControl::Page { number, .. } => {
                spans.push(Span::styled(format!(" {} ", number), enabled));
                spans.push(Span::raw(" "));
            }
            PageControl::Gap => {
                spans.push(Span::styled("…", disabled));
                spans.push(Span::raw(" "));
            }
            PageControl::Next(target) => {
                let style = if target.is_some() { enabled } else { disabled };
                spans.push(Span::raw(" "));
                spans.push(Span::styled("Next ›", style));
            }
        }
    }
    Line::from(spans)
}
