//! List panel: the current page as a table
//!
//! Composes the list slots in priority order: error, loading (shimmer rows),
//! empty, items. Owns the row selection.

use crate::paginated::{Items, ListContext, WhenEmpty, WhenError, WhenLoading};
use crate::tui::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

/// Widest a column may grow before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 32;

const SHIMMER_CELL: &str = "░░░░░░░░";

pub struct ListPanel {
    pub selected: Option<usize>,
    row_count: usize,
    empty: WhenEmpty<&'static str>,
    loading: WhenLoading<&'static str>,
    error: WhenError<&'static str>,
}

impl ListPanel {
    pub fn new() -> Self {
        Self {
            selected: None,
            row_count: 0,
            empty: WhenEmpty::new("No results"),
            loading: WhenLoading::new("Loading"),
            error: WhenError::new("Could not load this page"),
        }
    }

    /// Track the item count of the current page, keeping the selection valid
    pub fn sync_rows(&mut self, row_count: usize) {
        self.row_count = row_count;
        if let Some(idx) = self.selected {
            if idx >= row_count {
                self.selected = row_count.checked_sub(1);
            }
        }
    }

    /// Drop the selection (page changed)
    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn select_next(&mut self) {
        if self.row_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.row_count - 1),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.row_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => self.row_count - 1,
        });
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        ctx: &ListContext<'_, Value>,
        columns: &[String],
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border));

        if let Some((headline, err)) = self.error.render(ctx) {
            if ctx.is_empty() {
                let text = vec![
                    Line::from(format!("⚠ {}", headline)).style(
                        Style::default()
                            .fg(theme.error)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::from(""),
                    Line::from(err.to_string()).style(Style::default().fg(theme.foreground)),
                    Line::from(""),
                    Line::from("Press r to retry").style(Style::default().fg(theme.muted)),
                ];
                let body = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(block.border_style(Style::default().fg(theme.error)));
                f.render_widget(body, area);
                return;
            }
        }

        if let Some(message) = self.empty.render(ctx) {
            let body = Paragraph::new(*message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted))
                .block(block);
            f.render_widget(body, area);
            return;
        }

        let shimmer_rows = usize::from(area.height.saturating_sub(3)).max(1);
        let items = Items::new(|item: &Value, _page: &[Value]| row_cells(item, columns))
            .with_shimmer(vec![SHIMMER_CELL.to_string(); columns.len()], Some(shimmer_rows));
        let Some(rows) = items.render(ctx) else {
            f.render_widget(block, area);
            return;
        };

        let loading_label = self.loading.render(ctx).copied();
        let loading = loading_label.is_some();
        let measured: &[Vec<String>] = if loading { &[] } else { &rows };
        let widths = column_widths(columns, measured);

        let row_style = if loading {
            Style::default().fg(theme.shimmer)
        } else {
            Style::default().fg(theme.foreground)
        };
        let table_rows = rows
            .into_iter()
            .map(|cells| Row::new(cells.into_iter().map(Cell::from)).style(row_style));

        let header = Row::new(columns.iter().map(|c| Cell::from(c.as_str())))
            .style(theme.header_row())
            .bottom_margin(0);

        let block = match (loading_label, ctx.error) {
            (Some(label), _) => block.title(format!(" {}… ", label)),
            (None, Some(err)) => block
                .border_style(Style::default().fg(theme.error))
                .title(format!(" ⚠ {} ", err)),
            (None, None) => block,
        };

        let table = Table::new(table_rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(theme.selected_row());

        let selected = if loading { None } else { self.selected };
        let mut state = TableState::default().with_selected(selected);
        f.render_stateful_widget(table, area, &mut state);
    }
}

impl Default for ListPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for ListPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Esc => {
                let had_selection = self.selected.is_some();
                self.reset();
                had_selection.into()
            }
            _ => Handled::No,
        }
    }

    fn keybind_hints(&self) -> &'static str {
        "↑↓ select  y copy"
    }
}

/// Look up a column on an item; dots address nested fields ("facility.name")
pub fn lookup<'a>(item: &'a Value, column: &str) -> Option<&'a Value> {
    if column.contains('.') {
        item.pointer(&format!("/{}", column.replace('.', "/")))
    } else {
        item.get(column)
    }
}

pub fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn row_cells(item: &Value, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|c| format_cell(lookup(item, c)))
        .collect()
}

/// Fit each column to its widest cell, capped
fn column_widths(columns: &[String], rows: &[Vec<String>]) -> Vec<Constraint> {
    columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0);
            Constraint::Length(widest.clamp(3, MAX_COLUMN_WIDTH) as u16)
        })
        .collect()
}
