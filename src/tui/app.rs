// Application state for the TUI
//
// Owns the list controller plus everything the views need: slots, row
// selection, logs toggle and toast. Key handling in `tui::mod` turns input
// into calls on this struct; nothing here touches the terminal.

use super::clipboard;
use super::components::list_panel::ListPanel;
use super::components::toast::Toast;
use super::theme::Theme;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::paginated::{
    FetchOutcome, ListAction, PaginatedList, Paginator, PaginatorView, Refresh,
};
use serde_json::Value;

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

pub struct App {
    pub list: PaginatedList<Value>,
    /// Item fields shown as table columns
    pub columns: Vec<String>,
    pub theme: Theme,
    /// Where rows come from, shown in the title bar
    pub source: String,

    /// Fetch failures only go to the log, no toast
    pub silent: bool,

    pub paginator: Paginator,
    pub refresh: Refresh,
    pub list_panel: ListPanel,

    pub log_buffer: LogBuffer,
    pub show_logs: bool,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    animation_frame: usize,
}

impl App {
    pub fn new(list: PaginatedList<Value>, config: &Config, log_buffer: LogBuffer) -> Self {
        let source = if config.demo_mode {
            "demo".to_string()
        } else {
            config.api_url.clone()
        };

        Self {
            list,
            columns: config.collection.columns.clone(),
            theme: Theme::by_name(&config.theme),
            source,
            silent: config.collection.silent,
            paginator: Paginator::default()
                .hide_if_single_page(config.collection.hide_if_single_page),
            refresh: Refresh::default(),
            list_panel: ListPanel::new(),
            log_buffer,
            show_logs: false,
            toast: None,
            should_quit: false,
            animation_frame: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Animation
    // ─────────────────────────────────────────────────────────────────────

    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    // ─────────────────────────────────────────────────────────────────────
    // List
    // ─────────────────────────────────────────────────────────────────────

    /// Apply a fetch outcome and keep the row selection in range
    pub fn on_outcome(&mut self, outcome: FetchOutcome<Value>) {
        if self.list.apply(outcome) {
            self.after_apply();
        }
    }

    /// Apply whatever outcomes have already arrived
    pub fn drain_outcomes(&mut self) {
        if self.list.poll_outcomes() > 0 {
            self.after_apply();
        }
    }

    fn after_apply(&mut self) {
        self.sync_rows();
        if self.silent {
            return;
        }
        if let Some(err) = self.list.context().error {
            let message = if err.is_server_error() {
                format!("{} (r to retry)", err)
            } else {
                format!("Fetch failed: {}", err)
            };
            self.toast = Some(Toast::error(message));
        }
    }

    /// Keep the row selection inside the current page
    pub fn sync_rows(&mut self) {
        let rows = self.list.context().items.len();
        self.list_panel.sync_rows(rows);
    }

    pub fn paginator_view(&self) -> Option<PaginatorView> {
        self.paginator.render(&self.list.context())
    }

    /// Dispatch a slot action; `None` (disabled control) is a no-op
    pub fn dispatch(&mut self, action: Option<ListAction>) {
        let Some(action) = action else {
            return;
        };
        if let ListAction::SetPage(_) = action {
            self.list_panel.reset();
        }
        if let Err(e) = self.list.dispatch(action) {
            tracing::warn!("Rejected list action {:?}: {}", action, e);
            self.toast = Some(Toast::error(e.to_string()));
        }
    }

    /// Page navigation goes through an always-visible paginator so single-page
    /// lists still answer the keys consistently
    fn navigator(&self) -> Option<PaginatorView> {
        Paginator {
            hide_if_single_page: false,
            ..self.paginator
        }
        .render(&self.list.context())
    }

    pub fn next_page(&mut self) {
        let action = self.navigator().and_then(|v| v.next());
        self.dispatch(action);
    }

    pub fn previous_page(&mut self) {
        let action = self.navigator().and_then(|v| v.previous());
        self.dispatch(action);
    }

    pub fn first_page(&mut self) {
        let action = self.navigator().and_then(|v| v.first());
        self.dispatch(action);
    }

    pub fn last_page(&mut self) {
        let action = self.navigator().and_then(|v| v.last());
        self.dispatch(action);
    }

    /// Press the refresh button (ignored while it is disabled)
    pub fn refresh(&mut self) {
        let action = self.refresh.press(&self.list.context());
        self.dispatch(action);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rows
    // ─────────────────────────────────────────────────────────────────────

    pub fn selected_row(&self) -> Option<&Value> {
        let idx = self.list_panel.selected?;
        self.list.context().items.get(idx)
    }

    /// Copy the selected row as pretty JSON
    pub fn copy_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            self.toast = Some(Toast::new("Select a row first (↑/↓)"));
            return;
        };

        let result = clipboard::row_json(row).and_then(|text| clipboard::copy_to_clipboard(&text));
        self.toast = Some(match result {
            Ok(()) => Toast::new("Copied row as JSON"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                Toast::error("Copy failed")
            }
        });
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{generate_patients, DemoFetcher};
    use crate::paginated::{FetchStatus, ListOptions};
    use crate::request::ApiRoute;
    use std::sync::Arc;

    async fn demo_app(records: usize) -> App {
        let fetcher = Arc::new(DemoFetcher::with_records(generate_patients(records)));
        let list = PaginatedList::<Value>::new(
            ApiRoute::new("/api/v1/patient/"),
            fetcher,
            ListOptions::default(),
        )
        .unwrap();

        let config = Config {
            demo_mode: true,
            ..Config::default()
        };
        let mut app = App::new(list, &config, LogBuffer::new());
        app.list.mount();
        app.list.settle().await;
        app.sync_rows();
        app
    }

    #[tokio::test]
    async fn test_navigation_walks_pages() {
        let mut app = demo_app(42).await;
        assert_eq!(app.list.current_page(), 1);

        app.next_page();
        app.list.settle().await;
        assert_eq!(app.list.current_page(), 2);

        app.last_page();
        app.list.settle().await;
        assert_eq!(app.list.current_page(), 3);
        assert_eq!(app.list.offset(), 28);

        // Clamped at the end
        app.next_page();
        assert!(!app.list.is_fetching());
        assert_eq!(app.list.current_page(), 3);

        app.first_page();
        app.list.settle().await;
        assert_eq!(app.list.current_page(), 1);

        app.previous_page();
        assert_eq!(app.list.current_page(), 1);
    }

    #[tokio::test]
    async fn test_navigation_on_single_page_list() {
        let mut app = demo_app(5).await;
        assert!(app.paginator_view().is_none());
        app.next_page();
        assert_eq!(app.list.current_page(), 1);
        assert!(!app.list.is_fetching());
    }

    #[tokio::test]
    async fn test_refresh_keeps_rows_visible() {
        let mut app = demo_app(20).await;
        app.refresh();
        assert!(app.list.is_fetching());
        assert_eq!(app.list.status(), FetchStatus::Success);
        assert_eq!(app.list.context().items.len(), 14);
        app.list.settle().await;
        assert!(!app.list.is_fetching());
    }

    #[tokio::test]
    async fn test_page_change_clears_selection() {
        let mut app = demo_app(42).await;
        app.list_panel.select_next();
        assert_eq!(
            app.selected_row().and_then(|r| r["id"].as_str()),
            Some("P-10001")
        );

        app.next_page();
        assert!(app.selected_row().is_none());
    }

    #[tokio::test]
    async fn test_fetch_error_toasts_unless_silent() {
        let fetcher = Arc::new(DemoFetcher::with_records(generate_patients(3)).with_fail_every(1));
        let list = PaginatedList::<Value>::new(
            ApiRoute::new("/api/v1/patient/"),
            fetcher,
            ListOptions::default(),
        )
        .unwrap();
        let mut app = App::new(list, &Config::default(), LogBuffer::new());
        app.list.mount();
        let outcome = app.list.next_outcome().await.unwrap();
        app.on_outcome(outcome);
        assert_eq!(app.list.status(), FetchStatus::Error);
        let message = &app.toast.as_ref().unwrap().message;
        assert!(message.contains("503"));
        assert!(message.contains("r to retry"));

        app.toast = None;
        app.silent = true;
        app.refresh();
        let outcome = app.list.next_outcome().await.unwrap();
        app.on_outcome(outcome);
        assert!(app.toast.is_none());
    }

    #[tokio::test]
    async fn test_copy_without_selection_shows_hint() {
        let mut app = demo_app(3).await;
        app.copy_selected();
        assert!(app.toast.as_ref().unwrap().message.contains("Select a row"));
    }
}
