//! Pagination state controller
//!
//! `PaginatedList` owns the page position for one list, turns it into fetch
//! parameters, runs fetches on tokio tasks and applies their outcomes.
//!
//! Fetch results come back over a channel owned by the list. Every issued
//! fetch is stamped with a generation; only the outcome for the latest
//! generation is applied, so a slow response for page 2 can never overwrite
//! page 3 after the user has moved on.

use super::context::{ListAction, ListContext, ListScope};
use super::query::{PageError, PageQuery};
use super::status::FetchStatus;
use crate::request::{
    AbortSignal, ApiRoute, FetchError, FetchRequest, PageFetcher, PaginatedResponse, QueryParams,
};
use futures::FutureExt;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Called with the new page number on every `set_page`
pub type PageObserver = Box<dyn FnMut(u32) + Send>;

/// Called with a fresh context after every applied fetch outcome
pub type QueryObserver<T> = Box<dyn for<'a> FnMut(&ListContext<'a, T>) + Send>;

/// Construction options for a list
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Items per page (default 14)
    pub per_page: Option<u32>,
    /// Starting page (default 1)
    pub initial_page: Option<u32>,
    pub path_params: BTreeMap<String, String>,
    /// Caller filters; `limit`/`offset` here are ignored
    pub query_params: QueryParams,
    pub headers: Vec<(String, String)>,
    pub signal: Option<AbortSignal>,
    /// Log failures at debug instead of warn
    pub silent: bool,
}

/// Result of one fetch, tagged with the generation that issued it
#[derive(Debug)]
pub struct FetchOutcome<T> {
    generation: u64,
    result: Result<PaginatedResponse<T>, FetchError>,
}

impl<T> FetchOutcome<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Identity of the data a fetch is for. A change means the old page no longer
/// answers the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryKey {
    page: u32,
    per_page: u32,
    filters: QueryParams,
}

/// Controller for one paginated list
pub struct PaginatedList<T> {
    route: ApiRoute,
    fetcher: Arc<dyn PageFetcher<T>>,
    query: PageQuery,
    filters: QueryParams,
    path_params: BTreeMap<String, String>,
    headers: Vec<(String, String)>,
    signal: Option<AbortSignal>,
    silent: bool,

    mounted: bool,
    status: FetchStatus,
    is_fetching: bool,
    data: Option<PaginatedResponse<T>>,
    data_key: Option<QueryKey>,
    error: Option<FetchError>,

    /// Latest issued generation; 0 = nothing issued yet
    generation: u64,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome<T>>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome<T>>,

    on_page_change: Option<PageObserver>,
    on_query: Option<QueryObserver<T>>,
}

impl<T: Send + 'static> PaginatedList<T> {
    /// Create an unmounted list. Nothing is fetched until [`mount`](Self::mount).
    pub fn new(
        route: ApiRoute,
        fetcher: Arc<dyn PageFetcher<T>>,
        options: ListOptions,
    ) -> Result<Self, PageError> {
        let query = PageQuery::new(options.initial_page, options.per_page)?;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(Self {
            route,
            fetcher,
            query,
            filters: options.query_params,
            path_params: options.path_params,
            headers: options.headers,
            signal: options.signal,
            silent: options.silent,
            mounted: false,
            status: FetchStatus::Idle,
            is_fetching: false,
            data: None,
            data_key: None,
            error: None,
            generation: 0,
            outcome_tx,
            outcome_rx,
            on_page_change: None,
            on_query: None,
        })
    }

    /// Observe page changes (fire-and-forget)
    pub fn with_page_observer(mut self, observer: impl FnMut(u32) + Send + 'static) -> Self {
        self.on_page_change = Some(Box::new(observer));
        self
    }

    /// Observe every applied fetch outcome
    pub fn with_query_observer(
        mut self,
        observer: impl for<'a> FnMut(&ListContext<'a, T>) + Send + 'static,
    ) -> Self {
        self.on_query = Some(Box::new(observer));
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle and actions
    // ─────────────────────────────────────────────────────────────────────

    /// Issue the first fetch. Must run inside a tokio runtime.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!(
            route = %self.route,
            page = self.query.current_page(),
            per_page = self.query.per_page(),
            "Mounting paginated list"
        );
        self.issue_fetch();
    }

    /// Move to `page` (1-based), notify the page observer, refetch
    ///
    /// Pages past the end are allowed and simply come back empty.
    pub fn set_page(&mut self, page: u32) -> Result<(), PageError> {
        let previous = self.query.current_page();
        self.query.set_page(page)?;

        if let Some(observer) = self.on_page_change.as_mut() {
            observer(page);
        }

        if page != previous && self.mounted {
            self.issue_fetch();
        }
        Ok(())
    }

    /// Replace caller filters; a change refetches the current page
    pub fn set_query_params(&mut self, filters: QueryParams) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        if self.mounted {
            self.issue_fetch();
        }
    }

    /// Reload the current page
    ///
    /// No dedupe: calling this while a fetch is in flight issues another one,
    /// and only the newest is applied.
    pub fn refetch(&mut self) {
        if !self.mounted {
            self.mount();
            return;
        }
        self.issue_fetch();
    }

    /// Apply a slot-produced action
    pub fn dispatch(&mut self, action: ListAction) -> Result<(), PageError> {
        match action {
            ListAction::SetPage(page) => self.set_page(page),
            ListAction::Refetch => {
                self.refetch();
                Ok(())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Outcomes
    // ─────────────────────────────────────────────────────────────────────

    /// Wait for the next fetch outcome without applying it
    ///
    /// For event loops that `select!` over several sources; pass the result
    /// to [`apply`](Self::apply).
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome<T>> {
        self.outcome_rx.recv().await
    }

    /// Apply an outcome. Returns `false` if it was superseded and dropped.
    pub fn apply(&mut self, outcome: FetchOutcome<T>) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                route = %self.route,
                stale = outcome.generation,
                latest = self.generation,
                "Discarding superseded page response"
            );
            return false;
        }

        self.is_fetching = false;
        let key = self.current_key();

        match outcome.result {
            Ok(page) => {
                tracing::debug!(
                    route = %self.route,
                    page = key.page,
                    items = page.results.len(),
                    count = page.count,
                    "Page loaded"
                );
                self.data = Some(page);
                self.data_key = Some(key);
                self.error = None;
                self.status = FetchStatus::Success;
            }
            Err(err) => {
                if self.silent {
                    tracing::debug!(route = %self.route, page = key.page, "Page fetch failed: {}", err);
                } else {
                    tracing::warn!(route = %self.route, page = key.page, "Page fetch failed: {}", err);
                }
                // Keep stale items only when they belong to this query
                if self.data_key.as_ref() != Some(&key) {
                    self.data = None;
                    self.data_key = None;
                }
                self.error = Some(err);
                self.status = FetchStatus::Error;
            }
        }

        self.notify_query_observer();
        true
    }

    /// Apply outcomes until nothing is in flight
    pub async fn settle(&mut self) {
        while self.is_fetching {
            let Some(outcome) = self.outcome_rx.recv().await else {
                return;
            };
            self.apply(outcome);
        }
    }

    /// Apply every outcome that has already arrived, without waiting
    ///
    /// Returns how many were applied (superseded ones are not counted).
    pub fn poll_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if self.apply(outcome) {
                applied += 1;
            }
        }
        applied
    }

    // ─────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────

    /// Snapshot for slots
    pub fn context(&self) -> ListContext<'_, T> {
        ListContext {
            status: self.status,
            is_fetching: self.is_fetching,
            items: self
                .data
                .as_ref()
                .map(|d| d.results.as_slice())
                .unwrap_or(&[]),
            total_count: self.data.as_ref().map(|d| d.count),
            per_page: self.query.per_page(),
            current_page: self.query.current_page(),
            error: self.error.as_ref(),
        }
    }

    /// Scope providing the current snapshot
    pub fn scope(&self) -> ListScope<'_, T> {
        ListScope::providing(self.context())
    }

    pub fn route(&self) -> &ApiRoute {
        &self.route
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn current_page(&self) -> u32 {
        self.query.current_page()
    }

    pub fn per_page(&self) -> u32 {
        self.query.per_page()
    }

    pub fn offset(&self) -> u64 {
        self.query.offset()
    }

    pub fn filters(&self) -> &QueryParams {
        &self.filters
    }

    /// Latest issued generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn current_key(&self) -> QueryKey {
        QueryKey {
            page: self.query.current_page(),
            per_page: self.query.per_page(),
            filters: self.filters.clone(),
        }
    }

    fn issue_fetch(&mut self) {
        self.generation += 1;
        let generation = self.generation;

        let key = self.current_key();
        let have_current_data = self.data.is_some() && self.data_key.as_ref() == Some(&key);
        if !have_current_data {
            // New query key: nothing valid to show until it resolves
            self.status = FetchStatus::Loading;
            self.error = None;
        }
        self.is_fetching = true;

        let request = FetchRequest {
            route: self.route.clone(),
            path_params: self.path_params.clone(),
            query_params: self.query.query_params(&self.filters),
            headers: self.headers.clone(),
            signal: self.signal.clone(),
        };

        tracing::debug!(
            route = %self.route,
            page = key.page,
            offset = self.query.offset(),
            generation,
            background = have_current_data,
            "Fetching page"
        );

        // A panicking fetcher still reports, otherwise the list would stay
        // in flight forever
        let future = AssertUnwindSafe(self.fetcher.fetch(request)).catch_unwind();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = future
                .await
                .unwrap_or_else(|panic| Err(FetchError::Internal(panic_message(&*panic))));
            // Receiver gone means the list was dropped; nothing to report to
            let _ = tx.send(FetchOutcome { generation, result });
        });
    }

    fn notify_query_observer(&mut self) {
        if let Some(mut observer) = self.on_query.take() {
            observer(&self.context());
            self.on_query = Some(observer);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("fetcher panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("fetcher panicked: {}", msg)
    } else {
        "fetcher panicked".to_string()
    }
}
