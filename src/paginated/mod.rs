//! Generic paginated list
//!
//! ```text
//!   PaginatedList ──(FetchRequest)──▶ PageFetcher
//!        │  ▲                             │
//!        │  └──────(FetchOutcome)─────────┘
//!        ▼
//!   ListContext ──▶ WhenLoading / WhenError / WhenEmpty / Items / Paginator / Refresh
//!                                                            │          │
//!                                 ListAction::SetPage ◀──────┘          │
//!                                 ListAction::Refetch ◀─────────────────┘
//! ```
//!
//! The controller owns page state and fetch bookkeeping. Slots are pure views
//! over a context snapshot and report interaction as [`ListAction`]s.

pub mod context;
pub mod controller;
pub mod query;
pub mod slots;
pub mod status;

pub use context::{ListAction, ListContext, ListScope, MissingProviderError};
pub use controller::{FetchOutcome, ListOptions, PageObserver, PaginatedList, QueryObserver};
pub use query::{total_pages, PageError, PageQuery, DEFAULT_PER_PAGE_LIMIT};
pub use slots::{
    Items, PageControl, Paginator, PaginatorView, Refresh, RefreshView, WhenEmpty, WhenError,
    WhenLoading,
};
pub use status::FetchStatus;
