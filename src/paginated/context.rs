//! List context: the snapshot slots render from
//!
//! Slots receive a [`ListContext`] explicitly. Where a render tree cannot
//! thread it through, a [`ListScope`] holds the provided snapshot and hands it
//! out on demand - consuming from an empty scope is a programming error.

use super::query::total_pages;
use super::status::FetchStatus;
use crate::request::FetchError;
use std::fmt;

/// Intent produced by a slot interaction, dispatched back into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    SetPage(u32),
    Refetch,
}

/// Consistent, read-only view of one list at one instant
#[derive(Debug)]
pub struct ListContext<'a, T> {
    pub status: FetchStatus,
    /// A request is in flight (also true during a background refetch)
    pub is_fetching: bool,
    /// Results of the last successful fetch, in server order
    pub items: &'a [T],
    /// `count` from the last successful fetch; `None` until one resolves
    pub total_count: Option<u64>,
    pub per_page: u32,
    pub current_page: u32,
    /// Last failure for the current query key
    pub error: Option<&'a FetchError>,
}

// Manual impls: derive would require `T: Clone`
impl<T> Clone for ListContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListContext<'_, T> {}

impl<'a, T> ListContext<'a, T> {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unknown counts read as zero
    pub fn total_count_or_zero(&self) -> u64 {
        self.total_count.unwrap_or(0)
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count_or_zero(), self.per_page)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Action handle: move to `page`
    pub fn set_page(&self, page: u32) -> ListAction {
        ListAction::SetPage(page)
    }

    /// Action handle: reload the current page
    pub fn refetch(&self) -> ListAction {
        ListAction::Refetch
    }
}

/// Raised when a slot looks for a list context outside any provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingProviderError;

impl fmt::Display for MissingProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component must be used within a PaginatedList")
    }
}

impl std::error::Error for MissingProviderError {}

/// Holder for the currently provided list context
#[derive(Debug)]
pub struct ListScope<'a, T> {
    current: Option<ListContext<'a, T>>,
}

impl<'a, T> ListScope<'a, T> {
    /// Scope with no provider
    pub fn empty() -> Self {
        Self { current: None }
    }

    /// Scope already providing `ctx`
    pub fn providing(ctx: ListContext<'a, T>) -> Self {
        Self { current: Some(ctx) }
    }

    /// Replace the provided snapshot wholesale
    pub fn provide(&mut self, ctx: ListContext<'a, T>) {
        self.current = Some(ctx);
    }

    pub fn try_consume(&self) -> Result<&ListContext<'a, T>, MissingProviderError> {
        self.current.as_ref().ok_or(MissingProviderError)
    }

    /// The provided context
    ///
    /// # Panics
    /// If nothing has been provided. A slot rendered outside its list is a
    /// wiring bug and must not silently fall back to an empty state.
    pub fn consume(&self) -> &ListContext<'a, T> {
        match self.try_consume() {
            Ok(ctx) => ctx,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> Default for ListScope<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}
