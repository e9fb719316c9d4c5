//! Declarative slots
//!
//! Each slot is a pure function of a [`ListContext`]: it decides whether it
//! renders and what with, but never fetches. Interactive slots hand back a
//! [`ListAction`] for the owner to dispatch.

use super::context::{ListAction, ListContext};
use crate::request::FetchError;

/// Default number of shimmer placeholders shown while loading
pub const DEFAULT_SHIMMER_COUNT: usize = 8;

/// Pages shown either side of the current page in the paginator
pub const DEFAULT_PAGINATOR_SIBLINGS: u32 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Conditional content
// ─────────────────────────────────────────────────────────────────────────────

/// Fallback content when a settled query has no items
#[derive(Debug, Clone)]
pub struct WhenEmpty<C> {
    content: C,
}

impl<C> WhenEmpty<C> {
    pub fn new(content: C) -> Self {
        Self { content }
    }

    pub fn render<T>(&self, ctx: &ListContext<'_, T>) -> Option<&C> {
        if ctx.is_loading() || !ctx.is_empty() {
            return None;
        }
        Some(&self.content)
    }
}

/// Content shown while the current query has nothing to show yet
#[derive(Debug, Clone)]
pub struct WhenLoading<C> {
    content: C,
}

impl<C> WhenLoading<C> {
    pub fn new(content: C) -> Self {
        Self { content }
    }

    pub fn render<T>(&self, ctx: &ListContext<'_, T>) -> Option<&C> {
        ctx.is_loading().then_some(&self.content)
    }
}

/// Content shown when the last fetch for the current query failed
///
/// Independent of `WhenEmpty`: an errored list with no items satisfies both,
/// so compose this one first where the distinction matters.
#[derive(Debug, Clone)]
pub struct WhenError<C> {
    content: C,
}

impl<C> WhenError<C> {
    pub fn new(content: C) -> Self {
        Self { content }
    }

    pub fn render<'s, 'a, T>(
        &'s self,
        ctx: &ListContext<'a, T>,
    ) -> Option<(&'s C, &'a FetchError)> {
        match (ctx.status, ctx.error) {
            (super::FetchStatus::Error, Some(err)) => Some((&self.content, err)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Items
// ─────────────────────────────────────────────────────────────────────────────

/// Maps the current items through a per-item renderer
pub struct Items<F, R> {
    render: F,
    shimmer: Option<R>,
    shimmer_count: usize,
}

impl<F, R> Items<F, R> {
    /// `render` receives each item and the full page
    pub fn new<T>(render: F) -> Self
    where
        F: Fn(&T, &[T]) -> R,
    {
        Self {
            render,
            shimmer: None,
            shimmer_count: DEFAULT_SHIMMER_COUNT,
        }
    }

    /// Show `count` copies of `placeholder` while loading instead of nothing
    pub fn with_shimmer(mut self, placeholder: R, count: Option<usize>) -> Self {
        self.shimmer = Some(placeholder);
        self.shimmer_count = count.unwrap_or(DEFAULT_SHIMMER_COUNT);
        self
    }

    pub fn render<T>(&self, ctx: &ListContext<'_, T>) -> Option<Vec<R>>
    where
        F: Fn(&T, &[T]) -> R,
        R: Clone,
    {
        if ctx.is_loading() {
            let shimmer = self.shimmer.as_ref()?;
            return Some(vec![shimmer.clone(); self.shimmer_count]);
        }

        if ctx.items.is_empty() {
            return None;
        }

        Some(
            ctx.items
                .iter()
                .map(|item| (self.render)(item, ctx.items))
                .collect(),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paginator
// ─────────────────────────────────────────────────────────────────────────────

/// One control in the paginator strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    /// Target page, `None` when already on the first page
    Previous(Option<u32>),
    Page { number: u32, active: bool },
    /// Elided run of pages
    Gap,
    /// Target page, `None` when already on the last page
    Next(Option<u32>),
}

/// Rendered paginator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorView {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub per_page: u32,
    pub controls: Vec<PageControl>,
}

impl PaginatorView {
    /// Action moving to `page`, clamped into the known page range
    pub fn go_to(&self, page: u32) -> Option<ListAction> {
        if self.total_pages == 0 {
            return None;
        }
        let page = page.clamp(1, self.total_pages);
        (page != self.current_page).then_some(ListAction::SetPage(page))
    }

    pub fn next(&self) -> Option<ListAction> {
        if self.current_page >= self.total_pages {
            return None;
        }
        self.go_to(self.current_page + 1)
    }

    pub fn previous(&self) -> Option<ListAction> {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn first(&self) -> Option<ListAction> {
        self.go_to(1)
    }

    pub fn last(&self) -> Option<ListAction> {
        self.go_to(self.total_pages)
    }

    /// "15-28 of 42", or "0 of 0" for an empty collection
    pub fn range_label(&self) -> String {
        let start = u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page) + 1;
        if self.total_count == 0 || start > self.total_count {
            return format!("0 of {}", self.total_count);
        }
        let end = (start + u64::from(self.per_page) - 1).min(self.total_count);
        format!("{}-{} of {}", start, end, self.total_count)
    }
}

/// Page-control strip bound to the list's position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    /// Render nothing when everything fits on one page
    pub hide_if_single_page: bool,
    /// Pages shown either side of the current one
    pub siblings: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            hide_if_single_page: false,
            siblings: DEFAULT_PAGINATOR_SIBLINGS,
        }
    }
}

impl Paginator {
    pub fn hide_if_single_page(mut self, hide: bool) -> Self {
        self.hide_if_single_page = hide;
        self
    }

    pub fn render<T>(&self, ctx: &ListContext<'_, T>) -> Option<PaginatorView> {
        if ctx.is_loading() {
            return None;
        }

        let total_count = ctx.total_count_or_zero();
        if self.hide_if_single_page && total_count <= u64::from(ctx.per_page) {
            return None;
        }

        let total_pages = ctx.total_pages();
        let current = ctx.current_page;

        let mut controls = Vec::new();
        // Past the end, Previous leads back to the last real page
        let previous = (current > 1 && total_pages > 0).then(|| (current - 1).min(total_pages));
        controls.push(PageControl::Previous(previous));
        controls.extend(page_window(current, total_pages, self.siblings));
        controls.push(PageControl::Next((current < total_pages).then(|| current + 1)));

        Some(PaginatorView {
            current_page: current,
            total_pages,
            total_count,
            per_page: ctx.per_page,
            controls,
        })
    }
}

/// First, last and `current ± siblings`, with gaps where pages are skipped
fn page_window(current: u32, total_pages: u32, siblings: u32) -> Vec<PageControl> {
    if total_pages == 0 {
        return Vec::new();
    }

    let low = current.saturating_sub(siblings).clamp(1, total_pages);
    let high = current.saturating_add(siblings).clamp(1, total_pages);

    let mut pages: Vec<u32> = Vec::new();
    pages.push(1);
    pages.extend(low..=high);
    pages.push(total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut out = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<u32> = None;
    for number in pages {
        if let Some(p) = prev {
            if number > p + 1 {
                out.push(PageControl::Gap);
            }
        }
        out.push(PageControl::Page {
            number,
            active: number == current,
        });
        prev = Some(number);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Refresh
// ─────────────────────────────────────────────────────────────────────────────

/// Rendered refresh button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshView<'a> {
    pub label: &'a str,
    pub disabled: bool,
    pub spinning: bool,
}

/// Button that reloads the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    label: String,
}

impl Default for Refresh {
    fn default() -> Self {
        Self {
            label: "Refresh".to_string(),
        }
    }
}

impl Refresh {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn render<T>(&self, ctx: &ListContext<'_, T>) -> RefreshView<'_> {
        RefreshView {
            label: &self.label,
            disabled: ctx.is_loading(),
            spinning: ctx.is_loading(),
        }
    }

    /// Action for a press; `None` while disabled
    pub fn press<T>(&self, ctx: &ListContext<'_, T>) -> Option<ListAction> {
        (!ctx.is_loading()).then_some(ListAction::Refetch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginated::FetchStatus;

    const STATUSES: [FetchStatus; 4] = [
        FetchStatus::Idle,
        FetchStatus::Loading,
        FetchStatus::Success,
        FetchStatus::Error,
    ];

    fn ctx<'a>(
        status: FetchStatus,
        items: &'a [u32],
        total_count: Option<u64>,
        current_page: u32,
    ) -> ListContext<'a, u32> {
        ListContext {
            status,
            is_fetching: status == FetchStatus::Loading,
            items,
            total_count,
            per_page: 14,
            current_page,
            error: None,
        }
    }

    fn items_slot() -> Items<impl Fn(&u32, &[u32]) -> String, String> {
        Items::new(|item: &u32, _all: &[u32]| format!("#{}", item))
    }

    #[test]
    fn test_empty_and_items_partition_settled_states() {
        let empty = WhenEmpty::new("No patients");
        let items = items_slot();
        let page: Vec<u32> = (0..14).collect();

        for status in STATUSES.into_iter().filter(|s| !s.is_loading()) {
            for data in [&[][..], &page[..1], &page[..]] {
                let c = ctx(status, data, Some(42), 1);
                let shown_empty = empty.render(&c).is_some();
                let shown_items = items.render(&c).is_some();
                assert!(
                    shown_empty ^ shown_items,
                    "status {:?} with {} items rendered empty={} items={}",
                    status,
                    data.len(),
                    shown_empty,
                    shown_items
                );
                assert_eq!(shown_empty, data.is_empty());
            }
        }
    }

    #[test]
    fn test_loading_hides_empty_and_items() {
        let stale = [1, 2, 3];
        let c = ctx(FetchStatus::Loading, &stale, Some(3), 1);

        assert!(WhenEmpty::new(()).render(&c).is_none());
        assert!(items_slot().render(&c).is_none());
        assert_eq!(WhenLoading::new("Loading...").render(&c), Some(&"Loading..."));

        let settled = ctx(FetchStatus::Success, &stale, Some(3), 1);
        assert!(WhenLoading::new("Loading...").render(&settled).is_none());
    }

    #[test]
    fn test_items_maps_in_order_with_full_page() {
        let data = [7, 3, 9];
        let c = ctx(FetchStatus::Success, &data, Some(3), 1);
        let slot = Items::new(|item: &u32, all: &[u32]| (*item, all.len()));
        assert_eq!(slot.render(&c), Some(vec![(7, 3), (3, 3), (9, 3)]));
    }

    #[test]
    fn test_shimmer_substitutes_while_loading() {
        let c = ctx(FetchStatus::Loading, &[], None, 1);

        let slot = items_slot().with_shimmer("░░░".to_string(), None);
        assert_eq!(slot.render(&c).map(|v| v.len()), Some(DEFAULT_SHIMMER_COUNT));

        let slot = items_slot().with_shimmer("░░░".to_string(), Some(3));
        assert_eq!(
            slot.render(&c),
            Some(vec!["░░░".to_string(), "░░░".to_string(), "░░░".to_string()])
        );

        // Once settled, real items replace the shimmer
        let data = [5];
        let settled = ctx(FetchStatus::Success, &data, Some(1), 1);
        assert_eq!(slot.render(&settled), Some(vec!["#5".to_string()]));
    }

    #[test]
    fn test_when_error_needs_error_status() {
        let err = FetchError::Network("connection refused".into());
        let slot = WhenError::new("Could not load");

        let mut c = ctx(FetchStatus::Error, &[], None, 1);
        c.error = Some(&err);
        let (content, shown) = slot.render(&c).unwrap();
        assert_eq!(*content, "Could not load");
        assert_eq!(shown, &err);

        // Stale error on a successful list does not render
        c.status = FetchStatus::Success;
        assert!(slot.render(&c).is_none());
    }

    #[test]
    fn test_paginator_three_pages() {
        let data: Vec<u32> = (0..14).collect();
        let c = ctx(FetchStatus::Success, &data, Some(42), 1);
        let view = Paginator::default().render(&c).unwrap();

        assert_eq!(view.total_pages, 3);
        assert_eq!(
            view.controls,
            vec![
                PageControl::Previous(None),
                PageControl::Page { number: 1, active: true },
                PageControl::Page { number: 2, active: false },
                PageControl::Page { number: 3, active: false },
                PageControl::Next(Some(2)),
            ]
        );
        assert_eq!(view.next(), Some(ListAction::SetPage(2)));
        assert_eq!(view.previous(), None);
        assert_eq!(view.last(), Some(ListAction::SetPage(3)));
        assert_eq!(view.range_label(), "1-14 of 42");
    }

    #[test]
    fn test_paginator_elides_distant_pages() {
        let data = [1];
        let c = ctx(FetchStatus::Success, &data, Some(14 * 20), 10);
        let view = Paginator::default().render(&c).unwrap();

        assert_eq!(
            view.controls,
            vec![
                PageControl::Previous(Some(9)),
                PageControl::Page { number: 1, active: false },
                PageControl::Gap,
                PageControl::Page { number: 9, active: false },
                PageControl::Page { number: 10, active: true },
                PageControl::Page { number: 11, active: false },
                PageControl::Gap,
                PageControl::Page { number: 20, active: false },
                PageControl::Next(Some(11)),
            ]
        );
        assert_eq!(view.go_to(500), Some(ListAction::SetPage(20)));
        assert_eq!(view.go_to(10), None);
    }

    #[test]
    fn test_paginator_past_the_end_points_back_to_last_page() {
        let c = ctx(FetchStatus::Success, &[], Some(42), 50);
        let view = Paginator::default().render(&c).unwrap();

        assert_eq!(
            view.controls,
            vec![
                PageControl::Previous(Some(3)),
                PageControl::Page { number: 1, active: false },
                PageControl::Gap,
                PageControl::Page { number: 3, active: false },
                PageControl::Next(None),
            ]
        );
        // Controls and actions agree
        assert_eq!(view.previous(), Some(ListAction::SetPage(3)));
        assert_eq!(view.next(), None);
        assert_eq!(view.range_label(), "0 of 42");
    }

    #[test]
    fn test_paginator_hidden_while_loading() {
        let c = ctx(FetchStatus::Loading, &[], Some(100), 1);
        assert!(Paginator::default().render(&c).is_none());
    }

    #[test]
    fn test_hide_if_single_page_ignores_current_page() {
        let paginator = Paginator::default().hide_if_single_page(true);
        for page in [1, 2, 50] {
            for total in [Some(0), Some(1), Some(14), None] {
                let c = ctx(FetchStatus::Success, &[], total, page);
                assert!(paginator.render(&c).is_none(), "page {} total {:?}", page, total);
            }
        }

        let c = ctx(FetchStatus::Success, &[], Some(15), 1);
        assert_eq!(paginator.render(&c).unwrap().total_pages, 2);
    }

    #[test]
    fn test_unknown_count_reads_as_zero() {
        let c = ctx(FetchStatus::Error, &[], None, 1);
        let view = Paginator::default().render(&c).unwrap();
        assert_eq!(view.total_count, 0);
        assert_eq!(view.total_pages, 0);
        assert_eq!(
            view.controls,
            vec![PageControl::Previous(None), PageControl::Next(None)]
        );
        assert_eq!(view.next(), None);
        assert_eq!(view.range_label(), "0 of 0");
    }

    #[test]
    fn test_range_label_on_short_last_page() {
        let data = [1];
        let c = ctx(FetchStatus::Success, &data, Some(30), 3);
        let view = Paginator::default().render(&c).unwrap();
        assert_eq!(view.range_label(), "29-30 of 30");
    }

    #[test]
    fn test_refresh_disables_while_loading() {
        let refresh = Refresh::default();

        let loading = ctx(FetchStatus::Loading, &[], None, 1);
        let view = refresh.render(&loading);
        assert_eq!(view.label, "Refresh");
        assert!(view.disabled);
        assert!(view.spinning);
        assert_eq!(refresh.press(&loading), None);

        let settled = ctx(FetchStatus::Success, &[], Some(0), 1);
        assert!(!refresh.render(&settled).disabled);
        assert_eq!(refresh.press(&settled), Some(ListAction::Refetch));

        assert_eq!(Refresh::with_label("Reload").render(&settled).label, "Reload");
    }
}
