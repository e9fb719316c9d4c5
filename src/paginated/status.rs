//! Fetch lifecycle status

/// Where the current query is in its lifecycle
///
/// Only one status holds at a time. `Loading` means there is nothing usable
/// for the current query key yet; a background refetch of an already loaded
/// page keeps `Success` and sets `is_fetching` on the context instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Not mounted yet, nothing requested
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl FetchStatus {
    pub fn is_loading(self) -> bool {
        self == Self::Loading
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}
