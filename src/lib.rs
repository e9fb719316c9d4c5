// carelist - paginated collection browser for hospital management backends
//
// Architecture:
// - request: fetch contract, route templates, HTTP fetcher (reqwest)
// - paginated: list controller plus the slot views composed on top of it
// - demo: in-memory patient registry behind the same fetch contract
// - tui (ratatui): table, paginator and refresh controls over one list
// - config/cli/logging: layered settings and tracing setup

pub mod cli;
pub mod config;
pub mod demo;
pub mod logging;
pub mod paginated;
pub mod request;
pub mod tui;
