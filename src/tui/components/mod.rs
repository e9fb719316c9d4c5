// TUI components
//
// Stateless render functions take `&App` (or just the data they draw);
// stateful panels own their interaction state and implement `Interactive`.

pub mod list_panel;
pub mod logs_panel;
pub mod paginator_bar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;
