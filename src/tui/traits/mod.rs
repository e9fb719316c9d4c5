//! Input contracts for TUI components
//!
//! Key events go to the app's global handler first. Whatever it does not
//! claim is offered to the focused component, which answers [`Handled`].

mod interactive;

pub use interactive::{Handled, Interactive};
