//! Interactive trait for components that handle keyboard input

use crossterm::event::KeyEvent;

/// Whether a component consumed a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    /// Not handled, bubble up to the app
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Components that react to key presses
pub trait Interactive {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Key hints shown in the status bar while this component has focus
    fn keybind_hints(&self) -> &'static str {
        ""
    }
}
