//! Clipboard access for copying rows
//!
//! A fresh `arboard` clipboard is opened per copy so nothing is held open
//! between keypresses.

use anyhow::{Context, Result};
use arboard::Clipboard;
use serde_json::Value;

/// Pretty JSON for a row, as it is put on the clipboard
pub fn row_json(row: &Value) -> Result<String> {
    serde_json::to_string_pretty(row).context("Failed to serialize row")
}

/// Copy text to the system clipboard
///
/// Fails without a display server (headless Linux) or on permission errors.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
