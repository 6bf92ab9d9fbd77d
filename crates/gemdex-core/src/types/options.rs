//! User options stored alongside the cache.

use serde::{Deserialize, Serialize};

/// Overlay options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Keep the overlay visible instead of toggling it with the shortcut.
    pub pinned: bool,
    /// Show Gems on the empty-conversation screen.
    pub show_in_empty_state: bool,
    /// Show Gems on the chat screen.
    pub show_in_chat: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pinned: false,
            show_in_empty_state: true,
            show_in_chat: true,
        }
    }
}
