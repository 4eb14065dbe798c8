//! App state - pure data structure with no I/O logic

use crate::constants::SHELL_URL;
use crate::messages::RenderState;
use crate::models::{Content, Screen};

/// Main application state - pure data, no I/O
///
/// `show_overlay` only ever transitions true -> false, and only after
/// `content_loaded` transitioned false -> true. `connected` may oscillate
/// at any time.
pub struct AppState {
    /// Last-known network reachability
    pub connected: bool,

    /// Whether the page fetch completed; set once, never reset
    pub content_loaded: bool,

    /// Whether the splash overlay is still up
    pub show_overlay: bool,

    // Fetch bookkeeping
    pub content: Content,
    pub next_fetch_id: u64,
    pub pending_fetch_id: Option<u64>,

    // Content pane
    pub scroll: u16,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            connected: true,
            content_loaded: false,
            show_overlay: true,
            content: Content::default(),
            next_fetch_id: 1,
            pending_fetch_id: None,
            scroll: 0,
            show_help: false,
        }
    }

    /// Generate a unique fetch ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_fetch_id;
        self.next_fetch_id += 1;
        id
    }

    /// The screen is derived from the three display flags, never stored
    pub fn screen(&self) -> Screen {
        if !self.connected {
            Screen::Error
        } else if self.show_overlay {
            Screen::Loading
        } else {
            Screen::Ready
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            screen: self.screen(),
            url: String::from(SHELL_URL),
            connected: self.connected,
            content_loaded: self.content_loaded,
            show_overlay: self.show_overlay,
            is_fetching: self.pending_fetch_id.is_some(),
            content: self.content.clone(),
            scroll: self.scroll,
            show_help: self.show_help,
        }
    }
}
