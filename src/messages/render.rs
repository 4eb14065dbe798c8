//! Render state - data structure sent from App layer to UI for rendering

use crate::constants::SHELL_URL;
use crate::models::{Content, Screen};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub screen: Screen,
    pub url: String,

    // Display flags
    pub connected: bool,
    pub content_loaded: bool,
    pub show_overlay: bool,
    pub is_fetching: bool,

    // Content pane
    pub content: Content,
    pub scroll: u16,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            screen: Screen::Loading,
            url: String::from(SHELL_URL),
            connected: true,
            content_loaded: false,
            show_overlay: true,
            is_fetching: false,
            content: Content::default(),
            scroll: 0,
            show_help: false,
        }
    }
}
