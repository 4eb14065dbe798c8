//! Event handlers - the state transitions behind each screen change

use crate::app::AppState;
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Content pane
    // ========================

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Page fetch
    // ========================

    /// Issue a page fetch unless one is already pending or the page is loaded
    pub fn start_fetch(&mut self) -> Option<NetworkCommand> {
        if self.content_loaded || self.pending_fetch_id.is_some() {
            return None;
        }

        let id = self.next_id();
        self.pending_fetch_id = Some(id);

        Some(NetworkCommand::FetchContent { id })
    }

    /// Manual reachability recheck from the error screen
    pub fn retry(&mut self) -> Option<NetworkCommand> {
        if self.connected {
            return None;
        }
        Some(NetworkCommand::ProbeNow)
    }

    // ========================
    // Signals from the network layer
    // ========================

    /// Apply a reachability reading; reconnecting with nothing on screen
    /// yet starts the page load over
    pub fn handle_connectivity(&mut self, reachable: bool) -> Option<NetworkCommand> {
        let was_connected = self.connected;
        self.connected = reachable;

        if reachable && !was_connected {
            return self.start_fetch();
        }

        None
    }

    /// Process a network response, possibly emitting a follow-up command
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::Connectivity { reachable } => self.handle_connectivity(reachable),

            NetworkResponse::ContentLoaded { id, status, body, time_ms } => {
                // Only process if it matches the pending fetch
                if self.pending_fetch_id == Some(id) {
                    self.pending_fetch_id = None;
                    self.content_loaded = true;
                    self.content.status_code = Some(status);
                    self.content.body = body;
                    self.content.time_ms = time_ms;
                }
                None
            }

            NetworkResponse::ContentFailed { id, .. } => {
                if self.pending_fetch_id == Some(id) {
                    self.pending_fetch_id = None;
                    // A failed load is indistinguishable from losing the link
                    self.connected = false;
                }
                None
            }
        }
    }

    /// Drop the splash overlay; called when the post-load delay elapses
    pub fn dismiss_overlay(&mut self) {
        if self.content_loaded {
            self.show_overlay = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Screen;

    /// Run a state through fetch-and-load so the page is on screen
    fn load_page(state: &mut AppState) {
        let id = match state.start_fetch() {
            Some(NetworkCommand::FetchContent { id }) => id,
            other => panic!("expected a fetch command, got {:?}", other),
        };
        state.handle_response(NetworkResponse::ContentLoaded {
            id,
            status: 200,
            body: String::from("<html>Sign In</html>"),
            time_ms: 12,
        });
    }

    #[test]
    fn test_starts_loading_with_overlay_up() {
        let state = AppState::new();
        assert_eq!(state.screen(), Screen::Loading);
        assert!(state.show_overlay);
        assert!(!state.content_loaded);
    }

    #[test]
    fn test_overlay_stays_up_while_content_not_loaded() {
        let mut state = AppState::new();

        // Oscillating connectivity never touches the overlay
        state.handle_connectivity(false);
        state.handle_connectivity(true);
        state.handle_connectivity(false);
        state.dismiss_overlay();

        assert!(!state.content_loaded);
        assert!(state.show_overlay);
    }

    #[test]
    fn test_disconnect_forces_error_from_any_screen() {
        let mut state = AppState::new();
        load_page(&mut state);
        state.dismiss_overlay();
        assert_eq!(state.screen(), Screen::Ready);

        state.handle_connectivity(false);
        assert_eq!(state.screen(), Screen::Error);
        // The load itself is not forgotten
        assert!(state.content_loaded);
        assert!(!state.show_overlay);
    }

    #[test]
    fn test_load_failure_is_a_disconnect() {
        let mut state = AppState::new();
        let id = match state.start_fetch() {
            Some(NetworkCommand::FetchContent { id }) => id,
            other => panic!("expected a fetch command, got {:?}", other),
        };

        state.handle_response(NetworkResponse::ContentFailed {
            id,
            message: String::from("Connection failed"),
            time_ms: 7,
        });

        assert_eq!(state.screen(), Screen::Error);
        assert!(!state.connected);
        assert!(state.pending_fetch_id.is_none());
    }

    #[test]
    fn test_stale_fetch_response_is_ignored() {
        let mut state = AppState::new();
        state.start_fetch();

        state.handle_response(NetworkResponse::ContentLoaded {
            id: 99,
            status: 200,
            body: String::from("stale"),
            time_ms: 3,
        });

        assert!(!state.content_loaded);
        assert!(state.pending_fetch_id.is_some());
    }

    #[test]
    fn test_overlay_falls_only_after_load_and_only_once() {
        let mut state = AppState::new();
        load_page(&mut state);
        assert_eq!(state.screen(), Screen::Loading);

        state.dismiss_overlay();
        assert_eq!(state.screen(), Screen::Ready);

        // Nothing left to dismiss
        state.dismiss_overlay();
        assert!(!state.show_overlay);
        assert!(state.content_loaded);
    }

    #[test]
    fn test_reconnect_without_content_refetches() {
        let mut state = AppState::new();
        let id = match state.start_fetch() {
            Some(NetworkCommand::FetchContent { id }) => id,
            other => panic!("expected a fetch command, got {:?}", other),
        };
        state.handle_response(NetworkResponse::ContentFailed {
            id,
            message: String::from("timed out"),
            time_ms: 30_000,
        });
        assert_eq!(state.screen(), Screen::Error);

        let cmd = state.handle_connectivity(true);
        assert_eq!(state.screen(), Screen::Loading);
        assert_eq!(cmd, Some(NetworkCommand::FetchContent { id: 2 }));
    }

    #[test]
    fn test_reconnect_with_content_goes_straight_to_ready() {
        let mut state = AppState::new();
        load_page(&mut state);
        state.dismiss_overlay();
        state.handle_connectivity(false);

        let cmd = state.handle_connectivity(true);
        assert_eq!(state.screen(), Screen::Ready);
        assert_eq!(cmd, None);
    }

    #[test]
    fn test_retry_only_offered_from_error() {
        let mut state = AppState::new();
        assert_eq!(state.retry(), None);

        state.handle_connectivity(false);
        assert_eq!(state.retry(), Some(NetworkCommand::ProbeNow));
    }

    #[test]
    fn test_repeated_connected_readings_do_not_refetch() {
        let mut state = AppState::new();
        state.start_fetch();

        // Poll keeps confirming the link while the fetch is in flight
        assert_eq!(state.handle_connectivity(true), None);
        assert_eq!(state.handle_connectivity(true), None);
        assert_eq!(state.pending_fetch_id, Some(1));
    }
}
