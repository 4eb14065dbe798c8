//! App actor - message loop processing UI events and network responses
//!
//! All state mutation happens here, on one task. The one-shot overlay
//! timer is armed inside the select loop, so tearing the actor down
//! also tears the timer down.

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::app::state::AppState;
use crate::constants::OVERLAY_DELAY;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::models::Screen;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    /// When the splash overlay comes down; armed once the page has loaded
    overlay_deadline: Option<Instant>,
    last_screen: Screen,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let state = AppState::new();
        let last_screen = state.screen();
        AppActor {
            state,
            network_tx,
            render_tx,
            overlay_deadline: None,
            last_screen,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state and kick off the page fetch
        self.publish();
        if let Some(cmd) = self.state.start_fetch() {
            let _ = self.network_tx.send(cmd);
        }

        loop {
            let overlay_deadline = self.overlay_deadline;

            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    if let Some(cmd) = self.state.handle_response(response) {
                        let _ = self.network_tx.send(cmd);
                    }
                    self.arm_overlay_timer();
                    self.publish();
                }
                _ = overlay_timer(overlay_deadline) => {
                    self.overlay_deadline = None;
                    self.state.dismiss_overlay();
                    self.publish();
                }
                else => break,
            }
        }
    }

    /// Arm the one-shot overlay timer the moment the page load lands
    fn arm_overlay_timer(&mut self) {
        if self.state.content_loaded && self.state.show_overlay && self.overlay_deadline.is_none() {
            self.overlay_deadline = Some(Instant::now() + OVERLAY_DELAY);
        }
    }

    /// Send the current render state, logging screen flips
    fn publish(&mut self) {
        let screen = self.state.screen();
        if screen != self.last_screen {
            tracing::info!(from = self.last_screen.as_str(), to = screen.as_str(), "Screen changed");
            self.last_screen = screen;
        }
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Retry => {
                if let Some(cmd) = self.state.retry() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::Quit => return true,
        }

        false
    }
}

/// Pending forever unless a deadline is armed
async fn overlay_timer(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Harness = (
        mpsc::UnboundedSender<UiEvent>,
        mpsc::UnboundedSender<NetworkResponse>,
        mpsc::UnboundedReceiver<NetworkCommand>,
        mpsc::UnboundedReceiver<RenderState>,
    );

    fn spawn_actor() -> Harness {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(net_cmd_tx, render_tx);
        tokio::spawn(actor.run(ui_rx, net_resp_rx));

        (ui_tx, net_resp_tx, net_cmd_rx, render_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlay_falls_two_seconds_after_load() {
        let (_ui_tx, net_tx, mut cmd_rx, mut render_rx) = spawn_actor();

        // Initial render plus the startup fetch
        let first = render_rx.recv().await.unwrap();
        assert_eq!(first.screen, Screen::Loading);
        assert_eq!(
            cmd_rx.recv().await.unwrap(),
            NetworkCommand::FetchContent { id: 1 }
        );

        let loaded_at = Instant::now();
        net_tx
            .send(NetworkResponse::ContentLoaded {
                id: 1,
                status: 200,
                body: String::from("<html>Sign In</html>"),
                time_ms: 42,
            })
            .unwrap();

        // Still loading right after the response lands
        let state = render_rx.recv().await.unwrap();
        assert_eq!(state.screen, Screen::Loading);
        assert!(state.content_loaded);

        // The next render is the overlay falling, no earlier than the delay
        let state = render_rx.recv().await.unwrap();
        assert_eq!(state.screen, Screen::Ready);
        assert!(!state.show_overlay);
        assert!(loaded_at.elapsed() >= OVERLAY_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_then_retry_reloads() {
        let (ui_tx, net_tx, mut cmd_rx, mut render_rx) = spawn_actor();
        render_rx.recv().await.unwrap();
        cmd_rx.recv().await.unwrap();

        // The first fetch dies; indistinguishable from losing the link
        net_tx
            .send(NetworkResponse::ContentFailed {
                id: 1,
                message: String::from("Connection failed"),
                time_ms: 7,
            })
            .unwrap();
        assert_eq!(render_rx.recv().await.unwrap().screen, Screen::Error);

        // Manual retry probes immediately
        ui_tx.send(UiEvent::Retry).unwrap();
        assert_eq!(cmd_rx.recv().await.unwrap(), NetworkCommand::ProbeNow);
        render_rx.recv().await.unwrap();

        // Probe comes back reachable: loading again, fresh fetch issued
        net_tx
            .send(NetworkResponse::Connectivity { reachable: true })
            .unwrap();
        assert_eq!(render_rx.recv().await.unwrap().screen, Screen::Loading);
        assert_eq!(
            cmd_rx.recv().await.unwrap(),
            NetworkCommand::FetchContent { id: 2 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_after_ready_skips_the_overlay() {
        let (_ui_tx, net_tx, mut cmd_rx, mut render_rx) = spawn_actor();
        render_rx.recv().await.unwrap();
        cmd_rx.recv().await.unwrap();

        net_tx
            .send(NetworkResponse::ContentLoaded {
                id: 1,
                status: 200,
                body: String::from("ok"),
                time_ms: 5,
            })
            .unwrap();
        render_rx.recv().await.unwrap();
        assert_eq!(render_rx.recv().await.unwrap().screen, Screen::Ready);

        net_tx
            .send(NetworkResponse::Connectivity { reachable: false })
            .unwrap();
        assert_eq!(render_rx.recv().await.unwrap().screen, Screen::Error);

        net_tx
            .send(NetworkResponse::Connectivity { reachable: true })
            .unwrap();
        assert_eq!(render_rx.recv().await.unwrap().screen, Screen::Ready);
        // No refetch for a page that is already loaded
        assert!(cmd_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_propagates_shutdown() {
        let (ui_tx, _net_tx, mut cmd_rx, mut render_rx) = spawn_actor();
        render_rx.recv().await.unwrap();
        cmd_rx.recv().await.unwrap();

        ui_tx.send(UiEvent::Quit).unwrap();
        assert_eq!(cmd_rx.recv().await.unwrap(), NetworkCommand::Shutdown);
    }
}
