//! # FastClock Shell
//!
//! A minimal terminal shell around the FastClock mobile web app: it fetches
//! the sign-in page, keeps a splash overlay up while the page loads, watches
//! network reachability on a fixed schedule, and falls back to a full-screen
//! error view with manual retry when the link goes away.
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (presentation state machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;
pub mod constants;

// Re-export commonly used types
pub use models::{Content, Screen};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
