//! Application constants
//!
//! Centralized location for magic strings and timer defaults.

use std::time::Duration;

/// The one page this shell displays
pub const SHELL_URL: &str = "https://fastclock.dexignzone.com/mobile/xhtml/sign-in.html";

/// Reachability probe target (the page origin)
pub const PROBE_URL: &str = "https://fastclock.dexignzone.com/";

/// Period of the scheduled reachability poll
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// How long the splash overlay stays up after the page has loaded
pub const OVERLAY_DELAY: Duration = Duration::from_millis(2000);

/// Per-request timeout for reachability probes
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Application name
pub const APP_NAME: &str = "FastClock Shell";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
