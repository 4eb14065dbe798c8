/// Which screen the shell is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// No connectivity; full-screen message with a manual retry action
    Error,
    /// Connected, splash overlay still up
    Loading,
    /// Connected, page loaded, overlay delay elapsed
    Ready,
}

impl Screen {
    pub fn as_str(&self) -> &str {
        match self {
            Screen::Error => "error",
            Screen::Loading => "loading",
            Screen::Ready => "ready",
        }
    }
}

/// The fetched page
#[derive(Clone, Debug, Default)]
pub struct Content {
    pub status_code: Option<u16>,
    pub body: String,
    pub time_ms: u64,
}
