//! Network layer - the page fetch and reachability probing
//!
//! The Network actor receives fetch/probe commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
