//! # Event subscribers.
//!
//! - `subscriber` — the [`Subscribe`] trait and the [`forward`] pump that
//!   drains a bus receiver into a set of subscribers.
//! - `log` — [`LogWriter`], a stdout subscriber for debugging and demos.

mod log;
mod subscriber;

pub use log::LogWriter;
pub use subscriber::{forward, Subscribe};
