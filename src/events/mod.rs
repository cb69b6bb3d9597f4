//! # Lifecycle events published during a retry run.
//!
//! - `event` — [`Event`] and [`EventKind`]: what happened, with metadata.
//! - `bus` — [`Bus`]: broadcast channel carrying events to subscribers.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
