//! # Subscriber trait and event pump.
//!
//! A [`Subscribe`] implementation receives every event a run publishes.
//! [`forward`] drains a bus receiver into a set of subscribers sequentially;
//! spawn it as its own task next to the run it observes.
//!
//! ## Lag semantics
//! If the pump falls behind the bus ring buffer it skips the lost events and
//! keeps going; observation is best-effort and must never stall the run.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::events::Event;

/// # Hook into run lifecycle events.
///
/// Implement for logging, metrics, or test assertions; handlers run outside
/// the controller and cannot affect retry scheduling.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use probevisor::{Event, Subscribe};
///
/// struct Counter(std::sync::atomic::AtomicUsize);
///
/// #[async_trait]
/// impl Subscribe for Counter {
///     async fn handle(&self, _ev: &Event) {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///     }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync {
    /// Processes one event.
    async fn handle(&self, ev: &Event);
}

/// Drains `rx` into `subscribers` until the sending side is dropped.
///
/// Events are delivered to each subscriber in order. On lag the skipped
/// events are silently dropped and delivery resumes with the next available
/// event.
pub async fn forward(mut rx: broadcast::Receiver<Event>, subscribers: Vec<Arc<dyn Subscribe>>) {
    loop {
        match rx.recv().await {
            Ok(ev) => {
                for sub in &subscribers {
                    sub.handle(&ev).await;
                }
            }
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}
