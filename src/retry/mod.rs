//! # Retry session controller.
//!
//! - `config` — [`RetryConfig`]: deadlines, poll interval, attempt cap,
//!   failure message.
//! - `observe` — single-attempt observation loop.
//! - `controller` — [`RetrySession`]: the spawn → observe → decide → wait
//!   loop.

mod config;
mod controller;
mod observe;

pub use config::RetryConfig;
pub use controller::RetrySession;
