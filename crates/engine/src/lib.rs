//! Toast lifecycle engine.
//!
//! Keeps an ordered registry of toast records, resolves per-call options
//! against container defaults, counts down dismissal and removal timers,
//! and notifies subscribers after every change. Presentation concerns
//! live in the surface crate; the engine makes no rendering assumptions.
//!
//! Time never advances on its own. The embedding drives
//! [`Toasts::tick`] with measured frame deltas, which keeps every timing
//! behavior reproducible.
//!
//! ```
//! use std::time::Duration;
//!
//! use melba_engine::{ToastOptions, Toasts};
//!
//! let toasts = Toasts::new();
//! let id = toasts.success(ToastOptions::new().title("Profile saved"));
//!
//! toasts.tick(Duration::from_millis(16));
//! assert_eq!(toasts.get(id).unwrap().title, "Profile saved");
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod position;
pub mod promise;
pub mod record;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod subscribers;
pub mod toasts;

pub use config::{EdgeOffsets, ToasterConfig};
pub use error::ConfigError;
pub use options::{
	AutoDismiss, Autopilot, AutopilotDelays, DEFAULT_DURATION, DEFAULT_ROUNDNESS, EXIT_DURATION,
	StyleOverrides, ToastOptions,
};
pub use position::Position;
pub use promise::{PromiseOptions, StateResolver};
pub use record::{InstanceId, ToastButton, ToastId, ToastRecord};
pub use state::ToastState;
pub use subscribers::SubscriberId;
pub use toasts::Toasts;

#[cfg(test)]
mod tests;
