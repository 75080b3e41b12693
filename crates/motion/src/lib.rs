//! Animation primitives for the melba toast engine.
//!
//! Everything here advances through explicit time deltas: tweens and springs
//! are stepped with [`Duration`](std::time::Duration) values supplied by the
//! host's frame loop. Nothing in this crate samples wall-clock time, so the
//! host controls pacing and tests control time.

pub mod easing;
pub mod lerp;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use lerp::Animatable;
pub use spring::{Spring, SpringParams};
pub use tween::Tween;
