//! Configuration errors.
//!
//! Toast operations themselves never fail: unknown ids are silent no-ops
//! and geometry degrades per-frame. Errors only arise when validating host
//! configuration.

use thiserror::Error;

/// Error validating or parsing container configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	/// Position name not among the six anchors.
	#[error(
		"unknown position `{0}`, expected one of: top-left, top-center, top-right, \
		 bottom-left, bottom-center, bottom-right"
	)]
	UnknownPosition(String),

	/// Offset components must be finite and non-negative.
	#[error("offset `{edge}` must be a finite, non-negative number, got {value}")]
	InvalidOffset {
		/// Which edge carried the bad value.
		edge: &'static str,
		/// The rejected value.
		value: f32,
	},
}
