//! Container-level configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::options::ToastOptions;
use crate::position::Position;

/// Distance from each screen edge at which viewports anchor, in logical
/// pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOffsets {
	pub top: f32,
	pub right: f32,
	pub bottom: f32,
	pub left: f32,
}

impl Default for EdgeOffsets {
	fn default() -> Self {
		Self::uniform(16.0)
	}
}

impl EdgeOffsets {
	pub fn uniform(inset: f32) -> Self {
		EdgeOffsets { top: inset, right: inset, bottom: inset, left: inset }
	}

	/// Offsets must be finite and non-negative.
	pub fn validate(&self) -> Result<(), ConfigError> {
		for (edge, value) in [
			("top", self.top),
			("right", self.right),
			("bottom", self.bottom),
			("left", self.left),
		] {
			if !value.is_finite() || value < 0.0 {
				return Err(ConfigError::InvalidOffset { edge, value });
			}
		}
		Ok(())
	}
}

/// Shared configuration for a toast container.
///
/// `defaults` merge under every call's own options, so a container can
/// pick a house style (position, duration, fill) once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToasterConfig {
	/// Anchor for toasts that do not choose a position.
	pub position: Position,
	pub offset: EdgeOffsets,
	/// Options merged under every toast call.
	pub defaults: ToastOptions,
}

impl ToasterConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.offset.validate()
	}
}
