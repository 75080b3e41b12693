//! Screen anchor positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Screen anchor for a toast stack.
///
/// Toasts partition by position into up to six independent stacks; each
/// stack orders, times, and pauses on its own.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
	TopLeft,
	TopCenter,
	#[default]
	TopRight,
	BottomLeft,
	BottomCenter,
	BottomRight,
}

impl Position {
	/// All positions, in reading order.
	pub const ALL: [Position; 6] = [
		Position::TopLeft,
		Position::TopCenter,
		Position::TopRight,
		Position::BottomLeft,
		Position::BottomCenter,
		Position::BottomRight,
	];

	/// True for anchors along the top edge.
	pub fn is_top(self) -> bool {
		matches!(self, Position::TopLeft | Position::TopCenter | Position::TopRight)
	}

	/// True for anchors along the bottom edge. Bottom stacks grow upward.
	pub fn is_bottom(self) -> bool {
		!self.is_top()
	}

	/// Kebab-case wire name.
	pub fn as_str(self) -> &'static str {
		match self {
			Position::TopLeft => "top-left",
			Position::TopCenter => "top-center",
			Position::TopRight => "top-right",
			Position::BottomLeft => "bottom-left",
			Position::BottomCenter => "bottom-center",
			Position::BottomRight => "bottom-right",
		}
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Position {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Position::ALL
			.into_iter()
			.find(|p| p.as_str() == s)
			.ok_or_else(|| ConfigError::UnknownPosition(s.to_owned()))
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(Position::TopLeft, "top-left")]
	#[case(Position::TopCenter, "top-center")]
	#[case(Position::TopRight, "top-right")]
	#[case(Position::BottomLeft, "bottom-left")]
	#[case(Position::BottomCenter, "bottom-center")]
	#[case(Position::BottomRight, "bottom-right")]
	fn wire_names_round_trip(#[case] position: Position, #[case] name: &str) {
		assert_eq!(position.as_str(), name);
		assert_eq!(name.parse::<Position>().unwrap(), position);
	}

	#[test]
	fn unknown_name_is_an_error() {
		let err = "middle-left".parse::<Position>().unwrap_err();
		assert!(matches!(err, ConfigError::UnknownPosition(name) if name == "middle-left"));
	}

	#[test]
	fn default_anchor_is_top_right() {
		assert_eq!(Position::default(), Position::TopRight);
	}

	#[test]
	fn edge_helpers_partition() {
		for position in Position::ALL {
			assert_ne!(position.is_top(), position.is_bottom());
		}
	}
}
