//! Fixed layout metrics and the pure geometry helpers built on them.

use melba_engine::{EdgeOffsets, Position};

/// Height of the collapsed pill.
pub const PILL_HEIGHT: f32 = 40.0;

/// Width of the full toast box. The pill floats inside it.
pub const TOAST_WIDTH: f32 = 350.0;

/// Horizontal padding added to the measured header when sizing the pill.
pub const PILL_PADDING: f32 = 10.0;

/// Expanded height floor, as a multiple of the pill height.
const MIN_EXPAND_RATIO: f32 = 2.25;

/// Smallest height an expanded toast may take.
pub const MIN_EXPANDED_HEIGHT: f32 = PILL_HEIGHT * MIN_EXPAND_RATIO;

/// Gooey filter blur, as a share of the corner radius.
const BLUR_RATIO: f32 = 0.5;

/// Pill width for a measured header width.
///
/// Unmeasured or degenerate inputs fall back to the minimum square pill
/// rather than collapsing the layout.
pub fn pill_width(measured_header: f32) -> f32 {
	if !measured_header.is_finite() || measured_header <= 0.0 {
		return PILL_HEIGHT;
	}
	(measured_header + PILL_PADDING).max(PILL_HEIGHT)
}

/// Open toast height for a measured body height.
pub fn expanded_height(measured_body: f32) -> f32 {
	if !measured_body.is_finite() || measured_body < 0.0 {
		return MIN_EXPANDED_HEIGHT;
	}
	(PILL_HEIGHT + measured_body).max(MIN_EXPANDED_HEIGHT)
}

/// Blur radius of the gooey merge filter for a corner radius.
pub fn gooey_blur(roundness: f32) -> f32 {
	roundness.max(0.0) * BLUR_RATIO
}

/// Which edge of the toast box the pill hugs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HorizontalAlign {
	Left,
	Center,
	Right,
}

/// Alignment for a stack anchor: pills hug the screen edge they sit near.
pub fn horizontal_align(position: Position) -> HorizontalAlign {
	match position {
		Position::TopLeft | Position::BottomLeft => HorizontalAlign::Left,
		Position::TopCenter | Position::BottomCenter => HorizontalAlign::Center,
		Position::TopRight | Position::BottomRight => HorizontalAlign::Right,
	}
}

/// X of the pill inside the toast box, for a given pill width.
pub fn pill_x(align: HorizontalAlign, pill_width: f32) -> f32 {
	match align {
		HorizontalAlign::Left => 0.0,
		HorizontalAlign::Center => (TOAST_WIDTH - pill_width) / 2.0,
		HorizontalAlign::Right => TOAST_WIDTH - pill_width,
	}
}

/// Which way a stack's toasts open and grow.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GrowDirection {
	/// Top-anchored stacks grow downward.
	#[default]
	Down,
	/// Bottom-anchored stacks grow upward.
	Up,
}

/// Growth direction for a stack anchor.
pub fn grow_direction(position: Position) -> GrowDirection {
	if position.is_top() { GrowDirection::Down } else { GrowDirection::Up }
}

/// Screen-space x of the edge or center line a stack aligns against.
pub fn anchor_x(position: Position, offset: &EdgeOffsets, screen_width: f32) -> f32 {
	match horizontal_align(position) {
		HorizontalAlign::Left => offset.left,
		HorizontalAlign::Center => screen_width / 2.0,
		HorizontalAlign::Right => screen_width - offset.right,
	}
}

/// Screen-space y a stack anchors at. Stacks grow away from this edge.
pub fn anchor_y(position: Position, offset: &EdgeOffsets, screen_height: f32) -> f32 {
	if position.is_top() { offset.top } else { screen_height - offset.bottom }
}
