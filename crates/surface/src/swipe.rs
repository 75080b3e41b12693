//! Vertical swipe-to-dismiss tracking.

/// Farthest the toast visually travels with the pointer, in either
/// direction. Raw drag distance keeps accumulating past this.
pub const SWIPE_MAX_TRAVEL: f32 = 20.0;

/// Raw drag distance past which a release dismisses instead of settling.
pub const SWIPE_DISMISS_DISTANCE: f32 = 30.0;

/// What a press landed on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PressTarget {
	Toast,
	/// Presses on the action button never start a swipe; the button
	/// consumes them as a click.
	ActionButton,
}

/// How a released swipe resolves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwipeOutcome {
	/// Short drag. The toast springs back into place.
	Settle,
	/// The drag crossed the dismiss distance.
	Dismiss,
}

/// One pointer drag along the vertical axis.
#[derive(Clone, Copy, Debug)]
pub struct SwipeTracker {
	origin: f32,
	delta: f32,
}

impl SwipeTracker {
	pub fn begin(origin_y: f32) -> Self {
		SwipeTracker { origin: origin_y, delta: 0.0 }
	}

	/// Tracks the pointer to a new y. Non-finite samples are dropped.
	pub fn drag(&mut self, y: f32) {
		if y.is_finite() {
			self.delta = y - self.origin;
		}
	}

	/// Unclamped drag distance from the press origin.
	pub fn raw_delta(&self) -> f32 {
		self.delta
	}

	/// Visual offset: the raw delta clamped to the travel limit.
	pub fn offset(&self) -> f32 {
		self.delta.clamp(-SWIPE_MAX_TRAVEL, SWIPE_MAX_TRAVEL)
	}

	/// Ends the drag; the dismiss distance is judged on the raw delta,
	/// not the clamped visual offset.
	pub fn release(self) -> SwipeOutcome {
		if self.delta.abs() > SWIPE_DISMISS_DISTANCE {
			SwipeOutcome::Dismiss
		} else {
			SwipeOutcome::Settle
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[test]
	fn offset_clamps_but_raw_delta_keeps_going() {
		let mut swipe = SwipeTracker::begin(100.0);
		swipe.drag(160.0);
		assert_eq!(swipe.raw_delta(), 60.0);
		assert_eq!(swipe.offset(), SWIPE_MAX_TRAVEL);

		swipe.drag(30.0);
		assert_eq!(swipe.raw_delta(), -70.0);
		assert_eq!(swipe.offset(), -SWIPE_MAX_TRAVEL);
	}

	#[rstest]
	#[case(0.0, SwipeOutcome::Settle)]
	#[case(SWIPE_DISMISS_DISTANCE, SwipeOutcome::Settle)] // boundary stays put
	#[case(SWIPE_DISMISS_DISTANCE + 1.0, SwipeOutcome::Dismiss)]
	#[case(-(SWIPE_DISMISS_DISTANCE + 1.0), SwipeOutcome::Dismiss)]
	fn release_judges_the_raw_distance(#[case] delta: f32, #[case] expected: SwipeOutcome) {
		let mut swipe = SwipeTracker::begin(0.0);
		swipe.drag(delta);
		assert_eq!(swipe.release(), expected);
	}

	#[test]
	fn dismiss_distance_exceeds_the_visual_travel() {
		// A drag pinned at the visual limit is still short of dismissing.
		assert!(SWIPE_DISMISS_DISTANCE > SWIPE_MAX_TRAVEL);
	}

	#[test]
	fn bogus_samples_are_ignored() {
		let mut swipe = SwipeTracker::begin(50.0);
		swipe.drag(70.0);
		swipe.drag(f32::NAN);
		assert_eq!(swipe.raw_delta(), 20.0);
		assert_eq!(swipe.offset(), 20.0);
	}
}
