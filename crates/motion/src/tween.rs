//! Delta-driven animation tweening.

use std::time::Duration;

use crate::easing::Easing;
use crate::lerp::Animatable;

/// Animates a value from `start` to `end` over a fixed duration.
///
/// The tween holds its own elapsed time and is advanced by the host with
/// [`Tween::advance`]; it never consults a clock.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use melba_motion::{Easing, Tween};
///
/// let mut fade = Tween::new(0.0f32, 1.0f32, Duration::from_millis(600))
/// 	.with_easing(Easing::EaseOutCubic);
///
/// fade.advance(Duration::from_millis(300));
/// assert!(fade.value() > 0.5); // ease-out front-loads the motion
/// assert!(!fade.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Tween<T: Animatable> {
	/// Starting value.
	pub start: T,
	/// Target value.
	pub end: T,
	/// Total animation duration.
	pub duration: Duration,
	/// Easing function to apply.
	pub easing: Easing,
	elapsed: Duration,
}

impl<T: Animatable> Tween<T> {
	/// Creates a new tween with linear easing and no elapsed time.
	pub fn new(start: T, end: T, duration: Duration) -> Self {
		Self { start, end, duration, easing: Easing::Linear, elapsed: Duration::ZERO }
	}

	/// Creates a tween that is already complete, resting at `value`.
	pub fn settled(value: T) -> Self {
		Self::new(value.clone(), value, Duration::ZERO)
	}

	/// Sets the easing function (builder pattern).
	#[must_use]
	pub fn with_easing(mut self, easing: Easing) -> Self {
		self.easing = easing;
		self
	}

	/// Advances elapsed time by `dt`, saturating at the duration.
	pub fn advance(&mut self, dt: Duration) {
		self.elapsed = (self.elapsed + dt).min(self.duration);
	}

	/// Linear progress in `[0.0, 1.0]`. Zero-duration tweens are complete.
	#[inline]
	pub fn progress(&self) -> f32 {
		if self.duration.is_zero() {
			return 1.0;
		}
		(self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
	}

	/// Progress with the configured easing applied.
	#[inline]
	pub fn eased_progress(&self) -> f32 {
		self.easing.apply(self.progress())
	}

	/// The current interpolated value.
	#[inline]
	pub fn value(&self) -> T {
		self.start.lerp(&self.end, self.eased_progress())
	}

	/// True once the elapsed time has reached the duration.
	#[inline]
	pub fn is_complete(&self) -> bool {
		self.progress() >= 1.0
	}

	/// Redirects the animation toward `new_end`.
	///
	/// The current value becomes the new starting point and elapsed time
	/// restarts, so motion stays continuous.
	pub fn retarget(&mut self, new_end: T) {
		self.start = self.value();
		self.end = new_end;
		self.elapsed = Duration::ZERO;
	}
}
