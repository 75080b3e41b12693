//! Easing functions for animation curves.

/// Easing function applied to linear progress.
///
/// Transforms `t ∈ [0.0, 1.0]` into curved progress. Collapse, fade, and
/// entrance animations each pick the curve that matches their feel.
///
/// # Example
///
/// ```
/// use melba_motion::Easing;
///
/// let eased = Easing::EaseOut.apply(0.5);
/// assert!(eased > 0.5); // ease-out runs ahead of linear at the midpoint
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
	/// Constant speed.
	#[default]
	Linear,

	/// Quadratic ease-in: `t²`.
	EaseIn,

	/// Quadratic ease-out: `1 - (1-t)²`.
	EaseOut,

	/// Quadratic ease-in-out: piecewise quadratic.
	EaseInOut,

	/// Cubic ease-out: `1 - (1-t)³`. More pronounced deceleration.
	EaseOutCubic,
}

impl Easing {
	/// Applies the easing function. Input is clamped to `[0.0, 1.0]`.
	#[inline]
	pub fn apply(self, t: f32) -> f32 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Easing::Linear => t,
			Easing::EaseIn => t * t,
			Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
			Easing::EaseInOut => {
				if t < 0.5 {
					2.0 * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
				}
			}
			Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
		}
	}
}
