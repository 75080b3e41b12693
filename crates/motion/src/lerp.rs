//! The [`Animatable`] trait for values that support interpolation.

/// A value that can be linearly interpolated.
///
/// Toast geometry animates scalar dimensions and 2D offsets, so only those
/// kinds are implemented here.
///
/// # Example
///
/// ```
/// use melba_motion::Animatable;
///
/// assert_eq!(0.0f32.lerp(&80.0, 0.25), 20.0);
/// ```
pub trait Animatable: Clone {
	/// Interpolates between `self` (`t = 0.0`) and `target` (`t = 1.0`).
	///
	/// Implementations clamp `t` to `[0.0, 1.0]`.
	fn lerp(&self, target: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
	#[inline]
	fn lerp(&self, target: &Self, t: f32) -> Self {
		let t = t.clamp(0.0, 1.0);
		self + (target - self) * t
	}
}

impl Animatable for f64 {
	#[inline]
	fn lerp(&self, target: &Self, t: f32) -> Self {
		let t = f64::from(t.clamp(0.0, 1.0));
		self + (target - self) * t
	}
}

/// 2D point or offset.
impl Animatable for (f32, f32) {
	#[inline]
	fn lerp(&self, target: &Self, t: f32) -> Self {
		(self.0.lerp(&target.0, t), self.1.lerp(&target.1, t))
	}
}
