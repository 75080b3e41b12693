//! Spring physics via the analytically solved damped harmonic oscillator.
//!
//! The spring solves `x''(t) + 2ζω₀x'(t) + ω₀²x(t) = ω₀²` in closed form,
//! so stepping is just evaluating the solution at the accumulated elapsed
//! time. ζ (the damping ratio) controls bounce; ω₀ (the natural frequency)
//! is derived from a target settle duration.

use std::time::Duration;

/// Normalized travel threshold under which the spring counts as settled.
const POSITION_THRESHOLD: f32 = 0.01;

/// Settling factor for a critically damped spring: solving
/// `e^(-ω₀T)(1 + ω₀T) = 0.01` gives `T ≈ 6.6 / ω₀`.
const SETTLE_FACTOR: f32 = 6.6;

/// Minimum elapsed seconds before a spring may settle, to skip the initial
/// transient where the position is still near the start.
const MIN_SETTLE_SECS: f32 = 0.02;

/// Spring parameters: natural frequency plus damping ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
	/// Natural frequency ω₀.
	pub omega_0: f32,
	/// Damping ratio ζ: `< 1.0` bounces, `= 1.0` is critically damped,
	/// `> 1.0` is overdamped.
	pub damping_ratio: f32,
}

impl SpringParams {
	/// Critically damped parameters that settle within 1% of the target at
	/// roughly `duration`.
	pub fn from_duration(duration: Duration) -> Self {
		let secs = duration.as_secs_f32().max(0.01);
		Self { omega_0: SETTLE_FACTOR / secs, damping_ratio: 1.0 }
	}

	/// Parameters with a bounce amount in `[0.0, 1.0)`.
	///
	/// Bounce maps onto the damping ratio as `ζ = 1 − bounce`: zero bounce
	/// is critically damped, larger values overshoot and oscillate.
	pub fn with_bounce(duration: Duration, bounce: f32) -> Self {
		let mut params = Self::from_duration(duration);
		params.damping_ratio = 1.0 - bounce.clamp(0.0, 0.95);
		params
	}

	/// Normalized position at time `t`, from 0.0 toward 1.0.
	///
	/// Underdamped springs overshoot past 1.0 before converging.
	fn response(&self, t: f32) -> f32 {
		let omega_0 = self.omega_0;
		let zeta = self.damping_ratio;

		if zeta < 1.0 {
			// Underdamped:
			// x(t) = 1 - e^(-ζω₀t)[cos(ωd·t) + (ζ/√(1-ζ²))·sin(ωd·t)]
			let complement = 1.0 - zeta * zeta;
			let omega_d = omega_0 * complement.sqrt();
			let decay = (-zeta * omega_0 * t).exp();
			let cos_term = (omega_d * t).cos();
			let sin_term = (zeta / complement.sqrt()) * (omega_d * t).sin();
			1.0 - decay * (cos_term + sin_term)
		} else if (zeta - 1.0).abs() < 0.001 {
			// Critically damped: x(t) = 1 - e^(-ω₀t)(1 + ω₀t)
			let decay = (-omega_0 * t).exp();
			1.0 - decay * (1.0 + omega_0 * t)
		} else {
			// Overdamped:
			// x(t) = 1 - e^(-ζω₀t)[cosh(γt) + (ζ/√(ζ²-1))·sinh(γt)]
			let excess = zeta * zeta - 1.0;
			let gamma = omega_0 * excess.sqrt();
			let decay = (-zeta * omega_0 * t).exp();
			let cosh_term = (gamma * t).cosh();
			let sinh_term = (zeta / excess.sqrt()) * (gamma * t).sinh();
			1.0 - decay * (cosh_term + sinh_term)
		}
	}

	/// True once the motion at time `t` is indistinguishable from rest.
	///
	/// Underdamped motion crosses the target mid-oscillation, so the test
	/// reads the decay envelope rather than the instantaneous position.
	fn settled_at(&self, t: f32, position: f32) -> bool {
		if t < MIN_SETTLE_SECS {
			return false;
		}
		let zeta = self.damping_ratio;
		if zeta < 1.0 {
			let amplitude = 1.0 + zeta / (1.0 - zeta * zeta).sqrt();
			(-zeta * self.omega_0 * t).exp() * amplitude < POSITION_THRESHOLD
		} else {
			(position - 1.0).abs() < POSITION_THRESHOLD
		}
	}
}

/// A spring animating a scalar from one value to another.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use melba_motion::{Spring, SpringParams};
///
/// let params = SpringParams::from_duration(Duration::from_millis(300));
/// let mut width = Spring::new(40.0, 180.0, params);
/// for _ in 0..60 {
/// 	width.tick(Duration::from_millis(16));
/// }
/// assert!(width.is_settled());
/// assert_eq!(width.value(), 180.0);
/// ```
#[derive(Clone, Debug)]
pub struct Spring {
	from: f32,
	to: f32,
	params: SpringParams,
	elapsed: f32,
	position: f32,
	settled: bool,
}

impl Spring {
	/// Creates a spring moving from `from` toward `to`.
	pub fn new(from: f32, to: f32, params: SpringParams) -> Self {
		let settled = (to - from).abs() < f32::EPSILON;
		Self { from, to, params, elapsed: 0.0, position: if settled { 1.0 } else { 0.0 }, settled }
	}

	/// Creates a spring already at rest at `value`.
	pub fn rest_at(value: f32, params: SpringParams) -> Self {
		Self::new(value, value, params)
	}

	/// Advances the spring by `dt` and returns the current value.
	pub fn tick(&mut self, dt: Duration) -> f32 {
		if self.settled {
			return self.to;
		}
		self.elapsed += dt.as_secs_f32();
		let x = self.params.response(self.elapsed);
		if self.params.settled_at(self.elapsed, x) {
			self.settled = true;
			self.position = 1.0;
		} else {
			// Allow overshoot for bouncy springs, within reason.
			self.position = x.clamp(-0.5, 1.5);
		}
		self.value()
	}

	/// The current value. Overshoots the target while a bouncy spring rings.
	pub fn value(&self) -> f32 {
		self.from + (self.to - self.from) * self.position
	}

	/// The value the spring is heading toward.
	pub fn target(&self) -> f32 {
		self.to
	}

	/// True once motion has decayed to rest at the target.
	pub fn is_settled(&self) -> bool {
		self.settled
	}

	/// Redirects the spring toward `to`, starting from the current value.
	pub fn retarget(&mut self, to: f32) {
		let params = self.params;
		self.retarget_with(to, params);
	}

	/// Redirects the spring toward `to` with new parameters.
	///
	/// Used when the travel direction changes feel, e.g. a bouncy open
	/// followed by a critically damped close.
	pub fn retarget_with(&mut self, to: f32, params: SpringParams) {
		let current = self.value();
		*self = Self::new(current, to, params);
	}
}
