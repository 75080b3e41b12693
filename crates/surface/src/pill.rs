//! Per-toast presentation state machine.
//!
//! A [`PillMotion`] turns the engine's toast records into animated frames.
//! It owns the open/closed state of the detail body, defers content swaps
//! while the body is open, drives every spring and tween, and tracks the
//! swipe gesture. Each [`tick`](PillMotion::tick) advances all of it by an
//! explicit delta and emits one [`PillFrame`] of plain numbers; nothing in
//! here knows how to draw.

use std::time::Duration;

use melba_engine::{
	AutopilotDelays, InstanceId, Position, StyleOverrides, ToastRecord, ToastState,
};
use melba_motion::{Easing, Spring, SpringParams, Tween};
use tracing::trace;

use crate::geometry::{self, GrowDirection, HorizontalAlign, MIN_EXPANDED_HEIGHT, PILL_HEIGHT};
use crate::header::{Caption, HeaderFade};
use crate::swipe::{PressTarget, SwipeOutcome, SwipeTracker};

/// Base duration of the entrance, exit, and header motion.
pub const MOTION_DURATION: Duration = Duration::from_millis(600);

/// Collapse-first window before a deferred content swap applies.
pub const SWAP_COLLAPSE: Duration = Duration::from_millis(200);

/// Target settle time of the layout springs.
const SPRING_RESPONSE: Duration = Duration::from_millis(600);

/// Bounce of springs moving toward an open or resized pill.
const OPEN_BOUNCE: f32 = 0.25;

/// How far the header drifts toward the body while open.
const OPEN_HEADER_LIFT: f32 = 3.0;

/// Header scale while the body is fully open.
const OPEN_HEADER_SCALE: f32 = 0.9;

/// The content a pill currently presents, with display fallbacks applied.
///
/// This may lag the newest record for up to [`SWAP_COLLAPSE`] while a swap
/// waits for the body to close.
#[derive(Clone, Debug, PartialEq)]
pub struct PillContent {
	pub instance: InstanceId,
	pub state: ToastState,
	pub title: String,
	pub description: Option<String>,
	pub button_label: Option<String>,
	pub icon: String,
	pub fill: String,
	pub roundness: f32,
	pub styles: StyleOverrides,
	pub autopilot: AutopilotDelays,
}

impl PillContent {
	pub fn of(record: &ToastRecord) -> Self {
		let title = if record.title.is_empty() {
			record.state.name().to_owned()
		} else {
			record.title.clone()
		};
		PillContent {
			instance: record.instance,
			state: record.state,
			title,
			description: record.description.clone(),
			button_label: record.button.as_ref().map(|b| b.label().to_owned()),
			icon: record.icon_name().to_owned(),
			fill: record.fill.clone().unwrap_or_else(|| "#FFFFFF".to_owned()),
			roundness: record.roundness.max(0.0),
			styles: record.styles.clone(),
			autopilot: record.autopilot,
		}
	}

	/// Whether there is anything to open: a description or a button.
	pub fn has_body(&self) -> bool {
		self.description.is_some() || self.button_label.is_some()
	}

	fn caption(&self) -> Caption {
		Caption { state: self.state, title: self.title.clone(), icon: self.icon.clone() }
	}
}

/// One rendered frame of a pill, in toast-box coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PillFrame {
	pub pill_x: f32,
	pub pill_width: f32,
	pub pill_height: f32,
	/// Animated clip height of the body below the pill.
	pub body_height: f32,
	pub body_opacity: f32,
	/// Height the body content lays out at. Held steady while the clip
	/// closes so text does not reflow mid-animation.
	pub body_layout_height: f32,
	/// Outer box height: pill plus the body clip.
	pub box_height: f32,
	pub header_offset_y: f32,
	pub header_scale: f32,
	/// Blur radius of the gooey merge filter.
	pub blur: f32,
	/// Entrance progress, 0 at spawn up to 1 at rest.
	pub entrance: f32,
	/// Exit progress, 1 while live down to 0 as the toast leaves.
	pub exit: f32,
	pub swipe_offset: f32,
	pub open: bool,
}

impl PillFrame {
	/// Height this toast occupies in its stack. Scales through entrance
	/// and exit so neighbors close the gap smoothly.
	pub fn slot_height(&self) -> f32 {
		self.box_height * (self.entrance * self.exit).clamp(0.0, 1.0)
	}
}

/// Animation and interaction state for one toast.
#[derive(Debug)]
pub struct PillMotion {
	content: PillContent,
	pending: Option<PillContent>,
	header: HeaderFade,
	position: Position,
	align: HorizontalAlign,
	grow: GrowDirection,

	hovered: bool,
	auto_open: bool,
	can_expand: bool,
	exiting: bool,

	expand_in: Option<Duration>,
	collapse_in: Option<Duration>,
	swap_in: Option<Duration>,

	entrance: Tween<f32>,
	exit: Tween<f32>,

	pill_x: Spring,
	pill_width: Spring,
	pill_height: Spring,
	body_height: Spring,
	body_opacity: Spring,
	rebound: Option<Spring>,
	swipe: Option<SwipeTracker>,

	measured_header: f32,
	measured_body: f32,
	frozen_expanded: f32,
}

impl PillMotion {
	pub fn new(record: &ToastRecord) -> Self {
		let content = PillContent::of(record);
		let align = geometry::horizontal_align(record.position);
		let width = geometry::pill_width(0.0);
		let params = SpringParams::with_bounce(SPRING_RESPONSE, OPEN_BOUNCE);
		let mut pill = PillMotion {
			header: HeaderFade::new(content.caption()),
			pending: None,
			position: record.position,
			align,
			grow: geometry::grow_direction(record.position),
			hovered: false,
			auto_open: false,
			can_expand: true,
			exiting: false,
			expand_in: None,
			collapse_in: None,
			swap_in: None,
			entrance: Tween::new(0.0, 1.0, MOTION_DURATION).with_easing(Easing::EaseOutCubic),
			exit: Tween::new(1.0, 1.0, MOTION_DURATION).with_easing(Easing::EaseOutCubic),
			pill_x: Spring::rest_at(geometry::pill_x(align, width), params),
			pill_width: Spring::rest_at(width, params),
			pill_height: Spring::rest_at(PILL_HEIGHT, params),
			body_height: Spring::rest_at(0.0, params),
			body_opacity: Spring::rest_at(0.0, params),
			rebound: None,
			swipe: None,
			measured_header: 0.0,
			measured_body: 0.0,
			frozen_expanded: MIN_EXPANDED_HEIGHT,
			content,
		};
		pill.arm_autopilot();
		if record.exiting {
			pill.begin_exit();
		}
		pill
	}

	/// Folds a record revision in.
	///
	/// A revision with a body while the pill is open does not apply at
	/// once: the pill collapses first and swaps once closed, or after
	/// [`SWAP_COLLAPSE`] at the latest.
	pub fn refresh(&mut self, record: &ToastRecord) {
		if record.exiting != self.exiting {
			if record.exiting {
				self.begin_exit();
			} else {
				self.revive();
			}
		}
		if record.position != self.position {
			self.position = record.position;
			self.align = geometry::horizontal_align(record.position);
			self.grow = geometry::grow_direction(record.position);
		}
		if record.instance == self.content.instance {
			return;
		}
		let incoming = PillContent::of(record);
		self.swap_in = None;
		if self.is_open() && incoming.has_body() {
			trace!(instance = %incoming.instance, "deferring content swap until the pill closes");
			self.auto_open = false;
			self.hovered = false;
			self.pending = Some(incoming);
			self.swap_in = Some(SWAP_COLLAPSE);
		} else {
			self.apply_content(incoming);
		}
	}

	fn apply_content(&mut self, content: PillContent) {
		self.header.set(content.caption());
		self.content = content;
		self.pending = None;
		self.swap_in = None;
		self.arm_autopilot();
	}

	/// Re-arms the autopilot countdowns for the current content.
	///
	/// A zero expand delay opens at once; a zero collapse delay means the
	/// panel never auto-collapses. Absent delays leave the open state to
	/// hover alone.
	fn arm_autopilot(&mut self) {
		self.expand_in = None;
		self.collapse_in = None;
		if self.exiting
			|| !self.can_expand
			|| !self.content.has_body()
			|| self.content.state.is_loading()
		{
			self.auto_open = false;
			return;
		}
		let AutopilotDelays { expand, collapse } = self.content.autopilot;
		match expand {
			Some(delay) if delay.is_zero() => self.auto_open = true,
			Some(delay) => self.expand_in = Some(delay),
			None => {}
		}
		if let Some(delay) = collapse {
			if !delay.is_zero() {
				self.collapse_in = Some(delay);
			}
		}
	}

	fn begin_exit(&mut self) {
		self.exiting = true;
		self.auto_open = false;
		self.expand_in = None;
		self.collapse_in = None;
		self.pending = None;
		self.swap_in = None;
		self.swipe = None;
		self.exit.retarget(0.0);
	}

	fn revive(&mut self) {
		self.exiting = false;
		self.exit.retarget(1.0);
	}

	/// Whether the detail body is open this frame.
	pub fn is_open(&self) -> bool {
		if self.exiting || self.content.state.is_loading() || !self.content.has_body() {
			return false;
		}
		self.auto_open || self.hovered
	}

	/// The pointer is over the toast. An open body stays open for as long
	/// as the hover lasts, through any auto-collapse.
	pub fn hover_enter(&mut self) {
		self.hovered = true;
	}

	/// The pointer left. The body stays open only while an auto-expand
	/// window is still active.
	pub fn hover_leave(&mut self) {
		self.hovered = false;
	}

	/// Grants or revokes this toast's auto-expand slot. Revoking cancels
	/// any autopilot expansion; granting re-arms the delays from scratch.
	pub fn set_can_expand(&mut self, can_expand: bool) {
		if self.can_expand == can_expand {
			return;
		}
		self.can_expand = can_expand;
		if can_expand {
			self.arm_autopilot();
		} else {
			self.auto_open = false;
			self.expand_in = None;
			self.collapse_in = None;
		}
	}

	/// Starts swipe tracking. Presses on the action button and presses on
	/// an exiting toast are ignored.
	pub fn press(&mut self, y: f32, target: PressTarget) -> bool {
		if self.exiting || target == PressTarget::ActionButton || !y.is_finite() {
			return false;
		}
		self.rebound = None;
		self.swipe = Some(SwipeTracker::begin(y));
		true
	}

	pub fn drag(&mut self, y: f32) {
		if let Some(swipe) = &mut self.swipe {
			swipe.drag(y);
		}
	}

	/// Ends the drag. On [`SwipeOutcome::Dismiss`] the caller routes the
	/// dismissal through the engine; on settle the offset springs back.
	pub fn release(&mut self) -> Option<SwipeOutcome> {
		let swipe = self.swipe.take()?;
		let outcome = swipe.release();
		match outcome {
			SwipeOutcome::Dismiss => {
				trace!(
					instance = %self.content.instance,
					delta = swipe.raw_delta(),
					"swipe crossed the dismiss distance"
				);
			}
			SwipeOutcome::Settle if swipe.offset() != 0.0 => {
				let params = SpringParams::with_bounce(SPRING_RESPONSE, OPEN_BOUNCE);
				self.rebound = Some(Spring::new(swipe.offset(), 0.0, params));
			}
			SwipeOutcome::Settle => {}
		}
		Some(outcome)
	}

	/// Reports the rendered header's measured width. Degenerate
	/// measurements keep the previous value.
	pub fn set_measured_header(&mut self, width: f32) {
		if width.is_finite() && width > 0.0 {
			self.measured_header = width;
		}
	}

	/// Reports the rendered body block's measured height.
	pub fn set_measured_body(&mut self, height: f32) {
		if height.is_finite() && height >= 0.0 {
			self.measured_body = height;
		}
	}

	/// Advances every animation by `dt` and lays out one frame.
	pub fn tick(&mut self, dt: Duration) -> PillFrame {
		self.entrance.advance(dt);
		self.exit.advance(dt);
		self.header.tick(dt);
		self.run_countdowns(dt);

		let open = self.is_open();
		if open {
			self.frozen_expanded = self.raw_expanded();
		}
		let expanded = if open { self.raw_expanded() } else { self.frozen_expanded };
		let blur = geometry::gooey_blur(self.content.roundness);
		let width = geometry::pill_width(self.measured_header);

		let pill_params = SpringParams::with_bounce(SPRING_RESPONSE, OPEN_BOUNCE);
		let body_bounce = if open { OPEN_BOUNCE } else { 0.0 };
		let body_params = SpringParams::with_bounce(SPRING_RESPONSE, body_bounce);
		let pill_height = if open { PILL_HEIGHT + blur * 3.0 } else { PILL_HEIGHT };
		drive(&mut self.pill_x, geometry::pill_x(self.align, width), pill_params);
		drive(&mut self.pill_width, width, pill_params);
		drive(&mut self.pill_height, pill_height, pill_params);
		drive(&mut self.body_height, if open { expanded - PILL_HEIGHT } else { 0.0 }, body_params);
		drive(&mut self.body_opacity, if open { 1.0 } else { 0.0 }, body_params);

		self.pill_x.tick(dt);
		self.pill_width.tick(dt);
		self.pill_height.tick(dt);
		self.body_height.tick(dt);
		self.body_opacity.tick(dt);
		if let Some(rebound) = &mut self.rebound {
			rebound.tick(dt);
			if rebound.is_settled() {
				self.rebound = None;
			}
		}

		// Early apply: a pending swap does not have to wait out its window
		// once the body has finished closing.
		if self.pending.is_some() && !self.is_open() && self.body_height.is_settled() {
			self.apply_pending();
		}

		let t = self.body_opacity.value().clamp(0.0, 1.0);
		let lift = match self.grow {
			GrowDirection::Down => OPEN_HEADER_LIFT,
			GrowDirection::Up => -OPEN_HEADER_LIFT,
		};
		let body_height = self.body_height.value().max(0.0);
		PillFrame {
			pill_x: self.pill_x.value(),
			pill_width: self.pill_width.value(),
			pill_height: self.pill_height.value(),
			body_height,
			body_opacity: t,
			body_layout_height: (expanded - PILL_HEIGHT).max(0.0),
			box_height: PILL_HEIGHT + body_height,
			header_offset_y: lift * t,
			header_scale: 1.0 - (1.0 - OPEN_HEADER_SCALE) * t,
			blur,
			entrance: self.entrance.value(),
			exit: self.exit.value(),
			swipe_offset: self.swipe_offset(),
			open,
		}
	}

	fn run_countdowns(&mut self, dt: Duration) {
		if let Some(remaining) = self.expand_in {
			match remaining.checked_sub(dt) {
				Some(left) if !left.is_zero() => self.expand_in = Some(left),
				_ => {
					self.expand_in = None;
					self.auto_open = true;
				}
			}
		}
		if let Some(remaining) = self.collapse_in {
			match remaining.checked_sub(dt) {
				Some(left) if !left.is_zero() => self.collapse_in = Some(left),
				_ => {
					self.collapse_in = None;
					self.auto_open = false;
				}
			}
		}
		if let Some(remaining) = self.swap_in {
			match remaining.checked_sub(dt) {
				Some(left) if !left.is_zero() => self.swap_in = Some(left),
				_ => {
					self.swap_in = None;
					self.apply_pending();
				}
			}
		}
	}

	fn apply_pending(&mut self) {
		if let Some(content) = self.pending.take() {
			trace!(instance = %content.instance, "applying deferred content");
			self.apply_content(content);
		}
	}

	fn raw_expanded(&self) -> f32 {
		if self.content.has_body() {
			geometry::expanded_height(self.measured_body)
		} else {
			MIN_EXPANDED_HEIGHT
		}
	}

	/// Current vertical swipe displacement, live or springing back.
	pub fn swipe_offset(&self) -> f32 {
		if let Some(swipe) = &self.swipe {
			swipe.offset()
		} else if let Some(rebound) = &self.rebound {
			rebound.value()
		} else {
			0.0
		}
	}

	pub fn content(&self) -> &PillContent {
		&self.content
	}

	/// The revision waiting behind a deferred swap, if any.
	pub fn pending_content(&self) -> Option<&PillContent> {
		self.pending.as_ref()
	}

	pub fn header(&self) -> &HeaderFade {
		&self.header
	}

	pub fn position(&self) -> Position {
		self.position
	}

	pub fn is_exiting(&self) -> bool {
		self.exiting
	}

	pub fn is_swiping(&self) -> bool {
		self.swipe.is_some()
	}

	pub fn can_expand(&self) -> bool {
		self.can_expand
	}
}

/// Retargets a spring only when the target actually moved.
fn drive(spring: &mut Spring, target: f32, params: SpringParams) {
	if (spring.target() - target).abs() > f32::EPSILON {
		spring.retarget_with(target, params);
	}
}
