//! Per-toast options, container defaults, and their merge rules.
//!
//! Option resolution is a three-layer merge: engine defaults, then the
//! container's shared defaults, then the call's own options. Scalars are a
//! shallow first-set-wins merge; the `styles` sub-object merges key by key.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::record::{ToastButton, ToastId};
use crate::state::ToastState;

/// Display duration applied when a toast does not set one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(6000);

/// How long an exiting toast stays in the registry before removal
/// (0.1× the default display duration).
pub const EXIT_DURATION: Duration = Duration::from_millis(600);

/// Default pill corner radius.
pub const DEFAULT_ROUNDNESS: f32 = 18.0;

/// Lead time before dismissal at which a toast auto-collapses.
const COLLAPSE_LEAD: Duration = Duration::from_millis(2000);

/// Divisor of the display duration giving the auto-expand delay.
const EXPAND_DIVISOR: u32 = 30;

/// Whether and when a toast dismisses on its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoDismiss {
	/// Stays until updated or dismissed. The loading state uses this.
	Never,
	/// Dismisses after the given display duration.
	After(Duration),
}

impl Default for AutoDismiss {
	fn default() -> Self {
		AutoDismiss::After(DEFAULT_DURATION)
	}
}

impl AutoDismiss {
	/// Folds a zero duration into [`AutoDismiss::Never`].
	pub fn normalized(self) -> Self {
		match self {
			AutoDismiss::After(d) if d.is_zero() => AutoDismiss::Never,
			other => other,
		}
	}

	/// The display duration, if one applies.
	pub fn duration(self) -> Option<Duration> {
		match self {
			AutoDismiss::Never => None,
			AutoDismiss::After(d) => Some(d),
		}
	}
}

/// Autopilot behavior: whether a toast expands and re-collapses on its own.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Autopilot {
	/// Derive both delays from the display duration.
	#[default]
	Auto,
	/// No automatic expand or collapse; only hover and swipe apply.
	Off,
	/// Override either delay, deriving the other from the duration.
	Delays {
		expand: Option<Duration>,
		collapse: Option<Duration>,
	},
}

impl Autopilot {
	/// Resolves concrete delays for a toast with the given dismiss setting.
	///
	/// Persistent toasts and disabled autopilot yield no delays. Both
	/// delays clamp into `[0, duration]`; the defaults are `duration / 30`
	/// for expand and `duration − 2000 ms` for collapse.
	pub fn resolve(self, dismiss: AutoDismiss) -> AutopilotDelays {
		let Some(total) = dismiss.duration().filter(|d| !d.is_zero()) else {
			return AutopilotDelays::default();
		};
		let (expand, collapse) = match self {
			Autopilot::Off => return AutopilotDelays::default(),
			Autopilot::Auto => (None, None),
			Autopilot::Delays { expand, collapse } => (expand, collapse),
		};
		let collapse = collapse.unwrap_or_else(|| total.saturating_sub(COLLAPSE_LEAD));
		AutopilotDelays {
			expand: Some(expand.unwrap_or(total / EXPAND_DIVISOR).min(total)),
			collapse: Some(collapse.min(total)),
		}
	}
}

/// Resolved autopilot delays. `None` means that trigger never fires.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AutopilotDelays {
	pub expand: Option<Duration>,
	pub collapse: Option<Duration>,
}

/// Style class overrides for the toast's rendered parts.
///
/// Carried as opaque strings for the embedding surface; the engine only
/// merges them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
	pub title: Option<String>,
	pub description: Option<String>,
	pub badge: Option<String>,
	pub button: Option<String>,
}

impl StyleOverrides {
	/// Key-by-key merge, with `self` winning over `base`.
	pub fn over(self, base: &StyleOverrides) -> StyleOverrides {
		StyleOverrides {
			title: self.title.or_else(|| base.title.clone()),
			description: self.description.or_else(|| base.description.clone()),
			badge: self.badge.or_else(|| base.badge.clone()),
			button: self.button.or_else(|| base.button.clone()),
		}
	}
}

/// Options for one toast call.
///
/// Every field is optional; unset fields fall back to the container's
/// defaults and then to engine defaults during [`merge`](Self::merged_over)
/// and resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastOptions {
	/// Caller-chosen id. Reusing a live id updates that toast in place;
	/// omitted ids resolve to `"default"`.
	pub id: Option<ToastId>,
	pub state: Option<ToastState>,
	pub title: Option<String>,
	pub description: Option<String>,
	/// Named icon override; the state's default icon applies otherwise.
	pub icon: Option<String>,
	/// Single action button. Not serializable (carries a handler).
	#[serde(skip)]
	pub button: Option<ToastButton>,
	/// Fill color, as an opaque color string.
	pub fill: Option<String>,
	pub roundness: Option<f32>,
	pub duration: Option<AutoDismiss>,
	pub position: Option<Position>,
	pub autopilot: Option<Autopilot>,
	pub styles: StyleOverrides,
}

impl ToastOptions {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn id(mut self, id: impl Into<ToastId>) -> Self {
		self.id = Some(id.into());
		self
	}

	#[must_use]
	pub fn state(mut self, state: ToastState) -> Self {
		self.state = Some(state);
		self
	}

	#[must_use]
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	#[must_use]
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	#[must_use]
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	#[must_use]
	pub fn button(mut self, button: ToastButton) -> Self {
		self.button = Some(button);
		self
	}

	#[must_use]
	pub fn fill(mut self, fill: impl Into<String>) -> Self {
		self.fill = Some(fill.into());
		self
	}

	#[must_use]
	pub fn roundness(mut self, roundness: f32) -> Self {
		self.roundness = Some(roundness);
		self
	}

	/// Display duration before auto-dismissal.
	#[must_use]
	pub fn duration(mut self, duration: Duration) -> Self {
		self.duration = Some(AutoDismiss::After(duration));
		self
	}

	/// Keeps the toast until it is updated or dismissed.
	#[must_use]
	pub fn persist(mut self) -> Self {
		self.duration = Some(AutoDismiss::Never);
		self
	}

	#[must_use]
	pub fn position(mut self, position: Position) -> Self {
		self.position = Some(position);
		self
	}

	#[must_use]
	pub fn autopilot(mut self, autopilot: Autopilot) -> Self {
		self.autopilot = Some(autopilot);
		self
	}

	#[must_use]
	pub fn styles(mut self, styles: StyleOverrides) -> Self {
		self.styles = styles;
		self
	}

	/// Merges these options over `base`, with `self` winning field by
	/// field. The `id` never falls back: it identifies the call, not the
	/// container.
	pub fn merged_over(self, base: &ToastOptions) -> ToastOptions {
		ToastOptions {
			id: self.id,
			state: self.state.or(base.state),
			title: self.title.or_else(|| base.title.clone()),
			description: self.description.or_else(|| base.description.clone()),
			icon: self.icon.or_else(|| base.icon.clone()),
			button: self.button.or_else(|| base.button.clone()),
			fill: self.fill.or_else(|| base.fill.clone()),
			roundness: self.roundness.or(base.roundness),
			duration: self.duration.or(base.duration),
			position: self.position.or(base.position),
			autopilot: self.autopilot.or(base.autopilot),
			styles: self.styles.over(&base.styles),
		}
	}
}
