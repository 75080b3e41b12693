//! The toast record and its identity types.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::options::{AutoDismiss, AutopilotDelays, StyleOverrides};
use crate::position::Position;
use crate::state::ToastState;

/// Caller-chosen toast id.
///
/// Calls that omit an id share the `"default"` id, so bare calls replace
/// each other instead of stacking.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
	pub const DEFAULT: &'static str = "default";

	pub fn new(id: impl Into<String>) -> Self {
		ToastId(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for ToastId {
	fn default() -> Self {
		ToastId(Self::DEFAULT.to_owned())
	}
}

impl fmt::Display for ToastId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ToastId {
	fn from(id: &str) -> Self {
		ToastId(id.to_owned())
	}
}

impl From<String> for ToastId {
	fn from(id: String) -> Self {
		ToastId(id)
	}
}

/// Identity of one content revision of a toast.
///
/// Every create and every update mints a fresh instance, so stale timers
/// and stale animation passes can recognize the record changed under them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InstanceId(u64);

impl InstanceId {
	/// Mints the next process-unique instance id.
	pub fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		InstanceId(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for InstanceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Action button carried by a toast.
#[derive(Clone)]
pub struct ToastButton {
	label: String,
	handler: Arc<dyn Fn() + Send + Sync>,
}

impl ToastButton {
	pub fn new(label: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) -> Self {
		ToastButton { label: label.into(), handler: Arc::new(handler) }
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	/// Runs the button's handler.
	pub fn press(&self) {
		(self.handler)();
	}
}

impl fmt::Debug for ToastButton {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ToastButton").field("label", &self.label).finish_non_exhaustive()
	}
}

// Handlers have no useful equality; the label is the button's identity.
impl PartialEq for ToastButton {
	fn eq(&self, other: &Self) -> bool {
		self.label == other.label
	}
}

/// One fully resolved toast held by the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastRecord {
	pub id: ToastId,
	pub instance: InstanceId,
	pub state: ToastState,
	pub title: String,
	pub description: Option<String>,
	/// Icon name override; [`icon_name`](Self::icon_name) falls back to
	/// the state's default.
	pub icon: Option<String>,
	pub button: Option<ToastButton>,
	pub fill: Option<String>,
	pub roundness: f32,
	pub dismiss: AutoDismiss,
	pub position: Position,
	/// Resolved auto-expand and auto-collapse delays.
	pub autopilot: AutopilotDelays,
	pub styles: StyleOverrides,
	/// One-way exit flag. Exiting records keep rendering their exit
	/// animation but no longer count as live.
	pub exiting: bool,
}

impl ToastRecord {
	/// Whether the toast has anything to show beyond its pill.
	pub fn has_body(&self) -> bool {
		self.description.is_some() || self.button.is_some()
	}

	/// The icon to render, falling back to the state's default.
	pub fn icon_name(&self) -> &str {
		self.icon.as_deref().unwrap_or_else(|| self.state.default_icon())
	}

	/// Whether the toast still participates in id reuse and stacking.
	pub fn is_live(&self) -> bool {
		!self.exiting
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::AtomicUsize;

	use pretty_assertions::assert_eq;

	use super::*;

	fn record(state: ToastState) -> ToastRecord {
		ToastRecord {
			id: ToastId::default(),
			instance: InstanceId::next(),
			state,
			title: "saved".into(),
			description: None,
			icon: None,
			button: None,
			fill: None,
			roundness: 18.0,
			dismiss: AutoDismiss::default(),
			position: Position::default(),
			autopilot: AutopilotDelays::default(),
			styles: StyleOverrides::default(),
			exiting: false,
		}
	}

	#[test]
	fn omitted_id_is_the_default_id() {
		assert_eq!(ToastId::default().as_str(), "default");
	}

	#[test]
	fn instances_are_unique() {
		let a = InstanceId::next();
		let b = InstanceId::next();
		assert_ne!(a, b);
	}

	#[test]
	fn icon_falls_back_to_state_default() {
		let mut toast = record(ToastState::Success);
		assert_eq!(toast.icon_name(), "circle-check");
		toast.icon = Some("custom-check".into());
		assert_eq!(toast.icon_name(), "custom-check");
	}

	#[test]
	fn body_requires_description_or_button() {
		let mut toast = record(ToastState::Info);
		assert!(!toast.has_body());
		toast.description = Some("details".into());
		assert!(toast.has_body());

		let mut toast = record(ToastState::Action);
		toast.button = Some(ToastButton::new("undo", || {}));
		assert!(toast.has_body());
	}

	#[test]
	fn button_press_runs_the_handler() {
		static PRESSES: AtomicUsize = AtomicUsize::new(0);
		let button = ToastButton::new("retry", || {
			PRESSES.fetch_add(1, Ordering::Relaxed);
		});
		button.press();
		button.press();
		assert_eq!(PRESSES.load(Ordering::Relaxed), 2);
	}

	#[test]
	fn buttons_compare_by_label() {
		let a = ToastButton::new("undo", || {});
		let b = ToastButton::new("undo", || println!("other handler"));
		assert_eq!(a, b);
	}
}
