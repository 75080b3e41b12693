//! Toast state kinds.

use serde::{Deserialize, Serialize};

/// The semantic state of a toast, driving its badge, default icon, and
/// loading behavior.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastState {
	/// Operation succeeded.
	Success,
	/// Operation failed.
	Error,
	/// Something needs attention but did not fail.
	Warning,
	/// Neutral information.
	#[default]
	Info,
	/// Terminal state carrying a call-to-action button.
	Action,
	/// Work in flight. Loading toasts suppress the detail panel and, via
	/// [`promise`](crate::Toasts::promise), carry no dismiss deadline.
	Loading,
}

impl ToastState {
	/// Stable lowercase name, used in logs and header identity keys.
	pub fn name(self) -> &'static str {
		match self {
			ToastState::Success => "success",
			ToastState::Error => "error",
			ToastState::Warning => "warning",
			ToastState::Info => "info",
			ToastState::Action => "action",
			ToastState::Loading => "loading",
		}
	}

	/// Default icon name for the state. A per-toast `icon` override wins.
	pub fn default_icon(self) -> &'static str {
		match self {
			ToastState::Success => "circle-check",
			ToastState::Error => "circle-x",
			ToastState::Warning => "triangle-alert",
			ToastState::Info => "info",
			ToastState::Action => "arrow-right",
			ToastState::Loading => "spinner",
		}
	}

	/// True for the loading state.
	pub fn is_loading(self) -> bool {
		matches!(self, ToastState::Loading)
	}
}
