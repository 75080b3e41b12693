//! Header cross-fade between content revisions.

use std::time::Duration;

use melba_engine::ToastState;
use melba_motion::{Easing, Tween};

/// How long the outgoing header stays visible under the incoming one.
pub const HEADER_FADE: Duration = Duration::from_millis(420);

/// What the pill header shows: badge state, title, and icon.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Caption {
	pub state: ToastState,
	pub title: String,
	pub icon: String,
}

impl Caption {
	/// Fade identity. An icon swap alone applies silently; only a state
	/// or title change reads as new content.
	fn same_key(&self, other: &Caption) -> bool {
		self.state == other.state && self.title == other.title
	}
}

/// Cross-fades the header whenever its caption changes identity.
///
/// A change mid-fade restarts the fade against the latest caption, so
/// rapid updates never stack more than two layers.
#[derive(Clone, Debug)]
pub struct HeaderFade {
	current: Caption,
	outgoing: Option<Caption>,
	fade: Tween<f32>,
}

impl HeaderFade {
	pub fn new(caption: Caption) -> Self {
		HeaderFade { current: caption, outgoing: None, fade: Tween::settled(1.0) }
	}

	/// Applies a new caption, starting a cross-fade if it reads differently.
	pub fn set(&mut self, caption: Caption) {
		if caption.same_key(&self.current) {
			self.current = caption;
			return;
		}
		self.outgoing = Some(std::mem::replace(&mut self.current, caption));
		self.fade = Tween::new(0.0, 1.0, HEADER_FADE).with_easing(Easing::EaseOutCubic);
	}

	pub fn tick(&mut self, dt: Duration) {
		if self.outgoing.is_none() {
			return;
		}
		self.fade.advance(dt);
		if self.fade.is_complete() {
			self.outgoing = None;
		}
	}

	pub fn current(&self) -> &Caption {
		&self.current
	}

	/// The caption still fading out, while one is.
	pub fn outgoing(&self) -> Option<&Caption> {
		self.outgoing.as_ref()
	}

	/// Opacity of the incoming caption. The outgoing layer renders at the
	/// complement.
	pub fn progress(&self) -> f32 {
		if self.outgoing.is_some() { self.fade.value() } else { 1.0 }
	}

	pub fn is_fading(&self) -> bool {
		self.outgoing.is_some()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn caption(state: ToastState, title: &str) -> Caption {
		Caption { state, title: title.to_owned(), icon: state.default_icon().to_owned() }
	}

	#[test]
	fn fresh_header_is_not_fading() {
		let header = HeaderFade::new(caption(ToastState::Info, "hello"));
		assert!(!header.is_fading());
		assert_eq!(header.progress(), 1.0);
		assert_eq!(header.outgoing(), None);
	}

	#[test]
	fn title_change_cross_fades() {
		let mut header = HeaderFade::new(caption(ToastState::Loading, "uploading"));
		header.set(caption(ToastState::Success, "uploaded"));

		assert!(header.is_fading());
		assert_eq!(header.current().title, "uploaded");
		assert_eq!(header.outgoing().unwrap().title, "uploading");
		assert_eq!(header.progress(), 0.0);

		header.tick(HEADER_FADE);
		assert!(!header.is_fading());
		assert_eq!(header.progress(), 1.0);
		assert_eq!(header.outgoing(), None);
	}

	#[test]
	fn icon_only_change_applies_silently() {
		let mut header = HeaderFade::new(caption(ToastState::Info, "ready"));
		let mut swapped = caption(ToastState::Info, "ready");
		swapped.icon = "bell".to_owned();
		header.set(swapped);

		assert!(!header.is_fading());
		assert_eq!(header.current().icon, "bell");
	}

	#[test]
	fn change_mid_fade_restarts_against_the_latest() {
		let mut header = HeaderFade::new(caption(ToastState::Loading, "step 1"));
		header.set(caption(ToastState::Loading, "step 2"));
		header.tick(HEADER_FADE / 2);
		header.set(caption(ToastState::Success, "done"));

		// Only two layers ever render: the latest and the one it replaced.
		assert_eq!(header.current().title, "done");
		assert_eq!(header.outgoing().unwrap().title, "step 2");
		assert_eq!(header.progress(), 0.0);
	}
}
