//! Presentation state for melba toasts.
//!
//! [`melba_engine`](melba_engine) decides what is on screen; this crate
//! decides how it moves. A [`Stage`] reconciles engine snapshots into one
//! [`PillMotion`] per toast, each owning its expand state, content swaps,
//! springs, and swipe gesture. Every tick emits plain numbers
//! ([`PillFrame`], [`StageFrame`]) for the embedding to draw.
//!
//! Nothing here samples a clock or touches a window: time arrives as
//! explicit deltas and element sizes arrive through the measurement
//! setters, so a frame loop drives it and tests replay it.
//!
//! ```
//! use std::time::Duration;
//!
//! use melba_engine::{ToastOptions, Toasts};
//! use melba_surface::Stage;
//!
//! let toasts = Toasts::new();
//! let mut stage = Stage::new();
//!
//! toasts.success(ToastOptions::new().title("synced").description("36 files"));
//! stage.sync(&toasts.snapshot());
//!
//! let frames = stage.tick(Duration::from_millis(16));
//! assert_eq!(frames.len(), 1);
//! ```

pub mod geometry;
pub mod header;
pub mod pill;
pub mod stage;
pub mod swipe;

pub use geometry::{
	GrowDirection, HorizontalAlign, MIN_EXPANDED_HEIGHT, PILL_HEIGHT, PILL_PADDING, TOAST_WIDTH,
};
pub use header::{Caption, HEADER_FADE, HeaderFade};
pub use pill::{MOTION_DURATION, PillContent, PillFrame, PillMotion, SWAP_COLLAPSE};
pub use stage::{STACK_GAP, Stage, StageFrame};
pub use swipe::{
	PressTarget, SWIPE_DISMISS_DISTANCE, SWIPE_MAX_TRAVEL, SwipeOutcome, SwipeTracker,
};
