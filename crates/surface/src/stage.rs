//! Stacks of pills driven from engine snapshots.

use std::time::Duration;

use indexmap::IndexMap;
use melba_engine::{Position, ToastId, ToastRecord};

use crate::geometry::{self, GrowDirection};
use crate::pill::{PillFrame, PillMotion};
use crate::swipe::{PressTarget, SwipeOutcome};

/// Vertical gap between stacked toasts.
pub const STACK_GAP: f32 = 10.0;

/// One laid-out toast for the current frame.
#[derive(Clone, Debug)]
pub struct StageFrame {
	pub id: ToastId,
	pub position: Position,
	/// Offset of the toast box from its stack anchor. Top stacks grow
	/// positive, bottom stacks negative.
	pub slot_y: f32,
	pub pill: PillFrame,
}

/// Drives every pill on screen from engine snapshots.
///
/// The stage never talks to the engine itself. The embedding feeds it
/// snapshots (usually from a subscriber), routes pointer events to both
/// sides, and draws the frames [`tick`](Stage::tick) returns.
#[derive(Debug, Default)]
pub struct Stage {
	pills: IndexMap<ToastId, PillMotion>,
	hovered: Option<ToastId>,
}

impl Stage {
	pub fn new() -> Self {
		Stage::default()
	}

	/// Reconciles the stage against the latest records. New records grow
	/// pills, vanished records drop theirs, the rest fold the revision in.
	/// Order follows the records.
	pub fn sync(&mut self, records: &[ToastRecord]) {
		let mut next = IndexMap::with_capacity(records.len());
		for record in records {
			let pill = match self.pills.shift_remove(&record.id) {
				Some(mut pill) => {
					pill.refresh(record);
					pill
				}
				None => PillMotion::new(record),
			};
			next.insert(record.id.clone(), pill);
		}
		self.pills = next;
		if let Some(hovered) = &self.hovered {
			if !self.pills.contains_key(hovered) {
				self.hovered = None;
			}
		}
		self.assign_expand_slot();
	}

	// Only one toast may auto-expand: the hovered one, else the newest
	// toast that is not on its way out.
	fn assign_expand_slot(&mut self) {
		let candidate = self.hovered.clone().or_else(|| {
			self.pills
				.iter()
				.rev()
				.find(|(_, pill)| !pill.is_exiting())
				.map(|(id, _)| id.clone())
		});
		for (id, pill) in &mut self.pills {
			pill.set_can_expand(candidate.as_ref().is_none_or(|c| c == id));
		}
	}

	/// Pointer entered a toast. The embedding should also pause the
	/// engine's dismissal clock for the toast's position.
	pub fn pointer_enter(&mut self, id: &ToastId) {
		if let Some(pill) = self.pills.get_mut(id) {
			pill.hover_enter();
			self.hovered = Some(id.clone());
			self.assign_expand_slot();
		}
	}

	pub fn pointer_leave(&mut self, id: &ToastId) {
		if let Some(pill) = self.pills.get_mut(id) {
			pill.hover_leave();
		}
		if self.hovered.as_ref() == Some(id) {
			self.hovered = None;
		}
		self.assign_expand_slot();
	}

	/// Starts swipe tracking on a toast.
	pub fn press(&mut self, id: &ToastId, y: f32, target: PressTarget) -> bool {
		self.pills.get_mut(id).is_some_and(|pill| pill.press(y, target))
	}

	pub fn drag(&mut self, id: &ToastId, y: f32) {
		if let Some(pill) = self.pills.get_mut(id) {
			pill.drag(y);
		}
	}

	/// Ends a drag. On [`SwipeOutcome::Dismiss`] the embedding dismisses
	/// the toast through the engine; the stage only animates.
	pub fn release(&mut self, id: &ToastId) -> Option<SwipeOutcome> {
		self.pills.get_mut(id)?.release()
	}

	/// Advances every pill by `dt` and lays the stacks out.
	pub fn tick(&mut self, dt: Duration) -> Vec<StageFrame> {
		let mut frames = Vec::with_capacity(self.pills.len());
		for (id, pill) in &mut self.pills {
			let frame = pill.tick(dt);
			frames.push(StageFrame {
				id: id.clone(),
				position: pill.position(),
				slot_y: 0.0,
				pill: frame,
			});
		}
		for position in Position::ALL {
			stack(&mut frames, position);
		}
		frames
	}

	pub fn get(&self, id: &ToastId) -> Option<&PillMotion> {
		self.pills.get(id)
	}

	pub fn get_mut(&mut self, id: &ToastId) -> Option<&mut PillMotion> {
		self.pills.get_mut(id)
	}

	pub fn hovered(&self) -> Option<&ToastId> {
		self.hovered.as_ref()
	}

	pub fn len(&self) -> usize {
		self.pills.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pills.is_empty()
	}
}

/// Assigns stack offsets for one anchor's toasts, oldest nearest the
/// anchor. Entering and exiting toasts occupy their scaled slot height,
/// so neighbors slide rather than jump.
fn stack(frames: &mut [StageFrame], position: Position) {
	match geometry::grow_direction(position) {
		GrowDirection::Down => {
			let mut cursor = 0.0;
			for frame in frames.iter_mut().filter(|f| f.position == position) {
				frame.slot_y = cursor;
				cursor += frame.pill.slot_height() + STACK_GAP;
			}
		}
		GrowDirection::Up => {
			let mut cursor = 0.0;
			for frame in frames.iter_mut().rev().filter(|f| f.position == position) {
				frame.slot_y = cursor - frame.pill.slot_height();
				cursor = frame.slot_y - STACK_GAP;
			}
		}
	}
}
