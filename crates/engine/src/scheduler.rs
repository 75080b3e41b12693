//! Countdown timers for auto-dismissal and post-exit removal.
//!
//! The scheduler holds no clock. Each armed timer stores the time left
//! until it fires, and [`tick`](Scheduler::tick) counts every timer down
//! by the elapsed delta the caller measured. Timers are keyed by toast id
//! plus instance, so a timer armed for an earlier content revision can
//! never fire against its replacement.

use std::collections::HashSet;
use std::time::Duration;

use indexmap::IndexMap;

use crate::position::Position;
use crate::record::{InstanceId, ToastId};

/// Identity of one timer: a toast id at a particular content revision.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TimerKey {
	pub id: ToastId,
	pub instance: InstanceId,
}

#[derive(Clone, Copy, Debug)]
struct Deadline {
	remaining: Duration,
	position: Position,
}

/// Timers that came due during one tick, in arming order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DueTimers {
	/// Toasts whose display time ran out.
	pub dismissals: Vec<TimerKey>,
	/// Exiting toasts whose exit animation ran out.
	pub removals: Vec<TimerKey>,
}

impl DueTimers {
	pub fn is_empty(&self) -> bool {
		self.dismissals.is_empty() && self.removals.is_empty()
	}
}

/// Dismissal and removal timers plus the paused-viewport set.
#[derive(Default)]
pub struct Scheduler {
	dismissals: IndexMap<TimerKey, Deadline>,
	removals: IndexMap<TimerKey, Deadline>,
	paused: HashSet<Position>,
}

impl Scheduler {
	/// Arms a dismissal timer. A key that is already armed keeps its
	/// original deadline; returns whether this call armed it.
	pub fn arm_dismiss(&mut self, key: TimerKey, position: Position, after: Duration) -> bool {
		if self.dismissals.contains_key(&key) {
			return false;
		}
		self.dismissals.insert(key, Deadline { remaining: after, position });
		true
	}

	/// Arms a removal timer, with the same already-armed guard.
	pub fn arm_removal(&mut self, key: TimerKey, position: Position, after: Duration) -> bool {
		if self.removals.contains_key(&key) {
			return false;
		}
		self.removals.insert(key, Deadline { remaining: after, position });
		true
	}

	/// Drops every timer for `id`, across all instances.
	pub fn drop_toast(&mut self, id: &ToastId) {
		self.dismissals.retain(|key, _| key.id != *id);
		self.removals.retain(|key, _| key.id != *id);
	}

	/// Drops every timer, or only those at `position`.
	pub fn clear(&mut self, position: Option<Position>) {
		match position {
			Some(position) => {
				self.dismissals.retain(|_, deadline| deadline.position != position);
				self.removals.retain(|_, deadline| deadline.position != position);
			}
			None => {
				self.dismissals.clear();
				self.removals.clear();
			}
		}
	}

	/// Pauses a viewport, cancelling its pending dismissals outright.
	/// The caller re-arms at full duration on resume. Removal timers
	/// keep running; an exit in progress still completes.
	///
	/// Returns `false` if the viewport was already paused.
	pub fn pause(&mut self, position: Position) -> bool {
		if !self.paused.insert(position) {
			return false;
		}
		self.dismissals.retain(|_, deadline| deadline.position != position);
		true
	}

	/// Resumes a paused viewport. Returns `false` if it was not paused.
	pub fn resume(&mut self, position: Position) -> bool {
		self.paused.remove(&position)
	}

	pub fn is_paused(&self, position: Position) -> bool {
		self.paused.contains(&position)
	}

	/// Counts every timer down by `delta` and takes out the ones that
	/// reached zero.
	pub fn tick(&mut self, delta: Duration) -> DueTimers {
		DueTimers {
			dismissals: Self::advance(&mut self.dismissals, delta),
			removals: Self::advance(&mut self.removals, delta),
		}
	}

	fn advance(table: &mut IndexMap<TimerKey, Deadline>, delta: Duration) -> Vec<TimerKey> {
		let mut due = Vec::new();
		for (key, deadline) in table.iter_mut() {
			deadline.remaining = deadline.remaining.saturating_sub(delta);
			if deadline.remaining.is_zero() {
				due.push(key.clone());
			}
		}
		for key in &due {
			table.shift_remove(key);
		}
		due
	}

	pub fn armed_dismissals(&self) -> usize {
		self.dismissals.len()
	}

	pub fn armed_removals(&self) -> usize {
		self.removals.len()
	}
}
