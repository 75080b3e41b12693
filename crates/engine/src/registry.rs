//! Ordered toast store.
//!
//! Records keep their insertion order; reusing a live id rewrites that
//! record in place rather than moving it. At most one live record exists
//! per id, though an exiting record may briefly coexist with a live
//! successor under the same id.

use crate::position::Position;
use crate::record::{InstanceId, ToastId, ToastRecord};

/// Outcome of storing a record under its id.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpsertOutcome {
	/// A live record with the same id was rewritten in place.
	Updated,
	/// The record was appended as a new entry.
	Inserted {
		/// Whether an exiting record under the same id was evicted to
		/// keep the id unambiguous.
		evicted_exiting: bool,
	},
}

/// Ordered collection of toast records.
#[derive(Debug, Default)]
pub struct Registry {
	toasts: Vec<ToastRecord>,
}

impl Registry {
	/// Stores `record` under its id.
	///
	/// A live record with the same id is replaced in place, keeping its
	/// spot in the order. Otherwise the record is appended, evicting any
	/// exiting record that still holds the id.
	pub fn upsert(&mut self, record: ToastRecord) -> UpsertOutcome {
		if let Some(slot) = self.toasts.iter_mut().find(|t| t.id == record.id && t.is_live()) {
			*slot = record;
			return UpsertOutcome::Updated;
		}
		let before = self.toasts.len();
		self.toasts.retain(|t| t.id != record.id);
		let evicted_exiting = self.toasts.len() < before;
		self.toasts.push(record);
		UpsertOutcome::Inserted { evicted_exiting }
	}

	/// Looks up a record by id, exiting or not.
	pub fn get(&self, id: &ToastId) -> Option<&ToastRecord> {
		self.toasts.iter().find(|t| t.id == *id)
	}

	/// Looks up the live record for an id.
	pub fn get_live(&self, id: &ToastId) -> Option<&ToastRecord> {
		self.toasts.iter().find(|t| t.id == *id && t.is_live())
	}

	/// Flags the live record for `id` as exiting.
	///
	/// Returns the instance and position needed to arm its removal timer.
	/// Already-exiting and unknown ids are a no-op.
	pub fn mark_exiting(&mut self, id: &ToastId) -> Option<(InstanceId, Position)> {
		let toast = self.toasts.iter_mut().find(|t| t.id == *id && t.is_live())?;
		toast.exiting = true;
		Some((toast.instance, toast.position))
	}

	/// Drops the record for `id`, but only if it still carries `instance`.
	///
	/// The instance check lets stale removal timers fire harmlessly after
	/// the id was reused.
	pub fn remove(&mut self, id: &ToastId, instance: InstanceId) -> bool {
		let before = self.toasts.len();
		self.toasts.retain(|t| !(t.id == *id && t.instance == instance));
		self.toasts.len() < before
	}

	/// Drops every record, or only those anchored at `position`.
	/// Returns how many were removed.
	pub fn clear(&mut self, position: Option<Position>) -> usize {
		let before = self.toasts.len();
		match position {
			Some(position) => self.toasts.retain(|t| t.position != position),
			None => self.toasts.clear(),
		}
		before - self.toasts.len()
	}

	/// Records anchored at `position`, in insertion order.
	pub fn at_position(&self, position: Position) -> impl Iterator<Item = &ToastRecord> {
		self.toasts.iter().filter(move |t| t.position == position)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ToastRecord> {
		self.toasts.iter()
	}

	/// Owned copy of the current records, in order.
	pub fn snapshot(&self) -> Vec<ToastRecord> {
		self.toasts.clone()
	}

	pub fn len(&self) -> usize {
		self.toasts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.toasts.is_empty()
	}
}
