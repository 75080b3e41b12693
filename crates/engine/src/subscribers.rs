//! Change subscribers.
//!
//! Callbacks run outside the engine's critical section, so a callback may
//! freely call back into the engine. Delivery happens in two phases: the
//! batch of callbacks is taken out of the table, invoked one by one, and
//! then folded back in. Subscribing or unsubscribing mid-notification is
//! safe; an unsubscribed callback is skipped for the rest of the batch.
//!
//! A change made from inside a callback queues its snapshot rather than
//! delivering reentrantly. The in-progress delivery picks the queue up
//! and runs another pass, so subscribers always end on the latest state;
//! intermediate states may coalesce.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::record::ToastRecord;

/// Handle returned by subscribe, used to unsubscribe.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriberId(u64);

impl SubscriberId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		SubscriberId(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

pub type Subscriber = Box<dyn FnMut(&[ToastRecord]) + Send>;

/// Subscribers in subscription order, with mid-notification bookkeeping.
#[derive(Default)]
pub struct SubscriberTable {
	entries: IndexMap<SubscriberId, Subscriber>,
	/// Ids currently taken out by [`begin_notify`](Self::begin_notify).
	in_flight: HashSet<SubscriberId>,
	/// In-flight ids unsubscribed before their batch finished.
	cancelled: HashSet<SubscriberId>,
	/// Whether a delivery loop is running somewhere up the stack.
	delivering: bool,
	/// Snapshot queued by a change made mid-delivery.
	pending: Option<Vec<ToastRecord>>,
}

impl SubscriberTable {
	pub fn add(&mut self, subscriber: Subscriber) -> SubscriberId {
		let id = SubscriberId::next();
		self.entries.insert(id, subscriber);
		id
	}

	/// Removes a subscriber. An id whose callback is mid-delivery is
	/// tombstoned instead and dropped when the batch completes.
	pub fn remove(&mut self, id: SubscriberId) -> bool {
		if self.in_flight.contains(&id) {
			return self.cancelled.insert(id);
		}
		self.entries.shift_remove(&id).is_some()
	}

	/// Takes the current subscribers out for delivery.
	///
	/// The table stays usable while the batch is out; new subscribers
	/// land behind the batch when it is folded back in.
	pub fn begin_notify(&mut self) -> Vec<(SubscriberId, Subscriber)> {
		let batch: Vec<_> = std::mem::take(&mut self.entries).into_iter().collect();
		self.in_flight.extend(batch.iter().map(|(id, _)| *id));
		batch
	}

	/// Whether an in-flight subscriber was unsubscribed mid-batch.
	pub fn is_cancelled(&self, id: SubscriberId) -> bool {
		self.cancelled.contains(&id)
	}

	/// Folds a delivered batch back in, keeping subscription order and
	/// dropping tombstoned entries.
	pub fn finish_notify(&mut self, batch: Vec<(SubscriberId, Subscriber)>) {
		let added = std::mem::take(&mut self.entries);
		for (id, subscriber) in batch {
			self.in_flight.remove(&id);
			if !self.cancelled.remove(&id) {
				self.entries.insert(id, subscriber);
			}
		}
		self.entries.extend(added);
	}

	/// Claims the delivery loop for `records`.
	///
	/// Returns the snapshot to deliver, or `None` if a delivery is
	/// already running, in which case the snapshot is queued for it.
	pub fn try_begin_delivery(&mut self, records: Vec<ToastRecord>) -> Option<Vec<ToastRecord>> {
		if self.delivering {
			self.pending = Some(records);
			return None;
		}
		self.delivering = true;
		Some(records)
	}

	/// Hands the delivery loop its next queued snapshot, or ends it.
	pub fn next_delivery(&mut self) -> Option<Vec<ToastRecord>> {
		let next = self.pending.take();
		if next.is_none() {
			self.delivering = false;
		}
		next
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
