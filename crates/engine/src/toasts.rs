//! The engine handle.
//!
//! [`Toasts`] is a cheap cloneable handle over shared engine state. All
//! mutation happens under one lock; subscriber callbacks always run after
//! that lock is released, so callbacks may call back into the engine.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::ToasterConfig;
use crate::error::ConfigError;
use crate::options::{AutoDismiss, DEFAULT_ROUNDNESS, EXIT_DURATION, ToastOptions};
use crate::position::Position;
use crate::record::{InstanceId, ToastId, ToastRecord};
use crate::registry::Registry;
use crate::scheduler::{Scheduler, TimerKey};
use crate::state::ToastState;
use crate::subscribers::{SubscriberId, SubscriberTable};

struct EngineCore {
	config: ToasterConfig,
	registry: Registry,
	scheduler: Scheduler,
}

impl EngineCore {
	/// Resolves options into a record and stores it.
	///
	/// Resolution order per field is call options, then container
	/// defaults, then engine defaults. The position additionally falls
	/// back to the record being replaced, so an update without an
	/// explicit position does not move the toast. Shows consult only the
	/// live record for that fallback; updates may also inherit from an
	/// exiting record they are about to revive.
	fn create(
		&mut self,
		forced_state: Option<ToastState>,
		options: ToastOptions,
		inherit_exiting_position: bool,
	) -> ToastId {
		let id = options.id.clone().unwrap_or_default();
		let merged = options.merged_over(&self.config.defaults);

		let prior = if inherit_exiting_position {
			self.registry.get(&id)
		} else {
			self.registry.get_live(&id)
		};
		let state = forced_state.or(merged.state).unwrap_or_default();
		let position =
			merged.position.or(prior.map(|t| t.position)).unwrap_or(self.config.position);
		// Loading toasts persist unless a duration is set explicitly.
		let dismiss = match merged.duration {
			None if state.is_loading() => AutoDismiss::Never,
			other => other.unwrap_or_default(),
		}
		.normalized();
		let autopilot = merged.autopilot.unwrap_or_default().resolve(dismiss);

		let record = ToastRecord {
			id: id.clone(),
			instance: InstanceId::next(),
			state,
			title: merged.title.unwrap_or_default(),
			description: merged.description,
			icon: merged.icon,
			button: merged.button,
			fill: merged.fill,
			roundness: merged.roundness.unwrap_or(DEFAULT_ROUNDNESS),
			dismiss,
			position,
			autopilot,
			styles: merged.styles,
			exiting: false,
		};
		let instance = record.instance;
		self.registry.upsert(record);

		// Timers for earlier instances of this id must not outlive them.
		self.scheduler.drop_toast(&id);
		if let Some(after) = dismiss.duration() {
			if !self.scheduler.is_paused(position) {
				self.scheduler.arm_dismiss(TimerKey { id: id.clone(), instance }, position, after);
			}
		}
		debug!(toast = %id, state = state.name(), %position, "toast stored");
		id
	}

	/// Marks the live record for `id` as exiting and arms its removal.
	fn begin_exit(&mut self, id: &ToastId) -> bool {
		let Some((instance, position)) = self.registry.mark_exiting(id) else {
			return false;
		};
		self.scheduler.drop_toast(id);
		self.scheduler.arm_removal(TimerKey { id: id.clone(), instance }, position, EXIT_DURATION);
		true
	}
}

/// Handle to a toast engine. Clones share the same state.
#[derive(Clone)]
pub struct Toasts {
	core: Arc<Mutex<EngineCore>>,
	subscribers: Arc<Mutex<SubscriberTable>>,
}

impl Default for Toasts {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Toasts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = f.debug_struct("Toasts");
		if let Some(core) = self.core.try_lock() {
			out.field("toasts", &core.registry.len());
		}
		out.finish_non_exhaustive()
	}
}

impl Toasts {
	/// An engine with default configuration.
	pub fn new() -> Self {
		Toasts {
			core: Arc::new(Mutex::new(EngineCore {
				config: ToasterConfig::default(),
				registry: Registry::default(),
				scheduler: Scheduler::default(),
			})),
			subscribers: Arc::new(Mutex::new(SubscriberTable::default())),
		}
	}

	pub fn with_config(config: ToasterConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let toasts = Self::new();
		toasts.core.lock().config = config;
		Ok(toasts)
	}

	pub fn config(&self) -> ToasterConfig {
		self.core.lock().config.clone()
	}

	/// Shows a toast. Reusing a live id updates that toast in place;
	/// otherwise a new toast is appended.
	pub fn show(&self, options: ToastOptions) -> ToastId {
		self.show_as(None, options)
	}

	pub fn success(&self, options: ToastOptions) -> ToastId {
		self.show_as(Some(ToastState::Success), options)
	}

	pub fn error(&self, options: ToastOptions) -> ToastId {
		self.show_as(Some(ToastState::Error), options)
	}

	pub fn warning(&self, options: ToastOptions) -> ToastId {
		self.show_as(Some(ToastState::Warning), options)
	}

	pub fn info(&self, options: ToastOptions) -> ToastId {
		self.show_as(Some(ToastState::Info), options)
	}

	pub fn action(&self, options: ToastOptions) -> ToastId {
		self.show_as(Some(ToastState::Action), options)
	}

	/// Shows a loading toast. Without an explicit duration it persists
	/// until updated or dismissed.
	pub fn loading(&self, options: ToastOptions) -> ToastId {
		self.show_as(Some(ToastState::Loading), options)
	}

	fn show_as(&self, forced_state: Option<ToastState>, options: ToastOptions) -> ToastId {
		let (id, snapshot) = {
			let mut core = self.core.lock();
			let id = core.create(forced_state, options, false);
			(id, core.registry.snapshot())
		};
		self.notify_with(snapshot);
		id
	}

	/// Updates an existing toast, resolving options exactly like
	/// [`show`](Self::show). Unknown ids are a no-op; updating an
	/// exiting toast revives it as a fresh entry.
	///
	/// Returns whether a toast was updated.
	pub fn update(&self, options: ToastOptions) -> bool {
		let snapshot = {
			let mut core = self.core.lock();
			let id = options.id.clone().unwrap_or_default();
			if core.registry.get(&id).is_none() {
				trace!(toast = %id, "update for unknown toast ignored");
				return false;
			}
			core.create(None, options, true);
			core.registry.snapshot()
		};
		self.notify_with(snapshot);
		true
	}

	/// Starts a toast's exit. The record stays in the registry, flagged
	/// as exiting, until the exit animation runs out. Unknown and
	/// already-exiting ids are a no-op.
	///
	/// Returns whether an exit was started.
	pub fn dismiss(&self, id: impl Into<ToastId>) -> bool {
		let id = id.into();
		let snapshot = {
			let mut core = self.core.lock();
			if !core.begin_exit(&id) {
				return false;
			}
			debug!(toast = %id, "toast dismissed");
			core.registry.snapshot()
		};
		self.notify_with(snapshot);
		true
	}

	/// Removes toasts immediately, skipping the exit animation. With a
	/// position, only that viewport is cleared.
	pub fn clear(&self, position: Option<Position>) {
		let snapshot = {
			let mut core = self.core.lock();
			let removed = core.registry.clear(position);
			core.scheduler.clear(position);
			if removed == 0 {
				return;
			}
			debug!(removed, "toasts cleared");
			core.registry.snapshot()
		};
		self.notify_with(snapshot);
	}

	/// Advances engine time by `delta`, firing any timers that come due.
	///
	/// Dismissals that fire start the toast's exit; removals that fire
	/// drop the record, provided the toast was not updated since the
	/// timer was armed.
	pub fn tick(&self, delta: Duration) {
		let snapshot = {
			let mut core = self.core.lock();
			let due = core.scheduler.tick(delta);
			if due.is_empty() {
				return;
			}
			trace!(
				dismissals = due.dismissals.len(),
				removals = due.removals.len(),
				"timers fired"
			);
			let mut changed = false;
			for key in due.dismissals {
				let current = core.registry.get_live(&key.id).map(|t| t.instance);
				if current == Some(key.instance) {
					changed |= core.begin_exit(&key.id);
				}
			}
			for key in due.removals {
				changed |= core.registry.remove(&key.id, key.instance);
			}
			if !changed {
				return;
			}
			core.registry.snapshot()
		};
		self.notify_with(snapshot);
	}

	/// Pauses auto-dismissal for one viewport while the pointer is over
	/// it. Exits already in progress still complete.
	pub fn pointer_enter(&self, position: Position) {
		let mut core = self.core.lock();
		if core.scheduler.pause(position) {
			trace!(%position, "viewport paused");
		}
	}

	/// Resumes a viewport, re-arming every live toast there at its full
	/// display duration.
	pub fn pointer_leave(&self, position: Position) {
		let mut core = self.core.lock();
		if !core.scheduler.resume(position) {
			return;
		}
		let rearm: Vec<(TimerKey, Duration)> = core
			.registry
			.at_position(position)
			.filter(|t| t.is_live())
			.filter_map(|t| {
				let after = t.dismiss.duration()?;
				Some((TimerKey { id: t.id.clone(), instance: t.instance }, after))
			})
			.collect();
		for (key, after) in rearm {
			core.scheduler.arm_dismiss(key, position, after);
		}
		trace!(%position, "viewport resumed");
	}

	/// Registers a callback for registry changes. The callback receives
	/// the full record list after each change; it does not fire for the
	/// state at subscription time, which [`snapshot`](Self::snapshot)
	/// provides.
	pub fn subscribe(
		&self,
		subscriber: impl FnMut(&[ToastRecord]) + Send + 'static,
	) -> SubscriberId {
		self.subscribers.lock().add(Box::new(subscriber))
	}

	/// Removes a subscriber. Safe to call from inside a callback.
	pub fn unsubscribe(&self, id: SubscriberId) -> bool {
		self.subscribers.lock().remove(id)
	}

	/// The current records, in insertion order.
	pub fn snapshot(&self) -> Vec<ToastRecord> {
		self.core.lock().registry.snapshot()
	}

	pub fn get(&self, id: impl Into<ToastId>) -> Option<ToastRecord> {
		self.core.lock().registry.get(&id.into()).cloned()
	}

	pub fn len(&self) -> usize {
		self.core.lock().registry.len()
	}

	pub fn is_empty(&self) -> bool {
		self.core.lock().registry.is_empty()
	}

	/// Runs subscribers against `records` with no engine lock held.
	///
	/// Re-entrant changes queue their snapshot; the loop here picks the
	/// queue up and delivers again, so subscribers always end on the
	/// latest state.
	fn notify_with(&self, records: Vec<ToastRecord>) {
		let Some(mut current) = self.subscribers.lock().try_begin_delivery(records) else {
			return;
		};
		loop {
			let mut batch = self.subscribers.lock().begin_notify();
			for (id, subscriber) in &mut batch {
				let cancelled = self.subscribers.lock().is_cancelled(*id);
				if !cancelled {
					subscriber(&current);
				}
			}
			let mut table = self.subscribers.lock();
			table.finish_notify(batch);
			match table.next_delivery() {
				Some(next) => current = next,
				None => return,
			}
		}
	}
}
