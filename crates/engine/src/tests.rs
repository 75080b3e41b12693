//! End-to-end engine scenarios.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::config::ToasterConfig;
use crate::options::{AutoDismiss, EXIT_DURATION, ToastOptions};
use crate::position::Position;
use crate::state::ToastState;
use crate::toasts::Toasts;

fn titled(id: &str) -> ToastOptions {
	ToastOptions::new().id(id).title(id.to_uppercase())
}

fn ids(toasts: &Toasts) -> Vec<String> {
	toasts.snapshot().iter().map(|t| t.id.to_string()).collect()
}

/// Records every notification as `(id, exiting)` rows.
fn capture(toasts: &Toasts) -> Arc<Mutex<Vec<Vec<(String, bool)>>>> {
	let log = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&log);
	toasts.subscribe(move |records| {
		sink.lock().push(records.iter().map(|t| (t.id.to_string(), t.exiting)).collect());
	});
	log
}

#[test]
fn bare_calls_share_the_default_toast() {
	let toasts = Toasts::new();
	toasts.show(ToastOptions::new().title("first"));
	toasts.show(ToastOptions::new().title("second"));

	assert_eq!(toasts.len(), 1);
	let record = toasts.get("default").unwrap();
	assert_eq!(record.title, "second");
}

#[test]
fn insertion_order_survives_updates() {
	let toasts = Toasts::new();
	toasts.show(titled("a"));
	toasts.show(titled("b"));
	toasts.show(titled("c"));

	toasts.update(ToastOptions::new().id("b").title("B2"));
	assert_eq!(ids(&toasts), ["a", "b", "c"]);

	// A dismissed id that comes back starts over at the end.
	toasts.dismiss("b");
	toasts.show(titled("b"));
	assert_eq!(ids(&toasts), ["a", "c", "b"]);
}

#[test]
fn every_revision_gets_a_fresh_instance() {
	let toasts = Toasts::new();
	toasts.show(titled("a"));
	let first = toasts.get("a").unwrap().instance;

	toasts.show(titled("a"));
	let second = toasts.get("a").unwrap().instance;
	assert_ne!(first, second);

	toasts.update(ToastOptions::new().id("a").title("A3"));
	assert_ne!(toasts.get("a").unwrap().instance, second);
}

#[test]
fn helpers_force_their_state() {
	let toasts = Toasts::new();
	toasts.success(ToastOptions::new().id("a").state(ToastState::Warning));
	assert_eq!(toasts.get("a").unwrap().state, ToastState::Success);

	toasts.show(ToastOptions::new().id("b"));
	assert_eq!(toasts.get("b").unwrap().state, ToastState::Info);
}

#[test]
fn loading_defaults_to_persistent() {
	let toasts = Toasts::new();
	toasts.loading(ToastOptions::new().id("job"));
	assert_eq!(toasts.get("job").unwrap().dismiss, AutoDismiss::Never);

	toasts.loading(ToastOptions::new().id("bounded").duration(Duration::from_secs(1)));
	assert_eq!(
		toasts.get("bounded").unwrap().dismiss,
		AutoDismiss::After(Duration::from_secs(1))
	);
}

#[test]
fn zero_duration_toasts_persist() {
	let toasts = Toasts::new();
	toasts.show(titled("a").duration(Duration::ZERO));
	assert_eq!(toasts.get("a").unwrap().dismiss, AutoDismiss::Never);

	toasts.tick(Duration::from_secs(600));
	assert!(toasts.get("a").unwrap().is_live());
}

#[test]
fn display_timeout_exits_then_removes() {
	let toasts = Toasts::new();
	toasts.show(titled("a").duration(Duration::from_millis(100)));

	toasts.tick(Duration::from_millis(99));
	assert!(toasts.get("a").unwrap().is_live());

	toasts.tick(Duration::from_millis(1));
	assert!(toasts.get("a").unwrap().exiting);

	toasts.tick(EXIT_DURATION - Duration::from_millis(1));
	assert!(toasts.get("a").is_some());
	toasts.tick(Duration::from_millis(1));
	assert!(toasts.is_empty());
}

#[test]
fn dismiss_is_idempotent() {
	let toasts = Toasts::new();
	let log = capture(&toasts);
	toasts.show(titled("a"));

	assert!(toasts.dismiss("a"));
	assert!(!toasts.dismiss("a"));
	assert!(!toasts.dismiss("missing"));

	let exiting_rows =
		log.lock().iter().filter(|rows| rows.iter().any(|(_, exiting)| *exiting)).count();
	assert_eq!(exiting_rows, 1);

	toasts.tick(EXIT_DURATION);
	assert!(toasts.is_empty());
	assert!(!toasts.dismiss("a"));
}

#[test]
fn updating_an_exiting_toast_revives_it() {
	let toasts = Toasts::new();
	toasts.show(titled("a"));
	let original = toasts.get("a").unwrap().instance;
	toasts.dismiss("a");

	assert!(toasts.update(ToastOptions::new().id("a").title("back")));
	let revived = toasts.get("a").unwrap();
	assert!(revived.is_live());
	assert_eq!(revived.title, "back");
	assert_ne!(revived.instance, original);

	// The removal armed for the dismissed revision must not fire against
	// the revived one.
	toasts.tick(EXIT_DURATION);
	assert_eq!(toasts.len(), 1);
	assert!(toasts.get("a").unwrap().is_live());
}

#[test]
fn update_of_an_unknown_id_is_ignored() {
	let toasts = Toasts::new();
	let log = capture(&toasts);
	assert!(!toasts.update(ToastOptions::new().id("ghost").title("boo")));
	assert!(toasts.is_empty());
	assert!(log.lock().is_empty());
}

#[test]
fn hover_pauses_and_rearms_at_full_duration() {
	let toasts = Toasts::new();
	toasts.show(titled("a"));

	toasts.tick(Duration::from_millis(5999));
	toasts.pointer_enter(Position::TopRight);
	toasts.tick(Duration::from_secs(60));
	assert!(toasts.get("a").unwrap().is_live());

	// Leaving restarts the countdown from the full duration, not from
	// the 1 ms that remained.
	toasts.pointer_leave(Position::TopRight);
	toasts.tick(Duration::from_millis(5999));
	assert!(toasts.get("a").unwrap().is_live());
	toasts.tick(Duration::from_millis(1));
	assert!(toasts.get("a").unwrap().exiting);
}

#[test]
fn toast_shown_while_hovered_arms_on_leave() {
	let toasts = Toasts::new();
	toasts.pointer_enter(Position::TopRight);
	toasts.show(titled("a"));

	toasts.tick(Duration::from_secs(60));
	assert!(toasts.get("a").unwrap().is_live());

	toasts.pointer_leave(Position::TopRight);
	toasts.tick(Duration::from_secs(6));
	assert!(toasts.get("a").unwrap().exiting);
}

#[test]
fn hover_does_not_stall_an_exit_in_progress() {
	let toasts = Toasts::new();
	toasts.show(titled("a"));
	toasts.dismiss("a");

	toasts.pointer_enter(Position::TopRight);
	toasts.tick(EXIT_DURATION);
	assert!(toasts.is_empty());
}

#[test]
fn clear_skips_the_exit_phase() {
	let toasts = Toasts::new();
	let log = capture(&toasts);
	toasts.show(titled("a"));
	toasts.show(titled("b"));

	toasts.clear(None);
	assert!(toasts.is_empty());
	assert_eq!(log.lock().last(), Some(&Vec::new()));
	assert!(!log.lock().iter().flatten().any(|(_, exiting)| *exiting));

	// Cleared timers stay silent.
	let notifications = log.lock().len();
	toasts.tick(Duration::from_secs(60));
	assert_eq!(log.lock().len(), notifications);
}

#[test]
fn clear_scoped_to_one_viewport() {
	let toasts = Toasts::new();
	toasts.show(titled("left").position(Position::BottomLeft));
	toasts.show(titled("right"));

	toasts.clear(Some(Position::BottomLeft));
	assert_eq!(ids(&toasts), ["right"]);

	// Clearing an empty viewport notifies nobody.
	let log = capture(&toasts);
	toasts.clear(Some(Position::BottomLeft));
	assert!(log.lock().is_empty());
}

#[test]
fn container_defaults_fill_unset_fields() {
	let config = ToasterConfig {
		position: Position::BottomCenter,
		defaults: ToastOptions::new().fill("#0f172a").duration(Duration::from_secs(2)),
		..ToasterConfig::default()
	};
	let toasts = Toasts::with_config(config).unwrap();

	toasts.show(titled("a"));
	let record = toasts.get("a").unwrap();
	assert_eq!(record.fill.as_deref(), Some("#0f172a"));
	assert_eq!(record.position, Position::BottomCenter);
	assert_eq!(record.dismiss, AutoDismiss::After(Duration::from_secs(2)));

	toasts.show(titled("b").fill("#ffffff").position(Position::TopLeft).persist());
	let record = toasts.get("b").unwrap();
	assert_eq!(record.fill.as_deref(), Some("#ffffff"));
	assert_eq!(record.position, Position::TopLeft);
	assert_eq!(record.dismiss, AutoDismiss::Never);
}

#[test]
fn update_without_a_position_stays_put() {
	let toasts = Toasts::new();
	toasts.show(titled("a").position(Position::BottomLeft));

	toasts.update(ToastOptions::new().id("a").title("moved?"));
	assert_eq!(toasts.get("a").unwrap().position, Position::BottomLeft);

	toasts.update(ToastOptions::new().id("a").position(Position::TopCenter));
	assert_eq!(toasts.get("a").unwrap().position, Position::TopCenter);
}

#[test]
fn rejected_config_never_builds_an_engine() {
	let mut config = ToasterConfig::default();
	config.offset.left = -1.0;
	assert!(Toasts::with_config(config).is_err());
}

#[test]
fn subscribers_see_each_transition() {
	let toasts = Toasts::new();
	let log = capture(&toasts);

	toasts.show(titled("a").duration(Duration::from_millis(100)));
	toasts.tick(Duration::from_millis(100));
	toasts.tick(EXIT_DURATION);

	assert_eq!(
		*log.lock(),
		vec![
			vec![("a".to_string(), false)],
			vec![("a".to_string(), true)],
			vec![],
		]
	);
}

#[test]
fn a_subscriber_may_reenter_the_engine() {
	let toasts = Toasts::new();
	let calls = Arc::new(Mutex::new(0usize));

	let engine = toasts.clone();
	let seen = Arc::clone(&calls);
	toasts.subscribe(move |records| {
		*seen.lock() += 1;
		if records.iter().any(|t| t.id.as_str() == "a" && t.is_live()) {
			engine.dismiss("a");
		}
	});

	toasts.show(titled("a"));
	assert!(toasts.get("a").unwrap().exiting);
	assert_eq!(*calls.lock(), 2);
}

#[test]
fn unsubscribed_callbacks_stop_firing() {
	let toasts = Toasts::new();
	let log = capture(&toasts);
	let calls = Arc::new(Mutex::new(0usize));
	let seen = Arc::clone(&calls);
	let id = toasts.subscribe(move |_| *seen.lock() += 1);

	toasts.show(titled("a"));
	assert!(toasts.unsubscribe(id));
	toasts.show(titled("b"));

	assert_eq!(*calls.lock(), 1);
	assert_eq!(log.lock().len(), 2);
}

/// One engine operation over a small id space.
#[derive(Clone, Debug)]
enum Op {
	Show(u8),
	Update(u8),
	Dismiss(u8),
	Clear,
	Tick(u16),
}

fn arb_op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0u8..4).prop_map(Op::Show),
		(0u8..4).prop_map(Op::Update),
		(0u8..4).prop_map(Op::Dismiss),
		Just(Op::Clear),
		(0u16..2000).prop_map(Op::Tick),
	]
}

proptest! {
	/// At most one record ever holds a given id, and at most one of the
	/// records per id is live, whatever the call sequence.
	#[test]
	fn prop_ids_stay_unique(ops in prop::collection::vec(arb_op(), 0..48)) {
		let toasts = Toasts::new();
		for op in ops {
			match op {
				Op::Show(n) => {
					toasts.show(ToastOptions::new().id(format!("t{n}")).title("shown"));
				}
				Op::Update(n) => {
					toasts.update(ToastOptions::new().id(format!("t{n}")).title("updated"));
				}
				Op::Dismiss(n) => {
					toasts.dismiss(format!("t{n}"));
				}
				Op::Clear => toasts.clear(None),
				Op::Tick(ms) => toasts.tick(Duration::from_millis(u64::from(ms))),
			}
			let snapshot = toasts.snapshot();
			for record in &snapshot {
				prop_assert_eq!(snapshot.iter().filter(|t| t.id == record.id).count(), 1);
			}
		}
	}
}
