//! Promise-driven toasts: loading while a future runs, then a terminal
//! update from its outcome.

use std::fmt;
use std::future::Future;

use crate::options::ToastOptions;
use crate::position::Position;
use crate::state::ToastState;
use crate::toasts::Toasts;

/// Options for one settled phase, either fixed up front or derived from
/// the settled value.
pub enum StateResolver<V> {
	Options(ToastOptions),
	With(Box<dyn FnOnce(&V) -> ToastOptions + Send>),
}

impl<V> StateResolver<V> {
	pub fn options(options: ToastOptions) -> Self {
		StateResolver::Options(options)
	}

	/// Derives the phase's options from the value the future settled
	/// with.
	pub fn with(resolver: impl FnOnce(&V) -> ToastOptions + Send + 'static) -> Self {
		StateResolver::With(Box::new(resolver))
	}

	fn resolve(self, value: &V) -> ToastOptions {
		match self {
			StateResolver::Options(options) => options,
			StateResolver::With(resolver) => resolver(value),
		}
	}
}

impl<V> From<ToastOptions> for StateResolver<V> {
	fn from(options: ToastOptions) -> Self {
		StateResolver::Options(options)
	}
}

impl<V> Default for StateResolver<V> {
	fn default() -> Self {
		StateResolver::Options(ToastOptions::new())
	}
}

impl<V> fmt::Debug for StateResolver<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			StateResolver::Options(options) => f.debug_tuple("Options").field(options).finish(),
			StateResolver::With(_) => f.write_str("With(..)"),
		}
	}
}

/// Per-phase options for [`Toasts::promise`].
///
/// The loading options choose the toast's id; both settled phases update
/// that same toast in place. When an `action` resolver is present it
/// replaces the success phase and lands the toast in the action state.
#[derive(Debug)]
pub struct PromiseOptions<T, E> {
	pub loading: ToastOptions,
	pub success: StateResolver<T>,
	pub error: StateResolver<E>,
	pub action: Option<StateResolver<T>>,
	pub position: Option<Position>,
}

impl<T, E> Default for PromiseOptions<T, E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, E> PromiseOptions<T, E> {
	pub fn new() -> Self {
		PromiseOptions {
			loading: ToastOptions::new(),
			success: StateResolver::default(),
			error: StateResolver::default(),
			action: None,
			position: None,
		}
	}

	#[must_use]
	pub fn loading(mut self, options: ToastOptions) -> Self {
		self.loading = options;
		self
	}

	#[must_use]
	pub fn success(mut self, resolver: impl Into<StateResolver<T>>) -> Self {
		self.success = resolver.into();
		self
	}

	#[must_use]
	pub fn error(mut self, resolver: impl Into<StateResolver<E>>) -> Self {
		self.error = resolver.into();
		self
	}

	#[must_use]
	pub fn action(mut self, resolver: impl Into<StateResolver<T>>) -> Self {
		self.action = Some(resolver.into());
		self
	}

	#[must_use]
	pub fn position(mut self, position: Position) -> Self {
		self.position = Some(position);
		self
	}
}

impl Toasts {
	/// Shows a loading toast while `future` runs, then updates it from
	/// the outcome.
	///
	/// The outcome passes through unchanged, so `promise` can wrap a
	/// fallible call without altering its control flow. The settled
	/// update forces the state matching the phase that ran. If the toast
	/// was dismissed and removed while the future ran, the settled
	/// update is a no-op.
	pub async fn promise<F, T, E>(
		&self,
		future: F,
		options: PromiseOptions<T, E>,
	) -> Result<T, E>
	where
		F: Future<Output = Result<T, E>>,
	{
		let mut loading = options.loading;
		if let Some(position) = options.position {
			loading.position = Some(position);
		}
		let id = self.loading(loading);
		let outcome = future.await;

		let mut resolved = match &outcome {
			Ok(value) => match options.action {
				Some(action) => {
					let mut resolved = action.resolve(value);
					resolved.state = Some(ToastState::Action);
					resolved
				}
				None => {
					let mut resolved = options.success.resolve(value);
					resolved.state = Some(ToastState::Success);
					resolved
				}
			},
			Err(error) => {
				let mut resolved = options.error.resolve(error);
				resolved.state = Some(ToastState::Error);
				resolved
			}
		};
		resolved.id = Some(id);
		self.update(resolved);
		outcome
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::options::AutoDismiss;

	#[tokio::test]
	async fn success_resolver_sees_the_settled_value() {
		let toasts = Toasts::new();
		let outcome = toasts
			.promise(
				async { Ok::<u32, String>(3) },
				PromiseOptions::new()
					.loading(ToastOptions::new().id("upload").title("Uploading"))
					.success(StateResolver::with(|count: &u32| {
						ToastOptions::new().title(format!("{count} files uploaded"))
					}))
					.error(ToastOptions::new().title("Upload failed")),
			)
			.await;

		assert_eq!(outcome, Ok(3));
		let record = toasts.get("upload").unwrap();
		assert_eq!(record.state, ToastState::Success);
		assert_eq!(record.title, "3 files uploaded");
		// Auto-dismissal resumes once the promise settles.
		assert_eq!(record.dismiss, AutoDismiss::default());
	}

	#[tokio::test]
	async fn action_resolver_replaces_the_success_phase() {
		let toasts = Toasts::new();
		let outcome = toasts
			.promise(
				async { Ok::<&str, ()>("report.pdf") },
				PromiseOptions::new()
					.loading(ToastOptions::new().id("export").title("Exporting"))
					.success(ToastOptions::new().title("unused"))
					.action(StateResolver::with(|name: &&str| {
						ToastOptions::new().title(format!("Open {name}"))
					}))
					.position(Position::BottomRight),
			)
			.await;

		assert_eq!(outcome, Ok("report.pdf"));
		let record = toasts.get("export").unwrap();
		assert_eq!(record.state, ToastState::Action);
		assert_eq!(record.title, "Open report.pdf");
		assert_eq!(record.position, Position::BottomRight);
	}

	#[tokio::test]
	async fn failure_passes_the_error_through() {
		let toasts = Toasts::new();
		let outcome = toasts
			.promise(
				async { Err::<u32, String>("connection reset".into()) },
				PromiseOptions::new()
					.loading(ToastOptions::new().id("upload").title("Uploading"))
					.error(StateResolver::with(|e: &String| ToastOptions::new().title(e.clone()))),
			)
			.await;

		assert_eq!(outcome, Err("connection reset".into()));
		let record = toasts.get("upload").unwrap();
		assert_eq!(record.state, ToastState::Error);
		assert_eq!(record.title, "connection reset");
	}

	#[tokio::test]
	async fn loading_phase_persists_until_settled() {
		let toasts = Toasts::new();
		let (tx, rx) = tokio::sync::oneshot::channel::<u32>();

		let pending = {
			let toasts = toasts.clone();
			tokio::spawn(async move {
				toasts
					.promise(
						async { rx.await.map_err(|_| "dropped") },
						PromiseOptions::new()
							.loading(ToastOptions::new().id("job").title("Working")),
					)
					.await
			})
		};
		tokio::task::yield_now().await;

		let record = toasts.get("job").unwrap();
		assert!(record.state.is_loading());
		assert_eq!(record.dismiss, AutoDismiss::Never);

		tx.send(7).unwrap();
		let outcome = pending.await.unwrap();
		assert_eq!(outcome, Ok(7));
		assert_eq!(toasts.get("job").unwrap().state, ToastState::Success);
	}

	#[tokio::test]
	async fn settling_after_removal_is_a_no_op() {
		let toasts = Toasts::new();
		let (tx, rx) = tokio::sync::oneshot::channel::<u32>();

		let pending = {
			let toasts = toasts.clone();
			tokio::spawn(async move {
				toasts
					.promise(
						async { rx.await.map_err(|_| "dropped") },
						PromiseOptions::new()
							.loading(ToastOptions::new().id("job").title("Working")),
					)
					.await
			})
		};
		tokio::task::yield_now().await;

		// Dismiss and let the exit complete before the future settles.
		assert!(toasts.dismiss("job"));
		toasts.tick(std::time::Duration::from_millis(600));
		assert!(toasts.is_empty());

		tx.send(1).unwrap();
		assert_eq!(pending.await.unwrap(), Ok(1));
		assert!(toasts.is_empty());
	}
}
