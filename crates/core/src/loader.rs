//! Per-resource load slots with last-completed-wins updates.
//!
//! Every [`LoadSlot::load`] call is numbered. A completion is applied only if
//! no later-numbered attempt has already been applied, so the slot always
//! reflects the most recent attempt to finish among those not yet overtaken.
//! The future returned by `load` holds only a weak reference: once the slot is
//! dropped, late completions are discarded without touching anything.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
	#[default]
	Idle,
	Loading,
	Ready,
	Failed,
}

/// Point-in-time copy of a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSnapshot<T> {
	pub status: SlotStatus,
	pub value: Option<T>,
	pub error: Option<String>,
}

/// What happened to one completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
	/// The result was written to the slot.
	Applied,
	/// A later attempt had already been applied; the result was dropped.
	Superseded,
	/// The slot no longer exists.
	Discarded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
	pub outcome: LoadOutcome,
	pub error: Option<Error>,
}

impl LoadReport {
	pub fn is_applied(&self) -> bool {
		self.outcome == LoadOutcome::Applied
	}

	/// The error, if this attempt failed and its result reached the slot.
	pub fn applied_error(&self) -> Option<&Error> {
		self.is_applied().then_some(self.error.as_ref()).flatten()
	}
}

struct SlotState<T> {
	status: SlotStatus,
	value: Option<T>,
	error: Option<String>,
	issued: u64,
	applied: u64,
}

/// One named resource of a view.
pub struct LoadSlot<T> {
	name: &'static str,
	failure_message: &'static str,
	state: Arc<Mutex<SlotState<T>>>,
}

impl<T: Send + 'static> LoadSlot<T> {
	/// `failure_message` is shown for failures that carry no backend message.
	pub fn new(name: &'static str, failure_message: &'static str) -> Self {
		Self {
			name,
			failure_message,
			state: Arc::new(Mutex::new(SlotState {
				status: SlotStatus::Idle,
				value: None,
				error: None,
				issued: 0,
				applied: 0,
			})),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn failure_message(&self) -> &'static str {
		self.failure_message
	}

	/// Marks the slot `Loading` immediately and returns the attempt.
	///
	/// The returned future owns nothing of the slot; it may outlive it.
	/// On failure the previous value is kept and the error text is set.
	pub fn load<F>(&self, fetch: F) -> impl Future<Output = LoadReport> + Send + 'static + use<T, F>
	where
		F: Future<Output = Result<T>> + Send + 'static,
	{
		let attempt = {
			let mut state = self.state.lock();
			state.issued += 1;
			state.status = SlotStatus::Loading;
			state.issued
		};
		let weak = Arc::downgrade(&self.state);
		let name = self.name;
		let failure_message = self.failure_message;
		trace!(target = "attend.loader", slot = name, attempt, "load issued");

		async move {
			let result = fetch.await;

			let Some(state) = weak.upgrade() else {
				debug!(target = "attend.loader", slot = name, attempt, "slot gone; discarding completion");
				return LoadReport {
					outcome: LoadOutcome::Discarded,
					error: result.err(),
				};
			};
			let mut state = state.lock();

			if attempt <= state.applied {
				debug!(target = "attend.loader", slot = name, attempt, applied = state.applied, "stale completion dropped");
				return LoadReport {
					outcome: LoadOutcome::Superseded,
					error: result.err(),
				};
			}
			state.applied = attempt;

			let error = match result {
				Ok(value) => {
					state.value = Some(value);
					state.error = None;
					None
				}
				Err(err) => {
					state.error = Some(err.notice_text(failure_message));
					Some(err)
				}
			};

			state.status = match (attempt == state.issued, error.is_some()) {
				(false, _) => SlotStatus::Loading,
				(true, true) => SlotStatus::Failed,
				(true, false) => SlotStatus::Ready,
			};
			trace!(target = "attend.loader", slot = name, attempt, status = ?state.status, "load applied");

			LoadReport {
				outcome: LoadOutcome::Applied,
				error,
			}
		}
	}

	pub fn status(&self) -> SlotStatus {
		self.state.lock().status
	}

	pub fn error(&self) -> Option<String> {
		self.state.lock().error.clone()
	}

	/// Runs `f` against the current value without cloning it.
	pub fn with_value<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
		f(self.state.lock().value.as_ref())
	}
}

impl<T: Clone + Send + 'static> LoadSlot<T> {
	pub fn value(&self) -> Option<T> {
		self.state.lock().value.clone()
	}

	pub fn snapshot(&self) -> SlotSnapshot<T> {
		let state = self.state.lock();
		SlotSnapshot {
			status: state.status,
			value: state.value.clone(),
			error: state.error.clone(),
		}
	}
}

impl<T> fmt::Debug for LoadSlot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("LoadSlot")
			.field("name", &self.name)
			.field("status", &state.status)
			.field("issued", &state.issued)
			.field("applied", &state.applied)
			.finish()
	}
}
