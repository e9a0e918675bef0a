//! Per-control submit gate.
//!
//! A triggering control (a submit button, a delete confirm) holds one
//! [`SubmitControl`]. While a request for a target is in flight the control
//! refuses a second lock on the same target, so rapid re-activation never
//! produces two outcomes for one `(kind, id)`.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::request::TargetKey;

#[derive(Debug, Clone, Default)]
pub struct SubmitControl {
	in_flight: Arc<Mutex<HashSet<TargetKey>>>,
}

impl SubmitControl {
	pub fn new() -> Self {
		Self::default()
	}

	/// Locks `target`, or returns `None` if it is already in flight.
	///
	/// The lock is released when the returned guard drops, on every path.
	pub fn lock(&self, target: TargetKey) -> Option<SubmitGuard> {
		if !self.in_flight.lock().insert(target.clone()) {
			return None;
		}
		Some(SubmitGuard {
			in_flight: self.in_flight.clone(),
			target,
		})
	}

	/// True while any request of this control is in flight; the control renders disabled.
	pub fn is_locked(&self) -> bool {
		!self.in_flight.lock().is_empty()
	}

	pub fn is_locked_for(&self, target: &TargetKey) -> bool {
		self.in_flight.lock().contains(target)
	}
}

/// Holds a target lock for the duration of one dispatch.
#[derive(Debug)]
pub struct SubmitGuard {
	in_flight: Arc<Mutex<HashSet<TargetKey>>>,
	target: TargetKey,
}

impl SubmitGuard {
	pub fn target(&self) -> &TargetKey {
		&self.target
	}
}

impl Drop for SubmitGuard {
	fn drop(&mut self) {
		let released = self.in_flight.lock().remove(&self.target);
		debug_assert!(released, "submit guard released an unlocked target");
	}
}
