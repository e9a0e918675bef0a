use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Monotonic generation clock for view scopes.
#[derive(Debug, Default, Clone)]
pub struct ScopeClock {
	next: Arc<AtomicU64>,
}

impl ScopeClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens a scope in the next generation, starting at 1.
	pub fn open(&self) -> ViewScope {
		let generation = self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
		ViewScope::new(generation, CancellationToken::new())
	}
}

/// Lifetime of the view that initiated a mutation.
///
/// Closed on teardown. Replies arriving after close still reach the cache,
/// but view-bound effects (notification, navigation, form reset) are skipped.
#[derive(Debug, Clone)]
pub struct ViewScope {
	generation: u64,
	cancel: CancellationToken,
}

impl ViewScope {
	pub fn new(generation: u64, cancel: CancellationToken) -> Self {
		Self { generation, cancel }
	}

	pub const fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_live(&self) -> bool {
		!self.cancel.is_cancelled()
	}

	pub fn close(&self) {
		self.cancel.cancel();
	}

	/// Resolves once the view is closed.
	pub async fn closed(&self) {
		self.cancel.cancelled().await;
	}

	/// Nested view (a modal over a page) closed with its parent.
	pub fn child(&self) -> Self {
		Self {
			generation: self.generation,
			cancel: self.cancel.child_token(),
		}
	}
}
