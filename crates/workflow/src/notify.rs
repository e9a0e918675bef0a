//! User-visible notifications.
//!
//! The controller emits at most one [`Notification`] per terminal outcome.
//! Presentation layers drain them from a [`NotificationCenter`] and own toast
//! lifecycle and rendering.

use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
	Success,
	Error,
}

/// Controls automatic dismissal of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDismiss {
	/// Stays until closed by the user.
	Never,
	After(Duration),
}

impl AutoDismiss {
	/// Default auto-dismiss duration (5 seconds).
	pub const DEFAULT: Self = Self::After(Duration::from_secs(5));
}

impl Default for AutoDismiss {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Dismissal settings shared by every notification a controller emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationStyle {
	pub auto_dismiss: AutoDismiss,
	pub closable: bool,
}

impl Default for NotificationStyle {
	fn default() -> Self {
		Self {
			auto_dismiss: AutoDismiss::DEFAULT,
			closable: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub title: String,
	pub description: Option<String>,
	pub severity: Severity,
	pub auto_dismiss: AutoDismiss,
	pub closable: bool,
}

impl Notification {
	pub fn new(severity: Severity, title: impl Into<String>, style: NotificationStyle) -> Self {
		Self {
			title: title.into(),
			description: None,
			severity,
			auto_dismiss: style.auto_dismiss,
			closable: style.closable,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Destination for controller notifications.
pub trait NotificationSink {
	fn notify(&self, notification: Notification);
}

/// Queue of notifications awaiting presentation.
#[derive(Debug)]
pub struct NotificationCenter {
	pending: VecDeque<Notification>,
	clear_epoch: u64,
}

impl Default for NotificationCenter {
	fn default() -> Self {
		Self::new()
	}
}

impl NotificationCenter {
	pub fn new() -> Self {
		Self {
			pending: VecDeque::new(),
			clear_epoch: 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}

	/// Drops everything pending. Bumps the epoch so renderers can discard toasts already shown.
	pub fn clear(&mut self) {
		self.pending.clear();
		self.clear_epoch = self.clear_epoch.wrapping_add(1);
	}

	pub fn push(&mut self, notification: Notification) {
		self.pending.push_back(notification);
	}

	pub fn take_pending(&mut self) -> Vec<Notification> {
		self.pending.drain(..).collect()
	}

	pub fn clear_epoch(&self) -> u64 {
		self.clear_epoch
	}
}

impl NotificationSink for Mutex<NotificationCenter> {
	fn notify(&self, notification: Notification) {
		self.lock().push(notification);
	}
}
