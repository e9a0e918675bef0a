use std::fmt;

use thiserror::Error;

/// Coarse classification of a store failure.
///
/// Carried for logging only; every class surfaces to the user the same way,
/// as a failure notification with [`StoreError::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
	/// The request never got a server answer.
	Transport,
	/// The server refused the payload.
	Rejected,
	/// The targeted entity does not exist.
	NotFound,
	/// The server state changed underneath the request.
	Conflict,
}

impl ErrorClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Transport => "transport",
			Self::Rejected => "rejected",
			Self::NotFound => "not_found",
			Self::Conflict => "conflict",
		}
	}
}

impl fmt::Display for ErrorClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Structured error returned by the store, carrying a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
	pub class: ErrorClass,
	pub message: String,
}

impl StoreError {
	pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
		Self {
			class,
			message: message.into(),
		}
	}

	pub fn transport(message: impl Into<String>) -> Self {
		Self::new(ErrorClass::Transport, message)
	}

	pub fn rejected(message: impl Into<String>) -> Self {
		Self::new(ErrorClass::Rejected, message)
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self::new(ErrorClass::NotFound, message)
	}

	pub fn conflict(message: impl Into<String>) -> Self {
		Self::new(ErrorClass::Conflict, message)
	}
}

pub type Result<T> = std::result::Result<T, StoreError>;
