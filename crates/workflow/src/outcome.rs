use chairside_primitives::{Entity, EntityId};
use chairside_store::{ErrorClass, StoreError};
use thiserror::Error;

/// Terminal payload of a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
	/// Created or updated entity as the server returned it.
	Saved(Entity),
	Deleted(EntityId),
}

/// Lifecycle of one `execute` call.
///
/// Moves from `Pending` to exactly one of the terminal states and never back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationOutcome {
	#[default]
	Pending,
	Success(Settled),
	Failure(String),
}

impl MutationOutcome {
	pub fn is_pending(&self) -> bool {
		matches!(self, Self::Pending)
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	pub fn failure_message(&self) -> Option<&str> {
		match self {
			Self::Failure(message) => Some(message),
			_ => None,
		}
	}

	pub fn settled(&self) -> Option<&Settled> {
		match self {
			Self::Success(settled) => Some(settled),
			_ => None,
		}
	}
}

/// Remote failure, as classified at the controller boundary.
///
/// Both variants surface the same way, as a `Failure` carrying the server
/// message. Local validation failures never get this far; they stay in the
/// forms layer as `ValidationErrors`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
	/// Network or server failure; the user can re-submit.
	#[error("{0}")]
	Transport(String),
	/// Server refused the change because of stale or invalid state.
	#[error("{0}")]
	Conflict(String),
}

impl From<StoreError> for MutationError {
	fn from(error: StoreError) -> Self {
		match error.class {
			ErrorClass::Transport => Self::Transport(error.message),
			ErrorClass::Rejected | ErrorClass::NotFound | ErrorClass::Conflict => Self::Conflict(error.message),
		}
	}
}

impl From<Result<Settled, MutationError>> for MutationOutcome {
	fn from(result: Result<Settled, MutationError>) -> Self {
		match result {
			Ok(settled) => Self::Success(settled),
			Err(error) => Self::Failure(error.to_string()),
		}
	}
}
