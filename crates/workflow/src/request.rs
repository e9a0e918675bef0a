use std::fmt;

use chairside_primitives::{EntityId, EntityKind, Fields};

/// What a request does to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOp {
	Create,
	Update(EntityId),
	Delete(EntityId),
}

impl MutationOp {
	pub const fn verb(&self) -> &'static str {
		match self {
			Self::Create => "create",
			Self::Update(_) => "update",
			Self::Delete(_) => "delete",
		}
	}

	pub fn target(&self) -> Option<&EntityId> {
		match self {
			Self::Create => None,
			Self::Update(id) | Self::Delete(id) => Some(id),
		}
	}
}

/// A user-initiated create, update or delete against the store.
///
/// `actor` is stamped as `createdBy` on create and `updatedBy` on update.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
	pub kind: EntityKind,
	pub op: MutationOp,
	pub payload: Fields,
	pub actor: String,
}

impl MutationRequest {
	pub fn create(kind: EntityKind, payload: Fields, actor: impl Into<String>) -> Self {
		Self {
			kind,
			op: MutationOp::Create,
			payload,
			actor: actor.into(),
		}
	}

	pub fn update(kind: EntityKind, id: EntityId, payload: Fields, actor: impl Into<String>) -> Self {
		Self {
			kind,
			op: MutationOp::Update(id),
			payload,
			actor: actor.into(),
		}
	}

	pub fn delete(kind: EntityKind, id: EntityId, actor: impl Into<String>) -> Self {
		Self {
			kind,
			op: MutationOp::Delete(id),
			payload: Fields::new(),
			actor: actor.into(),
		}
	}

	/// Target id, absent on create.
	pub fn target(&self) -> Option<&EntityId> {
		self.op.target()
	}

	pub fn target_key(&self) -> TargetKey {
		TargetKey {
			kind: self.kind,
			id: self.target().cloned(),
		}
	}
}

/// Key the submit gate locks on: `(kind, id)`, or `(kind, new)` for creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetKey {
	pub kind: EntityKind,
	pub id: Option<EntityId>,
}

impl fmt::Display for TargetKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.id {
			Some(id) => write!(f, "{}/{id}", self.kind),
			None => write!(f, "{}/new", self.kind),
		}
	}
}
