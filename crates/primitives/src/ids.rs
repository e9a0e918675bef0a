use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, server-assigned entity identifier.
///
/// Ids are never parsed or generated client-side; they only round-trip between
/// the store, the cache and the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for EntityId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for EntityId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

/// The four persisted record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
	Patient,
	Payment,
	InstallmentPayment,
	Procedure,
}

impl EntityKind {
	pub const ALL: [Self; 4] = [Self::Patient, Self::Payment, Self::InstallmentPayment, Self::Procedure];

	/// Collection name used by the remote store and in routes.
	pub const fn collection(self) -> &'static str {
		match self {
			Self::Patient => "patients",
			Self::Payment => "payments",
			Self::InstallmentPayment => "installment-payments",
			Self::Procedure => "procedures",
		}
	}

	/// Human-facing singular label, used in notification copy.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Patient => "Patient",
			Self::Payment => "Payment",
			Self::InstallmentPayment => "Installment payment",
			Self::Procedure => "Procedure",
		}
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.collection())
	}
}

/// Key of one listed collection.
///
/// `scope` narrows a collection to the children of one parent entity, e.g. the
/// installment payments of a single payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionKey {
	pub kind: EntityKind,
	pub scope: Option<EntityId>,
}

impl CollectionKey {
	pub const fn all(kind: EntityKind) -> Self {
		Self { kind, scope: None }
	}

	pub fn scoped(kind: EntityKind, parent: impl Into<EntityId>) -> Self {
		Self {
			kind,
			scope: Some(parent.into()),
		}
	}

	/// Returns true if an entity of `kind` with the given parent belongs here.
	pub fn admits(&self, kind: EntityKind, parent: Option<&EntityId>) -> bool {
		self.kind == kind && self.scope.as_ref().is_none_or(|scope| Some(scope) == parent)
	}
}

impl fmt::Display for CollectionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.scope {
			Some(scope) => write!(f, "{}@{}", self.kind, scope),
			None => write!(f, "{}", self.kind),
		}
	}
}
