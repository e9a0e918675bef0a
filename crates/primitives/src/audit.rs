use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created and last updated an entity, and when.
///
/// Stamped by the store; the client never writes these fields directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
	pub created_by: String,
	pub created_at: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_by: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<DateTime<Utc>>,
}

impl Audit {
	pub fn created(actor: impl Into<String>, at: DateTime<Utc>) -> Self {
		Self {
			created_by: actor.into(),
			created_at: at,
			updated_by: None,
			updated_at: None,
		}
	}

	/// Records an update by `actor`.
	pub fn touch(&mut self, actor: impl Into<String>, at: DateTime<Utc>) {
		self.updated_by = Some(actor.into());
		self.updated_at = Some(at);
	}

	pub fn is_updated(&self) -> bool {
		self.updated_by.is_some()
	}
}
