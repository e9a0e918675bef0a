//! Created/updated rows shown to privileged roles.

use chairside_primitives::{Audit, Capabilities, Entity};

use crate::format::{long_timestamp, short_date};

/// Where the rows are rendered; picks labels and timestamp precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStyle {
	/// Record cards: short dates.
	Card,
	/// Read-only fields in edit forms: full timestamps.
	Form,
}

impl AuditStyle {
	const fn labels(self) -> [&'static str; 4] {
		match self {
			Self::Card => ["Created By", "Creation Date", "Updated By", "Last Updated"],
			Self::Form => ["Created By", "Created at", "Updated By", "Updated at"],
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
	pub label: &'static str,
	pub value: String,
}

/// Audit rows for one record. Empty unless the role may view audit fields;
/// the updated rows appear only once the record has been updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditRows(Vec<AuditRow>);

impl AuditRows {
	pub fn new(audit: &Audit, caps: Capabilities, style: AuditStyle) -> Self {
		if !caps.view_audit {
			return Self::default();
		}
		let [created_by, created_at, updated_by, updated_at] = style.labels();
		let stamp = |at| match style {
			AuditStyle::Card => short_date(at),
			AuditStyle::Form => long_timestamp(at),
		};

		let mut rows = vec![
			AuditRow {
				label: created_by,
				value: audit.created_by.clone(),
			},
			AuditRow {
				label: created_at,
				value: stamp(audit.created_at),
			},
		];
		if let Some(by) = &audit.updated_by {
			rows.push(AuditRow {
				label: updated_by,
				value: by.clone(),
			});
			if let Some(at) = audit.updated_at {
				rows.push(AuditRow {
					label: updated_at,
					value: stamp(at),
				});
			}
		}
		Self(rows)
	}

	pub fn for_entity(entity: &Entity, caps: Capabilities, style: AuditStyle) -> Self {
		Self::new(entity.audit(), caps, style)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &AuditRow> {
		self.0.iter()
	}

	pub fn get(&self, label: &str) -> Option<&str> {
		self.0.iter().find(|row| row.label == label).map(|row| row.value.as_str())
	}
}
