use chairside_primitives::{Entity, EntityId, EntityKind, InstallmentPayment, Payment};
use chairside_workflow::MutationRequest;

use crate::format::day_label;

/// Confirmation dialog for deleting a dated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
	pub kind: EntityKind,
	pub id: EntityId,
	pub heading: String,
	pub body: String,
}

impl DeletePrompt {
	pub fn dated(kind: EntityKind, id: EntityId, date: i64) -> Self {
		let label = kind.label();
		Self {
			kind,
			id,
			heading: format!("Delete {label}"),
			body: format!(
				"Are you sure you want to delete this {} with date of {}? This action cannot be undone.",
				label.to_lowercase(),
				day_label(date)
			),
		}
	}

	pub fn for_payment(payment: &Payment) -> Self {
		Self::dated(EntityKind::Payment, payment.id.clone(), payment.date)
	}

	pub fn for_installment(installment: &InstallmentPayment) -> Self {
		Self::dated(EntityKind::InstallmentPayment, installment.id.clone(), installment.date)
	}

	/// Prompt for any dated record; `None` for patients and procedures.
	pub fn for_entity(entity: &Entity) -> Option<Self> {
		match entity {
			Entity::Payment(payment) => Some(Self::for_payment(payment)),
			Entity::InstallmentPayment(installment) => Some(Self::for_installment(installment)),
			Entity::Patient(_) | Entity::Procedure(_) => None,
		}
	}

	/// Request issued when the user confirms.
	pub fn confirm(&self, actor: impl Into<String>) -> MutationRequest {
		MutationRequest::delete(self.kind, self.id.clone(), actor)
	}
}
