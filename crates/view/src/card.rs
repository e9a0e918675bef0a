use chairside_primitives::{Capabilities, EntityId, EntityKind, InstallmentPayment};
use chairside_store::SharedCache;
use chairside_workflow::{Destination, Routes};

use crate::audit::{AuditRows, AuditStyle};
use crate::format::{Money, card_date};
use crate::prompt::DeletePrompt;

/// One installment in a payment's installment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentPaymentCard {
	pub id: EntityId,
	pub date: String,
	pub amount: String,
	/// Omitted when blank.
	pub remarks: Option<String>,
	pub audit: AuditRows,
	pub edit: Destination,
	/// Present only when the role may delete.
	pub delete: Option<DeletePrompt>,
}

impl InstallmentPaymentCard {
	pub fn new(installment: &InstallmentPayment, patient: &EntityId, caps: Capabilities, money: &Money, routes: &Routes) -> Self {
		Self {
			id: installment.id.clone(),
			date: card_date(installment.date),
			amount: money.format(installment.amount),
			remarks: Some(installment.remarks.clone()).filter(|remarks| !remarks.is_empty()),
			audit: AuditRows::new(&installment.audit, caps, AuditStyle::Card),
			edit: routes.installment_payment(patient, &installment.payment, &installment.id),
			delete: caps.delete.then(|| DeletePrompt::for_installment(installment)),
		}
	}

	/// Card for a cached installment, `None` until it is loaded.
	pub fn from_cache(
		cache: &SharedCache,
		id: &EntityId,
		patient: &EntityId,
		caps: Capabilities,
		money: &Money,
		routes: &Routes,
	) -> Option<Self> {
		let entity = cache.get(EntityKind::InstallmentPayment, id)?;
		let installment = entity.as_installment_payment()?;
		Some(Self::new(installment, patient, caps, money, routes))
	}
}
