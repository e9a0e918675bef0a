//! Entity records.
//!
//! Each record converts to and from a [`Fields`] map using the wire field names
//! of its form (`planName`, not `plan_name`). Partial updates merge the payload
//! over the current field map and rebuild, so a patch is checked exactly like a
//! create.

use serde::{Deserialize, Serialize};

use crate::{Audit, EntityId, EntityKind, FieldError, FieldValue, Fields, PaymentType};

/// A persisted record type.
pub trait Record: Sized {
	const KIND: EntityKind;
	/// Wire names of every attribute accepted in a payload.
	const FIELDS: &'static [&'static str];

	fn build(id: EntityId, audit: Audit, fields: &Fields) -> Result<Self, FieldError>;

	fn to_fields(&self) -> Fields;

	fn id(&self) -> &EntityId;

	fn audit(&self) -> &Audit;

	fn audit_mut(&mut self) -> &mut Audit;

	/// Parent entity for scoped collections.
	fn parent(&self) -> Option<&EntityId> {
		None
	}

	/// Applies a partial payload. On error the record is left unchanged.
	fn patch(&mut self, fields: &Fields) -> Result<(), FieldError> {
		fields.ensure_known(Self::FIELDS)?;
		let mut merged = self.to_fields();
		for (name, value) in fields.iter() {
			merged.set(name, value.clone());
		}
		*self = Self::build(self.id().clone(), self.audit().clone(), &merged)?;
		Ok(())
	}
}

macro_rules! impl_record_accessors {
	() => {
		fn id(&self) -> &EntityId {
			&self.id
		}

		fn audit(&self) -> &Audit {
			&self.audit
		}

		fn audit_mut(&mut self) -> &mut Audit {
			&mut self.audit
		}
	};
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
	pub id: EntityId,
	pub fname: String,
	pub mname: String,
	pub lname: String,
	#[serde(flatten)]
	pub audit: Audit,
}

impl Patient {
	/// Non-empty name parts joined by single spaces.
	pub fn full_name(&self) -> String {
		[&self.fname, &self.mname, &self.lname]
			.into_iter()
			.map(|part| part.trim())
			.filter(|part| !part.is_empty())
			.collect::<Vec<_>>()
			.join(" ")
	}
}

impl Record for Patient {
	const KIND: EntityKind = EntityKind::Patient;
	const FIELDS: &'static [&'static str] = &["fname", "mname", "lname"];

	fn build(id: EntityId, audit: Audit, fields: &Fields) -> Result<Self, FieldError> {
		fields.ensure_known(Self::FIELDS)?;
		Ok(Self {
			id,
			fname: fields.require_text("fname")?,
			mname: fields.optional_text("mname")?,
			lname: fields.require_text("lname")?,
			audit,
		})
	}

	fn to_fields(&self) -> Fields {
		Fields::new()
			.with("fname", self.fname.as_str())
			.with("mname", self.mname.as_str())
			.with("lname", self.lname.as_str())
	}

	impl_record_accessors!();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
	pub id: EntityId,
	pub patient: EntityId,
	/// Unix seconds.
	pub date: i64,
	#[serde(rename = "type")]
	pub payment_type: PaymentType,
	pub total: f64,
	#[serde(default)]
	pub remarks: String,
	#[serde(default)]
	pub plan_name: String,
	#[serde(flatten)]
	pub audit: Audit,
}

impl Record for Payment {
	const KIND: EntityKind = EntityKind::Payment;
	const FIELDS: &'static [&'static str] = &["patient", "date", "type", "total", "remarks", "planName"];

	fn build(id: EntityId, audit: Audit, fields: &Fields) -> Result<Self, FieldError> {
		fields.ensure_known(Self::FIELDS)?;
		Ok(Self {
			id,
			patient: fields.require_text("patient")?.into(),
			date: fields.require_date("date")?,
			payment_type: fields.require_text("type")?.parse()?,
			total: fields.require_number("total")?,
			remarks: fields.optional_text("remarks")?,
			plan_name: fields.optional_text("planName")?,
			audit,
		})
	}

	fn to_fields(&self) -> Fields {
		Fields::new()
			.with("patient", self.patient.as_str())
			.with("date", FieldValue::Date(self.date))
			.with("type", self.payment_type.as_str())
			.with("total", self.total)
			.with("remarks", self.remarks.as_str())
			.with("planName", self.plan_name.as_str())
	}

	fn parent(&self) -> Option<&EntityId> {
		Some(&self.patient)
	}

	impl_record_accessors!();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPayment {
	pub id: EntityId,
	pub payment: EntityId,
	/// Unix seconds.
	pub date: i64,
	pub amount: f64,
	#[serde(default)]
	pub remarks: String,
	#[serde(flatten)]
	pub audit: Audit,
}

impl Record for InstallmentPayment {
	const KIND: EntityKind = EntityKind::InstallmentPayment;
	const FIELDS: &'static [&'static str] = &["payment", "date", "amount", "remarks"];

	fn build(id: EntityId, audit: Audit, fields: &Fields) -> Result<Self, FieldError> {
		fields.ensure_known(Self::FIELDS)?;
		Ok(Self {
			id,
			payment: fields.require_text("payment")?.into(),
			date: fields.require_date("date")?,
			amount: fields.require_number("amount")?,
			remarks: fields.optional_text("remarks")?,
			audit,
		})
	}

	fn to_fields(&self) -> Fields {
		Fields::new()
			.with("payment", self.payment.as_str())
			.with("date", FieldValue::Date(self.date))
			.with("amount", self.amount)
			.with("remarks", self.remarks.as_str())
	}

	fn parent(&self) -> Option<&EntityId> {
		Some(&self.payment)
	}

	impl_record_accessors!();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
	pub id: EntityId,
	pub name: String,
	pub amount: f64,
	#[serde(flatten)]
	pub audit: Audit,
}

impl Record for Procedure {
	const KIND: EntityKind = EntityKind::Procedure;
	const FIELDS: &'static [&'static str] = &["name", "amount"];

	fn build(id: EntityId, audit: Audit, fields: &Fields) -> Result<Self, FieldError> {
		fields.ensure_known(Self::FIELDS)?;
		Ok(Self {
			id,
			name: fields.require_text("name")?,
			amount: fields.require_number("amount")?,
			audit,
		})
	}

	fn to_fields(&self) -> Fields {
		Fields::new().with("name", self.name.as_str()).with("amount", self.amount)
	}

	impl_record_accessors!();
}

/// Any persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
	Patient(Patient),
	Payment(Payment),
	InstallmentPayment(InstallmentPayment),
	Procedure(Procedure),
}

macro_rules! dispatch {
	($entity:expr, $record:ident => $body:expr) => {
		match $entity {
			Entity::Patient($record) => $body,
			Entity::Payment($record) => $body,
			Entity::InstallmentPayment($record) => $body,
			Entity::Procedure($record) => $body,
		}
	};
}

impl Entity {
	/// Builds a record of `kind` from a full payload.
	pub fn build(kind: EntityKind, id: EntityId, audit: Audit, fields: &Fields) -> Result<Self, FieldError> {
		Ok(match kind {
			EntityKind::Patient => Self::Patient(Patient::build(id, audit, fields)?),
			EntityKind::Payment => Self::Payment(Payment::build(id, audit, fields)?),
			EntityKind::InstallmentPayment => Self::InstallmentPayment(InstallmentPayment::build(id, audit, fields)?),
			EntityKind::Procedure => Self::Procedure(Procedure::build(id, audit, fields)?),
		})
	}

	pub fn kind(&self) -> EntityKind {
		match self {
			Self::Patient(_) => EntityKind::Patient,
			Self::Payment(_) => EntityKind::Payment,
			Self::InstallmentPayment(_) => EntityKind::InstallmentPayment,
			Self::Procedure(_) => EntityKind::Procedure,
		}
	}

	pub fn id(&self) -> &EntityId {
		dispatch!(self, record => record.id())
	}

	pub fn audit(&self) -> &Audit {
		dispatch!(self, record => record.audit())
	}

	pub fn audit_mut(&mut self) -> &mut Audit {
		dispatch!(self, record => record.audit_mut())
	}

	pub fn parent(&self) -> Option<&EntityId> {
		dispatch!(self, record => record.parent())
	}

	pub fn to_fields(&self) -> Fields {
		dispatch!(self, record => record.to_fields())
	}

	pub fn patch(&mut self, fields: &Fields) -> Result<(), FieldError> {
		dispatch!(self, record => record.patch(fields))
	}

	pub fn as_payment(&self) -> Option<&Payment> {
		match self {
			Self::Payment(payment) => Some(payment),
			_ => None,
		}
	}

	pub fn as_procedure(&self) -> Option<&Procedure> {
		match self {
			Self::Procedure(procedure) => Some(procedure),
			_ => None,
		}
	}

	pub fn as_installment_payment(&self) -> Option<&InstallmentPayment> {
		match self {
			Self::InstallmentPayment(installment) => Some(installment),
			_ => None,
		}
	}

	pub fn as_patient(&self) -> Option<&Patient> {
		match self {
			Self::Patient(patient) => Some(patient),
			_ => None,
		}
	}
}
