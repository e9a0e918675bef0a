//! Rule sets and readiness policy for each entity form.

use chairside_primitives::{EntityKind, PaymentType};
use chrono::NaiveDate;

use crate::branch::{Discriminator, PAYMENT_TYPE};
use crate::rules::{FieldRules, Rule, RuleSet};

const NAME_MAX: usize = 100;
const REMARKS_MAX: usize = 500;

/// When the submit control becomes enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
	/// Every visible required field holds a value.
	RequiredFilled,
	/// Some value differs from the form defaults.
	Dirty,
}

/// Everything a form needs besides its values.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
	pub kind: EntityKind,
	pub rules: RuleSet,
	pub discriminator: Option<Discriminator>,
	pub readiness: Readiness,
}

impl FormSchema {
	pub fn new(kind: EntityKind, rules: RuleSet) -> Self {
		Self {
			kind,
			rules,
			discriminator: None,
			readiness: Readiness::RequiredFilled,
		}
	}

	pub fn with_discriminator(mut self, discriminator: Discriminator) -> Self {
		self.discriminator = Some(discriminator);
		self
	}

	pub fn with_readiness(mut self, readiness: Readiness) -> Self {
		self.readiness = readiness;
		self
	}

	/// New payment. `today` bounds the payment date.
	pub fn new_payment(today: NaiveDate) -> Self {
		let rules = RuleSet::new()
			.field(FieldRules::new("patient", "Patient").rule(Rule::Required))
			.field(
				FieldRules::new("date", "Date")
					.rule(Rule::Required)
					.rule(Rule::NotAfter(today)),
			)
			.field(
				FieldRules::new("type", "Payment type")
					.rule(Rule::Required)
					.rule(Rule::OneOf(PaymentType::choices())),
			)
			.field(FieldRules::new("total", "Total").rule(Rule::Required).rule(Rule::Positive))
			.field(
				FieldRules::new("remarks", "Remarks")
					.rule(Rule::RequiredWhen {
						field: "type",
						equals: PaymentType::FullPayment.as_str(),
					})
					.rule(Rule::MaxLen(REMARKS_MAX))
					.visible_when("type", PaymentType::FullPayment.as_str()),
			)
			.field(
				FieldRules::new("planName", "Plan name")
					.rule(Rule::RequiredWhen {
						field: "type",
						equals: PaymentType::Installment.as_str(),
					})
					.rule(Rule::MaxLen(NAME_MAX))
					.visible_when("type", PaymentType::Installment.as_str()),
			);
		Self::new(EntityKind::Payment, rules).with_discriminator(PAYMENT_TYPE)
	}

	/// New or edited installment against an existing payment.
	pub fn installment_payment(today: NaiveDate) -> Self {
		let rules = RuleSet::new()
			.field(FieldRules::new("payment", "Payment").rule(Rule::Required))
			.field(
				FieldRules::new("date", "Date of payment")
					.rule(Rule::Required)
					.rule(Rule::NotAfter(today)),
			)
			.field(FieldRules::new("amount", "Amount").rule(Rule::Required).rule(Rule::Positive))
			.field(FieldRules::new("remarks", "Remarks").rule(Rule::MaxLen(REMARKS_MAX)));
		Self::new(EntityKind::InstallmentPayment, rules)
	}

	pub fn new_procedure() -> Self {
		Self::new(EntityKind::Procedure, procedure_rules())
	}

	/// Editing enables submit only once something changed.
	pub fn edit_procedure() -> Self {
		Self::new(EntityKind::Procedure, procedure_rules()).with_readiness(Readiness::Dirty)
	}

	pub fn new_patient() -> Self {
		let rules = RuleSet::new()
			.field(
				FieldRules::new("fname", "First name")
					.rule(Rule::Required)
					.rule(Rule::MaxLen(NAME_MAX)),
			)
			.field(FieldRules::new("mname", "Middle name").rule(Rule::MaxLen(NAME_MAX)))
			.field(
				FieldRules::new("lname", "Last name")
					.rule(Rule::Required)
					.rule(Rule::MaxLen(NAME_MAX)),
			);
		Self::new(EntityKind::Patient, rules)
	}
}

fn procedure_rules() -> RuleSet {
	RuleSet::new()
		.field(
			FieldRules::new("name", "Procedure name")
				.rule(Rule::Required)
				.rule(Rule::MaxLen(NAME_MAX)),
		)
		.field(
			FieldRules::new("amount", "Amount")
				.rule(Rule::Required)
				.rule(Rule::NonNegative),
		)
}
