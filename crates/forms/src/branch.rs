//! Discriminator-driven field visibility.
//!
//! A discriminator field (payment `type`) selects a branch; each branch owns a
//! set of exclusive fields. Switching branches clears the exclusive fields of
//! every other branch. The transition runs only when the branch actually
//! changes: re-selecting the current value writes nothing.

use chairside_primitives::{FieldValue, Fields, PaymentType};

/// One selectable value and the fields only it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchSpec {
	pub value: &'static str,
	pub exclusive: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discriminator {
	pub field: &'static str,
	pub branches: &'static [BranchSpec],
}

/// Payment `type` selector.
pub const PAYMENT_TYPE: Discriminator = Discriminator {
	field: "type",
	branches: &[
		BranchSpec {
			value: "Full Payment",
			exclusive: &["remarks"],
		},
		BranchSpec {
			value: "Installment",
			exclusive: &["planName"],
		},
	],
};

/// Result of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
	/// The selected branch was already active.
	Unchanged,
	/// Branch switched; lists the fields that were cleared.
	Switched { from: Option<&'static str>, to: Option<&'static str>, cleared: Vec<&'static str> },
}

impl Discriminator {
	/// Active branch for the current values, if the discriminator holds a known value.
	pub fn branch(&self, values: &Fields) -> Option<&'static BranchSpec> {
		let current = values.get(self.field).as_text()?;
		self.branches.iter().find(|branch| branch.value == current)
	}

	pub fn is_exclusive(&self, field: &str) -> bool {
		self.branches.iter().any(|branch| branch.exclusive.contains(&field))
	}

	/// Sets the discriminator to `value` and clears other branches' fields.
	///
	/// Unknown values deselect every branch; exclusive fields of the previously
	/// active branch are cleared so nothing stale survives a deselection.
	pub fn select(&self, values: &mut Fields, value: impl Into<FieldValue>) -> Transition {
		let value = value.into();
		let from = self.branch(values);
		if values.get(self.field) == &value {
			return Transition::Unchanged;
		}
		values.set(self.field, value);
		let to = self.branch(values);
		if from == to {
			return Transition::Unchanged;
		}

		let mut cleared = Vec::new();
		for branch in self.branches.iter().filter(|branch| Some(*branch) != to) {
			for &field in branch.exclusive {
				if !values.get(field).is_empty() {
					cleared.push(field);
				}
				if values.contains(field) {
					values.set(field, "");
				}
			}
		}
		tracing::trace!(field = self.field, from = ?from.map(|b| b.value), to = ?to.map(|b| b.value), ?cleared, "form.branch");
		Transition::Switched {
			from: from.map(|branch| branch.value),
			to: to.map(|branch| branch.value),
			cleared,
		}
	}
}

/// Typed view of the payment selector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentBranch {
	#[default]
	Unselected,
	FullPayment,
	Installment,
}

impl PaymentBranch {
	pub fn of(values: &Fields) -> Self {
		match PAYMENT_TYPE.branch(values).and_then(|branch| branch.value.parse::<PaymentType>().ok()) {
			Some(PaymentType::FullPayment) => Self::FullPayment,
			Some(PaymentType::Installment) => Self::Installment,
			None => Self::Unselected,
		}
	}

	/// Exclusive field shown in this state, if any.
	pub const fn exclusive_field(self) -> Option<&'static str> {
		match self {
			Self::Unselected => None,
			Self::FullPayment => Some("remarks"),
			Self::Installment => Some("planName"),
		}
	}
}
