use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FieldError;

/// How a payment is settled. Selects which optional payment fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
	#[serde(rename = "Full Payment")]
	FullPayment,
	#[serde(rename = "Installment")]
	Installment,
}

impl PaymentType {
	pub const ALL: [Self; 2] = [Self::FullPayment, Self::Installment];

	/// Display and wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::FullPayment => "Full Payment",
			Self::Installment => "Installment",
		}
	}

	/// Wire values of every variant, in selector order.
	pub const fn choices() -> &'static [&'static str] {
		&["Full Payment", "Installment"]
	}
}

impl fmt::Display for PaymentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PaymentType {
	type Err = FieldError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter().find(|ty| ty.as_str() == s).ok_or_else(|| FieldError::InvalidChoice {
			field: "type",
			value: s.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_wire_values() {
		assert_eq!("Full Payment".parse::<PaymentType>(), Ok(PaymentType::FullPayment));
		assert_eq!("Installment".parse::<PaymentType>(), Ok(PaymentType::Installment));
		assert!("Cash".parse::<PaymentType>().is_err());
	}

	#[test]
	fn choices_match_variants() {
		let names: Vec<_> = PaymentType::ALL.iter().map(|ty| ty.as_str()).collect();
		assert_eq!(names, PaymentType::choices());
	}
}
