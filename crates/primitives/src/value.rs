//! Field values for form state and mutation payloads.
//!
//! Form inputs arrive loosely typed (text boxes hold numbers, date pickers hold
//! unix seconds), so values are stored as [`FieldValue`] and coerced at the
//! point where a record is built. Coercion mirrors what the input widgets
//! produce: numeric text parses as a number, integral numbers read as dates.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	/// No value entered.
	#[default]
	Empty,
	Text(String),
	Number(f64),
	/// Unix seconds.
	Date(i64),
}

impl FieldValue {
	pub fn text(value: impl Into<String>) -> Self {
		Self::Text(value.into())
	}

	/// Returns true for values the readiness gate treats as unfilled.
	///
	/// Only an absent value or the empty string count; whitespace and zero are
	/// left for the validation rules to reject.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Empty => true,
			Self::Text(text) => text.is_empty(),
			Self::Number(_) | Self::Date(_) => false,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			Self::Date(secs) => Some(*secs as f64),
			Self::Text(text) => text.trim().parse().ok(),
			Self::Empty => None,
		}
	}

	pub fn as_date(&self) -> Option<i64> {
		match self {
			Self::Date(secs) => Some(*secs),
			Self::Number(n) if n.fract() == 0.0 => Some(*n as i64),
			Self::Text(text) => text.trim().parse().ok(),
			_ => None,
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Empty => Ok(()),
			Self::Text(text) => f.write_str(text),
			Self::Number(n) => write!(f, "{n}"),
			Self::Date(secs) => write!(f, "{secs}"),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::text(value)
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

/// Errors building or patching a record from [`Fields`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
	#[error("missing required field: {0}")]
	Missing(&'static str),
	#[error("field {field} expected {expected}")]
	Mismatch { field: &'static str, expected: &'static str },
	#[error("unknown field: {0}")]
	Unknown(String),
	#[error("invalid value for {field}: {value}")]
	InvalidChoice { field: &'static str, value: String },
}

/// Ordered field map used for form values and mutation payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(IndexMap<String, FieldValue>);

impl Fields {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.set(name, value);
		self
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
		self.0.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> &FieldValue {
		static EMPTY: FieldValue = FieldValue::Empty;
		self.0.get(name).unwrap_or(&EMPTY)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
		self.0.shift_remove(name)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Rejects any field not in `known`.
	pub fn ensure_known(&self, known: &[&str]) -> Result<(), FieldError> {
		match self.0.keys().find(|name| !known.contains(&name.as_str())) {
			Some(name) => Err(FieldError::Unknown(name.clone())),
			None => Ok(()),
		}
	}

	/// Required non-empty text.
	pub fn require_text(&self, field: &'static str) -> Result<String, FieldError> {
		match self.get(field) {
			FieldValue::Empty => Err(FieldError::Missing(field)),
			FieldValue::Text(text) if text.is_empty() => Err(FieldError::Missing(field)),
			FieldValue::Text(text) => Ok(text.clone()),
			_ => Err(FieldError::Mismatch { field, expected: "text" }),
		}
	}

	/// Optional text; absent and empty both read as the empty string.
	pub fn optional_text(&self, field: &'static str) -> Result<String, FieldError> {
		match self.get(field) {
			FieldValue::Empty => Ok(String::new()),
			FieldValue::Text(text) => Ok(text.clone()),
			_ => Err(FieldError::Mismatch { field, expected: "text" }),
		}
	}

	pub fn require_number(&self, field: &'static str) -> Result<f64, FieldError> {
		let value = self.get(field);
		if value.is_empty() {
			return Err(FieldError::Missing(field));
		}
		value.as_number().ok_or(FieldError::Mismatch { field, expected: "number" })
	}

	pub fn require_date(&self, field: &'static str) -> Result<i64, FieldError> {
		let value = self.get(field);
		if value.is_empty() {
			return Err(FieldError::Missing(field));
		}
		value.as_date().ok_or(FieldError::Mismatch { field, expected: "date" })
	}
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
