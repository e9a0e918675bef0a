//! Declarative field rules.
//!
//! A [`RuleSet`] lists, per field, the rules to check in order and an optional
//! visibility condition. Hidden fields are not validated. Each field reports
//! at most one message: the first rule it fails.

use std::collections::BTreeMap;
use std::fmt;

use chairside_primitives::{FieldValue, Fields};
use chrono::{DateTime, NaiveDate};

/// One check applied to a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
	/// Value must be non-empty.
	Required,
	/// Value must be non-empty when `field` currently equals `equals`.
	RequiredWhen { field: &'static str, equals: &'static str },
	/// Date (unix seconds) must fall on or before the given day (UTC).
	NotAfter(NaiveDate),
	/// Text must be one of the listed values.
	OneOf(&'static [&'static str]),
	/// Number must be strictly greater than zero.
	Positive,
	/// Number must be zero or greater.
	NonNegative,
	/// Text must be at most this many characters.
	MaxLen(usize),
}

impl Rule {
	/// Returns the failure message for `value`, or `None` if it passes.
	///
	/// Every rule except the required ones passes on an empty value, so
	/// optional fields may stay blank.
	fn check(&self, label: &str, value: &FieldValue, values: &Fields) -> Option<String> {
		match self {
			Self::Required => value.is_empty().then(|| format!("{label} is required")),
			Self::RequiredWhen { field, equals } => {
				let active = values.get(field).as_text() == Some(*equals);
				(active && value.is_empty()).then(|| format!("{label} is required for {equals}"))
			}
			_ if value.is_empty() => None,
			Self::NotAfter(bound) => match value.as_date().and_then(|secs| DateTime::from_timestamp(secs, 0)) {
				Some(at) if at.date_naive() <= *bound => None,
				Some(_) => Some(format!("{label} cannot be in the future")),
				None => Some(format!("{label} must be a valid date")),
			},
			Self::OneOf(choices) => match value.as_text() {
				Some(text) if choices.contains(&text) => None,
				_ => Some(format!("{label} must be one of: {}", choices.join(", "))),
			},
			Self::Positive => match value.as_number() {
				Some(n) if n > 0.0 => None,
				Some(_) => Some(format!("{label} must be greater than 0")),
				None => Some(format!("{label} must be a number")),
			},
			Self::NonNegative => match value.as_number() {
				Some(n) if n >= 0.0 => None,
				Some(_) => Some(format!("{label} cannot be negative")),
				None => Some(format!("{label} must be a number")),
			},
			Self::MaxLen(max) => match value.as_text() {
				Some(text) if text.chars().count() > *max => Some(format!("{label} must be at most {max} characters")),
				_ => None,
			},
		}
	}

	fn requires(&self, values: &Fields) -> bool {
		match self {
			Self::Required => true,
			Self::RequiredWhen { field, equals } => values.get(field).as_text() == Some(*equals),
			_ => false,
		}
	}
}

/// Rules and visibility for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
	pub name: &'static str,
	pub label: &'static str,
	pub rules: Vec<Rule>,
	/// Field is shown only while `(field, value)` holds.
	pub visible_when: Option<(&'static str, &'static str)>,
}

impl FieldRules {
	pub fn new(name: &'static str, label: &'static str) -> Self {
		Self {
			name,
			label,
			rules: Vec::new(),
			visible_when: None,
		}
	}

	pub fn rule(mut self, rule: Rule) -> Self {
		self.rules.push(rule);
		self
	}

	pub fn visible_when(mut self, field: &'static str, value: &'static str) -> Self {
		self.visible_when = Some((field, value));
		self
	}

	pub fn is_visible(&self, values: &Fields) -> bool {
		self.visible_when
			.is_none_or(|(field, value)| values.get(field).as_text() == Some(value))
	}

	/// Required given the current values (static or conditional).
	pub fn is_required(&self, values: &Fields) -> bool {
		self.rules.iter().any(|rule| rule.requires(values))
	}

	fn first_failure(&self, values: &Fields) -> Option<String> {
		let value = values.get(self.name);
		self.rules.iter().find_map(|rule| rule.check(self.label, value, values))
	}
}

/// Ordered rules for every field of a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
	fields: Vec<FieldRules>,
}

impl RuleSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn field(mut self, rules: FieldRules) -> Self {
		self.fields.push(rules);
		self
	}

	pub fn fields(&self) -> &[FieldRules] {
		&self.fields
	}

	pub fn get(&self, name: &str) -> Option<&FieldRules> {
		self.fields.iter().find(|field| field.name == name)
	}

	/// Names of the fields shown for the current values.
	pub fn visible<'a>(&'a self, values: &'a Fields) -> impl Iterator<Item = &'static str> + 'a {
		self.fields.iter().filter(|field| field.is_visible(values)).map(|field| field.name)
	}

	/// Names of the visible fields that are currently required.
	pub fn required_visible<'a>(&'a self, values: &'a Fields) -> impl Iterator<Item = &'static str> + 'a {
		self.fields
			.iter()
			.filter(|field| field.is_visible(values) && field.is_required(values))
			.map(|field| field.name)
	}

	pub fn validate(&self, values: &Fields) -> ValidationResult {
		let errors: BTreeMap<String, String> = self
			.fields
			.iter()
			.filter(|field| field.is_visible(values))
			.filter_map(|field| field.first_failure(values).map(|message| (field.name.to_string(), message)))
			.collect();
		if errors.is_empty() {
			ValidationResult::Valid
		} else {
			ValidationResult::Invalid(ValidationErrors(errors))
		}
	}
}

/// Field name to message, for every failing visible field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub BTreeMap<String, String>);

impl ValidationErrors {
	pub fn get(&self, field: &str) -> Option<&str> {
		self.0.get(field).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl fmt::Display for ValidationErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("validation failed")?;
		for (i, (field, message)) in self.0.iter().enumerate() {
			let sep = if i == 0 { ": " } else { "; " };
			write!(f, "{sep}{field}: {message}")?;
		}
		Ok(())
	}
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
	Valid,
	Invalid(ValidationErrors),
}

impl ValidationResult {
	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid)
	}

	pub fn into_result(self) -> Result<(), ValidationErrors> {
		match self {
			Self::Valid => Ok(()),
			Self::Invalid(errors) => Err(errors),
		}
	}

	/// Errors, empty when valid.
	pub fn errors(&self) -> ValidationErrors {
		match self {
			Self::Valid => ValidationErrors::default(),
			Self::Invalid(errors) => errors.clone(),
		}
	}
}

/// Validates `values` against `rules`.
pub fn validate(values: &Fields, rules: &RuleSet) -> ValidationResult {
	rules.validate(values)
}
