//! Live form state.
//!
//! Values are re-validated on every change. Errors are tracked from the start
//! but only surfaced once a submit has been attempted, so a half-filled form
//! shows no red text. The submit control reads [`FormState::submit_enabled`].

use chairside_primitives::{EntityKind, FieldValue, Fields};
use thiserror::Error;

use crate::rules::{ValidationErrors, ValidationResult};
use crate::schema::{FormSchema, Readiness};

/// Why [`FormState::begin_submit`] refused to produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
	#[error("a submission is already in flight")]
	InFlight,
	#[error("required fields are empty")]
	NotReady,
	#[error(transparent)]
	Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Clone)]
pub struct FormState {
	schema: FormSchema,
	defaults: Fields,
	values: Fields,
	validation: ValidationResult,
	submit_attempted: bool,
	submitting: bool,
}

impl FormState {
	pub fn new(schema: FormSchema, defaults: Fields) -> Self {
		let validation = schema.rules.validate(&defaults);
		Self {
			schema,
			values: defaults.clone(),
			defaults,
			validation,
			submit_attempted: false,
			submitting: false,
		}
	}

	pub fn kind(&self) -> EntityKind {
		self.schema.kind
	}

	pub fn schema(&self) -> &FormSchema {
		&self.schema
	}

	pub fn values(&self) -> &Fields {
		&self.values
	}

	pub fn value(&self, name: &str) -> &FieldValue {
		self.values.get(name)
	}

	/// Sets one field and re-validates.
	///
	/// Writing the discriminator goes through its transition handler, which
	/// clears the other branches' fields only when the branch changes.
	pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
		match self.schema.discriminator {
			Some(discriminator) if discriminator.field == name => {
				discriminator.select(&mut self.values, value);
			}
			_ => self.values.set(name, value),
		}
		self.revalidate();
	}

	pub fn visible_fields(&self) -> Vec<&'static str> {
		self.schema.rules.visible(&self.values).collect()
	}

	pub fn is_visible(&self, name: &str) -> bool {
		self.schema.rules.get(name).is_some_and(|field| field.is_visible(&self.values))
	}

	/// True when any field differs from its default. Absent and empty text are
	/// the same value.
	pub fn is_dirty(&self) -> bool {
		let differs = |a: &FieldValue, b: &FieldValue| !(a == b || (a.is_empty() && b.is_empty()));
		self.values.iter().any(|(name, value)| differs(value, self.defaults.get(name)))
			|| self.defaults.iter().any(|(name, value)| differs(value, self.values.get(name)))
	}

	pub fn is_submitting(&self) -> bool {
		self.submitting
	}

	/// Readiness gate, independent of full validation.
	pub fn is_ready(&self) -> bool {
		match self.schema.readiness {
			Readiness::RequiredFilled => self
				.schema
				.rules
				.required_visible(&self.values)
				.all(|name| !self.values.get(name).is_empty()),
			Readiness::Dirty => self.is_dirty(),
		}
	}

	pub fn submit_enabled(&self) -> bool {
		!self.submitting && self.is_ready()
	}

	/// Current validation outcome, whether or not it is shown yet.
	pub fn validation(&self) -> &ValidationResult {
		&self.validation
	}

	/// Field error to display, once a submit has been attempted.
	pub fn error(&self, name: &str) -> Option<&str> {
		if !self.submit_attempted {
			return None;
		}
		match &self.validation {
			ValidationResult::Invalid(errors) => errors.get(name),
			ValidationResult::Valid => None,
		}
	}

	pub fn errors_visible(&self) -> bool {
		self.submit_attempted && !self.validation.is_valid()
	}

	/// Attempts a submit. On success the form is marked submitting and the
	/// payload of visible fields is returned.
	pub fn begin_submit(&mut self) -> Result<Fields, SubmitBlocked> {
		if self.submitting {
			return Err(SubmitBlocked::InFlight);
		}
		self.submit_attempted = true;
		if !self.is_ready() {
			return Err(SubmitBlocked::NotReady);
		}
		self.validation.clone().into_result()?;
		self.submitting = true;
		let payload = self
			.schema
			.rules
			.visible(&self.values)
			.map(|name| (name, self.values.get(name).clone()))
			.collect();
		tracing::debug!(kind = %self.schema.kind, "form.submit");
		Ok(payload)
	}

	/// Ends a submission. `reset` restores the defaults, as after a successful create.
	pub fn finish_submit(&mut self, reset: bool) {
		self.submitting = false;
		if reset {
			self.reset();
		}
	}

	pub fn reset(&mut self) {
		self.values = self.defaults.clone();
		self.submit_attempted = false;
		self.submitting = false;
		self.revalidate();
	}

	/// Replaces the defaults, e.g. after an edit was saved.
	pub fn rebase(&mut self, defaults: Fields) {
		self.defaults = defaults;
		self.reset();
	}

	fn revalidate(&mut self) {
		self.validation = self.schema.rules.validate(&self.values);
	}
}
