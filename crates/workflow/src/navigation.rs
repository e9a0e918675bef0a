//! Post-success navigation.

use chairside_primitives::EntityId;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
	/// Return to the previous view.
	Back,
	Path(String),
}

pub trait Navigator {
	fn navigate(&self, destination: &Destination);
}

/// Navigator that records destinations instead of acting on them.
#[derive(Debug, Default)]
pub struct NavigationLog {
	entries: Mutex<Vec<Destination>>,
}

impl NavigationLog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn entries(&self) -> Vec<Destination> {
		self.entries.lock().clone()
	}

	pub fn take(&self) -> Vec<Destination> {
		std::mem::take(&mut *self.entries.lock())
	}
}

impl Navigator for NavigationLog {
	fn navigate(&self, destination: &Destination) {
		tracing::debug!(?destination, "navigation.record");
		self.entries.lock().push(destination.clone());
	}
}

/// Dashboard route builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
	base: String,
}

impl Default for Routes {
	fn default() -> Self {
		Self::new("/dash")
	}
}

impl Routes {
	pub fn new(base: impl Into<String>) -> Self {
		let base = base.into();
		Self {
			base: base.trim_end_matches('/').to_string(),
		}
	}

	pub fn base(&self) -> &str {
		&self.base
	}

	pub fn patient(&self, patient: &EntityId) -> Destination {
		self.path(format!("patients/{patient}"))
	}

	pub fn new_appointment(&self, patient: &EntityId) -> Destination {
		self.path(format!("appointments/new?patientId={patient}"))
	}

	pub fn installment_payment(&self, patient: &EntityId, payment: &EntityId, installment: &EntityId) -> Destination {
		self.path(format!("patients/{patient}/payments/{payment}/installment-payment/{installment}"))
	}

	pub fn procedures(&self) -> Destination {
		self.path("procedures".to_string())
	}

	pub fn new_procedure(&self) -> Destination {
		self.path("procedures/new".to_string())
	}

	fn path(&self, rest: String) -> Destination {
		Destination::Path(format!("{}/{rest}", self.base))
	}
}
