use chairside_primitives::{CollectionKey, Entity, EntityId, EntityKind, Patient};
use chairside_store::SharedCache;
use chairside_workflow::{Destination, Routes};

/// Row in the patient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
	pub id: EntityId,
	pub name: String,
	pub info: Destination,
}

impl PatientRow {
	pub fn new(patient: &Patient, routes: &Routes) -> Self {
		Self {
			id: patient.id.clone(),
			name: patient.full_name(),
			info: routes.patient(&patient.id),
		}
	}

	/// Rows for the cached patient list, in list order.
	pub fn list(cache: &SharedCache, routes: &Routes) -> Vec<Self> {
		cache
			.select(&CollectionKey::all(EntityKind::Patient))
			.iter()
			.filter_map(Entity::as_patient)
			.map(|patient| Self::new(patient, routes))
			.collect()
	}
}
