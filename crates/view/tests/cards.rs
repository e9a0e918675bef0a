use chairside_primitives::{Audit, Capabilities, CollectionKey, Entity, EntityId, EntityKind, FieldValue, Fields, Role, Session};
use chairside_store::{Collection, SharedCache};
use chairside_view::{InstallmentPaymentCard, Money, PatientRow};
use chairside_workflow::{Destination, Routes};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

fn audit() -> Audit {
	Audit::created("front@clinic.test", Utc.timestamp_opt(1_700_000_000, 0).unwrap())
}

fn installment(id: &str, remarks: &str) -> Entity {
	let fields = Fields::new()
		.with("payment", "X1")
		.with("date", FieldValue::Date(1_700_000_000))
		.with("amount", 1500.0)
		.with("remarks", remarks);
	Entity::build(EntityKind::InstallmentPayment, id.into(), audit(), &fields).unwrap()
}

fn patient(id: &str, fname: &str, mname: &str, lname: &str) -> Entity {
	let fields = Fields::new().with("fname", fname).with("mname", mname).with("lname", lname);
	Entity::build(EntityKind::Patient, id.into(), audit(), &fields).unwrap()
}

fn cache_with(key: CollectionKey, entities: Vec<Entity>) -> SharedCache {
	let cache = SharedCache::new();
	cache.hydrate(key, Collection::from_entities(entities));
	cache
}

#[test]
fn staff_card_hides_audit_and_delete() {
	let cache = cache_with(CollectionKey::scoped(EntityKind::InstallmentPayment, "X1"), vec![installment("I1", "")]);
	let caps = Capabilities::for_session(&Session::new("front@clinic.test", Role::Staff));
	let card = InstallmentPaymentCard::from_cache(&cache, &"I1".into(), &"P1".into(), caps, &Money::default(), &Routes::default()).unwrap();

	assert_eq!(card.date, "Nov 14 2023");
	assert_eq!(card.amount, "₱1,500");
	assert_eq!(card.remarks, None);
	assert!(card.audit.is_empty());
	assert!(card.delete.is_none());
	assert_eq!(
		card.edit,
		Destination::Path("/dash/patients/P1/payments/X1/installment-payment/I1".into())
	);
}

#[test]
fn admin_card_shows_audit_and_delete() {
	let cache = cache_with(CollectionKey::scoped(EntityKind::InstallmentPayment, "X1"), vec![installment("I1", "second of six")]);
	let caps = Capabilities::for_session(&Session::new("boss@clinic.test", Role::SuperAdmin));
	let card = InstallmentPaymentCard::from_cache(&cache, &"I1".into(), &"P1".into(), caps, &Money::default(), &Routes::default()).unwrap();

	assert_eq!(card.remarks.as_deref(), Some("second of six"));
	assert_eq!(card.audit.get("Created By"), Some("front@clinic.test"));
	assert_eq!(card.audit.get("Creation Date"), Some("Nov 14, 2023"));
	let prompt = card.delete.unwrap();
	assert_eq!(prompt.heading, "Delete Installment payment");
	assert_eq!(prompt.id, EntityId::from("I1"));
}

#[test]
fn missing_installment_has_no_card() {
	let cache = SharedCache::new();
	let card = InstallmentPaymentCard::from_cache(&cache, &"I9".into(), &"P1".into(), Capabilities::default(), &Money::default(), &Routes::default());
	assert!(card.is_none());
}

#[test]
fn patient_rows_follow_list_order() {
	let cache = cache_with(
		CollectionKey::all(EntityKind::Patient),
		vec![patient("P2", "Ben", "", "Cruz"), patient("P1", "Ana", "Lim", "Reyes")],
	);
	let rows = PatientRow::list(&cache, &Routes::default());
	let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
	assert_eq!(names, ["Ben Cruz", "Ana Lim Reyes"]);
	assert_eq!(rows[1].info, Destination::Path("/dash/patients/P1".into()));
}
