use chairside_primitives::{Audit, Fields, FieldValue};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use super::*;

fn audit() -> Audit {
	Audit::created("front@clinic.test", Utc.timestamp_opt(1_700_000_000, 0).unwrap())
}

fn procedure(id: &str, amount: f64) -> Entity {
	Entity::build(
		EntityKind::Procedure,
		EntityId::new(id),
		audit(),
		&Fields::new().with("name", "Cleaning").with("amount", amount),
	)
	.unwrap()
}

fn installment(id: &str, payment: &str) -> Entity {
	Entity::build(
		EntityKind::InstallmentPayment,
		EntityId::new(id),
		audit(),
		&Fields::new()
			.with("payment", payment)
			.with("date", FieldValue::Date(1_700_000_000))
			.with("amount", 100.0),
	)
	.unwrap()
}

fn ids(cache: &NormalizedCache, key: &CollectionKey) -> Vec<String> {
	cache.select(key).map(|e| e.id().to_string()).collect()
}

#[test]
fn hydrate_preserves_server_order() {
	let mut cache = NormalizedCache::new();
	let key = CollectionKey::all(EntityKind::Procedure);
	cache.hydrate(key.clone(), Collection::from_entities([procedure("b", 1.0), procedure("a", 2.0)]));
	assert_eq!(ids(&cache, &key), ["b", "a"]);
	assert_eq!(cache.len(), 2);
}

#[test]
fn rehydrate_evicts_entities_no_longer_listed() {
	let mut cache = NormalizedCache::new();
	let key = CollectionKey::all(EntityKind::Procedure);
	cache.hydrate(key.clone(), Collection::from_entities([procedure("a", 1.0), procedure("b", 2.0)]));
	cache.hydrate(key.clone(), Collection::from_entities([procedure("b", 3.0)]));
	assert!(!cache.contains(EntityKind::Procedure, &EntityId::new("a")));
	assert_eq!(ids(&cache, &key), ["b"]);
}

#[test]
fn rehydrate_keeps_entities_referenced_elsewhere() {
	let mut cache = NormalizedCache::new();
	let one = CollectionKey::scoped(EntityKind::InstallmentPayment, "pay-1");
	let all = CollectionKey::all(EntityKind::InstallmentPayment);
	cache.hydrate(all.clone(), Collection::from_entities([installment("i1", "pay-1")]));
	cache.hydrate(one.clone(), Collection::from_entities([installment("i1", "pay-1")]));
	cache.hydrate(one.clone(), Collection::default());
	assert!(cache.contains(EntityKind::InstallmentPayment, &EntityId::new("i1")));
	assert_eq!(ids(&cache, &all), ["i1"]);
}

#[test]
fn upsert_new_entity_joins_admitting_collections_only() {
	let mut cache = NormalizedCache::new();
	let pay1 = CollectionKey::scoped(EntityKind::InstallmentPayment, "pay-1");
	let pay2 = CollectionKey::scoped(EntityKind::InstallmentPayment, "pay-2");
	cache.hydrate(pay1.clone(), Collection::default());
	cache.hydrate(pay2.clone(), Collection::default());

	cache.upsert(installment("i1", "pay-1"));
	assert_eq!(ids(&cache, &pay1), ["i1"]);
	assert!(ids(&cache, &pay2).is_empty());
}

#[test]
fn upsert_existing_entity_replaces_in_place() {
	let mut cache = NormalizedCache::new();
	let key = CollectionKey::all(EntityKind::Procedure);
	cache.hydrate(key.clone(), Collection::from_entities([procedure("a", 1.0), procedure("b", 2.0)]));
	cache.upsert(procedure("a", 99.0));
	assert_eq!(ids(&cache, &key), ["a", "b"]);
	let amount = cache
		.get(EntityKind::Procedure, &EntityId::new("a"))
		.and_then(Entity::as_procedure)
		.map(|p| p.amount);
	assert_eq!(amount, Some(99.0));
}

#[test]
fn upsert_with_new_parent_moves_between_scoped_collections() {
	let mut cache = NormalizedCache::new();
	let pay1 = CollectionKey::scoped(EntityKind::InstallmentPayment, "pay-1");
	let pay2 = CollectionKey::scoped(EntityKind::InstallmentPayment, "pay-2");
	let all = CollectionKey::all(EntityKind::InstallmentPayment);
	cache.hydrate(pay1.clone(), Collection::from_entities([installment("i1", "pay-1"), installment("i2", "pay-1")]));
	cache.hydrate(pay2.clone(), Collection::from_entities([installment("i3", "pay-2")]));
	cache.hydrate(all.clone(), Collection::from_entities([installment("i1", "pay-1"), installment("i3", "pay-2")]));

	cache.upsert(installment("i1", "pay-2"));
	assert_eq!(ids(&cache, &pay1), ["i2"]);
	assert_eq!(ids(&cache, &pay2), ["i3", "i1"]);
	assert_eq!(ids(&cache, &all), ["i1", "i3"]);
	let moved = cache.get(EntityKind::InstallmentPayment, &EntityId::new("i1"));
	assert_eq!(moved.and_then(Entity::parent).map(EntityId::as_str), Some("pay-2"));
}

#[test]
fn remove_drops_entity_and_collection_membership() {
	let mut cache = NormalizedCache::new();
	let key = CollectionKey::all(EntityKind::Procedure);
	cache.hydrate(key.clone(), Collection::from_entities([procedure("X1", 1.0), procedure("X2", 2.0)]));
	let removed = cache.remove(EntityKind::Procedure, &EntityId::new("X1"));
	assert!(removed.is_some());
	assert!(!cache.contains(EntityKind::Procedure, &EntityId::new("X1")));
	assert_eq!(ids(&cache, &key), ["X2"]);
}

#[test]
fn writes_bump_revision_and_reads_do_not() {
	let mut cache = NormalizedCache::new();
	assert_eq!(cache.revision(), 0);
	cache.upsert(procedure("a", 1.0));
	let _ = cache.get(EntityKind::Procedure, &EntityId::new("a"));
	let _ = cache.select(&CollectionKey::all(EntityKind::Procedure)).count();
	assert_eq!(cache.revision(), 1);
	cache.remove(EntityKind::Procedure, &EntityId::new("a"));
	assert_eq!(cache.revision(), 2);
}

#[test]
fn shared_cache_snapshots_compare_equal_without_writes() {
	let shared = SharedCache::new();
	shared.write(|cache| cache.upsert(procedure("a", 1.0)));
	let before = shared.snapshot();
	let _ = shared.get(EntityKind::Procedure, &EntityId::new("a"));
	assert_eq!(shared.snapshot(), before);
}
