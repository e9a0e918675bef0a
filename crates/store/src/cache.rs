//! Normalized client cache.
//!
//! Entities are stored once, keyed by kind and id; listed collections hold only
//! ordered ids. Writes come from two places: list hydration and settled
//! mutations. A mutation write touches exactly the id it names, and no other
//! entry is invalidated.
//!
//! # Invariants
//!
//! * An id appears in a collection only while its entity is cached.
//! * `revision` increases on every write and never otherwise.
//! * A failed mutation performs no write, so a snapshot taken before it
//!   compares equal afterwards.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chairside_primitives::{CollectionKey, Entity, EntityId, EntityKind};
use parking_lot::RwLock;

use crate::Collection;

type EntityKey = (EntityKind, EntityId);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedCache {
	entities: HashMap<EntityKey, Entity>,
	collections: BTreeMap<CollectionKey, Vec<EntityId>>,
	revision: u64,
}

impl NormalizedCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	pub fn get(&self, kind: EntityKind, id: &EntityId) -> Option<&Entity> {
		self.entities.get(&(kind, id.clone()))
	}

	pub fn contains(&self, kind: EntityKind, id: &EntityId) -> bool {
		self.entities.contains_key(&(kind, id.clone()))
	}

	/// Returns true if `key` has been hydrated.
	pub fn has_collection(&self, key: &CollectionKey) -> bool {
		self.collections.contains_key(key)
	}

	/// Ordered entities of a hydrated collection; empty if never listed.
	pub fn select<'a>(&'a self, key: &CollectionKey) -> impl Iterator<Item = &'a Entity> + use<'a> {
		let kind = key.kind;
		self.collections
			.get(key)
			.into_iter()
			.flatten()
			.filter_map(move |id| self.entities.get(&(kind, id.clone())))
	}

	/// Replaces one collection with a fresh listing.
	///
	/// Entities that dropped out of the listing are evicted unless another
	/// hydrated collection still references them.
	pub fn hydrate(&mut self, key: CollectionKey, collection: Collection) {
		let kind = key.kind;
		let fresh: HashSet<&EntityId> = collection.ids.iter().collect();
		let dropped: Vec<EntityId> = self
			.collections
			.get(&key)
			.into_iter()
			.flatten()
			.filter(|id| !fresh.contains(id))
			.cloned()
			.collect();

		let Collection { ids, mut entities } = collection;
		let ids: Vec<EntityId> = ids.into_iter().filter(|id| entities.contains_key(id)).collect();
		for id in &ids {
			if let Some(entity) = entities.remove(id) {
				self.entities.insert((kind, id.clone()), entity);
			}
		}
		self.collections.insert(key.clone(), ids);

		for id in dropped {
			let referenced = self
				.collections
				.iter()
				.any(|(other, ids)| other.kind == kind && ids.contains(&id));
			if !referenced {
				self.entities.remove(&(kind, id));
			}
		}
		self.bump();
		tracing::trace!(collection = %key, revision = self.revision, "cache.hydrate");
	}

	/// Inserts or replaces one entity.
	///
	/// The id keeps its position in every hydrated collection that still admits
	/// it, leaves those that no longer do (a changed parent) and is appended to
	/// those it newly belongs to.
	pub fn upsert(&mut self, entity: Entity) {
		let kind = entity.kind();
		let id = entity.id().clone();
		let parent = entity.parent().cloned();
		let existed = self.entities.insert((kind, id.clone()), entity).is_some();
		for (key, ids) in self.collections.iter_mut().filter(|(key, _)| key.kind == kind) {
			let listed = ids.contains(&id);
			match (key.admits(kind, parent.as_ref()), listed) {
				(true, false) => ids.push(id.clone()),
				(false, true) => ids.retain(|cached| cached != &id),
				_ => {}
			}
		}
		self.bump();
		tracing::trace!(%kind, %id, existed, revision = self.revision, "cache.upsert");
	}

	/// Removes one entity and its id from every collection of its kind.
	///
	/// Returns the removed entity, if it was cached.
	pub fn remove(&mut self, kind: EntityKind, id: &EntityId) -> Option<Entity> {
		let removed = self.entities.remove(&(kind, id.clone()));
		for (key, ids) in self.collections.iter_mut() {
			if key.kind == kind {
				ids.retain(|cached| cached != id);
			}
		}
		self.bump();
		tracing::trace!(%kind, %id, found = removed.is_some(), revision = self.revision, "cache.remove");
		removed
	}

	fn bump(&mut self) {
		self.revision = self.revision.wrapping_add(1);
	}
}

/// Cache handle shared between the controller and the presentation layer.
///
/// Accessors take the lock for the duration of the closure only; never call
/// them across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedCache(Arc<RwLock<NormalizedCache>>);

impl SharedCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn read<R>(&self, f: impl FnOnce(&NormalizedCache) -> R) -> R {
		f(&self.0.read())
	}

	pub fn write<R>(&self, f: impl FnOnce(&mut NormalizedCache) -> R) -> R {
		f(&mut self.0.write())
	}

	pub fn snapshot(&self) -> NormalizedCache {
		self.0.read().clone()
	}

	pub fn get(&self, kind: EntityKind, id: &EntityId) -> Option<Entity> {
		self.0.read().get(kind, id).cloned()
	}

	pub fn contains(&self, kind: EntityKind, id: &EntityId) -> bool {
		self.0.read().contains(kind, id)
	}

	pub fn select(&self, key: &CollectionKey) -> Vec<Entity> {
		self.0.read().select(key).cloned().collect()
	}

	pub fn hydrate(&self, key: CollectionKey, collection: Collection) {
		self.0.write().hydrate(key, collection);
	}
}

#[cfg(test)]
mod tests;
