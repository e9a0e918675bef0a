use std::collections::HashMap;

use async_trait::async_trait;
use chairside_primitives::{CollectionKey, Entity, EntityId, EntityKind, Fields};

use crate::Result;

/// Listed collection: ids in server order plus the entities they name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
	pub ids: Vec<EntityId>,
	pub entities: HashMap<EntityId, Entity>,
}

impl Collection {
	pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
		let mut collection = Self::default();
		for entity in entities {
			collection.ids.push(entity.id().clone());
			collection.entities.insert(entity.id().clone(), entity);
		}
		collection
	}

	/// Entities in list order. Ids without an entity are skipped.
	pub fn ordered(&self) -> impl Iterator<Item = &Entity> {
		self.ids.iter().filter_map(|id| self.entities.get(id))
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}

/// Remote entity store.
///
/// Calls are driven from a single-threaded UI executor, so futures are not
/// required to be `Send`. Timeouts belong to the implementation.
#[async_trait(?Send)]
pub trait EntityStore {
	/// Creates an entity; `actor` is stamped as its creator.
	async fn create(&self, kind: EntityKind, payload: &Fields, actor: &str) -> Result<Entity>;

	/// Applies a partial payload; `actor` is stamped as the updater.
	async fn update(&self, kind: EntityKind, id: &EntityId, payload: &Fields, actor: &str) -> Result<Entity>;

	/// Deletes an entity and echoes its id.
	async fn delete(&self, kind: EntityKind, id: &EntityId) -> Result<EntityId>;

	async fn list(&self, key: &CollectionKey) -> Result<Collection>;
}
