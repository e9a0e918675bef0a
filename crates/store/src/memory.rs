//! In-process [`EntityStore`] used by tests and the CLI.
//!
//! Behaves like the remote service where the client can observe it: ids are
//! assigned server-side, audit stamps come from the store clock, missing
//! targets and dangling parent references are rejected with the same messages
//! the server sends. Failures can be scripted with [`MemoryStore::fail_next`].

use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use chairside_primitives::{Audit, CollectionKey, Entity, EntityId, EntityKind, Fields};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::{Collection, EntityStore, Result, StoreError};

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

#[derive(Default)]
struct State {
	entities: IndexMap<(EntityKind, EntityId), Entity>,
	scripted_failures: VecDeque<StoreError>,
	calls: usize,
}

pub struct MemoryStore {
	state: Mutex<State>,
	clock: Clock,
	yield_before_reply: bool,
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for MemoryStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("MemoryStore")
			.field("entities", &state.entities.len())
			.field("scripted_failures", &state.scripted_failures.len())
			.field("calls", &state.calls)
			.finish()
	}
}

impl MemoryStore {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(State::default()),
			clock: Box::new(Utc::now),
			yield_before_reply: false,
		}
	}

	/// Replaces the audit clock.
	pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
		self.clock = Box::new(clock);
		self
	}

	/// Yields to the executor once before answering, so other tasks can observe
	/// the request while it is outstanding.
	pub fn with_reply_yield(mut self) -> Self {
		self.yield_before_reply = true;
		self
	}

	/// Inserts an entity as if it had been created earlier.
	pub fn seed(&self, entity: Entity) {
		let mut state = self.state.lock();
		state.entities.insert((entity.kind(), entity.id().clone()), entity);
	}

	/// Makes the next call fail with `error`. Failures queue in order.
	pub fn fail_next(&self, error: StoreError) {
		self.state.lock().scripted_failures.push_back(error);
	}

	/// Number of calls answered so far, failures included.
	pub fn calls(&self) -> usize {
		self.state.lock().calls
	}

	pub fn get(&self, kind: EntityKind, id: &EntityId) -> Option<Entity> {
		self.state.lock().entities.get(&(kind, id.clone())).cloned()
	}

	pub fn len(&self) -> usize {
		self.state.lock().entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.state.lock().entities.is_empty()
	}

	async fn reply(&self) -> Result<()> {
		if self.yield_before_reply {
			tokio::task::yield_now().await;
		}
		let mut state = self.state.lock();
		state.calls += 1;
		match state.scripted_failures.pop_front() {
			Some(error) => {
				tracing::debug!(class = %error.class, message = %error.message, "store.scripted_failure");
				Err(error)
			}
			None => Ok(()),
		}
	}
}

fn not_found(kind: EntityKind) -> StoreError {
	StoreError::not_found(format!("{} not found", kind.label()))
}

/// Checks that the parent named by a payload exists.
fn check_parent(state: &State, kind: EntityKind, payload: &Fields) -> Result<()> {
	let (field, parent_kind) = match kind {
		EntityKind::Payment => ("patient", EntityKind::Patient),
		EntityKind::InstallmentPayment => ("payment", EntityKind::Payment),
		EntityKind::Patient | EntityKind::Procedure => return Ok(()),
	};
	let Some(parent) = payload.get(field).as_text().filter(|id| !id.is_empty()) else {
		return Ok(());
	};
	if state.entities.contains_key(&(parent_kind, EntityId::new(parent))) {
		Ok(())
	} else {
		Err(StoreError::rejected(format!("{} not found", parent_kind.label())))
	}
}

#[async_trait(?Send)]
impl EntityStore for MemoryStore {
	async fn create(&self, kind: EntityKind, payload: &Fields, actor: &str) -> Result<Entity> {
		self.reply().await?;
		let mut state = self.state.lock();
		check_parent(&state, kind, payload)?;
		let id = EntityId::new(uuid::Uuid::new_v4().to_string());
		let audit = Audit::created(actor, (self.clock)());
		let entity = Entity::build(kind, id.clone(), audit, payload).map_err(|err| StoreError::rejected(err.to_string()))?;
		state.entities.insert((kind, id.clone()), entity.clone());
		tracing::debug!(%kind, %id, actor, "store.create");
		Ok(entity)
	}

	async fn update(&self, kind: EntityKind, id: &EntityId, payload: &Fields, actor: &str) -> Result<Entity> {
		self.reply().await?;
		let mut state = self.state.lock();
		check_parent(&state, kind, payload)?;
		let mut entity = state.entities.get(&(kind, id.clone())).cloned().ok_or_else(|| not_found(kind))?;
		entity.patch(payload).map_err(|err| StoreError::rejected(err.to_string()))?;
		entity.audit_mut().touch(actor, (self.clock)());
		state.entities.insert((kind, id.clone()), entity.clone());
		tracing::debug!(%kind, %id, actor, "store.update");
		Ok(entity)
	}

	async fn delete(&self, kind: EntityKind, id: &EntityId) -> Result<EntityId> {
		self.reply().await?;
		let mut state = self.state.lock();
		state.entities.shift_remove(&(kind, id.clone())).ok_or_else(|| not_found(kind))?;
		tracing::debug!(%kind, %id, "store.delete");
		Ok(id.clone())
	}

	async fn list(&self, key: &CollectionKey) -> Result<Collection> {
		self.reply().await?;
		let state = self.state.lock();
		let entities = state
			.entities
			.values()
			.filter(|entity| key.admits(entity.kind(), entity.parent()))
			.cloned();
		Ok(Collection::from_entities(entities))
	}
}
