//! Mutation dispatch and call-site effects.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chairside_forms::{FormState, SubmitBlocked};
use chairside_primitives::{CollectionKey, EntityKind};
use chairside_store::{EntityStore, SharedCache};
use tokio::sync::watch;
use tracing::Instrument;

use crate::gate::SubmitControl;
use crate::navigation::{Destination, Navigator};
use crate::notify::{Notification, NotificationSink, NotificationStyle, Severity};
use crate::outcome::{MutationError, MutationOutcome, Settled};
use crate::request::{MutationOp, MutationRequest};
use crate::scope::ViewScope;

/// Presentation hooks the controller drives on a live view.
#[derive(Clone)]
pub struct Effects {
	pub notifications: Arc<dyn NotificationSink>,
	pub navigator: Arc<dyn Navigator>,
}

impl Effects {
	pub fn new(notifications: Arc<dyn NotificationSink>, navigator: Arc<dyn Navigator>) -> Self {
		Self { notifications, navigator }
	}
}

/// What one call site does once its mutation settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
	pub success_title: String,
	pub success_description: Option<String>,
	pub failure_title: String,
	pub destination: Option<Destination>,
	pub reset_form: bool,
}

impl CallSite {
	/// Wording and effects for the usual form of each operation.
	///
	/// Creates and edits go back and reset their form; deletes stay put
	/// unless [`CallSite::navigate_to`] is set.
	pub fn for_request(kind: EntityKind, op: &MutationOp) -> Self {
		let label = kind.label();
		let (success_title, description, destination, reset_form) = match op {
			MutationOp::Create => ("Success", format!("{label} added successfully!"), Some(Destination::Back), true),
			MutationOp::Update(_) => ("Success", format!("{label} updated successfully"), Some(Destination::Back), true),
			MutationOp::Delete(_) => ("Success.", format!("{label} has been deleted."), None, false),
		};
		Self {
			success_title: success_title.to_string(),
			success_description: Some(description),
			failure_title: "Error".to_string(),
			destination,
			reset_form,
		}
	}

	pub fn with_success(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
		self.success_title = title.into();
		self.success_description = Some(description.into());
		self
	}

	pub fn with_failure_title(mut self, title: impl Into<String>) -> Self {
		self.failure_title = title.into();
		self
	}

	pub fn navigate_to(mut self, destination: Destination) -> Self {
		self.destination = Some(destination);
		self
	}

	pub fn without_navigation(mut self) -> Self {
		self.destination = None;
		self
	}

	pub fn resetting(mut self, reset_form: bool) -> Self {
		self.reset_form = reset_form;
		self
	}

	fn success(&self, style: NotificationStyle) -> Notification {
		let notification = Notification::new(Severity::Success, &self.success_title, style);
		match &self.success_description {
			Some(description) => notification.with_description(description),
			None => notification,
		}
	}

	fn failure(&self, message: &str, style: NotificationStyle) -> Notification {
		Notification::new(Severity::Error, &self.failure_title, style).with_description(message)
	}
}

/// Result of [`MutationController::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
	/// The control already had this target in flight; nothing was dispatched.
	Suppressed,
	Settled { outcome: MutationOutcome, reset_form: bool },
}

impl Submission {
	pub fn is_suppressed(&self) -> bool {
		matches!(self, Self::Suppressed)
	}

	pub fn outcome(&self) -> Option<&MutationOutcome> {
		match self {
			Self::Suppressed => None,
			Self::Settled { outcome, .. } => Some(outcome),
		}
	}

	/// True when the initiating form should clear its values.
	pub fn reset_form(&self) -> bool {
		matches!(self, Self::Settled { reset_form: true, .. })
	}
}

/// Dispatches mutations and keeps the shared cache in step with the store.
pub struct MutationController<S> {
	store: S,
	cache: SharedCache,
	effects: Effects,
	style: NotificationStyle,
	state: watch::Sender<MutationOutcome>,
	in_flight: AtomicUsize,
}

/// Counts one outstanding dispatch; released on drop so a cancelled dispatch
/// does not hold the loading state forever.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
	fn enter(count: &'a AtomicUsize) -> Self {
		count.fetch_add(1, Ordering::AcqRel);
		Self(count)
	}
}

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::AcqRel);
	}
}

impl<S: EntityStore> MutationController<S> {
	pub fn new(store: S, cache: SharedCache, effects: Effects) -> Self {
		let (state, _) = watch::channel(MutationOutcome::default());
		Self {
			store,
			cache,
			effects,
			style: NotificationStyle::default(),
			state,
			in_flight: AtomicUsize::new(0),
		}
	}

	pub fn with_style(mut self, style: NotificationStyle) -> Self {
		self.style = style;
		self
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn cache(&self) -> &SharedCache {
		&self.cache
	}

	/// Observes the loading state: `Pending` while any dispatch is outstanding,
	/// otherwise the outcome of the dispatch that settled last.
	pub fn subscribe(&self) -> watch::Receiver<MutationOutcome> {
		self.state.subscribe()
	}

	/// Number of dispatches awaiting a store reply.
	pub fn in_flight(&self) -> usize {
		self.in_flight.load(Ordering::Acquire)
	}

	/// Lists a collection and replaces it in the cache. Returns the entity count.
	pub async fn load(&self, key: CollectionKey) -> Result<usize, MutationError> {
		let collection = self.store.list(&key).await?;
		let count = collection.len();
		tracing::debug!(collection = %key, count, "mutation.load");
		self.cache.hydrate(key, collection);
		Ok(count)
	}

	/// Issues the single store call for `request` and settles it.
	///
	/// Publishes `Pending`, and the terminal outcome once no other dispatch is
	/// outstanding. The outcome is always returned. Only success writes to the
	/// cache. Nothing is deduplicated here: two calls are two independent
	/// dispatches.
	pub async fn execute(&self, request: &MutationRequest) -> MutationOutcome {
		let span = tracing::debug_span!(
			"mutation.execute",
			kind = %request.kind,
			op = request.op.verb(),
			target = %request.target_key()
		);
		self.dispatch(request).instrument(span).await
	}

	async fn dispatch(&self, request: &MutationRequest) -> MutationOutcome {
		let in_flight = InFlight::enter(&self.in_flight);
		self.state.send_replace(MutationOutcome::Pending);
		tracing::debug!("mutation.dispatch");

		let MutationRequest { kind, op, payload, actor } = request;
		let result = match op {
			MutationOp::Create => self.store.create(*kind, payload, actor).await.map(Settled::Saved),
			MutationOp::Update(id) => self.store.update(*kind, id, payload, actor).await.map(Settled::Saved),
			MutationOp::Delete(id) => self.store.delete(*kind, id).await.map(Settled::Deleted),
		}
		.map_err(MutationError::from);

		match &result {
			Ok(settled) => self.apply(*kind, settled),
			Err(error) => tracing::debug!(%error, "mutation.failure"),
		}
		let outcome = MutationOutcome::from(result);
		drop(in_flight);
		match self.in_flight() {
			0 => {
				self.state.send_replace(outcome.clone());
			}
			remaining => tracing::debug!(remaining, "mutation.overlap"),
		}
		outcome
	}

	fn apply(&self, kind: EntityKind, settled: &Settled) {
		let revision = match settled {
			Settled::Saved(entity) => self.cache.write(|cache| {
				cache.upsert(entity.clone());
				cache.revision()
			}),
			Settled::Deleted(id) => self.cache.write(|cache| {
				cache.remove(kind, id);
				cache.revision()
			}),
		};
		tracing::debug!(revision, "mutation.settled");
	}

	/// Runs `request` from a triggering control and applies the call-site effects.
	///
	/// A second submit for a target the control already has in flight is
	/// suppressed without dispatching. On a live view the outcome produces
	/// exactly one notification, and success navigates and asks for a form reset
	/// as `site` declares. If `view` closed while the request was outstanding
	/// the cache is still updated but no view effect runs.
	pub async fn submit(&self, control: &SubmitControl, view: &ViewScope, request: MutationRequest, site: &CallSite) -> Submission {
		let target = request.target_key();
		let Some(_guard) = control.lock(target.clone()) else {
			tracing::debug!(%target, "mutation.suppressed");
			return Submission::Suppressed;
		};

		let outcome = self.execute(&request).await;
		if !view.is_live() {
			tracing::debug!(%target, generation = view.generation(), "mutation.detached");
			return Submission::Settled { outcome, reset_form: false };
		}

		let reset_form = match &outcome {
			MutationOutcome::Success(_) => {
				self.effects.notifications.notify(site.success(self.style));
				if let Some(destination) = &site.destination {
					self.effects.navigator.navigate(destination);
				}
				site.reset_form
			}
			MutationOutcome::Failure(message) => {
				self.effects.notifications.notify(site.failure(message, self.style));
				false
			}
			MutationOutcome::Pending => false,
		};
		Submission::Settled { outcome, reset_form }
	}

	/// Submits a form: takes its payload, runs [`Self::submit`] and settles the
	/// form's submitting state, resetting it when the submission asks for it.
	pub async fn submit_form(
		&self,
		control: &SubmitControl,
		view: &ViewScope,
		form: &mut FormState,
		op: MutationOp,
		actor: &str,
		site: &CallSite,
	) -> Result<Submission, SubmitBlocked> {
		let payload = form.begin_submit()?;
		let request = MutationRequest {
			kind: form.kind(),
			op,
			payload,
			actor: actor.to_string(),
		};
		let submission = self.submit(control, view, request, site).await;
		form.finish_submit(submission.reset_form());
		Ok(submission)
	}
}

#[cfg(test)]
mod tests;
