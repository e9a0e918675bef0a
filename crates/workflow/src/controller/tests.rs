use chairside_forms::FormSchema;
use chairside_primitives::{Audit, Entity, EntityId, FieldValue, Fields};
use chairside_store::{MemoryStore, StoreError};
use chrono::{NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;
use crate::navigation::NavigationLog;
use crate::notify::NotificationCenter;
use crate::scope::ScopeClock;

struct Harness {
	controller: MutationController<MemoryStore>,
	notifications: Arc<Mutex<NotificationCenter>>,
	navigation: Arc<NavigationLog>,
}

impl Harness {
	fn new(store: MemoryStore) -> Self {
		let _ = tracing_subscriber::fmt::try_init();
		let notifications = Arc::new(Mutex::new(NotificationCenter::new()));
		let navigation = Arc::new(NavigationLog::new());
		let effects = Effects::new(notifications.clone(), navigation.clone());
		Self {
			controller: MutationController::new(store, SharedCache::new(), effects),
			notifications,
			navigation,
		}
	}

	fn notified(&self) -> Vec<Notification> {
		self.notifications.lock().take_pending()
	}
}

fn seeded_store() -> MemoryStore {
	let store = MemoryStore::new().with_clock(|| Utc.timestamp_opt(1_700_000_000, 0).unwrap());
	let audit = Audit::created("seed@clinic.test", Utc.timestamp_opt(1_690_000_000, 0).unwrap());
	let patient = Fields::new().with("fname", "Ana").with("lname", "Reyes");
	store.seed(Entity::build(EntityKind::Patient, "P1".into(), audit.clone(), &patient).unwrap());
	store.seed(Entity::build(EntityKind::Payment, "X1".into(), audit, &payment_fields("P1")).unwrap());
	store
}

fn payment_fields(patient: &str) -> Fields {
	Fields::new()
		.with("patient", patient)
		.with("date", FieldValue::Date(1_700_000_000))
		.with("type", "Full Payment")
		.with("total", 500.0)
		.with("remarks", "ok")
}

fn create_payment(patient: &str) -> MutationRequest {
	MutationRequest::create(EntityKind::Payment, payment_fields(patient), "front@clinic.test")
}

fn delete_payment(id: &str) -> MutationRequest {
	MutationRequest::delete(EntityKind::Payment, id.into(), "admin@clinic.test")
}

#[tokio::test]
async fn execute_success_upserts_into_cache() {
	let h = Harness::new(seeded_store());
	let outcome = h.controller.execute(&create_payment("P1")).await;
	let Some(Settled::Saved(entity)) = outcome.settled() else {
		panic!("expected saved entity, got {outcome:?}");
	};
	let cached = h.controller.cache().get(EntityKind::Payment, entity.id()).unwrap();
	assert_eq!(cached.as_payment().unwrap().total, 500.0);
	assert_eq!(cached.audit().created_by, "front@clinic.test");
}

#[tokio::test]
async fn execute_failure_leaves_cache_untouched() {
	let h = Harness::new(seeded_store());
	h.controller.load(CollectionKey::all(EntityKind::Payment)).await.unwrap();
	let before = h.controller.cache().snapshot();

	let outcome = h.controller.execute(&create_payment("P404")).await;
	assert_eq!(outcome, MutationOutcome::Failure("Patient not found".into()));
	assert_eq!(h.controller.cache().snapshot(), before);
}

#[tokio::test]
async fn execute_publishes_pending_then_terminal() {
	let h = Harness::new(seeded_store().with_reply_yield());
	let rx = h.controller.subscribe();
	let request = delete_payment("X1");
	let (outcome, saw_pending) = tokio::join!(h.controller.execute(&request), async { rx.borrow().is_pending() });
	assert!(saw_pending);
	assert_eq!(outcome, MutationOutcome::Success(Settled::Deleted("X1".into())));
	assert_eq!(*rx.borrow(), outcome);
}

#[tokio::test]
async fn execute_does_not_deduplicate() {
	let h = Harness::new(seeded_store());
	let first = h.controller.execute(&delete_payment("X1")).await;
	let second = h.controller.execute(&delete_payment("X1")).await;
	assert!(first.is_success());
	assert_eq!(second.failure_message(), Some("Payment not found"));
	assert_eq!(h.controller.store().calls(), 2);
}

#[tokio::test]
async fn transport_failure_surfaces_message() {
	let h = Harness::new(seeded_store());
	h.controller.store().fail_next(StoreError::transport("Network Error"));
	let outcome = h.controller.execute(&delete_payment("X1")).await;
	assert_eq!(outcome.failure_message(), Some("Network Error"));
	assert!(h.controller.store().get(EntityKind::Payment, &"X1".into()).is_some());
}

#[tokio::test]
async fn submit_success_notifies_navigates_and_resets() {
	let h = Harness::new(seeded_store());
	let view = ScopeClock::new().open();
	let request = create_payment("P1");
	let site = CallSite::for_request(request.kind, &request.op);
	let submission = h.controller.submit(&SubmitControl::new(), &view, request, &site).await;

	assert!(submission.reset_form());
	let notified = h.notified();
	assert_eq!(notified.len(), 1);
	assert_eq!(notified[0].severity, Severity::Success);
	assert_eq!(notified[0].title, "Success");
	assert_eq!(notified[0].description.as_deref(), Some("Payment added successfully!"));
	assert_eq!(h.navigation.entries(), [Destination::Back]);
}

#[tokio::test]
async fn submit_failure_notifies_error_without_navigation() {
	let h = Harness::new(seeded_store());
	let view = ScopeClock::new().open();
	let request = create_payment("P404");
	let site = CallSite::for_request(request.kind, &request.op);
	let submission = h.controller.submit(&SubmitControl::new(), &view, request, &site).await;

	assert!(!submission.reset_form());
	let notified = h.notified();
	assert_eq!(notified.len(), 1);
	assert_eq!(notified[0].severity, Severity::Error);
	assert_eq!(notified[0].title, "Error");
	assert_eq!(notified[0].description.as_deref(), Some("Patient not found"));
	assert!(h.navigation.entries().is_empty());
}

#[tokio::test]
async fn duplicate_submit_on_same_target_is_suppressed() {
	let h = Harness::new(seeded_store().with_reply_yield());
	let view = ScopeClock::new().open();
	let control = SubmitControl::new();
	let site = CallSite::for_request(EntityKind::Payment, &MutationOp::Delete("X1".into()));

	let (first, second) = tokio::join!(
		h.controller.submit(&control, &view, delete_payment("X1"), &site),
		h.controller.submit(&control, &view, delete_payment("X1"), &site),
	);
	assert!(first.outcome().is_some_and(MutationOutcome::is_success));
	assert!(second.is_suppressed());
	assert_eq!(h.controller.store().calls(), 1);
	assert_eq!(h.notified().len(), 1);
	assert!(!control.is_locked());
}

#[tokio::test]
async fn overlapping_dispatches_stay_pending_until_the_last_settles() {
	let h = Harness::new(seeded_store().with_reply_yield());
	let rx = h.controller.subscribe();
	let settle = |request: MutationRequest| {
		let controller = &h.controller;
		let rx = rx.clone();
		async move {
			let outcome = controller.execute(&request).await;
			let pending = rx.borrow().is_pending();
			(outcome, controller.in_flight(), pending)
		}
	};

	let ((deleted, left_a, pending_a), (created, left_b, pending_b)) =
		tokio::join!(settle(delete_payment("X1")), settle(create_payment("P1")));
	assert!(deleted.is_success());
	assert!(created.is_success());

	let mut seen = [(left_a, pending_a), (left_b, pending_b)];
	seen.sort();
	assert_eq!(seen, [(0, false), (1, true)]);
	assert_eq!(h.controller.in_flight(), 0);
	assert!(!rx.borrow().is_pending());
}

#[tokio::test]
async fn closed_view_keeps_cache_but_skips_effects() {
	let h = Harness::new(seeded_store().with_reply_yield());
	let view = ScopeClock::new().open();
	let request = create_payment("P1");
	let site = CallSite::for_request(request.kind, &request.op);
	let control = SubmitControl::new();

	let (submission, ()) = tokio::join!(h.controller.submit(&control, &view, request, &site), async { view.close() });
	let Some(MutationOutcome::Success(Settled::Saved(entity))) = submission.outcome() else {
		panic!("expected success, got {submission:?}");
	};
	assert!(h.controller.cache().contains(EntityKind::Payment, entity.id()));
	assert!(!submission.reset_form());
	assert!(h.notified().is_empty());
	assert!(h.navigation.entries().is_empty());
}

#[tokio::test]
async fn delete_call_site_stays_put_by_default() {
	let h = Harness::new(seeded_store());
	let view = ScopeClock::new().open();
	let request = delete_payment("X1");
	let site = CallSite::for_request(request.kind, &request.op);
	h.controller.submit(&SubmitControl::new(), &view, request, &site).await;

	let notified = h.notified();
	assert_eq!(notified[0].title, "Success.");
	assert_eq!(notified[0].description.as_deref(), Some("Payment has been deleted."));
	assert!(h.navigation.entries().is_empty());
}

#[tokio::test]
async fn styled_controller_applies_notification_style() {
	let style = NotificationStyle {
		auto_dismiss: crate::notify::AutoDismiss::Never,
		closable: false,
	};
	let mut h = Harness::new(seeded_store());
	h.controller = MutationController::new(seeded_store(), SharedCache::new(), Effects::new(h.notifications.clone(), h.navigation.clone()))
		.with_style(style);
	let view = ScopeClock::new().open();
	let request = delete_payment("X1");
	let site = CallSite::for_request(request.kind, &request.op).navigate_to(Destination::Back);
	h.controller.submit(&SubmitControl::new(), &view, request, &site).await;

	let notified = h.notified();
	assert_eq!(notified[0].auto_dismiss, crate::notify::AutoDismiss::Never);
	assert!(!notified[0].closable);
	assert_eq!(h.navigation.entries(), [Destination::Back]);
}

#[tokio::test]
async fn submit_form_resets_after_create() {
	let h = Harness::new(seeded_store());
	let view = ScopeClock::new().open();
	let today = NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
	let defaults = Fields::new().with("patient", "P1").with("type", "").with("remarks", "").with("planName", "");
	let mut form = FormState::new(FormSchema::new_payment(today), defaults);
	form.set("date", FieldValue::Date(1_700_000_000));
	form.set("type", "Installment");
	form.set("total", 1500.0);
	form.set("planName", "6 months");

	let site = CallSite::for_request(EntityKind::Payment, &MutationOp::Create);
	let submission = h
		.controller
		.submit_form(&SubmitControl::new(), &view, &mut form, MutationOp::Create, "front@clinic.test", &site)
		.await
		.unwrap();

	let Some(MutationOutcome::Success(Settled::Saved(entity))) = submission.outcome() else {
		panic!("expected success, got {submission:?}");
	};
	let payment = entity.as_payment().unwrap();
	assert_eq!(payment.plan_name, "6 months");
	assert_eq!(payment.remarks, "");
	assert!(!form.is_dirty());
	assert!(!form.is_submitting());
}

#[tokio::test]
async fn submit_form_keeps_values_after_failure() {
	let h = Harness::new(seeded_store());
	h.controller.store().fail_next(StoreError::conflict("Payment already exists"));
	let view = ScopeClock::new().open();
	let mut form = FormState::new(FormSchema::new_procedure(), Fields::new().with("name", "").with("amount", ""));
	form.set("name", "Cleaning");
	form.set("amount", "800");

	let site = CallSite::for_request(EntityKind::Procedure, &MutationOp::Create);
	let submission = h
		.controller
		.submit_form(&SubmitControl::new(), &view, &mut form, MutationOp::Create, "front@clinic.test", &site)
		.await
		.unwrap();
	assert_eq!(submission.outcome().and_then(MutationOutcome::failure_message), Some("Payment already exists"));
	assert_eq!(form.value("name"), &FieldValue::text("Cleaning"));
	assert!(form.submit_enabled());
}

#[tokio::test]
async fn blocked_form_never_dispatches() {
	let h = Harness::new(seeded_store());
	let view = ScopeClock::new().open();
	let mut form = FormState::new(FormSchema::new_procedure(), Fields::new());
	let site = CallSite::for_request(EntityKind::Procedure, &MutationOp::Create);
	let blocked = h
		.controller
		.submit_form(&SubmitControl::new(), &view, &mut form, MutationOp::Create, "front@clinic.test", &site)
		.await;
	assert_eq!(blocked, Err(SubmitBlocked::NotReady));
	assert_eq!(h.controller.store().calls(), 0);
}

#[tokio::test]
async fn load_hydrates_scoped_collection() {
	let h = Harness::new(seeded_store());
	let key = CollectionKey::scoped(EntityKind::Payment, EntityId::from("P1"));
	assert_eq!(h.controller.load(key.clone()).await, Ok(1));
	let ids: Vec<_> = h.controller.cache().select(&key).iter().map(|e| e.id().clone()).collect();
	assert_eq!(ids, [EntityId::from("X1")]);
}
