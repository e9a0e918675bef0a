//! Replays the new-payment workflow against a seeded in-memory store.

use std::process::ExitCode;
use std::sync::Arc;

use chairside_config::Config;
use chairside_primitives::{Audit, Capabilities, CollectionKey, Entity, EntityKind, FieldValue, Fields, Role, Session};
use chairside_store::{MemoryStore, SharedCache, StoreError};
use chairside_view::format::card_date;
use chairside_view::{AuditRows, AuditStyle, DeletePrompt, PatientRow};
use chairside_workflow::{
	CallSite, Destination, Effects, MutationController, MutationOutcome, MutationRequest, NavigationLog, NotificationCenter, ScopeClock,
	Severity, SubmitControl,
};
use chrono::Utc;
use parking_lot::Mutex;

use crate::settings;

const PATIENT: &str = "P1";

pub async fn run(config: &Config, fail: Option<String>, role: Role) -> Result<ExitCode, Box<dyn std::error::Error>> {
	let session = Session::new("front@clinic.test", role);
	let caps = Capabilities::for_session(&session);
	let money = settings::money(config);
	let routes = settings::routes(config);

	let store = MemoryStore::new();
	let patient = Fields::new().with("fname", "Ana").with("mname", "").with("lname", "Reyes");
	store.seed(Entity::build(EntityKind::Patient, PATIENT.into(), Audit::created("seed@clinic.test", Utc::now()), &patient)?);

	let notifications = Arc::new(Mutex::new(NotificationCenter::new()));
	let navigation = Arc::new(NavigationLog::new());
	let controller = MutationController::new(store, SharedCache::new(), Effects::new(notifications.clone(), navigation.clone()))
		.with_style(settings::notification_style(config));

	let payments = CollectionKey::scoped(EntityKind::Payment, PATIENT);
	controller.load(CollectionKey::all(EntityKind::Patient)).await?;
	controller.load(payments.clone()).await?;
	for row in PatientRow::list(controller.cache(), &routes) {
		println!("patient {} {} -> {}", row.id, row.name, describe(&row.info));
	}
	if let Some(message) = fail {
		controller.store().fail_next(StoreError::rejected(message));
	}

	let payload = Fields::new()
		.with("patient", PATIENT)
		.with("date", FieldValue::Date(1_700_000_000))
		.with("type", "Full Payment")
		.with("total", 500.0)
		.with("remarks", "ok");
	let request = MutationRequest::create(EntityKind::Payment, payload, session.actor());
	let site = CallSite::for_request(request.kind, &request.op);
	let view = ScopeClock::new().open();
	let submission = controller.submit(&SubmitControl::new(), &view, request, &site).await;

	match submission.outcome() {
		Some(MutationOutcome::Success(_)) => println!("outcome: success"),
		Some(MutationOutcome::Failure(message)) => println!("outcome: failure ({message})"),
		Some(MutationOutcome::Pending) | None => println!("outcome: none"),
	}
	for notification in notifications.lock().take_pending() {
		let severity = match notification.severity {
			Severity::Success => "success",
			Severity::Error => "error",
		};
		println!(
			"notification [{severity}] {}: {}",
			notification.title,
			notification.description.unwrap_or_default()
		);
	}
	for destination in navigation.take() {
		println!("navigate: {}", describe(&destination));
	}

	let cached = controller.cache().select(&payments);
	println!("cache: {} payment(s) for {PATIENT}", cached.len());
	for entity in &cached {
		let Some(payment) = entity.as_payment() else {
			continue;
		};
		println!(
			"  {}  {}  {}  {}",
			payment.id,
			card_date(payment.date),
			money.format(payment.total),
			payment.payment_type
		);
		for row in AuditRows::for_entity(entity, caps, AuditStyle::Card).iter() {
			println!("    {}: {}", row.label, row.value);
		}
		if caps.delete {
			println!("    {}", DeletePrompt::for_payment(payment).body);
		}
	}

	Ok(if submission.outcome().is_some_and(MutationOutcome::is_success) {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

fn describe(destination: &Destination) -> String {
	match destination {
		Destination::Back => "back".to_string(),
		Destination::Path(path) => path.clone(),
	}
}
