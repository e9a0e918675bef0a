use std::process::ExitCode;

use chairside_forms::{FormSchema, FormState, SubmitBlocked};
use chairside_primitives::{FieldValue, Fields};
use chrono::{NaiveDate, Utc};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Draft {
	/// New payment form
	Payment {
		#[arg(long, default_value = "")]
		patient: String,
		/// Payment date, unix seconds
		#[arg(long, default_value = "")]
		date: String,
		/// "Full Payment" or "Installment"
		#[arg(long = "type", default_value = "")]
		payment_type: String,
		#[arg(long, default_value = "")]
		total: String,
		#[arg(long)]
		remarks: Option<String>,
		#[arg(long)]
		plan_name: Option<String>,
		/// Day treated as today for future-date checks (YYYY-MM-DD)
		#[arg(long)]
		today: Option<NaiveDate>,
	},
}

/// Prints `valid` or one line per field error. Exit status 1 when invalid.
pub fn run(draft: &Draft) -> ExitCode {
	let Draft::Payment {
		patient,
		date,
		payment_type,
		total,
		remarks,
		plan_name,
		today,
	} = draft;

	let today = today.unwrap_or_else(|| Utc::now().date_naive());
	let defaults = Fields::new()
		.with("patient", "")
		.with("date", FieldValue::Empty)
		.with("type", "")
		.with("total", "")
		.with("remarks", "")
		.with("planName", "");
	let mut form = FormState::new(FormSchema::new_payment(today), defaults);
	form.set("patient", patient.as_str());
	form.set("date", date.as_str());
	form.set("type", payment_type.as_str());
	form.set("total", total.as_str());
	if let Some(remarks) = remarks {
		form.set("remarks", remarks.as_str());
	}
	if let Some(plan_name) = plan_name {
		form.set("planName", plan_name.as_str());
	}

	match form.begin_submit() {
		Ok(payload) => {
			println!("valid");
			for (name, value) in payload.iter() {
				println!("  {name} = {value}");
			}
			ExitCode::SUCCESS
		}
		Err(blocked) => {
			tracing::debug!(%blocked, "cli.validate");
			if matches!(blocked, SubmitBlocked::NotReady) {
				println!("submit disabled: required fields are empty");
			}
			for name in form.visible_fields() {
				if let Some(message) = form.error(name) {
					println!("{name}: {message}");
				}
			}
			ExitCode::FAILURE
		}
	}
}
