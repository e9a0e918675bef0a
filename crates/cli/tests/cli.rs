use std::process::{Command, Output};

fn chairside(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_chairside")).args(args).env_remove("RUST_LOG").output().unwrap()
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn valid_full_payment_passes() {
	let output = chairside(&[
		"validate", "payment", "--patient", "P1", "--date", "1700000000", "--type", "Full Payment", "--total", "500", "--remarks", "ok",
		"--today", "2023-11-20",
	]);
	assert!(output.status.success());
	let text = stdout(&output);
	assert!(text.starts_with("valid"), "{text}");
	assert!(text.contains("remarks = ok"), "{text}");
}

#[test]
fn future_date_and_zero_total_are_reported() {
	let output = chairside(&[
		"validate", "payment", "--patient", "P1", "--date", "1800000000", "--type", "Full Payment", "--total", "0", "--remarks", "cash",
		"--today", "2023-11-20",
	]);
	assert!(!output.status.success());
	let text = stdout(&output);
	assert!(text.contains("date: Date cannot be in the future"), "{text}");
	assert!(text.contains("total: Total must be greater than 0"), "{text}");
}

#[test]
fn full_payment_without_remarks_is_not_ready() {
	let output = chairside(&[
		"validate", "payment", "--patient", "P1", "--date", "1700000000", "--type", "Full Payment", "--total", "500", "--today", "2023-11-20",
	]);
	assert!(!output.status.success());
	let text = stdout(&output);
	assert!(text.contains("submit disabled"), "{text}");
	assert!(text.contains("remarks: Remarks is required for Full Payment"), "{text}");
}

#[test]
fn installment_without_plan_is_not_ready() {
	let output = chairside(&[
		"validate", "payment", "--patient", "P1", "--date", "1700000000", "--type", "Installment", "--total", "500", "--today", "2023-11-20",
	]);
	assert!(!output.status.success());
	let text = stdout(&output);
	assert!(text.contains("submit disabled"), "{text}");
	assert!(text.contains("planName: Plan name is required for Installment"), "{text}");
}

#[test]
fn simulate_success_goes_back() {
	let output = chairside(&["simulate"]);
	assert!(output.status.success());
	let text = stdout(&output);
	assert!(text.contains("notification [success] Success: Payment added successfully!"), "{text}");
	assert!(text.contains("navigate: back"), "{text}");
	assert!(text.contains("cache: 1 payment(s) for P1"), "{text}");
	assert!(text.contains("₱500"), "{text}");
}

#[test]
fn simulate_failure_reports_server_message() {
	let output = chairside(&["simulate", "--fail", "Patient not found"]);
	assert!(!output.status.success());
	let text = stdout(&output);
	assert!(text.contains("notification [error] Error: Patient not found"), "{text}");
	assert!(!text.contains("navigate:"), "{text}");
	assert!(text.contains("cache: 0 payment(s) for P1"), "{text}");
}
