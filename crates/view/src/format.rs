//! Date and currency text, en-US style.
//!
//! Timestamps render in UTC.

use chrono::{DateTime, Utc};

const INVALID_DATE: &str = "Invalid Date";

pub fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
	DateTime::from_timestamp(secs, 0)
}

/// `Oct 18, 2026`
pub fn short_date(at: DateTime<Utc>) -> String {
	at.format("%b %-d, %Y").to_string()
}

/// `October 18, 2026 at 3:04:05 PM`
pub fn long_timestamp(at: DateTime<Utc>) -> String {
	at.format("%B %-d, %Y at %-I:%M:%S %p").to_string()
}

/// `Sun Oct 18 2026`, for a unix-seconds date.
pub fn day_label(secs: i64) -> String {
	from_unix(secs).map_or_else(|| INVALID_DATE.to_string(), |at| at.format("%a %b %d %Y").to_string())
}

/// `Oct 18 2026`, for a unix-seconds date.
pub fn card_date(secs: i64) -> String {
	from_unix(secs).map_or_else(|| INVALID_DATE.to_string(), |at| at.format("%b %d %Y").to_string())
}

/// Currency amount formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
	pub symbol: String,
	/// Thousands separators in the integer part.
	pub grouping: bool,
}

impl Default for Money {
	fn default() -> Self {
		Self {
			symbol: "₱".to_string(),
			grouping: true,
		}
	}
}

impl Money {
	/// Formats with at most three fraction digits and no trailing zeros:
	/// `1500.0` is `₱1,500`, `1234.5` is `₱1,234.5`.
	pub fn format(&self, amount: f64) -> String {
		if !amount.is_finite() {
			return format!("{}{amount}", self.symbol);
		}
		let rounded = (amount.abs() * 1000.0).round() / 1000.0;
		let text = format!("{rounded:.3}");
		let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
		let frac = frac.trim_end_matches('0');
		let int = if self.grouping { group(int) } else { int.to_string() };
		let sign = if amount < 0.0 && rounded != 0.0 { "-" } else { "" };
		let point = if frac.is_empty() { "" } else { "." };
		format!("{}{sign}{int}{point}{frac}", self.symbol)
	}
}

fn group(digits: &str) -> String {
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}
