//! Client configuration.
//!
//! A single TOML file; every section and key is optional:
//!
//! ```toml
//! [notifications]
//! duration_ms = 5000   # 0 keeps notifications until closed
//! closable = true
//!
//! [display]
//! currency_symbol = "₱"
//! locale_grouping = true
//!
//! [routes]
//! base = "/dash"
//! ```
//!
//! A missing file yields the defaults. Unknown keys are rejected.

pub mod error;

use std::path::Path;

pub use error::{ConfigError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub notifications: NotificationsConfig,
	pub display: DisplayConfig,
	pub routes: RoutesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationsConfig {
	/// Auto-dismiss delay; `0` disables auto-dismiss.
	pub duration_ms: u64,
	pub closable: bool,
}

impl Default for NotificationsConfig {
	fn default() -> Self {
		Self {
			duration_ms: 5000,
			closable: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
	pub currency_symbol: String,
	/// Thousands separators in amounts.
	pub locale_grouping: bool,
}

impl Default for DisplayConfig {
	fn default() -> Self {
		Self {
			currency_symbol: "₱".to_string(),
			locale_grouping: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
	/// Prefix of every dashboard route.
	pub base: String,
}

impl Default for RoutesConfig {
	fn default() -> Self {
		Self { base: "/dash".to_string() }
	}
}

impl Config {
	/// Parse and validate a TOML string.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file; a missing file yields the defaults.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "config.missing");
				return Ok(Self::default());
			}
			Err(error) => {
				return Err(ConfigError::Io {
					path: path.to_path_buf(),
					error,
				});
			}
		};
		let config = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), "config.load");
		Ok(config)
	}

	fn validate(&self) -> Result<()> {
		if self.display.currency_symbol.is_empty() {
			return Err(ConfigError::Invalid {
				field: "display.currency_symbol",
				reason: "must not be empty".to_string(),
			});
		}
		if !self.routes.base.starts_with('/') {
			return Err(ConfigError::Invalid {
				field: "routes.base",
				reason: format!("{:?} must start with '/'", self.routes.base),
			});
		}
		Ok(())
	}
}
