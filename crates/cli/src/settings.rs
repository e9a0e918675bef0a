//! Maps the file configuration onto library settings.

use std::time::Duration;

use chairside_config::Config;
use chairside_view::Money;
use chairside_workflow::{AutoDismiss, NotificationStyle, Routes};

pub fn notification_style(config: &Config) -> NotificationStyle {
	let auto_dismiss = match config.notifications.duration_ms {
		0 => AutoDismiss::Never,
		ms => AutoDismiss::After(Duration::from_millis(ms)),
	};
	NotificationStyle {
		auto_dismiss,
		closable: config.notifications.closable,
	}
}

pub fn money(config: &Config) -> Money {
	Money {
		symbol: config.display.currency_symbol.clone(),
		grouping: config.display.locale_grouping,
	}
}

pub fn routes(config: &Config) -> Routes {
	Routes::new(config.routes.base.as_str())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_library_defaults() {
		let config = Config::default();
		assert_eq!(notification_style(&config), NotificationStyle::default());
		assert_eq!(money(&config), Money::default());
		assert_eq!(routes(&config), Routes::default());
	}

	#[test]
	fn zero_duration_never_dismisses() {
		let config = Config::from_toml_str("[notifications]\nduration_ms = 0\nclosable = false").unwrap();
		let style = notification_style(&config);
		assert_eq!(style.auto_dismiss, AutoDismiss::Never);
		assert!(!style.closable);
	}
}
