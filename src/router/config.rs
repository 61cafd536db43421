//! Declarative router settings.

use super::error::ConfigError;
use super::history::{History, HistoryMode};
use super::pattern::PatternOptions;
use super::scroll::{self, ScrollBehavior};
use serde::Deserialize;
use std::sync::Arc;

/// Which scroll callback the router installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
	/// Always scroll to the top.
	#[default]
	Top,
	/// Restore saved positions on back/forward, otherwise scroll to the top.
	Saved,
	/// Leave the viewport alone.
	None,
}

/// Router settings, loadable from TOML.
///
/// ```
/// use genpages::router::{HistoryMode, RouterConfig, ScrollMode};
///
/// let config = RouterConfig::from_toml_str(r#"
/// history = "hash"
/// base = "/app"
/// scroll = "saved"
/// "#).unwrap();
/// assert_eq!(config.history, HistoryMode::Hash);
/// assert_eq!(config.scroll, ScrollMode::Saved);
/// assert!(!config.strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
	/// History strategy.
	pub history: HistoryMode,
	/// Base path the application is served under.
	pub base: String,
	/// Reject a trailing slash that the pattern does not have.
	pub strict: bool,
	/// Match paths case-sensitively.
	pub sensitive: bool,
	/// Scroll handling after navigation.
	pub scroll: ScrollMode,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			history: HistoryMode::Web,
			base: "/".to_string(),
			strict: false,
			sensitive: false,
			scroll: ScrollMode::Top,
		}
	}
}

impl RouterConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that the base path can be joined with router paths.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.base.contains(['?', '#']) {
			return Err(ConfigError::InvalidBase(self.base.clone()));
		}
		Ok(())
	}

	/// Builds the history described by `history` and `base`.
	pub fn build_history(&self) -> History {
		History::new(self.history, &self.base)
	}

	/// Pattern options for routes registered under this config.
	pub fn pattern_options(&self) -> PatternOptions {
		PatternOptions {
			strict: self.strict,
			sensitive: self.sensitive,
		}
	}

	/// Scroll callback for `scroll`, or `None` for [`ScrollMode::None`].
	pub fn scroll_behavior(&self) -> Option<ScrollBehavior> {
		match self.scroll {
			ScrollMode::Top => Some(Arc::new(scroll::always_top)),
			ScrollMode::Saved => Some(Arc::new(scroll::saved_or_top)),
			ScrollMode::None => None,
		}
	}
}
