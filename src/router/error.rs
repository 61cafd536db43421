//! Error types for client-side routing.

/// Error raised when a path pattern cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
	/// Pattern string is longer than the allowed maximum.
	#[error("Pattern length {len} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Actual length in bytes.
		len: usize,
		/// Maximum length in bytes.
		max: usize,
	},
	/// Pattern has more path segments than allowed.
	#[error("Pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual number of segments.
		count: usize,
		/// Maximum number of segments.
		max: usize,
	},
	/// A `{` was never closed.
	#[error("Unclosed parameter in pattern '{0}'")]
	UnclosedParameter(String),
	/// A parameter had no name or an invalid one.
	#[error("Invalid parameter name '{name}' in pattern '{pattern}'")]
	InvalidParameterName {
		/// The offending parameter name.
		name: String,
		/// The full pattern.
		pattern: String,
	},
	/// The same parameter name appears twice.
	#[error("Duplicate parameter '{name}' in pattern '{pattern}'")]
	DuplicateParameter {
		/// The repeated parameter name.
		name: String,
		/// The full pattern.
		pattern: String,
	},
	/// The generated regex failed to compile.
	#[error("Failed to compile pattern regex: {0}")]
	Regex(String),
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// Invalid route name.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),
	/// Missing parameter for reverse URL.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),
	/// Navigation failed.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// A route pattern was rejected.
	#[error("Invalid route pattern: {0}")]
	InvalidPattern(#[from] PatternError),
}

/// Error type for loading a [`RouterConfig`](super::RouterConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The TOML document could not be parsed.
	#[error("Failed to parse router config: {0}")]
	Parse(#[from] toml::de::Error),
	/// The base path is not usable.
	#[error("Invalid base path '{0}': must not contain '?' or '#'")]
	InvalidBase(String),
}
