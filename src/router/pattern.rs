//! Path Pattern Matching for client-side routes.
//!
//! Patterns are literal paths with optional parameters:
//!
//! - `/about` - exact match
//! - `/users/{id}` - one path segment captured as `id`
//! - `/{path_match:*}` - wildcard, captures the rest of the path (including `/`)
//!
//! Matching is non-strict and case-insensitive by default: `/about/` and
//! `/About` both match `/about`. See [`PatternOptions`].

use super::error::PatternError;
use std::collections::HashMap;
use std::fmt;

/// Maximum allowed length for a route pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Matching options applied when a pattern is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternOptions {
	/// Require the trailing slash to match exactly.
	pub strict: bool,
	/// Match letter case exactly.
	pub sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
	Literal(String),
	Param { name: String, wildcard: bool },
}

/// A compiled route path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	pattern: String,
	tokens: Vec<Token>,
	regex: regex::Regex,
	param_names: Vec<String>,
	options: PatternOptions,
}

impl PathPattern {
	/// Compiles a pattern with the default (non-strict, case-insensitive) options.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern exceeds the size limits, has an
	/// unclosed or badly named parameter, or compiles to an invalid regex.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		Self::with_options(pattern, PatternOptions::default())
	}

	/// Compiles a pattern with explicit matching options.
	pub fn with_options(pattern: &str, options: PatternOptions) -> Result<Self, PatternError> {
		// Reject oversized patterns before building a regex from them
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				len: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let tokens = tokenize(pattern)?;
		let param_names: Vec<String> = tokens
			.iter()
			.filter_map(|t| match t {
				Token::Param { name, .. } => Some(name.clone()),
				Token::Literal(_) => None,
			})
			.collect();

		let regex_str = build_regex(&tokens, options.strict);
		let regex = regex::RegexBuilder::new(&regex_str)
			.case_insensitive(!options.sensitive)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex(e.to_string()))?;

		Ok(Self {
			pattern: pattern.to_string(),
			tokens,
			regex,
			param_names,
			options,
		})
	}

	/// Returns the original pattern string.
	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns the options this pattern was compiled with.
	pub fn options(&self) -> PatternOptions {
		self.options
	}

	/// Attempts to match a path against this pattern.
	///
	/// Returns `Some((params, param_values))` on a match, where `params` maps
	/// names to percent-decoded values and `param_values` keeps pattern order.
	pub fn matches(&self, path: &str) -> Option<(HashMap<String, String>, Vec<String>)> {
		let caps = self.regex.captures(path)?;

		let param_values: Vec<String> = self
			.param_names
			.iter()
			.map(|name| {
				caps.name(name)
					.map(|m| decode(m.as_str()))
					.unwrap_or_default()
			})
			.collect();

		let params = self
			.param_names
			.iter()
			.cloned()
			.zip(param_values.iter().cloned())
			.collect();

		Some((params, param_values))
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Generates a path from this pattern with the given parameters.
	///
	/// Returns `None` if a parameter is missing. Values are percent-encoded;
	/// wildcard values keep their `/` separators.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let mut result = String::with_capacity(self.pattern.len());

		for token in &self.tokens {
			match token {
				Token::Literal(text) => result.push_str(text),
				Token::Param { name, wildcard } => {
					let value = params.get(name)?;
					if *wildcard {
						let encoded: Vec<String> = value
							.split('/')
							.map(|seg| urlencoding::encode(seg).into_owned())
							.collect();
						result.push_str(&encoded.join("/"));
					} else {
						result.push_str(&urlencoding::encode(value));
					}
				}
			}
		}

		Some(result)
	}

	/// Returns whether this is an exact match pattern (no parameters).
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Returns whether this pattern contains a wildcard parameter.
	///
	/// Catch-all patterns are always ordered after concrete ones by the router.
	pub fn is_catch_all(&self) -> bool {
		self.tokens
			.iter()
			.any(|t| matches!(t, Token::Param { wildcard: true, .. }))
	}

	/// Returns the first wildcard parameter name, if any.
	pub fn wildcard_name(&self) -> Option<&str> {
		self.tokens.iter().find_map(|t| match t {
			Token::Param {
				name,
				wildcard: true,
			} => Some(name.as_str()),
			_ => None,
		})
	}
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
	let mut tokens = Vec::new();
	let mut literal = String::new();
	let mut chars = pattern.chars();

	while let Some(c) = chars.next() {
		if c != '{' {
			literal.push(c);
			continue;
		}

		if !literal.is_empty() {
			tokens.push(Token::Literal(std::mem::take(&mut literal)));
		}

		let mut body = String::new();
		let mut closed = false;
		for next in chars.by_ref() {
			if next == '}' {
				closed = true;
				break;
			}
			body.push(next);
		}
		if !closed {
			return Err(PatternError::UnclosedParameter(pattern.to_string()));
		}

		let (name, wildcard) = match body.split_once(':') {
			Some((name, "*")) => (name.to_string(), true),
			Some(_) => {
				return Err(PatternError::InvalidParameterName {
					name: body,
					pattern: pattern.to_string(),
				});
			}
			None => (body, false),
		};

		if !is_valid_param_name(&name) {
			return Err(PatternError::InvalidParameterName {
				name,
				pattern: pattern.to_string(),
			});
		}

		let duplicate = tokens
			.iter()
			.any(|t| matches!(t, Token::Param { name: n, .. } if *n == name));
		if duplicate {
			return Err(PatternError::DuplicateParameter {
				name,
				pattern: pattern.to_string(),
			});
		}

		tokens.push(Token::Param { name, wildcard });
	}

	if !literal.is_empty() {
		tokens.push(Token::Literal(literal));
	}

	Ok(tokens)
}

fn is_valid_param_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' => {
			chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
		}
		_ => false,
	}
}

fn build_regex(tokens: &[Token], strict: bool) -> String {
	let mut regex_str = String::from("^");

	let last = tokens.len().saturating_sub(1);
	let mut trailing_slash_optional = !strict;

	for (i, token) in tokens.iter().enumerate() {
		match token {
			Token::Literal(text) => {
				let mut text = text.as_str();
				// `/about/` and `/about` are equivalent in non-strict mode
				if !strict && i == last && text.len() > 1 && text.ends_with('/') {
					text = &text[..text.len() - 1];
				}
				if !strict && i == last && tokens.len() == 1 && text == "/" {
					trailing_slash_optional = false;
				}
				regex_str.push_str(&regex::escape(text));
			}
			Token::Param { name, wildcard } => {
				if *wildcard {
					regex_str.push_str(&format!("(?P<{}>.*)", name));
				} else {
					regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
				}
			}
		}
	}

	if trailing_slash_optional {
		regex_str.push_str("/?");
	}
	regex_str.push('$');
	regex_str
}

fn decode(raw: &str) -> String {
	urlencoding::decode(raw)
		.map(|s| s.into_owned())
		.unwrap_or_else(|_| raw.to_string())
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern && self.options == other.options
	}
}

impl Eq for PathPattern {}

impl fmt::Display for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
