//! Navigation targets split into path, query, and hash.

use serde::{Deserialize, Serialize};

/// A navigation target such as `/generate?preset=basic#output`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
	/// Path component, always starting with `/`.
	pub path: String,
	/// Decoded query pairs in their original order.
	pub query: Vec<(String, String)>,
	/// Query string exactly as written, without the leading `?`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub raw_query: Option<String>,
	/// Fragment without the leading `#`.
	pub hash: Option<String>,
}

impl Location {
	/// Parses a target string.
	///
	/// An empty path becomes `/` and a missing leading slash is added. Query
	/// pairs that fail to decode are dropped from `query` but stay in
	/// `raw_query`.
	///
	/// ```
	/// use genpages::router::Location;
	///
	/// let loc = Location::parse("/generate?preset=basic#output");
	/// assert_eq!(loc.path, "/generate");
	/// assert_eq!(loc.query_value("preset"), Some("basic"));
	/// assert_eq!(loc.hash.as_deref(), Some("output"));
	/// ```
	pub fn parse(target: &str) -> Self {
		let (rest, hash) = match target.split_once('#') {
			Some((rest, hash)) => (rest, Some(hash.to_string())),
			None => (target, None),
		};

		let (path, query_str) = match rest.split_once('?') {
			Some((path, query)) => (path, Some(query)),
			None => (rest, None),
		};

		let query = query_str
			.and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
			.unwrap_or_default();

		Self {
			path: normalize_path(path),
			query,
			raw_query: query_str.filter(|q| !q.is_empty()).map(str::to_string),
			hash,
		}
	}

	/// Returns the first value for a query key.
	pub fn query_value(&self, key: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Rebuilds `path?query#hash`.
	///
	/// A parsed query is emitted as written. Only a location built by hand,
	/// with pairs and no `raw_query`, has its query encoded.
	pub fn full_path(&self) -> String {
		let mut out = self.path.clone();
		if let Some(raw) = &self.raw_query {
			out.push('?');
			out.push_str(raw);
		} else if !self.query.is_empty()
			&& let Ok(encoded) = serde_urlencoded::to_string(&self.query)
		{
			out.push('?');
			out.push_str(&encoded);
		}
		if let Some(hash) = &self.hash {
			out.push('#');
			out.push_str(hash);
		}
		out
	}
}

fn normalize_path(path: &str) -> String {
	if path.is_empty() {
		"/".to_string()
	} else if path.starts_with('/') {
		path.to_string()
	} else {
		format!("/{}", path)
	}
}
