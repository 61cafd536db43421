//! History strategies for the client-side router.
//!
//! [`History`] keeps the session stack (entries plus a cursor) on every
//! target. On WASM the `Web` and `Hash` modes also mirror each entry into
//! `window.history`, so the address bar and the back/forward buttons stay in
//! sync. Outside the browser every mode behaves like `Memory`.

use super::scroll::ScrollPosition;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// How route state is reflected in the browser URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
	/// Real URL paths (`/about`), using the History API.
	#[default]
	Web,
	/// Fragment URLs (`#/about`), for hosts without server-side fallback.
	Hash,
	/// No browser integration; the stack lives only in memory.
	Memory,
}

/// Kind of navigation that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new entry was pushed.
	Push,
	/// The current entry was replaced.
	Replace,
	/// The cursor moved to an existing entry (back/forward).
	Pop,
}

/// Error raised by browser history operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
	/// `window` is not available.
	#[error("Window object not available")]
	NoWindow,
	/// A History API call threw.
	#[error("History API call failed: {0}")]
	Js(String),
	/// The entry could not be serialized into `history.state`.
	#[error("Failed to serialize history state: {0}")]
	Serialize(String),
}

/// One entry of the session stack.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryState {
	/// Full path (`path?query#hash`) relative to the base.
	pub path: String,
	/// Parameters of the route matched when the entry was written.
	pub params: HashMap<String, String>,
	/// Name of the matched route, if it has one.
	pub route_name: Option<String>,
	/// Scroll offsets saved when the entry was left.
	pub scroll: Option<ScrollPosition>,
	/// Index of the entry in the session stack.
	pub position: usize,
}

impl HistoryState {
	/// Creates an entry for a path.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			..Self::default()
		}
	}

	/// Sets the matched parameters.
	pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
		self.params = params;
		self
	}

	/// Sets the matched route name.
	pub fn with_route_name(mut self, name: Option<String>) -> Self {
		self.route_name = name;
		self
	}
}

/// Session history with a mode-specific browser binding.
#[derive(Debug)]
pub struct History {
	mode: HistoryMode,
	base: String,
	entries: RefCell<Vec<HistoryState>>,
	index: Cell<usize>,
}

impl History {
	/// Creates a history for the given mode and base path.
	///
	/// The first entry is read from `window.location` on WASM for browser
	/// modes, and is `/` everywhere else.
	pub fn new(mode: HistoryMode, base: &str) -> Self {
		let base = normalize_base(base);
		let initial = initial_location(mode, &base).unwrap_or_else(|| "/".to_string());

		Self {
			mode,
			base,
			entries: RefCell::new(vec![HistoryState::new(initial)]),
			index: Cell::new(0),
		}
	}

	/// Real-path history under `base`.
	pub fn web(base: &str) -> Self {
		Self::new(HistoryMode::Web, base)
	}

	/// Fragment history under `base`.
	pub fn hash(base: &str) -> Self {
		Self::new(HistoryMode::Hash, base)
	}

	/// In-memory history starting at `/`.
	pub fn memory() -> Self {
		Self::new(HistoryMode::Memory, "")
	}

	/// Returns the mode.
	pub fn mode(&self) -> HistoryMode {
		self.mode
	}

	/// Returns the normalized base (no trailing slash, empty for root).
	pub fn base(&self) -> &str {
		&self.base
	}

	/// Builds the `href` for a router path in this mode.
	pub fn href(&self, path: &str) -> String {
		match self.mode {
			HistoryMode::Web => format!("{}{}", self.base, path),
			HistoryMode::Hash => format!("{}#{}", self.base, path),
			HistoryMode::Memory => path.to_string(),
		}
	}

	/// Returns the path of the current entry.
	pub fn location(&self) -> String {
		self.current().path
	}

	/// Returns a copy of the current entry.
	pub fn current(&self) -> HistoryState {
		self.entries.borrow()[self.index.get()].clone()
	}

	/// Returns the cursor position.
	pub fn position(&self) -> usize {
		self.index.get()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Returns whether the stack is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// Pushes a new entry, dropping any forward entries.
	pub fn push(&self, mut state: HistoryState) -> Result<(), HistoryError> {
		let next = self.index.get() + 1;
		state.position = next;
		self.browser_write(&state, NavigationType::Push)?;

		let mut entries = self.entries.borrow_mut();
		entries.truncate(next);
		entries.push(state);
		self.index.set(next);
		Ok(())
	}

	/// Replaces the current entry.
	pub fn replace(&self, mut state: HistoryState) -> Result<(), HistoryError> {
		let index = self.index.get();
		state.position = index;
		self.browser_write(&state, NavigationType::Replace)?;

		self.entries.borrow_mut()[index] = state;
		Ok(())
	}

	/// Records the scroll offsets of the current entry.
	pub fn save_scroll(&self, position: ScrollPosition) -> Result<(), HistoryError> {
		let state = {
			let mut entries = self.entries.borrow_mut();
			let entry = &mut entries[self.index.get()];
			entry.scroll = Some(position);
			entry.clone()
		};
		self.browser_write(&state, NavigationType::Replace)
	}

	/// Moves the cursor by `delta` entries.
	///
	/// Returns the new current entry when the move happened synchronously.
	/// Returns `None` when `delta` is zero or out of range, and for browser
	/// modes on WASM, where the move completes later through `popstate`.
	pub fn go(&self, delta: isize) -> Option<HistoryState> {
		let Some(target) = (self.index.get() as isize).checked_add(delta) else {
			return None;
		};
		if delta == 0 || target < 0 || target >= self.len() as isize {
			return None;
		}

		if self.delegates_to_browser() {
			self.browser_go(delta);
			return None;
		}

		self.index.set(target as usize);
		Some(self.current())
	}

	/// Moves back one entry.
	pub fn back(&self) -> Option<HistoryState> {
		self.go(-1)
	}

	/// Moves forward one entry.
	pub fn forward(&self) -> Option<HistoryState> {
		self.go(1)
	}

	/// Aligns the stack with a `popstate` event.
	///
	/// A state carrying a known position moves the cursor there. Anything else
	/// (a manual URL edit, an entry written by another script) replaces the
	/// current entry with `path`.
	pub fn sync_popstate(&self, state: Option<HistoryState>, path: String) -> HistoryState {
		let mut entries = self.entries.borrow_mut();
		match state {
			Some(state) if state.position < entries.len() => {
				let position = state.position;
				entries[position] = state;
				self.index.set(position);
			}
			_ => {
				let index = self.index.get();
				let mut fresh = HistoryState::new(path);
				fresh.position = index;
				entries[index] = fresh;
			}
		}
		entries[self.index.get()].clone()
	}

	fn delegates_to_browser(&self) -> bool {
		cfg!(target_arch = "wasm32") && self.mode != HistoryMode::Memory
	}

	#[cfg(target_arch = "wasm32")]
	fn browser_write(&self, state: &HistoryState, nav: NavigationType) -> Result<(), HistoryError> {
		if self.mode == HistoryMode::Memory {
			return Ok(());
		}

		let window = web_sys::window().ok_or(HistoryError::NoWindow)?;
		let history = window.history().map_err(js_error)?;
		let json =
			serde_json::to_string(state).map_err(|e| HistoryError::Serialize(e.to_string()))?;
		let data = wasm_bindgen::JsValue::from_str(&json);
		let url = self.href(&state.path);

		match nav {
			NavigationType::Push => history.push_state_with_url(&data, "", Some(&url)),
			NavigationType::Replace | NavigationType::Pop => {
				history.replace_state_with_url(&data, "", Some(&url))
			}
		}
		.map_err(js_error)
	}

	#[cfg(not(target_arch = "wasm32"))]
	fn browser_write(&self, _state: &HistoryState, _nav: NavigationType) -> Result<(), HistoryError> {
		Ok(())
	}

	#[cfg(target_arch = "wasm32")]
	fn browser_go(&self, delta: isize) {
		let result = web_sys::window()
			.ok_or(HistoryError::NoWindow)
			.and_then(|w| w.history().map_err(js_error))
			.and_then(|h| h.go_with_delta(delta as i32).map_err(js_error));
		if let Err(e) = result {
			crate::warn_log!("history.go({}) failed: {}", delta, e);
		}
	}

	#[cfg(not(target_arch = "wasm32"))]
	fn browser_go(&self, _delta: isize) {}
}

/// Normalizes a base path: leading slash, no trailing slash, empty for root.
pub(crate) fn normalize_base(base: &str) -> String {
	let trimmed = base.trim().trim_end_matches('/');
	if trimmed.is_empty() {
		String::new()
	} else if trimmed.starts_with('/') {
		trimmed.to_string()
	} else {
		format!("/{}", trimmed)
	}
}

/// Strips the base from a browser pathname, keeping a leading slash.
#[cfg(any(target_arch = "wasm32", test))]
pub(crate) fn strip_base(pathname: &str, base: &str) -> String {
	let rest = match pathname.strip_prefix(base) {
		Some(rest) if base.is_empty() || rest.is_empty() || rest.starts_with('/') => rest,
		_ => pathname,
	};
	if rest.is_empty() {
		"/".to_string()
	} else {
		rest.to_string()
	}
}

/// Decodes an entry previously stored in `history.state`.
#[cfg(target_arch = "wasm32")]
pub(crate) fn state_from_js(value: &wasm_bindgen::JsValue) -> Option<HistoryState> {
	value
		.as_string()
		.and_then(|json| serde_json::from_str(&json).ok())
}

/// Reads the router path from `window.location` for the given mode.
#[cfg(target_arch = "wasm32")]
pub(crate) fn browser_location(mode: HistoryMode, base: &str) -> Option<String> {
	let location = web_sys::window()?.location();
	match mode {
		HistoryMode::Web => {
			let pathname = location.pathname().ok()?;
			let search = location.search().ok()?;
			let hash = location.hash().ok()?;
			Some(format!("{}{}{}", strip_base(&pathname, base), search, hash))
		}
		HistoryMode::Hash => {
			let hash = location.hash().ok()?;
			let path = hash.strip_prefix('#').unwrap_or(&hash);
			if path.is_empty() {
				Some("/".to_string())
			} else {
				Some(path.to_string())
			}
		}
		HistoryMode::Memory => None,
	}
}

#[cfg(target_arch = "wasm32")]
fn initial_location(mode: HistoryMode, base: &str) -> Option<String> {
	browser_location(mode, base)
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_location(_mode: HistoryMode, _base: &str) -> Option<String> {
	None
}

#[cfg(target_arch = "wasm32")]
fn js_error(value: wasm_bindgen::JsValue) -> HistoryError {
	HistoryError::Js(format!("{:?}", value))
}

/// Registers a `popstate` listener that reports the new path and entry.
///
/// The returned closure must be kept alive (usually with `.forget()`).
#[cfg(target_arch = "wasm32")]
pub fn setup_popstate_listener<F>(
	mode: HistoryMode,
	base: String,
	mut callback: F,
) -> Result<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::PopStateEvent)>, HistoryError>
where
	F: FnMut(String, Option<HistoryState>) + 'static,
{
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	let window = web_sys::window().ok_or(HistoryError::NoWindow)?;
	let closure = Closure::wrap(Box::new(move |event: web_sys::PopStateEvent| {
		let path = browser_location(mode, &base).unwrap_or_else(|| "/".to_string());
		callback(path, state_from_js(&event.state()));
	}) as Box<dyn FnMut(web_sys::PopStateEvent)>);

	window
		.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		.map_err(js_error)?;

	Ok(closure)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", "")]
	#[case("/", "")]
	#[case("app", "/app")]
	#[case("/app/", "/app")]
	#[case(" /nested/base// ", "/nested/base")]
	fn test_normalize_base(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(normalize_base(raw), expected);
	}

	#[rstest]
	#[case("/app/about", "/app", "/about")]
	#[case("/app", "/app", "/")]
	#[case("/application", "/app", "/application")]
	#[case("/about", "", "/about")]
	fn test_strip_base(#[case] pathname: &str, #[case] base: &str, #[case] expected: &str) {
		assert_eq!(strip_base(pathname, base), expected);
	}

	#[rstest]
	fn test_href_per_mode() {
		assert_eq!(History::web("/").href("/about"), "/about");
		assert_eq!(History::web("/app").href("/about"), "/app/about");
		assert_eq!(History::hash("").href("/about"), "#/about");
		assert_eq!(History::hash("/app/").href("/about"), "/app#/about");
		assert_eq!(History::memory().href("/about"), "/about");
	}

	#[rstest]
	fn test_mode_deserializes_lowercase() {
		let mode: HistoryMode = serde_json::from_str("\"hash\"").unwrap();
		assert_eq!(mode, HistoryMode::Hash);
		assert_eq!(HistoryMode::default(), HistoryMode::Web);
	}

	#[rstest]
	fn test_initial_entry_is_root() {
		let history = History::memory();
		assert_eq!(history.location(), "/");
		assert_eq!(history.len(), 1);
		assert_eq!(history.position(), 0);
		assert!(!history.is_empty());
	}

	#[rstest]
	fn test_push_and_replace() {
		let history = History::memory();
		history.push(HistoryState::new("/generate")).unwrap();
		history.push(HistoryState::new("/about")).unwrap();
		assert_eq!(history.len(), 3);
		assert_eq!(history.current().position, 2);

		history.replace(HistoryState::new("/custom-generate")).unwrap();
		assert_eq!(history.len(), 3);
		assert_eq!(history.location(), "/custom-generate");
		assert_eq!(history.current().position, 2);
	}

	#[rstest]
	fn test_back_forward_and_truncation() {
		let history = History::memory();
		history.push(HistoryState::new("/generate")).unwrap();
		history.push(HistoryState::new("/about")).unwrap();

		assert_eq!(history.back().map(|s| s.path), Some("/generate".to_string()));
		assert_eq!(history.forward().map(|s| s.path), Some("/about".to_string()));

		history.go(-2);
		assert_eq!(history.location(), "/");

		// Pushing from the middle discards forward entries
		history.push(HistoryState::new("/custom-generate")).unwrap();
		assert_eq!(history.len(), 2);
		assert!(history.forward().is_none());
	}

	#[rstest]
	#[case(0)]
	#[case(-1)]
	#[case(5)]
	#[case(isize::MAX)]
	#[case(isize::MIN)]
	fn test_go_out_of_range_is_noop(#[case] delta: isize) {
		let history = History::memory();
		assert!(history.go(delta).is_none());
		assert_eq!(history.position(), 0);
	}

	#[rstest]
	fn test_save_scroll_on_current_entry() {
		let history = History::memory();
		history
			.save_scroll(ScrollPosition::new(0.0, 480.0))
			.unwrap();
		assert_eq!(
			history.current().scroll,
			Some(ScrollPosition::new(0.0, 480.0))
		);
	}

	#[rstest]
	fn test_sync_popstate_with_known_position() {
		let history = History::memory();
		history.push(HistoryState::new("/about")).unwrap();

		let mut popped = HistoryState::new("/");
		popped.position = 0;
		let current = history.sync_popstate(Some(popped), "/".to_string());
		assert_eq!(current.path, "/");
		assert_eq!(history.position(), 0);
	}

	#[rstest]
	fn test_sync_popstate_without_state_replaces_current() {
		let history = History::memory();
		let current = history.sync_popstate(None, "/zz-unknown".to_string());
		assert_eq!(current.path, "/zz-unknown");
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	fn test_state_serializes_to_json() {
		let state = HistoryState::new("/about").with_route_name(Some("About".to_string()));
		let json = serde_json::to_string(&state).unwrap();
		let back: HistoryState = serde_json::from_str(&json).unwrap();
		assert_eq!(back, state);
	}
}
