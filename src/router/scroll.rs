//! Scroll handling on navigation.
//!
//! A [`ScrollBehavior`] is called after every navigation with the target
//! route, the route being left, and the position saved for the target entry
//! (only present for back/forward navigation). It returns where the viewport
//! should go, or `None` to leave it alone.

use super::core::ResolvedRoute;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Scroll offsets of the viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
	/// Horizontal offset.
	pub left: f64,
	/// Vertical offset.
	pub top: f64,
}

impl ScrollPosition {
	/// The top-left corner of the page.
	pub const TOP: ScrollPosition = ScrollPosition { left: 0.0, top: 0.0 };

	/// Creates a position.
	pub fn new(left: f64, top: f64) -> Self {
		Self { left, top }
	}
}

/// Callback deciding the scroll position after a navigation.
pub type ScrollBehavior = Arc<
	dyn Fn(&ResolvedRoute, &ResolvedRoute, Option<ScrollPosition>) -> Option<ScrollPosition>
		+ Send
		+ Sync,
>;

/// Scrolls to the top on every navigation.
pub fn always_top(
	_to: &ResolvedRoute,
	_from: &ResolvedRoute,
	_saved: Option<ScrollPosition>,
) -> Option<ScrollPosition> {
	Some(ScrollPosition::TOP)
}

/// Restores the saved position on back/forward, otherwise scrolls to the top.
pub fn saved_or_top(
	_to: &ResolvedRoute,
	_from: &ResolvedRoute,
	saved: Option<ScrollPosition>,
) -> Option<ScrollPosition> {
	Some(saved.unwrap_or(ScrollPosition::TOP))
}

/// Moves the browser viewport.
#[cfg(target_arch = "wasm32")]
pub fn apply(position: ScrollPosition) {
	if let Some(window) = web_sys::window() {
		window.scroll_to_with_x_and_y(position.left, position.top);
	}
}

/// Moves the browser viewport (non-WASM no-op).
#[cfg(not(target_arch = "wasm32"))]
pub fn apply(_position: ScrollPosition) {}

/// Reads the current viewport offsets.
#[cfg(target_arch = "wasm32")]
pub fn current_position() -> Option<ScrollPosition> {
	let window = web_sys::window()?;
	let left = window.scroll_x().ok()?;
	let top = window.scroll_y().ok()?;
	Some(ScrollPosition { left, top })
}

/// Reads the current viewport offsets (always `None` outside the browser).
#[cfg(not(target_arch = "wasm32"))]
pub fn current_position() -> Option<ScrollPosition> {
	None
}
