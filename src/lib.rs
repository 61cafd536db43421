//! genpages - client-side routing for the generator single-page app
//!
//! The crate declares which view renders at which URL and provides the
//! client-side router that drives it: path patterns with a catch-all
//! fallback, web/hash/memory history, scroll reset on navigation, and a
//! small view tree that renders to HTML or mounts into the DOM.
//!
//! ## Architecture
//!
//! - [`router`]: path patterns, history, scroll handling, the [`Router`] itself
//!   and the `Link`/`RouterOutlet`/`Redirect` components
//! - [`app`]: the route table of the generator app, its page views and, on
//!   WASM, the launcher that mounts everything into `#app`
//! - [`component`]: `View`, `ElementView` and the `IntoView`/`Component` traits
//! - [`reactive`]: `Signal<T>`, the shared value the router publishes its
//!   current state through
//! - [`logging`]: `debug_log!`/`info_log!`/`warn_log!`/`error_log!`
//!
//! ## Example
//!
//! ```
//! use genpages::app::{AppRoute, init_router};
//!
//! let router = init_router();
//! router.push("/about").unwrap();
//! assert_eq!(AppRoute::from_resolved(&router.current_route().get()), AppRoute::About);
//!
//! router.push("/zz-unknown").unwrap();
//! assert_eq!(
//! 	router.current_params().get().get("path_match").map(String::as_str),
//! 	Some("zz-unknown")
//! );
//! assert_eq!(router.last_scroll().get().map(|p| p.top), Some(0.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `debug-routing`: log every navigation through `debug_log!`
//! - `console_error_panic_hook`: readable panic messages in the browser console

#![warn(missing_docs)]

// Core modules
pub mod logging;
pub mod reactive;

// Component system
pub mod component;

// Client-side routing
pub mod router;

// The generator app
pub mod app;

// Re-export commonly used types
pub use component::{Component, ElementView, IntoView, View};
pub use reactive::Signal;
pub use router::{History, HistoryMode, Link, ResolvedRoute, Router, RouterConfig, RouterError};

#[doc(hidden)]
pub mod __private {
	pub use tracing;
}
