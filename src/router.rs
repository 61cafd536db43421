//! Client-side routing.
//!
//! The router maps URL paths to views, keeps a session history (mirrored to
//! the browser on WASM) and exposes the current route through reactive
//! [`Signal`](crate::reactive::Signal)s.
//!
//! ## Route Patterns
//!
//! - `/users` matches `/users` and, unless strict, `/users/`
//! - `/users/{id}` captures one segment as `id`
//! - `/{path_match:*}` captures everything, including `/`
//!
//! Matching is case-insensitive unless the router is configured as
//! `sensitive`. Catch-all routes are always tried after concrete ones.
//!
//! ## Example
//!
//! ```
//! use genpages::component::View;
//! use genpages::router::{History, Router, scroll};
//!
//! let router = Router::new()
//! 	.history(History::memory())
//! 	.route("/", || View::text("Home"))
//! 	.named_route("user", "/users/{id}", || View::text("User"))
//! 	.named_route_with_params("NotFound", "/{path_match:*}", |params| {
//! 		View::text(format!("No page at /{}", params["path_match"]))
//! 	})
//! 	.scroll_behavior(scroll::always_top);
//!
//! router.push("/users/42").unwrap();
//! assert_eq!(router.current_route_name().get().as_deref(), Some("user"));
//! assert_eq!(router.reverse("user", &[("id", "7")]).unwrap(), "/users/7");
//! ```

mod components;
mod config;
mod core;
mod error;
mod history;
mod location;
mod pattern;
pub mod scroll;

pub use components::{Link, Redirect, RouterOutlet, guard, guard_or};
pub use config::{RouterConfig, ScrollMode};
pub use self::core::{AfterEachHook, ResolvedRoute, Route, RouteMatch, Router};
pub use error::{ConfigError, PatternError, RouterError};
#[cfg(target_arch = "wasm32")]
pub use history::setup_popstate_listener;
pub use history::{History, HistoryError, HistoryMode, HistoryState, NavigationType};
pub use location::Location;
pub use pattern::{PathPattern, PatternOptions};
pub use scroll::{ScrollBehavior, ScrollPosition};
