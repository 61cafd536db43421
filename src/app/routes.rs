//! Route table of the generator app.
//!
//! Routes, in match order:
//! - `/` - Home
//! - `/generate` - Generate
//! - `/custom-generate` - Custom Generate
//! - `/about` - About
//! - `/{path_match:*}` - Not found (named `NotFound`)

use super::views;
use crate::router::{History, ResolvedRoute, Router, scroll};
use std::cell::RefCell;
use std::rc::Rc;

/// Path of the home page.
pub const HOME_PATH: &str = "/";
/// Path of the preset generator.
pub const GENERATE_PATH: &str = "/generate";
/// Path of the custom generator.
pub const CUSTOM_GENERATE_PATH: &str = "/custom-generate";
/// Path of the about page.
pub const ABOUT_PATH: &str = "/about";
/// Catch-all pattern for unmatched paths.
pub const NOT_FOUND_PATTERN: &str = "/{path_match:*}";
/// Name of the catch-all route.
pub const NOT_FOUND_NAME: &str = "NotFound";
/// Parameter holding the unmatched path.
pub const NOT_FOUND_PARAM: &str = "path_match";

/// App route enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
	/// `/`
	Home,
	/// `/generate`
	Generate,
	/// `/custom-generate`
	CustomGenerate,
	/// `/about`
	About,
	/// Anything else; `path` is the path that failed to match.
	NotFound {
		/// Requested path.
		path: String,
	},
}

impl AppRoute {
	/// Classifies a resolved route.
	pub fn from_resolved(resolved: &ResolvedRoute) -> Self {
		match resolved.pattern.as_deref() {
			Some(HOME_PATH) => Self::Home,
			Some(GENERATE_PATH) => Self::Generate,
			Some(CUSTOM_GENERATE_PATH) => Self::CustomGenerate,
			Some(ABOUT_PATH) => Self::About,
			_ => Self::NotFound {
				path: resolved.path.clone(),
			},
		}
	}

	/// Returns the path this route is served at.
	pub fn path(&self) -> &str {
		match self {
			Self::Home => HOME_PATH,
			Self::Generate => GENERATE_PATH,
			Self::CustomGenerate => CUSTOM_GENERATE_PATH,
			Self::About => ABOUT_PATH,
			Self::NotFound { path } => path,
		}
	}
}

// Global Router instance
// Initialized by init_global_router() and accessed via with_router()
thread_local! {
	static ROUTER: RefCell<Option<Rc<Router>>> = const { RefCell::new(None) };
}

/// Builds the app router.
///
/// Uses real URL paths under `/` and scrolls to the top after every
/// navigation.
pub fn init_router() -> Router {
	Router::new()
		.history(History::web("/"))
		.route(HOME_PATH, views::home_view)
		.route(GENERATE_PATH, views::generate_view)
		.route(CUSTOM_GENERATE_PATH, views::custom_generate_view)
		.route(ABOUT_PATH, views::about_view)
		.named_route_with_params(NOT_FOUND_NAME, NOT_FOUND_PATTERN, views::not_found_view)
		.scroll_behavior(scroll::always_top)
}

/// Initialize the global router instance
///
/// Call once at startup, before any routing operation. Calling it again
/// replaces the router.
pub fn init_global_router() {
	ROUTER.with(|r| {
		*r.borrow_mut() = Some(Rc::new(init_router()));
	});
}

/// Returns a handle to the global router, if initialized.
pub fn global_router() -> Option<Rc<Router>> {
	ROUTER.with(|r| r.borrow().clone())
}

/// Provides access to the global router instance
///
/// Returns `None` if the router has not been initialized via `init_global_router()`.
///
/// # Example
///
/// ```
/// use genpages::app::{init_global_router, try_with_router};
///
/// init_global_router();
/// assert_eq!(try_with_router(|router| router.route_count()), Some(5));
/// ```
pub fn try_with_router<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Router) -> R,
{
	global_router().map(|router| f(&router))
}

/// Provides access to the global router instance
///
/// # Panics
///
/// Panics if the router has not been initialized via `init_global_router()`.
/// Prefer `try_with_router` for non-panicking access.
pub fn with_router<F, R>(f: F) -> R
where
	F: FnOnce(&Router) -> R,
{
	try_with_router(f).expect("Router not initialized. Call init_global_router() first.")
}

/// Returns the app route the global router currently shows.
pub fn current_route() -> Option<AppRoute> {
	try_with_router(|router| AppRoute::from_resolved(&router.current_route().get()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	fn test_init_router_creates_routes() {
		let router = init_router();
		assert_eq!(router.route_count(), 5);
		assert!(router.has_route(NOT_FOUND_NAME));
	}

	#[rstest]
	fn test_route_order_is_declaration_order() {
		let router = init_router();
		let patterns: Vec<&str> = router
			.routes()
			.iter()
			.map(|r| r.pattern().as_str())
			.collect();
		assert_eq!(
			patterns,
			vec![
				HOME_PATH,
				GENERATE_PATH,
				CUSTOM_GENERATE_PATH,
				ABOUT_PATH,
				NOT_FOUND_PATTERN
			]
		);
	}

	#[rstest]
	#[case("/", AppRoute::Home)]
	#[case("/generate", AppRoute::Generate)]
	#[case("/custom-generate", AppRoute::CustomGenerate)]
	#[case("/about", AppRoute::About)]
	#[case("/zz-unknown", AppRoute::NotFound { path: "/zz-unknown".to_string() })]
	fn test_from_resolved(#[case] path: &str, #[case] expected: AppRoute) {
		let router = init_router();
		assert_eq!(AppRoute::from_resolved(&router.resolve(path)), expected);
	}

	#[rstest]
	fn test_app_route_path() {
		assert_eq!(AppRoute::CustomGenerate.path(), "/custom-generate");
		assert_eq!(
			AppRoute::NotFound {
				path: "/x/y".to_string()
			}
			.path(),
			"/x/y"
		);
	}

	#[rstest]
	fn test_reverse_not_found() {
		let router = init_router();
		let url = router
			.reverse(NOT_FOUND_NAME, &[(NOT_FOUND_PARAM, "missing/page")])
			.unwrap();
		assert_eq!(url, "/missing/page");
	}

	#[rstest]
	#[serial(app_router)]
	fn test_init_global_router() {
		init_global_router();

		with_router(|router| {
			assert_eq!(router.route_count(), 5);
			assert!(router.has_route(NOT_FOUND_NAME));
		});
		assert_eq!(current_route(), Some(AppRoute::Home));
	}

	#[rstest]
	#[serial(app_router)]
	fn test_global_navigation_updates_current_route() {
		init_global_router();

		with_router(|router| router.push(ABOUT_PATH)).unwrap();
		assert_eq!(current_route(), Some(AppRoute::About));

		// Re-initializing starts from a fresh router
		init_global_router();
		assert_eq!(current_route(), Some(AppRoute::Home));
	}

	#[rstest]
	#[serial(app_router)]
	#[should_panic(expected = "Router not initialized")]
	fn test_with_router_panics_when_not_initialized() {
		ROUTER.with(|r| *r.borrow_mut() = None);

		with_router(|_| {});
	}

	#[rstest]
	#[serial(app_router)]
	fn test_try_with_router_returns_none_when_not_initialized() {
		ROUTER.with(|r| *r.borrow_mut() = None);

		assert!(try_with_router(|router| router.route_count()).is_none());
		assert!(global_router().is_none());
		assert!(current_route().is_none());
	}
}
