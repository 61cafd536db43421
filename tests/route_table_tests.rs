//! Route table tests for the generator app
//!
//! Covers the behaviour the app relies on:
//! - every declared path resolves to its own view
//! - anything else lands on the not-found view, with the path captured
//! - every navigation leaves the viewport at the top
//! - the catch-all entry is last and never shadows a declared path

use genpages::app::routes::{
	ABOUT_PATH, CUSTOM_GENERATE_PATH, GENERATE_PATH, HOME_PATH, NOT_FOUND_NAME, NOT_FOUND_PARAM,
	NOT_FOUND_PATTERN,
};
use genpages::app::{AppRoute, current_route, init_global_router, init_router, views, with_router};
use genpages::router::{HistoryMode, ScrollPosition};
use proptest::prelude::*;
use rstest::rstest;
use serial_test::serial;
use std::collections::HashMap;

#[rstest]
#[case(HOME_PATH, AppRoute::Home, views::home_view())]
#[case(GENERATE_PATH, AppRoute::Generate, views::generate_view())]
#[case(CUSTOM_GENERATE_PATH, AppRoute::CustomGenerate, views::custom_generate_view())]
#[case(ABOUT_PATH, AppRoute::About, views::about_view())]
fn test_declared_paths_resolve_to_their_views(
	#[case] path: &str,
	#[case] route: AppRoute,
	#[case] view: genpages::View,
) {
	let router = init_router();
	router.push(path).unwrap();

	assert_eq!(AppRoute::from_resolved(&router.current_route().get()), route);
	assert_eq!(router.render_current(), view);
	assert!(router.current_route_name().get().is_none());
}

#[rstest]
fn test_unknown_path_resolves_to_not_found() {
	let router = init_router();
	router.push("/zz-unknown").unwrap();

	let resolved = router.current_route().get();
	assert_eq!(resolved.name.as_deref(), Some(NOT_FOUND_NAME));
	assert_eq!(resolved.param(NOT_FOUND_PARAM), Some("zz-unknown"));
	assert_eq!(
		AppRoute::from_resolved(&resolved),
		AppRoute::NotFound {
			path: "/zz-unknown".to_string()
		}
	);

	let params = HashMap::from([(NOT_FOUND_PARAM.to_string(), "zz-unknown".to_string())]);
	assert_eq!(router.render_current(), views::not_found_view(&params));
}

#[rstest]
#[case("/about/", AppRoute::About)]
#[case("/About", AppRoute::About)]
#[case("/generate?preset=basic", AppRoute::Generate)]
#[case("/custom-generate#output", AppRoute::CustomGenerate)]
fn test_declared_paths_tolerate_variants(#[case] target: &str, #[case] expected: AppRoute) {
	let router = init_router();
	assert_eq!(AppRoute::from_resolved(&router.resolve(target)), expected);
}

#[rstest]
#[case("/generate/extra")]
#[case("/about-us")]
#[case("/custom")]
#[case("/a/b/c")]
fn test_near_misses_are_not_found(#[case] target: &str) {
	let router = init_router();
	let resolved = router.resolve(target);
	assert_eq!(resolved.name.as_deref(), Some(NOT_FOUND_NAME));
	assert_eq!(
		resolved.param(NOT_FOUND_PARAM),
		Some(target.trim_start_matches('/'))
	);
}

#[rstest]
fn test_catch_all_is_last() {
	let router = init_router();
	let last = router.routes().last().map(|r| r.pattern().as_str());
	assert_eq!(last, Some(NOT_FOUND_PATTERN));
	assert_eq!(router.resolve(ABOUT_PATH).pattern.as_deref(), Some(ABOUT_PATH));
}

#[rstest]
fn test_history_is_web_at_root() {
	let router = init_router();
	assert_eq!(router.history_ref().mode(), HistoryMode::Web);
	assert_eq!(router.history_ref().base(), "");
	assert_eq!(router.href(ABOUT_PATH), "/about");
}

#[rstest]
fn test_every_navigation_scrolls_to_top() {
	let router = init_router();
	let targets = [
		GENERATE_PATH,
		CUSTOM_GENERATE_PATH,
		"/zz-unknown",
		ABOUT_PATH,
		HOME_PATH,
	];

	for target in targets {
		router
			.history_ref()
			.save_scroll(ScrollPosition::new(0.0, 720.0))
			.unwrap();
		router.push(target).unwrap();
		assert_eq!(router.last_scroll().get().map(|p| p.top), Some(0.0));
	}

	// Back/forward also reset, even with a saved position
	assert!(router.back());
	assert_eq!(router.last_scroll().get(), Some(ScrollPosition::TOP));
	assert!(router.go(-2));
	assert_eq!(router.last_scroll().get(), Some(ScrollPosition::TOP));
}

#[rstest]
#[serial(app_router)]
fn test_global_router_navigation() {
	init_global_router();

	with_router(|router| router.push(CUSTOM_GENERATE_PATH)).unwrap();
	assert_eq!(current_route(), Some(AppRoute::CustomGenerate));

	with_router(|router| router.push("/missing")).unwrap();
	assert_eq!(
		current_route(),
		Some(AppRoute::NotFound {
			path: "/missing".to_string()
		})
	);
}

fn is_declared(path: &str) -> bool {
	let trimmed = path.trim_end_matches('/').to_ascii_lowercase();
	[GENERATE_PATH, CUSTOM_GENERATE_PATH, ABOUT_PATH]
		.iter()
		.any(|p| *p == trimmed)
		|| trimmed.is_empty()
}

proptest! {
	#[test]
	fn prop_unknown_paths_resolve_to_not_found(
		segments in prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 1..5)
	) {
		let path = format!("/{}", segments.join("/"));
		prop_assume!(!is_declared(&path));

		let router = init_router();
		let resolved = router.resolve(&path);

		prop_assert_eq!(resolved.name.as_deref(), Some(NOT_FOUND_NAME));
		prop_assert_eq!(resolved.param(NOT_FOUND_PARAM), Some(&path[1..]));
	}

	#[test]
	fn prop_navigation_always_ends_at_top(
		segments in prop::collection::vec("[a-z-]{1,10}", 1..6),
		offset in 1.0f64..10_000.0
	) {
		let router = init_router();
		for segment in &segments {
			router
				.history_ref()
				.save_scroll(ScrollPosition::new(0.0, offset))
				.unwrap();
			router.push(&format!("/{}", segment)).unwrap();
			prop_assert_eq!(router.last_scroll().get(), Some(ScrollPosition::TOP));
		}
	}
}
