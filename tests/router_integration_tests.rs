//! Integration tests for the client-side router
//!
//! These tests exercise the public router API end to end:
//! 1. Path pattern matching, defaults and limits
//! 2. Named routes, catch-all ordering and reverse lookup
//! 3. Navigation through history with signal, scroll and hook updates
//! 4. Router components (Link, RouterOutlet, Redirect)
//! 5. Declarative configuration

use genpages::component::{Component, View};
use genpages::router::{
	History, HistoryMode, Link, PathPattern, PatternOptions, Redirect, ResolvedRoute, Router,
	RouterConfig, RouterError, RouterOutlet, ScrollPosition, guard_or, scroll,
};
use rstest::rstest;
use serial_test::serial;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

fn home_view() -> View {
	View::text("Home")
}

fn docs_view() -> View {
	View::text("Docs")
}

fn not_found_view(params: &HashMap<String, String>) -> View {
	View::text(format!("Missing: {}", params["rest"]))
}

fn docs_router() -> Router {
	Router::new()
		.history(History::memory())
		.named_route("home", "/", home_view)
		.named_route_with_params("missing", "/{rest:*}", not_found_view)
		.named_route("docs", "/docs", docs_view)
		.named_route_with_params("doc_page", "/docs/{section}/{page}", |params| {
			View::text(format!("{}/{}", params["section"], params["page"]))
		})
		.scroll_behavior(scroll::always_top)
}

#[rstest]
#[case("/docs", true)]
#[case("/docs/", true)]
#[case("/DOCS", true)]
#[case("/docs/extra", false)]
#[case("/doc", false)]
fn test_pattern_default_options(#[case] path: &str, #[case] expected: bool) {
	let pattern = PathPattern::new("/docs").unwrap();
	assert_eq!(pattern.is_match(path), expected);
}

#[rstest]
fn test_pattern_strict_and_sensitive() {
	let pattern = PathPattern::with_options(
		"/docs",
		PatternOptions {
			strict: true,
			sensitive: true,
		},
	)
	.unwrap();

	assert!(pattern.is_match("/docs"));
	assert!(!pattern.is_match("/docs/"));
	assert!(!pattern.is_match("/Docs"));
}

#[rstest]
fn test_pattern_wildcard_capture_and_decoding() {
	let pattern = PathPattern::new("/{rest:*}").unwrap();
	let (params, values) = pattern.matches("/a%20b/c").unwrap();
	assert_eq!(params.get("rest"), Some(&"a b/c".to_string()));
	assert_eq!(values, vec!["a b/c".to_string()]);
	assert!(pattern.is_catch_all());
}

#[rstest]
fn test_pattern_rejects_oversized_input() {
	let long = format!("/{}", "a".repeat(2048));
	assert!(PathPattern::new(&long).is_err());

	let deep = "/x".repeat(40);
	assert!(PathPattern::new(&deep).is_err());
}

#[rstest]
#[serial(router)]
fn test_catch_all_never_shadows_later_routes() {
	let router = docs_router();

	assert_eq!(router.resolve("/docs").name.as_deref(), Some("docs"));
	assert_eq!(
		router.resolve("/docs/intro/install").name.as_deref(),
		Some("doc_page")
	);
	assert_eq!(router.resolve("/blog").name.as_deref(), Some("missing"));
	assert_eq!(router.routes().last().map(|r| r.pattern().as_str()), Some("/{rest:*}"));
}

#[rstest]
#[serial(router)]
fn test_reverse_lookup() {
	let router = docs_router();

	assert_eq!(router.reverse("home", &[]).unwrap(), "/");
	assert_eq!(
		router
			.reverse("doc_page", &[("section", "guide"), ("page", "a b")])
			.unwrap(),
		"/docs/guide/a%20b"
	);
	assert_eq!(
		router.reverse("doc_page", &[("section", "guide")]),
		Err(RouterError::MissingParameter("page".to_string()))
	);
	assert_eq!(
		router.reverse("nope", &[]),
		Err(RouterError::InvalidRouteName("nope".to_string()))
	);
}

#[rstest]
#[serial(router)]
fn test_navigation_flow() {
	let visited: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
	let visited_in_hook = Arc::clone(&visited);

	let router = docs_router().after_each(move |to, _from| {
		visited_in_hook.lock().unwrap().push(to.full_path.clone());
	});

	router.push("/docs").unwrap();
	router.push("/docs/guide/routing?highlight=wildcard#top").unwrap();
	assert_eq!(router.render_current().render_to_string(), "guide/routing");

	let current = router.current_route().get();
	assert_eq!(current.hash.as_deref(), Some("top"));
	assert_eq!(
		current.query,
		vec![("highlight".to_string(), "wildcard".to_string())]
	);

	assert!(router.back());
	assert_eq!(router.render_current().render_to_string(), "Docs");
	assert!(router.forward());
	assert!(!router.forward());

	router.replace("/blog").unwrap();
	assert_eq!(router.render_current().render_to_string(), "Missing: blog");
	assert_eq!(router.history_ref().len(), 3);

	assert_eq!(
		*visited.lock().unwrap(),
		vec![
			"/docs",
			"/docs/guide/routing?highlight=wildcard#top",
			"/docs",
			"/docs/guide/routing?highlight=wildcard#top",
			"/blog",
		]
	);
}

#[rstest]
#[serial(router)]
fn test_scroll_reset_on_every_navigation() {
	let router = docs_router();

	for target in ["/docs", "/docs/a/b", "/blog", "/"] {
		router
			.history_ref()
			.save_scroll(ScrollPosition::new(0.0, 900.0))
			.unwrap();
		router.push(target).unwrap();
		assert_eq!(router.last_scroll().get(), Some(ScrollPosition::TOP));
	}

	router.back();
	assert_eq!(router.last_scroll().get(), Some(ScrollPosition::TOP));
}

#[rstest]
#[serial(router)]
fn test_custom_scroll_behavior_sees_routes() {
	let router = docs_router().scroll_behavior(|to: &ResolvedRoute, _from, _saved| {
		to.hash.as_ref().map(|_| ScrollPosition::new(0.0, 120.0))
	});

	router.push("/docs").unwrap();
	assert_eq!(router.last_scroll().get(), None);

	router.push("/docs#install").unwrap();
	assert_eq!(
		router.last_scroll().get(),
		Some(ScrollPosition::new(0.0, 120.0))
	);
}

#[rstest]
#[serial(router)]
fn test_components_with_router() {
	let router = docs_router().history(History::hash("/site"));
	router.push("/docs").unwrap();

	let link = Link::new("/docs", "Docs").resolve_with(&router);
	let html = link.render().render_to_string();
	assert!(html.contains("href=\"/site#/docs\""));
	assert!(html.contains("aria-current=\"page\""));

	let outlet = RouterOutlet::for_router(&router).render().render_to_string();
	assert_eq!(outlet, "<div data-router-outlet=\"true\">Docs</div>");

	Redirect::new("/").apply(&router).unwrap();
	assert_eq!(router.current_path().get(), "/");

	let gated = guard_or(|| router.current_path().get() == "/docs", "Docs", "Elsewhere")();
	assert_eq!(gated.render_to_string(), "Elsewhere");
}

#[rstest]
#[serial(router)]
fn test_router_from_config() {
	let config = RouterConfig::from_toml_str(
		r#"
history = "memory"
strict = true
scroll = "saved"
"#,
	)
	.unwrap();
	assert_eq!(config.history, HistoryMode::Memory);

	let router = Router::with_config(&config)
		.unwrap()
		.route("/", home_view)
		.route("/docs", docs_view);
	assert!(router.match_path("/docs/").is_none());

	router.push("/docs").unwrap();
	router
		.history_ref()
		.save_scroll(ScrollPosition::new(0.0, 50.0))
		.unwrap();
	router.push("/").unwrap();
	router.back();
	assert_eq!(
		router.last_scroll().get(),
		Some(ScrollPosition::new(0.0, 50.0))
	);
}
