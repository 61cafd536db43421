//! Page views of the generator app.
//!
//! Each view renders a page shell (navigation plus a titled main section).
//! Page bodies stay minimal; forms and generated output are filled in by the
//! page scripts that own them.

use super::routes::{
	ABOUT_PATH, CUSTOM_GENERATE_PATH, GENERATE_PATH, HOME_PATH, NOT_FOUND_PARAM, try_with_router,
};
use crate::component::{Component, ElementView, IntoView, View};
use crate::router::Link;
use std::collections::HashMap;

// Resolved against the global router when there is one, so the link gets
// the history-mode href and is marked active on the current page.
fn resolved(link: Link) -> View {
	try_with_router(|router| link.clone().resolve_with(router))
		.unwrap_or(link)
		.render()
}

fn nav() -> View {
	let links = [
		(HOME_PATH, "Home"),
		(GENERATE_PATH, "Generate"),
		(CUSTOM_GENERATE_PATH, "Custom Generate"),
		(ABOUT_PATH, "About"),
	];

	ElementView::new("nav")
		.attr("class", "site-nav")
		.children(
			links
				.into_iter()
				.map(|(to, label)| resolved(Link::new(to, label).class("nav-link"))),
		)
		.into_view()
}

fn page(slug: &'static str, title: &'static str, body: impl IntoView) -> View {
	View::fragment([
		nav(),
		ElementView::new("main")
			.attr("class", format!("page page-{}", slug))
			.child(ElementView::new("h1").child(title))
			.child(body)
			.into_view(),
	])
}

/// Landing page.
pub fn home_view() -> View {
	page(
		"home",
		"Home",
		ElementView::new("p")
			.child("Pick a generator to get started.")
			.child(resolved(Link::new(GENERATE_PATH, "Start generating").class("button"))),
	)
}

/// Generation page using the built-in presets.
pub fn generate_view() -> View {
	page(
		"generate",
		"Generate",
		ElementView::new("section")
			.attr("id", "generate-form")
			.attr("data-mode", "preset"),
	)
}

/// Generation page with user-supplied settings.
pub fn custom_generate_view() -> View {
	page(
		"custom-generate",
		"Custom Generate",
		ElementView::new("section")
			.attr("id", "generate-form")
			.attr("data-mode", "custom"),
	)
}

/// About page.
pub fn about_view() -> View {
	page(
		"about",
		"About",
		ElementView::new("p").child("A small client-side generator."),
	)
}

/// Fallback page; shows the path that failed to match.
pub fn not_found_view(params: &HashMap<String, String>) -> View {
	let missing = params
		.get(NOT_FOUND_PARAM)
		.map(|rest| format!("/{}", rest.trim_start_matches('/')))
		.unwrap_or_else(|| "/".to_string());

	page(
		"not-found",
		"404 - Page Not Found",
		(
			ElementView::new("p")
				.child("Nothing lives at ")
				.child(ElementView::new("code").child(missing)),
			ElementView::new("p").child(resolved(Link::new(HOME_PATH, "Back to Home"))),
		),
	)
}
