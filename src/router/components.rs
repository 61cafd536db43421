//! Router components for navigation.
//!
//! [`Link`] and [`Redirect`] describe navigation declaratively, and
//! [`RouterOutlet`] hosts whatever view the router currently resolves to.

use super::core::Router;
use super::error::RouterError;
use crate::component::{Component, ElementView, IntoView, View};

/// A link that navigates without a full page reload.
///
/// Rendered as `<a data-link="/path">`. The launcher intercepts clicks on
/// such anchors and routes them through the router; the `href` stays a
/// valid URL for the active history mode, so middle-click and "open in new
/// tab" keep working.
///
/// ```
/// use genpages::component::Component;
/// use genpages::router::{History, Link, Router};
///
/// let router = Router::new().history(History::hash(""));
/// let html = Link::new("/about", "About").resolve_with(&router).render().render_to_string();
/// assert!(html.contains("href=\"#/about\""));
/// assert!(html.contains("data-link=\"/about\""));
/// ```
#[derive(Debug, Clone)]
pub struct Link {
	/// Router path of the destination.
	to: String,
	/// URL written to `href`, when it differs from `to`.
	href: Option<String>,
	content: String,
	class: Option<String>,
	/// Whether to replace the current history entry.
	replace: bool,
	/// Whether to open in a new tab (disables SPA navigation).
	external: bool,
	/// Whether `to` is the current route.
	active: bool,
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a new link.
	pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			href: None,
			content: content.into(),
			class: None,
			replace: false,
			external: false,
			active: false,
			attrs: Vec::new(),
		}
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Sets whether this is an external link.
	pub fn external(mut self, external: bool) -> Self {
		self.external = external;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Builds the `href` for the router's history mode and marks the link
	/// active when it points at the current route.
	pub fn resolve_with(mut self, router: &Router) -> Self {
		if self.external {
			return self;
		}
		let target = router.resolve(&self.to);
		self.active = target.path == router.current_path().get();
		self.href = Some(router.href(&target.full_path));
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns the `href` value.
	pub fn href(&self) -> &str {
		self.href.as_deref().unwrap_or(&self.to)
	}

	/// Returns the content.
	pub fn content(&self) -> &str {
		&self.content
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Returns whether this is an external link.
	pub fn is_external(&self) -> bool {
		self.external
	}

	/// Returns whether the link points at the current route.
	pub fn is_active(&self) -> bool {
		self.active
	}
}

impl Component for Link {
	fn render(&self) -> View {
		let mut el = ElementView::new("a").attr("href", self.href().to_string());

		let class = match (&self.class, self.active) {
			(Some(class), true) => Some(format!("{} active", class)),
			(Some(class), false) => Some(class.clone()),
			(None, true) => Some("active".to_string()),
			(None, false) => None,
		};
		if let Some(class) = class {
			el = el.attr("class", class);
		}

		if !self.external {
			el = el.attr("data-link", self.to.clone());
			if self.replace {
				el = el.attr("data-replace", "true");
			}
			if self.active {
				el = el.attr("aria-current", "page");
			}
		} else {
			el = el.attr("target", "_blank");
			el = el.attr("rel", "noopener noreferrer");
		}

		for (name, value) in &self.attrs {
			el = el.attr(name.clone(), value.clone());
		}

		el.child(self.content.clone()).into_view()
	}

	fn name() -> &'static str {
		"Link"
	}
}

/// Container for the view of the current route.
#[derive(Debug, Clone, Default)]
pub struct RouterOutlet {
	id: Option<String>,
	class: Option<String>,
	content: Option<View>,
}

impl RouterOutlet {
	/// Creates an empty outlet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an outlet holding the router's current view.
	pub fn for_router(router: &Router) -> Self {
		Self {
			content: Some(router.render_current()),
			..Self::default()
		}
	}

	/// Sets the ID attribute.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}
}

impl Component for RouterOutlet {
	fn render(&self) -> View {
		let mut el = ElementView::new("div").attr("data-router-outlet", "true");

		if let Some(ref id) = self.id {
			el = el.attr("id", id.clone());
		}

		if let Some(ref class) = self.class {
			el = el.attr("class", class.clone());
		}

		if let Some(content) = &self.content {
			el = el.child(content.clone());
		}

		el.into_view()
	}

	fn name() -> &'static str {
		"RouterOutlet"
	}
}

/// Sends the user to another path.
///
/// Rendering produces a meta refresh for non-SPA contexts; inside the app
/// [`Redirect::apply`] performs the navigation through the router.
#[derive(Debug, Clone)]
pub struct Redirect {
	to: String,
	/// Whether to replace the current history entry.
	replace: bool,
}

impl Redirect {
	/// Creates a new redirect (replace navigation by default).
	pub fn new(to: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			replace: true,
		}
	}

	/// Sets whether to use replace navigation.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Navigates the router to the destination.
	pub fn apply(&self, router: &Router) -> Result<(), RouterError> {
		if self.replace {
			router.replace(&self.to)
		} else {
			router.push(&self.to)
		}
	}
}

impl Component for Redirect {
	fn render(&self) -> View {
		ElementView::new("meta")
			.attr("http-equiv", "refresh")
			.attr("content", format!("0;url={}", self.to))
			.attr("data-redirect", self.to.clone())
			.attr("data-replace", if self.replace { "true" } else { "false" })
			.into_view()
	}

	fn name() -> &'static str {
		"Redirect"
	}
}

/// Renders `content` only when `condition` holds.
pub fn guard<F, V>(condition: F, content: V) -> impl FnOnce() -> View
where
	F: FnOnce() -> bool,
	V: IntoView,
{
	move || {
		if condition() {
			content.into_view()
		} else {
			View::Empty
		}
	}
}

/// Renders `content` when `condition` holds, `fallback` otherwise.
pub fn guard_or<F, V, U>(condition: F, content: V, fallback: U) -> impl FnOnce() -> View
where
	F: FnOnce() -> bool,
	V: IntoView,
	U: IntoView,
{
	move || {
		if condition() {
			content.into_view()
		} else {
			fallback.into_view()
		}
	}
}
