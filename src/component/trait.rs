//! Component trait definition.

use super::into_view::View;

/// Trait for reusable UI components.
///
/// # Example
///
/// ```
/// use genpages::component::{Component, ElementView, IntoView, View};
///
/// struct Banner {
///     title: String,
/// }
///
/// impl Component for Banner {
///     fn render(&self) -> View {
///         ElementView::new("header")
///             .child(self.title.clone())
///             .into_view()
///     }
///
///     fn name() -> &'static str {
///         "Banner"
///     }
/// }
///
/// let html = Banner { title: "About".into() }.render().render_to_string();
/// assert_eq!(html, "<header>About</header>");
/// ```
pub trait Component: 'static {
	/// Renders the component to a View.
	fn render(&self) -> View;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}
