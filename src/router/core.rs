//! Core Router Implementation.
//!
//! This module provides the main Router struct, route registration, path
//! resolution and the navigation pipeline (history write, signal update,
//! scroll handling, after-each hooks).

use super::error::{ConfigError, PatternError, RouterError};
use super::history::{History, HistoryState, NavigationType};
use super::location::Location;
use super::pattern::{PathPattern, PatternOptions};
use super::scroll::{self, ScrollBehavior, ScrollPosition};
use super::config::RouterConfig;
use crate::component::View;
use crate::reactive::Signal;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Type alias for route guard functions.
pub(super) type RouteGuard = Arc<dyn Fn(&RouteMatch) -> bool + Send + Sync>;

/// View factory receiving the matched path parameters.
pub(super) type RouteView = Arc<dyn Fn(&HashMap<String, String>) -> View + Send + Sync>;

/// Hook run after every completed navigation with `(to, from)`.
pub type AfterEachHook = Arc<dyn Fn(&ResolvedRoute, &ResolvedRoute) + Send + Sync>;

/// A matched route with extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched route.
	pub route: Route,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
	/// Parameter values in the order they appear in the pattern.
	pub param_values: Vec<String>,
}

/// A navigation target resolved against the route table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedRoute {
	/// Path component of the target.
	pub path: String,
	/// Normalized `path?query#hash`.
	pub full_path: String,
	/// Decoded query pairs.
	pub query: Vec<(String, String)>,
	/// Fragment without `#`.
	pub hash: Option<String>,
	/// Name of the matched route.
	pub name: Option<String>,
	/// Matched path parameters.
	pub params: HashMap<String, String>,
	/// Pattern of the matched route, `None` when nothing matched.
	pub pattern: Option<String>,
}

impl ResolvedRoute {
	/// A target that matched no route.
	pub fn unmatched(target: &str) -> Self {
		Self::from_location(Location::parse(target))
	}

	fn from_location(location: Location) -> Self {
		Self {
			full_path: location.full_path(),
			path: location.path,
			query: location.query,
			hash: location.hash,
			..Self::default()
		}
	}

	/// Returns whether a route matched.
	pub fn is_matched(&self) -> bool {
		self.pattern.is_some()
	}

	/// Returns a matched parameter.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}
}

/// A single route definition.
#[derive(Clone)]
pub struct Route {
	/// The path pattern.
	pattern: PathPattern,
	/// Optional route name for reverse lookups.
	name: Option<String>,
	/// The view factory.
	view: RouteView,
	/// Optional guard function.
	guard: Option<RouteGuard>,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("name", &self.name)
			.field("has_guard", &self.guard.is_some())
			.finish()
	}
}

impl Route {
	/// Creates a new route.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid. Use [`Route::try_new`] for fallible
	/// construction.
	pub fn new<F>(pattern: &str, view: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		Self::try_new(pattern, view)
			.unwrap_or_else(|e| panic!("Invalid route pattern '{}': {}", pattern, e))
	}

	/// Creates a new route, returning an error for an invalid pattern.
	pub fn try_new<F>(pattern: &str, view: F) -> Result<Self, PatternError>
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		Self::compile(pattern, PatternOptions::default(), Arc::new(move |_| view()))
	}

	/// Creates a named route.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid.
	pub fn named<F>(name: impl Into<String>, pattern: &str, view: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		let mut route = Self::new(pattern, view);
		route.name = Some(name.into());
		route
	}

	fn compile(
		pattern: &str,
		options: PatternOptions,
		view: RouteView,
	) -> Result<Self, PatternError> {
		Ok(Self {
			pattern: PathPattern::with_options(pattern, options)?,
			name: None,
			view,
			guard: None,
		})
	}

	/// Adds a guard to this route.
	pub fn with_guard<G>(mut self, guard: G) -> Self
	where
		G: Fn(&RouteMatch) -> bool + Send + Sync + 'static,
	{
		self.guard = Some(Arc::new(guard));
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Renders the route's view with the given parameters.
	pub fn render(&self, params: &HashMap<String, String>) -> View {
		(self.view)(params)
	}

	/// Checks if the guard allows access.
	pub fn check_guard(&self, route_match: &RouteMatch) -> bool {
		self.guard.as_ref().map(|g| g(route_match)).unwrap_or(true)
	}
}

/// The main router.
pub struct Router {
	/// Registered routes; catch-all routes stay at the end.
	routes: Vec<Route>,
	/// Named routes for reverse lookups.
	named_routes: HashMap<String, usize>,
	/// Options used to compile patterns registered through the builder.
	options: PatternOptions,
	history: History,
	current_path: Signal<String>,
	current_params: Signal<HashMap<String, String>>,
	current_route_name: Signal<Option<String>>,
	current_route: Signal<ResolvedRoute>,
	last_scroll: Signal<Option<ScrollPosition>>,
	/// Not found handler.
	not_found: Option<Arc<dyn Fn() -> View + Send + Sync>>,
	scroll_behavior: Option<ScrollBehavior>,
	after_each: Vec<AfterEachHook>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.routes.len())
			.field(
				"named_routes",
				&self.named_routes.keys().collect::<Vec<_>>(),
			)
			.field("history", &self.history)
			.field("has_scroll_behavior", &self.scroll_behavior.is_some())
			.finish()
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}

impl Router {
	/// Creates a router with web history at `/` and no scroll handling.
	pub fn new() -> Self {
		let history = History::web("/");
		let initial = ResolvedRoute::unmatched(&history.location());

		Self {
			routes: Vec::new(),
			named_routes: HashMap::new(),
			options: PatternOptions::default(),
			history,
			current_path: Signal::new(initial.path.clone()),
			current_params: Signal::new(HashMap::new()),
			current_route_name: Signal::new(None),
			current_route: Signal::new(initial),
			last_scroll: Signal::new(None),
			not_found: None,
			scroll_behavior: None,
			after_each: Vec::new(),
		}
	}

	/// Creates a router from declarative settings.
	///
	/// The config is validated first, so a config built in code gets the
	/// same checks as one parsed with [`RouterConfig::from_toml_str`].
	pub fn with_config(config: &RouterConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let mut router = Self::new().history(config.build_history());
		router.options = config.pattern_options();
		router.scroll_behavior = config.scroll_behavior();
		Ok(router)
	}

	/// Sets the history strategy.
	pub fn history(mut self, history: History) -> Self {
		self.history = history;
		self.sync_current();
		self
	}

	/// Adds a route to the router.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid. Use [`Router::try_route`] to handle
	/// the error instead.
	pub fn route<F>(self, pattern: &str, view: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		self.route_with_params(pattern, move |_| view())
	}

	/// Adds a route, returning an error for an invalid pattern.
	pub fn try_route<F>(mut self, pattern: &str, view: F) -> Result<Self, RouterError>
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		let route = Route::compile(pattern, self.options, Arc::new(move |_| view()))?;
		self.insert(route);
		Ok(self)
	}

	/// Adds a named route to the router.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid.
	pub fn named_route<F>(self, name: &str, pattern: &str, view: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		self.named_route_with_params(name, pattern, move |_| view())
	}

	/// Adds a route whose view receives the matched parameters.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid.
	pub fn route_with_params<F>(mut self, pattern: &str, view: F) -> Self
	where
		F: Fn(&HashMap<String, String>) -> View + Send + Sync + 'static,
	{
		let route = self.compile_or_panic(pattern, Arc::new(view));
		self.insert(route);
		self
	}

	/// Adds a named route whose view receives the matched parameters.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid.
	pub fn named_route_with_params<F>(mut self, name: &str, pattern: &str, view: F) -> Self
	where
		F: Fn(&HashMap<String, String>) -> View + Send + Sync + 'static,
	{
		let mut route = self.compile_or_panic(pattern, Arc::new(view));
		route.name = Some(name.to_string());
		self.insert(route);
		self
	}

	/// Adds a route with a guard.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid.
	pub fn guarded_route<F, G>(mut self, pattern: &str, view: F, guard: G) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
		G: Fn(&RouteMatch) -> bool + Send + Sync + 'static,
	{
		let route = self
			.compile_or_panic(pattern, Arc::new(move |_| view()))
			.with_guard(guard);
		self.insert(route);
		self
	}

	/// Adds a prebuilt route.
	pub fn add_route(mut self, route: Route) -> Self {
		self.insert(route);
		self
	}

	/// Sets the not found handler.
	pub fn not_found<F>(mut self, view: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		self.not_found = Some(Arc::new(view));
		self
	}

	/// Sets the scroll callback run after each navigation.
	pub fn scroll_behavior<F>(mut self, behavior: F) -> Self
	where
		F: Fn(&ResolvedRoute, &ResolvedRoute, Option<ScrollPosition>) -> Option<ScrollPosition>
			+ Send
			+ Sync
			+ 'static,
	{
		self.scroll_behavior = Some(Arc::new(behavior));
		self
	}

	/// Registers a hook run after each completed navigation.
	pub fn after_each<F>(mut self, hook: F) -> Self
	where
		F: Fn(&ResolvedRoute, &ResolvedRoute) + Send + Sync + 'static,
	{
		self.after_each.push(Arc::new(hook));
		self
	}

	fn compile_or_panic(&self, pattern: &str, view: RouteView) -> Route {
		Route::compile(pattern, self.options, view)
			.unwrap_or_else(|e| panic!("Invalid route pattern '{}': {}", pattern, e))
	}

	/// Inserts a route, keeping catch-all routes after concrete ones.
	fn insert(&mut self, route: Route) {
		let index = if route.pattern.is_catch_all() {
			self.routes.len()
		} else {
			self.routes
				.iter()
				.position(|r| r.pattern.is_catch_all())
				.unwrap_or(self.routes.len())
		};

		for slot in self.named_routes.values_mut() {
			if *slot >= index {
				*slot += 1;
			}
		}
		if let Some(name) = &route.name {
			self.named_routes.insert(name.clone(), index);
		}

		self.routes.insert(index, route);
		self.sync_current();
	}

	/// Re-resolves the current history entry without running navigation side effects.
	fn sync_current(&self) {
		let resolved = self.resolve(&self.history.location());
		self.set_current(resolved);
	}

	fn set_current(&self, resolved: ResolvedRoute) {
		self.current_params.set(resolved.params.clone());
		self.current_route_name.set(resolved.name.clone());
		let path = resolved.path.clone();
		self.current_route.set(resolved);
		self.current_path.set(path);
	}

	/// Returns the history.
	pub fn history_ref(&self) -> &History {
		&self.history
	}

	/// Returns the registered routes in match order.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Returns the current path signal.
	pub fn current_path(&self) -> &Signal<String> {
		&self.current_path
	}

	/// Returns the current params signal.
	pub fn current_params(&self) -> &Signal<HashMap<String, String>> {
		&self.current_params
	}

	/// Returns the current route name signal.
	pub fn current_route_name(&self) -> &Signal<Option<String>> {
		&self.current_route_name
	}

	/// Returns the current resolved route signal.
	pub fn current_route(&self) -> &Signal<ResolvedRoute> {
		&self.current_route
	}

	/// Returns the scroll position applied by the last navigation.
	pub fn last_scroll(&self) -> &Signal<Option<ScrollPosition>> {
		&self.last_scroll
	}

	/// Matches a path against registered routes.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		for route in &self.routes {
			if let Some((params, param_values)) = route.pattern.matches(path) {
				let route_match = RouteMatch {
					route: route.clone(),
					params,
					param_values,
				};

				// Check guard if present
				if route.check_guard(&route_match) {
					return Some(route_match);
				}
			}
		}
		None
	}

	/// Resolves a target (`path?query#hash`) against the route table.
	pub fn resolve(&self, target: &str) -> ResolvedRoute {
		let location = Location::parse(target);
		let Some(route_match) = self.match_path(&location.path) else {
			return ResolvedRoute::from_location(location);
		};

		ResolvedRoute {
			full_path: location.full_path(),
			path: location.path,
			query: location.query,
			hash: location.hash,
			name: route_match.route.name().map(str::to_string),
			pattern: Some(route_match.route.pattern().as_str().to_string()),
			params: route_match.params,
		}
	}

	/// Navigates to a target, adding a history entry.
	pub fn push(&self, target: &str) -> Result<(), RouterError> {
		self.navigate(target, NavigationType::Push)
	}

	/// Navigates to a target, replacing the current history entry.
	pub fn replace(&self, target: &str) -> Result<(), RouterError> {
		self.navigate(target, NavigationType::Replace)
	}

	/// Moves through history by `delta` entries.
	///
	/// Returns `true` when the navigation completed immediately. Out-of-range
	/// moves do nothing and return `false`. With browser history on WASM the
	/// move completes later through the `popstate` listener, so this also
	/// returns `false`.
	pub fn go(&self, delta: isize) -> bool {
		self.save_scroll();
		let from = self.current_route.get();

		match self.history.go(delta) {
			Some(entry) => {
				let to = self.resolve(&entry.path);
				self.finish(NavigationType::Pop, to, from, entry.scroll);
				true
			}
			None => false,
		}
	}

	/// Moves back one entry.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves forward one entry.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Applies a `popstate` event reported by the browser.
	pub fn sync_from_popstate(&self, path: String, state: Option<HistoryState>) {
		let from = self.current_route.get();
		let entry = self.history.sync_popstate(state, path);
		let to = self.resolve(&entry.path);
		self.finish(NavigationType::Pop, to, from, entry.scroll);
	}

	/// Internal navigation implementation.
	fn navigate(&self, target: &str, nav_type: NavigationType) -> Result<(), RouterError> {
		self.save_scroll();
		let from = self.current_route.get();
		let to = self.resolve(target);

		let state = HistoryState::new(to.full_path.clone())
			.with_params(to.params.clone())
			.with_route_name(to.name.clone());

		let result = match nav_type {
			NavigationType::Push => self.history.push(state),
			NavigationType::Replace | NavigationType::Pop => self.history.replace(state),
		};
		result.map_err(|e| RouterError::NavigationFailed(e.to_string()))?;

		self.finish(nav_type, to, from, None);
		Ok(())
	}

	#[cfg_attr(not(feature = "debug-routing"), allow(unused_variables))]
	fn finish(
		&self,
		nav_type: NavigationType,
		to: ResolvedRoute,
		from: ResolvedRoute,
		saved: Option<ScrollPosition>,
	) {
		crate::debug_log!(
			"{:?} navigation: {} -> {} ({:?})",
			nav_type,
			from.full_path,
			to.full_path,
			to.name
		);

		self.set_current(to.clone());

		if let Some(behavior) = &self.scroll_behavior
			&& let Some(position) = behavior(&to, &from, saved)
		{
			scroll::apply(position);
			self.last_scroll.set(Some(position));
		}

		for hook in &self.after_each {
			hook(&to, &from);
		}
	}

	fn save_scroll(&self) {
		if let Some(position) = scroll::current_position()
			&& let Err(e) = self.history.save_scroll(position)
		{
			crate::warn_log!("Failed to save scroll position: {}", e);
		}
	}

	/// Generates a URL by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named_routes
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;

		let pattern = &self.routes[*index].pattern;
		let params_map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		if let Some(missing) = pattern
			.param_names()
			.iter()
			.find(|p| !params_map.contains_key(*p))
		{
			return Err(RouterError::MissingParameter(missing.clone()));
		}

		pattern
			.reverse(&params_map)
			.ok_or_else(|| RouterError::MissingParameter(name.to_string()))
	}

	/// Builds the `href` for a router path in the current history mode.
	pub fn href(&self, path: &str) -> String {
		self.history.href(path)
	}

	/// Renders the current route's view.
	pub fn render_current(&self) -> View {
		let path = self.current_path.get();

		if let Some(route_match) = self.match_path(&path) {
			route_match.route.render(&route_match.params)
		} else if let Some(not_found) = &self.not_found {
			not_found()
		} else {
			View::Empty
		}
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}

	/// Registers a `popstate` listener that keeps this router in sync with
	/// the browser's back and forward buttons.
	///
	/// The listener holds a weak reference, so it stops acting once the
	/// router is dropped. The closure itself lives for the rest of the page.
	#[cfg(target_arch = "wasm32")]
	pub fn setup_history_listener(self: &Rc<Self>) {
		if self.history.mode() == super::history::HistoryMode::Memory {
			return;
		}

		let router = Rc::downgrade(self);
		let closure = super::history::setup_popstate_listener(
			self.history.mode(),
			self.history.base().to_string(),
			move |path, state| {
				if let Some(router) = router.upgrade() {
					router.sync_from_popstate(path, state);
				}
			},
		);

		match closure {
			Ok(c) => c.forget(),
			Err(e) => crate::error_log!("Failed to register popstate listener: {}", e),
		}
	}

	/// Non-WASM version of `setup_history_listener`.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn setup_history_listener(self: &Rc<Self>) {
		// No-op on non-WASM targets
	}
}
