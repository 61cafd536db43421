//! WASM entry point for the generator app

use super::routes;
use crate::component::{Component, MountError};
use crate::router::{Router, RouterOutlet};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, window};

/// ID of the element the app mounts into.
pub const ROOT_ID: &str = "app";

/// WASM entry point
///
/// Called when the module is loaded; mounts the app into `#app`.
#[allow(clippy::main_recursion)]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
	launch(ROOT_ID)
}

/// Mounts the app into the element with the given ID and wires navigation.
pub fn launch(root_id: &str) -> Result<(), JsValue> {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();

	let window = window().ok_or(MountError::NoWindow)?;
	let document = window.document().ok_or(MountError::NoDocument)?;
	let root = document
		.get_element_by_id(root_id)
		.ok_or_else(|| MountError::TargetNotFound(root_id.to_string()))?;

	routes::init_global_router();
	let router =
		routes::global_router().ok_or_else(|| JsValue::from_str("Router not initialized"))?;

	render(&root, &router)?;

	// Re-render once every signal of a navigation has been updated
	let weak = Rc::downgrade(&router);
	let root_for_updates = root.clone();
	router.current_path().subscribe(move |_| {
		if let Some(router) = weak.upgrade()
			&& let Err(e) = render(&root_for_updates, &router)
		{
			crate::error_log!("Failed to render route: {:?}", e);
		}
	});

	// Intercept clicks on SPA links (event delegation on the document)
	let weak = Rc::downgrade(&router);
	let link_handler = Closure::wrap(Box::new(move |event: MouseEvent| {
		if let Some(router) = weak.upgrade() {
			handle_link_click(&router, &event);
		}
	}) as Box<dyn FnMut(_)>);

	document.add_event_listener_with_callback("click", link_handler.as_ref().unchecked_ref())?;
	link_handler.forget();

	// Browser back/forward buttons
	router.setup_history_listener();

	crate::info_log!("Router mounted on #{}", root_id);
	Ok(())
}

fn render(root: &Element, router: &Router) -> Result<(), JsValue> {
	root.set_inner_html("");
	RouterOutlet::for_router(router)
		.id("router-outlet")
		.render()
		.mount(root)?;
	Ok(())
}

fn handle_link_click(router: &Router, event: &MouseEvent) {
	// Let the browser handle modified clicks (new tab, download, ...)
	if event.button() != 0
		|| event.ctrl_key()
		|| event.meta_key()
		|| event.shift_key()
		|| event.alt_key()
	{
		return;
	}

	let Some(anchor) = event
		.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.and_then(|el| el.closest("a[data-link]").ok().flatten())
	else {
		return;
	};
	let Some(to) = anchor.get_attribute("data-link") else {
		return;
	};

	event.prevent_default();
	let result = if anchor.get_attribute("data-replace").as_deref() == Some("true") {
		router.replace(&to)
	} else {
		router.push(&to)
	};

	if let Err(e) = result {
		crate::error_log!("Navigation to {} failed: {}", to, e);
	}
}
