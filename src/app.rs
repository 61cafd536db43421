//! The generator single-page app: route table, page views and, on WASM, the
//! browser launcher.

#[cfg(target_arch = "wasm32")]
pub mod launcher;
pub mod routes;
pub mod views;

pub use routes::{
	AppRoute, current_route, global_router, init_global_router, init_router, try_with_router,
	with_router,
};
