//! Component System for genpages
//!
//! Views are plain trees of elements, text, and fragments. They render to an
//! HTML string (used by the outlet and in tests) and, on WASM, mount directly
//! into the DOM.
//!
//! ## Usage
//!
//! ```
//! use genpages::component::{ElementView, IntoView};
//!
//! let view = ElementView::new("h1").child("Generate").into_view();
//! assert_eq!(view.render_to_string(), "<h1>Generate</h1>");
//! ```

mod into_view;
mod r#trait;

pub use into_view::{ElementView, IntoView, MountError, View};
pub use r#trait::Component;
