//! Fullscreen display of the graph.
//!
//! Entering fullscreen stretches the graph container to `100%` height. The
//! height it had before is kept by a [`FullscreenController`] and written back
//! when the document reports that fullscreen ended, whichever way it ended
//! (Escape, browser UI or script).

mod component;
mod dom;
mod state;

pub use component::FullscreenButton;
pub use dom::{FullscreenToggle, StyleLayout, document_is_fullscreen, request_fullscreen};
pub use state::{
	ContainerLayout, FULLSCREEN_HEIGHT, FullscreenController, REQUEST_METHODS, pick_request_method,
};
