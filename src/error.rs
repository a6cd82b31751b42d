//! Error type shared by the renderer and the fullscreen toggle.

use thiserror::Error;

/// Failures surfaced by rendering and fullscreen operations.
///
/// Missing info panel elements are not errors: the panel silently skips them,
/// matching how the hosting page is allowed to omit them.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The global `vis` namespace was not found when the network was mounted.
	#[error("visualization library `vis` is not loaded")]
	LibraryUnavailable,
	/// No browser window or document is reachable.
	#[error("no browser window available")]
	NoWindow,
	/// An element the operation needs is absent from the page.
	#[error("element #{0} not found")]
	MissingElement(String),
	/// Graph data or options could not be encoded for the library.
	#[error("failed to encode graph data: {0}")]
	Encode(#[from] serde_json::Error),
	/// A value could not be converted between Rust and JavaScript.
	#[error("failed to convert value for the library: {0}")]
	Convert(#[from] serde_wasm_bindgen::Error),
	/// The library (or the browser) threw while handling a call.
	#[error("visualization library rejected the call: {0}")]
	Library(String),
	/// None of the fullscreen request methods exist on the element.
	#[error("no fullscreen API available")]
	FullscreenUnsupported,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_missing_piece() {
		assert_eq!(
			GraphError::MissingElement("mynetwork".into()).to_string(),
			"element #mynetwork not found"
		);
		assert!(GraphError::LibraryUnavailable.to_string().contains("vis"));
	}

	#[test]
	fn encode_errors_convert_from_serde() {
		let err = serde_json::from_str::<u32>("nope").unwrap_err();
		let graph_err: GraphError = err.into();
		assert!(matches!(graph_err, GraphError::Encode(_)));
	}
}
