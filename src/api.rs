//! JavaScript entry points for server-rendered pages.
//!
//! Pages that do not run the Leptos app can call the renderer directly:
//!
//! ```js
//! import init, { drawGraph, Fullscreen } from "./social_graph.js";
//! await init();
//! const graph = drawGraph(nodes, edges, options, "mynetwork");
//! const fullscreen = new Fullscreen("mynetwork");
//! button.onclick = () => fullscreen.open("graphWrapper");
//! ```

use wasm_bindgen::prelude::*;

use crate::components::fullscreen::FullscreenToggle;
use crate::components::network_graph::vis::VisLibrary;
use crate::components::network_graph::{MountedGraph, RenderConfig, mount_js};
use crate::error::GraphError;

impl From<GraphError> for JsValue {
	fn from(error: GraphError) -> Self {
		js_sys::Error::new(&error.to_string()).into()
	}
}

/// Whether the `vis` namespace is loaded. Never throws.
#[wasm_bindgen(js_name = visAvailable)]
pub fn vis_available() -> bool {
	VisLibrary::check()
}

/// Renders `nodes` and `edges` into the element with id `element_id`.
///
/// The arrays and `options` go to the library untouched; `undefined` or `null`
/// options select the defaults. Throws when the library is missing, the
/// element does not exist or the library rejects the data.
#[wasm_bindgen(js_name = drawGraph)]
pub fn draw_graph(
	nodes: JsValue,
	edges: JsValue,
	options: JsValue,
	element_id: &str,
) -> Result<GraphHandle, JsValue> {
	let config = RenderConfig {
		container_id: element_id.to_string(),
		..RenderConfig::default()
	};
	let graph = mount_js(element_id, &nodes, &edges, &options, config)?;
	Ok(GraphHandle { graph })
}

/// A network drawn by [`draw_graph`]. Calling `free()` destroys it.
#[wasm_bindgen]
pub struct GraphHandle {
	graph: MountedGraph,
}

#[wasm_bindgen]
impl GraphHandle {
	/// Nodes shown by the library.
	#[wasm_bindgen(getter, js_name = nodeCount)]
	pub fn node_count(&self) -> usize {
		self.graph.session().borrow().node_count()
	}

	/// Edges shown by the library.
	#[wasm_bindgen(getter, js_name = edgeCount)]
	pub fn edge_count(&self) -> usize {
		self.graph.session().borrow().edge_count()
	}

	/// Animates the view to show every element.
	pub fn fit(&self) -> Result<(), JsValue> {
		self.graph.session().borrow_mut().fit_to_view()?;
		Ok(())
	}
}

/// Fullscreen toggle bound to one graph container.
#[wasm_bindgen]
pub struct Fullscreen {
	toggle: FullscreenToggle,
}

#[wasm_bindgen]
impl Fullscreen {
	/// Starts watching fullscreen changes for `container_id`.
	#[wasm_bindgen(constructor)]
	pub fn new(container_id: &str) -> Result<Fullscreen, JsValue> {
		Ok(Self {
			toggle: FullscreenToggle::install(container_id)?,
		})
	}

	/// Shows `element_id` fullscreen with the container stretched to fill it.
	pub fn open(&self, element_id: &str) -> Result<(), JsValue> {
		self.toggle.open(element_id)?;
		Ok(())
	}

	/// Whether the container is stretched and waiting to be restored.
	#[wasm_bindgen(getter, js_name = isActive)]
	pub fn is_active(&self) -> bool {
		self.toggle.is_active()
	}
}
