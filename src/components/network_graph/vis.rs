//! Bindings to the `vis-network` library and the backend built on them.
//!
//! The library is loaded by the host page as a global `vis` namespace. Imports
//! resolve lazily on first call, so a page without the library still loads;
//! [`VisLibrary::check`] reports availability up front and
//! [`VisLibrary::resolve`] turns absence into [`GraphError::LibraryUnavailable`].

use js_sys::{Array, Function, Object, Reflect};
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::options::FitOptions;
use super::state::{EdgePatch, NetworkBackend, PointerSelection};
use super::types::GraphData;
use crate::error::GraphError;

#[wasm_bindgen]
extern "C" {
	/// `vis.DataSet`: observable item collection.
	#[wasm_bindgen(js_namespace = vis, js_name = DataSet)]
	pub type JsDataSet;

	#[wasm_bindgen(constructor, js_namespace = vis, js_class = "DataSet", catch)]
	fn new(items: &JsValue) -> Result<JsDataSet, JsValue>;

	#[wasm_bindgen(method, catch)]
	fn update(this: &JsDataSet, items: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(method, getter)]
	fn length(this: &JsDataSet) -> u32;

	/// Every stored item, including ids the library generated.
	#[wasm_bindgen(method, js_name = get)]
	fn all(this: &JsDataSet) -> JsValue;

	/// `vis.Network`: the interactive view.
	#[wasm_bindgen(js_namespace = vis, js_name = Network)]
	pub type JsNetwork;

	#[wasm_bindgen(constructor, js_namespace = vis, js_class = "Network", catch)]
	fn new(container: &HtmlElement, data: &JsValue, options: &JsValue) -> Result<JsNetwork, JsValue>;

	#[wasm_bindgen(method)]
	fn on(this: &JsNetwork, event: &str, callback: &Function);

	#[wasm_bindgen(method, catch)]
	fn fit(this: &JsNetwork, options: &JsValue) -> Result<(), JsValue>;

	#[wasm_bindgen(method)]
	fn destroy(this: &JsNetwork);
}

/// Handle proving the global `vis` namespace exists.
#[derive(Clone, Copy, Debug)]
pub struct VisLibrary(());

impl VisLibrary {
	/// Looks the library up, failing when the page did not load it.
	pub fn resolve() -> Result<Self, GraphError> {
		let found = Reflect::get(&js_sys::global(), &JsValue::from_str("vis"))
			.map(|vis| vis.is_object())
			.unwrap_or(false);
		if found {
			Ok(Self(()))
		} else {
			Err(GraphError::LibraryUnavailable)
		}
	}

	/// Load-time check: logs and reports availability, never fails.
	pub fn check() -> bool {
		match Self::resolve() {
			Ok(_) => {
				info!("social-graph: vis-network available");
				true
			}
			Err(e) => {
				warn!("social-graph: {e}; rendering will fail until it is loaded");
				false
			}
		}
	}
}

/// Converts a thrown JS value into a [`GraphError`].
pub fn js_error(value: JsValue) -> GraphError {
	let message = value
		.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{value:?}"));
	GraphError::Library(message)
}

/// Encodes a serde value as a plain JS value. Maps become plain objects, the
/// shape the library expects.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, GraphError> {
	Ok(value.serialize(&Serializer::json_compatible())?)
}

/// Decodes a JS value.
pub fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, GraphError> {
	Ok(serde_wasm_bindgen::from_value(value.clone())?)
}

/// Decodes each entry of a JS array, leaving out entries that do not fit `T`.
fn decode_items<T: DeserializeOwned>(items: &JsValue, kind: &str) -> Vec<T> {
	Array::from(items)
		.iter()
		.filter_map(|item| match from_js(&item) {
			Ok(record) => Some(record),
			Err(e) => {
				debug!("social-graph: {kind} left out of the selection index: {e}");
				None
			}
		})
		.collect()
}

/// Reads `nodes`/`edges` from a library event. The event object also holds DOM
/// events and canvas positions, so only those two arrays are read.
pub fn pointer_from_event(params: &JsValue) -> PointerSelection {
	let field = |name: &str| {
		Reflect::get(params, &JsValue::from_str(name))
			.ok()
			.and_then(|ids| from_js(&ids).ok())
			.unwrap_or_default()
	};
	PointerSelection {
		nodes: field("nodes"),
		edges: field("edges"),
	}
}

/// [`NetworkBackend`] backed by `vis.Network` and two `vis.DataSet`s.
pub struct VisBackend {
	network: JsNetwork,
	nodes: JsDataSet,
	edges: JsDataSet,
}

impl VisBackend {
	/// Mounts caller-owned JS values. Nodes, edges and options reach the
	/// library exactly as given, functions and generated ids included.
	pub fn mount_js(
		container: &HtmlElement,
		nodes: &JsValue,
		edges: &JsValue,
		options: &JsValue,
	) -> Result<Self, GraphError> {
		VisLibrary::resolve()?;
		let nodes = JsDataSet::new(nodes).map_err(js_error)?;
		let edges = JsDataSet::new(edges).map_err(js_error)?;

		let payload = Object::new();
		Reflect::set(&payload, &JsValue::from_str("nodes"), &nodes).map_err(js_error)?;
		Reflect::set(&payload, &JsValue::from_str("edges"), &edges).map_err(js_error)?;

		let network = JsNetwork::new(container, &payload, options).map_err(js_error)?;
		Ok(Self {
			network,
			nodes,
			edges,
		})
	}

	/// Typed copy of what the library holds. Entries this crate cannot read
	/// stay in the library and are only missing from the copy.
	pub fn records(&self) -> GraphData {
		GraphData {
			nodes: decode_items(&self.nodes.all(), "node"),
			edges: decode_items(&self.edges.all(), "edge"),
		}
	}

	/// Subscribes `callback` to a library event such as `click`.
	pub fn on(&self, event: &str, callback: &Closure<dyn FnMut(JsValue)>) {
		self.network.on(event, callback.as_ref().unchecked_ref());
	}
}

impl NetworkBackend for VisBackend {
	type Target = HtmlElement;

	fn mount(container: &HtmlElement, data: &GraphData, options: &Value) -> Result<Self, GraphError> {
		Self::mount_js(
			container,
			&to_js(&data.nodes)?,
			&to_js(&data.edges)?,
			&to_js(options)?,
		)
	}

	fn node_count(&self) -> usize {
		self.nodes.length() as usize
	}

	fn edge_count(&self) -> usize {
		self.edges.length() as usize
	}

	fn update_edges(&mut self, patches: &[EdgePatch]) -> Result<(), GraphError> {
		self.edges.update(&to_js(patches)?).map_err(js_error)?;
		Ok(())
	}

	fn fit(&mut self, options: &FitOptions) -> Result<(), GraphError> {
		self.network.fit(&to_js(options)?).map_err(js_error)
	}
}

impl Drop for VisBackend {
	fn drop(&mut self) {
		self.network.destroy();
	}
}
