//! Browser side of the fullscreen toggle.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use super::state::{ContainerLayout, FullscreenController, pick_request_method};
use crate::components::network_graph::vis::js_error;
use crate::error::GraphError;

/// Change and error notifications, standard and WebKit-prefixed. Each one
/// re-reads the document state.
const SYNC_EVENTS: [&str; 4] = [
	"fullscreenchange",
	"webkitfullscreenchange",
	"fullscreenerror",
	"webkitfullscreenerror",
];

/// [`ContainerLayout`] over an element's inline style.
pub struct StyleLayout(pub HtmlElement);

impl ContainerLayout for StyleLayout {
	fn height(&self) -> String {
		self.0.style().get_property_value("height").unwrap_or_default()
	}

	fn set_height(&self, height: &str) {
		let _ = self.0.style().set_property("height", height);
	}
}

/// Requests fullscreen through the first method `element` exposes.
///
/// Returns whatever the method returned: a `Promise` for the standard API,
/// `undefined` for most prefixed ones.
pub fn request_fullscreen(element: &Element) -> Result<JsValue, GraphError> {
	let method = |name: &str| {
		Reflect::get(element, &JsValue::from_str(name))
			.ok()
			.filter(|f| f.is_function())
	};
	let name = pick_request_method(|name| method(name).is_some())
		.ok_or(GraphError::FullscreenUnsupported)?;
	debug!("social-graph: entering fullscreen via {name}");
	let request: Function = method(name)
		.ok_or(GraphError::FullscreenUnsupported)?
		.unchecked_into();
	request.call0(element).map_err(js_error)
}

/// Whether the document currently shows an element fullscreen.
pub fn document_is_fullscreen(document: &Document) -> bool {
	document.fullscreen_element().is_some()
		|| Reflect::get(document, &JsValue::from_str("webkitFullscreenElement"))
			.map(|e| !e.is_null() && !e.is_undefined())
			.unwrap_or(false)
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, GraphError> {
	document
		.get_element_by_id(id)
		.and_then(|e| e.dyn_into().ok())
		.ok_or_else(|| GraphError::MissingElement(id.to_string()))
}

/// Matches the container height to the document's current fullscreen state.
fn sync_container(document: &Document, container_id: &str, controller: &RefCell<FullscreenController>) {
	let Ok(container) = element_by_id::<HtmlElement>(document, container_id) else {
		return;
	};
	let Ok(mut controller) = controller.try_borrow_mut() else {
		return;
	};
	controller.handle_change(&StyleLayout(container), document_is_fullscreen(document));
}

/// Fullscreen toggle for one graph container.
///
/// Owns its [`FullscreenController`] and the document listeners that restore
/// the container height; dropping the toggle removes them.
pub struct FullscreenToggle {
	document: Document,
	container_id: String,
	controller: Rc<RefCell<FullscreenController>>,
	on_change: Closure<dyn FnMut()>,
	on_reject: Closure<dyn FnMut(JsValue)>,
}

impl FullscreenToggle {
	/// Listens for fullscreen changes affecting the container `container_id`.
	pub fn install(container_id: &str) -> Result<Self, GraphError> {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or(GraphError::NoWindow)?;
		let controller = Rc::new(RefCell::new(FullscreenController::default()));

		let (doc_change, controller_change, id_change) =
			(document.clone(), controller.clone(), container_id.to_string());
		let on_change = Closure::<dyn FnMut()>::new(move || {
			sync_container(&doc_change, &id_change, &controller_change);
		});
		for event in SYNC_EVENTS {
			document
				.add_event_listener_with_callback(event, on_change.as_ref().unchecked_ref())
				.map_err(js_error)?;
		}

		let (doc_reject, controller_reject, id_reject) =
			(document.clone(), controller.clone(), container_id.to_string());
		let on_reject = Closure::<dyn FnMut(JsValue)>::new(move |reason: JsValue| {
			warn!("social-graph: fullscreen request rejected: {}", js_error(reason));
			sync_container(&doc_reject, &id_reject, &controller_reject);
		});

		Ok(Self {
			document,
			container_id: container_id.to_string(),
			controller,
			on_change,
			on_reject,
		})
	}

	/// Shows `element_id` fullscreen with the container stretched to fill it.
	///
	/// A request the browser rejects later restores the container as soon as
	/// the rejection arrives.
	pub fn open(&self, element_id: &str) -> Result<(), GraphError> {
		let element: Element = element_by_id(&self.document, element_id)?;
		let container: HtmlElement = element_by_id(&self.document, &self.container_id)?;
		let mut pending = None;
		self.controller
			.borrow_mut()
			.enter(&StyleLayout(container), || {
				pending = request_fullscreen(&element)?.dyn_into::<Promise>().ok();
				Ok(())
			})?;
		if let Some(promise) = pending {
			let _ = promise.catch(&self.on_reject);
		}
		Ok(())
	}

	/// Whether the container is currently stretched.
	pub fn is_active(&self) -> bool {
		self.controller.borrow().is_active()
	}
}

impl Drop for FullscreenToggle {
	fn drop(&mut self) {
		for event in SYNC_EVENTS {
			let _ = self
				.document
				.remove_event_listener_with_callback(event, self.on_change.as_ref().unchecked_ref());
		}
	}
}
