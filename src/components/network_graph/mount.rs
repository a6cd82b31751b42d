//! Browser wiring for a rendered network: library events, info panel and the
//! deferred fit animation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{info, warn};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use super::info_panel::DomInfoPanel;
use super::options::{RenderConfig, default_options};
use super::state::GraphSession;
use super::types::GraphData;
use super::vis::{VisBackend, js_error, pointer_from_event, to_js};
use crate::error::GraphError;

type SharedSession = Rc<RefCell<GraphSession<VisBackend>>>;

/// A network mounted into the page. Dropping it detaches the event handlers
/// and destroys the library view.
pub struct MountedGraph {
	session: SharedSession,
	_listeners: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl MountedGraph {
	/// Shared session, for callers that need counts or a manual fit.
	pub fn session(&self) -> &SharedSession {
		&self.session
	}
}

fn document() -> Result<Document, GraphError> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or(GraphError::NoWindow)
}

fn container_by_id(document: &Document, container_id: &str) -> Result<HtmlElement, GraphError> {
	document
		.get_element_by_id(container_id)
		.and_then(|e| e.dyn_into().ok())
		.ok_or_else(|| GraphError::MissingElement(container_id.to_string()))
}

/// Renders `data` into the element with `container_id`, wires selection and
/// isolation handlers and schedules the initial fit.
pub fn mount_graph(
	container_id: &str,
	data: GraphData,
	options: Option<Value>,
	config: RenderConfig,
) -> Result<MountedGraph, GraphError> {
	let document = document()?;
	let container = container_by_id(&document, container_id)?;
	mount_into(&container, document, data, options, config)
}

/// Same as [`mount_graph`] for an element the caller already holds.
pub fn mount_into(
	container: &HtmlElement,
	document: Document,
	data: GraphData,
	options: Option<Value>,
	config: RenderConfig,
) -> Result<MountedGraph, GraphError> {
	let session = GraphSession::<VisBackend>::render(container, data, options, config)?;
	attach(session, document)
}

/// Renders JS arrays and an options object straight from a page script.
///
/// Nothing is converted on the way in: the library sees the caller's values,
/// so entries it tolerates and function-valued options keep working.
/// `undefined` or `null` options select [`default_options`].
pub fn mount_js(
	container_id: &str,
	nodes: &JsValue,
	edges: &JsValue,
	options: &JsValue,
	config: RenderConfig,
) -> Result<MountedGraph, GraphError> {
	let document = document()?;
	let container = container_by_id(&document, container_id)?;
	let defaults;
	let options = if options.is_undefined() || options.is_null() {
		defaults = to_js(&default_options())?;
		&defaults
	} else {
		options
	};

	let backend = VisBackend::mount_js(&container, nodes, edges, options)?;
	let records = backend.records();
	let session = GraphSession::with_backend(backend, records, config);
	info!(
		"social-graph: rendered {} nodes, {} edges from script data",
		session.node_count(),
		session.edge_count()
	);
	attach(session, document)
}

/// Subscribes the info panel, hooks the library events and schedules the fit.
fn attach(mut session: GraphSession<VisBackend>, document: Document) -> Result<MountedGraph, GraphError> {
	let fit_timeout = session.config().fit_timeout();
	let panel = DomInfoPanel::new(document, session.config());
	session.subscribe(move |event| panel.handle(event));
	let session = Rc::new(RefCell::new(session));

	let session_click = session.clone();
	let on_click = Closure::<dyn FnMut(JsValue)>::new(move |params: JsValue| {
		let pointer = pointer_from_event(&params);
		session_click.borrow_mut().handle_click(&pointer);
	});

	let session_dbl = session.clone();
	let on_double_click = Closure::<dyn FnMut(JsValue)>::new(move |params: JsValue| {
		let pointer = pointer_from_event(&params);
		if let Err(e) = session_dbl.borrow_mut().handle_double_click(&pointer) {
			warn!("social-graph: isolation failed: {e}");
		}
	});

	{
		let s = session.borrow();
		s.backend().on("click", &on_click);
		s.backend().on("doubleClick", &on_double_click);
	}

	schedule_fit(Rc::downgrade(&session), fit_timeout)?;

	Ok(MountedGraph {
		session,
		_listeners: vec![on_click, on_double_click],
	})
}

/// Fits the view once after `delay_ms`; a no-op if the graph is gone by then.
fn schedule_fit(session: Weak<RefCell<GraphSession<VisBackend>>>, delay_ms: i32) -> Result<(), GraphError> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;
	let callback = Closure::once_into_js(move || {
		let Some(session) = session.upgrade() else {
			return;
		};
		if let Err(e) = session.borrow_mut().fit_to_view() {
			warn!("social-graph: fit failed: {e}");
		}
	});
	window
		.set_timeout_with_callback_and_timeout_and_arguments_0(
			callback.unchecked_ref(),
			delay_ms,
		)
		.map_err(js_error)?;
	Ok(())
}
