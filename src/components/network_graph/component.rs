//! Leptos component hosting the network view.
//!
//! The component renders the container element and mounts the library into it
//! once the element exists. Changing `data` destroys the previous view and
//! mounts a new one.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use serde_json::Value;
use web_sys::HtmlElement;

use super::mount::{MountedGraph, mount_into};
use super::options::RenderConfig;
use super::types::GraphData;

/// Interactive network view.
///
/// The container gets `config.container_id` as its id so the fullscreen toggle
/// can resize it. Render failures are logged and reported through `on_error`.
#[component]
pub fn NetworkGraph(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] options: Option<Value>,
	#[prop(default = RenderConfig::default())] config: RenderConfig,
	#[prop(optional, into)] on_error: Option<Callback<String>>,
	#[prop(default = "600px")] height: &'static str,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let mounted: Rc<RefCell<Option<MountedGraph>>> = Rc::new(RefCell::new(None));
	let container_id = config.container_id.clone();

	Effect::new(move |_| {
		let data = data.get();
		let Some(container) = container_ref.get() else {
			return;
		};
		let container: HtmlElement = container.into();
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};

		// Drop the previous view before mounting over it.
		mounted.borrow_mut().take();
		match mount_into(&container, document, data, options.clone(), config.clone()) {
			Ok(graph) => *mounted.borrow_mut() = Some(graph),
			Err(e) => {
				error!("social-graph: render failed: {e}");
				if let Some(on_error) = on_error {
					on_error.run(e.to_string());
				}
			}
		}
	});

	view! {
		<div
			node_ref=container_ref
			id=container_id
			class="network-graph"
			style=format!("width: 100%; height: {height};")
		/>
	}
}
