//! social-graph: interactive friends network visualization.
//!
//! This crate renders a friends network with `vis-network`, shows the selected
//! person or relation in an info panel, isolates a person's neighbourhood on
//! double-click and toggles a fullscreen view of the graph.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod api;
pub mod components;
pub mod error;
pub mod social;

pub use components::fullscreen::{FullscreenButton, FullscreenController, FullscreenToggle};
pub use components::network_graph::{
	EdgeRecord, GraphData, GraphSession, ItemId, NetworkEvent, NetworkGraph, NodeRecord,
	RenderConfig, Selection,
};
pub use error::GraphError;
pub use social::{EdgeLayer, SocialGraph, SocialSnapshot};

use components::network_graph::vis::VisLibrary;

// Browser tests live in tests/web.rs; the native unit test build never links it.
#[cfg(test)]
use wasm_bindgen_futures as _;
#[cfg(test)]
use wasm_bindgen_test as _;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("social-graph: logging initialized");
}

/// Payload embedded by the page generator.
///
/// Either `graph` (ready node/edge records) or `social` (a profile snapshot)
/// provides the data; `graph` wins when both are present.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageData {
	/// Ready-made records.
	pub graph: Option<GraphData>,
	/// Profile snapshot to build the graph from.
	pub social: Option<SocialSnapshot>,
	/// Options object for the library; defaults apply when absent.
	pub options: Option<Value>,
	/// Element ids, profile URL and timings.
	pub config: RenderConfig,
}

/// Parses the page payload.
pub fn parse_page_data(json: &str) -> Result<PageData, GraphError> {
	Ok(serde_json::from_str(json)?)
}

/// Load the payload from a script element with id="graph-data".
fn load_page_data() -> Option<PageData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_page_data(&json_text) {
		Ok(data) => {
			info!("social-graph: page data loaded");
			Some(data)
		}
		Err(e) => {
			warn!("social-graph: failed to parse page data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the payload from the DOM and renders the network with its side panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// A missing library is reported here and again when rendering fails.
	VisLibrary::check();

	let page = load_page_data().unwrap_or_default();
	let config = page.config.clone();
	let social = page.social.as_ref().map(SocialGraph::build);
	let fixed = page.graph.clone();

	let layer = RwSignal::new(EdgeLayer::default());
	let social_data = social.clone();
	let graph_signal = Signal::derive(move || match (&fixed, &social_data) {
		(Some(graph), _) => graph.clone(),
		(None, Some(social)) => social.layer(layer.get()),
		(None, None) => GraphData::default(),
	});

	let container_id = config.container_id.clone();
	let (info_id, image_id, link_id) = (
		config.info_panel_id.clone(),
		config.image_id.clone(),
		config.link_id.clone(),
	);
	let options = page.options.clone();

	let (render_error, set_render_error) = signal(None::<String>);
	let on_error = Callback::new(move |message: String| set_render_error.set(Some(message)));

	let layer_buttons = social
		.as_ref()
		.filter(|_| page.graph.is_none())
		.map(|social| {
			EdgeLayer::ALL
				.into_iter()
				.filter(|l| social.has_layer(*l))
				.map(|l| {
					view! {
						<button
							type="button"
							class="layer-button"
							class:active=move || layer.get() == l
							on:click=move |_| layer.set(l)
						>
							{l.label()}
						</button>
					}
				})
				.collect_view()
		});

	let close_friends = social
		.as_ref()
		.filter(|s| !s.close_friends.is_empty())
		.map(|s| {
			let items = s
				.close_friends
				.iter()
				.map(|f| {
					let href = config.profile_url_for(&f.id);
					let name = format!("{} {}", f.first_name, f.last_name);
					view! { <li><a href=href target="_blank">{name}</a></li> }
				})
				.collect_view();
			view! {
				<h2>"Close friends"</h2>
				<ul class="close-friends">{items}</ul>
			}
		});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Social graph of friends" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="social-graph">
			<div id="graphWrapper" class="graph-wrapper">
				<div class="graph-toolbar">
					{layer_buttons}
					<FullscreenButton target_id="graphWrapper" container_id=container_id />
				</div>
				<NetworkGraph
					data=graph_signal
					options=options
					config=config
					on_error=on_error
				/>
				<p class="graph-error">{move || render_error.get()}</p>
			</div>
			<aside class="network-sidebar">
				<img id=image_id class="node-image" alt="" />
				<p id=info_id class="network-info">
					"Click a person or a relation to see details. Double-click a person to isolate their connections."
				</p>
				<a id=link_id target="_blank" style="display: none;">
					"Open profile"
				</a>
				{close_friends}
			</aside>
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn payload_with_graph_and_config() {
		let page = parse_page_data(
			r#"{
				"graph": {
					"nodes": [{ "id": 1, "title": "Ann" }, { "id": 2, "title": "Bob" }],
					"edges": [{ "from": 1, "to": 2, "value": 3 }]
				},
				"options": null,
				"config": { "profileUrl": "https://ok.ru/profile/{id}" }
			}"#,
		)
		.unwrap();
		let graph = page.graph.unwrap();
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.edges[0].value, Some(3.0));
		assert!(page.options.is_none());
		assert_eq!(page.config.profile_url_for(&5), "https://ok.ru/profile/5");
		assert_eq!(page.config.container_id, "mynetwork");
	}

	#[test]
	fn payload_with_social_snapshot() {
		let page = parse_page_data(
			r#"{ "social": {
				"owner": { "uid": 1, "first_name": "Ann", "last_name": "Lee" },
				"friends": [{ "id": 2, "first_name": "Bob", "last_name": "Ray" }]
			} }"#,
		)
		.unwrap();
		let graph = SocialGraph::build(&page.social.unwrap());
		assert_eq!(graph.layer(EdgeLayer::Friends).edges.len(), 1);
	}

	#[test]
	fn empty_payload_is_valid() {
		let page = parse_page_data("{}").unwrap();
		assert!(page.graph.is_none() && page.social.is_none());
		assert!(parse_page_data("not json").is_err());
	}
}
