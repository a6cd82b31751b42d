//! Render session state and interaction handling.
//!
//! A [`GraphSession`] owns a render-scoped copy of the node and edge records
//! together with the [`NetworkBackend`] that displays them. Library events
//! arrive as [`PointerSelection`] values; the session turns them into
//! [`NetworkEvent`]s for its subscribers and into edge color patches for the
//! backend. Nothing here touches JavaScript, so the interaction rules can be
//! exercised with a substituted backend.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::options::{FitOptions, RenderConfig, resolve_options};
use super::types::{EdgeRecord, GraphData, ItemId, NodeRecord};
use crate::error::GraphError;

/// Seam between the session and the network library.
pub trait NetworkBackend {
	/// What the backend mounts into (a DOM element for the real library).
	type Target: ?Sized;

	/// Builds the network from the records and the options object.
	fn mount(target: &Self::Target, data: &GraphData, options: &Value) -> Result<Self, GraphError>
	where
		Self: Sized;

	/// Number of nodes held by the library.
	fn node_count(&self) -> usize;

	/// Number of edges held by the library.
	fn edge_count(&self) -> usize;

	/// Applies partial updates to edges, matched by id.
	fn update_edges(&mut self, patches: &[EdgePatch]) -> Result<(), GraphError>;

	/// Moves the view so every element is visible.
	fn fit(&mut self, options: &FitOptions) -> Result<(), GraphError>;
}

/// Partial edge update. A `null` color resets the edge to the library default.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgePatch {
	/// Edge to update.
	pub id: ItemId,
	/// New color, or `null`.
	pub color: Value,
}

/// Items under the pointer when the library reported a click.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PointerSelection {
	/// Selected node ids, topmost first.
	#[serde(default)]
	pub nodes: Vec<ItemId>,
	/// Selected edge ids.
	#[serde(default)]
	pub edges: Vec<ItemId>,
}

/// Details of a selected node or edge.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
	/// A node was clicked.
	Node {
		/// Node id.
		id: ItemId,
		/// Node title, empty when the node has none.
		title: String,
		/// Node image URL.
		image: Option<String>,
		/// External profile URL built from the id.
		profile_url: String,
	},
	/// An edge was clicked.
	Edge {
		/// Edge id.
		id: ItemId,
		/// Edge title, empty when the edge has none.
		title: String,
		/// Edge weight, zero when the edge has none.
		weight: f64,
	},
}

impl Selection {
	/// Text written into the info panel.
	pub fn description(&self) -> String {
		match self {
			Selection::Node { id, title, .. } => format!("Selected node\nid: {id}\n{title}"),
			Selection::Edge { title, weight, .. } => {
				format!("Selected edge\n{title}\nWeight: {}", format_weight(*weight))
			}
		}
	}
}

/// Whole weights print without a fractional part.
fn format_weight(weight: f64) -> String {
	if weight.fract() == 0.0 && weight.abs() < 1e15 {
		format!("{}", weight as i64)
	} else {
		weight.to_string()
	}
}

/// Notification delivered to session subscribers.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkEvent {
	/// A node or an edge was selected by a click.
	Selected(Selection),
	/// A node's neighbourhood was isolated; `dimmed` lists the faded edges.
	Isolated {
		/// Double-clicked node.
		node: ItemId,
		/// Edges not incident to `node`.
		dimmed: Vec<ItemId>,
	},
	/// The background was double-clicked and every edge got its color back.
	Restored,
}

type Listener = Box<dyn FnMut(&NetworkEvent)>;

/// One rendered network and the records it was built from.
pub struct GraphSession<B> {
	backend: B,
	config: RenderConfig,
	nodes: HashMap<ItemId, NodeRecord>,
	edges: Vec<EdgeRecord>,
	listeners: Vec<Listener>,
}

impl<B: NetworkBackend> GraphSession<B> {
	/// Mounts `data` into `target`.
	///
	/// `options` are used verbatim; `None` (or `null`) selects the defaults.
	/// Edges without ids get generated ones before the library sees them.
	pub fn render(
		target: &B::Target,
		data: GraphData,
		options: Option<Value>,
		config: RenderConfig,
	) -> Result<Self, GraphError> {
		let data = data.with_edge_ids();
		let options = resolve_options(options);
		let backend = B::mount(target, &data, &options)?;
		info!(
			"social-graph: rendered {} nodes, {} edges",
			backend.node_count(),
			backend.edge_count()
		);
		Ok(Self::with_backend(backend, data, config))
	}

	/// Wraps an already mounted backend. `data` must carry edge ids.
	pub fn with_backend(backend: B, data: GraphData, config: RenderConfig) -> Self {
		let nodes = data
			.nodes
			.into_iter()
			.map(|node| (node.id.clone(), node))
			.collect();
		Self {
			backend,
			config,
			nodes,
			edges: data.edges,
			listeners: Vec::new(),
		}
	}

	/// The library seam.
	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Active configuration.
	pub fn config(&self) -> &RenderConfig {
		&self.config
	}

	/// Number of nodes shown by the library.
	pub fn node_count(&self) -> usize {
		self.backend.node_count()
	}

	/// Number of edges shown by the library.
	pub fn edge_count(&self) -> usize {
		self.backend.edge_count()
	}

	/// Registers a listener for selection and isolation events.
	pub fn subscribe(&mut self, listener: impl FnMut(&NetworkEvent) + 'static) {
		self.listeners.push(Box::new(listener));
	}

	fn emit(&mut self, event: NetworkEvent) {
		for listener in &mut self.listeners {
			listener(&event);
		}
	}

	/// Builds the selection for a click. Nodes take precedence over edges.
	pub fn selection(&self, pointer: &PointerSelection) -> Option<Selection> {
		if let Some(id) = pointer.nodes.first() {
			let node = self.nodes.get(id)?;
			return Some(Selection::Node {
				id: id.clone(),
				title: node.title.clone().unwrap_or_default(),
				image: node.image.clone(),
				profile_url: self.config.profile_url_for(id),
			});
		}
		let id = pointer.edges.first()?;
		let edge = self.edges.iter().find(|e| e.id.as_ref() == Some(id))?;
		Some(Selection::Edge {
			id: id.clone(),
			title: edge.title.clone().unwrap_or_default(),
			weight: edge.value.unwrap_or_default(),
		})
	}

	/// Handles the library `click` event.
	pub fn handle_click(&mut self, pointer: &PointerSelection) -> Option<Selection> {
		let selection = self.selection(pointer);
		match &selection {
			Some(selection) => {
				debug!("social-graph: selected {selection:?}");
				self.emit(NetworkEvent::Selected(selection.clone()));
			}
			None => debug!("social-graph: click on empty space"),
		}
		selection
	}

	/// Edge ids incident to `node`.
	pub fn incident_edges(&self, node: &ItemId) -> HashSet<ItemId> {
		self.edges
			.iter()
			.filter(|e| e.touches(node))
			.filter_map(|e| e.id.clone())
			.collect()
	}

	/// Handles the library `doubleClick` event.
	///
	/// Every edge is first reset to its original color. If a node was hit,
	/// edges outside its neighbourhood are then dimmed.
	pub fn handle_double_click(&mut self, pointer: &PointerSelection) -> Result<(), GraphError> {
		let reset: Vec<EdgePatch> = self
			.edges
			.iter()
			.filter_map(|e| {
				Some(EdgePatch {
					id: e.id.clone()?,
					color: e.color.clone().unwrap_or(Value::Null),
				})
			})
			.collect();
		self.backend.update_edges(&reset)?;

		let Some(node) = pointer.nodes.first().cloned() else {
			self.emit(NetworkEvent::Restored);
			return Ok(());
		};

		let incident = self.incident_edges(&node);
		let dimmed: Vec<ItemId> = self
			.edges
			.iter()
			.filter_map(|e| e.id.clone())
			.filter(|id| !incident.contains(id))
			.collect();
		let color = Value::String(self.config.dimmed_edge_color.clone());
		let patches: Vec<EdgePatch> = dimmed
			.iter()
			.map(|id| EdgePatch {
				id: id.clone(),
				color: color.clone(),
			})
			.collect();
		self.backend.update_edges(&patches)?;
		debug!(
			"social-graph: isolated {node}, {} of {} edges dimmed",
			dimmed.len(),
			self.edges.len()
		);
		self.emit(NetworkEvent::Isolated { node, dimmed });
		Ok(())
	}

	/// Animates the view to show every element.
	pub fn fit_to_view(&mut self) -> Result<(), GraphError> {
		let options = self.config.fit_options();
		self.backend.fit(&options)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use serde_json::json;

	use super::*;
	use crate::components::network_graph::options::DIMMED_EDGE_COLOR;

	/// In-memory stand-in for the network library.
	struct MockBackend {
		pub nodes: usize,
		pub colors: HashMap<ItemId, Option<Value>>,
		pub options: Value,
		pub fits: Vec<FitOptions>,
		pub updates: usize,
	}

	impl NetworkBackend for MockBackend {
		type Target = ();

		fn mount(_: &(), data: &GraphData, options: &Value) -> Result<Self, GraphError> {
			Ok(Self {
				nodes: data.nodes.len(),
				colors: data
					.edges
					.iter()
					.map(|e| (e.id.clone().unwrap(), e.color.clone()))
					.collect(),
				options: options.clone(),
				fits: Vec::new(),
				updates: 0,
			})
		}

		fn node_count(&self) -> usize {
			self.nodes
		}

		fn edge_count(&self) -> usize {
			self.colors.len()
		}

		fn update_edges(&mut self, patches: &[EdgePatch]) -> Result<(), GraphError> {
			self.updates += 1;
			for patch in patches {
				let color = match &patch.color {
					Value::Null => None,
					color => Some(color.clone()),
				};
				self.colors.insert(patch.id.clone(), color);
			}
			Ok(())
		}

		fn fit(&mut self, options: &FitOptions) -> Result<(), GraphError> {
			self.fits.push(options.clone());
			Ok(())
		}
	}

	fn node(id: i64, title: &str) -> NodeRecord {
		let mut node = NodeRecord::new(id);
		node.title = Some(title.into());
		node.image = Some(format!("https://img.example/{id}.jpg"));
		node
	}

	fn edge(id: &str, from: i64, to: i64, value: f64) -> EdgeRecord {
		let mut edge = EdgeRecord::new(from, to);
		edge.id = Some(id.into());
		edge.value = Some(value);
		edge.title = Some(format!("from: {from}\nto:   {to}"));
		edge
	}

	/// Star around 1 plus a 2-3 edge; `e12` carries its own color.
	fn sample() -> GraphData {
		let mut e12 = edge("e12", 1, 2, 3.0);
		e12.color = Some(json!("#FF7092"));
		GraphData {
			nodes: vec![node(1, "Ann Lee"), node(2, "Bob Ray"), node(3, "Cy Dee"), node(4, "Di Fox")],
			edges: vec![e12, edge("e13", 1, 3, 1.0), edge("e23", 2, 3, 2.5), edge("e34", 3, 4, 0.0)],
		}
	}

	fn session() -> GraphSession<MockBackend> {
		GraphSession::render(&(), sample(), None, RenderConfig::default()).unwrap()
	}

	fn pointer(nodes: Vec<i64>, edges: Vec<&str>) -> PointerSelection {
		PointerSelection {
			nodes: nodes.into_iter().map(ItemId::from).collect(),
			edges: edges.into_iter().map(ItemId::from).collect(),
		}
	}

	fn dimmed(session: &GraphSession<MockBackend>) -> Vec<String> {
		let mut ids: Vec<String> = session
			.backend()
			.colors
			.iter()
			.filter(|(_, c)| c.as_ref() == Some(&json!(DIMMED_EDGE_COLOR)))
			.map(|(id, _)| id.to_string())
			.collect();
		ids.sort();
		ids
	}

	#[test]
	fn render_keeps_counts_and_defaults_options() {
		let session = session();
		assert_eq!(session.node_count(), 4);
		assert_eq!(session.edge_count(), 4);
		assert_eq!(session.backend().options["physics"]["barnesHut"]["centralGravity"], json!(1.5));
	}

	#[test]
	fn render_uses_caller_options_verbatim() {
		let options = json!({ "physics": false });
		let session: GraphSession<MockBackend> =
			GraphSession::render(&(), sample(), Some(options.clone()), RenderConfig::default())
				.unwrap();
		assert_eq!(session.backend().options, options);
	}

	#[test]
	fn render_assigns_ids_to_anonymous_edges() {
		let data = GraphData {
			nodes: vec![node(1, "a"), node(2, "b")],
			edges: vec![EdgeRecord::new(1, 2)],
		};
		let session: GraphSession<MockBackend> =
			GraphSession::render(&(), data, None, RenderConfig::default()).unwrap();
		assert_eq!(session.incident_edges(&ItemId::Int(1)).len(), 1);
	}

	#[test]
	fn node_click_describes_node_and_links_profile() {
		let mut session = session();
		let events = Rc::new(RefCell::new(Vec::new()));
		let sink = events.clone();
		session.subscribe(move |event| sink.borrow_mut().push(event.clone()));

		let selection = session.handle_click(&pointer(vec![2], vec!["e12"])).unwrap();
		let text = selection.description();
		assert!(text.contains("2"));
		assert!(text.contains("Bob Ray"));
		match &selection {
			Selection::Node { profile_url, image, .. } => {
				assert_eq!(profile_url, "https://vk.com/id2");
				assert_eq!(image.as_deref(), Some("https://img.example/2.jpg"));
			}
			other => panic!("expected node selection, got {other:?}"),
		}
		assert_eq!(*events.borrow(), vec![NetworkEvent::Selected(selection)]);
	}

	#[test]
	fn edge_click_describes_title_and_weight() {
		let mut session = session();
		let selection = session.handle_click(&pointer(vec![], vec!["e23"])).unwrap();
		let text = selection.description();
		assert!(text.contains("from: 2\nto:   3"));
		assert!(text.contains("Weight: 2.5"));

		let whole = session.handle_click(&pointer(vec![], vec!["e12"])).unwrap();
		assert!(whole.description().ends_with("Weight: 3"));
	}

	#[test]
	fn click_on_nothing_or_unknown_ids_emits_nothing() {
		let mut session = session();
		let count = Rc::new(RefCell::new(0));
		let sink = count.clone();
		session.subscribe(move |_| *sink.borrow_mut() += 1);

		assert!(session.handle_click(&PointerSelection::default()).is_none());
		assert!(session.handle_click(&pointer(vec![99], vec![])).is_none());
		assert_eq!(*count.borrow(), 0);
	}

	#[test]
	fn double_click_dims_only_non_incident_edges() {
		let mut session = session();
		session.handle_double_click(&pointer(vec![1], vec![])).unwrap();

		assert_eq!(dimmed(&session), vec!["e23", "e34"]);
		let colors = &session.backend().colors;
		assert_eq!(colors[&ItemId::from("e12")], Some(json!("#FF7092")));
		assert_eq!(colors[&ItemId::from("e13")], None);
	}

	#[test]
	fn repeated_isolation_leaves_no_stale_dimming() {
		let mut session = session();
		session.handle_double_click(&pointer(vec![1], vec![])).unwrap();
		session.handle_double_click(&pointer(vec![4], vec![])).unwrap();

		assert_eq!(dimmed(&session), vec!["e12", "e13", "e23"]);
		assert_eq!(session.backend().colors[&ItemId::from("e34")], None);
		assert_eq!(session.backend().updates, 4);
	}

	#[test]
	fn background_double_click_restores_colors() {
		let mut session = session();
		let events = Rc::new(RefCell::new(Vec::new()));
		let sink = events.clone();
		session.subscribe(move |event| sink.borrow_mut().push(event.clone()));

		session.handle_double_click(&pointer(vec![4], vec![])).unwrap();
		session.handle_double_click(&PointerSelection::default()).unwrap();

		assert!(dimmed(&session).is_empty());
		assert_eq!(session.backend().colors[&ItemId::from("e12")], Some(json!("#FF7092")));
		assert_eq!(
			*events.borrow(),
			vec![
				NetworkEvent::Isolated {
					node: ItemId::Int(4),
					dimmed: vec!["e12".into(), "e13".into(), "e23".into()],
				},
				NetworkEvent::Restored,
			]
		);
	}

	#[test]
	fn fit_uses_configured_animation() {
		let mut session = session();
		session.fit_to_view().unwrap();
		assert_eq!(session.backend().fits[0].animation.duration, 2000);
	}

	#[test]
	fn pointer_selection_parses_library_params() {
		let pointer: PointerSelection =
			serde_json::from_value(json!({ "nodes": [5], "edges": ["edge-1"] })).unwrap();
		assert_eq!(pointer.nodes, vec![ItemId::Int(5)]);
		assert_eq!(pointer.edges, vec![ItemId::from("edge-1")]);
	}
}
