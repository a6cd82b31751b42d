//! Node and edge records handed to the network library.
//!
//! Records keep the handful of attributes this crate reads (title, image,
//! weight, color) as typed fields and pass every other library attribute
//! through `extra` untouched.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of a node or an edge. The library accepts numbers and strings.
///
/// Whole numbers always read as [`ItemId::Int`], so `1` and `1.0` name the
/// same item.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ItemId {
	/// Numeric id, e.g. a social network user id.
	Int(i64),
	/// Fractional numeric id.
	Float(f64),
	/// Free-form string id.
	Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Int(i64),
	Float(f64),
	Text(String),
}

impl<'de> Deserialize<'de> for ItemId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(match RawId::deserialize(deserializer)? {
			RawId::Int(id) => ItemId::Int(id),
			RawId::Float(id) if id.fract() == 0.0 && id.abs() < 9.0e15 => ItemId::Int(id as i64),
			RawId::Float(id) => ItemId::Float(id),
			RawId::Text(id) => ItemId::Text(id),
		})
	}
}

impl PartialEq for ItemId {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(ItemId::Int(a), ItemId::Int(b)) => a == b,
			(ItemId::Float(a), ItemId::Float(b)) => a.to_bits() == b.to_bits(),
			(ItemId::Text(a), ItemId::Text(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for ItemId {}

impl Hash for ItemId {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			ItemId::Int(id) => id.hash(state),
			ItemId::Float(id) => id.to_bits().hash(state),
			ItemId::Text(id) => id.hash(state),
		}
	}
}

impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ItemId::Int(id) => write!(f, "{id}"),
			ItemId::Float(id) => write!(f, "{id}"),
			ItemId::Text(id) => f.write_str(id),
		}
	}
}

impl From<i64> for ItemId {
	fn from(id: i64) -> Self {
		ItemId::Int(id)
	}
}

impl From<&str> for ItemId {
	fn from(id: &str) -> Self {
		ItemId::Text(id.to_string())
	}
}

/// Reads any scalar as text. The library shows numbers and booleans as they
/// print; other shapes (e.g. a DOM element title) read as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Ok(match Value::deserialize(deserializer)? {
		Value::String(text) => Some(text),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	})
}

/// Reads a number or a numeric string.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
	Ok(match Value::deserialize(deserializer)? {
		Value::Number(n) => n.as_f64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	})
}

/// A node in the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
	/// Unique identifier. Edges reference nodes by this id.
	pub id: ItemId,
	/// Text drawn next to the node.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Tooltip text, also shown in the info panel on selection.
	#[serde(
		default,
		deserialize_with = "lenient_text",
		skip_serializing_if = "Option::is_none"
	)]
	pub title: Option<String>,
	/// Image URL for image-shaped nodes.
	#[serde(
		default,
		deserialize_with = "lenient_text",
		skip_serializing_if = "Option::is_none"
	)]
	pub image: Option<String>,
	/// CSS color string or a vis color object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<Value>,
	/// Any other vis node attribute (shape, size, mass, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl NodeRecord {
	/// A bare node carrying only its id.
	pub fn new(id: impl Into<ItemId>) -> Self {
		Self {
			id: id.into(),
			label: None,
			title: None,
			image: None,
			color: None,
			extra: Map::new(),
		}
	}
}

/// An edge between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
	/// Edge id. Filled in by [`GraphData::with_edge_ids`] when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<ItemId>,
	/// Source node id.
	pub from: ItemId,
	/// Target node id.
	pub to: ItemId,
	/// Weight; the library scales edge width by it.
	#[serde(
		default,
		deserialize_with = "lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub value: Option<f64>,
	/// Tooltip text, also shown in the info panel on selection.
	#[serde(
		default,
		deserialize_with = "lenient_text",
		skip_serializing_if = "Option::is_none"
	)]
	pub title: Option<String>,
	/// CSS color string or a vis color object. Dimming rewrites it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<Value>,
	/// Any other vis edge attribute (arrows, width, smooth, ...).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl EdgeRecord {
	/// A bare edge between two nodes.
	pub fn new(from: impl Into<ItemId>, to: impl Into<ItemId>) -> Self {
		Self {
			id: None,
			from: from.into(),
			to: to.into(),
			value: None,
			title: None,
			color: None,
			extra: Map::new(),
		}
	}

	/// Whether `node` is one of this edge's endpoints.
	pub fn touches(&self, node: &ItemId) -> bool {
		&self.from == node || &self.to == node
	}
}

/// Nodes and edges of one render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Node collection.
	#[serde(default)]
	pub nodes: Vec<NodeRecord>,
	/// Edge collection.
	#[serde(default)]
	pub edges: Vec<EdgeRecord>,
}

impl GraphData {
	/// Assigns `edge-<n>` ids to edges that have none, skipping ids the caller
	/// already uses, so every edge can be addressed for recoloring.
	pub fn with_edge_ids(mut self) -> Self {
		let taken: HashSet<ItemId> = self.edges.iter().filter_map(|e| e.id.clone()).collect();
		let mut next = 0usize;
		for edge in self.edges.iter_mut().filter(|e| e.id.is_none()) {
			let id = loop {
				let candidate = ItemId::Text(format!("edge-{next}"));
				next += 1;
				if !taken.contains(&candidate) {
					break candidate;
				}
			};
			edge.id = Some(id);
		}
		self
	}
}
