//! Friends network built from a profile snapshot.
//!
//! A snapshot holds the profile owner, the owner's friends, the mutual-friends
//! lists and per-pair interaction counts (gifts, likes, comments). Building it
//! yields the friendship graph plus alternative edge layers for each
//! interaction kind, and the owner's closest friends by mutual-friend count.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::components::network_graph::{EdgeRecord, GraphData, ItemId, NodeRecord};

/// Owner node and owner-edge color.
pub const OWNER_COLOR: &str = "#FF7092";
/// Friend node color.
pub const FRIEND_COLOR: &str = "#000000";
/// Number of close friends reported.
pub const CLOSE_FRIENDS: usize = 3;

/// Ids arrive as numbers or numeric strings depending on the network.
fn de_uid<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Int(i64),
		Text(String),
	}
	match Raw::deserialize(deserializer)? {
		Raw::Int(id) => Ok(id),
		Raw::Text(id) => id.trim().parse().map_err(serde::de::Error::custom),
	}
}

/// The profile the graph is centred on.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profile {
	/// User id.
	#[serde(deserialize_with = "de_uid")]
	pub uid: i64,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Avatar URL.
	#[serde(default)]
	pub image_url: Option<String>,
}

/// One entry of the owner's friends list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Friend {
	/// User id.
	#[serde(alias = "uid", deserialize_with = "de_uid")]
	pub id: i64,
	/// Given name.
	#[serde(default)]
	pub first_name: String,
	/// Family name.
	#[serde(default)]
	pub last_name: String,
	/// Avatar URL.
	#[serde(default, alias = "photo_200", alias = "pic190x190")]
	pub photo: Option<String>,
}

impl Friend {
	fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}
}

/// Counts keyed by receiver, then giver.
pub type Metric = BTreeMap<i64, BTreeMap<i64, u32>>;

/// Everything needed to draw one friends network.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SocialSnapshot {
	/// Profile owner.
	pub owner: Option<Profile>,
	/// Owner's friends.
	#[serde(default)]
	pub friends: Vec<Friend>,
	/// Friend id to the ids of friends they share with the owner.
	#[serde(default)]
	pub mutual: BTreeMap<i64, Vec<i64>>,
	/// Gifts given between friends.
	#[serde(default)]
	pub gifts: Metric,
	/// Likes given between friends.
	#[serde(default)]
	pub likes: Metric,
	/// Comments left between friends.
	#[serde(default)]
	pub comments: Metric,
}

/// Which edge set to display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeLayer {
	/// Friendship and mutual-friend edges.
	#[default]
	Friends,
	/// Gift edges.
	Gifts,
	/// Like edges.
	Likes,
	/// Comment edges.
	Comments,
}

impl EdgeLayer {
	/// All layers in display order.
	pub const ALL: [EdgeLayer; 4] = [
		EdgeLayer::Friends,
		EdgeLayer::Gifts,
		EdgeLayer::Likes,
		EdgeLayer::Comments,
	];

	/// Button caption.
	pub fn label(self) -> &'static str {
		match self {
			EdgeLayer::Friends => "Friends",
			EdgeLayer::Gifts => "Gifts",
			EdgeLayer::Likes => "Likes",
			EdgeLayer::Comments => "Comments",
		}
	}
}

/// Built friends network.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SocialGraph {
	/// Owner and friend nodes.
	pub nodes: Vec<NodeRecord>,
	/// Friendship edges.
	pub friendships: Vec<EdgeRecord>,
	/// Gift edges.
	pub gifts: Vec<EdgeRecord>,
	/// Like edges.
	pub likes: Vec<EdgeRecord>,
	/// Comment edges.
	pub comments: Vec<EdgeRecord>,
	/// Friends with the most mutual friends, in friends-list order.
	pub close_friends: Vec<Friend>,
}

fn person_node(
	id: i64,
	label: &str,
	title: String,
	color: &str,
	size: u32,
	mass: u32,
	image: Option<String>,
) -> NodeRecord {
	let mut node = NodeRecord::new(id);
	node.label = Some(label.to_string());
	node.title = Some(title);
	node.color = Some(Value::String(color.to_string()));
	node.image = image;
	node.extra.insert("shape".into(), json!("circularImage"));
	node.extra.insert("size".into(), json!(size));
	node.extra.insert("mass".into(), json!(mass));
	node
}

struct Builder {
	owner: Option<i64>,
	titles: HashMap<i64, String>,
}

impl Builder {
	fn title(&self, id: i64) -> String {
		self.titles.get(&id).cloned().unwrap_or_else(|| id.to_string())
	}

	fn edge(&self, from: i64, to: i64, value: u32) -> EdgeRecord {
		let mut edge = EdgeRecord::new(from, to);
		edge.value = Some(value as f64);
		edge.title = Some(format!("from: {}\nto:   {}", self.title(from), self.title(to)));
		edge
	}

	/// One directed edge per positive count, from giver to receiver.
	fn metric_edges(&self, metric: &Metric) -> Vec<EdgeRecord> {
		let mut edges = Vec::new();
		for (&receiver, givers) in metric {
			for (&giver, &count) in givers {
				if count == 0 {
					continue;
				}
				let mut edge = self.edge(giver, receiver, count);
				let touches_owner = self.owner.is_some_and(|o| o == giver || o == receiver);
				let arrows = if touches_owner { "middle" } else { "to" };
				edge.extra.insert("arrows".into(), json!(arrows));
				if touches_owner {
					edge.color = Some(json!(OWNER_COLOR));
				}
				edges.push(edge);
			}
		}
		edges
	}
}

/// Undirected edge set; the first edge between two nodes wins.
#[derive(Default)]
struct UndirectedEdges {
	seen: HashSet<(i64, i64)>,
	edges: Vec<EdgeRecord>,
}

impl UndirectedEdges {
	fn push(&mut self, a: i64, b: i64, edge: impl FnOnce() -> EdgeRecord) {
		if self.seen.insert((a.min(b), a.max(b))) {
			self.edges.push(edge());
		}
	}
}

impl SocialGraph {
	/// Builds nodes, edge layers and close friends from a snapshot.
	pub fn build(snapshot: &SocialSnapshot) -> Self {
		let mut nodes = Vec::with_capacity(snapshot.friends.len() + 1);
		let mut titles = HashMap::new();

		if let Some(owner) = &snapshot.owner {
			let title = format!("{} {}", owner.first_name, owner.last_name);
			titles.insert(owner.uid, title.clone());
			nodes.push(person_node(
				owner.uid,
				&owner.first_name,
				title,
				OWNER_COLOR,
				50,
				5,
				owner.image_url.clone(),
			));
		}
		for friend in &snapshot.friends {
			let title = friend.full_name();
			titles.insert(friend.id, title.clone());
			nodes.push(person_node(
				friend.id,
				&friend.last_name,
				title,
				FRIEND_COLOR,
				35,
				4,
				friend.photo.clone(),
			));
		}

		let builder = Builder {
			owner: snapshot.owner.as_ref().map(|o| o.uid),
			titles,
		};

		let mut friendships = UndirectedEdges::default();
		for (&a, mutuals) in &snapshot.mutual {
			let own: HashSet<i64> = mutuals.iter().copied().collect();
			for &b in mutuals {
				friendships.push(a, b, || {
					let shared = snapshot.mutual.get(&b).map_or(0, |theirs| {
						let theirs: HashSet<i64> = theirs.iter().copied().collect();
						theirs.intersection(&own).count()
					});
					builder.edge(a, b, shared as u32)
				});
			}
		}
		if let Some(owner) = builder.owner {
			for friend in &snapshot.friends {
				friendships.push(owner, friend.id, || {
					let count = snapshot.mutual.get(&friend.id).map_or(0, Vec::len);
					let mut edge = builder.edge(owner, friend.id, count as u32);
					edge.color = Some(json!(OWNER_COLOR));
					edge
				});
			}
		}

		Self {
			nodes,
			friendships: friendships.edges,
			gifts: builder.metric_edges(&snapshot.gifts),
			likes: builder.metric_edges(&snapshot.likes),
			comments: builder.metric_edges(&snapshot.comments),
			close_friends: close_friends(snapshot),
		}
	}

	/// Graph data showing the chosen edge layer.
	pub fn layer(&self, layer: EdgeLayer) -> GraphData {
		let edges = match layer {
			EdgeLayer::Friends => &self.friendships,
			EdgeLayer::Gifts => &self.gifts,
			EdgeLayer::Likes => &self.likes,
			EdgeLayer::Comments => &self.comments,
		};
		GraphData {
			nodes: self.nodes.clone(),
			edges: edges.clone(),
		}
	}

	/// Whether a layer has any edges to show.
	pub fn has_layer(&self, layer: EdgeLayer) -> bool {
		match layer {
			EdgeLayer::Friends => !self.friendships.is_empty(),
			EdgeLayer::Gifts => !self.gifts.is_empty(),
			EdgeLayer::Likes => !self.likes.is_empty(),
			EdgeLayer::Comments => !self.comments.is_empty(),
		}
	}
}

/// Friends with the most mutual friends. Ties keep the lower id.
fn close_friends(snapshot: &SocialSnapshot) -> Vec<Friend> {
	let mut ranked: Vec<(i64, usize)> = snapshot
		.mutual
		.iter()
		.map(|(&id, mutuals)| (id, mutuals.len()))
		.collect();
	ranked.sort_by(|a, b| b.1.cmp(&a.1));
	let top: HashSet<i64> = ranked.into_iter().take(CLOSE_FRIENDS).map(|(id, _)| id).collect();
	snapshot
		.friends
		.iter()
		.filter(|f| top.contains(&f.id))
		.cloned()
		.collect()
}

impl SocialGraph {
	/// Node ids in insertion order.
	pub fn node_ids(&self) -> Vec<ItemId> {
		self.nodes.iter().map(|n| n.id.clone()).collect()
	}
}
