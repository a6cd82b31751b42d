//! Interactive network view backed by `vis-network`.
//!
//! Layout, physics and drawing belong to the library. This module:
//! - Hands node/edge records and the options object to the library
//! - Shows the selected node or edge in the page's info panel
//! - Dims every edge outside a double-clicked node's neighbourhood
//! - Fits the view once the layout has had a moment to settle
//!
//! # Example
//!
//! ```ignore
//! use social_graph::{GraphData, NetworkGraph};
//!
//! let data: GraphData = serde_json::from_str(r#"{
//!     "nodes": [{ "id": 1, "title": "Ann" }, { "id": 2, "title": "Bob" }],
//!     "edges": [{ "from": 1, "to": 2, "value": 3 }]
//! }"#)?;
//!
//! view! { <NetworkGraph data=Signal::derive(move || data.clone()) /> }
//! ```

mod component;
mod info_panel;
mod mount;
pub mod options;
mod state;
mod types;
pub mod vis;

pub use component::NetworkGraph;
pub use info_panel::{DomInfoPanel, PanelContent};
pub use mount::{MountedGraph, mount_graph, mount_into, mount_js};
pub use options::{RenderConfig, default_options};
pub use state::{EdgePatch, GraphSession, NetworkBackend, NetworkEvent, PointerSelection, Selection};
pub use types::{EdgeRecord, GraphData, ItemId, NodeRecord};
