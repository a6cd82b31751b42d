//! Render configuration and the default network options.
//!
//! Two layers of configuration exist:
//!
//! - The **options object** is passed verbatim to the network library. When
//!   the caller supplies none, [`default_options`] is used instead. The crate
//!   never merges or validates it.
//! - [`RenderConfig`] covers what this crate itself needs: the ids of the host
//!   page elements, the profile URL template, the dimmed edge color and the
//!   timing of the initial fit animation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Color applied to edges not incident to an isolated node.
pub const DIMMED_EDGE_COLOR: &str = "rgba(200,200,200,0.5)";

/// Physics, interaction and style defaults used when the caller passes no
/// options: barnes-hut layout with strong central gravity and a stabilization
/// cap of 1000 iterations.
pub fn default_options() -> Value {
	json!({
		"autoResize": true,
		"configure": { "enabled": false },
		"edges": {
			"color": { "color": "#007BFF", "highlight": "#000000", "opacity": 0.7 },
			"smooth": { "enabled": true, "type": "continuous" },
			"shadow": { "enabled": true, "size": 5 }
		},
		"nodes": {
			"font": { "size": 20, "strokeWidth": 3 },
			"borderWidthSelected": 15,
			"labelHighlightBold": true,
			"highlight": { "border": "#000000" },
			"shapeProperties": { "interpolation": false }
		},
		"interaction": {
			"freezeForStabilization": true,
			"dragNodes": true,
			"hideEdgesOnDrag": false,
			"hideNodesOnDrag": false
		},
		"physics": {
			"barnesHut": {
				"avoidOverlap": 0.1,
				"centralGravity": 1.5,
				"damping": 0.05,
				"gravitationalConstant": -100000,
				"springConstant": 0.01,
				"springLength": 600
			},
			"enabled": true,
			"stabilization": {
				"enabled": false,
				"fit": true,
				"iterations": 1000,
				"onlyDynamicEdges": false,
				"updateInterval": 100
			}
		},
		"layout": { "improvedLayout": true, "randomSeed": 10 }
	})
}

/// Caller options win as a whole; `None` and JSON `null` fall back to defaults.
pub fn resolve_options(options: Option<Value>) -> Value {
	match options {
		Some(Value::Null) | None => default_options(),
		Some(options) => options,
	}
}

/// Settings for the host page and interaction behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
	/// Element the network is mounted into; fullscreen resizes it.
	pub container_id: String,
	/// Element receiving the selection description.
	pub info_panel_id: String,
	/// `<img>` showing the selected node's image.
	pub image_id: String,
	/// `<a>` pointing at the selected node's profile.
	pub link_id: String,
	/// Profile URL; `{id}` is replaced by the node id.
	pub profile_url: String,
	/// Color applied to edges outside the isolated neighbourhood.
	pub dimmed_edge_color: String,
	/// Delay before the initial fit, letting physics settle.
	pub fit_delay_ms: u32,
	/// Duration of the fit animation.
	pub fit_duration_ms: u32,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			container_id: "mynetwork".into(),
			info_panel_id: "networkInfo".into(),
			image_id: "nodeImage".into(),
			link_id: "nodeHref".into(),
			profile_url: "https://vk.com/id{id}".into(),
			dimmed_edge_color: DIMMED_EDGE_COLOR.into(),
			fit_delay_ms: 1000,
			fit_duration_ms: 2000,
		}
	}
}

impl RenderConfig {
	/// Profile URL for a node id.
	pub fn profile_url_for(&self, id: &impl std::fmt::Display) -> String {
		self.profile_url.replace("{id}", &id.to_string())
	}

	/// Initial fit delay as a timer argument. Delays past the timer range
	/// saturate instead of wrapping to an immediate fit.
	pub fn fit_timeout(&self) -> i32 {
		i32::try_from(self.fit_delay_ms).unwrap_or(i32::MAX)
	}

	/// Options for the library's `fit` call.
	pub fn fit_options(&self) -> FitOptions {
		FitOptions {
			animation: FitAnimation {
				offset: Offset { x: 0.0, y: 0.0 },
				duration: self.fit_duration_ms,
			},
		}
	}
}

/// Argument of `Network.fit`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FitOptions {
	/// Animation used while moving the view.
	pub animation: FitAnimation,
}

/// Smooth view transition settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FitAnimation {
	/// Screen offset of the fitted view.
	pub offset: Offset,
	/// Duration in milliseconds.
	pub duration: u32,
}

/// Screen-space offset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Offset {
	/// Horizontal offset in pixels.
	pub x: f64,
	/// Vertical offset in pixels.
	pub y: f64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_apply_only_when_options_are_missing() {
		assert_eq!(resolve_options(None), default_options());
		assert_eq!(resolve_options(Some(Value::Null)), default_options());

		let custom = json!({ "physics": { "enabled": false } });
		assert_eq!(resolve_options(Some(custom.clone())), custom);
	}

	#[test]
	fn default_physics_is_barnes_hut() {
		let options = default_options();
		let barnes_hut = &options["physics"]["barnesHut"];
		assert_eq!(barnes_hut["centralGravity"], json!(1.5));
		assert_eq!(barnes_hut["springConstant"], json!(0.01));
		assert_eq!(options["physics"]["stabilization"]["iterations"], json!(1000));
	}

	#[test]
	fn partial_config_keeps_remaining_defaults() {
		let config: RenderConfig =
			serde_json::from_value(json!({ "containerId": "graph", "fitDelayMs": 0 })).unwrap();
		assert_eq!(config.container_id, "graph");
		assert_eq!(config.fit_delay_ms, 0);
		assert_eq!(config.info_panel_id, "networkInfo");
		assert_eq!(config.fit_duration_ms, 2000);
	}

	#[test]
	fn oversized_fit_delay_saturates() {
		let mut config = RenderConfig::default();
		assert_eq!(config.fit_timeout(), 1000);
		config.fit_delay_ms = u32::MAX;
		assert_eq!(config.fit_timeout(), i32::MAX);
	}

	#[test]
	fn profile_url_is_templated_with_the_id() {
		let config = RenderConfig::default();
		assert_eq!(config.profile_url_for(&17), "https://vk.com/id17");
	}

	#[test]
	fn fit_options_match_library_shape() {
		let value = serde_json::to_value(RenderConfig::default().fit_options()).unwrap();
		assert_eq!(
			value,
			json!({ "animation": { "offset": { "x": 0.0, "y": 0.0 }, "duration": 2000 } })
		);
	}
}
