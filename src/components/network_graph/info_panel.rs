//! Info panel updates driven by selection events.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlElement, HtmlImageElement};

use super::options::RenderConfig;
use super::state::{NetworkEvent, Selection};

/// What the panel should show for a selection.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelContent {
	/// Description text.
	pub text: String,
	/// New image source; `None` leaves the image as it is.
	pub image: Option<String>,
	/// Profile link target; `None` hides the link.
	pub link: Option<String>,
}

impl From<&Selection> for PanelContent {
	fn from(selection: &Selection) -> Self {
		let text = selection.description();
		match selection {
			Selection::Node {
				image, profile_url, ..
			} => Self {
				text,
				image: image.clone(),
				link: Some(profile_url.clone()),
			},
			Selection::Edge { .. } => Self {
				text,
				image: None,
				link: None,
			},
		}
	}
}

/// Writes selections into the host page elements named by [`RenderConfig`].
///
/// Elements are looked up on every update; absent ones are skipped.
pub struct DomInfoPanel {
	document: Document,
	info_id: String,
	image_id: String,
	link_id: String,
}

impl DomInfoPanel {
	/// Panel bound to the element ids in `config`.
	pub fn new(document: Document, config: &RenderConfig) -> Self {
		Self {
			document,
			info_id: config.info_panel_id.clone(),
			image_id: config.image_id.clone(),
			link_id: config.link_id.clone(),
		}
	}

	fn element<T: JsCast>(&self, id: &str) -> Option<T> {
		let element = self.document.get_element_by_id(id);
		if element.is_none() {
			debug!("social-graph: #{id} missing, skipping");
		}
		element?.dyn_into().ok()
	}

	/// Applies a session event. Only selections change the panel.
	pub fn handle(&self, event: &NetworkEvent) {
		if let NetworkEvent::Selected(selection) = event {
			self.show(&PanelContent::from(selection));
		}
	}

	/// Renders `content` into the page.
	pub fn show(&self, content: &PanelContent) {
		if let Some(info) = self.element::<HtmlElement>(&self.info_id) {
			info.set_inner_text(&content.text);
		}
		if let Some(src) = &content.image {
			if let Some(image) = self.element::<HtmlImageElement>(&self.image_id) {
				image.set_src(src);
			}
		}
		if let Some(link) = self.element::<HtmlAnchorElement>(&self.link_id) {
			match &content.link {
				Some(href) => {
					link.set_href(href);
					let _ = link.style().set_property("display", "block");
				}
				None => {
					link.set_href("");
					let _ = link.style().set_property("display", "none");
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::ItemId;

	#[test]
	fn node_selection_shows_image_and_link() {
		let selection = Selection::Node {
			id: ItemId::Int(7),
			title: "Ann Lee".into(),
			image: Some("a.jpg".into()),
			profile_url: "https://vk.com/id7".into(),
		};
		let content = PanelContent::from(&selection);
		assert_eq!(content.text, "Selected node\nid: 7\nAnn Lee");
		assert_eq!(content.image.as_deref(), Some("a.jpg"));
		assert_eq!(content.link.as_deref(), Some("https://vk.com/id7"));
	}

	#[test]
	fn edge_selection_hides_link() {
		let selection = Selection::Edge {
			id: "edge-0".into(),
			title: "from: A\nto:   B".into(),
			weight: 4.0,
		};
		let content = PanelContent::from(&selection);
		assert_eq!(content.text, "Selected edge\nfrom: A\nto:   B\nWeight: 4");
		assert_eq!(content.image, None);
		assert_eq!(content.link, None);
	}
}
