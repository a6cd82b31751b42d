//! Container height bookkeeping around fullscreen mode.

use log::{debug, warn};

use crate::error::GraphError;

/// Height the container takes while fullscreen.
pub const FULLSCREEN_HEIGHT: &str = "100%";

/// Fullscreen request methods, standard first, then vendor-prefixed.
pub const REQUEST_METHODS: [&str; 4] = [
	"requestFullscreen",
	"webkitRequestFullscreen",
	"mozRequestFullScreen",
	"msRequestFullscreen",
];

/// First request method the element exposes.
pub fn pick_request_method(has: impl Fn(&str) -> bool) -> Option<&'static str> {
	REQUEST_METHODS.into_iter().find(|name| has(name))
}

/// Read/write access to the container's inline height.
pub trait ContainerLayout {
	/// Current inline height, empty when unset.
	fn height(&self) -> String;
	/// Replaces the inline height.
	fn set_height(&self, height: &str);
}

/// Owns the height captured on entering fullscreen.
#[derive(Clone, Debug, Default)]
pub struct FullscreenController {
	previous_height: Option<String>,
}

impl FullscreenController {
	/// Whether a height is waiting to be restored.
	pub fn is_active(&self) -> bool {
		self.previous_height.is_some()
	}

	/// Height that will be restored on exit.
	pub fn previous_height(&self) -> Option<&str> {
		self.previous_height.as_deref()
	}

	/// Stretches the container and runs `request`.
	///
	/// A height captured by an earlier, still active call is kept. If the
	/// request fails and this call did the capture, the container is restored
	/// before returning the error; an earlier fullscreen is left alone.
	pub fn enter<L: ContainerLayout>(
		&mut self,
		layout: &L,
		request: impl FnOnce() -> Result<(), GraphError>,
	) -> Result<(), GraphError> {
		let captured = self.previous_height.is_none();
		if captured {
			self.previous_height = Some(layout.height());
		}
		layout.set_height(FULLSCREEN_HEIGHT);

		if let Err(e) = request() {
			warn!("social-graph: fullscreen request failed: {e}");
			if captured {
				self.restore(layout);
			}
			return Err(e);
		}
		Ok(())
	}

	/// Reacts to a fullscreen change or error notification. Returns whether the
	/// height was restored.
	pub fn handle_change<L: ContainerLayout>(&mut self, layout: &L, is_fullscreen: bool) -> bool {
		if is_fullscreen {
			return false;
		}
		self.restore(layout)
	}

	fn restore<L: ContainerLayout>(&mut self, layout: &L) -> bool {
		match self.previous_height.take() {
			Some(height) => {
				debug!("social-graph: restoring container height {height:?}");
				layout.set_height(&height);
				true
			}
			None => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;

	struct FakeLayout(RefCell<String>);

	impl ContainerLayout for FakeLayout {
		fn height(&self) -> String {
			self.0.borrow().clone()
		}

		fn set_height(&self, height: &str) {
			*self.0.borrow_mut() = height.to_string();
		}
	}

	fn layout(height: &str) -> FakeLayout {
		FakeLayout(RefCell::new(height.to_string()))
	}

	#[test]
	fn exit_restores_exact_previous_height() {
		let layout = layout("640px");
		let mut controller = FullscreenController::default();

		controller.enter(&layout, || Ok(())).unwrap();
		assert_eq!(layout.height(), FULLSCREEN_HEIGHT);
		assert!(controller.is_active());

		assert!(!controller.handle_change(&layout, true));
		assert_eq!(layout.height(), FULLSCREEN_HEIGHT);

		assert!(controller.handle_change(&layout, false));
		assert_eq!(layout.height(), "640px");
		assert!(!controller.is_active());
	}

	#[test]
	fn unset_height_is_restored_as_unset() {
		let layout = layout("");
		let mut controller = FullscreenController::default();
		controller.enter(&layout, || Ok(())).unwrap();
		controller.handle_change(&layout, false);
		assert_eq!(layout.height(), "");
	}

	#[test]
	fn reentering_keeps_first_captured_height() {
		let layout = layout("500px");
		let mut controller = FullscreenController::default();
		controller.enter(&layout, || Ok(())).unwrap();
		controller.enter(&layout, || Ok(())).unwrap();
		assert_eq!(controller.previous_height(), Some("500px"));

		controller.handle_change(&layout, false);
		assert_eq!(layout.height(), "500px");
	}

	#[test]
	fn failed_request_restores_immediately() {
		let layout = layout("500px");
		let mut controller = FullscreenController::default();
		let result = controller.enter(&layout, || Err(GraphError::FullscreenUnsupported));
		assert!(matches!(result, Err(GraphError::FullscreenUnsupported)));
		assert_eq!(layout.height(), "500px");
		assert!(!controller.is_active());
	}

	#[test]
	fn failed_reentry_keeps_active_fullscreen() {
		let layout = layout("500px");
		let mut controller = FullscreenController::default();
		controller.enter(&layout, || Ok(())).unwrap();

		let result = controller.enter(&layout, || Err(GraphError::Library("denied".into())));
		assert!(result.is_err());
		assert_eq!(layout.height(), FULLSCREEN_HEIGHT);
		assert_eq!(controller.previous_height(), Some("500px"));

		controller.handle_change(&layout, false);
		assert_eq!(layout.height(), "500px");
	}

	#[test]
	fn late_rejection_restores_unless_still_fullscreen() {
		let layout = layout("500px");
		let mut controller = FullscreenController::default();
		controller.enter(&layout, || Ok(())).unwrap();

		// The document is still fullscreen from an earlier request.
		assert!(!controller.handle_change(&layout, true));
		assert_eq!(layout.height(), FULLSCREEN_HEIGHT);

		assert!(controller.handle_change(&layout, false));
		assert_eq!(layout.height(), "500px");
	}

	#[test]
	fn change_without_enter_is_ignored() {
		let layout = layout("300px");
		let mut controller = FullscreenController::default();
		assert!(!controller.handle_change(&layout, false));
		assert_eq!(layout.height(), "300px");
	}

	#[test]
	fn request_method_prefers_standard_api() {
		assert_eq!(pick_request_method(|_| true), Some("requestFullscreen"));
		assert_eq!(
			pick_request_method(|name| name.starts_with("ms")),
			Some("msRequestFullscreen")
		);
		assert_eq!(
			pick_request_method(|name| name != "requestFullscreen"),
			Some("webkitRequestFullscreen")
		);
		assert_eq!(pick_request_method(|_| false), None);
	}
}
