//! Button that shows the graph fullscreen.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::MouseEvent;

use super::dom::FullscreenToggle;

/// Opens `target_id` fullscreen and stretches `container_id` while it lasts.
#[component]
pub fn FullscreenButton(
	#[prop(into)] target_id: String,
	#[prop(into)] container_id: String,
	#[prop(default = "Fullscreen")] label: &'static str,
) -> impl IntoView {
	let toggle: Rc<RefCell<Option<FullscreenToggle>>> = Rc::new(RefCell::new(None));

	let toggle_init = toggle.clone();
	Effect::new(move |_| {
		if toggle_init.borrow().is_some() {
			return;
		}
		match FullscreenToggle::install(&container_id) {
			Ok(t) => *toggle_init.borrow_mut() = Some(t),
			Err(e) => warn!("social-graph: fullscreen unavailable: {e}"),
		}
	});

	let on_click = move |_: MouseEvent| {
		if let Some(ref t) = *toggle.borrow() {
			if let Err(e) = t.open(&target_id) {
				warn!("social-graph: {e}");
			}
		}
	};

	view! {
		<button class="fullscreen-button" type="button" on:click=on_click>
			{label}
		</button>
	}
}
