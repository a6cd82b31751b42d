//! Browser entrypoint: `trunk serve` builds this into the page.

// Dependencies belong to the library; the binary only mounts the app.
#![allow(unused_crate_dependencies)]

use leptos::mount::mount_to_body;
use social_graph::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
