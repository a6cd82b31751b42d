//! UI components of the page.

pub mod fullscreen;
pub mod network_graph;
