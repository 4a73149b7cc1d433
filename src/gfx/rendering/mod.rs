//! Overlay rendering
//!
//! GPU side of the gizmo: one unlit pipeline drawn after the host's main pass.

pub mod overlay_renderer;

pub use overlay_renderer::{build_overlay_vertices, OverlayRenderer};
