//! # Manipulator Prelude
//!
//! Commonly used types, re-exported so a host editor can write:
//!
//! ```rust
//! use manipulator::prelude::*;
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use manipulator::prelude::*;
//!
//! let mut gizmo = GizmoManager::default();
//! let mut camera = OrbitCamera::new(15.0, 0.5, 0.7, Vector3::zero(), (1280.0, 720.0));
//! let node = shared(MeshNode::new("crate"));
//!
//! gizmo.attach(Some(&node));
//! gizmo.set_mode(ManipulationMode::Position).unwrap();
//! gizmo.subscribe(|event| {
//!     if let GizmoEvent::TargetChanged { node, .. } = event {
//!         println!("{} moved", node.borrow().name());
//!     }
//! });
//!
//! // Once per rendered frame, after the main scene pass:
//! gizmo.tick(&mut camera, (640.0, 360.0));
//! ```

// Re-export the gizmo facade and its vocabulary
pub use crate::error::GizmoError;
pub use crate::gfx::gizmos::{
    Axis, DragState, GizmoConfig, GizmoEvent, GizmoInput, GizmoManager, HandleId,
    ManipulationMode, ValueChange,
};

// Re-export collaborator types
pub use crate::gfx::camera::{CameraController, OrbitCamera, ViewCamera};
pub use crate::gfx::rendering::OverlayRenderer;
pub use crate::gfx::scene::node::{
    shared, CameraNode, EmitterNode, HasOrientation, LightNode, MeshNode, NodeKind, SharedNode,
    SoundNode, TransformChannel, TransformGroup, TransformTarget,
};

// Re-export UI panel
pub use crate::ui::gizmo_mode_panel;

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
