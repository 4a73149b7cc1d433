//! # Scene Module
//!
//! The two scenes the gizmo deals with: the host's nodes it manipulates,
//! seen only through [`TransformTarget`], and the private overlay scene
//! holding the handle meshes.
//!
//! ## Key Components
//!
//! - [`TransformTarget`] - transform vectors a host node exposes
//! - [`SharedNode`] - how the host hands nodes to the gizmo
//! - [`OverlayScene`] - handle meshes, their hierarchy and materials
//! - [`GizmoVertex`] - GPU vertex format for the overlay pass

pub mod node;
pub mod overlay;
pub mod vertex;

// Re-export main types
pub use node::{
    shared, CameraNode, EmitterNode, EmitterSource, HasOrientation, LightNode, MeshNode,
    NodeKind, SharedNode, SoundNode, TransformChannel, TransformGroup, TransformTarget,
};
pub use overlay::{MeshId, OverlayMesh, OverlayScene, PickHit, ScaleSource};
pub use vertex::GizmoVertex;
