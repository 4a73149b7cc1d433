//! # Graphics Module
//!
//! Everything the gizmo needs to live in a host's 3D view: the camera
//! surface it borrows, the overlay scene and its geometry, picking, the
//! handle logic itself, and the overlay render pass.
//!
//! ## Architecture Overview
//!
//! - **Camera** ([`camera`]) - The [`ViewCamera`](camera::ViewCamera) seam plus an orbit camera
//! - **Geometry** ([`geometry`]) - Cube, cylinder and torus generators for handle parts
//! - **Gizmos** ([`gizmos`]) - Handle registry, hover, dragging and the host facade
//! - **Picking** ([`picking`]) - Rays, planes and triangle tests
//! - **Rendering** ([`rendering`]) - The overlay pass drawn after the main scene
//! - **Resources** ([`resources`]) - Emissive handle materials
//! - **Scene** ([`scene`]) - Host node adapters and the private overlay scene
//!
//! ## Usage
//!
//! ```no_run
//! use manipulator::gfx::{gizmos::GizmoManager, OrbitCamera};
//!
//! let target = cgmath::Vector3::new(0.0, 0.0, 0.0);
//! let mut camera = OrbitCamera::new(15.0, 0.5, 0.7, target, (800.0, 600.0));
//! let mut gizmo = GizmoManager::default();
//! gizmo.tick(&mut camera, (400.0, 300.0));
//! ```

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::OrbitCamera;
pub use rendering::OverlayRenderer;
