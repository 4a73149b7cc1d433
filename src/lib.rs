// src/lib.rs
//! Manipulator
//!
//! On-screen manipulation gizmos for 3D scene editors: translate, rotate and
//! scale handles that stay a constant apparent size, are hit-tested with ray
//! casting, and turn mouse drags into single-axis edits of the attached node.

pub mod error;
pub mod gfx;
pub mod prelude;
pub mod ui;

// Re-export main types for convenience
pub use error::{GizmoError, Result};
pub use gfx::gizmos::{Axis, GizmoConfig, GizmoEvent, GizmoManager, ManipulationMode};
