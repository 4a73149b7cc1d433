//! Error types for the gizmo subsystem
//!
//! Per-frame math failures (a pick ray parallel to the picking plane, a
//! target without a readable position) are absorbed where they happen and
//! never show up here. Only host-facing calls return these errors.

use thiserror::Error;

use crate::gfx::gizmos::ManipulationMode;

/// Result type for gizmo operations
pub type Result<T> = std::result::Result<T, GizmoError>;

/// Errors surfaced to the host application
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GizmoError {
    /// The attached node has no vector for the requested mode
    #[error("Node '{node}' does not support {mode:?} manipulation")]
    ModeUnsupported {
        mode: ManipulationMode,
        node: String,
    },

    /// Mode changes are refused while a handle is being dragged
    #[error("Cannot change manipulation mode while a drag is in progress")]
    DragInProgress,

    /// A configuration value is out of range
    #[error("Invalid gizmo configuration: {0}")]
    InvalidConfig(String),

    /// Overlay render resources could not be (re)created
    #[error("Overlay render failed: {0}")]
    Render(String),
}
