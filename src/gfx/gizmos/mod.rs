//! # Manipulation Gizmos
//!
//! Translate, rotate and scale handles drawn over the main scene. Dragging a
//! handle with the mouse writes a single axis of the attached node's
//! position, orientation or scaling vector.
//!
//! ## Architecture
//!
//! Per frame, [`GizmoManager::tick`] runs the pieces in order:
//!
//! 1. [`ScaleSynchronizer`] keeps handles a constant apparent size
//! 2. [`DragController`] advances an active drag, or
//! 3. [`HighlightController`] updates hover feedback from a pick ray
//!
//! Handle meshes are built once by the [`factory`] and tracked by the
//! [`HandleRegistry`]; switching mode only toggles which three are enabled.
//!
//! ## Usage
//!
//! ```no_run
//! use manipulator::prelude::*;
//!
//! let mut gizmo = GizmoManager::new(GizmoConfig::default()).unwrap();
//! let mut camera = OrbitCamera::new(15.0, 0.5, 0.7, Vector3::zero(), (1280.0, 720.0));
//! let light = shared(LightNode::new("sun", Vector3::new(0.0, 4.0, 0.0), -Vector3::unit_y()));
//!
//! gizmo.attach(Some(&light));
//! gizmo.set_mode(ManipulationMode::Rotation).unwrap();
//!
//! gizmo.pointer_moved(640.0, 360.0);
//! gizmo.mouse_down();
//! gizmo.tick(&mut camera, (650.0, 360.0));
//! gizmo.mouse_up(&mut camera);
//! ```

pub mod config;
pub mod drag;
pub mod factory;
pub mod highlight;
pub mod input;
pub mod manager;
pub mod registry;
pub mod scale_sync;


use std::fmt;

use cgmath::Vector3;

// Re-export main types
pub use config::GizmoConfig;
pub use drag::{DragController, DragPhase, DragState};
pub use highlight::HighlightController;
pub use input::GizmoInput;
pub use manager::{GizmoEvent, GizmoManager, ValueChange};
pub use registry::{AxisHandle, HandleId, HandleRegistry};
pub use scale_sync::ScaleSynchronizer;

/// Which transform the visible handles edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ManipulationMode {
    Position,
    Rotation,
    Scaling,
    /// No handles shown
    #[default]
    None,
}

impl ManipulationMode {
    /// The modes that own handles, in registry order
    pub const HANDLED: [ManipulationMode; 3] = [
        ManipulationMode::Position,
        ManipulationMode::Rotation,
        ManipulationMode::Scaling,
    ];

    pub fn index(self) -> Option<usize> {
        match self {
            ManipulationMode::Position => Some(0),
            ManipulationMode::Rotation => Some(1),
            ManipulationMode::Scaling => Some(2),
            ManipulationMode::None => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ManipulationMode::Position => "Position",
            ManipulationMode::Rotation => "Rotation",
            ManipulationMode::Scaling => "Scaling",
            ManipulationMode::None => "None",
        }
    }
}

impl fmt::Display for ManipulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// The other two axes, in X, Y, Z order
    pub fn perpendicular(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Handle colour: X red, Y green, Z blue
    pub fn color(self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }

    pub fn component(self, v: Vector3<f32>) -> f32 {
        v[self.index()]
    }

    pub fn set_component(self, v: &mut Vector3<f32>, value: f32) {
        v[self.index()] = value;
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}
