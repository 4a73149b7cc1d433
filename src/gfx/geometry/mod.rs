//! # Procedural Geometry Generation
//!
//! This module generates the primitive shapes the gizmo handles are built
//! from, so the overlay needs no external model files.
//!
//! ## Supported Primitives
//!
//! - **Cylinder**: shaft along +Y, optionally tapered into a cone
//! - **Cube**: handle head for scaling arrows
//! - **Torus**: ring around +Y for rotation handles
//!
//! ## Usage
//!
//! ```rust
//! use manipulator::gfx::geometry::{generate_cube, generate_cylinder, generate_torus};
//!
//! // An 8 unit shaft with a 0.4 unit diameter
//! let shaft = generate_cylinder(8.0, 0.4, 0.4, 8);
//!
//! // A cone: zero top diameter
//! let arrow = generate_cylinder(2.0, 0.0, 3.0, 8);
//!
//! // A ring of diameter 20
//! let ring = generate_torus(20.0, 0.75, 35);
//! # let _ = (shaft, arrow, ring, generate_cube(2.0));
//! ```

pub mod primitives;

pub use primitives::*;

use cgmath::Vector3;

use crate::gfx::picking::AABB;

/// Generated geometry data, ready for picking and GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space bounding box of every vertex
    pub fn bounds(&self) -> AABB {
        AABB::from_vertices(&self.vertices)
    }

    /// Iterate triangles as local-space corner triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            let corner = |i: u32| Vector3::from(self.vertices[i as usize]);
            [corner(tri[0]), corner(tri[1]), corner(tri[2])]
        })
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
