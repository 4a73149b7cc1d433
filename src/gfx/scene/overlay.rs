//! # Overlay Scene
//!
//! A private scene holding only gizmo geometry. It shares the host camera
//! but never the host scene graph, and it is drawn after the main pass
//! without clearing the frame so handles composite on top.
//!
//! Meshes form a small hierarchy (a handle root plus child parts such as an
//! arrow head). A mesh's scale either follows the shared per-frame gizmo
//! scale or is a fixed local factor, so one write to the shared value
//! rescales every handle at once.

use cgmath::{Matrix4, Rad, Vector3, Zero};

use crate::gfx::{
    geometry::GeometryData,
    picking::{intersect_triangle, Ray, AABB},
    resources::material::{MaterialId, MaterialManager},
};

/// Index of a mesh inside an [`OverlayScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

/// Where a mesh's local scale comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleSource {
    /// The gizmo scale written once per frame
    Shared,
    /// A fixed uniform factor relative to the parent
    Fixed(f32),
}

/// One renderable, pickable part of a handle
#[derive(Debug, Clone)]
pub struct OverlayMesh {
    pub name: String,
    pub geometry: GeometryData,
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vector3<f32>,
    pub scale: ScaleSource,
    pub parent: Option<MeshId>,
    pub material: MaterialId,
    pub enabled: bool,
    pub pickable: bool,
    local_bounds: AABB,
}

impl OverlayMesh {
    pub fn new(name: &str, geometry: GeometryData, material: MaterialId) -> Self {
        let local_bounds = geometry.bounds();
        Self {
            name: name.to_string(),
            geometry,
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: ScaleSource::Fixed(1.0),
            parent: None,
            material,
            enabled: true,
            pickable: true,
            local_bounds,
        }
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: ScaleSource) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_parent(mut self, parent: MeshId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn local_bounds(&self) -> AABB {
        self.local_bounds
    }

    /// T * R * S relative to the parent
    pub fn local_matrix(&self, shared_scale: Vector3<f32>) -> Matrix4<f32> {
        let scale = match self.scale {
            ScaleSource::Shared => shared_scale,
            ScaleSource::Fixed(factor) => Vector3::new(factor, factor, factor),
        };
        let rotation = Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x));

        Matrix4::from_translation(self.position)
            * rotation
            * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
    }
}

/// Closest overlay hit along a pick ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub mesh: MeshId,
    pub distance: f32,
    pub point: Vector3<f32>,
}

/// Container for every gizmo mesh and its materials
#[derive(Debug, Default)]
pub struct OverlayScene {
    meshes: Vec<OverlayMesh>,
    materials: MaterialManager,
}

impl OverlayScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay passes composite over the main scene
    pub fn auto_clear(&self) -> bool {
        false
    }

    pub fn add_mesh(&mut self, mesh: OverlayMesh) -> MeshId {
        debug_assert!(
            mesh.parent.map_or(true, |p| p.0 < self.meshes.len()),
            "parent must be added before its children"
        );
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&OverlayMesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut OverlayMesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &OverlayMesh)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn materials(&self) -> &MaterialManager {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialManager {
        &mut self.materials
    }

    pub fn set_enabled(&mut self, id: MeshId, enabled: bool) {
        if let Some(mesh) = self.meshes.get_mut(id.0) {
            mesh.enabled = enabled;
        }
    }

    pub fn set_position(&mut self, id: MeshId, position: Vector3<f32>) {
        if let Some(mesh) = self.meshes.get_mut(id.0) {
            mesh.position = position;
        }
    }

    /// Enabled and every ancestor enabled
    pub fn is_effectively_enabled(&self, id: MeshId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            match self.meshes.get(id.0) {
                Some(mesh) if mesh.enabled => current = mesh.parent,
                _ => return false,
            }
        }
        true
    }

    /// parent world * T * R * S
    pub fn world_matrix(&self, id: MeshId, shared_scale: Vector3<f32>) -> Matrix4<f32> {
        let Some(mesh) = self.meshes.get(id.0) else {
            return Matrix4::from_scale(1.0);
        };
        let local = mesh.local_matrix(shared_scale);
        match mesh.parent {
            Some(parent) => self.world_matrix(parent, shared_scale) * local,
            None => local,
        }
    }

    /// Closest hit among enabled, pickable meshes
    pub fn pick(&self, ray: &Ray, shared_scale: Vector3<f32>) -> Option<PickHit> {
        let mut closest: Option<PickHit> = None;

        for (id, mesh) in self.meshes() {
            if !mesh.pickable || !self.is_effectively_enabled(id) {
                continue;
            }

            let world = self.world_matrix(id, shared_scale);
            let Some(box_distance) = mesh.local_bounds.transform(&world).intersect_ray(ray) else {
                continue;
            };
            if closest.is_some_and(|hit| box_distance > hit.distance) {
                continue;
            }

            for [a, b, c] in mesh.geometry.triangles() {
                let to_world = |v: Vector3<f32>| (world * v.extend(1.0)).truncate();
                let Some(distance) = intersect_triangle(ray, to_world(a), to_world(b), to_world(c))
                else {
                    continue;
                };
                if closest.map_or(true, |hit| distance < hit.distance) {
                    closest = Some(PickHit {
                        mesh: id,
                        distance,
                        point: ray.point_at(distance),
                    });
                }
            }
        }

        closest
    }
}
