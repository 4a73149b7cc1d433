//! Handle geometry construction
//!
//! Every handle is authored along +Y and rotated onto its axis: X turns
//! -90 degrees about Z, Z turns +90 degrees about X, Y stays as built.
//!
//! | Mode     | Root (shared scale)      | Child (fixed scale)          |
//! |----------|--------------------------|------------------------------|
//! | Position | shaft cylinder           | cone head, scaled 1.3        |
//! | Rotation | torus ring               | -                            |
//! | Scaling  | shaft cylinder           | cube head                    |

use std::f32::consts::FRAC_PI_2;

use cgmath::Vector3;

use super::{config::GizmoConfig, Axis, ManipulationMode};
use crate::gfx::{
    geometry::{generate_cube, generate_cylinder, generate_torus},
    resources::material::{EmissiveMaterial, MaterialId},
    scene::overlay::{MeshId, OverlayMesh, OverlayScene, ScaleSource},
};

const SHAFT_LENGTH: f32 = 8.0;
const SHAFT_DIAMETER: f32 = 0.4;
const CONE_HEIGHT: f32 = 2.0;
const CONE_DIAMETER: f32 = 3.0;
const CONE_SCALE: f32 = 1.3;
const RING_DIAMETER: f32 = 20.0;
const RING_THICKNESS: f32 = 0.75;
const CUBE_SIZE: f32 = 2.0;

/// Meshes making up one handle
#[derive(Debug, Clone, PartialEq)]
pub struct HandleParts {
    /// Positioned every frame; children follow it
    pub root: MeshId,
    /// Root first, then children
    pub parts: Vec<MeshId>,
    /// Shared by every part so hover feedback colours the whole handle
    pub material: MaterialId,
}

/// Fixed Euler rotation turning +Y onto `axis`
pub fn axis_rotation(axis: Axis) -> Vector3<f32> {
    match axis {
        Axis::X => Vector3::new(0.0, 0.0, -FRAC_PI_2),
        Axis::Y => Vector3::new(0.0, 0.0, 0.0),
        Axis::Z => Vector3::new(FRAC_PI_2, 0.0, 0.0),
    }
}

/// Builds the handle for `mode` along `axis` into `scene`
///
/// Returns `None` for [`ManipulationMode::None`], which has no handles.
pub fn build_handle(
    scene: &mut OverlayScene,
    mode: ManipulationMode,
    axis: Axis,
    config: &GizmoConfig,
) -> Option<HandleParts> {
    if mode == ManipulationMode::None {
        return None;
    }

    let id = format!("{}_{}", mode.label().to_lowercase(), axis);
    let color = axis.color();
    let material = scene
        .materials_mut()
        .add_material(EmissiveMaterial::new(&id, color));
    let segments = config.tessellation;

    let root_geometry = match mode {
        ManipulationMode::Rotation => generate_torus(RING_DIAMETER, RING_THICKNESS, segments),
        _ => generate_cylinder(SHAFT_LENGTH, SHAFT_DIAMETER, SHAFT_DIAMETER, segments),
    };
    let root = scene.add_mesh(
        OverlayMesh::new(&id, root_geometry, material)
            .with_rotation(axis_rotation(axis))
            .with_scale(ScaleSource::Shared),
    );

    let head = match mode {
        ManipulationMode::Position => Some((
            generate_cylinder(CONE_HEIGHT, 0.0, CONE_DIAMETER, segments),
            CONE_SCALE,
        )),
        ManipulationMode::Scaling => Some((generate_cube(CUBE_SIZE), 1.0)),
        _ => None,
    };

    let mut parts = vec![root];
    if let Some((geometry, scale)) = head {
        parts.push(
            scene.add_mesh(
                OverlayMesh::new(&format!("{id}_head"), geometry, material)
                    .with_position(Vector3::new(0.0, config.head_offset, 0.0))
                    .with_scale(ScaleSource::Fixed(scale))
                    .with_parent(root),
            ),
        );
    }

    Some(HandleParts {
        root,
        parts,
        material,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Zero};

    fn tip_direction(scene: &OverlayScene, parts: &HandleParts) -> Vector3<f32> {
        let world = scene.world_matrix(parts.root, Vector3::new(1.0, 1.0, 1.0));
        (world * Vector3::unit_y().extend(0.0)).truncate()
    }

    #[test]
    fn test_handles_point_along_their_axis() {
        let config = GizmoConfig::default();
        for axis in Axis::ALL {
            let mut scene = OverlayScene::new();
            let parts =
                build_handle(&mut scene, ManipulationMode::Position, axis, &config).unwrap();

            let direction = tip_direction(&scene, &parts);
            assert!(
                (direction - axis.unit()).magnitude() < 1e-6,
                "{axis} handle points {direction:?}"
            );
        }
    }

    #[test]
    fn test_none_mode_builds_nothing() {
        let mut scene = OverlayScene::new();
        let config = GizmoConfig::default();
        let parts = build_handle(&mut scene, ManipulationMode::None, Axis::X, &config);

        assert!(parts.is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_part_counts_per_mode() {
        let config = GizmoConfig::default();
        let mut scene = OverlayScene::new();

        let mut build = |mode| build_handle(&mut scene, mode, Axis::X, &config).unwrap();
        let position = build(ManipulationMode::Position);
        let rotation = build(ManipulationMode::Rotation);
        let scaling = build(ManipulationMode::Scaling);

        assert_eq!(position.parts.len(), 2);
        assert_eq!(rotation.parts.len(), 1);
        assert_eq!(scaling.parts.len(), 2);
        assert_eq!(scene.len(), 5);
        assert_eq!(scene.materials().len(), 3);
    }

    #[test]
    fn test_parts_share_the_axis_material() {
        let config = GizmoConfig::default();
        let mut scene = OverlayScene::new();
        let parts = build_handle(&mut scene, ManipulationMode::Scaling, Axis::Z, &config).unwrap();

        for part in &parts.parts {
            assert_eq!(scene.mesh(*part).map(|m| m.material), Some(parts.material));
        }
        assert_eq!(scene.materials().emissive_of(parts.material), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_head_sits_past_the_shaft() {
        let config = GizmoConfig::default();
        let mut scene = OverlayScene::new();
        let parts = build_handle(&mut scene, ManipulationMode::Position, Axis::Y, &config).unwrap();

        let world = scene.world_matrix(parts.parts[1], Vector3::new(1.0, 1.0, 1.0));
        let head_centre = (world * Vector3::zero().extend(1.0)).truncate();
        assert!((head_centre - Vector3::new(0.0, 5.0, 0.0)).magnitude() < 1e-6);
    }
}
