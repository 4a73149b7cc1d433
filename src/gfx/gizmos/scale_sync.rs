//! Constant apparent size
//!
//! The gizmo's world size grows linearly with camera distance so it covers
//! roughly the same screen angle at any zoom. One shared scale vector is
//! written per frame and every handle root reads it.

use cgmath::{InnerSpace, Vector3};

use super::{config::GizmoConfig, registry::HandleRegistry, ManipulationMode};
use crate::gfx::scene::overlay::OverlayScene;

#[derive(Debug, Clone)]
pub struct ScaleSynchronizer {
    shared_scale: Vector3<f32>,
    distance_factor: f32,
    scale_divisor: f32,
    position_offset_factor: f32,
}

impl ScaleSynchronizer {
    pub fn new(config: &GizmoConfig) -> Self {
        Self {
            shared_scale: Vector3::new(1.0, 1.0, 1.0),
            distance_factor: config.distance_factor,
            scale_divisor: config.scale_divisor,
            position_offset_factor: config.position_offset_factor,
        }
    }

    /// The value every [`ScaleSource::Shared`](crate::gfx::scene::ScaleSource) mesh reads
    pub fn shared_scale(&self) -> Vector3<f32> {
        self.shared_scale
    }

    /// Gizmo world size for a camera at `camera` looking at `target`
    pub fn gizmo_distance(&self, camera: Vector3<f32>, target: Vector3<f32>) -> f32 {
        (camera - target).magnitude() * self.distance_factor
    }

    /// Rescales and re-places every handle around `target`
    ///
    /// Position arrows are pushed out along their own axis so the three do
    /// not overlap at the origin; rotation and scaling handles are centred
    /// on the target. Returns the gizmo distance used.
    pub fn sync(
        &mut self,
        scene: &mut OverlayScene,
        registry: &HandleRegistry,
        camera: Vector3<f32>,
        target: Vector3<f32>,
    ) -> f32 {
        let distance = self.gizmo_distance(camera, target);
        let scale = distance / self.scale_divisor;
        self.shared_scale = Vector3::new(scale, scale, scale);

        for handle in registry.handles() {
            let position = match handle.id.mode {
                ManipulationMode::Position => {
                    target + handle.id.axis.unit() * (distance * self.position_offset_factor)
                }
                _ => target,
            };
            scene.set_position(handle.root(), position);
        }

        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::gizmos::{registry::HandleId, Axis};
    use cgmath::Zero;

    fn setup() -> (OverlayScene, HandleRegistry, ScaleSynchronizer) {
        let config = GizmoConfig::default();
        let mut scene = OverlayScene::new();
        let registry = HandleRegistry::build(&mut scene, &config);
        (scene, registry, ScaleSynchronizer::new(&config))
    }

    fn root_position(
        scene: &OverlayScene,
        registry: &HandleRegistry,
        id: HandleId,
    ) -> Vector3<f32> {
        registry
            .handle(id)
            .and_then(|h| scene.mesh(h.root()))
            .map(|m| m.position)
            .unwrap()
    }

    #[test]
    fn test_shared_scale_follows_distance() {
        let (mut scene, registry, mut sync) = setup();
        let camera = Vector3::new(0.0, 0.0, 100.0);
        let distance = sync.sync(&mut scene, &registry, camera, Vector3::zero());

        assert!((distance - 3.0).abs() < 1e-5);
        assert!((sync.shared_scale().x - 1.0).abs() < 1e-5);
        assert_eq!(sync.shared_scale().x, sync.shared_scale().z);
    }

    #[test]
    fn test_position_handles_are_offset_along_their_axis() {
        let (mut scene, registry, mut sync) = setup();
        let target = Vector3::new(1.0, 2.0, 3.0);
        let camera = target + Vector3::new(0.0, 0.0, 50.0);
        let distance = sync.sync(&mut scene, &registry, camera, target);

        for axis in Axis::ALL {
            let id = HandleId::new(ManipulationMode::Position, axis);
            let placed = root_position(&scene, &registry, id);
            let expected = target + axis.unit() * distance * 1.3;
            assert!((placed - expected).magnitude() < 1e-5);
        }
    }

    #[test]
    fn test_rotation_and_scaling_handles_are_centred() {
        let (mut scene, registry, mut sync) = setup();
        let target = Vector3::new(-4.0, 0.5, 2.0);
        sync.sync(&mut scene, &registry, Vector3::new(10.0, 10.0, 10.0), target);

        for mode in [ManipulationMode::Rotation, ManipulationMode::Scaling] {
            for axis in Axis::ALL {
                assert_eq!(root_position(&scene, &registry, HandleId::new(mode, axis)), target);
            }
        }
    }
}
