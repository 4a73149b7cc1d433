//! Hover feedback
//!
//! The handle under the pointer is dimmed; moving off it restores the
//! colour. Dim and restore are exact inverses, so colours never drift no
//! matter how often the pointer crosses a handle.

use log::trace;

use super::registry::{HandleId, HandleRegistry};
use crate::gfx::scene::overlay::{MeshId, OverlayScene};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Highlight {
    handle: HandleId,
    mesh: MeshId,
}

#[derive(Debug, Clone)]
pub struct HighlightController {
    current: Option<Highlight>,
    dim_factor: f32,
    restore_factor: f32,
}

impl HighlightController {
    pub fn new(dim_factor: f32, restore_factor: f32) -> Self {
        Self {
            current: None,
            dim_factor,
            restore_factor,
        }
    }

    /// The hovered handle
    pub fn handle(&self) -> Option<HandleId> {
        self.current.map(|h| h.handle)
    }

    /// The exact mesh last hit under the pointer
    pub fn mesh(&self) -> Option<MeshId> {
        self.current.map(|h| h.mesh)
    }

    /// Applies this frame's pick result; returns true when the hovered handle changed
    pub fn update(
        &mut self,
        scene: &mut OverlayScene,
        registry: &HandleRegistry,
        hit: Option<MeshId>,
    ) -> bool {
        let next = hit.and_then(|mesh| {
            let handle = registry.resolve(mesh);
            debug_assert!(handle.is_some(), "picked mesh {mesh:?} belongs to no handle");
            handle.map(|handle| Highlight { handle, mesh })
        });

        match (self.current, next) {
            (Some(current), Some(next)) if current.handle == next.handle => {
                // Moving between parts of one handle keeps its colour
                self.current = Some(next);
                false
            }
            (None, None) => false,
            (previous, next) => {
                if let Some(previous) = previous {
                    scale_handle(scene, registry, previous.handle, self.restore_factor);
                }
                if let Some(next) = next {
                    scale_handle(scene, registry, next.handle, self.dim_factor);
                }
                trace!(
                    "Hover changed: {:?} -> {:?}",
                    previous.map(|h| h.handle),
                    next.map(|h| h.handle)
                );
                self.current = next;
                true
            }
        }
    }

    /// Restores the hovered handle, if any
    pub fn clear(&mut self, scene: &mut OverlayScene, registry: &HandleRegistry) {
        self.update(scene, registry, None);
    }
}

/// Multiplies a handle's emissive colour by `factor`
pub(crate) fn scale_handle(
    scene: &mut OverlayScene,
    registry: &HandleRegistry,
    handle: HandleId,
    factor: f32,
) {
    let Some(material) = registry.handle(handle).map(|h| h.material()) else {
        return;
    };
    if let Some(material) = scene.materials_mut().get_material_mut(material) {
        material.scale(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::gizmos::{config::GizmoConfig, Axis, ManipulationMode};

    fn setup() -> (OverlayScene, HandleRegistry, HighlightController) {
        let mut scene = OverlayScene::new();
        let registry = HandleRegistry::build(&mut scene, &GizmoConfig::default());
        (scene, registry, HighlightController::new(0.5, 2.0))
    }

    fn color_of(scene: &OverlayScene, registry: &HandleRegistry, id: HandleId) -> [f32; 3] {
        let material = registry.handle(id).map(|h| h.material()).unwrap();
        scene.materials().emissive_of(material)
    }

    #[test]
    fn test_hover_dims_and_leave_restores() {
        let (mut scene, registry, mut highlight) = setup();
        let id = HandleId::new(ManipulationMode::Position, Axis::X);
        let shaft = registry.handle(id).unwrap().root();

        assert!(highlight.update(&mut scene, &registry, Some(shaft)));
        assert_eq!(color_of(&scene, &registry, id), [0.5, 0.0, 0.0]);
        assert_eq!(highlight.handle(), Some(id));

        assert!(highlight.update(&mut scene, &registry, None));
        assert_eq!(color_of(&scene, &registry, id), [1.0, 0.0, 0.0]);
        assert_eq!(highlight.handle(), None);
    }

    #[test]
    fn test_moving_between_parts_keeps_colour() {
        let (mut scene, registry, mut highlight) = setup();
        let id = HandleId::new(ManipulationMode::Scaling, Axis::Y);
        let parts = registry.handle(id).unwrap().parts.parts.clone();

        highlight.update(&mut scene, &registry, Some(parts[0]));
        assert!(!highlight.update(&mut scene, &registry, Some(parts[1])));
        assert_eq!(highlight.mesh(), Some(parts[1]));
        assert_eq!(color_of(&scene, &registry, id), [0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_switching_handles_restores_previous() {
        let (mut scene, registry, mut highlight) = setup();
        let x = HandleId::new(ManipulationMode::Rotation, Axis::X);
        let z = HandleId::new(ManipulationMode::Rotation, Axis::Z);

        highlight.update(&mut scene, &registry, Some(registry.handle(x).unwrap().root()));
        highlight.update(&mut scene, &registry, Some(registry.handle(z).unwrap().root()));

        assert_eq!(color_of(&scene, &registry, x), [1.0, 0.0, 0.0]);
        assert_eq!(color_of(&scene, &registry, z), [0.0, 0.0, 0.5]);

        highlight.clear(&mut scene, &registry);
        assert_eq!(color_of(&scene, &registry, z), [0.0, 0.0, 1.0]);
    }
}
