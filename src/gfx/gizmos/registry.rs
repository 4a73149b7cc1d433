//! Handle registry
//!
//! Owns the nine axis handles (three modes times three axes) and the
//! mesh-to-handle lookup picking uses. Meshes never know which handle they
//! belong to; the registry answers that question.

use std::collections::HashMap;

use log::debug;

use super::{
    config::GizmoConfig,
    factory::{build_handle, HandleParts},
    Axis, ManipulationMode,
};
use crate::gfx::{
    resources::material::MaterialId,
    scene::overlay::{MeshId, OverlayScene},
};

/// Identifies one of the nine handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    pub mode: ManipulationMode,
    pub axis: Axis,
}

impl HandleId {
    pub fn new(mode: ManipulationMode, axis: Axis) -> Self {
        Self { mode, axis }
    }
}

/// One draggable handle and its meshes
#[derive(Debug, Clone)]
pub struct AxisHandle {
    pub id: HandleId,
    pub parts: HandleParts,
    pub enabled: bool,
}

impl AxisHandle {
    pub fn root(&self) -> MeshId {
        self.parts.root
    }

    pub fn material(&self) -> MaterialId {
        self.parts.material
    }
}

#[derive(Debug)]
pub struct HandleRegistry {
    /// Indexed by `mode * 3 + axis`
    handles: Vec<AxisHandle>,
    lookup: HashMap<MeshId, HandleId>,
}

impl HandleRegistry {
    /// Builds every handle into `scene`, all disabled
    pub fn build(scene: &mut OverlayScene, config: &GizmoConfig) -> Self {
        let mut handles = Vec::with_capacity(9);
        let mut lookup = HashMap::new();

        for mode in ManipulationMode::HANDLED {
            for axis in Axis::ALL {
                let Some(parts) = build_handle(scene, mode, axis, config) else {
                    continue;
                };
                let id = HandleId::new(mode, axis);
                for part in &parts.parts {
                    lookup.insert(*part, id);
                    scene.set_enabled(*part, false);
                }
                handles.push(AxisHandle {
                    id,
                    parts,
                    enabled: false,
                });
            }
        }

        debug!("Built {} gizmo handles from {} meshes", handles.len(), lookup.len());
        Self { handles, lookup }
    }

    fn slot(id: HandleId) -> Option<usize> {
        id.mode.index().map(|mode| mode * 3 + id.axis.index())
    }

    pub fn handle(&self, id: HandleId) -> Option<&AxisHandle> {
        Self::slot(id).and_then(|slot| self.handles.get(slot))
    }

    pub fn handles(&self) -> impl Iterator<Item = &AxisHandle> {
        self.handles.iter()
    }

    /// Handle owning `mesh`, `None` for meshes that are not handle parts
    pub fn resolve(&self, mesh: MeshId) -> Option<HandleId> {
        self.lookup.get(&mesh).copied()
    }

    /// Every mesh belonging to `axis`, across all modes
    pub fn axis_meshes_for(&self, axis: Axis) -> Vec<MeshId> {
        self.handles
            .iter()
            .filter(|h| h.id.axis == axis)
            .flat_map(|h| h.parts.parts.iter().copied())
            .collect()
    }

    /// Toggles exactly the three handles of `mode`
    pub fn set_mode_enabled(
        &mut self,
        scene: &mut OverlayScene,
        mode: ManipulationMode,
        enabled: bool,
    ) {
        for handle in self.handles.iter_mut().filter(|h| h.id.mode == mode) {
            handle.enabled = enabled;
            // Children inherit through the hierarchy
            scene.set_enabled(handle.parts.root, enabled);
            for part in &handle.parts.parts {
                scene.set_enabled(*part, enabled);
            }
        }
    }

    pub fn disable_all(&mut self, scene: &mut OverlayScene) {
        for mode in ManipulationMode::HANDLED {
            self.set_mode_enabled(scene, mode, false);
        }
    }

    /// The mode whose handles are currently enabled
    pub fn enabled_mode(&self) -> Option<ManipulationMode> {
        self.handles.iter().find(|h| h.enabled).map(|h| h.id.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> (OverlayScene, HandleRegistry) {
        let mut scene = OverlayScene::new();
        let registry = HandleRegistry::build(&mut scene, &GizmoConfig::default());
        (scene, registry)
    }

    #[test]
    fn test_builds_nine_disabled_handles() {
        let (scene, registry) = registry();

        assert_eq!(registry.handles().count(), 9);
        assert!(registry.handles().all(|h| !h.enabled));
        assert!(scene.meshes().all(|(id, _)| !scene.is_effectively_enabled(id)));
        assert_eq!(registry.enabled_mode(), None);
    }

    #[test]
    fn test_every_part_resolves_to_its_handle() {
        let (_, registry) = registry();

        for handle in registry.handles() {
            for part in &handle.parts.parts {
                assert_eq!(registry.resolve(*part), Some(handle.id));
            }
        }
        assert_eq!(registry.resolve(MeshId(999)), None);
    }

    #[test]
    fn test_axis_meshes_cover_all_modes() {
        let (_, registry) = registry();
        let x_meshes = registry.axis_meshes_for(Axis::X);

        // shaft + cone, ring, shaft + cube
        assert_eq!(x_meshes.len(), 5);
        assert!(x_meshes
            .iter()
            .all(|mesh| registry.resolve(*mesh).map(|h| h.axis) == Some(Axis::X)));
    }

    #[test]
    fn test_set_mode_enabled_leaves_other_modes_alone() {
        let (mut scene, mut registry) = registry();

        registry.set_mode_enabled(&mut scene, ManipulationMode::Rotation, true);
        assert_eq!(registry.enabled_mode(), Some(ManipulationMode::Rotation));
        let enabled: Vec<_> = registry.handles().filter(|h| h.enabled).map(|h| h.id).collect();
        assert_eq!(enabled.len(), 3);
        assert!(enabled.iter().all(|id| id.mode == ManipulationMode::Rotation));

        registry.disable_all(&mut scene);
        assert_eq!(registry.enabled_mode(), None);
    }

    #[test]
    fn test_handle_lookup_by_slot() {
        let (_, registry) = registry();
        let id = HandleId::new(ManipulationMode::Scaling, Axis::Y);

        assert_eq!(registry.handle(id).map(|h| h.id), Some(id));
        assert!(registry
            .handle(HandleId::new(ManipulationMode::None, Axis::Y))
            .is_none());
    }
}
