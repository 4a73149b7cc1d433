//! # Drag State Machine
//!
//! ```text
//! Idle --mouse down over a handle--> Resolving --plane hit--> Dragging --mouse up--> Idle
//! ```
//!
//! Resolving picks the handle's axis and a picking plane that contains it,
//! detaches camera control and waits for the first pointer ray that meets
//! the plane. That first hit fixes the reference offset between the plane
//! point and the edited vector. Each Dragging frame then writes exactly one
//! component:
//!
//! ```text
//! vector[axis] = hit[axis] - offset[axis]
//! ```
//!
//! The other two components are never written.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use cgmath::{InnerSpace, Vector3, Zero};
use log::debug;

use super::{
    highlight::scale_handle,
    registry::{HandleId, HandleRegistry},
    Axis,
};
use crate::gfx::{
    camera::ViewCamera,
    picking::{Plane, Ray},
    scene::{
        node::{SharedNode, TransformChannel, TransformTarget},
        overlay::{MeshId, OverlayScene},
    },
};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Waiting for the first pointer ray to meet the picking plane
    Resolving,
    /// Writing the resolved axis every frame
    Dragging,
}

/// Read-only view of the active session
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub mesh: MeshId,
    pub handle: Option<HandleId>,
    pub phase: DragPhase,
    pub plane: Option<Plane>,
    pub channel: Option<TransformChannel>,
    pub reference_offset: Option<Vector3<f32>>,
    pub initial_value: Option<Vector3<f32>>,
}

/// What a frame of dragging did
#[derive(Debug, Clone, PartialEq)]
pub enum DragUpdate {
    /// Resolving finished; `channel` is `None` when the node lacks the vector
    Started {
        axis: Axis,
        channel: Option<TransformChannel>,
    },
    /// One component was written
    Moved {
        axis: Axis,
        channel: TransformChannel,
        value: Vector3<f32>,
    },
}

/// A finished session, for the change notification
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDrag {
    pub handle: Option<HandleId>,
    /// The session reached Dragging before it closed
    pub resolved: bool,
    pub channel: Option<TransformChannel>,
    pub before: Option<Vector3<f32>>,
}

#[derive(Debug)]
struct DragSession {
    mesh: MeshId,
    node: Weak<RefCell<dyn TransformTarget>>,
    handle: Option<HandleId>,
    phase: DragPhase,
    plane: Option<Plane>,
    reference_offset: Vector3<f32>,
    channel: Option<TransformChannel>,
    initial_value: Option<Vector3<f32>>,
    armed: bool,
    camera_detached: bool,
}

/// Owns the at-most-one drag session
#[derive(Debug)]
pub struct DragController {
    session: Option<DragSession>,
    dim_factor: f32,
    restore_factor: f32,
}

impl DragController {
    pub fn new(dim_factor: f32, restore_factor: f32) -> Self {
        Self {
            session: None,
            dim_factor,
            restore_factor,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> Option<DragState> {
        self.session.as_ref().map(|s| DragState {
            mesh: s.mesh,
            handle: s.handle,
            phase: s.phase,
            plane: s.plane,
            channel: s.channel,
            reference_offset: (s.phase == DragPhase::Dragging).then_some(s.reference_offset),
            initial_value: s.initial_value,
        })
    }

    /// Whether the session was started on `node`
    pub fn targets(&self, node: &SharedNode) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| Weak::ptr_eq(&s.node, &Rc::downgrade(node)))
    }

    /// Opens a session on the mesh under the pointer
    ///
    /// Returns false and changes nothing when a session already exists.
    pub fn begin(&mut self, mesh: MeshId, node: &SharedNode) -> bool {
        if self.session.is_some() {
            return false;
        }

        debug!("Drag session opened on {:?}", mesh);
        self.session = Some(DragSession {
            mesh,
            node: Rc::downgrade(node),
            handle: None,
            phase: DragPhase::Resolving,
            plane: None,
            reference_offset: Vector3::zero(),
            channel: None,
            initial_value: None,
            armed: false,
            camera_detached: false,
        });
        true
    }

    /// Advances the session by one frame
    ///
    /// `ray` is this frame's pointer ray, `None` when it could not be built.
    /// Failed intersections leave the session as is for the next frame.
    pub fn step(
        &mut self,
        node: &SharedNode,
        ray: Option<Ray>,
        scene: &mut OverlayScene,
        registry: &HandleRegistry,
        camera: &mut dyn ViewCamera,
    ) -> Option<DragUpdate> {
        let dim_factor = self.dim_factor;
        let session = self.session.as_mut()?;

        match session.phase {
            DragPhase::Resolving => {
                let handle = match session.handle {
                    Some(handle) => handle,
                    None => {
                        let resolved = registry.resolve(session.mesh);
                        debug_assert!(
                            resolved.is_some(),
                            "dragged mesh {:?} belongs to no handle",
                            session.mesh
                        );
                        session.handle = Some(resolved?);
                        resolved?
                    }
                };

                if !session.camera_detached {
                    camera.detach_control();
                    session.camera_detached = true;
                }

                if session.plane.is_none() {
                    let origin = node.borrow().position()?;
                    let view_direction = origin - camera.position();
                    session.plane = Some(picking_plane(handle.axis, origin, view_direction));
                }
                let hit = session.plane?.intersect_ray(&ray?)?;

                session.channel = TransformChannel::for_mode(handle.mode);
                session.initial_value = session
                    .channel
                    .and_then(|channel| node.borrow().vector(channel));
                match session.initial_value {
                    Some(value) => session.reference_offset = hit - value,
                    // Nothing to write until mouse up
                    None => session.channel = None,
                }

                scale_handle(scene, registry, handle, dim_factor);
                session.armed = true;
                session.phase = DragPhase::Dragging;
                debug!(
                    "Drag resolved: {} axis, channel {:?}, offset {:?}",
                    handle.axis, session.channel, session.reference_offset
                );

                Some(DragUpdate::Started {
                    axis: handle.axis,
                    channel: session.channel,
                })
            }
            DragPhase::Dragging => {
                let axis = session.handle?.axis;
                let channel = session.channel?;
                let hit = session.plane?.intersect_ray(&ray?)?;

                let mut target = node.borrow_mut();
                let vector = target.vector_mut(channel)?;
                let component = axis.component(hit) - axis.component(session.reference_offset);
                axis.set_component(vector, component);
                let value = *vector;

                Some(DragUpdate::Moved {
                    axis,
                    channel,
                    value,
                })
            }
        }
    }

    /// Closes the session on mouse up
    ///
    /// Restores the armed colour and camera control. Returns the finished
    /// session, or `None` when there was none.
    pub fn end(
        &mut self,
        scene: &mut OverlayScene,
        registry: &HandleRegistry,
        camera: &mut dyn ViewCamera,
    ) -> Option<CompletedDrag> {
        let session = self.session.take()?;
        if let (true, Some(handle)) = (session.armed, session.handle) {
            scale_handle(scene, registry, handle, self.restore_factor);
        }
        camera.attach_control();
        debug!("Drag session closed in {:?}", session.phase);

        Some(CompletedDrag {
            handle: session.handle,
            resolved: session.phase == DragPhase::Dragging,
            channel: session.channel,
            before: session.initial_value,
        })
    }
}

/// Plane containing `axis` through `origin`, facing the camera
///
/// The normal is whichever of the two perpendicular world axes is most
/// aligned with the view direction (camera to target), flipped to face
/// the camera. Since the plane always contains the dragged axis, moving
/// the pointer along that axis on screen stays on the plane. On a tie, or
/// a zero view direction, the first perpendicular axis wins.
pub fn picking_plane(axis: Axis, origin: Vector3<f32>, view_direction: Vector3<f32>) -> Plane {
    let [first, second] = axis.perpendicular();
    let alignment = |candidate: Axis| view_direction.dot(candidate.unit());

    let chosen = if alignment(second).abs() > alignment(first).abs() {
        second
    } else {
        first
    };
    let normal = if alignment(chosen) > 0.0 {
        -chosen.unit()
    } else {
        chosen.unit()
    };

    Plane::from_point_normal(origin, normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::OrbitCamera,
        gizmos::{config::GizmoConfig, ManipulationMode},
        scene::node::{shared, MeshNode, TransformGroup},
    };

    struct Rig {
        scene: OverlayScene,
        registry: HandleRegistry,
        camera: OrbitCamera,
        drag: DragController,
    }

    fn rig() -> Rig {
        let mut scene = OverlayScene::new();
        let registry = HandleRegistry::build(&mut scene, &GizmoConfig::default());
        Rig {
            scene,
            registry,
            camera: OrbitCamera::new(15.0, 0.5, 0.7, Vector3::zero(), (800.0, 600.0)),
            drag: DragController::new(0.5, 2.0),
        }
    }

    fn root_of(rig: &Rig, mode: ManipulationMode, axis: Axis) -> MeshId {
        rig.registry.handle(HandleId::new(mode, axis)).unwrap().root()
    }

    fn step(rig: &mut Rig, node: &SharedNode, ray: Ray) -> Option<DragUpdate> {
        rig.drag
            .step(node, Some(ray), &mut rig.scene, &rig.registry, &mut rig.camera)
    }

    #[test]
    fn test_picking_plane_contains_axis_and_faces_camera() {
        let view = Vector3::new(-0.3, -0.8, -0.5);
        for axis in Axis::ALL {
            let plane = picking_plane(axis, Vector3::new(1.0, 2.0, 3.0), view);

            assert_eq!(plane.normal.dot(axis.unit()), 0.0);
            assert!(plane.normal.dot(view) < 0.0);
            assert!(plane.signed_distance(Vector3::new(1.0, 2.0, 3.0)).abs() < 1e-6);
        }

        // Looking straight down, X drags on the ground plane
        let plane = picking_plane(Axis::X, Vector3::zero(), -Vector3::unit_y());
        assert_eq!(plane.normal, Vector3::unit_y());
    }

    #[test]
    fn test_picking_plane_tie_prefers_first_candidate() {
        let plane = picking_plane(Axis::Y, Vector3::zero(), Vector3::zero());
        assert_eq!(plane.normal, Vector3::unit_x());
    }

    #[test]
    fn test_resolving_then_dragging_writes_one_component() {
        let mut rig = rig();
        let node = shared(MeshNode::new("box").with_position(0.0, 1.0, 2.0));
        let mesh = root_of(&rig, ManipulationMode::Position, Axis::X);
        assert!(rig.drag.begin(mesh, &node));

        // A steep camera makes X drag on the horizontal plane through the target
        let down = |x: f32, z: f32| Ray::new(Vector3::new(x, 20.0, z), -Vector3::unit_y());
        rig.camera.set_pitch(1.2);
        rig.camera.look_at(Vector3::new(0.0, 1.0, 2.0));

        let started = step(&mut rig, &node, down(3.0, 2.5));
        assert!(matches!(
            started,
            Some(DragUpdate::Started {
                axis: Axis::X,
                channel: Some(TransformChannel::Position)
            })
        ));
        assert!(!rig.camera.is_control_attached());

        let state = rig.drag.state().unwrap();
        let offset = state.reference_offset.unwrap();
        let moved = step(&mut rig, &node, down(3.0 + 4.0, -9.0));
        assert!(matches!(moved, Some(DragUpdate::Moved { axis: Axis::X, .. })));

        let position = node.borrow().position().unwrap();
        assert!((position.x - (7.0 - offset.x)).abs() < 1e-4);
        assert_eq!(position.y, 1.0);
        assert_eq!(position.z, 2.0);
    }

    #[test]
    fn test_second_begin_is_ignored() {
        let mut rig = rig();
        let node = shared(MeshNode::new("box"));
        let first = root_of(&rig, ManipulationMode::Rotation, Axis::Z);
        let second = root_of(&rig, ManipulationMode::Rotation, Axis::X);

        assert!(rig.drag.begin(first, &node));
        assert!(!rig.drag.begin(second, &node));
        assert_eq!(rig.drag.state().map(|s| s.mesh), Some(first));
    }

    #[test]
    fn test_missing_vector_makes_drag_a_no_op() {
        let mut rig = rig();
        let group: SharedNode = shared(TransformGroup::new("group"));
        let mesh = root_of(&rig, ManipulationMode::Rotation, Axis::Y);
        rig.drag.begin(mesh, &group);

        let ray = Ray::new(Vector3::new(0.5, 0.5, 10.0), -Vector3::unit_z());
        let started = step(&mut rig, &group, ray);
        assert!(matches!(started, Some(DragUpdate::Started { channel: None, .. })));

        let ray = Ray::new(Vector3::new(3.0, 10.0, 3.0), -Vector3::unit_y());
        let moved = step(&mut rig, &group, ray);
        assert_eq!(moved, None);
        assert_eq!(group.borrow().position(), Some(Vector3::zero()));
        assert_eq!(group.borrow().scaling(), Some(Vector3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_parallel_ray_keeps_resolving() {
        let mut rig = rig();
        let node = shared(MeshNode::new("box"));
        let mesh = root_of(&rig, ManipulationMode::Scaling, Axis::Z);
        rig.drag.begin(mesh, &node);

        // A steep camera makes Z drag on the ground plane, which a horizontal ray never meets
        rig.camera.set_pitch(1.2);
        let first = step(&mut rig, &node, Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::unit_x()));
        assert_eq!(first, None);
        assert_eq!(rig.drag.state().map(|s| s.phase), Some(DragPhase::Resolving));
        assert!(rig.drag.state().and_then(|s| s.plane).is_some());

        let ray = Ray::new(Vector3::new(0.3, 5.0, 0.2), -Vector3::unit_y());
        let second = step(&mut rig, &node, ray);
        assert!(second.is_some());
        assert_eq!(rig.drag.state().map(|s| s.phase), Some(DragPhase::Dragging));
    }

    #[test]
    fn test_end_restores_colour_and_camera() {
        let mut rig = rig();
        let node = shared(MeshNode::new("box"));
        let id = HandleId::new(ManipulationMode::Position, Axis::Y);
        let material = rig.registry.handle(id).unwrap().material();
        rig.drag.begin(root_of(&rig, ManipulationMode::Position, Axis::Y), &node);

        step(&mut rig, &node, Ray::new(Vector3::new(0.1, 3.0, 20.0), -Vector3::unit_z()));
        assert_eq!(rig.scene.materials().emissive_of(material), [0.0, 0.5, 0.0]);

        let completed = rig.drag.end(&mut rig.scene, &rig.registry, &mut rig.camera).unwrap();
        assert_eq!(completed.handle, Some(id));
        assert!(completed.resolved);
        assert_eq!(completed.before, Some(Vector3::zero()));
        assert_eq!(rig.scene.materials().emissive_of(material), [0.0, 1.0, 0.0]);
        assert!(rig.camera.is_control_attached());
        assert!(!rig.drag.is_active());
        assert!(rig.drag.end(&mut rig.scene, &rig.registry, &mut rig.camera).is_none());
    }

    #[test]
    fn test_end_before_first_hit_is_unresolved() {
        let mut rig = rig();
        let node = shared(MeshNode::new("box"));
        rig.drag.begin(root_of(&rig, ManipulationMode::Position, Axis::X), &node);

        let completed = rig.drag.end(&mut rig.scene, &rig.registry, &mut rig.camera).unwrap();
        assert!(!completed.resolved);
        assert_eq!(completed.channel, None);
        assert!(rig.camera.is_control_attached());
    }
}
