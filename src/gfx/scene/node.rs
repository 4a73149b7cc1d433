//! # Host Scene Nodes
//!
//! The gizmo manipulates nodes it does not own. A node exposes its
//! transform vectors through [`TransformTarget`]; which vectors exist
//! depends on the node type, and that decides which manipulation modes the
//! node supports.
//!
//! | Node             | Position | Orientation | Scaling |
//! |------------------|----------|-------------|---------|
//! | [`MeshNode`]       | yes      | rotation    | yes     |
//! | [`TransformGroup`] | yes      | -           | yes     |
//! | [`LightNode`]      | yes      | direction   | -       |
//! | [`CameraNode`]     | yes      | rotation    | -       |
//! | [`SoundNode`]      | yes      | direction   | -       |
//! | [`EmitterNode`]    | point emitters only | direction | - |

use std::{cell::RefCell, fmt, rc::Rc};

use cgmath::{Vector3, Zero};

use crate::gfx::gizmos::ManipulationMode;

/// A host node shared between the scene and the gizmo
pub type SharedNode = Rc<RefCell<dyn TransformTarget>>;

/// Wraps a node for sharing with the gizmo
pub fn shared<T: TransformTarget + 'static>(node: T) -> SharedNode {
    Rc::new(RefCell::new(node))
}

/// Node category, used for logging and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Mesh,
    TransformGroup,
    Light,
    Camera,
    Sound,
    Emitter,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mesh => "mesh",
            NodeKind::TransformGroup => "transform group",
            NodeKind::Light => "light",
            NodeKind::Camera => "camera",
            NodeKind::Sound => "sound",
            NodeKind::Emitter => "particle emitter",
        };
        f.write_str(name)
    }
}

/// Which of a node's vectors a drag writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformChannel {
    Position,
    Scaling,
    /// `rotation` on mesh-like nodes, `direction` on light-like nodes
    Orientation,
}

impl TransformChannel {
    /// Channel a manipulation mode edits, `None` for [`ManipulationMode::None`]
    pub fn for_mode(mode: ManipulationMode) -> Option<Self> {
        match mode {
            ManipulationMode::Position => Some(TransformChannel::Position),
            ManipulationMode::Rotation => Some(TransformChannel::Orientation),
            ManipulationMode::Scaling => Some(TransformChannel::Scaling),
            ManipulationMode::None => None,
        }
    }
}

/// Nodes that carry an orientation vector
pub trait HasOrientation {
    fn orientation_vector(&self) -> Vector3<f32>;

    fn orientation_vector_mut(&mut self) -> &mut Vector3<f32>;
}

/// A host node the gizmo can be attached to
pub trait TransformTarget: fmt::Debug {
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind;

    /// World position, `None` when the node has no readable position
    fn position(&self) -> Option<Vector3<f32>>;

    fn position_mut(&mut self) -> Option<&mut Vector3<f32>>;

    fn scaling(&self) -> Option<Vector3<f32>> {
        None
    }

    fn scaling_mut(&mut self) -> Option<&mut Vector3<f32>> {
        None
    }

    fn orientation(&self) -> Option<&dyn HasOrientation> {
        None
    }

    fn orientation_mut(&mut self) -> Option<&mut dyn HasOrientation> {
        None
    }

    /// Current value of a channel
    fn vector(&self, channel: TransformChannel) -> Option<Vector3<f32>> {
        match channel {
            TransformChannel::Position => self.position(),
            TransformChannel::Scaling => self.scaling(),
            TransformChannel::Orientation => self.orientation().map(|o| o.orientation_vector()),
        }
    }

    /// Writable handle on a channel
    fn vector_mut(&mut self, channel: TransformChannel) -> Option<&mut Vector3<f32>> {
        match channel {
            TransformChannel::Position => self.position_mut(),
            TransformChannel::Scaling => self.scaling_mut(),
            TransformChannel::Orientation => self
                .orientation_mut()
                .map(|o| o.orientation_vector_mut()),
        }
    }

    /// Whether handles of `mode` make sense for this node
    fn supports(&self, mode: ManipulationMode) -> bool {
        match TransformChannel::for_mode(mode) {
            Some(channel) => self.vector(channel).is_some(),
            None => true,
        }
    }
}

/// A renderable mesh: position, rotation and scaling
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub name: String,
    pub position: Vector3<f32>,
    /// Euler angles in radians
    pub rotation: Vector3<f32>,
    pub scaling: Vector3<f32>,
}

impl MeshNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_scaling(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scaling = Vector3::new(x, y, z);
        self
    }
}

impl HasOrientation for MeshNode {
    fn orientation_vector(&self) -> Vector3<f32> {
        self.rotation
    }

    fn orientation_vector_mut(&mut self) -> &mut Vector3<f32> {
        &mut self.rotation
    }
}

impl TransformTarget for MeshNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Mesh
    }

    fn position(&self) -> Option<Vector3<f32>> {
        Some(self.position)
    }

    fn position_mut(&mut self) -> Option<&mut Vector3<f32>> {
        Some(&mut self.position)
    }

    fn scaling(&self) -> Option<Vector3<f32>> {
        Some(self.scaling)
    }

    fn scaling_mut(&mut self) -> Option<&mut Vector3<f32>> {
        Some(&mut self.scaling)
    }

    fn orientation(&self) -> Option<&dyn HasOrientation> {
        Some(self)
    }

    fn orientation_mut(&mut self) -> Option<&mut dyn HasOrientation> {
        Some(self)
    }
}

/// Grouping node with position and scaling but no orientation
#[derive(Debug, Clone, PartialEq)]
pub struct TransformGroup {
    pub name: String,
    pub position: Vector3<f32>,
    pub scaling: Vector3<f32>,
}

impl TransformGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: Vector3::zero(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformTarget for TransformGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::TransformGroup
    }

    fn position(&self) -> Option<Vector3<f32>> {
        Some(self.position)
    }

    fn position_mut(&mut self) -> Option<&mut Vector3<f32>> {
        Some(&mut self.position)
    }

    fn scaling(&self) -> Option<Vector3<f32>> {
        Some(self.scaling)
    }

    fn scaling_mut(&mut self) -> Option<&mut Vector3<f32>> {
        Some(&mut self.scaling)
    }
}

/// Implements [`TransformTarget`] for a node with `position` and `direction`
macro_rules! directional_node {
    ($node:ident, $kind:expr) => {
        impl HasOrientation for $node {
            fn orientation_vector(&self) -> Vector3<f32> {
                self.direction
            }

            fn orientation_vector_mut(&mut self) -> &mut Vector3<f32> {
                &mut self.direction
            }
        }

        impl TransformTarget for $node {
            fn name(&self) -> &str {
                &self.name
            }

            fn kind(&self) -> NodeKind {
                $kind
            }

            fn position(&self) -> Option<Vector3<f32>> {
                Some(self.position)
            }

            fn position_mut(&mut self) -> Option<&mut Vector3<f32>> {
                Some(&mut self.position)
            }

            fn orientation(&self) -> Option<&dyn HasOrientation> {
                Some(self)
            }

            fn orientation_mut(&mut self) -> Option<&mut dyn HasOrientation> {
                Some(self)
            }
        }
    };
}

/// Point, spot or directional light
#[derive(Debug, Clone, PartialEq)]
pub struct LightNode {
    pub name: String,
    pub position: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl LightNode {
    pub fn new(name: &str, position: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            position,
            direction,
        }
    }
}

directional_node!(LightNode, NodeKind::Light);

/// Positional sound source
#[derive(Debug, Clone, PartialEq)]
pub struct SoundNode {
    pub name: String,
    pub position: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl SoundNode {
    pub fn new(name: &str, position: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            position,
            direction: Vector3::unit_z(),
        }
    }
}

directional_node!(SoundNode, NodeKind::Sound);

/// Scene camera as an editable node
#[derive(Debug, Clone, PartialEq)]
pub struct CameraNode {
    pub name: String,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
}

impl CameraNode {
    pub fn new(name: &str, position: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            position,
            rotation: Vector3::zero(),
        }
    }
}

impl HasOrientation for CameraNode {
    fn orientation_vector(&self) -> Vector3<f32> {
        self.rotation
    }

    fn orientation_vector_mut(&mut self) -> &mut Vector3<f32> {
        &mut self.rotation
    }
}

impl TransformTarget for CameraNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Camera
    }

    fn position(&self) -> Option<Vector3<f32>> {
        Some(self.position)
    }

    fn position_mut(&mut self) -> Option<&mut Vector3<f32>> {
        Some(&mut self.position)
    }

    fn orientation(&self) -> Option<&dyn HasOrientation> {
        Some(self)
    }

    fn orientation_mut(&mut self) -> Option<&mut dyn HasOrientation> {
        Some(self)
    }
}

/// Where a particle emitter spawns from
#[derive(Debug, Clone, PartialEq)]
pub enum EmitterSource {
    /// Free-standing point the gizmo can move
    Point(Vector3<f32>),
    /// Spawns from a mesh; moving the mesh moves the emitter
    Mesh(String),
}

/// Particle system emitter
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterNode {
    pub name: String,
    pub source: EmitterSource,
    pub direction: Vector3<f32>,
}

impl EmitterNode {
    pub fn new(name: &str, source: EmitterSource) -> Self {
        Self {
            name: name.to_string(),
            source,
            direction: Vector3::unit_y(),
        }
    }
}

impl HasOrientation for EmitterNode {
    fn orientation_vector(&self) -> Vector3<f32> {
        self.direction
    }

    fn orientation_vector_mut(&mut self) -> &mut Vector3<f32> {
        &mut self.direction
    }
}

impl TransformTarget for EmitterNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Emitter
    }

    fn position(&self) -> Option<Vector3<f32>> {
        match &self.source {
            EmitterSource::Point(point) => Some(*point),
            EmitterSource::Mesh(_) => None,
        }
    }

    fn position_mut(&mut self) -> Option<&mut Vector3<f32>> {
        match &mut self.source {
            EmitterSource::Point(point) => Some(point),
            EmitterSource::Mesh(_) => None,
        }
    }

    fn orientation(&self) -> Option<&dyn HasOrientation> {
        Some(self)
    }

    fn orientation_mut(&mut self) -> Option<&mut dyn HasOrientation> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_per_node_type() {
        use ManipulationMode::*;

        let mesh = MeshNode::new("box");
        assert!(mesh.supports(Position) && mesh.supports(Rotation) && mesh.supports(Scaling));

        let group = TransformGroup::new("group");
        assert!(group.supports(Position) && group.supports(Scaling));
        assert!(!group.supports(Rotation));

        let light = LightNode::new("sun", Vector3::zero(), -Vector3::unit_y());
        assert!(light.supports(Rotation));
        assert!(!light.supports(Scaling));

        let camera = CameraNode::new("cam", Vector3::new(0.0, 2.0, -5.0));
        assert!(camera.supports(Rotation) && !camera.supports(Scaling));

        let sound = SoundNode::new("beep", Vector3::zero());
        assert!(sound.supports(Position) && sound.supports(Rotation));

        let nodes: [&dyn TransformTarget; 5] = [&mesh, &group, &light, &camera, &sound];
        for node in nodes {
            assert!(node.supports(None));
        }
    }

    #[test]
    fn test_orientation_resolves_to_direction_on_lights() {
        let mut light = LightNode::new("spot", Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));
        if let Some(direction) = light.vector_mut(TransformChannel::Orientation) {
            direction.x = 0.5;
        }

        assert_eq!(light.direction, Vector3::new(0.5, -1.0, 0.0));
        assert_eq!(light.position, Vector3::zero());
    }

    #[test]
    fn test_orientation_resolves_to_rotation_on_meshes() {
        let mut mesh = MeshNode::new("box").with_rotation(0.1, 0.2, 0.3);
        if let Some(rotation) = mesh.vector_mut(TransformChannel::Orientation) {
            rotation.z = 1.0;
        }

        assert_eq!(mesh.rotation, Vector3::new(0.1, 0.2, 1.0));
    }

    #[test]
    fn test_mesh_bound_emitter_has_no_position() {
        let point = EmitterNode::new("sparks", EmitterSource::Point(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(point.position(), Some(Vector3::new(1.0, 2.0, 3.0)));
        assert!(point.supports(ManipulationMode::Position));

        let bound = EmitterNode::new("smoke", EmitterSource::Mesh("chimney".to_string()));
        assert_eq!(bound.position(), Option::None);
        assert!(!bound.supports(ManipulationMode::Position));
        assert!(bound.supports(ManipulationMode::Rotation));
    }

    #[test]
    fn test_shared_node_is_usable_through_trait() {
        let node = shared(MeshNode::new("crate").with_position(1.0, 0.0, 0.0));
        assert_eq!(node.borrow().name(), "crate");
        assert_eq!(node.borrow().kind(), NodeKind::Mesh);
        assert_eq!(node.borrow().position(), Some(Vector3::new(1.0, 0.0, 0.0)));
    }
}
