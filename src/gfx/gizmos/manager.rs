//! # Gizmo Manager
//!
//! The host-facing facade. The host attaches a node, picks a mode, forwards
//! pointer input and calls [`GizmoManager::tick`] once per rendered frame,
//! after the main scene pass. Everything else (handle placement, hover,
//! dragging) happens inside `tick`, so each frame has a single mutation
//! point.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use cgmath::Vector3;
use log::{debug, info, warn};

use super::{
    config::GizmoConfig,
    drag::{DragController, DragState, DragUpdate},
    highlight::HighlightController,
    registry::{HandleId, HandleRegistry},
    scale_sync::ScaleSynchronizer,
    Axis, ManipulationMode,
};
use crate::{
    error::{GizmoError, Result},
    gfx::{
        camera::ViewCamera,
        picking::{screen_to_ray, Ray},
        scene::{
            node::{SharedNode, TransformChannel, TransformTarget},
            overlay::OverlayScene,
        },
    },
};

/// Before and after values of one completed drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    pub channel: TransformChannel,
    pub before: Vector3<f32>,
    pub after: Vector3<f32>,
}

/// Notifications for the host
#[derive(Debug, Clone)]
pub enum GizmoEvent {
    /// A drag resolved its axis and armed its handle
    DragStarted {
        node: SharedNode,
        axis: Axis,
        channel: Option<TransformChannel>,
    },
    /// A drag frame wrote one component
    Dragged {
        node: SharedNode,
        axis: Axis,
        channel: TransformChannel,
        value: Vector3<f32>,
    },
    /// A resolved drag completed on a node that is still attached; sent once
    /// per drag. `change` is `None` when the node lacks the edited vector.
    TargetChanged {
        node: SharedNode,
        axis: Axis,
        change: Option<ValueChange>,
    },
}

type Listener = Box<dyn FnMut(&GizmoEvent)>;

pub struct GizmoManager {
    config: GizmoConfig,
    overlay: OverlayScene,
    registry: HandleRegistry,
    scale_sync: ScaleSynchronizer,
    highlight: HighlightController,
    drag: DragController,
    mode: ManipulationMode,
    target: Option<Weak<RefCell<dyn TransformTarget>>>,
    pointer: (f32, f32),
    listeners: Vec<Listener>,
}

impl Default for GizmoManager {
    fn default() -> Self {
        Self::build(GizmoConfig::default())
    }
}

impl GizmoManager {
    /// Builds the overlay scene and all nine handles, hidden
    pub fn new(config: GizmoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GizmoConfig) -> Self {
        let mut overlay = OverlayScene::new();
        let registry = HandleRegistry::build(&mut overlay, &config);

        Self {
            scale_sync: ScaleSynchronizer::new(&config),
            highlight: HighlightController::new(config.dim_factor, config.restore_factor),
            drag: DragController::new(config.dim_factor, config.restore_factor),
            config,
            overlay,
            registry,
            mode: ManipulationMode::None,
            target: None,
            pointer: (0.0, 0.0),
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    /// Sets or clears the node under manipulation
    ///
    /// A drag in progress on another node is cancelled on the next tick.
    pub fn attach(&mut self, node: Option<&SharedNode>) {
        self.target = node.map(Rc::downgrade);
        self.highlight.clear(&mut self.overlay, &self.registry);
        self.refresh_handles();

        match node {
            Some(node) => {
                let node = node.borrow();
                info!("Gizmo attached to {} '{}'", node.kind(), node.name());
            }
            None => info!("Gizmo detached"),
        }
    }

    /// The attached node, if it is still alive
    pub fn target(&self) -> Option<SharedNode> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    /// Host notification that `node` left the scene
    pub fn node_removed(&mut self, node: &SharedNode) {
        let removed = self
            .target
            .as_ref()
            .is_some_and(|target| Weak::ptr_eq(target, &Rc::downgrade(node)));
        if removed {
            debug!("Attached node removed from scene");
            self.attach(None);
        }
    }

    /// Switches the visible handle set
    ///
    /// Refused while dragging, and when the attached node has no vector for
    /// `mode`; the current mode is kept in both cases.
    pub fn set_mode(&mut self, mode: ManipulationMode) -> Result<()> {
        if self.drag.is_active() {
            warn!("Ignoring switch to {mode} during a drag");
            return Err(GizmoError::DragInProgress);
        }

        if let Some(node) = self.target() {
            let node = node.borrow();
            if !node.supports(mode) {
                warn!("{} '{}' cannot use {mode} handles", node.kind(), node.name());
                return Err(GizmoError::ModeUnsupported {
                    mode,
                    node: node.name().to_string(),
                });
            }
        }

        self.highlight.clear(&mut self.overlay, &self.registry);
        self.mode = mode;
        self.refresh_handles();
        info!("Gizmo mode set to {mode}");
        Ok(())
    }

    /// The active mode, `None` while the attached node cannot use the
    /// requested one
    ///
    /// The request is kept and takes effect again once a supporting node is
    /// attached.
    pub fn mode(&self) -> ManipulationMode {
        let supported = self
            .target()
            .map_or(true, |node| node.borrow().supports(self.mode));
        if supported {
            self.mode
        } else {
            ManipulationMode::None
        }
    }

    /// Whether `mode` could be selected right now
    pub fn mode_available(&self, mode: ManipulationMode) -> bool {
        !self.drag.is_active()
            && self
                .target()
                .map_or(true, |node| node.borrow().supports(mode))
    }

    /// Enables exactly the current mode's handles when the target supports them
    fn refresh_handles(&mut self) {
        self.registry.disable_all(&mut self.overlay);

        let supported = self
            .target()
            .is_some_and(|node| node.borrow().supports(self.mode));
        if supported && self.mode != ManipulationMode::None {
            self.registry
                .set_mode_enabled(&mut self.overlay, self.mode, true);
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    /// Starts a drag on the hovered handle
    ///
    /// Ignored while a drag is active, without a target, or with no handle
    /// under the pointer. Returns whether a drag started.
    pub fn mouse_down(&mut self) -> bool {
        if self.drag.is_active() {
            return false;
        }
        let (Some(node), Some(mesh)) = (self.target(), self.highlight.mesh()) else {
            return false;
        };
        self.drag.begin(mesh, &node)
    }

    /// Ends the drag and notifies listeners once if it resolved and the
    /// target survived
    pub fn mouse_up(&mut self, camera: &mut dyn ViewCamera) {
        let dragged = self.target().filter(|node| self.drag.targets(node));
        let Some(completed) = self.drag.end(&mut self.overlay, &self.registry, camera) else {
            return;
        };
        let (Some(node), Some(handle), true) = (dragged, completed.handle, completed.resolved)
        else {
            debug!("Drag closed with nothing to report");
            return;
        };

        let change = completed.channel.and_then(|channel| {
            let before = completed.before?;
            let after = node.borrow().vector(channel)?;
            Some(ValueChange {
                channel,
                before,
                after,
            })
        });
        self.emit(GizmoEvent::TargetChanged {
            node,
            axis: handle.axis,
            change,
        });
    }

    /// Per-frame update: place handles, then drag or hover
    pub fn tick(&mut self, camera: &mut dyn ViewCamera, pointer: (f32, f32)) {
        self.pointer = pointer;

        let Some(node) = self.target() else {
            self.lose_target(camera);
            return;
        };
        if self.drag.is_active() && !self.drag.targets(&node) {
            debug!("Drag target replaced, cancelling drag");
            self.cancel_drag(camera);
        }

        let Some(position) = node.borrow().position() else {
            // Nothing to place handles around or pick against this frame
            self.cancel_drag(camera);
            self.highlight.clear(&mut self.overlay, &self.registry);
            return;
        };
        self.scale_sync
            .sync(&mut self.overlay, &self.registry, camera.position(), position);

        let ray = self.pointer_ray(&*camera);
        if self.drag.is_active() {
            let update = self
                .drag
                .step(&node, ray, &mut self.overlay, &self.registry, camera);
            match update {
                Some(DragUpdate::Started { axis, channel }) => {
                    self.emit(GizmoEvent::DragStarted {
                        node,
                        axis,
                        channel,
                    });
                }
                Some(DragUpdate::Moved {
                    axis,
                    channel,
                    value,
                }) => {
                    self.emit(GizmoEvent::Dragged {
                        node,
                        axis,
                        channel,
                        value,
                    });
                }
                None => {}
            }
        } else {
            let hit = ray.and_then(|ray| self.overlay.pick(&ray, self.scale_sync.shared_scale()));
            self.highlight
                .update(&mut self.overlay, &self.registry, hit.map(|h| h.mesh));
        }
    }

    /// Target gone: cancel any drag silently and hide the handles
    fn lose_target(&mut self, camera: &mut dyn ViewCamera) {
        self.cancel_drag(camera);
        self.highlight.clear(&mut self.overlay, &self.registry);
        if self.target.take().is_some() || self.registry.enabled_mode().is_some() {
            self.registry.disable_all(&mut self.overlay);
        }
    }

    /// Closes any session without a change notification
    fn cancel_drag(&mut self, camera: &mut dyn ViewCamera) {
        if self.drag.end(&mut self.overlay, &self.registry, camera).is_some() {
            debug!("Drag cancelled");
        }
    }

    fn pointer_ray(&self, camera: &dyn ViewCamera) -> Option<Ray> {
        screen_to_ray(self.pointer, camera.viewport(), camera.view_projection_matrix())
    }

    /// The handle a pointer position would pick, without touching hover state
    ///
    /// Uses handle placement from the last tick.
    pub fn handle_under_pointer(
        &self,
        camera: &dyn ViewCamera,
        pointer: (f32, f32),
    ) -> Option<HandleId> {
        let ray = screen_to_ray(pointer, camera.viewport(), camera.view_projection_matrix())?;
        let hit = self.overlay.pick(&ray, self.scale_sync.shared_scale())?;
        self.registry.resolve(hit.mesh)
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GizmoEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: GizmoEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn overlay(&self) -> &OverlayScene {
        &self.overlay
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn shared_scale(&self) -> Vector3<f32> {
        self.scale_sync.shared_scale()
    }

    /// The hovered handle
    pub fn highlighted(&self) -> Option<HandleId> {
        self.highlight.handle()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn drag_state(&self) -> Option<DragState> {
        self.drag.state()
    }
}
