//! winit input adapter
//!
//! Forwards window events to a [`GizmoManager`] and reports whether the
//! gizmo consumed them, so the host can keep a handle press away from its
//! own selection or camera logic.

use winit::event::{ElementState, MouseButton, WindowEvent};

use super::manager::GizmoManager;
use crate::gfx::camera::ViewCamera;

#[derive(Debug, Default)]
pub struct GizmoInput {
    /// A press started a drag and its release has not arrived yet
    drag_pressed: bool,
}

impl GizmoInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the gizmo consumed the event
    pub fn process_window_event(
        &mut self,
        event: &WindowEvent,
        gizmo: &mut GizmoManager,
        camera: &mut dyn ViewCamera,
    ) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(gizmo, position.x as f32, position.y as f32)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_button(gizmo, camera, *state, *button)
            }
            _ => false,
        }
    }

    /// Pointer motion is shared with the host, never consumed
    pub fn handle_cursor(&mut self, gizmo: &mut GizmoManager, x: f32, y: f32) -> bool {
        gizmo.pointer_moved(x, y);
        false
    }

    pub fn handle_button(
        &mut self,
        gizmo: &mut GizmoManager,
        camera: &mut dyn ViewCamera,
        state: ElementState,
        button: MouseButton,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }

        match state {
            ElementState::Pressed => {
                let started = gizmo.mouse_down();
                self.drag_pressed |= started;
                started
            }
            ElementState::Released => {
                gizmo.mouse_up(camera);
                std::mem::take(&mut self.drag_pressed)
            }
        }
    }
}
