use log::debug;
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::{camera_utils::ViewCamera, orbit_camera::OrbitCamera};

/// Orbit/pan/zoom from raw device input
///
/// Input is dropped while the camera's control is detached, which is how a
/// gizmo drag keeps the view still.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Returns true when the camera moved and the host should redraw.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        // Button state is tracked regardless so a release during a drag is not lost
        if let DeviceEvent::Button {
            button: 0, // Left Mouse Button
            state,
        } = event
        {
            self.is_mouse_pressed = *state == ElementState::Pressed;
            return false;
        }

        if !camera.is_control_attached() {
            return false;
        }

        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_shift_held {
                    // SHIFT + DRAG = PAN (move focus point)
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    // NORMAL DRAG = ROTATE (orbit around focus)
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                // Shift+C resets the view
                if self.is_shift_held && camera.is_control_attached() {
                    debug!("Resetting camera to default position");
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held
    }

    /// Adjust panning sensitivity
    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    fn press(controller: &mut CameraController, camera: &mut OrbitCamera) {
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            camera,
        );
    }

    #[test]
    fn test_drag_rotates_attached_camera() {
        let mut camera = OrbitCamera::new(10.0, 0.5, 0.7, Vector3::zero(), (800.0, 600.0));
        let mut controller = CameraController::new(0.01, 1.0);
        press(&mut controller, &mut camera);
        assert!(controller.is_rotating());

        let moved = controller.process_events(
            &DeviceEvent::MouseMotion {
                delta: (10.0, 0.0),
            },
            &mut camera,
        );

        assert!(moved);
        assert!((camera.yaw - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_detached_camera_ignores_motion() {
        let mut camera = OrbitCamera::new(10.0, 0.5, 0.7, Vector3::zero(), (800.0, 600.0));
        let mut controller = CameraController::new(0.01, 1.0);
        press(&mut controller, &mut camera);
        camera.detach_control();

        let eye = camera.eye;
        let moved = controller.process_events(
            &DeviceEvent::MouseMotion {
                delta: (25.0, -14.0),
            },
            &mut camera,
        );

        assert!(!moved);
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn test_motion_without_button_does_nothing() {
        let mut camera = OrbitCamera::new(10.0, 0.5, 0.7, Vector3::zero(), (800.0, 600.0));
        let mut controller = CameraController::new(0.01, 1.0);

        let moved = controller.process_events(
            &DeviceEvent::MouseMotion { delta: (5.0, 5.0) },
            &mut camera,
        );
        assert!(!moved);
    }
}
