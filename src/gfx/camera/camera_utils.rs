use cgmath::{Matrix4, SquareMatrix, Vector3};

/// The camera surface the gizmo needs from its host
///
/// The overlay reuses the main scene camera: it reads the eye position for
/// the constant-size scaling, the view-projection and viewport for picking,
/// and toggles input control so a handle drag does not also move the view.
pub trait ViewCamera {
    /// Eye position in world space
    fn position(&self) -> Vector3<f32>;

    /// World to wgpu clip space
    fn view_projection_matrix(&self) -> Matrix4<f32>;

    /// Viewport size in physical pixels
    fn viewport(&self) -> (f32, f32);

    fn attach_control(&mut self);

    fn detach_control(&mut self);

    fn is_control_attached(&self) -> bool;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Snapshot any [ViewCamera] for upload.
    pub fn from_camera(camera: &dyn ViewCamera) -> Self {
        let eye = camera.position();
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(camera.view_projection_matrix()),
        }
    }
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}
