//! # Ray Casting Primitives
//!
//! Everything the gizmo needs to turn a 2D pointer into 3D answers:
//!
//! 1. **Pointer to Ray**: unproject screen coordinates through the inverse view-projection
//! 2. **Ray-Shape Intersection**: bounding boxes for early-out, triangles for exact hits
//! 3. **Ray-Plane Intersection**: converts pointer motion into a world-space point while dragging
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use manipulator::gfx::picking::{Plane, Ray};
//!
//! let plane = Plane::from_point_normal(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
//! let ray = Ray::new(Vector3::new(2.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
//! assert_eq!(plane.intersect_ray(&ray), Some(Vector3::new(2.0, 0.0, 0.0)));
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

/// Below this |normal . direction| a ray is treated as parallel to a plane
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::from(vertices[0]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::from(*vertex);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            [self.min.x, self.min.y, self.min.z],
            [self.max.x, self.min.y, self.min.z],
            [self.min.x, self.max.y, self.min.z],
            [self.min.x, self.min.y, self.max.z],
            [self.max.x, self.max.y, self.min.z],
            [self.max.x, self.min.y, self.max.z],
            [self.min.x, self.max.y, self.max.z],
            [self.max.x, self.max.y, self.max.z],
        ];

        let transformed: Vec<[f32; 3]> = corners
            .iter()
            .map(|c| {
                let p = matrix * Vector4::new(c[0], c[1], c[2], 1.0);
                [p.x / p.w, p.y / p.w, p.z / p.w]
            })
            .collect();

        Self::from_vertices(&transformed)
    }
}

/// An infinite plane: every point p with `normal . p + d == 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vector3<f32>,
    /// Signed offset from the origin along `-normal`
    pub d: f32,
}

impl Plane {
    /// Plane through `point` facing `normal` (normalized here)
    pub fn from_point_normal(point: Vector3<f32>, normal: Vector3<f32>) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Signed distance from the plane, positive on the normal's side
    pub fn signed_distance(&self, point: Vector3<f32>) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// World point where the ray meets the plane
    ///
    /// `None` when the ray is parallel to the plane or the plane lies behind
    /// the ray origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vector3<f32>> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -self.signed_distance(ray.origin) / denom;
        if t < 0.0 {
            return None;
        }

        Some(ray.point_at(t))
    }
}

/// Möller–Trumbore ray-triangle test, double sided
///
/// Returns the distance along the ray to the hit.
pub fn intersect_triangle(
    ray: &Ray,
    v0: Vector3<f32>,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
) -> Option<f32> {
    const EPSILON: f32 = 1e-9;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Parallel or degenerate
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Convert screen coordinates to a world-space ray
///
/// `view_proj` maps world space to wgpu clip space (depth 0..1). Returns
/// `None` when the matrix cannot be inverted or the viewport is empty.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    view_proj: Matrix4<f32>,
) -> Option<Ray> {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return None;
    }

    // Convert screen coordinates to normalized device coordinates (-1 to 1)
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

    let inv_view_proj = view_proj.invert()?;

    // Transform near and far points from NDC to world space
    let world_near = inv_view_proj * Vector4::new(ndc_x, ndc_y, 0.0, 1.0);
    let world_far = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
    if world_near.w == 0.0 || world_far.w == 0.0 {
        return None;
    }

    let near_3d = world_near.truncate() / world_near.w;
    let far_3d = world_far.truncate() / world_far.w;

    let direction = far_3d - near_3d;
    if direction.magnitude2() == 0.0 {
        return None;
    }
    Some(Ray::new(near_3d, direction))
}

/// Project a world point to screen coordinates
///
/// Inverse of [`screen_to_ray`]; `None` for points behind the camera.
pub fn world_to_screen(
    point: Vector3<f32>,
    screen_size: (f32, f32),
    view_proj: Matrix4<f32>,
) -> Option<(f32, f32)> {
    let clip = view_proj * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    Some((
        (ndc_x + 1.0) * 0.5 * screen_size.0,
        (1.0 - ndc_y) * 0.5 * screen_size.1,
    ))
}
