//! # Primitive Shape Generation
//!
//! Handle shapes are authored along the canonical "up" (+Y) axis and centred
//! at the origin; the gizmo factory rotates them onto X or Z.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a cube centered at the origin
///
/// `size` is the full edge length. Each face carries its own normals.
pub fn generate_cube(size: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let h = size * 0.5;

    let positions = [
        // Front face
        [-h, -h,  h], [ h, -h,  h], [ h,  h,  h], [-h,  h,  h],
        // Back face
        [-h, -h, -h], [-h,  h, -h], [ h,  h, -h], [ h, -h, -h],
        // Left face
        [-h, -h, -h], [-h, -h,  h], [-h,  h,  h], [-h,  h, -h],
        // Right face
        [ h, -h,  h], [ h, -h, -h], [ h,  h, -h], [ h,  h,  h],
        // Top face
        [-h,  h,  h], [ h,  h,  h], [ h,  h, -h], [-h,  h, -h],
        // Bottom face
        [-h, -h, -h], [ h, -h, -h], [ h, -h,  h], [-h, -h,  h],
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|n| std::iter::repeat(*n).take(4))
        .collect();

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a cylinder along the Y axis
///
/// # Arguments
/// * `height` - Height of the cylinder (along Y)
/// * `diameter_top` - Diameter at +height/2; zero produces a cone
/// * `diameter_bottom` - Diameter at -height/2
/// * `segments` - Number of circular segments
///
/// Returns a cylinder centered at the origin extending from -height/2 to height/2 in Y.
pub fn generate_cylinder(
    height: f32,
    diameter_top: f32,
    diameter_bottom: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    let radius_top = diameter_top * 0.5;
    let radius_bottom = diameter_bottom * 0.5;
    // Side normals lean towards the narrow end
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let len = (1.0 + slope * slope).sqrt();
        let normal = [cos_a / len, slope / len, sin_a / len];

        // Bottom vertex
        data.vertices
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);

        // Top vertex
        data.vertices
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
    }

    // Side faces
    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices
            .extend_from_slice(&[bottom_current, top_current, bottom_next]);
        data.indices
            .extend_from_slice(&[top_current, top_next, bottom_next]);
    }

    if radius_bottom > 0.0 {
        push_cap(&mut data, segs, -half_height, radius_bottom, -1.0);
    }
    if radius_top > 0.0 {
        push_cap(&mut data, segs, half_height, radius_top, 1.0);
    }

    data
}

fn push_cap(data: &mut GeometryData, segs: u32, y: f32, radius: f32, facing: f32) {
    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push([0.0, facing, 0.0]);

    let rim_start = data.vertices.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        data.vertices
            .push([radius * angle.cos(), y, radius * angle.sin()]);
        data.normals.push([0.0, facing, 0.0]);
    }

    for i in 0..segs {
        let current = rim_start + i;
        let next = current + 1;
        if facing > 0.0 {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

/// Generate a torus lying in the XZ plane, around the Y axis
///
/// # Arguments
/// * `diameter` - Distance across the ring, measured through the tube centers
/// * `thickness` - Diameter of the tube
/// * `tessellation` - Segment count both around the ring and around the tube
pub fn generate_torus(diameter: f32, thickness: f32, tessellation: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let tess = tessellation.max(3);
    let radius = diameter * 0.5;
    let tube = thickness * 0.5;
    let stride = tess + 1;

    for i in 0..=tess {
        let u = i as f32 / tess as f32 * 2.0 * PI;
        let (sin_u, cos_u) = u.sin_cos();

        for j in 0..=tess {
            let v = j as f32 / tess as f32 * 2.0 * PI;
            let (sin_v, cos_v) = v.sin_cos();

            let ring = radius + tube * cos_v;
            data.vertices
                .push([ring * cos_u, tube * sin_v, ring * sin_u]);
            data.normals
                .push([cos_v * cos_u, sin_v, cos_v * sin_u]);
        }
    }

    for i in 0..tess {
        for j in 0..tess {
            let a = i * stride + j;
            let b = a + stride;

            data.indices.extend_from_slice(&[a, b, a + 1]);
            data.indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube(2.0);
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), cube.normals.len());
        assert_eq!(cube.triangle_count(), 12);

        let bounds = cube.bounds();
        assert_eq!(bounds.min.x, -1.0);
        assert_eq!(bounds.max.y, 1.0);
    }

    #[test]
    fn test_cylinder_spans_height_along_y() {
        let shaft = generate_cylinder(8.0, 0.4, 0.4, 8);
        let bounds = shaft.bounds();

        assert_eq!(bounds.min.y, -4.0);
        assert_eq!(bounds.max.y, 4.0);
        assert!((bounds.max.x - 0.2).abs() < 1e-6);
        assert!(shaft.indices.iter().all(|&i| (i as usize) < shaft.vertex_count()));
    }

    #[test]
    fn test_cone_has_apex_and_single_cap() {
        let cone = generate_cylinder(2.0, 0.0, 3.0, 8);
        let bounds = cone.bounds();

        assert!((bounds.max.x - 1.5).abs() < 1e-6);
        // Every top ring vertex collapses onto the apex
        let apex_count = cone
            .vertices
            .iter()
            .filter(|v| v[1] == 1.0 && v[0] == 0.0 && v[2] == 0.0)
            .count();
        assert_eq!(apex_count, 9);

        let full = generate_cylinder(2.0, 3.0, 3.0, 8);
        assert!(full.triangle_count() > cone.triangle_count());
    }

    #[test]
    fn test_torus_generation() {
        let ring = generate_torus(20.0, 0.75, 35);
        assert_eq!(ring.vertex_count(), 36 * 36);
        assert_eq!(ring.triangle_count(), 2 * 35 * 35);

        let bounds = ring.bounds();
        assert!((bounds.max.x - 10.375).abs() < 1e-3);
        assert!((bounds.max.y - 0.375).abs() < 1e-3);
    }
}
