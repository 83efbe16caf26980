//! # Primitive Shape Generation
//!
//! All shapes are generated with normals and texture coordinates in a
//! Y-up coordinate system. Flat shapes (plane, circle) face positive Z
//! and are rotated into place by the object transform.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate an axis-aligned box centered at the origin
///
/// Each face has outward normals and UV coordinates from 0 to 1.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = [
        // Front face
        [-hw, -hh,  hd], [ hw, -hh,  hd], [ hw,  hh,  hd], [-hw,  hh,  hd],
        // Back face
        [-hw, -hh, -hd], [-hw,  hh, -hd], [ hw,  hh, -hd], [ hw, -hh, -hd],
        // Left face
        [-hw, -hh, -hd], [-hw, -hh,  hd], [-hw,  hh,  hd], [-hw,  hh, -hd],
        // Right face
        [ hw, -hh,  hd], [ hw, -hh, -hd], [ hw,  hh, -hd], [ hw,  hh,  hd],
        // Top face
        [-hw,  hh,  hd], [ hw,  hh,  hd], [ hw,  hh, -hd], [-hw,  hh, -hd],
        // Bottom face
        [-hw, -hh, -hd], [ hw, -hh, -hd], [ hw, -hh,  hd], [-hw, -hh,  hd],
    ];

    let tex_coords = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = normals.to_vec();

    // 2 counter-clockwise triangles per face
    data.indices = vec![
        0, 1, 2,    2, 3, 0,
        4, 5, 6,    6, 7, 4,
        8, 9, 10,   10, 11, 8,
        12, 13, 14, 14, 15, 12,
        16, 17, 18, 18, 19, 16,
        20, 21, 22, 22, 23, 20,
    ];

    data
}

/// Generate a single quad in the XY plane facing positive Z
pub fn generate_plane(width: f32, height: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh) = (width * 0.5, height * 0.5);

    data.vertices = vec![
        [-hw, -hh, 0.0],
        [hw, -hh, 0.0],
        [hw, hh, 0.0],
        [-hw, hh, 0.0],
    ];
    data.normals = vec![[0.0, 0.0, 1.0]; 4];
    data.tex_coords = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

/// Generate a triangle fan disc in the XY plane facing positive Z
pub fn generate_circle(radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    data.vertices.push([0.0, 0.0, 0.0]);
    data.normals.push([0.0, 0.0, 1.0]);
    data.tex_coords.push([0.5, 0.5]);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push([radius * cos_a, radius * sin_a, 0.0]);
        data.normals.push([0.0, 0.0, 1.0]);
        data.tex_coords
            .push([0.5 + 0.5 * cos_a, 0.5 - 0.5 * sin_a]);
    }

    for i in 1..=segs {
        data.indices.push(0);
        data.indices.push(i);
        data.indices.push(i + 1);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]); // unit sphere: normal equals position

            let u = long as f32 / long_segs as f32;
            let v = lat as f32 / lat_segs as f32;
            data.tex_coords.push([u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a cylinder extruded along Y, optionally tapered
///
/// # Arguments
/// * `radius_top` - Radius at the top rim (0 produces a cone)
/// * `radius_bottom` - Radius at the bottom rim
/// * `height` - Height along the Y axis
/// * `segments` - Number of circular segments
///
/// Returns a cylinder centered at the origin extending from -height/2
/// to height/2 in Y. Caps are skipped for rims with zero radius.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side normals tilt with the taper.
    let slope = (radius_bottom - radius_top) / height;
    let normal_scale = 1.0 / (1.0 + slope * slope).sqrt();

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let normal = [
            cos_a * normal_scale,
            slope * normal_scale,
            sin_a * normal_scale,
        ];

        data.vertices
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([i as f32 / segs as f32, 1.0]);

        data.vertices
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([i as f32 / segs as f32, 0.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(bottom_next);
        data.indices.push(top_current);

        data.indices.push(top_current);
        data.indices.push(bottom_next);
        data.indices.push(top_next);
    }

    if radius_bottom > 0.0 {
        let center = data.vertices.len() as u32;
        data.vertices.push([0.0, -half_height, 0.0]);
        data.normals.push([0.0, -1.0, 0.0]);
        data.tex_coords.push([0.5, 0.5]);

        for i in 0..segs {
            data.indices.push(center);
            data.indices.push(i * 2);
            data.indices.push((i + 1) * 2);
        }
    }

    if radius_top > 0.0 {
        let center = data.vertices.len() as u32;
        data.vertices.push([0.0, half_height, 0.0]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.tex_coords.push([0.5, 0.5]);

        for i in 0..segs {
            data.indices.push(center);
            data.indices.push((i + 1) * 2 + 1);
            data.indices.push(i * 2 + 1);
        }
    }

    data
}

/// Generate a cone pointing up along Y
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    generate_cylinder(0.0, radius, height, segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_box_dimensions() {
        let table = generate_box(4.0, 0.5, 2.0);
        for v in &table.vertices {
            assert!(v[0].abs() <= 2.0 + 1e-6);
            assert!(v[1].abs() <= 0.25 + 1e-6);
            assert!(v[2].abs() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(8.0, 4.0);
        assert_eq!(plane.vertices.len(), 4);
        assert_eq!(plane.triangle_count(), 2);
        for n in &plane.normals {
            assert_eq!(*n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_circle_generation() {
        let circle = generate_circle(3.0, 32);
        assert_eq!(circle.vertices.len(), 34); // center + 33 rim vertices
        assert_eq!(circle.triangle_count(), 32);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
    }

    #[test]
    fn test_cylinder_has_both_caps() {
        let cyl = generate_cylinder(0.5, 0.5, 2.0, 8);
        // 9 rim pairs + 2 cap centers
        assert_eq!(cyl.vertices.len(), 9 * 2 + 2);
        // 8 side quads + 2 * 8 cap triangles
        assert_eq!(cyl.triangle_count(), 16 + 16);
    }

    #[test]
    fn test_cone_skips_top_cap() {
        let cone = generate_cone(0.35, 0.6, 8);
        assert_eq!(cone.vertices.len(), 9 * 2 + 1); // bottom cap center only
        assert_eq!(cone.triangle_count(), 16 + 8);
    }
}
