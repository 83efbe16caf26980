// src/assets/model.rs
//! Binary glTF model loading
//!
//! Meshes are flattened into world space using the node hierarchy's
//! accumulated transforms, so downstream code only deals with a flat
//! list of triangle meshes plus an overall bounding box.

use std::path::Path;

use cgmath::{InnerSpace, Matrix3, Matrix4, SquareMatrix, Transform, Vector3};

use super::AssetError;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Bounds {
    /// An inverted box that any point will expand
    pub fn empty() -> Self {
        Self {
            min: Vector3::new(f32::MAX, f32::MAX, f32::MAX),
            max: Vector3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    pub fn include(&mut self, point: Vector3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Bounds after a per-axis scale about the origin
    pub fn scaled(&self, scale: Vector3<f32>) -> Self {
        Self {
            min: Vector3::new(
                self.min.x * scale.x,
                self.min.y * scale.y,
                self.min.z * scale.z,
            ),
            max: Vector3::new(
                self.max.x * scale.x,
                self.max.y * scale.y,
                self.max.z * scale.z,
            ),
        }
    }
}

/// One triangle mesh in world space
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// A loaded model: flattened meshes plus their combined bounds
#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub meshes: Vec<MeshData>,
    pub bounds: Bounds,
}

impl ModelAsset {
    /// Load a .glb file, flattening the default scene's node hierarchy
    pub fn load_glb(path: &Path) -> Result<Self, AssetError> {
        let (document, buffers, _images) =
            gltf::import(path).map_err(|source| AssetError::Gltf {
                path: path.to_path_buf(),
                source,
            })?;

        let mut meshes = Vec::new();
        let mut bounds = Bounds::empty();

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());
        if let Some(scene) = scene {
            for node in scene.nodes() {
                collect_node(&node, Matrix4::identity(), &buffers, &mut meshes, &mut bounds);
            }
        }

        if meshes.is_empty() || bounds.is_empty() {
            return Err(AssetError::EmptyModel {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { meshes, bounds })
    }
}

fn collect_node(
    node: &gltf::Node,
    parent: Matrix4<f32>,
    buffers: &[gltf::buffer::Data],
    meshes: &mut Vec<MeshData>,
    bounds: &mut Bounds,
) {
    let local: Matrix4<f32> = Matrix4::from(node.transform().matrix());
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if let Some(data) = read_primitive(&primitive, buffers, &world) {
                for p in &data.positions {
                    bounds.include(Vector3::new(p[0], p[1], p[2]));
                }
                meshes.push(data);
            }
        }
    }

    for child in node.children() {
        collect_node(&child, world, buffers, meshes, bounds);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    world: &Matrix4<f32>,
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    if positions.is_empty() {
        return None;
    }

    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|t| t.into_f32().collect())
        .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|i| i.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|n| n.collect())
        .unwrap_or_else(|| averaged_face_normals(&positions, &indices));

    // Normals use the upper 3x3 of the node transform.
    let normal_matrix = Matrix3::new(
        world.x.x, world.x.y, world.x.z,
        world.y.x, world.y.y, world.y.z,
        world.z.x, world.z.y, world.z.z,
    );

    let positions = positions
        .iter()
        .map(|p| {
            let v = world.transform_point(cgmath::Point3::new(p[0], p[1], p[2]));
            [v.x, v.y, v.z]
        })
        .collect();
    let normals = normals
        .iter()
        .map(|n| {
            let v = normal_matrix * Vector3::new(n[0], n[1], n[2]);
            let v = if v.magnitude2() > 0.0 {
                v.normalize()
            } else {
                Vector3::unit_y()
            };
            [v.x, v.y, v.z]
        })
        .collect();

    Some(MeshData {
        positions,
        normals,
        uvs,
        indices,
    })
}

/// Per-vertex normals averaged from adjacent face normals
fn averaged_face_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vector3::new(0.0f32, 0.0, 0.0); positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vector3::from(positions[a]);
        let pb = Vector3::from(positions[b]);
        let pc = Vector3::from(positions[c]);
        let face = (pb - pa).cross(pc - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }
    accum
        .into_iter()
        .map(|n| {
            if n.magnitude2() > 0.0 {
                let n = n.normalize();
                [n.x, n.y, n.z]
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounds_grow_to_include_points() {
        let mut b = Bounds::empty();
        assert!(b.is_empty());
        b.include(Vector3::new(-1.0, 2.0, 3.0));
        b.include(Vector3::new(4.0, -5.0, 0.0));
        assert!(!b.is_empty());
        assert_relative_eq!(b.min.x, -1.0);
        assert_relative_eq!(b.max.y, 2.0);
        assert_relative_eq!(b.size().z, 3.0);
        assert_relative_eq!(b.center().x, 1.5);
    }

    #[test]
    fn scaled_bounds_scale_each_axis() {
        let mut b = Bounds::empty();
        b.include(Vector3::new(-2.0, 0.0, -1.0));
        b.include(Vector3::new(2.0, 4.0, 1.0));
        let s = b.scaled(Vector3::new(0.5, 2.0, 1.0));
        assert_relative_eq!(s.min.x, -1.0);
        assert_relative_eq!(s.max.y, 8.0);
        assert_relative_eq!(s.size().z, 2.0);
    }

    #[test]
    fn face_normals_point_up_for_flat_triangle() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]];
        let normals = averaged_face_normals(&positions, &[0, 1, 2]);
        for n in normals {
            assert_relative_eq!(n[0], 0.0, epsilon = 1e-6);
            assert_relative_eq!(n[1], 1.0, epsilon = 1e-6);
            assert_relative_eq!(n[2], 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn missing_model_reports_path() {
        let err = ModelAsset::load_glb(Path::new("no/such/statue.glb")).unwrap_err();
        assert!(err.to_string().contains("statue.glb"));
    }
}
