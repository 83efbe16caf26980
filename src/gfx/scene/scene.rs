// src/gfx/scene/scene.rs
use wgpu::Device;

use crate::assets::ModelAsset;
use crate::config::StatuePreset;
use crate::gfx::{
    camera::camera_utils::CameraManager,
    lighting::Lighting,
    resources::material::{MaterialId, MaterialManager},
    scene::object::Mesh,
    scene::vertex::Vertex3D,
};

use super::object::Object;
use super::statue::place_on_surface;

/// A wall painting whose texture can be cycled
pub struct Painting {
    /// Index into `Scene::objects`
    pub object_index: usize,
    /// Which of the painting textures this slot currently shows
    pub texture_index: usize,
}

/// Main scene: objects, materials, camera, lights, and paintings
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub lighting: Lighting,
    paintings: Vec<Painting>,
    /// Material IDs for the painting textures, indexed by texture slot
    painting_material_ids: Vec<MaterialId>,
}

impl Scene {
    pub fn new(camera_manager: CameraManager, lighting: Lighting) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lighting,
            paintings: Vec::new(),
            painting_material_ids: Vec::new(),
        }
    }

    /// Per-frame scene update: camera matrices and light animation
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
        self.lighting.advance();
    }

    /// Adds an object and returns its index
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Declares the material IDs backing the painting texture slots
    pub fn set_painting_materials(&mut self, material_ids: Vec<MaterialId>) {
        self.painting_material_ids = material_ids;
    }

    /// Registers an object as a cyclable painting starting at the given
    /// texture slot
    pub fn register_painting(&mut self, object_index: usize, texture_index: usize) {
        if let Some(material_id) = self.painting_material_ids.get(texture_index) {
            if let Some(object) = self.objects.get_mut(object_index) {
                object.set_material(material_id.clone());
            }
        }
        self.paintings.push(Painting {
            object_index,
            texture_index,
        });
    }

    /// Advances every painting to the next texture slot, wrapping at
    /// the end of the texture list
    pub fn cycle_paintings(&mut self) {
        let count = self.painting_material_ids.len();
        if count == 0 {
            return;
        }
        for painting in &mut self.paintings {
            painting.texture_index = (painting.texture_index + 1) % count;
            let material_id = self.painting_material_ids[painting.texture_index].clone();
            if let Some(object) = self.objects.get_mut(painting.object_index) {
                object.set_material(material_id);
            }
        }
    }

    pub fn painting_texture_indices(&self) -> Vec<usize> {
        self.paintings.iter().map(|p| p.texture_index).collect()
    }

    /// Builds scene objects for a loaded statue model and places them
    /// on the display table
    pub fn attach_statue(&mut self, model: &ModelAsset, preset: &StatuePreset) -> usize {
        let placement = place_on_surface(&model.bounds, preset);

        let meshes = model
            .meshes
            .iter()
            .map(|data| {
                let vertices: Vec<Vertex3D> = (0..data.positions.len())
                    .map(|i| Vertex3D {
                        position: data.positions[i],
                        normal: data.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                        uv: data.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                    })
                    .collect();
                Mesh::new(vertices, data.indices.clone())
            })
            .collect();

        let object = Object::new("statue", meshes)
            .with_material("statue")
            .with_transform(placement.matrix());
        self.add_object(object)
    }

    /// Uploads GPU resources for all materials and objects
    ///
    /// Safe to call repeatedly; objects that already have resources are
    /// skipped, so this doubles as the late-init path for the statue.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        transform_layout: &wgpu::BindGroupLayout,
    ) {
        self.material_manager.update_all_gpu_resources(device, queue);
        for object in &mut self.objects {
            object.init_gpu_resources(device, transform_layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenePreset;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use crate::gfx::geometry::generate_plane;

    fn scene() -> Scene {
        let preset = ScenePreset::classic();
        let camera_manager = CameraManager::new(
            OrbitCamera::from_preset(&preset.camera, 1.5),
            CameraController::from_preset(&preset.camera),
        );
        Scene::new(camera_manager, Lighting::from_preset(&preset))
    }

    fn scene_with_paintings() -> Scene {
        let mut scene = scene();
        scene.set_painting_materials(vec![
            "painting_0".to_string(),
            "painting_1".to_string(),
            "painting_2".to_string(),
            "painting_3".to_string(),
        ]);
        for offset in 0..4 {
            let index = scene.add_object(Object::from_geometry(
                format!("painting_{}", offset),
                &generate_plane(8.0, 4.0),
            ));
            scene.register_painting(index, offset);
        }
        scene
    }

    #[test]
    fn paintings_start_with_distinct_textures() {
        let scene = scene_with_paintings();
        assert_eq!(scene.painting_texture_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn cycling_advances_every_painting_in_lockstep() {
        let mut scene = scene_with_paintings();
        scene.cycle_paintings();
        assert_eq!(scene.painting_texture_indices(), vec![1, 2, 3, 0]);
        scene.cycle_paintings();
        scene.cycle_paintings();
        scene.cycle_paintings();
        // Four cycles return to the initial assignment.
        assert_eq!(scene.painting_texture_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn cycling_updates_object_materials() {
        let mut scene = scene_with_paintings();
        scene.cycle_paintings();
        assert_eq!(
            scene.objects[0].material_id.as_deref(),
            Some("painting_1")
        );
    }

    #[test]
    fn cycling_with_no_paintings_is_harmless() {
        let mut scene = scene();
        scene.cycle_paintings();
        assert!(scene.painting_texture_indices().is_empty());
    }
}
