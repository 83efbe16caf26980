//! Material system
//!
//! Materials pair a shader kind with a texture, a tint, an emissive
//! term, and a UV tiling factor. They are stored centrally in
//! MaterialManager and objects reference them by ID, so swapping the
//! painting textures is just a matter of reassigning IDs.

use std::collections::HashMap;
use wgpu::Device;

use crate::assets::TextureData;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

use super::texture_resource::TextureResource;

/// Material ID for referencing materials
pub type MaterialId = String;

/// Which pipeline draws surfaces using this material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// Lit and shadowed room surfaces
    Room,
    /// Pulsing glow shader used by the statue
    Statue,
}

/// GPU uniform data for materials
///
/// `params.xy` holds the UV tiling factors; `params.zw` are reserved.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
    pub params: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Filtering,
            ))
            .create(device, "Material Bind Group Layout");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(
        &mut self,
        device: &Device,
        ubo: &MaterialUBO,
        texture: &TextureResource,
    ) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Material definition
///
/// Contains surface properties and GPU resources. Materials are stored
/// centrally in MaterialManager and shared between objects.
pub struct Material {
    pub name: String,
    pub kind: ShaderKind,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub uv_scale: [f32; 2],
    pub texture: Option<TextureData>,

    // GPU resources, shared by all objects using this material
    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
    texture_resource: Option<TextureResource>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            kind: ShaderKind::Room,
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            uv_scale: [1.0, 1.0],
            texture: None,
            material_ubo: None,
            material_bindings: None,
            texture_resource: None,
        }
    }
}

impl Material {
    /// Creates a textured material
    pub fn textured(name: &str, kind: ShaderKind, texture: TextureData) -> Self {
        Self {
            name: name.to_string(),
            kind,
            texture: Some(texture),
            ..Default::default()
        }
    }

    /// Creates a flat-colored material with no texture
    pub fn colored(name: &str, kind: ShaderKind, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            base_color,
            ..Default::default()
        }
    }

    /// Builder pattern: set emissive color and strength
    pub fn with_emissive(mut self, color: [f32; 3], intensity: f32) -> Self {
        self.emissive = color;
        self.emissive_intensity = intensity;
        self
    }

    /// Builder pattern: set UV tiling factors
    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = [u, v];
        self
    }

    /// Replaces the texture; GPU resources are rebuilt on the next
    /// `update_gpu_resources` call
    pub fn set_texture(&mut self, texture: TextureData) {
        self.texture = Some(texture);
        self.texture_resource = None;
        self.material_bindings = None;
    }

    /// Creates or refreshes GPU resources for this material
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        if self.texture_resource.is_none() {
            let resource = match &self.texture {
                Some(texture) => TextureResource::create_from_rgba_data(
                    device,
                    queue,
                    &texture.data,
                    texture.width,
                    texture.height,
                    &self.name,
                ),
                None => {
                    let white = TextureData::solid([255, 255, 255, 255]);
                    TextureResource::create_from_rgba_data(
                        device,
                        queue,
                        &white.data,
                        white.width,
                        white.height,
                        &self.name,
                    )
                }
            };
            self.texture_resource = Some(resource);
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            bindings.create_bind_group(
                device,
                self.material_ubo.as_ref().expect("ubo created above"),
                self.texture_resource
                    .as_ref()
                    .expect("texture created above"),
            );
            self.material_bindings = Some(bindings);
        }

        let uniform_data = MaterialUniform {
            base_color: self.base_color,
            emissive: [
                self.emissive[0] * self.emissive_intensity,
                self.emissive[1] * self.emissive_intensity,
                self.emissive[2] * self.emissive_intensity,
                1.0,
            ],
            params: [self.uv_scale[0], self.uv_scale[1], 0.0, 0.0],
        };

        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings.as_ref().map(|b| b.bind_groups())
    }
}

/// Manages all materials in the scene
///
/// Centralized storage for all materials. Objects reference materials
/// by ID rather than storing material data directly, enabling sharing
/// of GPU resources between objects.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };

        manager
            .materials
            .insert("default".to_string(), Material::default());

        manager
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_default_material(&self) -> &Material {
        self.materials.get(&self.default_material_id).unwrap()
    }

    /// Gets material for an object with fallback to default
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue);
        }
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_falls_back_to_default() {
        let manager = MaterialManager::new();
        let missing = "granite".to_string();
        let material = manager.get_material_for_object(Some(&missing));
        assert_eq!(material.name, "default");
        let material = manager.get_material_for_object(None);
        assert_eq!(material.name, "default");
    }

    #[test]
    fn added_materials_are_found_by_name() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::colored(
            "rug",
            ShaderKind::Room,
            [0.6, 0.2, 0.2, 1.0],
        ));
        let id = "rug".to_string();
        assert_eq!(manager.get_material_for_object(Some(&id)).name, "rug");
    }

    #[test]
    fn material_uniform_is_three_vec4s() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    }

    #[test]
    fn set_texture_invalidates_gpu_state() {
        let mut material = Material::colored("wall", ShaderKind::Room, [1.0; 4]);
        material.set_texture(TextureData::solid([1, 2, 3, 255]));
        assert!(material.texture.is_some());
        assert!(material.get_bind_group().is_none());
    }
}
