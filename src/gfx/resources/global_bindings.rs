//! Global uniform bindings for camera, lighting, and time
//!
//! Manages the per-frame uniform buffer shared by every pipeline:
//! camera matrices, the three lights, the spotlight's shadow matrix,
//! and the animation clock driving the statue glow.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    gfx::lighting::Lighting,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in the shaders exactly. Light colors
/// and positions are packed as vec3 plus a scalar so every field lands
/// on a 16 byte boundary.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],

    ambient_color: [f32; 3],
    ambient_intensity: f32,

    spot_position: [f32; 3],
    spot_intensity: f32,

    spot_direction: [f32; 3],
    spot_cos_cutoff: f32,

    spot_color: [f32; 3],
    spot_range: f32,

    lamp_position: [f32; 3],
    lamp_intensity: f32,

    lamp_color: [f32; 3],
    lamp_range: f32,

    time: f32,
    _padding: [f32; 3],
}
// Total: 16 + 64 + 64 + 6 * 16 + 16 = 256 bytes

unsafe impl bytemuck::Pod for GlobalUBOContent {}
unsafe impl bytemuck::Zeroable for GlobalUBOContent {}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer for this frame
///
/// Called once per frame before encoding the render passes.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &Lighting,
    time: f32,
) {
    let spot_direction = lighting.spot.direction();

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        light_view_proj: lighting.spot.view_proj().into(),

        ambient_color: lighting.ambient.color.into(),
        ambient_intensity: lighting.ambient.intensity,

        spot_position: lighting.spot.position.into(),
        spot_intensity: lighting.spot.intensity,

        spot_direction: spot_direction.into(),
        spot_cos_cutoff: lighting.spot.angle.cos(),

        spot_color: lighting.spot.color.into(),
        spot_range: lighting.spot.range,

        lamp_position: lighting.lamp.position.into(),
        lamp_intensity: lighting.lamp.intensity,

        lamp_color: lighting.lamp.color.into(),
        lamp_range: lighting.lamp.range,

        time,
        _padding: [0.0; 3],
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called before any rendering that needs global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_struct_is_256_bytes() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 256);
    }
}
