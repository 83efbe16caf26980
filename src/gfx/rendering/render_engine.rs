// src/gfx/rendering/render_engine.rs
//! wgpu surface setup and the two-pass frame loop
//!
//! Each frame renders a depth-only shadow pass from the spotlight,
//! then the main color pass with the shadow map bound at group 3.

use std::{iter, sync::Arc};

use wgpu::TextureFormat;

use crate::gfx::{
    camera::camera_utils::CameraUniform,
    lighting::Lighting,
    resources::global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
    resources::material::{MaterialBindings, ShaderKind},
    resources::texture_resource::TextureResource,
    scene::object::DrawObject,
    scene::scene::Scene,
};
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder},
    binding_types,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SHADOW_MAP_SIZE: u32 = 2048;

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    clear_color: wgpu::Color,

    pipeline_manager: PipelineManager,
    transform_layout: wgpu::BindGroupLayout,

    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,

    shadow_map: TextureResource,
    shadow_bind_group: wgpu::BindGroup,
}

impl RenderEngine {
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: [f64; 3],
    ) -> RenderEngine {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("WGPU Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits {
                        max_texture_dimension_2d: 4096,
                        ..wgpu::Limits::downlevel_defaults()
                    },
                    memory_hints: wgpu::MemoryHints::default(),
                    trace: wgpu::Trace::Off,
                })
                .await
                .expect("Failed to request a device!")
        };

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: surface_capabilities.present_modes[0],
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        // Global uniforms shared by all pipelines.
        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        // Per-object model matrix layout (group 1).
        let transform_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Material layout (group 2); a throwaway instance supplies the
        // layout shape used by every material.
        let material_layout = MaterialBindings::new(&device)
            .bind_group_layouts()
            .clone();

        // Shadow map plus its sampling bind group (group 3).
        let shadow_map = TextureResource::create_shadow_map(&device, SHADOW_MAP_SIZE);
        let shadow_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::depth_texture_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Comparison,
            ))
            .create(&device, "Shadow Bind Group Layout");
        let shadow_bind_group = BindGroupBuilder::new(&shadow_layout)
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(&device, "Shadow Bind Group");

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("room", include_str!("room.wgsl"));
        pipeline_manager.load_shader("statue", include_str!("statue.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow_pass.wgsl"));

        pipeline_manager.register_pipeline(
            "shadow",
            PipelineConfig::default_with_shader("shadow")
                .with_label("Shadow Pipeline")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout.clone(),
                ])
                .with_cull_mode(None)
                .vertex_only(),
        );
        pipeline_manager.register_pipeline(
            "room",
            PipelineConfig::default_with_shader("room")
                .with_label("Room Pipeline")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout.clone(),
                    material_layout.clone(),
                    shadow_layout.layout.clone(),
                ])
                .with_cull_mode(None)
                .with_color_target(format),
        );
        pipeline_manager.register_pipeline(
            "statue",
            PipelineConfig::default_with_shader("statue")
                .with_label("Statue Pipeline")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_layout.clone(),
                    material_layout,
                    shadow_layout.layout.clone(),
                ])
                .with_cull_mode(None)
                .with_color_target(format),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in &errors {
                log::error!("{}", error);
            }
            panic!("Failed to create render pipelines");
        }

        RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            clear_color: wgpu::Color {
                r: clear_color[0],
                g: clear_color[1],
                b: clear_color[2],
                a: 1.0,
            },
            pipeline_manager,
            transform_layout,
            global_ubo,
            global_bindings,
            shadow_map,
            shadow_bind_group,
        }
    }

    /// Writes this frame's global uniforms
    pub fn update(&mut self, camera_uniform: CameraUniform, lighting: &Lighting, time: f32) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera_uniform,
            lighting,
            time,
        );
    }

    /// Renders the shadow pass followed by the main color pass
    pub fn render_frame(&self, scene: &Scene) {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("skipping frame, no surface texture: {}", e);
                return;
            }
        };

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(self.format),
                    ..Default::default()
                });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Shadow pass: depth only, from the spotlight.
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.pipeline("shadow") {
                shadow_pass.set_pipeline(pipeline);
                shadow_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

                for object in scene.objects.iter() {
                    if !object.visible || !object.casts_shadow {
                        continue;
                    }
                    let Some(transform_bind_group) = object.get_transform_bind_group() else {
                        continue;
                    };
                    shadow_pass.set_bind_group(1, transform_bind_group, &[]);
                    shadow_pass.draw_object(object);
                }
            }
        }

        // Main pass.
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);
            render_pass.set_bind_group(3, &self.shadow_bind_group, &[]);

            for object in scene.objects.iter() {
                if !object.visible {
                    continue;
                }
                let Some(transform_bind_group) = object.get_transform_bind_group() else {
                    continue;
                };

                let material = scene
                    .material_manager
                    .get_material_for_object(object.material_id.as_ref());
                let Some(material_bind_group) = material.get_bind_group() else {
                    continue;
                };

                let pipeline_name = match material.kind {
                    ShaderKind::Room => "room",
                    ShaderKind::Statue => "statue",
                };
                let Some(pipeline) = self.pipeline_manager.pipeline(pipeline_name) else {
                    continue;
                };

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, transform_bind_group, &[]);
                render_pass.set_bind_group(2, material_bind_group, &[]);
                render_pass.draw_object(object);
            }
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn transform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.transform_layout
    }
}
