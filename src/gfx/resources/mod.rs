// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles textures, materials, and bind groups for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use material::{Material, MaterialBindings, MaterialId, MaterialManager, ShaderKind};
pub use texture_resource::TextureResource;
