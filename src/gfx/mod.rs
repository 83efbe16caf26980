// src/gfx/mod.rs
//! Graphics: camera, geometry, lighting, scene, and rendering

pub mod camera;
pub mod geometry;
pub mod lighting;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::{CameraController, CameraManager, OrbitCamera};
pub use lighting::Lighting;
pub use rendering::RenderEngine;
pub use scene::Scene;
