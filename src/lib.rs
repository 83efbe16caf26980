// src/lib.rs
//! Galleria
//!
//! An interactive 3D gallery room built on wgpu and winit: orbit the
//! camera around a glowing statue, click to cycle the wall paintings,
//! and adjust the lighting from the keyboard.

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod gfx;
pub mod input;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{AppOptions, GalleriaApp};

/// Creates an application instance with the given startup options
pub fn app(options: AppOptions) -> GalleriaApp {
    GalleriaApp::new(options)
}
