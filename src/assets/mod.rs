// src/assets/mod.rs
//! Asset loading: image textures and glTF binary models

pub mod model;
pub mod texture;

pub use model::{Bounds, MeshData, ModelAsset};
pub use texture::TextureData;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading scene assets from disk
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load model {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("model {path} contains no geometry")]
    EmptyModel { path: PathBuf },
}
