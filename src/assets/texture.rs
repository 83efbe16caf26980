// src/assets/texture.rs
//! CPU-side texture data
//!
//! Textures are decoded to RGBA8 on load. A missing or corrupt file is
//! not fatal; callers can fall back to a generated checkerboard so the
//! scene still renders.

use std::path::Path;

use super::AssetError;

/// Decoded RGBA8 pixel data ready for GPU upload
#[derive(Debug, Clone)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    /// Load and decode an image file to RGBA8
    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// 64x64 checkerboard with 8 pixel cells, used as a fallback
    pub fn checkerboard(color_a: [u8; 4], color_b: [u8; 4]) -> Self {
        const SIZE: u32 = 64;
        const CELL: u32 = 8;
        let mut data = Vec::with_capacity((SIZE * SIZE * 4) as usize);
        for y in 0..SIZE {
            for x in 0..SIZE {
                let even = ((x / CELL) + (y / CELL)) % 2 == 0;
                let color = if even { color_a } else { color_b };
                data.extend_from_slice(&color);
            }
        }
        Self {
            data,
            width: SIZE,
            height: SIZE,
        }
    }

    /// Single white-ish pixel for untextured materials
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            data: rgba.to_vec(),
            width: 1,
            height: 1,
        }
    }

    /// Load a texture, falling back to a magenta/black checkerboard on failure
    pub fn load_or_fallback(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("using fallback texture: {}", e);
                Self::checkerboard([255, 0, 255, 255], [0, 0, 0, 255])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_dimensions_and_size() {
        let tex = TextureData::checkerboard([255, 255, 255, 255], [0, 0, 0, 255]);
        assert_eq!(tex.width, 64);
        assert_eq!(tex.height, 64);
        assert_eq!(tex.data.len(), 64 * 64 * 4);
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = TextureData::checkerboard([255, 255, 255, 255], [0, 0, 0, 255]);
        // First cell is color_a, the cell 8 pixels over is color_b.
        assert_eq!(&tex.data[0..4], &[255, 255, 255, 255]);
        let offset = (8 * 4) as usize;
        assert_eq!(&tex.data[offset..offset + 4], &[0, 0, 0, 255]);
    }

    #[test]
    fn missing_file_falls_back() {
        let tex = TextureData::load_or_fallback(Path::new("definitely/not/here.png"));
        assert_eq!(tex.width, 64);
        assert_eq!(tex.height, 64);
    }

    #[test]
    fn solid_is_one_pixel() {
        let tex = TextureData::solid([10, 20, 30, 255]);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.data, vec![10, 20, 30, 255]);
    }
}
