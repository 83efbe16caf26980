// src/gfx/scene/statue.rs
//! Statue normalization
//!
//! Loaded models arrive at arbitrary sizes and offsets. The placement
//! computed here rescales the model to a fixed display height, widens
//! it slightly on the x axis, and positions it so its lowest point
//! rests exactly on the display surface, centered over the table.

use cgmath::{Matrix4, Vector3};

use crate::assets::Bounds;
use crate::config::StatuePreset;

/// Scale and translation that normalize a model into display position
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub scale: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl Placement {
    /// Model matrix applying the scale first, then the translation
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// Computes the placement that stands a model on a support surface
///
/// Degenerate models with no vertical extent keep unit scale so the
/// division below cannot blow up.
pub fn place_on_surface(bounds: &Bounds, preset: &StatuePreset) -> Placement {
    let size = bounds.size();
    let s = if size.y > 0.0 {
        preset.target_height / size.y
    } else {
        1.0
    };
    let scale = Vector3::new(preset.width_factor * s, s, s);

    let scaled = bounds.scaled(scale);
    let translation = Vector3::new(
        preset.center_x - scaled.center().x,
        preset.support_height - scaled.min.y,
        preset.center_z - scaled.center().z,
    );

    Placement { scale, translation }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds(min: [f32; 3], max: [f32; 3]) -> Bounds {
        let mut b = Bounds::empty();
        b.include(Vector3::from(min));
        b.include(Vector3::from(max));
        b
    }

    fn preset() -> StatuePreset {
        crate::config::ScenePreset::classic().statue
    }

    #[test]
    fn scaled_model_reaches_target_height() {
        let p = preset();
        let placement = place_on_surface(&bounds([-1.0, 0.0, -1.0], [1.0, 5.0, 1.0]), &p);
        let scaled_height = 5.0 * placement.scale.y;
        assert_relative_eq!(scaled_height, p.target_height, epsilon = 1e-6);
        assert_relative_eq!(
            placement.scale.x,
            placement.scale.y * p.width_factor,
            epsilon = 1e-6
        );
    }

    #[test]
    fn lowest_point_rests_on_support() {
        let p = preset();
        // Model floating well above the origin.
        let b = bounds([-2.0, 3.0, -1.0], [2.0, 9.0, 1.0]);
        let placement = place_on_surface(&b, &p);
        let placed_min_y = b.min.y * placement.scale.y + placement.translation.y;
        assert_relative_eq!(placed_min_y, p.support_height, epsilon = 1e-6);
    }

    #[test]
    fn model_is_centered_horizontally() {
        let p = preset();
        // Model offset far from the origin.
        let b = bounds([10.0, 0.0, 20.0], [14.0, 2.0, 26.0]);
        let placement = place_on_surface(&b, &p);
        let center_x = (b.min.x + b.max.x) * 0.5 * placement.scale.x + placement.translation.x;
        let center_z = (b.min.z + b.max.z) * 0.5 * placement.scale.z + placement.translation.z;
        assert_relative_eq!(center_x, p.center_x, epsilon = 1e-5);
        assert_relative_eq!(center_z, p.center_z, epsilon = 1e-5);
    }

    #[test]
    fn flat_model_keeps_unit_scale() {
        let placement = place_on_surface(&bounds([-1.0, 2.0, -1.0], [1.0, 2.0, 1.0]), &preset());
        assert_relative_eq!(placement.scale.y, 1.0);
    }

    #[test]
    fn matrix_scales_before_translating() {
        let placement = Placement {
            scale: Vector3::new(2.0, 2.0, 2.0),
            translation: Vector3::new(1.0, 0.0, 0.0),
        };
        let m = placement.matrix();
        let p = m * cgmath::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 3.0); // 1 * 2 + 1
    }
}
