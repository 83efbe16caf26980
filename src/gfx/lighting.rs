// src/gfx/lighting.rs
//! Scene lighting state
//!
//! Three lights: an adjustable ambient term, a spotlight that sweeps
//! back and forth across the room, and the hanging lamp's point light.
//! All state lives on the CPU and is packed into the global uniform
//! each frame.

use cgmath::{perspective, EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Vector3};

use crate::config::{AmbientPreset, LampPreset, ScenePreset, SpotPreset};
use crate::gfx::camera::OPENGL_TO_WGPU_MATRIX;

/// Flat ambient term with keyboard-adjustable intensity
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub step: f32,
    pub min: f32,
    pub max: f32,
}

impl AmbientLight {
    pub fn from_preset(preset: &AmbientPreset) -> Self {
        Self {
            color: preset.color,
            intensity: preset.intensity,
            step: preset.step,
            min: preset.min,
            max: preset.max,
        }
    }

    pub fn adjust(&mut self, delta: f32) {
        self.intensity = (self.intensity + delta).clamp(self.min, self.max);
    }

    pub fn brighten(&mut self) {
        self.adjust(self.step);
    }

    pub fn dim(&mut self) {
        self.adjust(-self.step);
    }
}

/// Spotlight whose x position sweeps between two bounds
///
/// The sweep advances once per frame and wraps back to the minimum
/// after passing the maximum, so the light never reverses direction.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub angle: f32,
    pub range: f32,
    pub sweep_speed: f32,
    pub sweep_min: f32,
    pub sweep_max: f32,
}

impl SpotLight {
    pub fn from_preset(preset: &SpotPreset) -> Self {
        Self {
            position: preset.position,
            target: preset.target,
            color: preset.color,
            intensity: preset.intensity,
            angle: preset.angle,
            range: preset.range,
            sweep_speed: preset.sweep_speed,
            sweep_min: preset.sweep_min,
            sweep_max: preset.sweep_max,
        }
    }

    pub fn advance_sweep(&mut self) {
        self.position.x += self.sweep_speed;
        if self.position.x > self.sweep_max {
            self.position.x = self.sweep_min;
        }
    }

    pub fn direction(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    /// View-projection from the light's point of view, for shadow mapping
    pub fn view_proj(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y());
        let proj = OPENGL_TO_WGPU_MATRIX
            * perspective(Rad(self.angle * 2.0), 1.0, 0.5, self.range.max(1.0));
        proj * view
    }
}

/// Small point light inside the hanging lamp's sphere
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub range: f32,
}

impl PointLight {
    pub fn from_preset(preset: &LampPreset) -> Self {
        // The light sits at the center of the lamp sphere.
        let position = Point3::from_vec(
            preset.anchor.to_vec()
                + Vector3::new(0.0, -(preset.rod_height + preset.sphere_radius), 0.0),
        );
        Self {
            position,
            color: preset.light_color,
            intensity: preset.light_intensity,
            range: preset.light_range,
        }
    }
}

/// All lights in the scene
pub struct Lighting {
    pub ambient: AmbientLight,
    pub spot: SpotLight,
    pub lamp: PointLight,
}

impl Lighting {
    pub fn from_preset(preset: &ScenePreset) -> Self {
        Self {
            ambient: AmbientLight::from_preset(&preset.ambient),
            spot: SpotLight::from_preset(&preset.spot),
            lamp: PointLight::from_preset(&preset.lamp),
        }
    }

    /// Per-frame animation step
    pub fn advance(&mut self) {
        self.spot.advance_sweep();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lighting() -> Lighting {
        Lighting::from_preset(&ScenePreset::classic())
    }

    #[test]
    fn ambient_intensity_clamps_at_both_ends() {
        let mut l = lighting();
        for _ in 0..100 {
            l.ambient.brighten();
        }
        assert_relative_eq!(l.ambient.intensity, l.ambient.max);
        for _ in 0..100 {
            l.ambient.dim();
        }
        assert_relative_eq!(l.ambient.intensity, l.ambient.min);
        l.ambient.brighten();
        assert_relative_eq!(l.ambient.intensity, l.ambient.min + l.ambient.step);
    }

    #[test]
    fn spot_sweep_wraps_to_minimum() {
        let mut l = lighting();
        let start_x = l.spot.position.x;
        l.advance();
        assert_relative_eq!(l.spot.position.x, start_x + l.spot.sweep_speed);

        // Run well past one full sweep: the light may start outside the
        // window but must never overshoot the maximum, and must wrap at
        // least once.
        let mut wrapped = false;
        for _ in 0..1000 {
            let before = l.spot.position.x;
            l.advance();
            assert!(l.spot.position.x <= l.spot.sweep_max + 1e-6);
            if l.spot.position.x < before {
                wrapped = true;
                assert_relative_eq!(l.spot.position.x, l.spot.sweep_min);
            }
        }
        assert!(wrapped);
    }

    #[test]
    fn spot_direction_is_unit_length() {
        let l = lighting();
        assert_relative_eq!(l.spot.direction().magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn lamp_light_sits_below_anchor() {
        let preset = ScenePreset::classic();
        let lamp = PointLight::from_preset(&preset.lamp);
        let expected_y =
            preset.lamp.anchor.y - preset.lamp.rod_height - preset.lamp.sphere_radius;
        assert_relative_eq!(lamp.position.y, expected_y);
        assert_relative_eq!(lamp.position.x, preset.lamp.anchor.x);
    }
}
