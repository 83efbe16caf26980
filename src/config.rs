// src/config.rs
//! Scene presets
//!
//! All tunable scene constants live here so the builder, camera, and
//! lighting code stay free of magic numbers. Two presets ship: a warm
//! daytime gallery and a cooler evening variant.

use cgmath::{Point3, Vector3};

/// Room shell dimensions and clear color
#[derive(Debug, Clone, Copy)]
pub struct RoomPreset {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub clear_color: [f64; 3],
}

/// Orbit camera start pose, motion speeds, and clamp bounds
#[derive(Debug, Clone, Copy)]
pub struct CameraPreset {
    pub target: Point3<f32>,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub phi_min: f32,
    pub phi_max: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub angular_speed: f32,
    pub zoom_speed: f32,
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// Ambient light level plus the keyboard adjustment step and clamps
#[derive(Debug, Clone, Copy)]
pub struct AmbientPreset {
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub step: f32,
    pub min: f32,
    pub max: f32,
}

/// Sweeping spotlight parameters
///
/// The light's x position oscillates between `sweep_min` and `sweep_max`,
/// wrapping back to the minimum when it passes the maximum.
#[derive(Debug, Clone, Copy)]
pub struct SpotPreset {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
    /// Half-angle of the cone, in radians
    pub angle: f32,
    pub range: f32,
    pub sweep_speed: f32,
    pub sweep_min: f32,
    pub sweep_max: f32,
}

/// Hanging ceiling lamp: a rod, an emissive sphere, and a point light
#[derive(Debug, Clone, Copy)]
pub struct LampPreset {
    /// Ceiling attachment point; the rod hangs down from here
    pub anchor: Point3<f32>,
    pub rod_height: f32,
    pub rod_radius: f32,
    pub sphere_radius: f32,
    pub emissive_color: Vector3<f32>,
    pub emissive_intensity: f32,
    pub light_color: Vector3<f32>,
    pub light_intensity: f32,
    pub light_range: f32,
}

/// Statue placement parameters
#[derive(Debug, Clone, Copy)]
pub struct StatuePreset {
    /// Final height of the model after normalization
    pub target_height: f32,
    /// Extra horizontal stretch applied on the x axis
    pub width_factor: f32,
    /// Height of the surface the statue stands on
    pub support_height: f32,
    pub center_x: f32,
    pub center_z: f32,
}

/// Audio file names (relative to the assets directory) and volumes
#[derive(Debug, Clone)]
pub struct AudioPreset {
    pub music_file: &'static str,
    pub click_file: &'static str,
    pub music_volume: f32,
    pub click_volume: f32,
}

/// A complete, self-consistent set of scene constants
#[derive(Debug, Clone)]
pub struct ScenePreset {
    pub name: &'static str,
    pub room: RoomPreset,
    pub camera: CameraPreset,
    pub ambient: AmbientPreset,
    pub spot: SpotPreset,
    pub lamp: LampPreset,
    pub statue: StatuePreset,
    pub audio: AudioPreset,
}

impl ScenePreset {
    /// Warm daytime gallery
    pub fn classic() -> Self {
        Self {
            name: "classic",
            room: RoomPreset {
                width: 20.0,
                depth: 20.0,
                height: 6.0,
                clear_color: [0.667, 0.667, 0.667],
            },
            camera: CameraPreset {
                target: Point3::new(0.0, 1.0, -2.0),
                radius: 8.0,
                theta: 0.0,
                phi: 0.2,
                phi_min: -0.117,
                phi_max: 1.1,
                radius_min: 2.0,
                radius_max: 8.3,
                angular_speed: 0.015,
                zoom_speed: 0.2,
                fovy_deg: 75.0,
                znear: 0.1,
                zfar: 1000.0,
            },
            ambient: AmbientPreset {
                color: Vector3::new(1.0, 0.973, 0.906),
                intensity: 0.9,
                step: 0.1,
                min: 0.0,
                max: 2.0,
            },
            spot: SpotPreset {
                position: Point3::new(-5.0, 5.0, 5.0),
                // Aimed at the display table rather than the room origin.
                target: Point3::new(0.0, 0.0, -3.0),
                color: Vector3::new(0.678, 0.757, 0.471),
                intensity: 0.7,
                angle: std::f32::consts::PI / 5.0,
                range: 15.0,
                sweep_speed: 0.07,
                sweep_min: -3.0,
                sweep_max: 3.0,
            },
            lamp: LampPreset {
                anchor: Point3::new(0.0, 6.0, -3.0),
                rod_height: 1.0,
                rod_radius: 0.05,
                sphere_radius: 0.4,
                emissive_color: Vector3::new(1.0, 0.914, 0.690),
                emissive_intensity: 0.6,
                light_color: Vector3::new(0.118, 0.565, 1.0),
                light_intensity: 0.25,
                light_range: 6.0,
            },
            statue: StatuePreset {
                target_height: 2.5,
                width_factor: 1.2,
                support_height: 0.5,
                center_x: 0.0,
                center_z: -3.0,
            },
            audio: AudioPreset {
                music_file: "piano.wav",
                click_file: "click.wav",
                music_volume: 0.15,
                click_volume: 0.5,
            },
        }
    }

    /// Cooler evening variant: dimmer ambient, bluer light, closer camera
    pub fn dusk() -> Self {
        let mut preset = Self::classic();
        preset.name = "dusk";
        preset.room.clear_color = [0.18, 0.20, 0.28];
        preset.camera.radius = 6.5;
        preset.camera.phi = 0.35;
        preset.ambient.color = Vector3::new(0.75, 0.80, 0.95);
        preset.ambient.intensity = 0.45;
        preset.spot.color = Vector3::new(0.95, 0.80, 0.55);
        preset.spot.intensity = 0.9;
        preset.lamp.light_intensity = 0.5;
        preset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_bounds_contain_start_pose() {
        let p = ScenePreset::classic();
        assert!(p.camera.phi >= p.camera.phi_min && p.camera.phi <= p.camera.phi_max);
        assert!(p.camera.radius >= p.camera.radius_min && p.camera.radius <= p.camera.radius_max);
    }

    #[test]
    fn presets_keep_sweep_window_ordered() {
        for p in [ScenePreset::classic(), ScenePreset::dusk()] {
            assert!(p.spot.sweep_min < p.spot.sweep_max, "{}", p.name);
            assert!(p.ambient.min <= p.ambient.intensity, "{}", p.name);
            assert!(p.ambient.intensity <= p.ambient.max, "{}", p.name);
        }
    }
}
