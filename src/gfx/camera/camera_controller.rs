// src/gfx/camera/camera_controller.rs
use winit::keyboard::KeyCode;

use crate::config::CameraPreset;
use crate::input::InputState;

use super::orbit_camera::OrbitCamera;

/// Maps held keys to per-frame orbit increments
///
/// A/D orbit left/right, W/S tilt up/down, Q/E zoom in/out. Increments
/// are applied once per frame for every key currently held, so holding
/// two keys moves along both axes at once.
pub struct CameraController {
    pub angular_speed: f32,
    pub zoom_speed: f32,
}

impl CameraController {
    pub fn new(angular_speed: f32, zoom_speed: f32) -> Self {
        Self {
            angular_speed,
            zoom_speed,
        }
    }

    pub fn from_preset(preset: &CameraPreset) -> Self {
        Self::new(preset.angular_speed, preset.zoom_speed)
    }

    pub fn update(&self, input: &InputState, camera: &mut OrbitCamera) {
        if input.is_held(KeyCode::KeyA) {
            camera.add_theta(-self.angular_speed);
        }
        if input.is_held(KeyCode::KeyD) {
            camera.add_theta(self.angular_speed);
        }
        if input.is_held(KeyCode::KeyW) {
            camera.add_phi(self.angular_speed);
        }
        if input.is_held(KeyCode::KeyS) {
            camera.add_phi(-self.angular_speed);
        }
        if input.is_held(KeyCode::KeyQ) {
            camera.add_radius(-self.zoom_speed);
        }
        if input.is_held(KeyCode::KeyE) {
            camera.add_radius(self.zoom_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig() -> (CameraController, OrbitCamera, InputState) {
        let preset = crate::config::ScenePreset::classic().camera;
        (
            CameraController::from_preset(&preset),
            OrbitCamera::from_preset(&preset, 1.5),
            InputState::new(),
        )
    }

    #[test]
    fn held_keys_move_every_frame() {
        let (controller, mut camera, mut input) = rig();
        let start_theta = camera.theta;
        input.set(KeyCode::KeyD, true);
        for _ in 0..10 {
            controller.update(&input, &mut camera);
        }
        assert_relative_eq!(
            camera.theta,
            start_theta + 10.0 * controller.angular_speed,
            epsilon = 1e-6
        );
    }

    #[test]
    fn opposing_keys_cancel() {
        let (controller, mut camera, mut input) = rig();
        let start_theta = camera.theta;
        input.set(KeyCode::KeyA, true);
        input.set(KeyCode::KeyD, true);
        controller.update(&input, &mut camera);
        assert_relative_eq!(camera.theta, start_theta, epsilon = 1e-6);
    }

    #[test]
    fn released_keys_stop_moving() {
        let (controller, mut camera, mut input) = rig();
        input.set(KeyCode::KeyE, true);
        controller.update(&input, &mut camera);
        let after_press = camera.radius;
        input.set(KeyCode::KeyE, false);
        controller.update(&input, &mut camera);
        assert_relative_eq!(camera.radius, after_press, epsilon = 1e-6);
    }
}
