// src/gfx/camera/orbit_camera.rs
use cgmath::*;

use crate::config::CameraPreset;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Camera constrained to an orbit around a fixed target point
///
/// The pose is spherical: `theta` is the azimuth around the y axis,
/// `phi` the elevation above the horizontal plane, `radius` the
/// distance from the target. `phi` and `radius` are clamped to the
/// bounds; `theta` wraps freely.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub theta: f32,
    pub phi: f32,
    pub radius: f32,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

/// Clamp limits for elevation and distance
#[derive(Debug, Clone, Copy)]
pub struct OrbitBounds {
    pub phi_min: f32,
    pub phi_max: f32,
    pub radius_min: f32,
    pub radius_max: f32,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn from_preset(preset: &CameraPreset, aspect: f32) -> Self {
        let mut camera = Self {
            theta: preset.theta,
            phi: preset.phi,
            radius: preset.radius,
            eye: Point3::origin(), // recalculated in update()
            target: preset.target,
            up: Vector3::unit_y(),
            bounds: OrbitBounds {
                phi_min: preset.phi_min,
                phi_max: preset.phi_max,
                radius_min: preset.radius_min,
                radius_max: preset.radius_max,
            },
            aspect,
            fovy: Deg(preset.fovy_deg).into(),
            znear: preset.znear,
            zfar: preset.zfar,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    pub fn add_theta(&mut self, delta: f32) {
        self.theta += delta;
        self.update();
    }

    pub fn set_phi(&mut self, phi: f32) {
        self.phi = phi.clamp(self.bounds.phi_min, self.bounds.phi_max);
        self.update();
    }

    pub fn add_phi(&mut self, delta: f32) {
        self.set_phi(self.phi + delta);
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(self.bounds.radius_min, self.bounds.radius_max);
        self.update();
    }

    pub fn add_radius(&mut self, delta: f32) {
        self.set_radius(self.radius + delta);
    }

    /// Recomputes the eye after changing `theta`, `phi` or `radius`.
    fn update(&mut self) {
        self.eye = spherical_eye(self.theta, self.phi, self.radius, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

pub fn spherical_eye(theta: f32, phi: f32, radius: f32, target: Point3<f32>) -> Point3<f32> {
    target
        + Vector3::new(
            radius * phi.cos() * theta.sin(),
            radius * phi.sin(),
            radius * phi.cos() * theta.cos(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn preset() -> CameraPreset {
        crate::config::ScenePreset::classic().camera
    }

    #[test]
    fn eye_matches_spherical_formula() {
        let camera = OrbitCamera::from_preset(&preset(), 1.5);
        let p = preset();
        let expected = Point3::new(
            p.target.x + p.radius * p.phi.cos() * p.theta.sin(),
            p.target.y + p.radius * p.phi.sin(),
            p.target.z + p.radius * p.phi.cos() * p.theta.cos(),
        );
        assert_relative_eq!(camera.eye.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(camera.eye.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(camera.eye.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn phi_and_radius_stay_in_bounds() {
        let mut camera = OrbitCamera::from_preset(&preset(), 1.5);
        for _ in 0..500 {
            camera.add_phi(0.1);
        }
        assert_relative_eq!(camera.phi, camera.bounds.phi_max);
        for _ in 0..500 {
            camera.add_phi(-0.1);
        }
        assert_relative_eq!(camera.phi, camera.bounds.phi_min);
        for _ in 0..500 {
            camera.add_radius(-0.5);
        }
        assert_relative_eq!(camera.radius, camera.bounds.radius_min);
        for _ in 0..500 {
            camera.add_radius(0.5);
        }
        assert_relative_eq!(camera.radius, camera.bounds.radius_max);
    }

    #[test]
    fn theta_is_unclamped() {
        let mut camera = OrbitCamera::from_preset(&preset(), 1.5);
        for _ in 0..1000 {
            camera.add_theta(0.1);
        }
        assert!(camera.theta > 99.0);
    }

    #[test]
    fn same_inputs_give_same_pose() {
        let mut a = OrbitCamera::from_preset(&preset(), 1.5);
        let mut b = OrbitCamera::from_preset(&preset(), 1.5);
        for _ in 0..20 {
            a.add_theta(0.015);
            a.add_phi(-0.015);
            a.add_radius(0.2);
            b.add_theta(0.015);
            b.add_phi(-0.015);
            b.add_radius(0.2);
        }
        assert_eq!(a.eye, b.eye);
    }
}
