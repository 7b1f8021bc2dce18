//! Perspective camera.

use std::f32::consts::FRAC_PI_3;

use glam::{Mat4, Vec3};

/// A right-handed perspective camera looking from `eye` towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_3,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            eye: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    pub fn set_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
    }

    /// Place the camera at `eye` looking at `target`, with `+Y` up.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.eye = eye;
        self.target = target;
        self.up = Vec3::Y;
    }

    /// OpenGL-style clip space projection (depth in `[-1, 1]`).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Unit vector from the eye towards the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or(Vec3::NEG_Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_moves_eye_to_origin_facing_negative_z() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(3.0, 1.0, 5.0), Vec3::new(3.0, 1.0, 0.0));
        let view = camera.view();

        assert!(view.transform_point3(camera.eye).length() < 1e-6);
        let target = view.transform_point3(camera.target);
        assert!(target.x.abs() < 1e-6 && target.y.abs() < 1e-6);
        assert!((target.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn view_rotates_not_just_translates() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::ZERO, Vec3::X);
        let ahead = camera.view().transform_point3(Vec3::new(2.0, 0.0, 0.0));
        assert!((ahead - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn projection_maps_near_and_far_planes() {
        let camera = Camera::default();
        let projection = camera.projection();
        let near = projection.project_point3(Vec3::new(0.0, 0.0, -camera.near));
        let far = projection.project_point3(Vec3::new(0.0, 0.0, -camera.far));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn forward_points_at_target() {
        let camera = Camera::default();
        assert_eq!(camera.forward(), Vec3::NEG_Z);
    }
}
