use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// GPU用カメラUniform
/// View-Projection行列を列優先形式で格納
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_mat4(mat: Mat4) -> Self {
        Self {
            view_proj: mat.to_cols_array_2d(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::from_mat4(Mat4::IDENTITY)
    }
}

/// 注視点の周りを回る透視投影カメラ
///
/// `alpha` は XZ 平面上の経度、`beta` は +Y からの極角（ラジアン）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcRotateCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl ArcRotateCamera {
    pub fn new(alpha: f32, beta: f32, radius: f32, target: Vec3) -> Self {
        Self {
            alpha,
            beta,
            radius,
            target,
            fov: 0.8,
            aspect: 1.0,
            near: 1.0,
            far: 10000.0,
        }
    }

    /// デモシーンの初期視点（-Z側からやや見下ろす）
    pub fn village_default() -> Self {
        Self::new(-PI / 2.0, PI / 2.5, 15.0, Vec3::ZERO)
    }

    pub fn position(&self) -> Vec3 {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        self.target + Vec3::new(cos_a * sin_b, cos_b, sin_a * sin_b) * self.radius
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        proj * view
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_mat4(self.build_view_projection_matrix())
    }

    /// 極角は真上・真下に到達しないよう制限する
    pub fn orbit(&mut self, delta_alpha: f32, delta_beta: f32) {
        self.alpha += delta_alpha;
        self.beta = (self.beta + delta_beta).clamp(0.01, PI - 0.01);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta).max(self.near);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_village_default_position() {
        let camera = ArcRotateCamera::village_default();
        let p = camera.position();
        let expected = Vec3::new(0.0, 15.0 * (PI / 2.5).cos(), -15.0 * (PI / 2.5).sin());
        assert!(p.abs_diff_eq(expected, 1e-4));
        assert!((p.length() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_position_follows_target() {
        let mut camera = ArcRotateCamera::new(0.0, PI / 2.0, 2.0, Vec3::ZERO);
        camera.target = Vec3::new(1.0, 1.0, 1.0);
        assert!(camera.position().abs_diff_eq(Vec3::new(3.0, 1.0, 1.0), 1e-5));
    }

    #[test]
    fn test_orbit_clamps_beta() {
        let mut camera = ArcRotateCamera::village_default();
        camera.orbit(0.5, 10.0);
        assert!(camera.beta < PI);
        camera.orbit(0.0, -10.0);
        assert!(camera.beta > 0.0);
    }

    #[test]
    fn test_zoom_stops_at_near_plane() {
        let mut camera = ArcRotateCamera::village_default();
        camera.zoom(-100.0);
        assert_eq!(camera.radius, camera.near);
    }

    #[test]
    fn test_uniform_target_projects_to_center() {
        let camera = ArcRotateCamera::village_default();
        let clip = camera.build_view_projection_matrix() * camera.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert_eq!(std::mem::size_of_val(&camera.uniform()), 64);
    }
}
