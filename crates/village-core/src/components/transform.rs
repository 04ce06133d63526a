use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::ecs::Component;
use crate::math::{Mat4, Quat, Vec3, rotation_from_euler, rotation_to_euler};

/// Local transform relative to the parent (or the world for roots)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Decompose an affine matrix. Shear is lost.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self::new(position, rotation, scale)
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set rotation from euler angles (x: pitch, y: yaw, z: roll)
    pub fn set_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = rotation_from_euler(x, y, z);
    }

    pub fn with_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.set_euler(x, y, z);
        self
    }

    pub fn euler(&self) -> Vec3 {
        rotation_to_euler(self.rotation)
    }

    /// Local matrix (scale, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Component for Transform {}

/// Per-object model matrix in GPU layout (column major)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn from_mat4(matrix: Mat4) -> Self {
        Self {
            model: matrix.to_cols_array_2d(),
        }
    }

    pub fn identity() -> Self {
        Self::from_mat4(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::identity().to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_translation_matrix() {
        let t = Transform::from_position(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(t.to_matrix(), Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_scale_applies_before_rotation() {
        let t = Transform::identity()
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_euler(0.0, 0.0, FRAC_PI_2);
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_from_matrix_roundtrip() {
        let t = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            rotation_from_euler(0.1, 0.2, 0.3),
            Vec3::new(0.5, 0.5, 0.5),
        );
        let back = Transform::from_matrix(t.to_matrix());
        assert!(back.position.abs_diff_eq(t.position, 1e-5));
        assert!(back.scale.abs_diff_eq(t.scale, 1e-5));
        assert!(back.rotation.abs_diff_eq(t.rotation, 1e-5));
    }

    #[test]
    fn test_model_uniform_layout() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
        let uniform = ModelUniform::from_mat4(Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(uniform.model[3], [4.0, 5.0, 6.0, 1.0]);
    }
}
