use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 半球ライト（空と地面の2色で照らす環境光）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HemisphericLight {
    /// 空側の方向（正規化済み）
    pub direction: Vec3,
    pub intensity: f32,
}

impl HemisphericLight {
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize_or(Vec3::Y),
            intensity: 1.0,
        }
    }

    /// 法線に対する空側の寄与（0〜1）
    pub fn sky_weight(&self, normal: Vec3) -> f32 {
        0.5 * (1.0 + normal.normalize_or_zero().dot(self.direction)) * self.intensity
    }
}

impl Default for HemisphericLight {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, 0.0))
    }
}
