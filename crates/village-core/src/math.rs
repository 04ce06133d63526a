//! 数学型の再エクスポートと角度変換ヘルパー

pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

/// オイラー角（x: pitch, y: yaw, z: roll）から回転を作成
/// 適用順は yaw → pitch → roll（Y, X, Z）
pub fn rotation_from_euler(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, y, x, z)
}

/// 回転からオイラー角（x, y, z）を取り出す
pub fn rotation_to_euler(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(x, y, z)
}
