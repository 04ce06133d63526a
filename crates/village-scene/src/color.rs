use serde::{Deserialize, Serialize};

/// RGB色（各成分 0.0〜1.0）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const TEAL: Self = Self::new(0.0, 1.0, 1.0);
    pub const PURPLE: Self = Self::new(0.5, 0.0, 0.5);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, a: f32) -> Color4 {
        Color4::new(self.r, self.g, self.b, a)
    }

    /// 8bit RGBA（アルファ255）
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), 255]
    }
}

/// RGBA色
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb(self) -> Color3 {
        Color3::new(self.r, self.g, self.b)
    }
}

impl From<Color3> for Color4 {
    fn from(c: Color3) -> Self {
        c.with_alpha(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(Color3::RED.to_array(), [1.0, 0.0, 0.0]);
        assert_eq!(Color3::GREEN.to_array(), [0.0, 1.0, 0.0]);
        assert_eq!(Color3::BLUE.to_array(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rgba8_clamps() {
        assert_eq!(Color3::new(2.0, -1.0, 0.5).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_color4_from_color3() {
        let c: Color4 = Color3::TEAL.into();
        assert_eq!(c.to_array(), [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(c.rgb(), Color3::TEAL);
    }
}
