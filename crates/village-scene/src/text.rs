//! 文字テクスチャのラスタライズ
//!
//! 軸ラベル用の小さなストロークフォントを透明背景のRGBA8正方形テクスチャに描く。
//! レイアウトは 50px テクスチャ上で x=5, ベースライン y=40, 太字36px 相当を基準に
//! サイズに比例して拡縮する。

use glam::Vec2;

use crate::color::Color3;
use crate::error::{ResourceKind, Result, SceneError};

/// 作成可能なテクスチャの最大辺長
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// 基準サイズに対する比率
const LEFT: f32 = 5.0 / 50.0;
const TOP: f32 = 14.0 / 50.0;
const BASELINE: f32 = 40.0 / 50.0;
const ADVANCE: f32 = 26.0 / 50.0;
const GLYPH_WIDTH: f32 = 24.0 / 50.0;
const HALF_STROKE: f32 = 2.5 / 50.0;

type Stroke = ((f32, f32), (f32, f32));

/// グリフ枠内の線分（左上原点、0〜1）
fn glyph_strokes(c: char) -> Option<&'static [Stroke]> {
    const X: &[Stroke] = &[((0.0, 0.0), (1.0, 1.0)), ((1.0, 0.0), (0.0, 1.0))];
    const Y: &[Stroke] = &[
        ((0.0, 0.0), (0.5, 0.5)),
        ((1.0, 0.0), (0.5, 0.5)),
        ((0.5, 0.5), (0.5, 1.0)),
    ];
    const Z: &[Stroke] = &[
        ((0.0, 0.0), (1.0, 0.0)),
        ((1.0, 0.0), (0.0, 1.0)),
        ((0.0, 1.0), (1.0, 1.0)),
    ];
    const SPACE: &[Stroke] = &[];

    match c.to_ascii_uppercase() {
        'X' => Some(X),
        'Y' => Some(Y),
        'Z' => Some(Z),
        ' ' => Some(SPACE),
        _ => None,
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / ab.length_squared().max(f32::EPSILON)).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// 文字を描いた正方形テクスチャ（行は上から下）
#[derive(Debug, Clone, PartialEq)]
pub struct TextTexture {
    size: u32,
    pixels: Vec<u8>,
    pub has_alpha: bool,
}

impl TextTexture {
    /// `text` を `color` で描画する
    pub fn rasterize(text: &str, color: Color3, size: u32) -> Result<Self> {
        if size == 0 || size > MAX_TEXTURE_SIZE {
            return Err(SceneError::allocation(
                ResourceKind::Texture,
                format!("size {size} outside 1..={MAX_TEXTURE_SIZE}"),
            ));
        }

        let extent = size as f32;
        let mut segments = Vec::new();
        for (i, c) in text.chars().enumerate() {
            let strokes = glyph_strokes(c).ok_or_else(|| {
                SceneError::allocation(ResourceKind::Texture, format!("no glyph for {c:?}"))
            })?;
            let origin = Vec2::new(LEFT + ADVANCE * i as f32, TOP) * extent;
            let cell = Vec2::new(GLYPH_WIDTH, BASELINE - TOP) * extent;
            segments.extend(strokes.iter().map(|&((ax, ay), (bx, by))| {
                (origin + Vec2::new(ax, ay) * cell, origin + Vec2::new(bx, by) * cell)
            }));
        }

        let [r, g, b, _] = color.to_rgba8();
        let half = HALF_STROKE * extent;
        let mut pixels = vec![0u8; (size * size * 4) as usize];

        for y in 0..size {
            for x in 0..size {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = segments
                    .iter()
                    .map(|&(a, b)| distance_to_segment(p, a, b))
                    .fold(f32::INFINITY, f32::min);
                // 境界1px分をアンチエイリアス
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let offset = ((y * size + x) * 4) as usize;
                    pixels[offset..offset + 4]
                        .copy_from_slice(&[r, g, b, (coverage * 255.0).round() as u8]);
                }
            }
        }

        Ok(Self {
            size,
            pixels,
            has_alpha: true,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let offset = ((y * self.size + x) * 4) as usize;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(px)
    }

    /// RGBA8のバイト列
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// 完全に透明でない画素数
    pub fn covered_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.size,
            height: self.size,
            depth_or_array_layers: 1,
        }
    }

    pub fn format() -> wgpu::TextureFormat {
        wgpu::TextureFormat::Rgba8UnormSrgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_transparent() {
        let tex = TextTexture::rasterize("X", Color3::RED, 50).unwrap();
        assert_eq!(tex.size(), 50);
        assert_eq!(tex.bytes().len(), 50 * 50 * 4);
        assert_eq!(tex.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(tex.pixel(49, 49), Some([0, 0, 0, 0]));
        assert!(tex.has_alpha);
    }

    #[test]
    fn test_x_glyph_center_is_inked() {
        // グリフ枠中心 = (5 + 12, 14 + 13)
        let tex = TextTexture::rasterize("X", Color3::RED, 50).unwrap();
        assert_eq!(tex.pixel(17, 27), Some([255, 0, 0, 255]));
        assert!(tex.covered_pixels() > 100);
    }

    #[test]
    fn test_glyphs_differ() {
        let x = TextTexture::rasterize("X", Color3::BLUE, 50).unwrap();
        let y = TextTexture::rasterize("Y", Color3::BLUE, 50).unwrap();
        let z = TextTexture::rasterize("Z", Color3::BLUE, 50).unwrap();
        assert_ne!(x, y);
        assert_ne!(y, z);
        // Zの上辺はX/Yにはない
        assert_eq!(z.pixel(17, 14).map(|p| p[3]), Some(255));
        assert_eq!(x.pixel(17, 14).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_scales_with_size() {
        let small = TextTexture::rasterize("Y", Color3::GREEN, 50).unwrap();
        let large = TextTexture::rasterize("Y", Color3::GREEN, 100).unwrap();
        let ratio = large.covered_pixels() as f32 / small.covered_pixels() as f32;
        assert!((3.0..5.0).contains(&ratio));
    }

    #[test]
    fn test_rejects_bad_sizes() {
        for size in [0, MAX_TEXTURE_SIZE + 1] {
            let err = TextTexture::rasterize("X", Color3::RED, size).unwrap_err();
            assert!(matches!(err, SceneError::ResourceAllocation { resource: ResourceKind::Texture, .. }));
        }
    }

    #[test]
    fn test_rejects_unknown_glyph() {
        let err = TextTexture::rasterize("W", Color3::RED, 50).unwrap_err();
        assert_eq!(
            err,
            SceneError::allocation(ResourceKind::Texture, "no glyph for 'W'")
        );
    }

    #[test]
    fn test_upload_extent() {
        let tex = TextTexture::rasterize("Z", Color3::BLUE, 64).unwrap();
        let extent = tex.extent();
        assert_eq!((extent.width, extent.height, extent.depth_or_array_layers), (64, 64, 1));
        assert_eq!(TextTexture::format(), wgpu::TextureFormat::Rgba8UnormSrgb);
    }

    #[test]
    fn test_empty_and_space() {
        let tex = TextTexture::rasterize(" ", Color3::RED, 8).unwrap();
        assert_eq!(tex.covered_pixels(), 0);
        assert_eq!(tex.pixel(8, 0), None);
    }
}
