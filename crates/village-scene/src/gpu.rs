//! GPUへ渡すバッファ・テクスチャの記述
//!
//! ホスト側のレンダラーは wgpu のレイアウトをそのまま受け取れないため、
//! シリアライズ可能な形に写して渡す。

use serde::Serialize;

use crate::lines::LineVertex;
use crate::mesh::Vertex;
use crate::text::TextTexture;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexAttributeInfo {
    pub shader_location: u32,
    pub offset: u64,
    /// `Float32x3` など wgpu の書式名
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexLayoutInfo {
    pub array_stride: u64,
    pub attributes: Vec<VertexAttributeInfo>,
}

impl VertexLayoutInfo {
    pub fn from_layout(layout: &wgpu::VertexBufferLayout<'_>) -> Self {
        Self {
            array_stride: layout.array_stride,
            attributes: layout
                .attributes
                .iter()
                .map(|attr| VertexAttributeInfo {
                    shader_location: attr.shader_location,
                    offset: attr.offset,
                    format: format!("{:?}", attr.format),
                })
                .collect(),
        }
    }

    /// 三角形メッシュ用（`Vertex`）
    pub fn mesh() -> Self {
        Self::from_layout(&Vertex::desc())
    }

    /// 線メッシュ用（`LineVertex`）
    pub fn lines() -> Self {
        Self::from_layout(&LineVertex::desc())
    }

    /// 1頂点あたりの f32 数
    pub fn floats_per_vertex(&self) -> usize {
        self.array_stride as usize / std::mem::size_of::<f32>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl TextureInfo {
    pub fn of(texture: &TextTexture) -> Self {
        let extent = texture.extent();
        Self {
            width: extent.width,
            height: extent.height,
            format: format!("{:?}", TextTexture::format()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color3;

    #[test]
    fn test_mesh_layout() {
        let info = VertexLayoutInfo::mesh();
        assert_eq!(info.array_stride, 48);
        assert_eq!(info.floats_per_vertex(), 12);
        let offsets: Vec<u64> = info.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24, 40]);
        assert_eq!(info.attributes[2].format, "Float32x4");
    }

    #[test]
    fn test_lines_layout() {
        let info = VertexLayoutInfo::lines();
        assert_eq!(info.array_stride, 28);
        assert_eq!(info.floats_per_vertex(), 7);
        assert_eq!(info.attributes.len(), 2);
        assert_eq!(info.attributes[1].shader_location, 1);
        assert_eq!(info.attributes[1].offset, 12);
    }

    #[test]
    fn test_texture_info() {
        let texture = TextTexture::rasterize("Y", Color3::GREEN, 50).unwrap();
        let info = TextureInfo::of(&texture);
        assert_eq!((info.width, info.height), (50, 50));
        assert_eq!(info.format, "Rgba8UnormSrgb");
    }
}
