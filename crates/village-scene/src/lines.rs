//! 線メッシュ（ラインストリップ）

use glam::Vec3;

use crate::color::Color3;

/// 線描画用の頂点データ
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    /// 頂点バッファレイアウト（トポロジは `wgpu::PrimitiveTopology::LineStrip`）
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// 連続した線分。点列の順に結ばれ、全体が1色
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    pub points: Vec<Vec3>,
    pub color: Color3,
}

impl LineStrip {
    pub fn new(points: impl Into<Vec<Vec3>>, color: Color3) -> Self {
        Self {
            points: points.into(),
            color,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// 隣接する点のペア
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// GPU転送用の頂点列
    pub fn vertices(&self) -> Vec<LineVertex> {
        let color = self.color.with_alpha(1.0).to_array();
        self.points.iter().map(|&p| LineVertex::new(p, color)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_vertex_size() {
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    }

    #[test]
    fn test_segments() {
        let strip = LineStrip::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Color3::RED);
        assert_eq!(strip.segment_count(), 2);
        let segs: Vec<_> = strip.segments().collect();
        assert_eq!(segs, vec![(Vec3::ZERO, Vec3::X), (Vec3::X, Vec3::Y)]);
    }

    #[test]
    fn test_vertices_carry_flat_color() {
        let strip = LineStrip::new([Vec3::ZERO, Vec3::Z], Color3::BLUE);
        let vertices = strip.vertices();
        assert_eq!(vertices.len(), 2);
        assert!(vertices.iter().all(|v| v.color == [0.0, 0.0, 1.0, 1.0]));
        assert_eq!(vertices[1].position, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_strip() {
        assert_eq!(LineStrip::new(Vec::new(), Color3::GREEN).segment_count(), 0);
    }
}
