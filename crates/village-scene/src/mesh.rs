use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexStepMode};

/// 頂点構造体
/// 位置、法線、色、UVを含む
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self { position, normal, color, uv }
    }

    /// 頂点バッファレイアウト
    pub fn desc() -> VertexBufferLayout<'static> {
        const ATTRIBUTES: [VertexAttribute; 4] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x4,
            3 => Float32x2
        ];
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }

    /// 行列を適用した頂点（法線は逆転置で変換）
    fn transformed(&self, matrix: &Mat4, normal_matrix: &Mat3) -> Self {
        let position = matrix.transform_point3(Vec3::from(self.position));
        let normal = (*normal_matrix * Vec3::from(self.normal)).normalize_or_zero();
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            ..*self
        }
    }
}

/// マルチマテリアル用の部分範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    pub index_start: u32,
    pub index_count: u32,
    pub material_index: usize,
}

/// 三角形リストのメッシュ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// 空の場合は全体が1マテリアル
    pub submeshes: Vec<SubMesh>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// 4頂点の面を2三角形として追加（反時計回り）
    pub fn push_quad(&mut self, corners: [Vertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn push_triangle(&mut self, corners: [Vertex; 3]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 頂点に行列を焼き込む
    pub fn transform(&mut self, matrix: Mat4) {
        let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();
        for v in &mut self.vertices {
            *v = v.transformed(&matrix, &normal_matrix);
        }
    }

    /// 複数メッシュを1つに結合する
    /// 各パーツの行列を焼き込み、パーツごとにSubMeshを作る（material_index = パーツ順）
    pub fn merge(parts: &[(&Mesh, Mat4)]) -> Mesh {
        let mut merged = Mesh::new();
        for (material_index, (part, matrix)) in parts.iter().enumerate() {
            let base = merged.vertices.len() as u32;
            let index_start = merged.indices.len() as u32;

            let mut baked = (*part).clone();
            baked.transform(*matrix);
            merged.vertices.extend(baked.vertices);
            merged.indices.extend(baked.indices.iter().map(|i| i + base));

            merged.submeshes.push(SubMesh {
                index_start,
                index_count: part.indices.len() as u32,
                material_index,
            });
        }
        merged
    }

    /// 軸並行バウンディングボックス（min, max）
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn quad() -> Mesh {
        let n = [0.0, 0.0, 1.0];
        let c = [1.0; 4];
        let mut mesh = Mesh::new();
        mesh.push_quad([
            Vertex::new([0.0, 0.0, 0.0], n, c, [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], n, c, [1.0, 0.0]),
            Vertex::new([1.0, 1.0, 0.0], n, c, [1.0, 1.0]),
            Vertex::new([0.0, 1.0, 0.0], n, c, [0.0, 1.0]),
        ]);
        mesh
    }

    #[test]
    fn test_vertex_size() {
        // (3 + 3 + 4 + 2) floats * 4 bytes
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
        assert_eq!(Vertex::desc().array_stride, 48);
    }

    #[test]
    fn test_push_quad() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_transform_rotates_normals() {
        let mut mesh = quad();
        mesh.transform(Mat4::from_rotation_y(FRAC_PI_2));
        let n = Vec3::from(mesh.vertices[0].normal);
        assert!(n.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_merge_offsets_indices_and_records_submeshes() {
        let a = quad();
        let b = quad();
        let merged = Mesh::merge(&[
            (&a, Mat4::IDENTITY),
            (&b, Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0))),
        ]);

        assert_eq!(merged.vertex_count(), 8);
        assert_eq!(&merged.indices[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(merged.submeshes.len(), 2);
        assert_eq!(merged.submeshes[1], SubMesh { index_start: 6, index_count: 6, material_index: 1 });
        assert_eq!(merged.vertices[4].position, [0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Mesh::new().bounds(), None);
        assert_eq!(quad().bounds(), Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))));
    }
}
