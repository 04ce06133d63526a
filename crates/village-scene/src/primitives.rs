//! Primitive mesh builders
//!
//! Box faces are ordered rear (+Z), front (-Z), right (+X), left (-X), top (+Y),
//! bottom (-Y). Face UV rectangles are `(u0, v0, u1, v1)` mapped upright.

use std::f32::consts::TAU;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::color::Color4;
use crate::mesh::{Mesh, Vertex};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// (outward normal, face right, face up) per box face
const BOX_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOptions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub face_uv: [Vec4; 6],
    pub face_colors: Option<[Color4; 6]>,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            face_uv: [Vec4::new(0.0, 0.0, 1.0, 1.0); 6],
            face_colors: None,
        }
    }
}

impl BoxOptions {
    /// Cube with equal edges
    pub fn cube(size: f32) -> Self {
        Self {
            width: size,
            height: size,
            depth: size,
            ..Self::default()
        }
    }
}

pub fn create_box(options: &BoxOptions) -> Mesh {
    let half = Vec3::new(options.width, options.height, options.depth) * 0.5;
    let mut mesh = Mesh::new();

    for (face, &(normal, right, up)) in BOX_FACES.iter().enumerate() {
        let uv = options.face_uv[face];
        let color = options
            .face_colors
            .map(|colors| colors[face].to_array())
            .unwrap_or(WHITE);
        let corner = |sr: f32, su: f32, u: f32, v: f32| {
            Vertex::new(
                ((normal + right * sr + up * su) * half).to_array(),
                normal.to_array(),
                color,
                [u, v],
            )
        };
        mesh.push_quad([
            corner(-1.0, -1.0, uv.x, uv.y),
            corner(1.0, -1.0, uv.z, uv.y),
            corner(1.0, 1.0, uv.z, uv.w),
            corner(-1.0, 1.0, uv.x, uv.w),
        ]);
    }

    mesh
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderOptions {
    pub diameter: f32,
    pub height: f32,
    pub tessellation: u32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            diameter: 1.0,
            height: 2.0,
            tessellation: 24,
        }
    }
}

/// Flat-shaded cylinder along +Y, centered at the origin.
/// Tessellation below 3 is raised to 3 (a triangular prism).
pub fn create_cylinder(options: &CylinderOptions) -> Mesh {
    let segments = options.tessellation.max(3);
    let radius = options.diameter * 0.5;
    let half_h = options.height * 0.5;
    let point = |i: u32, y: f32| {
        let theta = i as f32 / segments as f32 * TAU;
        Vec3::new(radius * theta.cos(), y, radius * theta.sin())
    };

    let mut mesh = Mesh::new();

    for i in 0..segments {
        let mid = (i as f32 + 0.5) / segments as f32 * TAU;
        let n = [mid.cos(), 0.0, mid.sin()];
        let u0 = 1.0 - (i + 1) as f32 / segments as f32;
        let u1 = 1.0 - i as f32 / segments as f32;
        mesh.push_quad([
            Vertex::new(point(i + 1, -half_h).to_array(), n, WHITE, [u0, 0.0]),
            Vertex::new(point(i, -half_h).to_array(), n, WHITE, [u1, 0.0]),
            Vertex::new(point(i, half_h).to_array(), n, WHITE, [u1, 1.0]),
            Vertex::new(point(i + 1, half_h).to_array(), n, WHITE, [u0, 1.0]),
        ]);
    }

    let cap_uv = |p: Vec3| [0.5 + 0.5 * p.x / radius.max(f32::EPSILON), 0.5 + 0.5 * p.z / radius.max(f32::EPSILON)];
    for (y, normal) in [(half_h, [0.0, 1.0, 0.0]), (-half_h, [0.0, -1.0, 0.0])] {
        let center = Vertex::new([0.0, y, 0.0], normal, WHITE, [0.5, 0.5]);
        for i in 0..segments {
            let a = point(i, y);
            let b = point(i + 1, y);
            let va = Vertex::new(a.to_array(), normal, WHITE, cap_uv(a));
            let vb = Vertex::new(b.to_array(), normal, WHITE, cap_uv(b));
            // 上面は時計回り方向に並べて外向きを保つ
            if y > 0.0 {
                mesh.push_triangle([center, vb, va]);
            } else {
                mesh.push_triangle([center, va, vb]);
            }
        }
    }

    mesh
}

/// Ground in the XZ plane facing +Y; `width` along X, `height` along Z
pub fn create_ground(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let n = [0.0, 1.0, 0.0];
    let mut mesh = Mesh::new();
    mesh.push_quad([
        Vertex::new([-hw, 0.0, hh], n, WHITE, [0.0, 0.0]),
        Vertex::new([hw, 0.0, hh], n, WHITE, [1.0, 0.0]),
        Vertex::new([hw, 0.0, -hh], n, WHITE, [1.0, 1.0]),
        Vertex::new([-hw, 0.0, -hh], n, WHITE, [0.0, 1.0]),
    ]);
    mesh
}

/// Square plane in the XY plane, one quad facing -Z
///
/// Seen from +Z only when the material turns back-face culling off.
pub fn create_plane(size: f32) -> Mesh {
    let h = size * 0.5;
    let n = [0.0, 0.0, -1.0];
    let mut mesh = Mesh::new();
    mesh.push_quad([
        Vertex::new([h, -h, 0.0], n, WHITE, [0.0, 0.0]),
        Vertex::new([-h, -h, 0.0], n, WHITE, [1.0, 0.0]),
        Vertex::new([-h, h, 0.0], n, WHITE, [1.0, 1.0]),
        Vertex::new([h, h, 0.0], n, WHITE, [0.0, 1.0]),
    ]);
    mesh
}
