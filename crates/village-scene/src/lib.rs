pub mod axes;
pub mod camera;
pub mod color;
pub mod context;
pub mod error;
pub mod gpu;
pub mod light;
pub mod lines;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod text;

pub use axes::{
    ArrowLine, Axis, AxisLength, GlobalAxes, LabelBillboard, LocalAxes, build_global_axes,
    build_global_axes_with, build_local_axes,
};
pub use camera::{ArcRotateCamera, CameraUniform};
pub use color::{Color3, Color4};
pub use context::{
    Billboard, InstanceOf, LinesRenderer, MeshRenderer, SceneContext, TransformNode, all_or_nothing,
    object_kind,
};
pub use error::{ResourceKind, SceneError, Result};
pub use gpu::{TextureInfo, VertexAttributeInfo, VertexLayoutInfo};
pub use light::HemisphericLight;
pub use lines::{LineStrip, LineVertex};
pub use material::{StandardMaterial, TextureSource};
pub use mesh::{Mesh, SubMesh, Vertex};
pub use text::TextTexture;

// Re-export glam types for consistent version usage
pub use glam;
