// crates/village-wasm/src/lib.rs

pub mod config;
pub mod demo;
pub mod error;
pub mod utils;
pub mod village;

use log::{LevelFilter, info, warn};
use wasm_bindgen::prelude::*;

use village_core::{CoreError, EntityId, ModelUniform, Name, Transform};
use village_scene::glam::{Quat, Vec3};
use village_scene::{
    AxisLength, InstanceOf, LinesRenderer, MeshRenderer, SceneContext, SceneError, TextTexture,
    TextureInfo, TextureSource, VertexLayoutInfo, build_global_axes_with, build_local_axes,
};

pub use config::{CameraConfig, DemoConfig};
pub use demo::{AxesDemo, DemoScene, create_axes};
pub use error::{DemoError, Result};
pub use village::{Dwellings, HouseKind, HousePlacement, PLACES, build_dwellings};

// パニック時のスタックトレース表示とロガー登録
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    utils::init_logging(LevelFilter::Info);
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn axis_length(size: f32) -> std::result::Result<AxisLength, JsValue> {
    AxisLength::new(size).map_err(js_error)
}

fn ids(entities: impl IntoIterator<Item = EntityId>) -> Vec<u32> {
    entities.into_iter().map(|e| e.to_u32()).collect()
}

/// Engine構造体
/// DemoSceneを包み、JSから操作可能なAPIを提供
#[wasm_bindgen]
pub struct Engine {
    scene: DemoScene,
}

impl Engine {
    fn with_config(config: DemoConfig) -> std::result::Result<Engine, JsValue> {
        let level = config.level_filter().map_err(js_error)?;
        utils::init_logging(level);
        let scene = DemoScene::new(config).map_err(js_error)?;
        info!("engine ready ({} objects)", scene.world.entity_count());
        Ok(Self { scene })
    }

    /// JSから渡されたIDを生存中のEntityに変換する
    fn entity(&self, id: u32) -> Option<EntityId> {
        EntityId::from_u32(id).filter(|e| self.scene.world.is_alive(*e))
    }

    fn require(&self, id: u32) -> village_scene::Result<EntityId> {
        self.entity(id).ok_or(SceneError::Core(CoreError::DeadEntity(id)))
    }

    fn transform_mut(&mut self, id: u32) -> Option<&mut Transform> {
        let entity = self.entity(id)?;
        self.scene.world.get_mut::<Transform>(entity)
    }

    fn transform(&self, id: u32) -> Option<&Transform> {
        self.scene.world.get::<Transform>(self.entity(id)?)
    }

    fn reparent(&mut self, child: u32, parent: Option<u32>) -> village_scene::Result<()> {
        let child = self.require(child)?;
        let parent = parent.map(|id| self.require(id)).transpose()?;
        SceneContext::set_parent(&mut self.scene.world, child, parent)
    }

    /// インスタンスは原型のメッシュを返す
    fn mesh(&self, id: u32) -> Option<&MeshRenderer> {
        let world = &self.scene.world;
        let entity = self.entity(id)?;
        let source = world.get::<InstanceOf>(entity).map_or(entity, |i| i.0);
        world.get::<MeshRenderer>(source)
    }

    fn label(&self, id: u32) -> Option<&TextTexture> {
        self.mesh(id)?.materials.iter().find_map(|m| match &m.diffuse_texture {
            Some(TextureSource::Text(texture)) => Some(texture),
            _ => None,
        })
    }
}

#[wasm_bindgen]
impl Engine {
    /// 設定オブジェクト（省略可）からシーンを組み立てる
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<Engine, JsValue> {
        let config: DemoConfig = if config.is_undefined() || config.is_null() {
            DemoConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        Self::with_config(config)
    }

    /// JSON文字列の設定からシーンを組み立てる
    pub fn from_json(json: &str) -> std::result::Result<Engine, JsValue> {
        Self::with_config(DemoConfig::from_json(json).map_err(js_error)?)
    }

    /// グローバル軸を追加し、矢印3本とラベル3枚のIDを返す
    pub fn show_axis(&mut self, size: f32) -> std::result::Result<Vec<u32>, JsValue> {
        let texture_size = self.scene.config().label_texture_size;
        let axes = build_global_axes_with(&mut self.scene.world, axis_length(size)?, texture_size)
            .map_err(js_error)?;
        Ok(ids(axes.entities()))
    }

    /// ローカル軸を追加し、`local_origin` のIDを返す
    pub fn local_axes(&mut self, size: f32) -> std::result::Result<u32, JsValue> {
        let axes = build_local_axes(&mut self.scene.world, axis_length(size)?).map_err(js_error)?;
        Ok(axes.origin.to_u32())
    }

    /// 家並みを組み、17棟のIDを返す
    pub fn build_dwellings(&mut self) -> std::result::Result<Vec<u32>, JsValue> {
        let dwellings = self.scene.build_dwellings().map_err(js_error)?;
        Ok(ids(dwellings.houses.iter().copied()))
    }

    /// 位置を設定
    pub fn set_position(&mut self, id: u32, x: f32, y: f32, z: f32) {
        match self.transform_mut(id) {
            Some(transform) => transform.position = Vec3::new(x, y, z),
            None => warn!("set_position: no object {id}"),
        }
    }

    /// 回転を設定（オイラー角）
    pub fn set_rotation(&mut self, id: u32, x: f32, y: f32, z: f32) {
        match self.transform_mut(id) {
            Some(transform) => transform.set_euler(x, y, z),
            None => warn!("set_rotation: no object {id}"),
        }
    }

    /// 回転を設定（クォータニオン）
    pub fn set_rotation_quaternion(&mut self, id: u32, x: f32, y: f32, z: f32, w: f32) {
        match self.transform_mut(id) {
            Some(transform) => transform.rotation = Quat::from_xyzw(x, y, z, w).normalize(),
            None => warn!("set_rotation_quaternion: no object {id}"),
        }
    }

    /// スケールを設定
    pub fn set_scale(&mut self, id: u32, x: f32, y: f32, z: f32) {
        match self.transform_mut(id) {
            Some(transform) => transform.scale = Vec3::new(x, y, z),
            None => warn!("set_scale: no object {id}"),
        }
    }

    /// 位置を取得（x, y, zの配列）
    pub fn get_position(&self, id: u32) -> Option<Vec<f32>> {
        self.transform(id).map(|t| t.position.to_array().to_vec())
    }

    /// 回転を取得（オイラー角 x, y, z）
    pub fn get_rotation(&self, id: u32) -> Option<Vec<f32>> {
        self.transform(id).map(|t| t.euler().to_array().to_vec())
    }

    /// スケールを取得（x, y, zの配列）
    pub fn get_scale(&self, id: u32) -> Option<Vec<f32>> {
        self.transform(id).map(|t| t.scale.to_array().to_vec())
    }

    /// 名前を取得
    pub fn get_name(&self, id: u32) -> Option<String> {
        self.scene
            .world
            .get::<Name>(self.entity(id)?)
            .map(|n| n.as_str().to_string())
    }

    /// 親を設定（`undefined` で解除）
    pub fn set_parent(&mut self, child: u32, parent: Option<u32>) -> std::result::Result<(), JsValue> {
        self.reparent(child, parent).map_err(js_error)
    }

    /// 子孫ごと削除。該当するオブジェクトがなければ false
    pub fn dispose(&mut self, id: u32) -> bool {
        match self.entity(id) {
            Some(entity) => {
                self.scene.world.dispose(entity);
                true
            }
            None => {
                warn!("dispose: no object {id}");
                false
            }
        }
    }

    /// ワールド座標
    pub fn world_position(&self, id: u32) -> Option<Vec<f32>> {
        let entity = self.entity(id)?;
        Some(self.scene.world.world_position(entity).to_array().to_vec())
    }

    /// ワールド行列（ModelUniformのレイアウト、列優先16要素）
    pub fn model_matrix(&self, id: u32) -> Option<Vec<f32>> {
        let entity = self.entity(id)?;
        let uniform = ModelUniform::from_mat4(self.scene.world.world_matrix(entity));
        Some(bytemuck::cast_slice::<ModelUniform, f32>(&[uniform]).to_vec())
    }

    /// CameraUniform（列優先16要素）
    pub fn view_projection(&self) -> Vec<f32> {
        bytemuck::cast_slice(&[self.scene.camera.uniform()]).to_vec()
    }

    /// 線メッシュの頂点バッファ（`vertex_layout("lines")` の並び）
    pub fn line_vertices(&self, id: u32) -> Option<Vec<f32>> {
        let lines = self.scene.world.get::<LinesRenderer>(self.entity(id)?)?;
        Some(bytemuck::cast_slice(&lines.0.vertices()).to_vec())
    }

    /// 三角形メッシュの頂点バッファ（`vertex_layout("mesh")` の並び）
    pub fn mesh_vertices(&self, id: u32) -> Option<Vec<f32>> {
        let renderer = self.mesh(id)?;
        Some(bytemuck::cast_slice(&renderer.mesh.vertices).to_vec())
    }

    pub fn mesh_indices(&self, id: u32) -> Option<Vec<u32>> {
        Some(self.mesh(id)?.mesh.indices.clone())
    }

    /// `"mesh"` または `"lines"` の頂点レイアウト
    pub fn vertex_layout(&self, kind: &str) -> std::result::Result<JsValue, JsValue> {
        let layout = match kind {
            "mesh" => VertexLayoutInfo::mesh(),
            "lines" => VertexLayoutInfo::lines(),
            other => return Err(JsValue::from_str(&format!("unknown vertex layout {other:?}"))),
        };
        serde_wasm_bindgen::to_value(&layout).map_err(js_error)
    }

    /// 文字平面のRGBA8テクスチャ
    pub fn label_texture(&self, id: u32) -> Option<Vec<u8>> {
        Some(self.label(id)?.bytes().to_vec())
    }

    /// 文字テクスチャの幅・高さ・書式（文字平面でなければ null）
    pub fn label_texture_info(&self, id: u32) -> std::result::Result<JsValue, JsValue> {
        let info = self.label(id).map(TextureInfo::of);
        serde_wasm_bindgen::to_value(&info).map_err(js_error)
    }

    /// マウス操作によるカメラ回転
    pub fn orbit_camera(&mut self, delta_alpha: f32, delta_beta: f32) {
        self.scene.camera.orbit(delta_alpha, delta_beta);
    }

    pub fn zoom_camera(&mut self, delta: f32) {
        self.scene.camera.zoom(delta);
    }

    /// Canvasリサイズ
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.scene.camera.set_aspect(width as f32 / height as f32);
        }
    }

    /// Entityが生存しているか確認
    pub fn is_alive(&self, id: u32) -> bool {
        self.entity(id).is_some()
    }

    /// Entity数を取得
    pub fn entity_count(&self) -> usize {
        self.scene.world.entity_count()
    }

    /// シーン全体をJSオブジェクトとして取得
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.scene.snapshot()).map_err(js_error)
    }

    /// シーン全体をJSON文字列として取得
    pub fn snapshot_json(&self) -> std::result::Result<String, JsValue> {
        self.scene.snapshot().to_json().map_err(js_error)
    }
}
