//! 軸ギズモのデモシーン
//!
//! 親子2つの箱を置き、子にローカル軸、原点にグローバル軸を付ける。

use std::f32::consts::PI;

use log::info;
use village_core::{EntityId, SceneSnapshot, Transform, World};
use village_scene::glam::Vec3;
use village_scene::primitives::{BoxOptions, create_box};
use village_scene::{
    ArcRotateCamera, Color3, Color4, GlobalAxes, HemisphericLight, LocalAxes, SceneContext,
    StandardMaterial, build_global_axes_with, build_local_axes, object_kind,
};

use crate::config::DemoConfig;
use crate::error::Result;
use crate::village::{Dwellings, build_dwellings};

/// 親の箱の面ごとの色（背面・正面・右・左・上・下）
pub const FACE_COLORS: [Color3; 6] = [
    Color3::BLUE,
    Color3::TEAL,
    Color3::RED,
    Color3::PURPLE,
    Color3::GREEN,
    Color3::YELLOW,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxesDemo {
    pub parent: EntityId,
    pub child: EntityId,
    pub local_axes: LocalAxes,
    pub global_axes: GlobalAxes,
}

/// 親子の箱と軸ギズモを組む
pub fn create_axes<S: SceneContext + ?Sized>(scene: &mut S, config: &DemoConfig) -> Result<AxesDemo> {
    let colored_box = |size: f32| {
        create_box(&BoxOptions {
            face_colors: Some(FACE_COLORS.map(Color4::from)),
            ..BoxOptions::cube(size)
        })
    };

    let parent = scene.create_mesh("Box", colored_box(1.0), vec![StandardMaterial::new("boxMat")])?;
    scene.set_transform(
        parent,
        Transform::from_position(Vec3::new(2.0, 0.0, 0.0)).with_euler(0.0, 0.0, -PI / 4.0),
    )?;

    let child = scene.create_mesh("Box", colored_box(0.5), vec![StandardMaterial::new("boxMat")])?;
    scene.set_parent(child, Some(parent))?;
    scene.set_transform(
        child,
        Transform::from_position(Vec3::new(0.0, 2.0, 0.0)).with_euler(PI / 4.0, PI / 4.0, PI / 4.0),
    )?;

    let local_axes = build_local_axes(scene, config.local_axis()?)?;
    local_axes.attach_to(scene, child)?;

    let global_axes = build_global_axes_with(scene, config.global_axis()?, config.label_texture_size)?;

    Ok(AxesDemo { parent, child, local_axes, global_axes })
}

/// World とカメラ・ライトをまとめたシーン
#[derive(Debug)]
pub struct DemoScene {
    pub world: World,
    pub camera: ArcRotateCamera,
    pub light: HemisphericLight,
    pub axes_demo: Option<AxesDemo>,
    pub dwellings: Option<Dwellings>,
    config: DemoConfig,
}

impl DemoScene {
    /// 設定に従ってシーンを組み立てる
    pub fn new(config: DemoConfig) -> Result<Self> {
        config.validate()?;
        let mut scene = Self {
            world: World::new(),
            camera: config.camera.to_camera(),
            light: HemisphericLight::default(),
            axes_demo: None,
            dwellings: None,
            config,
        };
        if scene.config.show_axes_demo {
            scene.axes_demo = Some(create_axes(&mut scene.world, &scene.config)?);
        }
        if scene.config.build_dwellings {
            scene.build_dwellings()?;
        }
        info!("scene assembled: {} objects", scene.world.entity_count());
        Ok(scene)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(DemoConfig::from_json(json)?)
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// 2回目以降は既存の家並みを返す
    pub fn build_dwellings(&mut self) -> Result<&Dwellings> {
        let dwellings = match self.dwellings.take() {
            Some(dwellings) => dwellings,
            None => build_dwellings(&mut self.world)?,
        };
        Ok(self.dwellings.insert(dwellings))
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture_with(&self.world, object_kind)
    }
}
