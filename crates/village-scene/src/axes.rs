//! 座標軸ギズモ
//!
//! 軸ごとに矢印形のラインストリップを1本作る。グローバル版はラベル
//! （"X"/"Y"/"Z" の文字平面）付きでワールド原点に置き、ローカル版は
//! 1つの `local_origin` ノードの下にまとめて他オブジェクトへ付け替えられるようにする。
//!
//! 矢じりの位置は長さに対する比率で決まるため、どの長さでも同じ形になる。

use glam::Vec3;
use log::debug;
use village_core::EntityId;

use crate::color::Color3;
use crate::context::{SceneContext, all_or_nothing};
use crate::error::{Result, SceneError};
use crate::lines::LineStrip;

/// 矢じりの付け根（軸方向の比率）
pub const ARROW_HEAD_BASE: f32 = 0.95;
/// 矢じりの開き（垂直方向の比率）
pub const ARROW_HEAD_SPREAD: f32 = 0.05;
/// ラベル中心の軸方向位置
pub const LABEL_DISTANCE: f32 = 0.9;
/// ラベルをずらす量
pub const LABEL_OFFSET: f32 = 0.05;
/// ラベル用テクスチャの既定サイズ(px)
pub const DEFAULT_LABEL_TEXTURE_SIZE: u32 = 50;

/// 座標軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn color(self) -> Color3 {
        match self {
            Axis::X => Color3::RED,
            Axis::Y => Color3::GREEN,
            Axis::Z => Color3::BLUE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// 1本目の矢じり点を開く方向（2本目はその逆）
    fn chevron_direction(self) -> Vec3 {
        match self {
            Axis::X => Vec3::Y,
            Axis::Y => Vec3::NEG_X,
            Axis::Z => Vec3::NEG_Y,
        }
    }

    /// ラベルを隣の軸線と重ねないためのずらし方向
    fn label_direction(self) -> Vec3 {
        match self {
            Axis::X => Vec3::NEG_Y,
            Axis::Y => Vec3::NEG_Z,
            Axis::Z => Vec3::Y,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// 正の有限値に限定した軸の長さ
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AxisLength(f32);

impl AxisLength {
    pub fn new(length: f32) -> Result<Self> {
        if length.is_finite() && length > 0.0 {
            Ok(Self(length))
        } else {
            Err(SceneError::InvalidLength(length))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for AxisLength {
    type Error = SceneError;

    fn try_from(value: f32) -> Result<Self> {
        Self::new(value)
    }
}

/// 矢印の5点: 根元、先端、矢じり1、先端、矢じり2
pub fn arrow_points(axis: Axis, length: AxisLength) -> [Vec3; 5] {
    let l = length.get();
    let tip = axis.unit() * l;
    let base = axis.unit() * (l * ARROW_HEAD_BASE);
    let spread = axis.chevron_direction() * (ARROW_HEAD_SPREAD * l);
    [Vec3::ZERO, tip, base + spread, tip, base - spread]
}

/// ラベル平面の中心
pub fn label_position(axis: Axis, length: AxisLength) -> Vec3 {
    let l = length.get();
    axis.unit() * (LABEL_DISTANCE * l) + axis.label_direction() * (LABEL_OFFSET * l)
}

/// ラベル平面の一辺
pub fn label_size(length: AxisLength) -> f32 {
    length.get() / 10.0
}

pub fn arrow_strip(axis: Axis, length: AxisLength) -> LineStrip {
    LineStrip::new(arrow_points(axis, length), axis.color())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowLine {
    pub axis: Axis,
    pub entity: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelBillboard {
    pub axis: Axis,
    pub entity: EntityId,
}

/// ワールド原点のギズモ（矢印3本 + ラベル3枚）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalAxes {
    pub arrows: [ArrowLine; 3],
    pub labels: [LabelBillboard; 3],
}

impl GlobalAxes {
    pub fn arrow(&self, axis: Axis) -> ArrowLine {
        self.arrows[axis.index()]
    }

    pub fn label(&self, axis: Axis) -> LabelBillboard {
        self.labels[axis.index()]
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.arrows
            .iter()
            .map(|a| a.entity)
            .chain(self.labels.iter().map(|l| l.entity))
    }
}

/// `local_origin` ノードにまとめたギズモ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAxes {
    pub origin: EntityId,
    pub arrows: [ArrowLine; 3],
}

impl LocalAxes {
    pub fn arrow(&self, axis: Axis) -> ArrowLine {
        self.arrows[axis.index()]
    }

    /// ギズモ全体を `parent` のローカル座標系へ付け替える
    pub fn attach_to<S: SceneContext + ?Sized>(&self, scene: &mut S, parent: EntityId) -> Result<()> {
        scene.set_parent(self.origin, Some(parent))
    }
}

fn arrows<S: SceneContext + ?Sized>(
    scene: &mut S,
    prefix: &str,
    length: AxisLength,
    created: &mut Vec<EntityId>,
) -> Result<[ArrowLine; 3]> {
    let mut build = |axis: Axis| -> Result<ArrowLine> {
        let name = format!("{prefix}{}", axis.label());
        let entity = scene.create_lines(&name, arrow_strip(axis, length))?;
        created.push(entity);
        Ok(ArrowLine { axis, entity })
    };
    Ok([build(Axis::X)?, build(Axis::Y)?, build(Axis::Z)?])
}

/// ワールド座標の軸ギズモ（ラベル付き）
pub fn build_global_axes<S: SceneContext + ?Sized>(scene: &mut S, length: AxisLength) -> Result<GlobalAxes> {
    build_global_axes_with(scene, length, DEFAULT_LABEL_TEXTURE_SIZE)
}

/// ラベルのテクスチャサイズを指定できる版
pub fn build_global_axes_with<S: SceneContext + ?Sized>(
    scene: &mut S,
    length: AxisLength,
    label_texture_size: u32,
) -> Result<GlobalAxes> {
    all_or_nothing(scene, "axis gizmo", |scene, created| {
        let arrows = arrows(scene, "axis", length, created)?;

        let mut label = |axis: Axis| -> Result<LabelBillboard> {
            let entity = scene.create_text_plane(
                "TextPlane",
                axis.label(),
                axis.color(),
                label_size(length),
                label_texture_size,
            )?;
            created.push(entity);
            scene.set_position(entity, label_position(axis, length))?;
            Ok(LabelBillboard { axis, entity })
        };
        let labels = [label(Axis::X)?, label(Axis::Y)?, label(Axis::Z)?];

        debug!("built global axes (length {})", length.get());
        Ok(GlobalAxes { arrows, labels })
    })
}

/// ローカル座標の軸ギズモ（ラベルなし）
pub fn build_local_axes<S: SceneContext + ?Sized>(scene: &mut S, length: AxisLength) -> Result<LocalAxes> {
    all_or_nothing(scene, "axis gizmo", |scene, created| {
        let arrows = arrows(scene, "local_axis", length, created)?;

        let origin = scene.create_transform_node("local_origin")?;
        created.push(origin);
        for arrow in &arrows {
            scene.set_parent(arrow.entity, Some(origin))?;
        }

        debug!("built local axes (length {}) under {origin}", length.get());
        Ok(LocalAxes { origin, arrows })
    })
}
