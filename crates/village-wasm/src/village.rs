//! 地面と家並み
//!
//! 家は箱と三角柱の屋根を1つのメッシュに結合し、2種類の原型から
//! 配置表どおりにインスタンスを並べる。

use std::f32::consts::PI;

use log::info;
use village_core::{EntityId, Transform};
use village_scene::glam::{Mat4, Quat, Vec3, Vec4};
use village_scene::primitives::{BoxOptions, CylinderOptions, create_box, create_cylinder, create_ground};
use village_scene::{
    Color3, Mesh, Result, SceneContext, StandardMaterial, TextureSource, all_or_nothing,
};

pub const SEMI_HOUSE_TEXTURE: &str = "https://assets.babylonjs.com/environments/semihouse.png";
pub const CUBE_HOUSE_TEXTURE: &str = "https://assets.babylonjs.com/environments/cubehouse.png";
pub const ROOF_TEXTURE: &str = "https://assets.babylonjs.com/environments/roof.jpg";

pub const GROUND_WIDTH: f32 = 15.0;
pub const GROUND_HEIGHT: f32 = 16.0;

/// 家の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseKind {
    /// 1区画の戸建て
    Detached,
    /// 2区画の長屋
    Semi,
}

impl HouseKind {
    pub fn width(self) -> f32 {
        match self {
            HouseKind::Detached => 1.0,
            HouseKind::Semi => 2.0,
        }
    }

    fn texture(self) -> &'static str {
        match self {
            HouseKind::Detached => CUBE_HOUSE_TEXTURE,
            HouseKind::Semi => SEMI_HOUSE_TEXTURE,
        }
    }

    /// 背面・正面・右・左のテクスチャ範囲
    fn wall_uv(self) -> [Vec4; 4] {
        match self {
            HouseKind::Detached => [
                Vec4::new(0.5, 0.0, 0.75, 1.0),
                Vec4::new(0.0, 0.0, 0.25, 1.0),
                Vec4::new(0.25, 0.0, 0.5, 1.0),
                Vec4::new(0.75, 0.0, 1.0, 1.0),
            ],
            HouseKind::Semi => [
                Vec4::new(0.6, 0.0, 1.0, 1.0),
                Vec4::new(0.0, 0.0, 0.4, 1.0),
                Vec4::new(0.4, 0.0, 0.6, 1.0),
                Vec4::new(0.4, 0.0, 0.6, 1.0),
            ],
        }
    }
}

/// 配置: (種類, Y回転, x, z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HousePlacement {
    pub kind: HouseKind,
    pub rotation_y: f32,
    pub x: f32,
    pub z: f32,
}

const fn place(kind: HouseKind, rotation_y: f32, x: f32, z: f32) -> HousePlacement {
    HousePlacement { kind, rotation_y, x, z }
}

pub const PLACES: [HousePlacement; 17] = [
    place(HouseKind::Detached, -PI / 16.0, -6.8, 2.5),
    place(HouseKind::Semi, -PI / 16.0, -4.5, 3.0),
    place(HouseKind::Semi, -PI / 16.0, -1.5, 4.0),
    place(HouseKind::Semi, -PI / 3.0, 1.5, 6.0),
    place(HouseKind::Semi, 15.0 * PI / 16.0, -6.4, -1.5),
    place(HouseKind::Detached, 15.0 * PI / 16.0, -4.1, -1.0),
    place(HouseKind::Semi, 15.0 * PI / 16.0, -2.1, -0.5),
    place(HouseKind::Detached, 5.0 * PI / 4.0, 0.0, -1.0),
    place(HouseKind::Detached, PI + PI / 2.5, 0.5, -3.0),
    place(HouseKind::Semi, PI + PI / 2.1, 0.75, -5.0),
    place(HouseKind::Detached, PI + PI / 2.25, 0.75, -7.0),
    place(HouseKind::Semi, PI / 1.9, 4.75, -1.0),
    place(HouseKind::Detached, PI / 1.95, 4.5, -3.0),
    place(HouseKind::Semi, PI / 1.9, 4.75, -5.0),
    place(HouseKind::Detached, PI / 1.9, 4.75, -7.0),
    place(HouseKind::Semi, -PI / 3.0, 5.25, 2.0),
    place(HouseKind::Detached, -PI / 3.0, 6.0, 4.0),
];

impl HousePlacement {
    pub fn transform(&self) -> Transform {
        Transform::new(
            Vec3::new(self.x, 0.0, self.z),
            Quat::from_rotation_y(self.rotation_y),
            Vec3::ONE,
        )
    }
}

/// 家のメッシュ（SubMesh 0: 壁, 1: 屋根）とマテリアル
pub fn house_mesh(kind: HouseKind) -> (Mesh, Vec<StandardMaterial>) {
    let width = kind.width();
    let [rear, front, right, left] = kind.wall_uv();
    let mut face_uv = BoxOptions::default().face_uv;
    face_uv[..4].copy_from_slice(&[rear, front, right, left]);

    let walls = create_box(&BoxOptions {
        width,
        face_uv,
        ..BoxOptions::default()
    });
    let roof = create_cylinder(&CylinderOptions {
        diameter: 1.3,
        height: 1.2,
        tessellation: 3,
    });

    let walls_at = Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0));
    let roof_at = Mat4::from_scale_rotation_translation(
        Vec3::new(0.75, width, 1.0),
        Quat::from_rotation_z(PI / 2.0),
        Vec3::new(0.0, 1.22, 0.0),
    );
    let mesh = Mesh::merge(&[(&walls, walls_at), (&roof, roof_at)]);

    let materials = vec![
        StandardMaterial::new("boxMat").with_texture(TextureSource::url(kind.texture())),
        StandardMaterial::new("roofMat").with_texture(TextureSource::url(ROOF_TEXTURE)),
    ];
    (mesh, materials)
}

pub fn build_ground<S: SceneContext + ?Sized>(scene: &mut S) -> Result<EntityId> {
    let material = StandardMaterial::new("groundMat").with_diffuse_color(Color3::GREEN);
    scene.create_mesh("ground", create_ground(GROUND_WIDTH, GROUND_HEIGHT), vec![material])
}

pub fn build_house<S: SceneContext + ?Sized>(scene: &mut S, name: &str, kind: HouseKind) -> Result<EntityId> {
    let (mesh, materials) = house_mesh(kind);
    scene.create_mesh(name, mesh, materials)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dwellings {
    pub ground: EntityId,
    pub detached_house: EntityId,
    pub semi_house: EntityId,
    pub houses: Vec<EntityId>,
}

/// 地面、原型2棟、配置表の17棟
///
/// 途中で失敗した場合は作成済みの分を破棄する。
pub fn build_dwellings<S: SceneContext + ?Sized>(scene: &mut S) -> Result<Dwellings> {
    all_or_nothing(scene, "village", |scene, created| {
        let ground = build_ground(scene)?;
        created.push(ground);

        // 原型は配置表の先頭2棟と同じ位置に置く
        let detached_house = build_house(scene, "detached_house", HouseKind::Detached)?;
        created.push(detached_house);
        scene.set_transform(detached_house, PLACES[0].transform())?;
        let semi_house = build_house(scene, "semi_house", HouseKind::Semi)?;
        created.push(semi_house);
        scene.set_transform(semi_house, PLACES[1].transform())?;

        let mut houses = Vec::with_capacity(PLACES.len());
        for (i, placement) in PLACES.iter().enumerate() {
            let source = match placement.kind {
                HouseKind::Detached => detached_house,
                HouseKind::Semi => semi_house,
            };
            let house = scene.create_instance(&format!("house{i}"), source)?;
            created.push(house);
            scene.set_transform(house, placement.transform())?;
            houses.push(house);
        }

        info!("built village: {} houses", houses.len());
        Ok(Dwellings { ground, detached_house, semi_house, houses })
    })
}
