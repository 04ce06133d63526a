//! ホストシーンとの境界
//!
//! ビルダーはグローバル状態を持たず、`SceneContext` を引数で受け取って
//! オブジェクトを生成する。`village_core::World` がその実装。

use glam::Vec3;
use log::{debug, warn};
use village_core::{CoreError, EntityId, Name, Transform, World};

use crate::color::Color3;
use crate::error::{ResourceKind, Result, SceneError};
use crate::lines::LineStrip;
use crate::material::StandardMaterial;
use crate::mesh::Mesh;
use crate::primitives::create_plane;
use crate::text::TextTexture;

/// 三角形メッシュとマテリアル（SubMeshごと、または1つ）
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRenderer {
    pub mesh: Mesh,
    pub materials: Vec<StandardMaterial>,
}

impl village_core::ecs::Component for MeshRenderer {}

/// 線メッシュ
#[derive(Debug, Clone, PartialEq)]
pub struct LinesRenderer(pub LineStrip);

impl village_core::ecs::Component for LinesRenderer {}

/// ジオメトリを持たないグループ用ノード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformNode;

impl village_core::ecs::Component for TransformNode {}

/// 常にカメラの方を向く
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Billboard;

impl village_core::ecs::Component for Billboard {}

/// 別Entityのメッシュ・マテリアルを共有するインスタンス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceOf(pub EntityId);

impl village_core::ecs::Component for InstanceOf {}

/// シーンオブジェクトの生成・配置・破棄
pub trait SceneContext {
    fn create_lines(&mut self, name: &str, strip: LineStrip) -> Result<EntityId>;

    /// 文字テクスチャを貼った `size` 四方の平面
    fn create_text_plane(
        &mut self,
        name: &str,
        text: &str,
        color: Color3,
        size: f32,
        texture_size: u32,
    ) -> Result<EntityId>;

    fn create_transform_node(&mut self, name: &str) -> Result<EntityId>;

    fn create_mesh(
        &mut self,
        name: &str,
        mesh: Mesh,
        materials: Vec<StandardMaterial>,
    ) -> Result<EntityId>;

    fn create_instance(&mut self, name: &str, source: EntityId) -> Result<EntityId>;

    fn transform(&self, entity: EntityId) -> Option<Transform>;

    fn set_transform(&mut self, entity: EntityId, transform: Transform) -> Result<()>;

    fn set_position(&mut self, entity: EntityId, position: Vec3) -> Result<()> {
        let mut transform = self
            .transform(entity)
            .ok_or(CoreError::DeadEntity(entity.to_u32()))?;
        transform.position = position;
        self.set_transform(entity, transform)
    }

    /// `None` でルートに戻す。子のローカル変換は変えない
    fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<()>;

    /// 子孫ごと破棄する。破棄済みなら何もしない
    fn dispose(&mut self, entity: EntityId);
}

/// 生成途中で失敗したら作成済みのオブジェクトを破棄してからエラーを返す
///
/// `build` は作成したオブジェクトを `created` に積む。
pub fn all_or_nothing<S, T, F>(scene: &mut S, what: &str, build: F) -> Result<T>
where
    S: SceneContext + ?Sized,
    F: FnOnce(&mut S, &mut Vec<EntityId>) -> Result<T>,
{
    let mut created = Vec::new();
    match build(scene, &mut created) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!("{what} construction failed, disposing {} objects: {err}", created.len());
            for entity in created.into_iter().rev() {
                scene.dispose(entity);
            }
            Err(err)
        }
    }
}

fn spawn_named(world: &mut World, name: &str, resource: ResourceKind) -> Result<EntityId> {
    let entity = world
        .spawn()
        .map_err(|e| SceneError::allocation(resource, e.to_string()))?;
    world.insert(entity, Name::new(name));
    world.insert(entity, Transform::identity());
    Ok(entity)
}

impl SceneContext for World {
    fn create_lines(&mut self, name: &str, strip: LineStrip) -> Result<EntityId> {
        if strip.points.len() < 2 {
            return Err(SceneError::allocation(
                ResourceKind::Lines,
                format!("line strip needs at least 2 points, got {}", strip.points.len()),
            ));
        }
        let entity = spawn_named(self, name, ResourceKind::Lines)?;
        self.insert(entity, LinesRenderer(strip));
        debug!("created lines {name} ({entity})");
        Ok(entity)
    }

    fn create_text_plane(
        &mut self,
        name: &str,
        text: &str,
        color: Color3,
        size: f32,
        texture_size: u32,
    ) -> Result<EntityId> {
        let texture = TextTexture::rasterize(text, color, texture_size)?;
        let entity = spawn_named(self, name, ResourceKind::Mesh)?;
        self.insert(
            entity,
            MeshRenderer {
                mesh: create_plane(size),
                materials: vec![StandardMaterial::text_plane(texture)],
            },
        );
        self.insert(entity, Billboard);
        debug!("created text plane {name} {text:?} ({entity})");
        Ok(entity)
    }

    fn create_transform_node(&mut self, name: &str) -> Result<EntityId> {
        let entity = spawn_named(self, name, ResourceKind::TransformNode)?;
        self.insert(entity, TransformNode);
        Ok(entity)
    }

    fn create_mesh(
        &mut self,
        name: &str,
        mesh: Mesh,
        materials: Vec<StandardMaterial>,
    ) -> Result<EntityId> {
        let entity = spawn_named(self, name, ResourceKind::Mesh)?;
        debug!(
            "created mesh {name} ({entity}): {} vertices, {} materials",
            mesh.vertex_count(),
            materials.len()
        );
        self.insert(entity, MeshRenderer { mesh, materials });
        Ok(entity)
    }

    fn create_instance(&mut self, name: &str, source: EntityId) -> Result<EntityId> {
        self.ensure_alive(source)?;
        if !self.has::<MeshRenderer>(source) {
            return Err(SceneError::allocation(
                ResourceKind::Mesh,
                format!("instance source {source} has no mesh"),
            ));
        }
        let entity = spawn_named(self, name, ResourceKind::Mesh)?;
        self.insert(entity, InstanceOf(source));
        Ok(entity)
    }

    fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.get::<Transform>(entity).copied()
    }

    fn set_transform(&mut self, entity: EntityId, transform: Transform) -> Result<()> {
        self.ensure_alive(entity)?;
        self.insert(entity, transform);
        Ok(())
    }

    fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<()> {
        match parent {
            Some(parent) => World::set_parent(self, child, parent)?,
            None => self.clear_parent(child)?,
        }
        Ok(())
    }

    fn dispose(&mut self, entity: EntityId) {
        let count = self.despawn_recursive(entity);
        if count > 0 {
            debug!("disposed {entity} ({count} objects)");
        }
    }
}

/// スナップショット用の種別名
pub fn object_kind(world: &World, entity: EntityId) -> Option<&'static str> {
    if world.has::<LinesRenderer>(entity) {
        Some("lines")
    } else if world.has::<Billboard>(entity) {
        Some("text_plane")
    } else if world.has::<MeshRenderer>(entity) {
        Some("mesh")
    } else if world.has::<InstanceOf>(entity) {
        Some("instance")
    } else if world.has::<TransformNode>(entity) {
        Some("transform_node")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{BoxOptions, create_box};

    #[test]
    fn test_create_lines_registers_name_and_strip() {
        let mut world = World::new();
        let strip = LineStrip::new(vec![Vec3::ZERO, Vec3::X], Color3::RED);
        let e = world.create_lines("axisX", strip.clone()).unwrap();

        assert_eq!(world.get::<Name>(e).map(Name::as_str), Some("axisX"));
        assert_eq!(world.get::<LinesRenderer>(e), Some(&LinesRenderer(strip)));
        assert_eq!(world.transform(e), Some(Transform::identity()));
        assert_eq!(object_kind(&world, e), Some("lines"));
    }

    #[test]
    fn test_degenerate_lines_rejected() {
        let mut world = World::new();
        let err = world
            .create_lines("dot", LineStrip::new(vec![Vec3::ZERO], Color3::RED))
            .unwrap_err();
        assert!(matches!(err, SceneError::ResourceAllocation { resource: ResourceKind::Lines, .. }));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_text_plane() {
        let mut world = World::new();
        let e = world.create_text_plane("TextPlane", "X", Color3::RED, 0.6, 50).unwrap();
        let renderer = world.get::<MeshRenderer>(e).unwrap();
        assert_eq!(renderer.mesh.vertex_count(), 4);
        assert!(!renderer.materials[0].back_face_culling);
        assert!(world.has::<Billboard>(e));
        assert_eq!(object_kind(&world, e), Some("text_plane"));
    }

    #[test]
    fn test_text_plane_texture_failure_allocates_nothing() {
        let mut world = World::new();
        assert!(world.create_text_plane("TextPlane", "X", Color3::RED, 0.6, 0).is_err());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_entity_limit_maps_to_allocation_failure() {
        let mut world = World::with_entity_limit(0);
        let err = world.create_transform_node("local_origin").unwrap_err();
        assert_eq!(
            err,
            SceneError::allocation(ResourceKind::TransformNode, "entity limit reached (0 entities)")
        );
    }

    #[test]
    fn test_instance_requires_mesh_source() {
        let mut world = World::new();
        let node = world.create_transform_node("n").unwrap();
        assert!(world.create_instance("house0", node).is_err());

        let mesh = world
            .create_mesh("box", create_box(&BoxOptions::default()), vec![])
            .unwrap();
        let inst = world.create_instance("house0", mesh).unwrap();
        assert_eq!(world.get::<InstanceOf>(inst), Some(&InstanceOf(mesh)));
        assert_eq!(object_kind(&world, inst), Some("instance"));
    }

    #[test]
    fn test_set_position_and_parent() {
        let mut world = World::new();
        let node = world.create_transform_node("local_origin").unwrap();
        let child = world.create_transform_node("child").unwrap();
        SceneContext::set_position(&mut world, node, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        SceneContext::set_parent(&mut world, child, Some(node)).unwrap();

        assert_eq!(world.world_position(child), Vec3::new(1.0, 2.0, 3.0));
        SceneContext::set_parent(&mut world, child, None).unwrap();
        assert_eq!(world.world_position(child), Vec3::ZERO);
    }

    #[test]
    fn test_dispose_is_recursive_and_idempotent() {
        let mut world = World::new();
        let node = world.create_transform_node("local_origin").unwrap();
        let child = world.create_transform_node("child").unwrap();
        SceneContext::set_parent(&mut world, child, Some(node)).unwrap();

        world.dispose(node);
        world.dispose(node);
        assert_eq!(world.entity_count(), 0);
    }
}
