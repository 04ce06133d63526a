//! シーン状態のシリアライズ用スナップショット

use serde::Serialize;

use crate::components::{Name, Transform};
use crate::ecs::{EntityId, World};

/// 1 Entity分の情報
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    pub world_position: [f32; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub entities: Vec<EntitySnapshot>,
}

impl SceneSnapshot {
    pub fn capture(world: &World) -> Self {
        Self::capture_with(world, |_, _| None)
    }

    /// `kind` で各Entityの種別名を付与する
    pub fn capture_with<F>(world: &World, kind: F) -> Self
    where
        F: Fn(&World, EntityId) -> Option<&'static str>,
    {
        let entities = world
            .iter_entities()
            .map(|id| EntitySnapshot {
                id,
                name: world.get::<Name>(id).map(|n| n.as_str().to_owned()),
                kind: kind(world, id),
                parent: world.parent(id),
                children: world.children(id).to_vec(),
                transform: world.get::<Transform>(id).copied(),
                world_position: world.world_position(id).to_array(),
            })
            .collect();
        Self { entities }
    }

    pub fn find_by_name(&self, name: &str) -> impl Iterator<Item = &EntitySnapshot> {
        self.entities
            .iter()
            .filter(move |e| e.name.as_deref() == Some(name))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_capture_hierarchy() {
        let mut world = World::new();
        let root = world.spawn().unwrap();
        world.insert(root, Name::new("local_origin"));
        world.insert(root, Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let child = world.spawn().unwrap();
        world.insert(child, Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));
        world.set_parent(child, root).unwrap();

        let snapshot = SceneSnapshot::capture(&world);
        assert_eq!(snapshot.entities.len(), 2);
        assert_eq!(snapshot.entities[0].children, vec![child]);
        assert_eq!(snapshot.entities[1].parent, Some(root));
        assert_eq!(snapshot.entities[1].world_position, [1.0, 1.0, 0.0]);
        assert_eq!(snapshot.find_by_name("local_origin").count(), 1);
    }

    #[test]
    fn test_kind_and_json() {
        let mut world = World::new();
        let e = world.spawn().unwrap();
        world.insert(e, Name::new("ground"));

        let snapshot = SceneSnapshot::capture_with(&world, |_, _| Some("mesh"));
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        let first = &value["entities"][0];
        assert_eq!(first["name"], "ground");
        assert_eq!(first["kind"], "mesh");
        assert!(first.get("parent").is_none());
        assert!(first.get("transform").is_none());
    }
}
