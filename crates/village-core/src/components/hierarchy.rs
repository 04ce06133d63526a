use crate::ecs::{Component, EntityId};

/// 親ノードへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub EntityId);

impl Component for Parent {}

/// 子ノード一覧（追加順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(pub Vec<EntityId>);

impl Children {
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Component for Children {}
