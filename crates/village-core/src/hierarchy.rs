//! 親子関係とワールド変換の合成
//!
//! 子の `Transform` は常に親からの相対値として保持し、
//! ワールド行列は `親のワールド行列 * 子のローカル行列` で求める。

use log::debug;

use crate::components::{Children, Parent, Transform};
use crate::ecs::{EntityId, World};
use crate::error::{CoreError, Result};
use crate::math::{Mat4, Vec3};

impl World {
    /// 親を設定（ローカル変換はそのまま）
    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) -> Result<()> {
        self.ensure_alive(child)?;
        self.ensure_alive(parent)?;

        if child == parent {
            return Err(CoreError::SelfParent(child.to_u32()));
        }
        if self.is_ancestor(child, parent) {
            return Err(CoreError::HierarchyCycle {
                child: child.to_u32(),
                parent: parent.to_u32(),
            });
        }

        self.unlink_from_parent(child);
        self.insert(child, Parent(parent));
        match self.get_mut::<Children>(parent) {
            Some(children) => children.0.push(child),
            None => self.insert(parent, Children(vec![child])),
        }

        debug!("attached {} under {}", child, parent);
        Ok(())
    }

    /// 親を設定し、ワールド上の位置・回転・スケールを維持する
    pub fn set_parent_keep_world(&mut self, child: EntityId, parent: EntityId) -> Result<()> {
        let child_world = self.world_matrix(child);
        self.set_parent(child, parent)?;

        let local = self.world_matrix(parent).inverse() * child_world;
        self.insert(child, Transform::from_matrix(local));
        Ok(())
    }

    /// 親子関係を解除してルートに戻す（ローカル変換はそのまま）
    pub fn clear_parent(&mut self, child: EntityId) -> Result<()> {
        self.ensure_alive(child)?;
        self.unlink_from_parent(child);
        Ok(())
    }

    pub fn parent(&self, child: EntityId) -> Option<EntityId> {
        self.get::<Parent>(child).map(|p| p.0)
    }

    pub fn children(&self, parent: EntityId) -> &[EntityId] {
        self.get::<Children>(parent).map(|c| c.0.as_slice()).unwrap_or(&[])
    }

    /// `ancestor` が `entity` の祖先（または同一）かどうか
    pub fn is_ancestor(&self, ancestor: EntityId, entity: EntityId) -> bool {
        let mut current = Some(entity);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// ローカル行列を親方向に合成したワールド行列
    /// Transformを持たないノードは単位行列として扱う
    pub fn world_matrix(&self, entity: EntityId) -> Mat4 {
        let mut matrix = self.local_matrix(entity);
        let mut current = self.parent(entity);
        while let Some(parent) = current {
            matrix = self.local_matrix(parent) * matrix;
            current = self.parent(parent);
        }
        matrix
    }

    pub fn world_position(&self, entity: EntityId) -> Vec3 {
        self.world_matrix(entity).transform_point3(Vec3::ZERO)
    }

    /// 子孫ごと削除し、削除した数を返す
    pub fn despawn_recursive(&mut self, entity: EntityId) -> usize {
        if !self.is_alive(entity) {
            return 0;
        }

        let mut stack = vec![entity];
        let mut order = Vec::new();
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.children(node).iter().copied());
        }

        // 葉から削除して親側のChildren更新を最小にする
        order
            .into_iter()
            .rev()
            .filter(|&node| self.despawn(node))
            .count()
    }

    fn local_matrix(&self, entity: EntityId) -> Mat4 {
        self.get::<Transform>(entity)
            .map(Transform::to_matrix)
            .unwrap_or(Mat4::IDENTITY)
    }

    fn unlink_from_parent(&mut self, child: EntityId) {
        let Some(Parent(parent)) = self.remove::<Parent>(child) else {
            return;
        };
        if let Some(children) = self.get_mut::<Children>(parent) {
            children.0.retain(|&c| c != child);
        }
    }

    /// despawn前に呼ばれる。親からは外し、子はルートに戻す
    pub(crate) fn unlink(&mut self, entity: EntityId) {
        self.unlink_from_parent(entity);
        if let Some(Children(children)) = self.remove::<Children>(entity) {
            for child in children {
                self.remove::<Parent>(child);
            }
        }
    }
}
