use super::component::Component;
use super::entity::EntityId;

/// SparseSet方式のコンポーネント格納先
///
/// `dense` と `owners` は同じ並びで、`slots[entity.index]` が
/// dense側の位置を指す。削除は末尾との入れ替えで O(1)。
pub struct ComponentStorage<T: Component> {
    dense: Vec<T>,
    owners: Vec<EntityId>,
    slots: Vec<Option<usize>>,
}

impl<T: Component> ComponentStorage<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            owners: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// dense側の位置（世代が一致する場合のみ）
    fn slot(&self, entity: EntityId) -> Option<usize> {
        let dense_index = (*self.slots.get(entity.index() as usize)?)?;
        (self.owners[dense_index] == entity).then_some(dense_index)
    }

    /// 挿入。既に持っている場合は置き換えて古い値を返す
    pub fn insert(&mut self, entity: EntityId, component: T) -> Option<T> {
        let index = entity.index() as usize;
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }

        if let Some(dense_index) = self.slots[index] {
            // 同じindexの旧世代が残っていても上書きする
            self.owners[dense_index] = entity;
            return Some(std::mem::replace(&mut self.dense[dense_index], component));
        }

        self.slots[index] = Some(self.dense.len());
        self.dense.push(component);
        self.owners.push(entity);
        None
    }

    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.slot(entity).map(|i| &self.dense[i])
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.slot(entity).map(|i| &mut self.dense[i])
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        let dense_index = self.slot(entity)?;
        self.slots[entity.index() as usize] = None;

        let last = self.dense.len() - 1;
        if dense_index != last {
            let moved = self.owners[last];
            self.slots[moved.index() as usize] = Some(dense_index);
        }

        self.owners.swap_remove(dense_index);
        Some(self.dense.swap_remove(dense_index))
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.slot(entity).is_some()
    }

    /// 格納順（挿入順とは限らない）でイテレート
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.owners.iter().copied().zip(self.dense.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
