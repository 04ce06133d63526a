use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

use super::component::Component;
use super::entity::{EntityId, MAX_INDEX};
use super::storage::ComponentStorage;
use crate::error::{CoreError, Result};

/// Entity生存情報
struct EntityMeta {
    generation: u32,
    alive: bool,
}

/// 型消去されたストレージ
trait AnyStorage: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn remove_entity(&mut self, entity: EntityId);
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn remove_entity(&mut self, entity: EntityId) {
        self.remove(entity);
    }
}

/// シーンの登録先
///
/// メッシュ・ノード・ラベルなど全シーンオブジェクトはEntityとして作られ、
/// 付随データはコンポーネントとして型ごとのストレージに入る。
pub struct World {
    entities: Vec<EntityMeta>,
    free_list: Vec<u32>,
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,
    max_entities: u32,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entity_count())
            .field("storages", &self.storages.len())
            .field("max_entities", &self.max_entities)
            .finish_non_exhaustive()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_entity_limit(MAX_INDEX + 1)
    }

    /// 同時に生存できるEntity数を制限したWorld
    /// パック済みIDの表現範囲を超える値は切り詰める
    pub fn with_entity_limit(limit: u32) -> Self {
        Self {
            entities: Vec::new(),
            free_list: Vec::new(),
            storages: HashMap::new(),
            max_entities: limit.min(MAX_INDEX + 1),
        }
    }

    /// 新規Entityを生成
    pub fn spawn(&mut self) -> Result<EntityId> {
        if self.entity_count() >= self.max_entities as usize {
            warn!("entity limit {} reached", self.max_entities);
            return Err(CoreError::EntityLimit(self.max_entities));
        }

        if let Some(index) = self.free_list.pop() {
            // 再利用: 世代番号を進める（パック範囲で一周したら1に戻す）
            let meta = &mut self.entities[index as usize];
            meta.generation = if meta.generation >= 0xFFF { 1 } else { meta.generation + 1 };
            meta.alive = true;
            return Ok(EntityId::new(index, meta.generation));
        }

        let index = self.entities.len() as u32;
        self.entities.push(EntityMeta {
            generation: 1,
            alive: true,
        });
        Ok(EntityId::new(index, 1))
    }

    /// Entityを削除
    /// 親子関係は解除され、子はルートに戻る
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        self.unlink(entity);

        let index = entity.index();
        self.entities[index as usize].alive = false;
        self.free_list.push(index);

        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }

        debug!("despawned entity {}", entity);
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.entities
            .get(entity.index() as usize)
            .is_some_and(|meta| meta.alive && meta.generation == entity.generation())
    }

    /// 生存確認付きの検証
    pub fn ensure_alive(&self, entity: EntityId) -> Result<()> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(CoreError::DeadEntity(entity.to_u32()))
        }
    }

    /// コンポーネントを追加（既存なら置き換え）
    /// 削除済みEntityへの追加は無視する
    pub fn insert<T: Component>(&mut self, entity: EntityId, component: T) {
        if !self.is_alive(entity) {
            warn!("ignored insert on dead entity {}", entity);
            return;
        }
        self.storage_or_default::<T>().insert(entity, component);
    }

    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage::<T>()?.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage_mut::<T>()?.get_mut(entity)
    }

    pub fn remove<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage_mut::<T>()?.remove(entity)
    }

    pub fn has<T: Component>(&self, entity: EntityId) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// 生存Entityをindex順にイテレート
    pub fn iter_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, meta)| meta.alive)
            .map(|(index, meta)| EntityId::new(index as u32, meta.generation))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len() - self.free_list.len()
    }

    /// 指定コンポーネントを持つEntityをindex順にイテレート
    pub fn iter_with<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.iter_entities()
            .filter_map(|entity| self.get::<T>(entity).map(|component| (entity, component)))
    }

    fn storage_or_default<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()));
        match storage.as_any_mut().downcast_mut::<ComponentStorage<T>>() {
            Some(storage) => storage,
            // TypeIdをキーにしているので別型は入らない
            None => unreachable!("storage keyed by TypeId holds another type"),
        }
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
