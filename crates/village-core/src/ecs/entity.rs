use std::fmt;
use std::num::NonZeroU32;

use serde::{Serialize, Serializer};

/// パック済みIDのindex部のビット数
pub const INDEX_BITS: u32 = 20;
/// パック済みIDのgeneration部のビット数
pub const GENERATION_BITS: u32 = 12;
/// 割り当て可能なindexの上限値（この値を含む）
pub const MAX_INDEX: u32 = (1 << INDEX_BITS) - 1;

const GENERATION_MASK: u32 = (1 << GENERATION_BITS) - 1;

/// シーンオブジェクトのハンドル（世代番号付き）
///
/// JS側とは `to_u32` でパックした値をやり取りする。
/// 上位12bitがgeneration、下位20bitがindex。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: NonZeroU32,
}

impl EntityId {
    /// generationが0の場合は1に丸める（0は無効値として予約）
    pub fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation: NonZeroU32::new(generation).unwrap_or(NonZeroU32::MIN),
        }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation.get()
    }

    /// JS受け渡し用のパック値
    #[inline]
    pub fn to_u32(&self) -> u32 {
        ((self.generation.get() & GENERATION_MASK) << INDEX_BITS) | (self.index & MAX_INDEX)
    }

    /// パック値から復元（generationが0の値は発行されないので `None`）
    #[inline]
    pub fn from_u32(id: u32) -> Option<Self> {
        let generation = NonZeroU32::new((id >> INDEX_BITS) & GENERATION_MASK)?;
        Some(Self {
            index: id & MAX_INDEX,
            generation,
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

// スナップショットではパック値として書き出す
impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.to_u32())
    }
}
