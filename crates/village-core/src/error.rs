//! Error types for the scene world.

use thiserror::Error;

/// Errors raised by the world and its hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Packed entity ids ran out of index space
    #[error("entity limit reached ({0} entities)")]
    EntityLimit(u32),

    /// The entity was despawned or never existed
    #[error("entity {0} is not alive")]
    DeadEntity(u32),

    /// An entity cannot be its own parent
    #[error("entity {0} cannot be parented to itself")]
    SelfParent(u32),

    /// Attaching would make an entity its own ancestor
    #[error("parenting {child} under {parent} would create a cycle")]
    HierarchyCycle { child: u32, parent: u32 },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
