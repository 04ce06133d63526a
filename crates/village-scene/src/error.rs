//! Error types for scene object construction.

use std::fmt;

use thiserror::Error;
use village_core::CoreError;

/// Kind of host resource that failed to allocate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Mesh,
    Lines,
    Texture,
    TransformNode,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Mesh => "mesh",
            ResourceKind::Lines => "line mesh",
            ResourceKind::Texture => "texture",
            ResourceKind::TransformNode => "transform node",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The scene could not create a requested object
    #[error("failed to allocate {resource}: {reason}")]
    ResourceAllocation { resource: ResourceKind, reason: String },

    /// Axis lengths must be positive and finite
    #[error("invalid axis length {0}")]
    InvalidLength(f32),

    /// Hierarchy or liveness errors from the world
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SceneError {
    pub fn allocation(resource: ResourceKind, reason: impl Into<String>) -> Self {
        SceneError::ResourceAllocation {
            resource,
            reason: reason.into(),
        }
    }
}

/// Result type alias using [`SceneError`].
pub type Result<T> = std::result::Result<T, SceneError>;
