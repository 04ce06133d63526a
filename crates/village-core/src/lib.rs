pub mod components;
pub mod ecs;
pub mod error;
pub mod hierarchy;
pub mod math;
pub mod snapshot;

// Re-exports
pub use components::{Children, ModelUniform, Name, Parent, Transform};
pub use ecs::{EntityId, World};
pub use error::{CoreError, Result};
pub use snapshot::{EntitySnapshot, SceneSnapshot};
