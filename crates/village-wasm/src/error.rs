use thiserror::Error;
use village_scene::SceneError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl From<village_core::CoreError> for DemoError {
    fn from(err: village_core::CoreError) -> Self {
        DemoError::Scene(err.into())
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
