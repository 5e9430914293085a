use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("Zombie not found: {0:?}")]
    ZombieNotFound(crate::core::types::ZombieId),

    #[error("Unknown zombie variant: {0}")]
    UnknownVariant(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;
