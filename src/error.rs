use crate::species::Species;
use thiserror::Error;

/// Rejected simulation parameters; raised before any board is allocated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{species} population {count} is outside 0..={max}")]
    PopulationOutOfRange {
        species: Species,
        count: usize,
        max: usize,
    },

    #[error("food quantity {count} is outside 0..={max}")]
    FoodOutOfRange { count: usize, max: usize },

    #[error("board dimensions {width}x{height} must both be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{required} occupants do not fit on a board of {capacity} cells")]
    BoardTooSmall { required: usize, capacity: usize },
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
