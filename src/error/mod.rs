use std::error::Error;
use thiserror::Error;

/// Everything that can go wrong while building a board.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("trivia source error: {0}")]
    DataSource(#[source] Box<dyn Error + Send + Sync>),
    #[error("category {0} not found")]
    NotFound(u64),
    #[error("wanted {requested} distinct categories but only {available} are available")]
    InsufficientCandidates { requested: usize, available: usize },
    #[error("category {category_id} has {available} clues, {requested} needed")]
    DataInsufficient {
        category_id: u64,
        requested: usize,
        available: usize,
    },
}

impl GameError {
    pub fn data_source(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        GameError::DataSource(err.into())
    }
}

impl From<reqwest::Error> for GameError {
    fn from(err: reqwest::Error) -> Self {
        GameError::data_source(err)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid value: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key}={value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("failed to read env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}
