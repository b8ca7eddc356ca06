use retro_lpl_core::IdentityError;
use retro_lpl_rdb::RdbError;
use thiserror::Error;

/// Errors that abort a playlist operation.
#[derive(Debug, Error)]
pub enum LplError {
    /// Reading or hashing an entry's file failed
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A catalog could not be resolved or decoded
    #[error(transparent)]
    Rdb(#[from] RdbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The playlist is not valid JSON
    #[error("Invalid playlist: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No items found in file")]
    MissingItems,

    /// A declared value or entry is malformed
    #[error("{0}")]
    Format(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl LplError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
