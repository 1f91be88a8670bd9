//! Key-value persistence for the CVDP viewer
//!
//! A small string-keyed store with whole-value overwrite semantics. Callers
//! serialize their own values; the store never interprets them.

mod storage;
mod file;

pub use storage::{Storage, InMemoryStorage};
pub use file::FileBackedStorage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
