//! Dataset store for the CVDP viewer
//!
//! Owns the loaded problem collection and the user's annotations (favorites,
//! solved marks, draft patches, saved solutions) and is the only writer of
//! persisted state.

pub mod keys;
pub mod loader;
pub mod filter;
pub mod annotations;
pub mod store;

pub use loader::{has_dataset_extension, load_lines, load_text, read_dataset_file, LoadReport, UploadedDataset};
pub use filter::{distinct_categories, distinct_difficulties, filter_records, Choice, FilterState, StatusFlag};
pub use annotations::Annotations;
pub use store::{DatasetStore, RestoredDataset};

use std::path::PathBuf;
use kvstore::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("bad value under {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
