#![forbid(unsafe_code)]

pub mod codec;
pub mod repository;
pub mod sqlite;

pub use repository::{
    BlobStore, InMemoryRepository, PROGRESS_KEY, ProgressRepository, Storage, StorageError,
    THEME_KEY, ThemeRepository,
};
