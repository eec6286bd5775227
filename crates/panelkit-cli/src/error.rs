use panelkit_core::storage::StorageError;
use panelkit_core::{ConfigError, DocumentError};
use panelkit_render::RendererError;
use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_INPUT: i32 = 3;
pub const EXIT_IO: i32 = 4;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot load document: {0}")]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Storage: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Invalid script {path}: {reason}")]
    Script { path: PathBuf, reason: String },
    #[error("Page {index} out of range: document has {pages} page(s)")]
    PageOutOfRange { index: usize, pages: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Document(DocumentError::Io(_)) | Self::Io(_) => EXIT_IO,
            Self::Config(ConfigError::Io(_)) | Self::Storage(StorageError::Io(_)) => EXIT_IO,
            Self::Document(_)
            | Self::Config(_)
            | Self::Script { .. }
            | Self::PageOutOfRange { .. } => EXIT_INVALID_INPUT,
            Self::Storage(_) | Self::Render(_) => EXIT_FAILURE,
        }
    }
}
