//! Error types for the editor

use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Document error: {0}")]
    Document(#[from] blockcraft_document::DocumentError),

    #[error("Registry error: {0}")]
    Registry(#[from] blockcraft_registry::RegistryError),

    #[error("Session has no block registry")]
    NoRegistry,
}
