//! Error types for the registry

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block type '{block}' has no variation '{variation}'")]
    UnknownVariation { block: String, variation: String },

    #[error("Attribute '{attribute}' of '{block}' should be {expected}")]
    InvalidAttribute {
        block: String,
        attribute: String,
        expected: String,
    },
}
