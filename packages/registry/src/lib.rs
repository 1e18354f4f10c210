//! # Blockcraft Registry
//!
//! Maps block type keys (`core/heading`, `commerce/product-grid`) to their
//! metadata, attribute schema, variations and renderer.
//!
//! The registry is a plain value. Build one at startup, register the types
//! you need and hand it to whatever owns the editing session:
//!
//! ```rust,ignore
//! use blockcraft_registry::BlockRegistry;
//!
//! let mut registry = BlockRegistry::with_core_blocks();
//! registry.register(my_custom_block());
//!
//! for item in registry.inserter_items(Some("shop"), None) {
//!     println!("{}", item.metadata.title);
//! }
//! ```

mod attributes;
mod block_type;
mod library;
mod errors;
mod html;
mod registry;
mod renderer;

pub use attributes::{
    ButtonAttributes, GroupAttributes, HeadingAttributes, ImageAttributes, ParagraphAttributes,
    ProductGridAttributes, SpacerAttributes,
};
pub use block_type::{
    AttributeKind, AttributeSchema, AttributeSpec, BlockMetadata, BlockSupports, BlockTemplate,
    BlockType, BlockVariation,
};
pub use library::register_core_blocks;
pub use errors::RegistryError;
pub use html::escape_html;
pub use registry::{BlockRegistry, ALL_CATEGORIES};
pub use renderer::{BlockRenderer, RenderContext, RenderMode};
