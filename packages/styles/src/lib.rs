//! # Blockcraft Styles
//!
//! Responsive style resolution and CSS generation for blocks.
//!
//! Two mechanisms, kept separate and combined at render time:
//!
//! - [`resolve_styles`] flattens a block's [`ElementStyles`] for one
//!   breakpoint into an inline-style map.
//! - [`generate_block_css`] emits real CSS text: a base rule, `@media`
//!   blocks for tablet/mobile overrides and pseudo-state rules.
//!
//! ## Fallback chain
//!
//! ```text
//! mobile → tablet → desktop → base → absent
//! ```
//!
//! Authors set defaults at desktop and only specify deltas for smaller
//! breakpoints. An unset (`null` or `""`) value never clears an inherited
//! one.
//!
//! [`ElementStyles`]: blockcraft_document::ElementStyles

mod breakpoints;
mod css;
mod generator;
mod property;
mod resolver;

pub use breakpoints::BreakpointConfig;
pub use css::{CssRule, StyleSheet};
pub use generator::{block_class, generate_block_css, generate_document_css};
pub use property::{css_property_name, css_value};
pub use resolver::{resolve_property, resolve_styles, to_inline_style, ResolvedStyles};
