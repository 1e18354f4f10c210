//! # Blockcraft Renderer
//!
//! Document → HTML + CSS.
//!
//! ```text
//! Document ──► registry lookup ──► BlockRenderer::edit / save ──► HTML
//!     │
//!     └──────► styles: resolve (edit) / generate CSS (save) ──────► CSS
//! ```
//!
//! In edit mode every block carries inline styles resolved for the previewed
//! device, so the canvas shows exactly one breakpoint. In save mode styles
//! move to class rules with `@media` overrides, so the published page adapts
//! to the visitor's viewport. Pseudo-state styles are CSS in both modes; in
//! edit mode they are `!important` so hover and focus beat the inline styles.

mod pipeline;

pub use blockcraft_registry::RenderMode;
pub use pipeline::{RenderOptions, RenderedPage, Renderer};
