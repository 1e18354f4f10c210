//! # Blockcraft Document
//!
//! Data model for block documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: blocks, styles, breakpoints, ids  │
//! └─────────────────────────────────────────────┘
//!          ↓                         ↓
//! ┌──────────────────────┐ ┌────────────────────┐
//! │ editor: history +    │ │ styles: resolver + │
//! │ mutations + session  │ │ CSS generation     │
//! └──────────────────────┘ └────────────────────┘
//! ```
//!
//! A [`Document`] is an ordered list of top-level [`BlockNode`]s. Each node
//! owns its children, so the whole thing is a plain tree: no shared
//! ownership, no cycles. Tree operations live on [`Document`] and are
//! in-place; callers that need snapshots clone first.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockcraft_document::{BlockNode, Document, SequentialIdGenerator};
//!
//! let mut ids = SequentialIdGenerator::new("home");
//! let mut doc = Document::default();
//! doc.insert(None, None, BlockNode::new(ids.next_id(), "core/heading"))?;
//! ```

mod breakpoint;
mod document;
mod error;
mod id;
mod node;
mod style;
mod validation;

pub use breakpoint::Breakpoint;
pub use document::Document;
pub use error::{DocumentError, TreeError};
pub use id::{BlockId, IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
pub use node::{Attributes, BlockNode};
pub use style::{is_set, ElementStyles, PseudoState, StyleMap};
pub use validation::{ValidationIssue, ValidationKind};
