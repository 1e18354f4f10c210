//! # Blockcraft Editor
//!
//! Editing engine for block documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: blocks + tree operations          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: history + mutations + UI state      │
//! │  - Every edit is one snapshot commit        │
//! │  - Undo/redo swap shared snapshots          │
//! │  - Selection follows the tree               │
//! │  - Saving goes through a DocumentStore      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: Document → HTML + CSS             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockcraft_editor::{EditSession, MemoryStore};
//!
//! let mut session = EditSession::new(Document::default())
//!     .with_registry(Arc::new(BlockRegistry::with_core_blocks()));
//!
//! session.insert_new("core/heading", Attributes::new(), None, None)?;
//! session.undo();
//! session.redo();
//!
//! session.save(&mut store, "home")?;
//! ```

mod config;
mod errors;
mod history;
mod mutations;
mod selection;
mod session;
mod store;

pub use config::{EditorConfig, ZoomConfig};
pub use errors::EditorError;
pub use history::{History, Snapshot};
pub use mutations::{BlockPatch, Effect, Mutation};
pub use selection::{EditorUiState, InserterState};
pub use session::{EditOutcome, EditSession, Transaction};
pub use store::{DocumentStore, FileStore, MemoryStore, StoreError};
