//! # Edit Session
//!
//! One user's editing state: the document history, the canvas UI state and
//! the services edits need (id generation, the block registry).
//!
//! Every structural edit computes a whole new tree from `present` and
//! commits it once, so each edit (or [`transaction`](EditSession::transaction))
//! is exactly one undo step. Edits that cannot apply (unknown target, cycle,
//! no change) are [`EditOutcome::Noop`] and leave history untouched.

use crate::config::EditorConfig;
use crate::history::{History, Snapshot};
use crate::mutations::{BlockPatch, Effect, Mutation};
use crate::selection::EditorUiState;
use crate::store::DocumentStore;
use crate::EditorError;
use blockcraft_document::{
    Attributes, BlockId, BlockNode, Document, IdGenerator, TimestampIdGenerator, TreeError,
    ValidationIssue,
};
use blockcraft_registry::{BlockRegistry, BlockType};
use blockcraft_styles::{resolve_styles, ResolvedStyles};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of an edit request
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Committed as one history entry
    Applied { version: u64, effects: Vec<Effect> },
    /// Nothing changed, nothing recorded
    Noop { reason: String },
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }

    pub fn effects(&self) -> &[Effect] {
        match self {
            EditOutcome::Applied { effects, .. } => effects,
            EditOutcome::Noop { .. } => &[],
        }
    }

    fn noop(reason: impl Into<String>) -> Self {
        EditOutcome::Noop {
            reason: reason.into(),
        }
    }
}

/// Working tree for a batch of mutations committed as one undo step
pub struct Transaction<'a> {
    document: Document,
    ids: &'a mut dyn IdGenerator,
    effects: Vec<Effect>,
}

impl Transaction<'_> {
    pub fn apply(&mut self, mutation: Mutation) -> Result<Effect, TreeError> {
        let effect = mutation.apply(&mut self.document, &mut *self.ids)?;
        self.effects.push(effect.clone());
        Ok(effect)
    }

    /// The working tree, including this transaction's edits so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn next_id(&mut self) -> BlockId {
        self.ids.next_id()
    }
}

pub struct EditSession {
    history: History,
    ui: EditorUiState,
    ids: Box<dyn IdGenerator>,
    registry: Option<Arc<BlockRegistry>>,

    /// Number of commits so far (monotonic, survives undo)
    version: u64,

    /// Snapshot last written through a store
    saved: Snapshot,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("history", &self.history)
            .field("ui", &self.ui)
            .field("version", &self.version)
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

impl EditSession {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, &EditorConfig::default())
    }

    pub fn with_config(document: Document, config: &EditorConfig) -> Self {
        let history = History::with_max_levels(document, config.history_limit);
        let saved = history.snapshot();
        Self {
            history,
            ui: EditorUiState::new(config.default_device, config.zoom),
            ids: Box::new(TimestampIdGenerator::new()),
            registry: None,
            version: 0,
            saved,
        }
    }

    /// Load `key` from `store` and start a clean session on it
    pub fn open(
        store: &dyn DocumentStore,
        key: &str,
        config: &EditorConfig,
    ) -> Result<Self, EditorError> {
        let document = store.load(key)?;
        info!(key, blocks = document.len(), "Opened document");
        Ok(Self::with_config(document, config))
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_registry(mut self, registry: Arc<BlockRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    // ---- state ----

    pub fn document(&self) -> &Document {
        self.history.present()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ui(&self) -> &EditorUiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut EditorUiState {
        &mut self.ui
    }

    pub fn registry(&self) -> Option<&BlockRegistry> {
        self.registry.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// True when `present` differs from what was last saved (or opened)
    pub fn is_dirty(&self) -> bool {
        !Arc::ptr_eq(&self.saved, &self.history.snapshot())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- edits ----

    /// Apply one mutation as one undo step.
    ///
    /// A failed mutation returns [`EditOutcome::Noop`] carrying the error. A
    /// mutation that leaves the tree equal to `present` returns
    /// `Noop { reason: "no change" }`. Neither records a history entry or
    /// bumps the version.
    pub fn apply(&mut self, mutation: Mutation) -> EditOutcome {
        let kind = mutation.kind();
        self.transaction(|tx| tx.apply(mutation).map(|_| ()))
            .log_as(kind)
    }

    /// Run `edit` on a working copy of `present` and commit it once.
    ///
    /// If `edit` fails the working copy is discarded. If the finished copy
    /// equals `present` the result is `Noop { reason: "no change" }`. Only an
    /// `Applied` outcome pushes history.
    pub fn transaction<F>(&mut self, edit: F) -> EditOutcome
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<(), TreeError>,
    {
        let mut tx = Transaction {
            document: self.history.present().clone(),
            ids: self.ids.as_mut(),
            effects: Vec::new(),
        };

        if let Err(err) = edit(&mut tx) {
            return EditOutcome::noop(err.to_string());
        }

        let Transaction {
            document, effects, ..
        } = tx;

        if &document == self.history.present() {
            return EditOutcome::noop("no change");
        }

        self.history.update(document);
        self.version += 1;
        for effect in &effects {
            self.update_selection(effect);
        }

        EditOutcome::Applied {
            version: self.version,
            effects,
        }
    }

    pub fn insert_block(
        &mut self,
        parent: Option<BlockId>,
        index: Option<usize>,
        block: BlockNode,
    ) -> EditOutcome {
        self.apply(Mutation::InsertBlock {
            parent_id: parent,
            index,
            block,
        })
    }

    /// Create a block of type `name` from the registry and insert it
    pub fn insert_new(
        &mut self,
        name: &str,
        attributes: Attributes,
        parent: Option<BlockId>,
        index: Option<usize>,
    ) -> Result<EditOutcome, EditorError> {
        let registry = self.registry.as_ref().ok_or(EditorError::NoRegistry)?;
        let block = registry.create_block(name, attributes, self.ids.as_mut())?;
        Ok(self.insert_block(parent, index, block))
    }

    /// Create a block from a named variation and insert it
    pub fn insert_variation(
        &mut self,
        name: &str,
        variation: &str,
        parent: Option<BlockId>,
        index: Option<usize>,
    ) -> Result<EditOutcome, EditorError> {
        let registry = self.registry.as_ref().ok_or(EditorError::NoRegistry)?;
        let block = registry.create_from_variation(name, variation, self.ids.as_mut())?;
        Ok(self.insert_block(parent, index, block))
    }

    pub fn remove_block(&mut self, id: &BlockId) -> EditOutcome {
        self.apply(Mutation::RemoveBlock { id: id.clone() })
    }

    pub fn update_block(&mut self, id: &BlockId, patch: BlockPatch) -> EditOutcome {
        self.apply(Mutation::UpdateBlock {
            id: id.clone(),
            patch,
        })
    }

    pub fn update_attributes(&mut self, id: &BlockId, attributes: Attributes) -> EditOutcome {
        self.update_block(id, BlockPatch::attributes(attributes))
    }

    /// Apply `patch` to every selected block
    pub fn update_selected(&mut self, patch: BlockPatch) -> EditOutcome {
        if self.ui.selected().is_empty() {
            return EditOutcome::noop("nothing selected");
        }
        self.apply(Mutation::UpdateBlocks {
            ids: self.ui.selected().to_vec(),
            patch,
        })
    }

    pub fn move_block(
        &mut self,
        id: &BlockId,
        parent: Option<BlockId>,
        index: Option<usize>,
    ) -> EditOutcome {
        self.apply(Mutation::MoveBlock {
            id: id.clone(),
            parent_id: parent,
            index,
        })
    }

    /// Copy `id` with fresh ids right after itself and select the copy
    pub fn duplicate_block(&mut self, id: &BlockId) -> EditOutcome {
        self.apply(Mutation::DuplicateBlock { id: id.clone() })
    }

    /// Replace the root list as one undo step
    pub fn set_blocks(&mut self, blocks: Vec<BlockNode>) -> EditOutcome {
        self.apply(Mutation::ReplaceBlocks { blocks })
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.prune_selection();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.prune_selection();
        }
        moved
    }

    /// Drop all history and start clean from `document`
    pub fn reset(&mut self, document: Document) {
        self.history.reset(document);
        self.saved = self.history.snapshot();
        self.ui.clear_selection();
        info!(blocks = self.document().len(), "Session reset");
    }

    #[instrument(skip(self, store))]
    pub fn save(&mut self, store: &mut dyn DocumentStore, key: &str) -> Result<(), EditorError> {
        let snapshot = self.history.snapshot();
        store.save(key, &snapshot)?;
        self.saved = snapshot;
        info!(version = self.version, "Saved");
        Ok(())
    }

    // ---- queries ----

    /// Inserter entries for the current search term, hiding single-use
    /// blocks already on the page
    pub fn inserter_items(&self, category: Option<&str>) -> Vec<&BlockType> {
        let Some(registry) = self.registry.as_deref() else {
            return Vec::new();
        };
        let term = self.ui.inserter().search_term.as_str();
        registry.inserter_items_for(self.document(), Some(term), category)
    }

    /// Styles of `id` resolved for the previewed device
    pub fn resolved_styles(&self, id: &BlockId) -> Option<ResolvedStyles> {
        self.document()
            .find(id)
            .map(|block| resolve_styles(&block.styles, self.ui.device()))
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        match self.registry.as_deref() {
            Some(registry) => self.document().validate_with(|name| registry.contains(name)),
            None => self.document().validate(),
        }
    }

    fn update_selection(&mut self, effect: &Effect) {
        match effect {
            Effect::Removed { ids } => {
                if ids.iter().any(|id| self.ui.is_selected(id)) {
                    self.ui.clear_selection();
                }
            }
            Effect::Inserted { id, .. } => self.ui.select(id.clone()),
            Effect::Duplicated { copy, .. } => self.ui.select(copy.clone()),
            Effect::Replaced => self.prune_selection(),
            Effect::Updated { .. } | Effect::Moved { .. } => {}
        }
    }

    fn prune_selection(&mut self) {
        let document = self.history.present();
        if self.ui.prune(|id| document.contains(id)) {
            debug!("Selection pruned after history change");
        }
    }
}

impl EditOutcome {
    fn log_as(self, kind: &str) -> Self {
        match &self {
            EditOutcome::Applied { version, .. } => debug!(kind, version, "Mutation applied"),
            EditOutcome::Noop { reason } => debug!(kind, reason = %reason, "Mutation skipped"),
        }
        self
    }
}
