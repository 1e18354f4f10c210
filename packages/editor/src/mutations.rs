//! # Block Mutations
//!
//! Semantic edits on a block tree.
//!
//! ## Mutation Semantics
//!
//! ### Insert
//! - Target is the root list or a parent's children
//! - Index defaults to the end and is clamped to the list length
//!
//! ### Remove
//! - Removes the block and all descendants
//! - Unknown ids fail (the session turns that into a no-op)
//!
//! ### Update
//! - Shallow merge of attributes, siblings untouched
//! - Style patches overwrite only the properties they name
//!
//! ### Move
//! - Atomic relocation: detach and reinsert on one tree
//! - Fails if the destination is the block itself or one of its descendants
//!
//! ### Duplicate
//! - Deep copy with fresh ids, placed right after the source

use blockcraft_document::{
    Attributes, BlockId, BlockNode, Document, ElementStyles, IdGenerator, TreeError,
};
use serde::{Deserialize, Serialize};

/// Partial update of one block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<ElementStyles>,
}

impl BlockPatch {
    pub fn attributes(attributes: Attributes) -> Self {
        Self {
            attributes,
            styles: None,
        }
    }

    pub fn styles(styles: ElementStyles) -> Self {
        Self {
            attributes: Attributes::new(),
            styles: Some(styles),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.styles.as_ref().map_or(true, ElementStyles::is_empty)
    }

    fn apply_to(&self, node: &mut BlockNode) {
        node.merge_attributes(&self.attributes);
        if let Some(styles) = &self.styles {
            node.styles.merge(styles);
        }
    }
}

/// Semantic edits on a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    #[serde(rename_all = "camelCase")]
    InsertBlock {
        #[serde(default)]
        parent_id: Option<BlockId>,
        #[serde(default)]
        index: Option<usize>,
        block: BlockNode,
    },

    RemoveBlock {
        id: BlockId,
    },

    UpdateBlock {
        id: BlockId,
        patch: BlockPatch,
    },

    /// Same patch on several blocks (multi-selection edits)
    UpdateBlocks {
        ids: Vec<BlockId>,
        patch: BlockPatch,
    },

    #[serde(rename_all = "camelCase")]
    MoveBlock {
        id: BlockId,
        #[serde(default)]
        parent_id: Option<BlockId>,
        #[serde(default)]
        index: Option<usize>,
    },

    DuplicateBlock {
        id: BlockId,
    },

    /// Swap the whole root list
    ReplaceBlocks {
        blocks: Vec<BlockNode>,
    },
}

/// What a successfully applied mutation did
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Inserted { id: BlockId, index: usize },
    /// Ids of the removed block and all its descendants
    Removed { ids: Vec<BlockId> },
    Updated { ids: Vec<BlockId> },
    Moved { id: BlockId, index: usize },
    Duplicated { source: BlockId, copy: BlockId },
    Replaced,
}

impl Mutation {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::InsertBlock { .. } => "insert",
            Mutation::RemoveBlock { .. } => "remove",
            Mutation::UpdateBlock { .. } => "update",
            Mutation::UpdateBlocks { .. } => "update-many",
            Mutation::MoveBlock { .. } => "move",
            Mutation::DuplicateBlock { .. } => "duplicate",
            Mutation::ReplaceBlocks { .. } => "replace",
        }
    }

    /// Apply to `doc`. On error `doc` is left untouched.
    pub fn apply(
        &self,
        doc: &mut Document,
        ids: &mut dyn IdGenerator,
    ) -> Result<Effect, TreeError> {
        match self {
            Mutation::InsertBlock {
                parent_id,
                index,
                block,
            } => {
                let id = block.id.clone();
                let index = doc.insert(parent_id.as_ref(), *index, block.clone())?;
                Ok(Effect::Inserted { id, index })
            }

            Mutation::RemoveBlock { id } => {
                let removed = doc
                    .remove(id)
                    .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;
                let ids = removed
                    .descendants()
                    .into_iter()
                    .map(|b| b.id.clone())
                    .collect();
                Ok(Effect::Removed { ids })
            }

            Mutation::UpdateBlock { id, patch } => {
                Self::apply_patch(doc, std::slice::from_ref(id), patch)
            }

            Mutation::UpdateBlocks { ids, patch } => Self::apply_patch(doc, ids, patch),

            Mutation::MoveBlock {
                id,
                parent_id,
                index,
            } => {
                let index = doc.move_block(id, parent_id.as_ref(), *index)?;
                Ok(Effect::Moved {
                    id: id.clone(),
                    index,
                })
            }

            Mutation::DuplicateBlock { id } => {
                let copy = doc.duplicate(id, ids)?;
                Ok(Effect::Duplicated {
                    source: id.clone(),
                    copy,
                })
            }

            Mutation::ReplaceBlocks { blocks } => {
                doc.blocks = blocks.clone();
                Ok(Effect::Replaced)
            }
        }
    }

    fn apply_patch(
        doc: &mut Document,
        targets: &[BlockId],
        patch: &BlockPatch,
    ) -> Result<Effect, TreeError> {
        // Check every target first so a miss never leaves a partial update
        if let Some(missing) = targets.iter().find(|id| !doc.contains(id)) {
            return Err(TreeError::NodeNotFound(missing.to_string()));
        }

        for id in targets {
            if let Some(node) = doc.find_mut(id) {
                patch.apply_to(node);
            }
        }

        Ok(Effect::Updated {
            ids: targets.to_vec(),
        })
    }
}
