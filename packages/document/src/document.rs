//! # Document Tree
//!
//! Ordered top-level blocks plus structural operations.
//!
//! ## Operation Semantics
//!
//! ### Insert
//! - Target is the root list (`parent = None`) or a parent's children
//! - Index defaults to the end and is clamped to the list length
//!
//! ### Remove
//! - Removes the block and all descendants
//! - Unknown ids are not an error at this level: `remove` returns `None`
//!
//! ### Move
//! - Atomic: the block is detached and re-attached in one call
//! - Fails before touching the tree if the target parent is missing or lies
//!   inside the moved block
//!
//! ### Duplicate
//! - Deep clone with fresh ids for the block and every descendant
//! - The copy lands right after the source, in the same list

use crate::{Attributes, BlockId, BlockNode, DocumentError, IdGenerator, TreeError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub blocks: Vec<BlockNode>,
}

impl Document {
    pub fn new(blocks: Vec<BlockNode>) -> Self {
        Self { blocks }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of blocks at every depth
    pub fn len(&self) -> usize {
        self.blocks.iter().map(BlockNode::subtree_len).sum()
    }

    /// Every block, pre-order
    pub fn walk(&self) -> impl Iterator<Item = &BlockNode> {
        self.blocks.iter().flat_map(|b| b.descendants())
    }

    pub fn block_ids(&self) -> HashSet<BlockId> {
        self.walk().map(|b| b.id.clone()).collect()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: &BlockId) -> Option<&BlockNode> {
        find_in(&self.blocks, id)
    }

    pub fn find_mut(&mut self, id: &BlockId) -> Option<&mut BlockNode> {
        find_in_mut(&mut self.blocks, id)
    }

    /// Parent of `id`. `Some(None)` means the block sits at the root.
    pub fn parent_of(&self, id: &BlockId) -> Option<Option<&BlockId>> {
        if self.blocks.iter().any(|b| &b.id == id) {
            return Some(None);
        }
        self.walk()
            .find(|b| b.inner_blocks.iter().any(|c| &c.id == id))
            .map(|parent| Some(&parent.id))
    }

    /// Ids from the root down to and including `id`
    pub fn path_to(&self, id: &BlockId) -> Option<Vec<BlockId>> {
        let mut path = Vec::new();
        if path_in(&self.blocks, id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    /// Position of `id` inside its parent's list
    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        let siblings = match self.parent_of(id)? {
            None => &self.blocks,
            Some(parent) => &self.find(parent)?.inner_blocks,
        };
        siblings.iter().position(|b| &b.id == id)
    }

    /// Insert `block` under `parent` at `index`. Returns the actual index.
    ///
    /// Fails with [`TreeError::DuplicateId`] if any id in `block`'s subtree
    /// is already in the tree or repeats within the subtree.
    pub fn insert(
        &mut self,
        parent: Option<&BlockId>,
        index: Option<usize>,
        block: BlockNode,
    ) -> Result<usize, TreeError> {
        let mut taken = self.block_ids();
        for node in block.descendants() {
            if !taken.insert(node.id.clone()) {
                return Err(TreeError::DuplicateId(node.id.to_string()));
            }
        }

        let siblings = self.children_mut(parent)?;
        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, block);
        Ok(at)
    }

    /// Detach `id` (and its subtree) wherever it lives
    pub fn remove(&mut self, id: &BlockId) -> Option<BlockNode> {
        remove_from(&mut self.blocks, id)
    }

    /// Shallow-merge `patch` into the attributes of `id`
    pub fn update_attributes(&mut self, id: &BlockId, patch: &Attributes) -> Result<(), TreeError> {
        let node = self
            .find_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;
        node.merge_attributes(patch);
        Ok(())
    }

    /// Relocate `id` under `new_parent` at `index` in one step.
    ///
    /// The index is interpreted against the destination list *after* the
    /// block has been detached from its old position.
    pub fn move_block(
        &mut self,
        id: &BlockId,
        new_parent: Option<&BlockId>,
        index: Option<usize>,
    ) -> Result<usize, TreeError> {
        let node = self
            .find(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;

        if let Some(parent) = new_parent {
            if parent == id || node.contains(parent) {
                return Err(TreeError::CycleDetected);
            }
            if !self.contains(parent) {
                return Err(TreeError::ParentNotFound(parent.to_string()));
            }
        }

        let detached = self
            .remove(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;
        self.insert(new_parent, index, detached)
    }

    /// Clone `id` with fresh ids, inserting the copy after the source.
    ///
    /// Returns the id of the new top block of the copy.
    pub fn duplicate(
        &mut self,
        id: &BlockId,
        ids: &mut dyn IdGenerator,
    ) -> Result<BlockId, TreeError> {
        let source = self
            .find(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;

        let mut taken = self.block_ids();
        let mut copy = source.clone();
        reassign_ids(&mut copy, ids, &mut taken);
        let copy_id = copy.id.clone();

        let parent = self
            .parent_of(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?
            .cloned();
        let index = self
            .index_of(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;
        self.insert(parent.as_ref(), Some(index + 1), copy)?;

        Ok(copy_id)
    }

    fn children_mut(&mut self, parent: Option<&BlockId>) -> Result<&mut Vec<BlockNode>, TreeError> {
        match parent {
            None => Ok(&mut self.blocks),
            Some(parent_id) => self
                .find_mut(parent_id)
                .map(|p| &mut p.inner_blocks)
                .ok_or_else(|| TreeError::ParentNotFound(parent_id.to_string())),
        }
    }
}

impl From<Vec<BlockNode>> for Document {
    fn from(blocks: Vec<BlockNode>) -> Self {
        Self { blocks }
    }
}

fn find_in<'a>(blocks: &'a [BlockNode], id: &BlockId) -> Option<&'a BlockNode> {
    for block in blocks {
        if &block.id == id {
            return Some(block);
        }
        if let Some(found) = find_in(&block.inner_blocks, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(blocks: &'a mut [BlockNode], id: &BlockId) -> Option<&'a mut BlockNode> {
    for block in blocks {
        if &block.id == id {
            return Some(block);
        }
        if let Some(found) = find_in_mut(&mut block.inner_blocks, id) {
            return Some(found);
        }
    }
    None
}

fn path_in(blocks: &[BlockNode], id: &BlockId, path: &mut Vec<BlockId>) -> bool {
    for block in blocks {
        path.push(block.id.clone());
        if &block.id == id || path_in(&block.inner_blocks, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn remove_from(blocks: &mut Vec<BlockNode>, id: &BlockId) -> Option<BlockNode> {
    if let Some(pos) = blocks.iter().position(|b| &b.id == id) {
        return Some(blocks.remove(pos));
    }

    for block in blocks {
        if let Some(removed) = remove_from(&mut block.inner_blocks, id) {
            return Some(removed);
        }
    }

    None
}

fn reassign_ids(node: &mut BlockNode, ids: &mut dyn IdGenerator, taken: &mut HashSet<BlockId>) {
    let mut fresh = ids.next_id();
    while taken.contains(&fresh) {
        fresh = ids.next_id();
    }
    taken.insert(fresh.clone());
    node.id = fresh;

    for child in &mut node.inner_blocks {
        reassign_ids(child, ids, taken);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequentialIdGenerator;
    use serde_json::json;

    fn id(s: &str) -> BlockId {
        BlockId::from(s)
    }

    fn sample() -> Document {
        Document::new(vec![
            BlockNode::new("header", "core/group")
                .with_child(BlockNode::new("title", "core/heading"))
                .with_child(BlockNode::new("tagline", "core/paragraph")),
            BlockNode::new("grid", "commerce/product-grid"),
        ])
    }

    #[test]
    fn test_find_nested() {
        let doc = sample();
        assert_eq!(doc.find(&id("tagline")).unwrap().name, "core/paragraph");
        assert!(doc.find(&id("missing")).is_none());
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_parent_and_path() {
        let doc = sample();
        assert_eq!(doc.parent_of(&id("grid")), Some(None));
        assert_eq!(doc.parent_of(&id("title")), Some(Some(&id("header"))));
        assert_eq!(doc.parent_of(&id("nope")), None);
        assert_eq!(doc.path_to(&id("title")), Some(vec![id("header"), id("title")]));
        assert_eq!(doc.index_of(&id("tagline")), Some(1));
    }

    #[test]
    fn test_insert_defaults_to_end_and_clamps() {
        let mut doc = sample();
        let at = doc.insert(None, None, BlockNode::new("footer", "core/group")).unwrap();
        assert_eq!(at, 2);

        let at = doc
            .insert(Some(&id("header")), Some(99), BlockNode::new("cta", "core/button"))
            .unwrap();
        assert_eq!(at, 2);
        assert_eq!(doc.find(&id("header")).unwrap().inner_blocks[2].id, "cta");
    }

    #[test]
    fn test_insert_into_missing_parent() {
        let mut doc = sample();
        let result = doc.insert(Some(&id("ghost")), None, BlockNode::new("x", "core/spacer"));
        assert_eq!(result, Err(TreeError::ParentNotFound("ghost".to_string())));
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_insert_rejects_taken_ids() {
        let mut doc = sample();
        let result = doc.insert(None, None, BlockNode::new("title", "core/heading"));
        assert_eq!(result, Err(TreeError::DuplicateId("title".to_string())));

        let nested = BlockNode::new("fresh", "core/group")
            .with_child(BlockNode::new("grid", "commerce/product-grid"));
        let result = doc.insert(None, Some(0), nested);
        assert_eq!(result, Err(TreeError::DuplicateId("grid".to_string())));

        let repeated = BlockNode::new("twin", "core/group")
            .with_child(BlockNode::new("twin", "core/paragraph"));
        let result = doc.insert(None, None, repeated);
        assert_eq!(result, Err(TreeError::DuplicateId("twin".to_string())));
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_remove_nested_and_missing() {
        let mut doc = sample();
        let removed = doc.remove(&id("header")).unwrap();
        assert_eq!(removed.inner_blocks.len(), 2);
        assert!(!doc.contains(&id("title")));

        let before = doc.clone();
        assert!(doc.remove(&id("header")).is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_attributes_is_shallow() {
        let mut doc = sample();
        let mut patch = Attributes::new();
        patch.insert("text".into(), json!("Welcome"));
        patch.insert("level".into(), json!(1));
        doc.update_attributes(&id("title"), &patch).unwrap();

        let mut patch = Attributes::new();
        patch.insert("level".into(), json!(2));
        doc.update_attributes(&id("title"), &patch).unwrap();

        let title = doc.find(&id("title")).unwrap();
        assert_eq!(title.attribute("text"), Some(&json!("Welcome")));
        assert_eq!(title.attribute("level"), Some(&json!(2)));
        assert!(doc.find(&id("tagline")).unwrap().attributes.is_empty());
    }

    #[test]
    fn test_move_between_parents() {
        let mut doc = sample();
        doc.move_block(&id("grid"), Some(&id("header")), Some(0)).unwrap();

        assert_eq!(doc.blocks.len(), 1);
        let header = doc.find(&id("header")).unwrap();
        let order: Vec<_> = header.inner_blocks.iter().map(|b| b.id.to_string()).collect();
        assert_eq!(order, vec!["grid", "title", "tagline"]);
    }

    #[test]
    fn test_move_into_own_descendant_is_refused() {
        let mut doc = sample();
        let before = doc.clone();
        assert_eq!(
            doc.move_block(&id("header"), Some(&id("title")), None),
            Err(TreeError::CycleDetected)
        );
        assert_eq!(
            doc.move_block(&id("header"), Some(&id("header")), None),
            Err(TreeError::CycleDetected)
        );
        assert_eq!(
            doc.move_block(&id("grid"), Some(&id("ghost")), None),
            Err(TreeError::ParentNotFound("ghost".to_string()))
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_within_same_list() {
        let mut doc = sample();
        doc.move_block(&id("header"), None, Some(1)).unwrap();
        let order: Vec<_> = doc.blocks.iter().map(|b| b.id.to_string()).collect();
        assert_eq!(order, vec!["grid", "header"]);
    }

    #[test]
    fn test_duplicate_fresh_ids_after_source() {
        let mut doc = sample();
        let mut ids = SequentialIdGenerator::from_prefix("copy");
        let copy_id = doc.duplicate(&id("header"), &mut ids).unwrap();

        assert_eq!(doc.blocks[1].id, copy_id);
        assert_eq!(doc.blocks[2].id, "grid");

        let all: Vec<_> = doc.walk().map(|b| b.id.clone()).collect();
        let unique: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(all.len(), 7);
        assert_eq!(unique.len(), 7);

        let copy = doc.find(&copy_id).unwrap();
        assert_eq!(copy.inner_blocks[0].name, "core/heading");
        assert_ne!(copy.inner_blocks[0].id, "title");
    }

    #[test]
    fn test_duplicate_skips_ids_already_in_tree() {
        let mut doc = Document::new(vec![
            BlockNode::new("b-1", "core/paragraph"),
            BlockNode::new("b-2", "core/paragraph"),
        ]);
        let mut ids = SequentialIdGenerator::from_prefix("b");
        let copy_id = doc.duplicate(&id("b-1"), &mut ids).unwrap();
        assert_eq!(copy_id, "b-3");
    }
}
