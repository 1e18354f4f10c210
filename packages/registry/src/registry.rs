use crate::{register_core_blocks, BlockType, BlockVariation, RegistryError};
use blockcraft_document::{Attributes, BlockNode, Document, IdGenerator};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Category filter value meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// Registry of block types, keyed by name, iterated in registration order
#[derive(Default)]
pub struct BlockRegistry {
    types: HashMap<String, BlockType>,
    order: Vec<String>,
}

impl BlockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in block library
    pub fn with_core_blocks() -> Self {
        let mut registry = Self::new();
        register_core_blocks(&mut registry);
        registry
    }

    /// Add or replace a block type. Replacing keeps the original position
    /// and returns the previous entry.
    pub fn register(&mut self, block_type: BlockType) -> Option<BlockType> {
        let name = block_type.name.clone();
        let previous = self.types.insert(name.clone(), block_type);
        if previous.is_none() {
            self.order.push(name.clone());
        }
        debug!(block = %name, replaced = previous.is_some(), "Registered block type");
        previous
    }

    pub fn unregister(&mut self, name: &str) -> Option<BlockType> {
        let removed = self.types.remove(name)?;
        self.order.retain(|n| n != name);
        debug!(block = %name, "Unregistered block type");
        Some(removed)
    }

    pub fn get(&self, name: &str) -> Option<&BlockType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All block types, in registration order
    pub fn all(&self) -> impl Iterator<Item = &BlockType> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    /// Distinct categories, in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for block_type in self.all() {
            let category = block_type.metadata.category.as_str();
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    /// Case-insensitive substring search over title, description and
    /// keywords. A blank term returns everything.
    pub fn search(&self, term: &str) -> Vec<&BlockType> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.all().collect();
        }
        self.all()
            .filter(|block_type| block_type.metadata.matches(&needle))
            .collect()
    }

    /// Block types offered by the inserter.
    ///
    /// Category is an exact match; `None` or `"all"` disables it. Types with
    /// `supports.inserter == false` never appear.
    pub fn inserter_items(&self, term: Option<&str>, category: Option<&str>) -> Vec<&BlockType> {
        let category = category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

        self.search(term.unwrap_or(""))
            .into_iter()
            .filter(|block_type| category.map_or(true, |c| block_type.metadata.category == c))
            .filter(|block_type| block_type.metadata.supports.inserter)
            .collect()
    }

    /// Like [`inserter_items`](Self::inserter_items), but also hides
    /// single-use types (`supports.multiple == false`) already present in
    /// `document`.
    pub fn inserter_items_for(
        &self,
        document: &Document,
        term: Option<&str>,
        category: Option<&str>,
    ) -> Vec<&BlockType> {
        let present: HashSet<&str> = document.walk().map(|b| b.name.as_str()).collect();

        self.inserter_items(term, category)
            .into_iter()
            .filter(|block_type| {
                block_type.metadata.supports.multiple || !present.contains(block_type.name.as_str())
            })
            .collect()
    }

    pub fn variations(&self, name: &str) -> &[BlockVariation] {
        self.get(name)
            .map(|block_type| block_type.variations.as_slice())
            .unwrap_or(&[])
    }

    /// New block of type `name`: schema defaults, then the default variation
    /// (if any), then `overrides`.
    pub fn create_block(
        &self,
        name: &str,
        overrides: Attributes,
        ids: &mut dyn IdGenerator,
    ) -> Result<BlockNode, RegistryError> {
        let block_type = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBlockType(name.to_string()))?;

        match block_type.default_variation() {
            Some(variation) => self.build(block_type, variation, overrides, ids),
            None => {
                let mut attributes = overrides;
                block_type.attributes.apply_defaults(&mut attributes);
                block_type.attributes.validate(name, &attributes)?;
                Ok(BlockNode::new(ids.next_id(), name).with_attributes(attributes))
            }
        }
    }

    /// New block of type `name` from the named variation
    pub fn create_from_variation(
        &self,
        name: &str,
        variation: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<BlockNode, RegistryError> {
        let block_type = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBlockType(name.to_string()))?;
        let preset = block_type
            .variation(variation)
            .ok_or_else(|| RegistryError::UnknownVariation {
                block: name.to_string(),
                variation: variation.to_string(),
            })?;

        self.build(block_type, preset, Attributes::new(), ids)
    }

    /// Check a block's attributes against its type's schema
    pub fn validate_attributes(&self, block: &BlockNode) -> Result<(), RegistryError> {
        let block_type = self
            .get(&block.name)
            .ok_or_else(|| RegistryError::UnknownBlockType(block.name.clone()))?;
        block_type.attributes.validate(&block.name, &block.attributes)
    }

    fn build(
        &self,
        block_type: &BlockType,
        variation: &BlockVariation,
        overrides: Attributes,
        ids: &mut dyn IdGenerator,
    ) -> Result<BlockNode, RegistryError> {
        let mut attributes = variation.attributes.clone();
        attributes.extend(overrides);
        block_type.attributes.apply_defaults(&mut attributes);
        block_type.attributes.validate(&block_type.name, &attributes)?;

        let mut children = Vec::with_capacity(variation.inner_blocks.len());
        for template in &variation.inner_blocks {
            let mut child = template.instantiate(ids);
            self.fill_defaults(&mut child);
            children.push(child);
        }

        Ok(BlockNode::new(ids.next_id(), block_type.name.clone())
            .with_attributes(attributes)
            .with_children(children))
    }

    fn fill_defaults(&self, block: &mut BlockNode) {
        if let Some(block_type) = self.get(&block.name) {
            block_type.attributes.apply_defaults(&mut block.attributes);
        }
        for child in &mut block.inner_blocks {
            self.fill_defaults(child);
        }
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("types", &format!("{} types", self.types.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AttributeKind, AttributeSchema, BlockMetadata, BlockSupports, BlockTemplate,
        RenderContext,
    };
    use blockcraft_document::SequentialIdGenerator;
    use serde_json::json;

    fn noop(_: &BlockNode, _: &RenderContext<'_>) -> String {
        String::new()
    }

    fn block(name: &str, title: &str, category: &str) -> BlockType {
        BlockType::new(name, BlockMetadata::new(title, category), noop)
    }

    #[test]
    fn test_register_overwrites_silently() {
        let mut registry = BlockRegistry::new();
        assert!(registry.register(block("x/a", "First", "text")).is_none());
        registry.register(block("x/b", "Other", "text"));
        let previous = registry.register(block("x/a", "Second", "text"));

        assert_eq!(previous.unwrap().metadata.title, "First");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("x/a").unwrap().metadata.title, "Second");

        let names: Vec<_> = registry.all().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["x/a", "x/b"]);
    }

    #[test]
    fn test_unregister_and_miss() {
        let mut registry = BlockRegistry::new();
        registry.register(block("x/a", "A", "text"));
        assert!(registry.unregister("x/a").is_some());
        assert!(registry.unregister("x/a").is_none());
        assert!(registry.get("x/a").is_none());
        assert_eq!(registry.all().count(), 0);
    }

    #[test]
    fn test_search_is_case_insensitive_and_keyword_aware() {
        let mut registry = BlockRegistry::new();
        registry.register(BlockType::new(
            "commerce/product-grid",
            BlockMetadata::new("Product Grid", "commerce").with_keywords(["shop"]),
            noop,
        ));
        registry.register(block("core/heading", "Heading", "text"));

        let hits: Vec<_> = registry.search("SHOP").iter().map(|b| b.name.clone()).collect();
        assert_eq!(hits, vec!["commerce/product-grid"]);
        assert_eq!(registry.search("").len(), 2);
        assert_eq!(registry.search("   ").len(), 2);
        assert!(registry.search("carousel").is_empty());
    }

    #[test]
    fn test_search_matches_description() {
        let mut registry = BlockRegistry::new();
        registry.register(BlockType::new(
            "x/banner",
            BlockMetadata::new("Banner", "design").with_description("Full-width promotional strip"),
            noop,
        ));
        assert_eq!(registry.search("promo").len(), 1);
    }

    #[test]
    fn test_inserter_items_filters() {
        let mut registry = BlockRegistry::new();
        registry.register(block("core/heading", "Heading", "text"));
        registry.register(block("core/image", "Image", "media"));
        registry.register(BlockType::new(
            "core/column",
            BlockMetadata::new("Column", "design").with_supports(BlockSupports {
                inserter: false,
                ..BlockSupports::default()
            }),
            noop,
        ));

        assert_eq!(registry.inserter_items(None, None).len(), 2);
        assert_eq!(registry.inserter_items(None, Some("all")).len(), 2);
        assert_eq!(registry.inserter_items(None, Some("media")).len(), 1);
        assert!(registry.inserter_items(None, Some("design")).is_empty());
        assert!(registry.inserter_items(Some("column"), None).is_empty());
        assert!(registry.inserter_items(Some("head"), Some("media")).is_empty());
    }

    #[test]
    fn test_single_use_blocks_hidden_once_present() {
        let mut registry = BlockRegistry::new();
        registry.register(BlockType::new(
            "commerce/checkout",
            BlockMetadata::new("Checkout", "commerce").with_supports(BlockSupports {
                multiple: false,
                ..BlockSupports::default()
            }),
            noop,
        ));

        let empty = Document::default();
        assert_eq!(registry.inserter_items_for(&empty, None, None).len(), 1);

        let doc = Document::new(vec![BlockNode::new("c", "commerce/checkout")]);
        assert!(registry.inserter_items_for(&doc, None, None).is_empty());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let mut registry = BlockRegistry::new();
        registry.register(block("a", "A", "text"));
        registry.register(block("b", "B", "media"));
        registry.register(block("c", "C", "text"));
        assert_eq!(registry.categories(), vec!["text", "media"]);
    }

    #[test]
    fn test_create_block_applies_defaults_and_validates() {
        let mut registry = BlockRegistry::new();
        registry.register(
            block("core/heading", "Heading", "text").with_attributes(
                AttributeSchema::new()
                    .attribute_with_default("level", AttributeKind::Integer, 2)
                    .attribute_with_default("text", AttributeKind::String, ""),
            ),
        );
        let mut ids = SequentialIdGenerator::from_prefix("b");

        let mut overrides = Attributes::new();
        overrides.insert("text".into(), json!("Hello"));
        let node = registry.create_block("core/heading", overrides, &mut ids).unwrap();
        assert_eq!(node.id, "b-1");
        assert_eq!(node.attribute("level"), Some(&json!(2)));
        assert_eq!(node.attribute("text"), Some(&json!("Hello")));

        let mut bad = Attributes::new();
        bad.insert("level".into(), json!("big"));
        assert!(matches!(
            registry.create_block("core/heading", bad, &mut ids),
            Err(RegistryError::InvalidAttribute { .. })
        ));
        assert_eq!(
            registry.create_block("core/nope", Attributes::new(), &mut ids).unwrap_err(),
            RegistryError::UnknownBlockType("core/nope".to_string())
        );
    }

    #[test]
    fn test_create_from_variation_builds_inner_blocks() {
        let mut registry = BlockRegistry::new();
        registry.register(block("core/column", "Column", "design").with_attributes(
            AttributeSchema::new().attribute_with_default("width", AttributeKind::String, "auto"),
        ));
        registry.register(
            block("core/columns", "Columns", "design").with_variation(
                BlockVariation::new("two", "Two columns")
                    .with_attribute("count", 2)
                    .with_inner_block(BlockTemplate::new("core/column"))
                    .with_inner_block(BlockTemplate::new("core/column")),
            ),
        );
        let mut ids = SequentialIdGenerator::from_prefix("n");

        let node = registry
            .create_from_variation("core/columns", "two", &mut ids)
            .unwrap();
        assert_eq!(node.inner_blocks.len(), 2);
        assert_eq!(node.attribute("count"), Some(&json!(2)));
        assert_eq!(node.inner_blocks[0].attribute("width"), Some(&json!("auto")));
        assert_ne!(node.inner_blocks[0].id, node.inner_blocks[1].id);

        assert!(matches!(
            registry.create_from_variation("core/columns", "nine", &mut ids),
            Err(RegistryError::UnknownVariation { .. })
        ));
    }
}
