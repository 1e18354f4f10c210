use crate::{BlockId, ElementStyles};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open attribute map. Meaning is defined by the registered block type.
pub type Attributes = Map<String, Value>;

/// A single block in the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNode {
    pub id: BlockId,

    /// Registry key, e.g. `core/heading`
    pub name: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Attributes,

    #[serde(default, skip_serializing_if = "ElementStyles::is_empty")]
    pub styles: ElementStyles,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner_blocks: Vec<BlockNode>,
}

impl BlockNode {
    pub fn new(id: impl Into<BlockId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Map::new(),
            styles: ElementStyles::default(),
            inner_blocks: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_styles(mut self, styles: ElementStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_child(mut self, child: BlockNode) -> Self {
        self.inner_blocks.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = BlockNode>) -> Self {
        self.inner_blocks.extend(children);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Shallow merge: every key in `patch` replaces the key here
    pub fn merge_attributes(&mut self, patch: &Attributes) {
        for (key, value) in patch {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    /// Deserialize the attribute map into a typed view.
    ///
    /// Typed views use `#[serde(default)]`, so this only fails when a value
    /// has the wrong JSON type.
    pub fn attributes_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.attributes.clone()))
    }

    /// This node and all descendants, pre-order
    pub fn descendants(&self) -> Vec<&BlockNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in node.inner_blocks.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.inner_blocks
            .iter()
            .any(|child| &child.id == id || child.contains(id))
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self
            .inner_blocks
            .iter()
            .map(BlockNode::subtree_len)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Heading {
        text: String,
        level: u8,
    }

    #[test]
    fn test_json_shape() {
        let node: BlockNode = serde_json::from_value(json!({
            "id": "a",
            "name": "core/group",
            "innerBlocks": [
                { "id": "b", "name": "core/heading", "attributes": { "text": "Hi" } }
            ]
        }))
        .unwrap();

        assert_eq!(node.id, "a");
        assert_eq!(node.inner_blocks.len(), 1);
        assert_eq!(node.inner_blocks[0].attribute_str("text"), Some("Hi"));

        let back = serde_json::to_value(&node).unwrap();
        assert!(back.get("styles").is_none());
        assert!(back["innerBlocks"][0].get("innerBlocks").is_none());
    }

    #[test]
    fn test_typed_view_defaults_missing_fields() {
        let node = BlockNode::new("h", "core/heading").with_attribute("text", "Shop");
        let heading: Heading = node.attributes_as().unwrap();
        assert_eq!(heading.text, "Shop");
        assert_eq!(heading.level, 0);

        let bad = BlockNode::new("h", "core/heading").with_attribute("level", "two");
        assert!(bad.attributes_as::<Heading>().is_err());
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = BlockNode::new("a", "core/group")
            .with_child(BlockNode::new("b", "core/group").with_child(BlockNode::new("c", "x")))
            .with_child(BlockNode::new("d", "x"));

        let ids: Vec<_> = tree.descendants().iter().map(|n| n.id.to_string()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(tree.subtree_len(), 4);
        assert!(tree.contains(&BlockId::from("c")));
        assert!(!tree.contains(&BlockId::from("a")));
    }
}
