use crate::{BlockRenderer, RegistryError};
use blockcraft_document::{Attributes, BlockNode, IdGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Capability flags consumed by the editor UI and the inserter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockSupports {
    pub align: bool,
    pub color: bool,
    pub spacing: bool,
    pub typography: bool,
    /// Editable as raw HTML
    pub html: bool,
    /// Shown in the inserter
    pub inserter: bool,
    /// May appear more than once per document
    pub multiple: bool,
}

impl Default for BlockSupports {
    fn default() -> Self {
        Self {
            align: false,
            color: false,
            spacing: false,
            typography: false,
            html: true,
            inserter: true,
            multiple: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Single category tag
    pub category: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub supports: BlockSupports,

    /// Block types this one may be nested in. Empty = anywhere.
    #[serde(default)]
    pub parent: Vec<String>,
}

impl BlockMetadata {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: category.into(),
            icon: String::new(),
            keywords: Vec::new(),
            supports: BlockSupports::default(),
            parent: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_supports(mut self, supports: BlockSupports) -> Self {
        self.supports = supports;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent.push(parent.into());
        self
    }

    /// Case-insensitive substring match over title, description and keywords.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(needle))
    }
}

/// JSON type an attribute must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Any,
}

impl AttributeKind {
    /// `null` is accepted for every kind
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (AttributeKind::Any, _) => true,
            (AttributeKind::String, Value::String(_)) => true,
            (AttributeKind::Number, Value::Number(_)) => true,
            (AttributeKind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (AttributeKind::Boolean, Value::Bool(_)) => true,
            (AttributeKind::Array, Value::Array(_)) => true,
            (AttributeKind::Object, Value::Object(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::String => "a string",
            AttributeKind::Number => "a number",
            AttributeKind::Integer => "an integer",
            AttributeKind::Boolean => "a boolean",
            AttributeKind::Array => "an array",
            AttributeKind::Object => "an object",
            AttributeKind::Any => "any value",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub kind: AttributeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Attribute name → spec for one block type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSchema(BTreeMap<String, AttributeSpec>);

impl AttributeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.0.insert(name.into(), AttributeSpec { kind, default: None });
        self
    }

    pub fn attribute_with_default(
        mut self,
        name: impl Into<String>,
        kind: AttributeKind,
        default: impl Into<Value>,
    ) -> Self {
        self.0.insert(
            name.into(),
            AttributeSpec {
                kind,
                default: Some(default.into()),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fill in defaults for attributes that are missing
    pub fn apply_defaults(&self, attributes: &mut Attributes) {
        for (name, spec) in &self.0 {
            if let Some(default) = &spec.default {
                attributes
                    .entry(name.clone())
                    .or_insert_with(|| default.clone());
            }
        }
    }

    /// Check declared attributes have the declared kind. Undeclared
    /// attributes are left alone.
    pub fn validate(&self, block: &str, attributes: &Attributes) -> Result<(), RegistryError> {
        for (name, value) in attributes {
            if let Some(spec) = self.0.get(name) {
                if !spec.kind.accepts(value) {
                    return Err(RegistryError::InvalidAttribute {
                        block: block.to_string(),
                        attribute: name.clone(),
                        expected: spec.kind.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Nested block blueprint used by variations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTemplate {
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub inner_blocks: Vec<BlockTemplate>,
}

impl BlockTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            inner_blocks: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: BlockTemplate) -> Self {
        self.inner_blocks.push(child);
        self
    }

    pub(crate) fn instantiate(&self, ids: &mut dyn IdGenerator) -> BlockNode {
        let children = self
            .inner_blocks
            .iter()
            .map(|child| child.instantiate(ids))
            .collect::<Vec<_>>();
        BlockNode::new(ids.next_id(), self.name.clone())
            .with_attributes(self.attributes.clone())
            .with_children(children)
    }
}

/// Named preset of attributes (and optionally inner blocks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockVariation {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub inner_blocks: Vec<BlockTemplate>,
    #[serde(default)]
    pub is_default: bool,
}

impl BlockVariation {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: String::new(),
            attributes: Attributes::new(),
            inner_blocks: Vec::new(),
            is_default: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_inner_block(mut self, template: BlockTemplate) -> Self {
        self.inner_blocks.push(template);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Everything the editor knows about one block type
#[derive(Clone)]
pub struct BlockType {
    pub name: String,
    pub metadata: BlockMetadata,
    pub attributes: AttributeSchema,
    pub variations: Vec<BlockVariation>,
    renderer: Arc<dyn BlockRenderer>,
}

impl BlockType {
    pub fn new(
        name: impl Into<String>,
        metadata: BlockMetadata,
        renderer: impl BlockRenderer + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            metadata,
            attributes: AttributeSchema::default(),
            variations: Vec::new(),
            renderer: Arc::new(renderer),
        }
    }

    pub fn with_attributes(mut self, schema: AttributeSchema) -> Self {
        self.attributes = schema;
        self
    }

    pub fn with_variation(mut self, variation: BlockVariation) -> Self {
        self.variations.push(variation);
        self
    }

    pub fn renderer(&self) -> &dyn BlockRenderer {
        self.renderer.as_ref()
    }

    pub fn variation(&self, name: &str) -> Option<&BlockVariation> {
        self.variations.iter().find(|v| v.name == name)
    }

    pub fn default_variation(&self) -> Option<&BlockVariation> {
        self.variations.iter().find(|v| v.is_default)
    }
}

impl fmt::Debug for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockType")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .field("attributes", &self.attributes)
            .field("variations", &format!("{} variations", self.variations.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_accepts() {
        assert!(AttributeKind::Integer.accepts(&json!(3)));
        assert!(!AttributeKind::Integer.accepts(&json!(3.5)));
        assert!(AttributeKind::Number.accepts(&json!(3.5)));
        assert!(AttributeKind::String.accepts(&Value::Null));
        assert!(!AttributeKind::Boolean.accepts(&json!("true")));
    }

    #[test]
    fn test_schema_defaults_do_not_override() {
        let schema = AttributeSchema::new()
            .attribute_with_default("level", AttributeKind::Integer, 2)
            .attribute_with_default("text", AttributeKind::String, "");

        let mut attrs = Attributes::new();
        attrs.insert("level".into(), json!(1));
        schema.apply_defaults(&mut attrs);

        assert_eq!(attrs.get("level"), Some(&json!(1)));
        assert_eq!(attrs.get("text"), Some(&json!("")));
    }

    #[test]
    fn test_schema_validation() {
        let schema = AttributeSchema::new().attribute("level", AttributeKind::Integer);
        let mut attrs = Attributes::new();
        attrs.insert("level".into(), json!("two"));
        attrs.insert("extra".into(), json!(true));

        let err = schema.validate("core/heading", &attrs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Attribute 'level' of 'core/heading' should be an integer"
        );
    }

    #[test]
    fn test_metadata_supports_partial_json() {
        let meta: BlockMetadata = serde_json::from_value(json!({
            "title": "Hero",
            "category": "design",
            "supports": { "color": true, "inserter": false }
        }))
        .unwrap();
        assert!(meta.supports.color);
        assert!(!meta.supports.inserter);
        assert!(meta.supports.multiple);
    }
}
