use crate::{BlockId, Document};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationKind {
    DuplicateId,
    EmptyId,
    UnknownType,
}

/// A problem found while checking a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: ValidationKind,
    pub block_id: BlockId,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.block_id, self.message)
    }
}

impl Document {
    /// Structural checks: every id non-empty and unique
    pub fn validate(&self) -> Vec<ValidationIssue> {
        self.validate_with(|_| true)
    }

    /// Structural checks plus block type lookup through `is_known`
    pub fn validate_with(&self, is_known: impl Fn(&str) -> bool) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for block in self.walk() {
            if block.id.is_empty() {
                issues.push(ValidationIssue {
                    kind: ValidationKind::EmptyId,
                    block_id: block.id.clone(),
                    message: format!("Block of type '{}' has an empty id", block.name),
                });
            } else if !seen.insert(&block.id) {
                issues.push(ValidationIssue {
                    kind: ValidationKind::DuplicateId,
                    block_id: block.id.clone(),
                    message: format!("Duplicate block id '{}'", block.id),
                });
            }

            if !is_known(&block.name) {
                issues.push(ValidationIssue {
                    kind: ValidationKind::UnknownType,
                    block_id: block.id.clone(),
                    message: format!("Unknown block type '{}'", block.name),
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockNode;

    #[test]
    fn test_valid_document() {
        let doc = Document::new(vec![
            BlockNode::new("a", "core/group").with_child(BlockNode::new("b", "core/heading")),
        ]);
        assert!(doc.validate().is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_ids() {
        let doc = Document::new(vec![
            BlockNode::new("a", "core/group").with_child(BlockNode::new("a", "core/heading")),
            BlockNode::new("", "core/spacer"),
        ]);
        let kinds: Vec<_> = doc.validate().into_iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![ValidationKind::DuplicateId, ValidationKind::EmptyId]);
    }

    #[test]
    fn test_unknown_types() {
        let doc = Document::new(vec![BlockNode::new("a", "legacy/slider")]);
        let issues = doc.validate_with(|name| name.starts_with("core/"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ValidationKind::UnknownType);
    }
}
