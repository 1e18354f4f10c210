use blockcraft_document::Breakpoint;
use serde::{Deserialize, Serialize};

/// CSS rule with selector and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    /// Declaration order is preserved
    pub properties: Vec<(String, String)>,
    pub media_query: Option<String>,
    /// Device the media query targets; orders `@media` blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<Breakpoint>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: Vec::new(),
            media_query: None,
            breakpoint: None,
        }
    }

    pub fn with_media(mut self, media_query: Option<String>) -> Self {
        self.media_query = media_query;
        self
    }

    /// Media rule for one device override
    pub fn for_breakpoint(mut self, breakpoint: Breakpoint, media_query: Option<String>) -> Self {
        self.media_query = media_query;
        self.breakpoint = Some(breakpoint);
        self
    }

    /// Marks every declaration `!important`
    pub fn important(mut self) -> Self {
        for (_, value) in self.properties.iter_mut() {
            if !value.ends_with("!important") {
                value.push_str(" !important");
            }
        }
        self
    }

    pub fn push(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.push((property.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn write(&self, css: &mut String, indent: &str) {
        css.push_str(indent);
        css.push_str(&self.selector);
        css.push_str(" {\n");

        for (key, value) in &self.properties {
            css.push_str(indent);
            css.push_str("  ");
            css.push_str(key);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }

        css.push_str(indent);
        css.push_str("}\n");
    }
}

/// Collection of CSS rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub rules: Vec<CssRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Empty rules are dropped
    pub fn add_rule(&mut self, rule: CssRule) {
        if !rule.is_empty() {
            self.rules.push(rule);
        }
    }

    pub fn extend(&mut self, other: StyleSheet) {
        self.rules.extend(other.rules);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Convert to CSS text.
    ///
    /// Unconditional rules come first, in insertion order. Rules sharing a
    /// media query are grouped into one `@media` block. Blocks are ordered by
    /// breakpoint (tablet before mobile) so narrower overrides win the
    /// cascade; queries without a breakpoint follow in first-seen order.
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        for rule in self.rules.iter().filter(|r| r.media_query.is_none()) {
            rule.write(&mut css, "");
            css.push('\n');
        }

        let mut queries: Vec<(Option<Breakpoint>, &str)> = Vec::new();
        for rule in &self.rules {
            if let Some(query) = rule.media_query.as_deref() {
                if !queries.iter().any(|(_, q)| *q == query) {
                    queries.push((rule.breakpoint, query));
                }
            }
        }
        queries.sort_by_key(|(breakpoint, _)| (breakpoint.is_none(), *breakpoint));

        for (_, query) in queries {
            css.push_str("@media ");
            css.push_str(query);
            css.push_str(" {\n");
            for rule in self
                .rules
                .iter()
                .filter(|r| r.media_query.as_deref() == Some(query))
            {
                rule.write(&mut css, "  ");
            }
            css.push_str("}\n\n");
        }

        css
    }
}
