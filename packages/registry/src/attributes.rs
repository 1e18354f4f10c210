//! Typed attribute views for the core blocks.
//!
//! Each struct reads from a block's open attribute map with
//! `BlockNode::attributes_as`. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingAttributes {
    pub text: String,
    pub level: u8,
    pub text_align: Option<String>,
}

impl Default for HeadingAttributes {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: 2,
            text_align: None,
        }
    }
}

impl HeadingAttributes {
    /// `h1`..`h6`; out-of-range levels clamp
    pub fn tag(&self) -> String {
        format!("h{}", self.level.clamp(1, 6))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphAttributes {
    pub text: String,
    pub drop_cap: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageAttributes {
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonAttributes {
    pub text: String,
    pub url: Option<String>,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupAttributes {
    pub tag_name: String,
}

impl Default for GroupAttributes {
    fn default() -> Self {
        Self {
            tag_name: "div".to_string(),
        }
    }
}

impl GroupAttributes {
    /// Only sectioning tags are allowed; anything else renders as `div`
    pub fn tag(&self) -> &str {
        match self.tag_name.as_str() {
            "section" | "header" | "footer" | "main" | "aside" | "article" | "nav" => {
                &self.tag_name
            }
            _ => "div",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerAttributes {
    pub height: String,
}

impl Default for SpacerAttributes {
    fn default() -> Self {
        Self {
            height: "32px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductGridAttributes {
    pub columns: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub show_price: bool,
    pub show_add_to_cart: bool,
}

impl Default for ProductGridAttributes {
    fn default() -> Self {
        Self {
            columns: 3,
            limit: 6,
            category: None,
            show_price: true,
            show_add_to_cart: true,
        }
    }
}
