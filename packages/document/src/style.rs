//! Style maps attached to blocks.
//!
//! JSON shape:
//!
//! ```json
//! {
//!   "color": "black",
//!   "padding": "16px",
//!   "responsive": { "mobile": { "padding": "8px" } },
//!   "states": { "hover": { "color": "red" } }
//! }
//! ```

use crate::Breakpoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Whether a style value counts as set.
///
/// `null`, empty strings and whitespace-only strings are "not set" and make
/// the resolver fall back to a larger breakpoint.
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// CSS-like property → value, kept in key order for stable output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, Value>);

impl StyleMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn remove(&mut self, property: &str) -> Option<Value> {
        self.0.remove(property)
    }

    /// Raw value, including unset ones
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }

    /// Value only if it counts as set
    pub fn get_set(&self, property: &str) -> Option<&Value> {
        self.0.get(property).filter(|v| is_set(v))
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when no property in the map counts as set
    pub fn is_effectively_empty(&self) -> bool {
        !self.0.values().any(is_set)
    }

    /// Shallow merge: keys in `patch` overwrite keys here
    pub fn merge(&mut self, patch: &StyleMap) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl FromIterator<(String, Value)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Interaction states that can only be expressed as real CSS
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PseudoState {
    Hover,
    Focus,
    Active,
}

impl PseudoState {
    pub fn selector_suffix(&self) -> &'static str {
        match self {
            PseudoState::Hover => ":hover",
            PseudoState::Focus => ":focus",
            PseudoState::Active => ":active",
        }
    }
}

impl fmt::Display for PseudoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector_suffix()[1..])
    }
}

/// Base styles plus per-breakpoint and per-state overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyles {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responsive: BTreeMap<Breakpoint, StyleMap>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<PseudoState, StyleMap>,

    #[serde(flatten)]
    pub base: StyleMap,
}

impl ElementStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_base(base: StyleMap) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Builder: set a base property
    pub fn with(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base.set(property, value);
        self
    }

    /// Builder: set an override for one breakpoint
    pub fn with_override(
        mut self,
        breakpoint: Breakpoint,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.responsive
            .entry(breakpoint)
            .or_default()
            .set(property, value);
        self
    }

    /// Builder: set a pseudo-state property
    pub fn with_state(
        mut self,
        state: PseudoState,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.states.entry(state).or_default().set(property, value);
        self
    }

    pub fn override_for(&self, breakpoint: Breakpoint) -> Option<&StyleMap> {
        self.responsive.get(&breakpoint)
    }

    pub fn state(&self, state: PseudoState) -> Option<&StyleMap> {
        self.states.get(&state)
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
            && self.responsive.values().all(StyleMap::is_empty)
            && self.states.values().all(StyleMap::is_empty)
    }

    /// Shallow merge of every section
    pub fn merge(&mut self, patch: &ElementStyles) {
        self.base.merge(&patch.base);
        for (breakpoint, map) in &patch.responsive {
            self.responsive.entry(*breakpoint).or_default().merge(map);
        }
        for (state, map) in &patch.states {
            self.states.entry(*state).or_default().merge(map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_values() {
        assert!(!is_set(&Value::Null));
        assert!(!is_set(&json!("")));
        assert!(!is_set(&json!("   ")));
        assert!(is_set(&json!("0")));
        assert!(is_set(&json!(0)));
    }

    #[test]
    fn test_deserialize_nested_shape() {
        let styles: ElementStyles = serde_json::from_value(json!({
            "color": "black",
            "responsive": { "desktop": { "color": "red" }, "mobile": {} },
            "states": { "hover": { "color": "blue" } }
        }))
        .unwrap();

        assert_eq!(styles.base.get("color"), Some(&json!("black")));
        assert_eq!(
            styles.override_for(Breakpoint::Desktop).unwrap().get("color"),
            Some(&json!("red"))
        );
        assert!(styles.override_for(Breakpoint::Mobile).unwrap().is_empty());
        assert!(styles.override_for(Breakpoint::Tablet).is_none());
        assert_eq!(
            styles.state(PseudoState::Hover).unwrap().get("color"),
            Some(&json!("blue"))
        );
        assert!(styles.base.get("responsive").is_none());
    }

    #[test]
    fn test_merge_is_shallow_per_section() {
        let mut styles = ElementStyles::new()
            .with("color", "black")
            .with("margin", "0")
            .with_override(Breakpoint::Mobile, "margin", "4px");

        let patch = ElementStyles::new()
            .with("color", "white")
            .with_override(Breakpoint::Mobile, "padding", "2px");
        styles.merge(&patch);

        assert_eq!(styles.base.get("color"), Some(&json!("white")));
        assert_eq!(styles.base.get("margin"), Some(&json!("0")));
        let mobile = styles.override_for(Breakpoint::Mobile).unwrap();
        assert_eq!(mobile.get("margin"), Some(&json!("4px")));
        assert_eq!(mobile.get("padding"), Some(&json!("2px")));
    }
}
