use crate::property::{css_property_name, css_value};
use blockcraft_document::{Breakpoint, ElementStyles};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat property → CSS value map for one breakpoint
pub type ResolvedStyles = BTreeMap<String, String>;

/// Effective value of one property at `breakpoint`.
///
/// Walks the requested breakpoint, then every larger one up to desktop,
/// then the base map. Unset values (`null`, `""`) are skipped, never treated
/// as an explicit clear.
pub fn resolve_property<'a>(
    styles: &'a ElementStyles,
    property: &str,
    breakpoint: Breakpoint,
) -> Option<&'a Value> {
    breakpoint
        .fallback_chain()
        .find_map(|bp| styles.override_for(bp).and_then(|m| m.get_set(property)))
        .or_else(|| styles.base.get_set(property))
}

/// Effective style map at `breakpoint`. Pure: `styles` is never modified.
///
/// Only properties mentioned in the base map or in the override maps on the
/// fallback chain are considered, so a mobile-only property does not leak
/// into the desktop result.
pub fn resolve_styles(styles: &ElementStyles, breakpoint: Breakpoint) -> ResolvedStyles {
    let mut resolved = ResolvedStyles::new();

    let candidates = styles.base.properties().chain(
        breakpoint
            .fallback_chain()
            .filter_map(|bp| styles.override_for(bp))
            .flat_map(|m| m.properties()),
    );

    for property in candidates {
        if resolved.contains_key(property) {
            continue;
        }
        if let Some(value) = resolve_property(styles, property, breakpoint).and_then(css_value) {
            resolved.insert(property.to_string(), value);
        }
    }

    resolved
}

/// `color: red; font-size: 12px`
pub fn to_inline_style(resolved: &ResolvedStyles) -> String {
    resolved
        .iter()
        .map(|(property, value)| format!("{}: {}", css_property_name(property), value))
        .collect::<Vec<_>>()
        .join("; ")
}
