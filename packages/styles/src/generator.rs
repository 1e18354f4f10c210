use crate::css::{CssRule, StyleSheet};
use crate::property::{css_property_name, css_value};
use crate::BreakpointConfig;
use blockcraft_document::{BlockId, Breakpoint, Document, ElementStyles, StyleMap};
use tracing::{debug, instrument};

/// Class attached to a rendered block: `<prefix>-<id>`
pub fn block_class(prefix: &str, id: &BlockId) -> String {
    let safe: String = id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}-{}", prefix, safe)
}

fn push_map(rule: &mut CssRule, map: &StyleMap) {
    for (property, value) in map.iter() {
        if let Some(value) = css_value(value) {
            rule.push(css_property_name(property), value);
        }
    }
}

/// CSS for one block, desktop-first.
///
/// - base rule: base map with the desktop override merged on top
/// - one `@media` rule per smaller breakpoint holding only its explicit
///   values; the cascade supplies the fallback to larger breakpoints
/// - one rule per pseudo state
///
/// Unset values are skipped, so they inherit exactly as in
/// [`resolve_styles`](crate::resolve_styles).
pub fn generate_block_css(
    selector: &str,
    styles: &ElementStyles,
    breakpoints: &BreakpointConfig,
) -> StyleSheet {
    let mut sheet = StyleSheet::new();

    let mut base = styles.base.clone();
    if let Some(desktop) = styles.override_for(Breakpoint::Desktop) {
        for (property, value) in desktop.iter() {
            if blockcraft_document::is_set(value) {
                base.set(property, value.clone());
            }
        }
    }
    let mut base_rule = CssRule::new(selector);
    push_map(&mut base_rule, &base);
    sheet.add_rule(base_rule);

    for (state, map) in &styles.states {
        let mut rule = CssRule::new(format!("{}{}", selector, state.selector_suffix()));
        push_map(&mut rule, map);
        sheet.add_rule(rule);
    }

    for breakpoint in [Breakpoint::Tablet, Breakpoint::Mobile] {
        if let Some(map) = styles.override_for(breakpoint) {
            let mut rule = CssRule::new(selector)
                .for_breakpoint(breakpoint, breakpoints.media_query(breakpoint));
            push_map(&mut rule, map);
            sheet.add_rule(rule);
        }
    }

    sheet
}

/// CSS for every block in `document`.
///
/// Rules are emitted in tree order; [`StyleSheet::to_css`] groups the media
/// rules so every tablet block precedes every mobile block.
#[instrument(skip_all, fields(blocks = document.len()))]
pub fn generate_document_css(
    document: &Document,
    prefix: &str,
    breakpoints: &BreakpointConfig,
) -> StyleSheet {
    let mut sheet = StyleSheet::new();

    for block in document.walk() {
        if block.styles.is_empty() {
            continue;
        }
        let selector = format!(".{}", block_class(prefix, &block.id));
        sheet.extend(generate_block_css(&selector, &block.styles, breakpoints));
    }

    debug!(rules = sheet.rules.len(), "Generated document CSS");
    sheet
}
