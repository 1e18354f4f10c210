use blockcraft_document::{BlockId, BlockNode, Breakpoint, Document, ElementStyles};
use blockcraft_registry::{escape_html, BlockRegistry, RenderContext, RenderMode};
use blockcraft_styles::{
    block_class, generate_block_css, generate_document_css, resolve_styles, to_inline_style,
    BreakpointConfig, CssRule, StyleSheet,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Options for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Device previewed on the canvas (edit mode only)
    pub device: Breakpoint,
    pub class_prefix: String,
    pub breakpoints: BreakpointConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Save,
            device: Breakpoint::Desktop,
            class_prefix: "bc".to_string(),
            breakpoints: BreakpointConfig::default(),
        }
    }
}

impl RenderOptions {
    pub fn edit(device: Breakpoint) -> Self {
        Self {
            mode: RenderMode::Edit,
            device,
            ..Self::default()
        }
    }

    pub fn save() -> Self {
        Self::default()
    }
}

/// Output of a render pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub html: String,
    pub css: String,
    /// Blocks whose type was not registered
    pub missing: Vec<BlockId>,
}

impl RenderedPage {
    /// Standalone HTML page with the CSS inlined in `<head>`
    pub fn to_html_document(&self, title: &str) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("  <meta charset=\"utf-8\">\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
        if !self.css.is_empty() {
            out.push_str("  <style>\n");
            out.push_str(&self.css);
            out.push_str("  </style>\n");
        }
        out.push_str("</head>\n<body>\n");
        out.push_str(&self.html);
        out.push_str("\n</body>\n</html>\n");
        out
    }
}

/// Renders documents against an explicitly supplied registry
pub struct Renderer<'r> {
    registry: &'r BlockRegistry,
    options: RenderOptions,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r BlockRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[instrument(skip_all, fields(mode = ?self.options.mode, device = %self.options.device, blocks = document.len()))]
    pub fn render(&self, document: &Document) -> RenderedPage {
        let mut missing = Vec::new();
        let html = document
            .blocks
            .iter()
            .map(|block| self.render_block(block, &mut missing))
            .collect::<Vec<_>>()
            .join("\n");

        let css = self.stylesheet(document).to_css();
        debug!(html_bytes = html.len(), css_bytes = css.len(), missing = missing.len(), "Rendered document");

        RenderedPage { html, css, missing }
    }

    /// CSS for `document` under the current mode.
    ///
    /// Edit mode emits only pseudo-state rules, marked `!important` so they
    /// beat the inline device styles on the canvas.
    pub fn stylesheet(&self, document: &Document) -> StyleSheet {
        match self.options.mode {
            RenderMode::Save => generate_document_css(
                document,
                &self.options.class_prefix,
                &self.options.breakpoints,
            ),
            RenderMode::Edit => {
                let mut sheet = StyleSheet::new();
                for block in document.walk() {
                    if block.styles.states.is_empty() {
                        continue;
                    }
                    let states_only = ElementStyles {
                        states: block.styles.states.clone(),
                        ..ElementStyles::default()
                    };
                    let selector = format!(".{}", self.class_for(block));
                    let rules = generate_block_css(&selector, &states_only, &self.options.breakpoints)
                        .rules;
                    for rule in rules.into_iter().map(CssRule::important) {
                        sheet.add_rule(rule);
                    }
                }
                sheet
            }
        }
    }

    fn class_for(&self, block: &BlockNode) -> String {
        block_class(&self.options.class_prefix, &block.id)
    }

    fn render_block(&self, block: &BlockNode, missing: &mut Vec<BlockId>) -> String {
        let Some(block_type) = self.registry.get(&block.name) else {
            warn!(block = %block.id, kind = %block.name, "Block type not registered, rendering placeholder");
            missing.push(block.id.clone());
            return match self.options.mode {
                RenderMode::Save => format!("<!-- unknown block: {} -->", escape_html(&block.name)),
                RenderMode::Edit => format!(
                    "<div class=\"block-missing\" data-block-id=\"{}\">Unsupported block: {}</div>",
                    escape_html(block.id.as_str()),
                    escape_html(&block.name)
                ),
            };
        };

        let inner_html = block
            .inner_blocks
            .iter()
            .map(|child| self.render_block(child, missing))
            .collect::<String>();

        let inline_style = match self.options.mode {
            RenderMode::Edit => Some(to_inline_style(&resolve_styles(
                &block.styles,
                self.options.device,
            ))),
            RenderMode::Save => None,
        };
        let class_name = self.class_for(block);

        let ctx = RenderContext {
            mode: self.options.mode,
            device: self.options.device,
            class_name: &class_name,
            inline_style: inline_style.as_deref(),
            inner_html: &inner_html,
        };

        block_type.renderer().render(block, &ctx)
    }
}
