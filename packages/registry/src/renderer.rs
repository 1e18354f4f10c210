use crate::escape_html;
use blockcraft_document::{BlockNode, Breakpoint};
use serde::{Deserialize, Serialize};

/// Which of a block type's two renderers to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Canvas markup: carries block ids so the editor can map clicks back
    Edit,
    /// Published markup
    Save,
}

/// Per-block inputs computed by the rendering pipeline
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub mode: RenderMode,
    pub device: Breakpoint,
    pub class_name: &'a str,
    pub inline_style: Option<&'a str>,
    /// Already rendered children
    pub inner_html: &'a str,
}

impl<'a> RenderContext<'a> {
    /// Attributes every renderer puts on its root element, with a leading
    /// space: ` class="bc-x" style="..." data-block-id="x"`.
    pub fn root_attributes(&self, block: &BlockNode, extra_class: Option<&str>) -> String {
        let mut attrs = String::new();

        attrs.push_str(" class=\"");
        if let Some(extra) = extra_class {
            attrs.push_str(&escape_html(extra));
            attrs.push(' ');
        }
        attrs.push_str(&escape_html(self.class_name));
        attrs.push('"');

        if let Some(style) = self.inline_style.filter(|s| !s.is_empty()) {
            attrs.push_str(" style=\"");
            attrs.push_str(&escape_html(style));
            attrs.push('"');
        }

        if self.mode == RenderMode::Edit {
            attrs.push_str(" data-block-id=\"");
            attrs.push_str(&escape_html(block.id.as_str()));
            attrs.push_str("\" data-block-type=\"");
            attrs.push_str(&escape_html(&block.name));
            attrs.push('"');
        }

        attrs
    }
}

/// The pair of renderers behind a block type.
///
/// Implementations are opaque to the registry. `edit` defaults to `save`,
/// which is right for most static blocks.
pub trait BlockRenderer: Send + Sync {
    /// Published markup
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String;

    /// Canvas markup
    fn edit(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        self.save(block, ctx)
    }

    fn render(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        match ctx.mode {
            RenderMode::Edit => self.edit(block, ctx),
            RenderMode::Save => self.save(block, ctx),
        }
    }
}

impl<F> BlockRenderer for F
where
    F: Fn(&BlockNode, &RenderContext<'_>) -> String + Send + Sync,
{
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        self(block, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: RenderMode) -> RenderContext<'static> {
        RenderContext {
            mode,
            device: Breakpoint::Desktop,
            class_name: "bc-a",
            inline_style: Some("color: red"),
            inner_html: "",
        }
    }

    #[test]
    fn test_root_attributes_by_mode() {
        let block = BlockNode::new("a", "core/paragraph");

        let save = ctx(RenderMode::Save).root_attributes(&block, Some("wp-paragraph"));
        assert_eq!(save, " class=\"wp-paragraph bc-a\" style=\"color: red\"");

        let edit = ctx(RenderMode::Edit).root_attributes(&block, None);
        assert_eq!(
            edit,
            " class=\"bc-a\" style=\"color: red\" data-block-id=\"a\" data-block-type=\"core/paragraph\""
        );
    }

    #[test]
    fn test_closure_renderer() {
        let renderer = |block: &BlockNode, _ctx: &RenderContext<'_>| format!("<hr id=\"{}\">", block.id);
        let block = BlockNode::new("sep", "core/separator");
        assert_eq!(renderer.render(&block, &ctx(RenderMode::Edit)), "<hr id=\"sep\">");
    }
}
