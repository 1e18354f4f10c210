//! Built-in block library: text, media, layout and commerce blocks.

use crate::attributes::{
    ButtonAttributes, GroupAttributes, HeadingAttributes, ImageAttributes, ParagraphAttributes,
    ProductGridAttributes, SpacerAttributes,
};
use crate::{
    escape_html, AttributeKind, AttributeSchema, BlockMetadata, BlockRegistry, BlockRenderer,
    BlockSupports, BlockTemplate, BlockType, BlockVariation, RenderContext,
};
use blockcraft_document::BlockNode;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Typed attributes, or defaults when the stored values have the wrong shape
fn typed<T: DeserializeOwned + Default>(block: &BlockNode) -> T {
    block.attributes_as().unwrap_or_else(|err| {
        warn!(block = %block.id, kind = %block.name, error = %err, "Malformed attributes, using defaults");
        T::default()
    })
}

fn text_supports() -> BlockSupports {
    BlockSupports {
        align: true,
        color: true,
        spacing: true,
        typography: true,
        ..BlockSupports::default()
    }
}

fn layout_supports() -> BlockSupports {
    BlockSupports {
        align: true,
        color: true,
        spacing: true,
        html: false,
        ..BlockSupports::default()
    }
}

struct Heading;

impl Heading {
    fn class(attrs: &HeadingAttributes) -> String {
        match &attrs.text_align {
            Some(align) => format!("block-heading has-text-align-{}", align),
            None => "block-heading".to_string(),
        }
    }
}

impl BlockRenderer for Heading {
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: HeadingAttributes = typed(block);
        let tag = attrs.tag();
        format!(
            "<{tag}{}>{}</{tag}>",
            ctx.root_attributes(block, Some(&Self::class(&attrs))),
            escape_html(&attrs.text),
        )
    }

    fn edit(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: HeadingAttributes = typed(block);
        let tag = attrs.tag();
        let text = if attrs.text.is_empty() {
            "Heading".to_string()
        } else {
            escape_html(&attrs.text)
        };
        format!(
            "<{tag}{} contenteditable=\"true\">{}</{tag}>",
            ctx.root_attributes(block, Some(&Self::class(&attrs))),
            text,
        )
    }
}

struct Paragraph;

impl BlockRenderer for Paragraph {
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: ParagraphAttributes = typed(block);
        let class = if attrs.drop_cap { "block-paragraph has-drop-cap" } else { "block-paragraph" };
        format!(
            "<p{}>{}</p>",
            ctx.root_attributes(block, Some(class)),
            escape_html(&attrs.text)
        )
    }

    fn edit(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: ParagraphAttributes = typed(block);
        format!(
            "<p{} contenteditable=\"true\" data-placeholder=\"Type / to choose a block\">{}</p>",
            ctx.root_attributes(block, Some("block-paragraph")),
            escape_html(&attrs.text)
        )
    }
}

struct Image;

impl BlockRenderer for Image {
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: ImageAttributes = typed(block);
        let mut img = format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&attrs.src),
            escape_html(&attrs.alt)
        );
        if let Some(href) = &attrs.href {
            img = format!("<a href=\"{}\">{}</a>", escape_html(href), img);
        }
        let caption = attrs
            .caption
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| format!("<figcaption>{}</figcaption>", escape_html(c)))
            .unwrap_or_default();

        format!(
            "<figure{}>{}{}</figure>",
            ctx.root_attributes(block, Some("block-image")),
            img,
            caption
        )
    }

    fn edit(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: ImageAttributes = typed(block);
        if attrs.src.is_empty() {
            return format!(
                "<div{}><div class=\"block-placeholder\">Select an image</div></div>",
                ctx.root_attributes(block, Some("block-image is-placeholder"))
            );
        }
        self.save(block, ctx)
    }
}

struct Button;

impl BlockRenderer for Button {
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: ButtonAttributes = typed(block);
        let href = attrs
            .url
            .as_deref()
            .map(|url| format!(" href=\"{}\"", escape_html(url)))
            .unwrap_or_default();
        let target = if attrs.open_in_new_tab {
            " target=\"_blank\" rel=\"noopener noreferrer\""
        } else {
            ""
        };
        format!(
            "<div{}><a class=\"block-button__link\"{}{}>{}</a></div>",
            ctx.root_attributes(block, Some("block-button")),
            href,
            target,
            escape_html(&attrs.text)
        )
    }
}

/// Container block: group, columns and column share it
struct Container {
    class: &'static str,
}

impl BlockRenderer for Container {
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: GroupAttributes = typed(block);
        let tag = attrs.tag();
        format!(
            "<{tag}{}>{}</{tag}>",
            ctx.root_attributes(block, Some(self.class)),
            ctx.inner_html
        )
    }

    fn edit(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        if block.inner_blocks.is_empty() {
            return format!(
                "<div{}><div class=\"block-appender\">+</div></div>",
                ctx.root_attributes(block, Some(self.class))
            );
        }
        self.save(block, ctx)
    }
}

struct Spacer;

impl BlockRenderer for Spacer {
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: SpacerAttributes = typed(block);
        let style = match ctx.inline_style.filter(|s| !s.is_empty()) {
            Some(inline) => format!("height: {}; {}", attrs.height, inline),
            None => format!("height: {}", attrs.height),
        };
        let ctx = RenderContext {
            inline_style: Some(&style),
            ..ctx.clone()
        };
        format!(
            "<div{} aria-hidden=\"true\"></div>",
            ctx.root_attributes(block, Some("block-spacer"))
        )
    }
}

struct Separator;

impl BlockRenderer for Separator {
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        format!("<hr{}>", ctx.root_attributes(block, Some("block-separator")))
    }
}

struct ProductGrid;

impl ProductGrid {
    fn data_attributes(attrs: &ProductGridAttributes) -> String {
        let mut data = format!(
            " data-columns=\"{}\" data-limit=\"{}\" data-show-price=\"{}\" data-show-add-to-cart=\"{}\"",
            attrs.columns, attrs.limit, attrs.show_price, attrs.show_add_to_cart
        );
        if let Some(category) = &attrs.category {
            data.push_str(&format!(" data-category=\"{}\"", escape_html(category)));
        }
        data
    }
}

impl BlockRenderer for ProductGrid {
    /// Products are fetched by the storefront at page load; the saved markup
    /// only carries the query.
    fn save(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: ProductGridAttributes = typed(block);
        format!(
            "<div{}{}></div>",
            ctx.root_attributes(block, Some("block-product-grid")),
            Self::data_attributes(&attrs)
        )
    }

    fn edit(&self, block: &BlockNode, ctx: &RenderContext<'_>) -> String {
        let attrs: ProductGridAttributes = typed(block);
        let cards: String = (1..=attrs.limit)
            .map(|n| {
                format!(
                    "<div class=\"product-card is-placeholder\">Product {}</div>",
                    n
                )
            })
            .collect();
        format!(
            "<div{}{}>{}</div>",
            ctx.root_attributes(block, Some("block-product-grid")),
            Self::data_attributes(&attrs),
            cards
        )
    }
}

/// Register the built-in blocks into `registry`
pub fn register_core_blocks(registry: &mut BlockRegistry) {
    registry.register(
        BlockType::new(
            "core/heading",
            BlockMetadata::new("Heading", "text")
                .with_description("Introduce new sections and organize content.")
                .with_icon("heading")
                .with_keywords(["title", "subtitle"])
                .with_supports(text_supports()),
            Heading,
        )
        .with_attributes(
            AttributeSchema::new()
                .attribute_with_default("text", AttributeKind::String, "")
                .attribute_with_default("level", AttributeKind::Integer, 2)
                .attribute("textAlign", AttributeKind::String),
        ),
    );

    registry.register(
        BlockType::new(
            "core/paragraph",
            BlockMetadata::new("Paragraph", "text")
                .with_description("Start with the basic building block of all narrative.")
                .with_icon("paragraph")
                .with_keywords(["text"])
                .with_supports(text_supports()),
            Paragraph,
        )
        .with_attributes(
            AttributeSchema::new()
                .attribute_with_default("text", AttributeKind::String, "")
                .attribute_with_default("dropCap", AttributeKind::Boolean, false),
        ),
    );

    registry.register(
        BlockType::new(
            "core/image",
            BlockMetadata::new("Image", "media")
                .with_description("Insert an image to make a visual statement.")
                .with_icon("format-image")
                .with_keywords(["photo", "picture"])
                .with_supports(BlockSupports {
                    align: true,
                    spacing: true,
                    ..BlockSupports::default()
                }),
            Image,
        )
        .with_attributes(
            AttributeSchema::new()
                .attribute_with_default("src", AttributeKind::String, "")
                .attribute_with_default("alt", AttributeKind::String, "")
                .attribute("caption", AttributeKind::String)
                .attribute("href", AttributeKind::String),
        ),
    );

    registry.register(
        BlockType::new(
            "core/button",
            BlockMetadata::new("Button", "design")
                .with_description("Prompt visitors to take action with a button-style link.")
                .with_icon("button")
                .with_keywords(["link", "cta"])
                .with_supports(text_supports()),
            Button,
        )
        .with_attributes(
            AttributeSchema::new()
                .attribute_with_default("text", AttributeKind::String, "")
                .attribute("url", AttributeKind::String)
                .attribute_with_default("openInNewTab", AttributeKind::Boolean, false),
        ),
    );

    registry.register(
        BlockType::new(
            "core/group",
            BlockMetadata::new("Group", "design")
                .with_description("Gather blocks in a layout container.")
                .with_icon("group")
                .with_keywords(["container", "wrapper", "row", "section"])
                .with_supports(layout_supports()),
            Container { class: "block-group" },
        )
        .with_attributes(
            AttributeSchema::new().attribute_with_default("tagName", AttributeKind::String, "div"),
        ),
    );

    registry.register(
        BlockType::new(
            "core/columns",
            BlockMetadata::new("Columns", "design")
                .with_description("Display content in multiple columns.")
                .with_icon("columns")
                .with_keywords(["layout", "grid"])
                .with_supports(layout_supports()),
            Container { class: "block-columns" },
        )
        .with_attributes(
            AttributeSchema::new().attribute_with_default(
                "isStackedOnMobile",
                AttributeKind::Boolean,
                true,
            ),
        )
        .with_variation(
            BlockVariation::new("two-columns", "50 / 50")
                .with_inner_block(BlockTemplate::new("core/column"))
                .with_inner_block(BlockTemplate::new("core/column"))
                .as_default(),
        )
        .with_variation(
            BlockVariation::new("three-columns", "33 / 33 / 33")
                .with_inner_block(BlockTemplate::new("core/column"))
                .with_inner_block(BlockTemplate::new("core/column"))
                .with_inner_block(BlockTemplate::new("core/column")),
        )
        .with_variation(
            BlockVariation::new("sidebar", "33 / 66")
                .with_inner_block(BlockTemplate::new("core/column").with_attribute("width", "33.33%"))
                .with_inner_block(BlockTemplate::new("core/column").with_attribute("width", "66.66%")),
        ),
    );

    registry.register(
        BlockType::new(
            "core/column",
            BlockMetadata::new("Column", "design")
                .with_description("A single column within a columns block.")
                .with_icon("column")
                .with_parent("core/columns")
                .with_supports(BlockSupports {
                    inserter: false,
                    ..layout_supports()
                }),
            Container { class: "block-column" },
        )
        .with_attributes(AttributeSchema::new().attribute("width", AttributeKind::String)),
    );

    registry.register(
        BlockType::new(
            "core/spacer",
            BlockMetadata::new("Spacer", "design")
                .with_description("Add white space between blocks.")
                .with_icon("image-flip-vertical")
                .with_keywords(["gap", "whitespace"])
                .with_supports(BlockSupports {
                    html: false,
                    ..BlockSupports::default()
                }),
            Spacer,
        )
        .with_attributes(
            AttributeSchema::new().attribute_with_default("height", AttributeKind::String, "32px"),
        ),
    );

    registry.register(BlockType::new(
        "core/separator",
        BlockMetadata::new("Separator", "design")
            .with_description("Create a break between ideas or sections.")
            .with_icon("minus")
            .with_keywords(["divider", "hr"])
            .with_supports(BlockSupports {
                color: true,
                ..BlockSupports::default()
            }),
        Separator,
    ));

    registry.register(
        BlockType::new(
            "commerce/product-grid",
            BlockMetadata::new("Product Grid", "commerce")
                .with_description("Show products from your catalog in a grid.")
                .with_icon("grid-view")
                .with_keywords(["shop", "products", "catalog", "store"])
                .with_supports(BlockSupports {
                    align: true,
                    spacing: true,
                    html: false,
                    ..BlockSupports::default()
                }),
            ProductGrid,
        )
        .with_attributes(
            AttributeSchema::new()
                .attribute_with_default("columns", AttributeKind::Integer, 3)
                .attribute_with_default("limit", AttributeKind::Integer, 6)
                .attribute("category", AttributeKind::String)
                .attribute_with_default("showPrice", AttributeKind::Boolean, true)
                .attribute_with_default("showAddToCart", AttributeKind::Boolean, true),
        )
        .with_variation(
            BlockVariation::new("featured", "Featured products")
                .with_description("Four hand-picked products in a single row.")
                .with_attribute("columns", 4)
                .with_attribute("limit", 4),
        ),
    );
}
