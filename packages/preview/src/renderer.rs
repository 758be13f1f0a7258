use crate::vdom::{VNode, VirtualDomDocument};
use pagebuilder_common::presentation::{
    self, callout_color, callout_icon, column_gap, css_color, display_text, divider_variant, heading_level,
};
use pagebuilder_common::{walk_block, walk_sequence, Visitor};
use pagebuilder_document::{Block, BlockKind, ColumnSide, Document};
use std::borrow::Cow;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Insert the text block's `html` field as markup instead of text
    pub trust_text_html: bool,
    /// Show the empty-page placeholder when there are no blocks
    pub placeholder: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            trust_text_html: true,
            placeholder: true,
        }
    }
}

/// Render a document to a virtual DOM for the live preview
pub fn render_preview(document: &Document, options: &PreviewOptions) -> VirtualDomDocument {
    if document.is_empty() {
        let mut vdom = VirtualDomDocument::new();
        if options.placeholder {
            vdom.add_node(empty_placeholder());
        }
        return vdom;
    }

    let mut renderer = PreviewRenderer {
        options,
        frames: vec![Vec::new()],
    };
    renderer.visit_document(document);

    let nodes = renderer.frames.pop().unwrap_or_default();
    debug!(nodes = nodes.len(), "rendered preview");
    VirtualDomDocument { nodes }
}

fn empty_placeholder() -> VNode {
    VNode::element("div")
        .with_class("preview-empty")
        .with_child(VNode::element("p").with_class("preview-empty-title").with_child(VNode::text("No components yet")))
        .with_child(
            VNode::element("p")
                .with_class("preview-empty-hint")
                .with_child(VNode::text("Add components to see your blog preview")),
        )
}

/// Builds nodes bottom-up: each container pushes a frame, its children
/// render into that frame, and popping it yields the container's children.
struct PreviewRenderer<'a> {
    options: &'a PreviewOptions,
    frames: Vec<Vec<VNode>>,
}

impl<'a> PreviewRenderer<'a> {
    fn emit(&mut self, node: VNode) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(node);
        }
    }

    fn collect(&mut self, render: impl FnOnce(&mut Self)) -> Vec<VNode> {
        self.frames.push(Vec::new());
        render(self);
        self.frames.pop().unwrap_or_default()
    }

    fn root(&self, tag: &str, class: &str, block: &Block, depth: usize) -> VNode {
        let node = VNode::element(tag)
            .with_class(class)
            .with_class("preview-block")
            .with_source_id(block.id.clone());
        if depth > 0 {
            node.with_class("is-nested")
        } else {
            node
        }
    }

    fn render_leaf(&self, block: &Block, depth: usize) -> VNode {
        let content = &block.content;
        let text = |name: &str| text(block, name);
        let field = |name: &str| field(block, name);

        match block.kind {
            BlockKind::Header => {
                let mut node = self.root("header", "header", block, depth);
                if let Some(eyebrow) = text("eyebrow") {
                    node = node.with_child(VNode::element("div").with_class("header-eyebrow").with_child(VNode::text(eyebrow)));
                }
                node = node.with_child(VNode::element("h1").with_child(VNode::text(text_or(block, "title", "Untitled"))));

                let mut meta = VNode::element("div").with_class("header-meta");
                if let Some(author) = text("author") {
                    meta = meta.with_child(span(&format!("By {}", author)));
                }
                for field in ["publishDate", "readingTime"] {
                    if let Some(value) = text(field) {
                        meta = meta.with_child(span(&value));
                    }
                }
                node = node.with_child(meta);

                if let Some(lede) = text("lede") {
                    node = node.with_child(VNode::element("p").with_class("header-lede").with_child(VNode::text(lede)));
                }
                node
            }
            BlockKind::Heading => {
                let tag = format!("h{}", heading_level(content.get("level")));
                self.root(&tag, "heading", block, depth)
                    .with_child(VNode::text(text_or(block, "text", "Heading")))
            }
            BlockKind::Subheading => self
                .root("div", "subheading", block, depth)
                .with_child(VNode::text(text_or(block, "text", "Subheading"))),
            BlockKind::Text => {
                let html = field("html").unwrap_or_default();
                let body = if self.options.trust_text_html {
                    VNode::raw(html)
                } else {
                    VNode::text(html)
                };
                self.root("div", "text", block, depth).with_child(body)
            }
            BlockKind::Image => {
                let img = VNode::element("img")
                    .with_attr("src", field("src").unwrap_or_default())
                    .with_attr("alt", field("alt").unwrap_or_default());
                let mut node = self.root("figure", "image", block, depth).with_child(img);
                if let Some(caption) = text("caption") {
                    node = node.with_child(VNode::element("figcaption").with_child(VNode::text(caption)));
                }
                node
            }
            BlockKind::Divider => {
                let node = self.root("hr", "divider", block, depth);
                match divider_variant(field("style").as_deref()) {
                    Some(style) => node.with_class(format!("divider-{}", style)),
                    None => node,
                }
            }
            BlockKind::Callout => {
                let color = callout_color(field("color").as_deref());
                let icon = callout_icon(field("icon").as_deref());
                self.root("div", "callout", block, depth)
                    .with_class(format!("callout-{}", color))
                    .with_child(VNode::element("span").with_class("callout-icon").with_child(VNode::text(icon)))
                    .with_child(VNode::text(text_or(block, "text", "Important information")))
            }
            BlockKind::ProductCard => {
                let mut node = self.root("div", "product-card", block, depth);
                let title = text("title");
                if let Some(image) = text("image") {
                    node = node.with_child(
                        VNode::element("img")
                            .with_attr("src", image)
                            .with_attr("alt", title.clone().unwrap_or(Cow::Borrowed("Product"))),
                    );
                }

                let mut body = VNode::element("div").with_class("product-card-content");
                if let Some(title) = title {
                    body = body.with_child(VNode::element("h3").with_class("product-card-title").with_child(VNode::text(title)));
                }
                if let Some(description) = text("description") {
                    body = body.with_child(
                        VNode::element("p")
                            .with_class("product-card-description")
                            .with_child(VNode::text(description)),
                    );
                }
                if let (Some(label), Some(link)) = (text("buttonText"), text("buttonLink")) {
                    body = body.with_child(
                        VNode::element("a")
                            .with_class("product-card-button")
                            .with_attr("href", link)
                            .with_child(VNode::text(label)),
                    );
                }
                node.with_child(body)
            }
            // containers are rendered by visit_block
            BlockKind::Card | BlockKind::TwoColumn => self.root("div", block.kind.as_str(), block, depth),
        }
    }

    fn render_card(&mut self, block: &Block, depth: usize) -> VNode {
        let mut node = self.root("div", "card", block, depth);
        if let Some(color) = field(block, "backgroundColor").as_deref().and_then(css_color) {
            node = node.with_attr("style", format!("background-color: {};", color));
        }
        if let Some(title) = text(block, "title") {
            node = node.with_child(VNode::element("div").with_class("card-title").with_child(VNode::text(title)));
        }
        let children = self.collect(|this| walk_block(this, block, depth));
        node.with_children(children)
    }

    fn render_two_column(&mut self, block: &Block, depth: usize) -> VNode {
        let mut node = self.root("div", "two-column", block, depth);
        if let Some(gap) = column_gap(field(block, "gap").as_deref()) {
            node = node.with_class(format!("gap-{}", gap));
        }
        let columns = self.collect(|this| walk_block(this, block, depth));
        node.with_children(columns)
    }
}

impl<'a> Visitor for PreviewRenderer<'a> {
    fn visit_block(&mut self, block: &Block, depth: usize) {
        let node = match block.kind {
            BlockKind::Card => self.render_card(block, depth),
            BlockKind::TwoColumn => self.render_two_column(block, depth),
            _ => self.render_leaf(block, depth),
        };
        self.emit(node);
    }

    fn visit_column(&mut self, _parent: &Block, side: ColumnSide, children: &[Block], depth: usize) {
        let nodes = self.collect(|this| walk_sequence(this, children, depth));
        let column = VNode::element("div")
            .with_class("column")
            .with_class(format!("column-{}", side))
            .with_children(nodes);
        self.emit(column);
    }

    fn visit_card_children(&mut self, _card: &Block, children: &[Block], depth: usize) {
        let nodes = self.collect(|this| walk_sequence(this, children, depth));
        self.emit(VNode::element("div").with_class("card-content").with_children(nodes));
    }
}

/// Field as display text, the same way the static export reads it
fn field<'b>(block: &'b Block, name: &str) -> Option<Cow<'b, str>> {
    block.content.get(name).and_then(display_text)
}

fn text<'b>(block: &'b Block, name: &str) -> Option<Cow<'b, str>> {
    field(block, name).filter(|s| !s.is_empty())
}

fn text_or<'b>(block: &'b Block, name: &str, fallback: &'static str) -> Cow<'b, str> {
    presentation::text_or(block.content.get(name), fallback)
}

fn span(text: &str) -> VNode {
    VNode::element("span").with_child(VNode::text(text))
}
