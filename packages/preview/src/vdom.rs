use pagebuilder_document::BlockId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        classes: Vec<String>,
        children: Vec<VNode>,
        /// Block this element renders; set on the root element of each block
        #[serde(skip_serializing_if = "Option::is_none")]
        source_id: Option<BlockId>,
    },

    /// Text node, escaped when serialized
    Text { content: String },

    /// Markup inserted as-is
    Raw { html: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
            source_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn raw(html: impl Into<String>) -> Self {
        VNode::Raw { html: html.into() }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let VNode::Element { ref mut classes, .. } = self {
            classes.push(class.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_source_id(mut self, id: BlockId) -> Self {
        if let VNode::Element {
            ref mut source_id, ..
        } = self
        {
            *source_id = Some(id);
        }
        self
    }

    pub fn source_id(&self) -> Option<&BlockId> {
        match self {
            VNode::Element { source_id, .. } => source_id.as_ref(),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        matches!(self, VNode::Element { classes, .. } if classes.iter().any(|c| c == class))
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Raw { html } => html.clone(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
        }
    }

    fn collect_source_ids<'a>(&'a self, out: &mut Vec<&'a BlockId>) {
        if let Some(id) = self.source_id() {
            out.push(id);
        }
        for child in self.children() {
            child.collect_source_ids(out);
        }
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            VNode::Text { content } => out.push_str(&escape(content)),
            VNode::Raw { html } => out.push_str(html),
            VNode::Element {
                tag,
                attributes,
                classes,
                children,
                source_id,
            } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", escape(&classes.join(" "))));
                }
                for (key, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", key, escape(value)));
                }
                if let Some(id) = source_id {
                    out.push_str(&format!(" data-block-id=\"{}\"", escape(id.as_str())));
                }
                if children.is_empty() && is_void(tag) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }
}

/// Virtual Document (the rendered preview of one page)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub nodes: Vec<VNode>,
}

impl VirtualDomDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: VNode) {
        self.nodes.push(node);
    }

    /// Ids of every rendered block, depth-first in document order
    pub fn source_ids(&self) -> Vec<&BlockId> {
        let mut ids = Vec::new();
        for node in &self.nodes {
            node.collect_source_ids(&mut ids);
        }
        ids
    }

    /// The root element rendering `id`, at any depth
    pub fn find_by_source_id(&self, id: &BlockId) -> Option<&VNode> {
        fn find<'a>(node: &'a VNode, id: &BlockId) -> Option<&'a VNode> {
            if node.source_id() == Some(id) {
                return Some(node);
            }
            node.children().iter().find_map(|child| find(child, id))
        }
        self.nodes.iter().find_map(|node| find(node, id))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "hr" | "br" | "meta" | "link" | "input")
}
