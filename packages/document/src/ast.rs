//! Document tree types.
//!
//! ```text
//! Document
//!  └─ blocks: [Block]                  top-level sequence
//!      ├─ two-column
//!      │   ├─ children.left:  [Block]  leaves or cards
//!      │   └─ children.right: [Block]
//!      │        └─ card
//!      │            └─ cardChildren: [Block]   leaves only
//!      └─ card
//!          └─ cardChildren: [Block]            leaves only
//! ```
//!
//! Sequence position is the authoritative order everywhere. The `order`
//! field on a block is informational and is never renumbered.

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Opaque block identifier, unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The closed set of block variants offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Header,
    Heading,
    Subheading,
    Text,
    Image,
    Divider,
    Card,
    Callout,
    ProductCard,
    TwoColumn,
}

impl BlockKind {
    /// Palette order.
    pub const ALL: [BlockKind; 10] = [
        BlockKind::Header,
        BlockKind::Heading,
        BlockKind::Subheading,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Divider,
        BlockKind::Card,
        BlockKind::Callout,
        BlockKind::ProductCard,
        BlockKind::TwoColumn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Header => "header",
            BlockKind::Heading => "heading",
            BlockKind::Subheading => "subheading",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Divider => "divider",
            BlockKind::Card => "card",
            BlockKind::Callout => "callout",
            BlockKind::ProductCard => "product-card",
            BlockKind::TwoColumn => "two-column",
        }
    }

    /// Human-readable palette label
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Header => "Header",
            BlockKind::Heading => "Heading",
            BlockKind::Subheading => "Subheading",
            BlockKind::Text => "Text Block",
            BlockKind::Image => "Image",
            BlockKind::Divider => "Divider",
            BlockKind::Card => "Card",
            BlockKind::Callout => "Callout",
            BlockKind::ProductCard => "Product Card",
            BlockKind::TwoColumn => "Two Column",
        }
    }

    /// Container kinds own child sequences; every other kind is a leaf.
    pub fn is_container(&self) -> bool {
        matches!(self, BlockKind::Card | BlockKind::TwoColumn)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DocumentError::UnknownKind(s.to_string()))
    }
}

/// One of the two columns of a `two-column` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSide {
    Left,
    Right,
}

impl ColumnSide {
    /// Render and search order.
    pub const BOTH: [ColumnSide; 2] = [ColumnSide::Left, ColumnSide::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnSide::Left => "left",
            ColumnSide::Right => "right",
        }
    }
}

impl fmt::Display for ColumnSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child sequences of a `two-column` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Columns {
    #[serde(default)]
    pub left: Vec<Block>,
    #[serde(default)]
    pub right: Vec<Block>,
}

impl Columns {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn side(&self, side: ColumnSide) -> &Vec<Block> {
        match side {
            ColumnSide::Left => &self.left,
            ColumnSide::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: ColumnSide) -> &mut Vec<Block> {
        match side {
            ColumnSide::Left => &mut self.left,
            ColumnSide::Right => &mut self.right,
        }
    }

    /// Both columns, left first.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnSide, &[Block])> {
        ColumnSide::BOTH
            .into_iter()
            .map(move |side| (side, self.side(side).as_slice()))
    }
}

/// Variant-specific property bag of a block.
///
/// Values are kept as loosely-typed JSON; readers that expect a string get
/// `None` for anything else instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(Map<String, Value>);

impl Content {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, `None` when missing or not a string.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Like [`Content::text`] but treats the empty string as missing.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.text(key).filter(|s| !s.is_empty())
    }

    /// Numeric value of `key`, accepting numbers and numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Shallow merge: every key of `patch` overwrites the same key here.
    pub fn merge(&mut self, patch: &Content) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
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
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Content {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A single node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,

    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(default)]
    pub content: Content,

    /// Informational only; sequence position is authoritative.
    #[serde(default)]
    pub order: usize,

    /// Column children, only meaningful on `two-column`
    #[serde(default, skip_serializing_if = "Columns::is_empty")]
    pub children: Columns,

    /// Card children, only meaningful on `card`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_children: Vec<Block>,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, kind: BlockKind, content: Content) -> Self {
        Self {
            id: id.into(),
            kind,
            content,
            order: 0,
            children: Columns::default(),
            card_children: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_column_child(mut self, side: ColumnSide, child: Block) -> Self {
        self.children.side_mut(side).push(child);
        self
    }

    pub fn with_card_child(mut self, child: Block) -> Self {
        self.card_children.push(child);
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty() || !self.card_children.is_empty()
    }

    /// This block's id followed by every descendant id, depth-first
    /// (left column, right column, then card children).
    pub fn subtree_ids(&self) -> Vec<&BlockId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a BlockId>) {
        out.push(&self.id);
        for (_, column) in self.children.iter() {
            for child in column {
                child.collect_ids(out);
            }
        }
        for child in &self.card_children {
            child.collect_ids(out);
        }
    }

    pub fn subtree_contains(&self, id: &BlockId) -> bool {
        self.id == *id
            || self.children.iter().any(|(_, column)| column.iter().any(|c| c.subtree_contains(id)))
            || self.card_children.iter().any(|c| c.subtree_contains(id))
    }
}

/// Site-level configuration carried alongside the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_site_name() -> String {
    "My Blog".to_string()
}

fn default_author() -> String {
    "Your Name".to_string()
}

fn default_base_url() -> String {
    "https://yourdomain.com".to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            author: default_author(),
            base_url: default_base_url(),
        }
    }
}

/// Partial update of [`SiteSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl SiteSettings {
    pub fn apply(&mut self, patch: &SiteSettingsPatch) {
        if let Some(name) = &patch.site_name {
            self.site_name = name.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(url) = &patch.base_url {
            self.base_url = url.clone();
        }
    }
}

/// Root aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// At most one selected block, anywhere in the tree. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<BlockId>,

    #[serde(default)]
    pub site_settings: SiteSettings,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Every id in the tree, depth-first in render order.
    pub fn all_ids(&self) -> Vec<&BlockId> {
        self.blocks.iter().flat_map(Block::subtree_ids).collect()
    }

    /// Total number of blocks at every depth
    pub fn block_count(&self) -> usize {
        self.all_ids().len()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.iter().any(|b| b.subtree_contains(id))
    }

    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
