//! # Property Editors
//!
//! Per-kind field schemas for the properties panel, and the translation of
//! one field edit into the store command that matches where the edited
//! block lives.

use crate::locator::{self, Containment};
use crate::mutations::{Mutation, MutationError};
use pagebuilder_document::{BlockId, BlockKind, Content, Document};
use serde_json::Value;

pub const HEADING_LEVELS: &[&str] = &["h2", "h3", "h4"];
pub const DIVIDER_STYLES: &[&str] = &["line", "dashed", "dotted", "thick"];
pub const CALLOUT_COLORS: &[&str] = &["blue", "green", "yellow", "red", "gray"];
pub const CALLOUT_ICONS: &[&str] = &["info", "warning", "success", "error", "note"];
pub const COLUMN_GAPS: &[&str] = &["sm", "md", "lg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Url,
    /// One of a fixed set of values
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, label, kind }
}

const HEADER_FIELDS: &[FieldSpec] = &[
    field("eyebrow", "Eyebrow", FieldKind::Text),
    field("title", "Title", FieldKind::Text),
    field("author", "Author", FieldKind::Text),
    field("readingTime", "Reading Time", FieldKind::Text),
    field("publishDate", "Publish Date", FieldKind::Text),
    field("lede", "Lede", FieldKind::Multiline),
];

const TEXT_FIELDS: &[FieldSpec] = &[field("html", "Content", FieldKind::Multiline)];

const IMAGE_FIELDS: &[FieldSpec] = &[
    field("src", "Image URL", FieldKind::Url),
    field("alt", "Alt Text", FieldKind::Text),
    field("caption", "Caption", FieldKind::Text),
];

const HEADING_FIELDS: &[FieldSpec] = &[
    field("text", "Text", FieldKind::Text),
    field("level", "Level", FieldKind::Choice(HEADING_LEVELS)),
];

const SUBHEADING_FIELDS: &[FieldSpec] = &[field("text", "Text", FieldKind::Text)];

const DIVIDER_FIELDS: &[FieldSpec] = &[field("style", "Style", FieldKind::Choice(DIVIDER_STYLES))];

const CARD_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("backgroundColor", "Background Color", FieldKind::Text),
];

const CALLOUT_FIELDS: &[FieldSpec] = &[
    field("text", "Text", FieldKind::Multiline),
    field("color", "Color", FieldKind::Choice(CALLOUT_COLORS)),
    field("icon", "Icon", FieldKind::Choice(CALLOUT_ICONS)),
];

const PRODUCT_CARD_FIELDS: &[FieldSpec] = &[
    field("image", "Image URL", FieldKind::Url),
    field("title", "Title", FieldKind::Text),
    field("description", "Description", FieldKind::Multiline),
    field("buttonText", "Button Text", FieldKind::Text),
    field("buttonLink", "Button Link", FieldKind::Url),
];

const TWO_COLUMN_FIELDS: &[FieldSpec] = &[field("gap", "Gap", FieldKind::Choice(COLUMN_GAPS))];

/// Editable fields of `kind`, in panel order
pub fn fields_for(kind: BlockKind) -> &'static [FieldSpec] {
    match kind {
        BlockKind::Header => HEADER_FIELDS,
        BlockKind::Text => TEXT_FIELDS,
        BlockKind::Image => IMAGE_FIELDS,
        BlockKind::Heading => HEADING_FIELDS,
        BlockKind::Subheading => SUBHEADING_FIELDS,
        BlockKind::Divider => DIVIDER_FIELDS,
        BlockKind::Card => CARD_FIELDS,
        BlockKind::Callout => CALLOUT_FIELDS,
        BlockKind::ProductCard => PRODUCT_CARD_FIELDS,
        BlockKind::TwoColumn => TWO_COLUMN_FIELDS,
    }
}

pub fn field_spec(kind: BlockKind, name: &str) -> Option<&'static FieldSpec> {
    fields_for(kind).iter().find(|f| f.name == name)
}

/// Check a single field edit against the schema of `kind`
pub fn check_field(kind: BlockKind, name: &str, value: &str) -> Result<(), MutationError> {
    let spec = field_spec(kind, name).ok_or_else(|| MutationError::UnknownField {
        kind,
        field: name.to_string(),
    })?;

    if let FieldKind::Choice(choices) = spec.kind {
        if !choices.contains(&value) {
            return Err(MutationError::InvalidValue {
                field: name.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// The update command for a node living in `context`
pub fn scoped_update(context: &Containment, id: BlockId, patch: Content) -> Mutation {
    match context {
        Containment::TopLevel => Mutation::UpdateNode { node_id: id, patch },
        scope => Mutation::UpdateChild {
            scope: scope.clone(),
            node_id: id,
            patch,
        },
    }
}

/// Build the command for setting `field` of block `id` to `value`.
///
/// The block is located fresh in `doc`, so the command targets the
/// sequence the block is in right now.
pub fn property_mutation(doc: &Document, id: &BlockId, field: &str, value: &str) -> Result<Mutation, MutationError> {
    let located = locator::locate(doc, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
    check_field(located.block.kind, field, value)?;

    let patch = Content::new().with(field, Value::String(value.to_string()));
    Ok(scoped_update(&located.context, id.clone(), patch))
}
