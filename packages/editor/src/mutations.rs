//! # Store Commands
//!
//! Every change to a [`Document`] is expressed as one [`Mutation`]. Each
//! command names the sequence it works on through a [`Containment`] scope
//! (top level, a column, a card, a card inside a column) instead of a
//! generic path, so the set of commands matches the set of shapes the tree
//! can take.
//!
//! ## Semantics
//!
//! ### Insert
//! - Lands at `index`, clamped to the sequence length; `None` appends
//! - The whole inserted subtree is checked for legal nesting
//! - Every id in the inserted subtree must be new to the document
//!
//! ### Update
//! - Shallow merge of the patch into the node's content
//! - Kind and id never change
//!
//! ### Delete
//! - Removes the node and its subtree
//! - Clears the selection if it pointed anywhere inside the removed subtree
//!
//! ### Move
//! - Remove at `from`, re-insert at `to`, within one sequence
//! - Both indices must be in bounds

use crate::locator::{self, Containment};
use crate::nesting::{check_subtree, Placement};
use crate::store::Snapshot;
use pagebuilder_document::{Block, BlockId, BlockKind, Content, Document, SiteSettingsPatch};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mutation {
    /// Insert a new block (and anything it carries) into a sequence
    InsertBlock {
        scope: Containment,
        block: Block,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    /// Merge a patch into a node's content, wherever it lives
    UpdateNode { node_id: BlockId, patch: Content },

    /// Merge a patch into a node that must live directly in `scope`
    UpdateChild {
        scope: Containment,
        node_id: BlockId,
        patch: Content,
    },

    /// Remove a node and its subtree, wherever it lives
    DeleteNode { node_id: BlockId },

    /// Remove a node that must live directly in `scope`
    DeleteChild { scope: Containment, node_id: BlockId },

    /// Reorder within one sequence
    MoveBlock {
        scope: Containment,
        from: usize,
        to: usize,
    },

    /// Set or clear the selection. The id is not checked.
    Select {
        #[serde(default)]
        node_id: Option<BlockId>,
    },

    UpdateSiteSettings { patch: SiteSettingsPatch },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(BlockId),

    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("A {kind} block cannot be placed in {placement}")]
    IllegalNesting { kind: BlockKind, placement: Placement },

    #[error("Duplicate block id: {0}")]
    DuplicateId(BlockId),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("{kind} blocks have no field named {field:?}")]
    UnknownField { kind: BlockKind, field: String },

    #[error("Invalid value {value:?} for field {field:?}")]
    InvalidValue { field: String, value: String },
}

impl Mutation {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertBlock { .. } => "insert_block",
            Mutation::UpdateNode { .. } => "update_node",
            Mutation::UpdateChild { .. } => "update_child",
            Mutation::DeleteNode { .. } => "delete_node",
            Mutation::DeleteChild { .. } => "delete_child",
            Mutation::MoveBlock { .. } => "move_block",
            Mutation::Select { .. } => "select",
            Mutation::UpdateSiteSettings { .. } => "update_site_settings",
        }
    }

    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Document) -> Result<(), MutationError> {
        self.validate(doc)?;
        self.apply_validated(doc)
    }

    /// Apply a mutation that has already passed [`Mutation::validate`]
    /// against this exact document.
    pub(crate) fn apply_validated(&self, doc: &mut Document) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { scope, block, index } => Self::apply_insert(doc, scope, block, *index),

            Mutation::UpdateNode { node_id, patch } => {
                let node = locator::locate_mut(doc, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                node.content.merge(patch);
                Ok(())
            }

            Mutation::UpdateChild { scope, node_id, patch } => {
                let children = locator::sequence_mut(doc, scope)?;
                let node = children
                    .iter_mut()
                    .find(|b| b.id == *node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                node.content.merge(patch);
                Ok(())
            }

            Mutation::DeleteNode { node_id } => {
                let scope = locator::locate(doc, node_id)
                    .map(|l| l.context)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Self::apply_delete(doc, &scope, node_id)
            }

            Mutation::DeleteChild { scope, node_id } => Self::apply_delete(doc, scope, node_id),

            Mutation::MoveBlock { scope, from, to } => {
                let children = locator::sequence_mut(doc, scope)?;
                let len = children.len();
                if *from >= len || *to >= len {
                    return Err(MutationError::IndexOutOfRange {
                        index: (*from).max(*to),
                        len,
                    });
                }
                let block = children.remove(*from);
                children.insert(*to, block);
                Ok(())
            }

            Mutation::Select { node_id } => {
                doc.selected = node_id.clone();
                Ok(())
            }

            Mutation::UpdateSiteSettings { patch } => {
                doc.site_settings.apply(patch);
                Ok(())
            }
        }
    }

    fn apply_insert(
        doc: &mut Document,
        scope: &Containment,
        block: &Block,
        index: Option<usize>,
    ) -> Result<(), MutationError> {
        let children = locator::sequence_mut(doc, scope)?;
        let at = index.map_or(children.len(), |i| i.min(children.len()));

        let mut block = block.clone();
        if *scope == Containment::TopLevel {
            block.order = at;
        }
        children.insert(at, block);
        Ok(())
    }

    fn apply_delete(doc: &mut Document, scope: &Containment, node_id: &BlockId) -> Result<(), MutationError> {
        let children = locator::sequence_mut(doc, scope)?;
        let index = locator::index_of(children, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
        let removed = children.remove(index);

        if let Some(selected) = &doc.selected {
            if removed.subtree_contains(selected) {
                doc.selected = None;
            }
        }
        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { scope, block, .. } => {
                locator::sequence(doc, scope)?;
                check_subtree(block, Placement::from(scope))?;

                let mut incoming = HashSet::new();
                for id in block.subtree_ids() {
                    if !incoming.insert(id) || doc.contains(id) {
                        return Err(MutationError::DuplicateId(id.clone()));
                    }
                }
                Ok(())
            }

            Mutation::UpdateNode { node_id, .. } | Mutation::DeleteNode { node_id } => {
                locator::locate(doc, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::UpdateChild { scope, node_id, .. } | Mutation::DeleteChild { scope, node_id } => {
                let children = locator::sequence(doc, scope)?;
                locator::index_of(children, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::MoveBlock { scope, from, to } => {
                let len = locator::sequence(doc, scope)?.len();
                for index in [*from, *to] {
                    if index >= len {
                        return Err(MutationError::IndexOutOfRange { index, len });
                    }
                }
                Ok(())
            }

            Mutation::Select { .. } | Mutation::UpdateSiteSettings { .. } => Ok(()),
        }
    }
}

/// Result of applying a mutation through the store
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// Store version after the command. Unchanged when rejected.
    pub version: u64,

    /// Snapshot after the command; the previous snapshot when rejected
    pub snapshot: Snapshot,

    pub outcome: Result<(), MutationError>,
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&MutationError> {
        self.outcome.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_document::ColumnSide;

    fn block(id: &str, kind: BlockKind) -> Block {
        Block::new(id, kind, Content::new())
    }

    fn insert(scope: Containment, block: Block) -> Mutation {
        Mutation::InsertBlock {
            scope,
            block,
            index: None,
        }
    }

    fn top_ids(doc: &Document) -> Vec<&str> {
        doc.blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateChild {
            scope: Containment::column("b", ColumnSide::Left),
            node_id: BlockId::from("c"),
            patch: Content::new().with("title", "Hello"),
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["type"], "update_child");
        assert_eq!(json["scope"]["scope"], "column");
        assert_eq!(json["scope"]["twoColumnId"], "b");

        let deserialized: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_insert_clamps_index_and_sets_order() {
        let mut doc = Document::with_blocks(vec![block("a", BlockKind::Header)]);
        Mutation::InsertBlock {
            scope: Containment::TopLevel,
            block: block("b", BlockKind::Divider),
            index: Some(99),
        }
        .apply(&mut doc)
        .unwrap();

        assert_eq!(top_ids(&doc), vec!["a", "b"]);
        assert_eq!(doc.blocks[1].order, 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let mut doc = Document::with_blocks(vec![block("a", BlockKind::Header)]);
        let result = insert(Containment::TopLevel, block("a", BlockKind::Text)).apply(&mut doc);
        assert_eq!(result, Err(MutationError::DuplicateId(BlockId::from("a"))));

        let card = block("c", BlockKind::Card).with_card_child(block("c", BlockKind::Text));
        let result = insert(Containment::TopLevel, card).apply(&mut doc);
        assert_eq!(result, Err(MutationError::DuplicateId(BlockId::from("c"))));
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_insert_into_missing_container() {
        let mut doc = Document::new();
        let result = insert(Containment::card("nope"), block("x", BlockKind::Text)).apply(&mut doc);
        assert_eq!(result, Err(MutationError::NodeNotFound(BlockId::from("nope"))));
    }

    #[test]
    fn test_move_within_column() {
        let columns = block("b", BlockKind::TwoColumn)
            .with_column_child(ColumnSide::Right, block("x", BlockKind::Text))
            .with_column_child(ColumnSide::Right, block("y", BlockKind::Text))
            .with_column_child(ColumnSide::Right, block("z", BlockKind::Text));
        let mut doc = Document::with_blocks(vec![columns]);

        Mutation::MoveBlock {
            scope: Containment::column("b", ColumnSide::Right),
            from: 0,
            to: 2,
        }
        .apply(&mut doc)
        .unwrap();

        let right: Vec<&str> = doc.blocks[0].children.right.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(right, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_move_out_of_range() {
        let mut doc = Document::with_blocks(vec![block("a", BlockKind::Header), block("b", BlockKind::Text)]);
        let result = Mutation::MoveBlock {
            scope: Containment::TopLevel,
            from: 0,
            to: 2,
        }
        .apply(&mut doc);

        assert_eq!(result, Err(MutationError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(top_ids(&doc), vec!["a", "b"]);
    }

    #[test]
    fn test_delete_child_requires_scope_match() {
        let card = block("g", BlockKind::Card).with_card_child(block("h", BlockKind::Text));
        let mut doc = Document::with_blocks(vec![card, block("i", BlockKind::Text)]);

        let result = Mutation::DeleteChild {
            scope: Containment::card("g"),
            node_id: BlockId::from("i"),
        }
        .apply(&mut doc);
        assert_eq!(result, Err(MutationError::NodeNotFound(BlockId::from("i"))));

        Mutation::DeleteChild {
            scope: Containment::card("g"),
            node_id: BlockId::from("h"),
        }
        .apply(&mut doc)
        .unwrap();
        assert!(doc.blocks[0].card_children.is_empty());
    }

    #[test]
    fn test_delete_clears_selection_inside_subtree() {
        let card = block("g", BlockKind::Card).with_card_child(block("h", BlockKind::Text));
        let mut doc = Document::with_blocks(vec![card]);
        doc.selected = Some(BlockId::from("h"));

        Mutation::DeleteNode {
            node_id: BlockId::from("g"),
        }
        .apply(&mut doc)
        .unwrap();

        assert!(doc.blocks.is_empty());
        assert_eq!(doc.selected, None);
    }

    #[test]
    fn test_update_merges_patch() {
        let mut doc = Document::with_blocks(vec![Block::new(
            "a",
            BlockKind::Heading,
            Content::new().with("text", "Old").with("level", "h2"),
        )]);

        Mutation::UpdateNode {
            node_id: BlockId::from("a"),
            patch: Content::new().with("text", "New"),
        }
        .apply(&mut doc)
        .unwrap();

        assert_eq!(doc.blocks[0].content.text("text"), Some("New"));
        assert_eq!(doc.blocks[0].content.text("level"), Some("h2"));
    }

    #[test]
    fn test_site_settings_patch() {
        let mut doc = Document::new();
        Mutation::UpdateSiteSettings {
            patch: SiteSettingsPatch {
                site_name: Some("Field Notes".to_string()),
                ..Default::default()
            },
        }
        .apply(&mut doc)
        .unwrap();

        assert_eq!(doc.site_settings.site_name, "Field Notes");
        assert_eq!(doc.site_settings.author, "Your Name");
    }
}
