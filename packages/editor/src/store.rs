//! # Document Tree Store
//!
//! Sole owner and sole mutator of a [`Document`]. Readers hold a
//! [`Snapshot`]; a snapshot never changes once produced. Every command
//! validates against the current snapshot, then builds the next one from a
//! copy, so a rejected command leaves the current snapshot untouched (the
//! same `Arc`).
//!
//! Ids of deleted blocks are retired for the life of the store; inserting a
//! block that carries one is rejected as a duplicate.
//!
//! ## Lifecycle
//!
//! ```text
//! command → validate → clone → apply → swap snapshot → version + 1
//!              ↓
//!          rejected → same snapshot, same version
//! ```

use crate::locator::{self, Containment, Located};
use crate::mutations::{Mutation, MutationError, MutationResult};
use crate::nesting::validate_document;
use pagebuilder_document::{Block, BlockId, ColumnSide, Content, Document, SiteSettingsPatch};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// One immutable value of the document
pub type Snapshot = Arc<Document>;

#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Increments on each applied command
    version: u64,
    current: Snapshot,
    /// Ids of deleted blocks; never accepted again
    retired: HashSet<BlockId>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document, which must satisfy the tree invariants
    pub fn with_document(doc: Document) -> Result<Self, MutationError> {
        validate_document(&doc)?;
        Ok(Self {
            current: Arc::new(doc),
            ..Self::default()
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.current)
    }

    pub fn document(&self) -> &Document {
        &self.current
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn locate(&self, id: &BlockId) -> Option<Located<'_>> {
        locator::locate(&self.current, id)
    }

    /// Apply one command. Never fails: a rejected command is reported in
    /// `outcome` and leaves the snapshot as it was.
    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        if let Err(err) = self.check_retired(&mutation).and_then(|_| mutation.validate(&self.current)) {
            debug!(mutation = mutation.name(), error = %err, "mutation rejected");
            return self.result(Err(err));
        }

        let mut next = Document::clone(&self.current);
        if let Err(err) = mutation.apply_validated(&mut next) {
            debug!(mutation = mutation.name(), error = %err, "mutation rejected");
            return self.result(Err(err));
        }

        let removed = self.removed_ids(&mutation);
        self.retired.extend(removed);
        self.current = Arc::new(next);
        self.version += 1;
        debug!(mutation = mutation.name(), version = self.version, "mutation applied");
        self.result(Ok(()))
    }

    pub fn is_retired(&self, id: &BlockId) -> bool {
        self.retired.contains(id)
    }

    fn check_retired(&self, mutation: &Mutation) -> Result<(), MutationError> {
        match mutation {
            Mutation::InsertBlock { block, .. } => match block.subtree_ids().into_iter().find(|id| self.is_retired(id)) {
                Some(id) => Err(MutationError::DuplicateId(id.clone())),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// Ids a validated delete removes from the current snapshot
    fn removed_ids(&self, mutation: &Mutation) -> Vec<BlockId> {
        let removed = match mutation {
            Mutation::DeleteNode { node_id } => self.locate(node_id).map(|located| located.block),
            Mutation::DeleteChild { scope, node_id } => locator::sequence(&self.current, scope)
                .ok()
                .and_then(|children| children.iter().find(|b| b.id == *node_id)),
            _ => None,
        };
        removed
            .map(|block| block.subtree_ids().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    fn result(&self, outcome: Result<(), MutationError>) -> MutationResult {
        MutationResult {
            version: self.version,
            snapshot: self.snapshot(),
            outcome,
        }
    }

    fn insert(&mut self, scope: Containment, block: Block, index: Option<usize>) -> MutationResult {
        self.apply(Mutation::InsertBlock { scope, block, index })
    }

    fn update_child(&mut self, scope: Containment, id: impl Into<BlockId>, patch: Content) -> MutationResult {
        self.apply(Mutation::UpdateChild {
            scope,
            node_id: id.into(),
            patch,
        })
    }

    fn delete_child(&mut self, scope: Containment, id: impl Into<BlockId>) -> MutationResult {
        self.apply(Mutation::DeleteChild {
            scope,
            node_id: id.into(),
        })
    }

    fn move_within(&mut self, scope: Containment, from: usize, to: usize) -> MutationResult {
        self.apply(Mutation::MoveBlock { scope, from, to })
    }

    // Top level

    pub fn insert_top_level(&mut self, block: Block, index: Option<usize>) -> MutationResult {
        self.insert(Containment::TopLevel, block, index)
    }

    /// Merge `patch` into the node with `id` at any depth
    pub fn update_node(&mut self, id: impl Into<BlockId>, patch: Content) -> MutationResult {
        self.apply(Mutation::UpdateNode {
            node_id: id.into(),
            patch,
        })
    }

    /// Remove the node with `id` and its subtree from wherever it lives
    pub fn delete_node(&mut self, id: impl Into<BlockId>) -> MutationResult {
        self.apply(Mutation::DeleteNode { node_id: id.into() })
    }

    pub fn move_top_level(&mut self, from: usize, to: usize) -> MutationResult {
        self.move_within(Containment::TopLevel, from, to)
    }

    // Columns of a two-column block

    pub fn insert_into_column(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        block: Block,
        index: Option<usize>,
    ) -> MutationResult {
        self.insert(Containment::column(two_column_id, side), block, index)
    }

    pub fn delete_from_column(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        child_id: impl Into<BlockId>,
    ) -> MutationResult {
        self.delete_child(Containment::column(two_column_id, side), child_id)
    }

    pub fn update_in_column(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        child_id: impl Into<BlockId>,
        patch: Content,
    ) -> MutationResult {
        self.update_child(Containment::column(two_column_id, side), child_id, patch)
    }

    pub fn move_within_column(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        from: usize,
        to: usize,
    ) -> MutationResult {
        self.move_within(Containment::column(two_column_id, side), from, to)
    }

    // Cards, top-level or inside a column

    pub fn insert_into_card(&mut self, card_id: impl Into<BlockId>, block: Block, index: Option<usize>) -> MutationResult {
        self.insert(Containment::card(card_id), block, index)
    }

    pub fn delete_from_card(&mut self, card_id: impl Into<BlockId>, child_id: impl Into<BlockId>) -> MutationResult {
        self.delete_child(Containment::card(card_id), child_id)
    }

    pub fn update_in_card(
        &mut self,
        card_id: impl Into<BlockId>,
        child_id: impl Into<BlockId>,
        patch: Content,
    ) -> MutationResult {
        self.update_child(Containment::card(card_id), child_id, patch)
    }

    pub fn move_within_card(&mut self, card_id: impl Into<BlockId>, from: usize, to: usize) -> MutationResult {
        self.move_within(Containment::card(card_id), from, to)
    }

    // Cards inside a column of a two-column block

    pub fn insert_into_nested_card(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        card_id: impl Into<BlockId>,
        block: Block,
        index: Option<usize>,
    ) -> MutationResult {
        self.insert(Containment::nested_card(two_column_id, side, card_id), block, index)
    }

    pub fn delete_from_nested_card(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        card_id: impl Into<BlockId>,
        child_id: impl Into<BlockId>,
    ) -> MutationResult {
        self.delete_child(Containment::nested_card(two_column_id, side, card_id), child_id)
    }

    pub fn update_in_nested_card(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        card_id: impl Into<BlockId>,
        child_id: impl Into<BlockId>,
        patch: Content,
    ) -> MutationResult {
        self.update_child(Containment::nested_card(two_column_id, side, card_id), child_id, patch)
    }

    pub fn move_within_nested_card(
        &mut self,
        two_column_id: impl Into<BlockId>,
        side: ColumnSide,
        card_id: impl Into<BlockId>,
        from: usize,
        to: usize,
    ) -> MutationResult {
        self.move_within(Containment::nested_card(two_column_id, side, card_id), from, to)
    }

    // Selection and settings

    pub fn select(&mut self, id: Option<BlockId>) -> MutationResult {
        self.apply(Mutation::Select { node_id: id })
    }

    pub fn update_site_settings(&mut self, patch: SiteSettingsPatch) -> MutationResult {
        self.apply(Mutation::UpdateSiteSettings { patch })
    }
}
