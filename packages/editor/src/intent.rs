//! # Drag/Drop Intent Resolver
//!
//! Turns one finished drag gesture into at most one store command.
//!
//! Drop targets are typed: a drop zone is registered with its role and the
//! ids of the containers it belongs to, so nothing is decoded from id
//! strings at drop time.
//!
//! ```text
//! palette kind  + zone       → insert at end of the zone's sequence
//! palette kind  + block X    → insert at X's index, in X's sequence
//! existing A    + block B    → move within the shared sequence
//! existing A    + block A    → ignored
//! existing A    + block in another sequence, or a zone → ignored
//! ```

use crate::defaults::{ContentProvider, DefaultContent};
use crate::locator::{self, Containment};
use crate::mutations::{Mutation, MutationError};
use crate::nesting::{check_placement, Placement};
use pagebuilder_document::{Block, BlockId, BlockKind, ColumnSide, Document, IDGenerator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum DragSource {
    /// A new block of this kind, from the palette
    Palette { kind: BlockKind },

    /// A block already in the document. Its containment is looked up at
    /// drop time, not carried with the gesture.
    #[serde(rename_all = "camelCase")]
    Existing { block_id: BlockId },
}

impl DragSource {
    pub fn palette(kind: BlockKind) -> Self {
        DragSource::Palette { kind }
    }

    pub fn existing(id: impl Into<BlockId>) -> Self {
        DragSource::Existing { block_id: id.into() }
    }
}

/// Where the pointer was released
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "kebab-case")]
pub enum DropTarget {
    /// The empty area of the page
    Canvas,

    #[serde(rename_all = "camelCase")]
    Column { two_column_id: BlockId, side: ColumnSide },

    #[serde(rename_all = "camelCase")]
    Card { card_id: BlockId },

    #[serde(rename_all = "camelCase")]
    NestedCard {
        two_column_id: BlockId,
        side: ColumnSide,
        card_id: BlockId,
    },

    /// An existing block: "put it where this block is"
    #[serde(rename_all = "camelCase")]
    Block { block_id: BlockId },
}

impl DropTarget {
    pub fn block(id: impl Into<BlockId>) -> Self {
        DropTarget::Block { block_id: id.into() }
    }

    /// The sequence a drop zone stands for; `None` for a block target
    pub fn zone(&self) -> Option<Containment> {
        match self {
            DropTarget::Canvas => Some(Containment::TopLevel),
            DropTarget::Column { two_column_id, side } => Some(Containment::column(two_column_id.clone(), *side)),
            DropTarget::Card { card_id } => Some(Containment::card(card_id.clone())),
            DropTarget::NestedCard {
                two_column_id,
                side,
                card_id,
            } => Some(Containment::nested_card(two_column_id.clone(), *side, card_id.clone())),
            DropTarget::Block { .. } => None,
        }
    }
}

impl From<Containment> for DropTarget {
    fn from(scope: Containment) -> Self {
        match scope {
            Containment::TopLevel => DropTarget::Canvas,
            Containment::Column { two_column_id, side } => DropTarget::Column { two_column_id, side },
            Containment::Card { card_id } => DropTarget::Card { card_id },
            Containment::NestedCard {
                two_column_id,
                side,
                card_id,
            } => DropTarget::NestedCard {
                two_column_id,
                side,
                card_id,
            },
        }
    }
}

/// Why a gesture produced no command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    /// Dropped onto itself
    SameBlock,
    /// Existing block dropped into a different sequence
    CrossContainer,
    /// The target, or the container it belongs to, is gone
    UnresolvedTarget,
    /// The dragged block is gone
    UnresolvedSource,
    /// Existing block dropped on a drop zone rather than on a block
    ContainerZone,
    /// Released outside every target
    NoTarget,
    /// A drop arrived without a drag in progress
    NoGesture,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Exactly one command to apply
    Command(Mutation),
    /// Forbidden by the nesting rules; nothing reaches the store
    Rejected(MutationError),
    /// Nothing to do
    Ignored(IgnoreReason),
}

impl Resolution {
    pub fn command(&self) -> Option<&Mutation> {
        match self {
            Resolution::Command(mutation) => Some(mutation),
            _ => None,
        }
    }
}

/// Resolves gestures against a document. Owns the id generator so that
/// minted ids are never reused within a session.
pub struct IntentResolver {
    ids: IDGenerator,
    content: Box<dyn ContentProvider>,
}

impl IntentResolver {
    pub fn new(ids: IDGenerator) -> Self {
        Self::with_content_provider(ids, DefaultContent)
    }

    pub fn with_content_provider(ids: IDGenerator, provider: impl ContentProvider + 'static) -> Self {
        Self {
            ids,
            content: Box::new(provider),
        }
    }

    pub fn ids(&self) -> &IDGenerator {
        &self.ids
    }

    pub fn resolve(&mut self, doc: &Document, source: &DragSource, target: &DropTarget) -> Resolution {
        let resolution = match source {
            DragSource::Palette { kind } => self.resolve_new(doc, *kind, target),
            DragSource::Existing { block_id } => resolve_existing(doc, block_id, target),
        };
        debug!(?source, ?target, ?resolution, "drop resolved");
        resolution
    }

    fn resolve_new(&mut self, doc: &Document, kind: BlockKind, target: &DropTarget) -> Resolution {
        let (scope, index) = match target {
            DropTarget::Block { block_id } => match locator::locate(doc, block_id) {
                Some(located) => (located.context, Some(located.index)),
                None => return Resolution::Ignored(IgnoreReason::UnresolvedTarget),
            },
            zone => match zone.zone() {
                Some(scope) => (scope, None),
                None => return Resolution::Ignored(IgnoreReason::UnresolvedTarget),
            },
        };

        if let Err(err) = check_placement(kind, Placement::from(&scope)) {
            return Resolution::Rejected(err);
        }

        if locator::sequence(doc, &scope).is_err() {
            return Resolution::Ignored(IgnoreReason::UnresolvedTarget);
        }

        let block = Block::new(self.mint_id(doc), kind, self.content.default_content(kind));
        Resolution::Command(Mutation::InsertBlock { scope, block, index })
    }

    /// A fresh id that is also absent from `doc`, which may have been
    /// loaded with ids from an earlier session.
    fn mint_id(&mut self, doc: &Document) -> BlockId {
        loop {
            let id = self.ids.new_id();
            if !doc.contains(&id) {
                return id;
            }
        }
    }
}

fn resolve_existing(doc: &Document, source_id: &BlockId, target: &DropTarget) -> Resolution {
    let target_id = match target {
        DropTarget::Block { block_id } => block_id,
        _ => return Resolution::Ignored(IgnoreReason::ContainerZone),
    };

    if source_id == target_id {
        return Resolution::Ignored(IgnoreReason::SameBlock);
    }

    let Some(from) = locator::locate(doc, source_id) else {
        return Resolution::Ignored(IgnoreReason::UnresolvedSource);
    };
    let Some(to) = locator::locate(doc, target_id) else {
        return Resolution::Ignored(IgnoreReason::UnresolvedTarget);
    };

    if from.context != to.context {
        return Resolution::Ignored(IgnoreReason::CrossContainer);
    }

    Resolution::Command(Mutation::MoveBlock {
        scope: from.context,
        from: from.index,
        to: to.index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_document::Content;

    fn block(id: &str, kind: BlockKind) -> Block {
        Block::new(id, kind, Content::new())
    }

    /// a, b(two-column: left [c(card: d)], right [e]), g(card)
    fn sample() -> Document {
        let card = block("c", BlockKind::Card).with_card_child(block("d", BlockKind::Text));
        let columns = block("b", BlockKind::TwoColumn)
            .with_column_child(ColumnSide::Left, card)
            .with_column_child(ColumnSide::Right, block("e", BlockKind::Image));
        Document::with_blocks(vec![block("a", BlockKind::Header), columns, block("g", BlockKind::Card)])
    }

    fn resolver() -> IntentResolver {
        IntentResolver::new(IDGenerator::new("test"))
    }

    #[test]
    fn test_palette_to_canvas_appends() {
        let doc = sample();
        let resolution = resolver().resolve(&doc, &DragSource::palette(BlockKind::Divider), &DropTarget::Canvas);

        match resolution {
            Resolution::Command(Mutation::InsertBlock { scope, block, index }) => {
                assert_eq!(scope, Containment::TopLevel);
                assert_eq!(index, None);
                assert_eq!(block.kind, BlockKind::Divider);
                assert_eq!(block.content.text("style"), Some("line"));
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_palette_onto_block_inserts_at_its_index() {
        let doc = sample();
        let resolution = resolver().resolve(&doc, &DragSource::palette(BlockKind::Callout), &DropTarget::block("e"));

        match resolution {
            Resolution::Command(Mutation::InsertBlock { scope, index, .. }) => {
                assert_eq!(scope, Containment::column("b", ColumnSide::Right));
                assert_eq!(index, Some(0));
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_containers_cannot_enter_containers() {
        let doc = sample();
        let mut resolver = resolver();

        let column = DropTarget::from(Containment::column("b", ColumnSide::Left));
        let card = DropTarget::from(Containment::card("g"));
        let nested = DropTarget::from(Containment::nested_card("b", ColumnSide::Left, "c"));

        for target in [&column, &card, &nested] {
            let resolution = resolver.resolve(&doc, &DragSource::palette(BlockKind::TwoColumn), target);
            assert!(matches!(resolution, Resolution::Rejected(MutationError::IllegalNesting { .. })));
        }
        for target in [&card, &nested] {
            let resolution = resolver.resolve(&doc, &DragSource::palette(BlockKind::Card), target);
            assert!(matches!(resolution, Resolution::Rejected(MutationError::IllegalNesting { .. })));
        }

        // A card may go into a column
        let resolution = resolver.resolve(&doc, &DragSource::palette(BlockKind::Card), &column);
        assert!(resolution.command().is_some());
    }

    #[test]
    fn test_palette_onto_nested_block_respects_nesting() {
        let doc = sample();
        let resolution = resolver().resolve(&doc, &DragSource::palette(BlockKind::Card), &DropTarget::block("d"));
        assert_eq!(
            resolution,
            Resolution::Rejected(MutationError::IllegalNesting {
                kind: BlockKind::Card,
                placement: Placement::NestedCard,
            })
        );
    }

    #[test]
    fn test_deleted_container_is_ignored() {
        let doc = sample();
        let target = DropTarget::Card {
            card_id: BlockId::from("gone"),
        };
        let resolution = resolver().resolve(&doc, &DragSource::palette(BlockKind::Text), &target);
        assert_eq!(resolution, Resolution::Ignored(IgnoreReason::UnresolvedTarget));
    }

    #[test]
    fn test_minted_ids_avoid_existing_ones() {
        let mut ids = IDGenerator::new("test");
        let taken = ids.new_id();
        let doc = Document::with_blocks(vec![Block::new(taken.clone(), BlockKind::Text, Content::new())]);

        let resolution = resolver().resolve(&doc, &DragSource::palette(BlockKind::Text), &DropTarget::Canvas);
        match resolution {
            Resolution::Command(Mutation::InsertBlock { block, .. }) => assert_ne!(block.id, taken),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_reorder_within_same_sequence() {
        let doc = sample();
        let resolution = resolver().resolve(&doc, &DragSource::existing("g"), &DropTarget::block("a"));
        assert_eq!(
            resolution,
            Resolution::Command(Mutation::MoveBlock {
                scope: Containment::TopLevel,
                from: 2,
                to: 0,
            })
        );
    }

    #[test]
    fn test_existing_block_edge_cases() {
        let doc = sample();
        let mut resolver = resolver();

        assert_eq!(
            resolver.resolve(&doc, &DragSource::existing("a"), &DropTarget::block("a")),
            Resolution::Ignored(IgnoreReason::SameBlock)
        );
        assert_eq!(
            resolver.resolve(&doc, &DragSource::existing("e"), &DropTarget::block("c")),
            Resolution::Ignored(IgnoreReason::CrossContainer)
        );
        assert_eq!(
            resolver.resolve(&doc, &DragSource::existing("a"), &DropTarget::Canvas),
            Resolution::Ignored(IgnoreReason::ContainerZone)
        );
        assert_eq!(
            resolver.resolve(&doc, &DragSource::existing("gone"), &DropTarget::block("a")),
            Resolution::Ignored(IgnoreReason::UnresolvedSource)
        );
    }

    #[test]
    fn test_drop_target_serialization() {
        let target = DropTarget::from(Containment::nested_card("b", ColumnSide::Left, "c"));
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["target"], "nested-card");
        assert_eq!(json["cardId"], "c");
        assert_eq!(serde_json::from_value::<DropTarget>(json).unwrap(), target);
    }
}
