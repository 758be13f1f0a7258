//! # Node Locator
//!
//! Resolves a block id to the block and its containment context, and
//! resolves a containment context to the child sequence it names. Every
//! consumer that needs to know "where does this id live" goes through here.
//!
//! Search order for [`locate`]:
//!
//! 1. the top-level sequence
//! 2. each top-level `two-column`: left column, the children of cards in the
//!    left column, right column, the children of cards in the right column
//! 3. the children of each top-level `card`
//!
//! The first match wins.

use crate::mutations::MutationError;
use pagebuilder_document::{Block, BlockId, BlockKind, ColumnSide, Columns, Document};
use serde::{Deserialize, Serialize};

/// Where a block lives in the tree. Doubles as the scope of a store command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "kebab-case")]
pub enum Containment {
    /// The document's top-level sequence
    TopLevel,

    /// One column of a `two-column` block
    #[serde(rename_all = "camelCase")]
    Column { two_column_id: BlockId, side: ColumnSide },

    /// A card's children. As a command scope the card may be top-level or
    /// inside a column; as a locator result it is always top-level.
    #[serde(rename_all = "camelCase")]
    Card { card_id: BlockId },

    /// The children of a card that sits in a column of a `two-column` block
    #[serde(rename_all = "camelCase")]
    NestedCard {
        two_column_id: BlockId,
        side: ColumnSide,
        card_id: BlockId,
    },
}

impl Containment {
    pub fn column(two_column_id: impl Into<BlockId>, side: ColumnSide) -> Self {
        Containment::Column {
            two_column_id: two_column_id.into(),
            side,
        }
    }

    pub fn card(card_id: impl Into<BlockId>) -> Self {
        Containment::Card { card_id: card_id.into() }
    }

    pub fn nested_card(two_column_id: impl Into<BlockId>, side: ColumnSide, card_id: impl Into<BlockId>) -> Self {
        Containment::NestedCard {
            two_column_id: two_column_id.into(),
            side,
            card_id: card_id.into(),
        }
    }

    /// The block that directly owns the sequence, if any
    pub fn parent_id(&self) -> Option<&BlockId> {
        match self {
            Containment::TopLevel => None,
            Containment::Column { two_column_id, .. } => Some(two_column_id),
            Containment::Card { card_id } | Containment::NestedCard { card_id, .. } => Some(card_id),
        }
    }
}

/// A located block together with its context and position in its sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<'a> {
    pub block: &'a Block,
    pub context: Containment,
    pub index: usize,
}

pub fn index_of(blocks: &[Block], id: &BlockId) -> Option<usize> {
    blocks.iter().position(|b| b.id == *id)
}

/// Find `id` anywhere in the tree.
pub fn locate<'a>(doc: &'a Document, id: &BlockId) -> Option<Located<'a>> {
    if let Some(index) = index_of(&doc.blocks, id) {
        return Some(Located {
            block: &doc.blocks[index],
            context: Containment::TopLevel,
            index,
        });
    }

    for parent in doc.blocks.iter().filter(|b| b.kind == BlockKind::TwoColumn) {
        for (side, column) in parent.children.iter() {
            if let Some(index) = index_of(column, id) {
                return Some(Located {
                    block: &column[index],
                    context: Containment::column(parent.id.clone(), side),
                    index,
                });
            }

            for card in column.iter().filter(|b| b.kind == BlockKind::Card) {
                if let Some(index) = index_of(&card.card_children, id) {
                    return Some(Located {
                        block: &card.card_children[index],
                        context: Containment::nested_card(parent.id.clone(), side, card.id.clone()),
                        index,
                    });
                }
            }
        }
    }

    for card in doc.blocks.iter().filter(|b| b.kind == BlockKind::Card) {
        if let Some(index) = index_of(&card.card_children, id) {
            return Some(Located {
                block: &card.card_children[index],
                context: Containment::card(card.id.clone()),
                index,
            });
        }
    }

    None
}

pub fn locate_mut<'a>(doc: &'a mut Document, id: &BlockId) -> Option<&'a mut Block> {
    let (context, index) = {
        let located = locate(doc, id)?;
        (located.context, located.index)
    };
    sequence_mut(doc, &context).ok()?.get_mut(index)
}

/// The child sequence named by `scope`.
///
/// Fails with `NodeNotFound` naming the container that does not resolve
/// (missing, or present with the wrong kind).
pub fn sequence<'a>(doc: &'a Document, scope: &Containment) -> Result<&'a Vec<Block>, MutationError> {
    match scope {
        Containment::TopLevel => Ok(&doc.blocks),

        Containment::Column { two_column_id, side } => {
            let parent = find_two_column(doc, two_column_id)?;
            Ok(parent.children.side(*side))
        }

        Containment::Card { card_id } => {
            let card = find_card(doc, card_id).ok_or_else(|| MutationError::NodeNotFound(card_id.clone()))?;
            Ok(&card.card_children)
        }

        Containment::NestedCard {
            two_column_id,
            side,
            card_id,
        } => {
            let parent = find_two_column(doc, two_column_id)?;
            let card = parent
                .children
                .side(*side)
                .iter()
                .find(|b| b.id == *card_id && b.kind == BlockKind::Card)
                .ok_or_else(|| MutationError::NodeNotFound(card_id.clone()))?;
            Ok(&card.card_children)
        }
    }
}

pub fn sequence_mut<'a>(doc: &'a mut Document, scope: &Containment) -> Result<&'a mut Vec<Block>, MutationError> {
    match scope {
        Containment::TopLevel => Ok(&mut doc.blocks),

        Containment::Column { two_column_id, side } => {
            let parent = find_two_column_mut(doc, two_column_id)?;
            Ok(parent.children.side_mut(*side))
        }

        Containment::Card { card_id } => {
            let card = find_card_mut(doc, card_id).ok_or_else(|| MutationError::NodeNotFound(card_id.clone()))?;
            Ok(&mut card.card_children)
        }

        Containment::NestedCard {
            two_column_id,
            side,
            card_id,
        } => {
            let parent = find_two_column_mut(doc, two_column_id)?;
            let card = parent
                .children
                .side_mut(*side)
                .iter_mut()
                .find(|b| b.id == *card_id && b.kind == BlockKind::Card)
                .ok_or_else(|| MutationError::NodeNotFound(card_id.clone()))?;
            Ok(&mut card.card_children)
        }
    }
}

fn find_two_column<'a>(doc: &'a Document, id: &BlockId) -> Result<&'a Block, MutationError> {
    doc.blocks
        .iter()
        .find(|b| b.id == *id && b.kind == BlockKind::TwoColumn)
        .ok_or_else(|| MutationError::NodeNotFound(id.clone()))
}

fn find_two_column_mut<'a>(doc: &'a mut Document, id: &BlockId) -> Result<&'a mut Block, MutationError> {
    doc.blocks
        .iter_mut()
        .find(|b| b.id == *id && b.kind == BlockKind::TwoColumn)
        .ok_or_else(|| MutationError::NodeNotFound(id.clone()))
}

/// A card at the top level or inside any column.
fn find_card<'a>(doc: &'a Document, id: &BlockId) -> Option<&'a Block> {
    let is_card = |b: &&Block| b.id == *id && b.kind == BlockKind::Card;

    if let Some(card) = doc.blocks.iter().find(is_card) {
        return Some(card);
    }

    doc.blocks
        .iter()
        .filter(|b| b.kind == BlockKind::TwoColumn)
        .flat_map(|parent| parent.children.left.iter().chain(parent.children.right.iter()))
        .find(is_card)
}

fn find_card_mut<'a>(doc: &'a mut Document, id: &BlockId) -> Option<&'a mut Block> {
    let is_card = |b: &&mut Block| b.id == *id && b.kind == BlockKind::Card;

    if let Some(index) = doc.blocks.iter().position(|b| b.id == *id && b.kind == BlockKind::Card) {
        return doc.blocks.get_mut(index);
    }

    doc.blocks
        .iter_mut()
        .filter(|b| b.kind == BlockKind::TwoColumn)
        .flat_map(|parent| {
            let Columns { left, right } = &mut parent.children;
            left.iter_mut().chain(right.iter_mut())
        })
        .find(is_card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_document::Content;

    fn block(id: &str, kind: BlockKind) -> Block {
        Block::new(id, kind, Content::new())
    }

    /// a, b(two-column: left [c(card: d), e], right [f]), g(card: h)
    fn sample() -> Document {
        let nested = block("c", BlockKind::Card).with_card_child(block("d", BlockKind::Text));
        let columns = block("b", BlockKind::TwoColumn)
            .with_column_child(ColumnSide::Left, nested)
            .with_column_child(ColumnSide::Left, block("e", BlockKind::Image))
            .with_column_child(ColumnSide::Right, block("f", BlockKind::Divider));
        let card = block("g", BlockKind::Card).with_card_child(block("h", BlockKind::Callout));
        Document::with_blocks(vec![block("a", BlockKind::Header), columns, card])
    }

    fn context_of(doc: &Document, id: &str) -> Option<(Containment, usize)> {
        locate(doc, &BlockId::from(id)).map(|l| (l.context, l.index))
    }

    #[test]
    fn test_locate_every_shape() {
        let doc = sample();

        assert_eq!(context_of(&doc, "a"), Some((Containment::TopLevel, 0)));
        assert_eq!(context_of(&doc, "g"), Some((Containment::TopLevel, 2)));
        assert_eq!(context_of(&doc, "e"), Some((Containment::column("b", ColumnSide::Left), 1)));
        assert_eq!(context_of(&doc, "f"), Some((Containment::column("b", ColumnSide::Right), 0)));
        assert_eq!(
            context_of(&doc, "d"),
            Some((Containment::nested_card("b", ColumnSide::Left, "c"), 0))
        );
        assert_eq!(context_of(&doc, "h"), Some((Containment::card("g"), 0)));
        assert_eq!(context_of(&doc, "missing"), None);
    }

    #[test]
    fn test_located_block_is_the_node() {
        let doc = sample();
        let located = locate(&doc, &BlockId::from("h")).unwrap();
        assert_eq!(located.block.kind, BlockKind::Callout);
    }

    #[test]
    fn test_sequence_resolution() {
        let doc = sample();

        assert_eq!(sequence(&doc, &Containment::TopLevel).unwrap().len(), 3);
        assert_eq!(sequence(&doc, &Containment::column("b", ColumnSide::Left)).unwrap().len(), 2);
        assert_eq!(sequence(&doc, &Containment::nested_card("b", ColumnSide::Left, "c")).unwrap().len(), 1);
        assert_eq!(sequence(&doc, &Containment::card("g")).unwrap().len(), 1);

        // A card scope also reaches a card that lives in a column
        assert_eq!(sequence(&doc, &Containment::card("c")).unwrap()[0].id, "d");
    }

    #[test]
    fn test_sequence_rejects_wrong_kind_or_side() {
        let doc = sample();

        assert_eq!(
            sequence(&doc, &Containment::column("a", ColumnSide::Left)),
            Err(MutationError::NodeNotFound(BlockId::from("a")))
        );
        assert_eq!(
            sequence(&doc, &Containment::card("e")),
            Err(MutationError::NodeNotFound(BlockId::from("e")))
        );
        assert_eq!(
            sequence(&doc, &Containment::nested_card("b", ColumnSide::Right, "c")),
            Err(MutationError::NodeNotFound(BlockId::from("c")))
        );
    }

    #[test]
    fn test_locate_mut_reaches_nested_children() {
        let mut doc = sample();
        let node = locate_mut(&mut doc, &BlockId::from("d")).unwrap();
        node.content.set("html", "<p>changed</p>");

        let located = locate(&doc, &BlockId::from("d")).unwrap();
        assert_eq!(located.block.content.text("html"), Some("<p>changed</p>"));
    }

    #[test]
    fn test_parent_id() {
        assert_eq!(Containment::TopLevel.parent_id(), None);
        assert_eq!(
            Containment::nested_card("b", ColumnSide::Left, "c").parent_id(),
            Some(&BlockId::from("c"))
        );
    }
}
