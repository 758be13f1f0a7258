use pagebuilder_document::{Block, BlockId, BlockKind, ColumnSide, Document};

/// Visitor pattern for traversing the document tree immutably
///
/// The default implementations walk the whole tree depth-first: top-level
/// blocks in sequence order, a `two-column` block's left column then its
/// right column, a card's children in order. Every renderer goes through
/// these walk functions so that all of them see blocks in the same order.
///
/// `depth` is 0 for top-level blocks and grows by one per container.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_block(&mut self, block: &Block, depth: usize) {
        walk_block(self, block, depth);
    }

    fn visit_column(&mut self, _parent: &Block, _side: ColumnSide, children: &[Block], depth: usize) {
        walk_sequence(self, children, depth);
    }

    fn visit_card_children(&mut self, _card: &Block, children: &[Block], depth: usize) {
        walk_sequence(self, children, depth);
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for block in &doc.blocks {
        visitor.visit_block(block, 0);
    }
}

/// Visit the children of `block`. Which child sequences are walked is
/// decided by the block's kind; stray children on a leaf are ignored.
pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block, depth: usize) {
    match block.kind {
        BlockKind::TwoColumn => {
            for (side, children) in block.children.iter() {
                visitor.visit_column(block, side, children, depth + 1);
            }
        }
        BlockKind::Card => {
            visitor.visit_card_children(block, &block.card_children, depth + 1);
        }
        _ => {}
    }
}

pub fn walk_sequence<V: Visitor>(visitor: &mut V, blocks: &[Block], depth: usize) {
    for block in blocks {
        visitor.visit_block(block, depth);
    }
}

/// Collects block ids in traversal order
#[derive(Debug, Default)]
pub struct TraversalOrder {
    pub ids: Vec<BlockId>,
}

impl Visitor for TraversalOrder {
    fn visit_block(&mut self, block: &Block, depth: usize) {
        self.ids.push(block.id.clone());
        walk_block(self, block, depth);
    }
}

/// Ids of every block a renderer will visit, in visiting order
pub fn traversal_order(doc: &Document) -> Vec<BlockId> {
    let mut order = TraversalOrder::default();
    order.visit_document(doc);
    order.ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_document::Content;

    fn block(id: &str, kind: BlockKind) -> Block {
        Block::new(id, kind, Content::new())
    }

    #[test]
    fn test_traversal_is_depth_first_left_then_right() {
        let card = block("c", BlockKind::Card)
            .with_card_child(block("c1", BlockKind::Text))
            .with_card_child(block("c2", BlockKind::Image));
        let columns = block("b", BlockKind::TwoColumn)
            .with_column_child(ColumnSide::Right, block("r1", BlockKind::Divider))
            .with_column_child(ColumnSide::Left, card)
            .with_column_child(ColumnSide::Left, block("l2", BlockKind::Heading));
        let doc = Document::with_blocks(vec![block("a", BlockKind::Header), columns, block("z", BlockKind::Callout)]);

        let ids: Vec<String> = traversal_order(&doc).iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "c1", "c2", "l2", "r1", "z"]);
    }

    #[test]
    fn test_depth_tracking() {
        struct Depths(Vec<(String, usize)>);

        impl Visitor for Depths {
            fn visit_block(&mut self, block: &Block, depth: usize) {
                self.0.push((block.id.to_string(), depth));
                walk_block(self, block, depth);
            }
        }

        let card = block("c", BlockKind::Card).with_card_child(block("d", BlockKind::Text));
        let doc = Document::with_blocks(vec![block("b", BlockKind::TwoColumn).with_column_child(ColumnSide::Left, card)]);

        let mut depths = Depths(Vec::new());
        depths.visit_document(&doc);
        assert_eq!(
            depths.0,
            vec![("b".to_string(), 0), ("c".to_string(), 1), ("d".to_string(), 2)]
        );
    }

    #[test]
    fn test_leaf_children_are_not_walked() {
        let mut text = block("t", BlockKind::Text);
        text.card_children.push(block("stray", BlockKind::Text));
        let doc = Document::with_blocks(vec![text]);

        assert_eq!(traversal_order(&doc), vec![BlockId::from("t")]);
    }
}
