//! Longer command sequences and generated ones
//!
//! This tests:
//! - Id uniqueness for any sequence of inserts at any depth
//! - Nesting legality for any container drop into a container
//! - Reordering at the same index being the identity
//! - Document integrity after mixed edits

use pagebuilder_document::{Block, BlockId, BlockKind, ColumnSide, Content, Document, IDGenerator};
use pagebuilder_editor::{
    default_content, validate_document, Containment, DragSource, DropTarget, EditSession, IntentResolver, Mutation,
    MutationError, Store,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn any_kind() -> impl Strategy<Value = BlockKind> {
    prop::sample::select(BlockKind::ALL.to_vec())
}

fn any_side() -> impl Strategy<Value = ColumnSide> {
    prop::sample::select(ColumnSide::BOTH.to_vec())
}

/// One generated step: which kind to drop, and which existing block (by
/// position in traversal order) to aim at, or the zone of a container.
#[derive(Debug, Clone)]
enum Step {
    Canvas(BlockKind),
    OntoBlock(BlockKind, usize),
    IntoZone(BlockKind, usize, ColumnSide),
    Delete(usize),
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any_kind().prop_map(Step::Canvas),
        (any_kind(), 0usize..64).prop_map(|(k, i)| Step::OntoBlock(k, i)),
        (any_kind(), 0usize..64, any_side()).prop_map(|(k, i, s)| Step::IntoZone(k, i, s)),
        (0usize..64).prop_map(Step::Delete),
    ]
}

fn pick(doc: &Document, index: usize) -> Option<BlockId> {
    let all = doc.all_ids();
    if all.is_empty() {
        None
    } else {
        Some(all[index % all.len()].clone())
    }
}

/// The drop zone belonging to a container, if `id` is one
fn zone_of(doc: &Document, id: &BlockId, side: ColumnSide) -> Option<DropTarget> {
    let located = pagebuilder_editor::locate(doc, id)?;
    let scope = match (located.block.kind, &located.context) {
        (BlockKind::TwoColumn, _) => Containment::column(id.clone(), side),
        (BlockKind::Card, Containment::Column { two_column_id, side }) => {
            Containment::nested_card(two_column_id.clone(), *side, id.clone())
        }
        (BlockKind::Card, _) => Containment::card(id.clone()),
        _ => return None,
    };
    Some(DropTarget::from(scope))
}

fn run(steps: &[Step]) -> EditSession {
    let mut session = EditSession::new("generated");
    for step in steps {
        let doc = session.snapshot();
        let (kind, target) = match step {
            Step::Canvas(kind) => (*kind, Some(DropTarget::Canvas)),
            Step::OntoBlock(kind, i) => (*kind, pick(&doc, *i).map(DropTarget::block)),
            Step::IntoZone(kind, i, side) => (*kind, pick(&doc, *i).and_then(|id| zone_of(&doc, &id, *side))),
            Step::Delete(i) => {
                if let Some(id) = pick(&doc, *i) {
                    session.store_mut().delete_node(id);
                }
                continue;
            }
        };
        session.begin_drag(DragSource::palette(kind));
        session.end_drag(target);
    }
    session
}

proptest! {
    #[test]
    fn ids_stay_unique_and_tree_stays_legal(steps in prop::collection::vec(any_step(), 0..40)) {
        let session = run(&steps);
        let doc = session.document();

        let all = doc.all_ids();
        let unique: HashSet<_> = all.iter().collect();
        prop_assert_eq!(unique.len(), all.len());
        prop_assert_eq!(validate_document(doc), Ok(()));
    }

    #[test]
    fn container_drops_into_containers_change_nothing(
        steps in prop::collection::vec(any_step(), 0..20),
        container in prop::sample::select(vec![BlockKind::TwoColumn, BlockKind::Card]),
        index in 0usize..64,
        side in any_side(),
    ) {
        let mut session = run(&steps);
        let doc = session.snapshot();
        let Some(target) = pick(&doc, index).and_then(|id| zone_of(&doc, &id, side)) else {
            return Ok(());
        };
        let forbidden = !matches!((&target, container), (DropTarget::Column { .. }, BlockKind::Card));

        session.begin_drag(DragSource::palette(container));
        session.end_drag(Some(target));

        if forbidden {
            prop_assert!(Arc::ptr_eq(&doc, &session.snapshot()));
        }
    }

    #[test]
    fn move_to_same_index_is_identity(count in 1usize..12, pick_index in 0usize..12) {
        let mut store = Store::new();
        for i in 0..count {
            store.insert_top_level(Block::new(format!("n{i}"), BlockKind::Text, Content::new()), None);
        }
        let before = store.snapshot();
        let i = pick_index % count;

        prop_assert!(store.move_top_level(i, i).is_applied());
        prop_assert_eq!(&store.document().blocks, &before.blocks);
    }
}

#[test]
fn test_resolver_never_reuses_ids_after_delete() {
    let mut session = EditSession::new("reuse");
    let mut seen = HashSet::new();

    for _ in 0..5 {
        session.begin_drag(DragSource::palette(BlockKind::Text));
        session.end_drag(Some(DropTarget::Canvas));
        let id = session.document().blocks[0].id.clone();
        assert!(seen.insert(id.clone()), "id {id} handed out twice");
        session.store_mut().delete_node(id);
    }
}

#[test]
fn test_store_rejects_reinsert_of_deleted_id() {
    let mut store = Store::new();
    let header = || Block::new("a", BlockKind::Header, default_content(BlockKind::Header));

    assert!(store.insert_top_level(header(), None).is_applied());
    assert!(store.delete_node("a").is_applied());

    let result = store.insert_top_level(header(), None);
    assert_eq!(result.error(), Some(&MutationError::DuplicateId(BlockId::from("a"))));
    assert!(store.document().is_empty());
}

#[test]
fn test_mixed_edit_sequence() {
    let mut store = Store::new();
    let mut resolver = IntentResolver::new(IDGenerator::new("mixed"));

    let steps = [
        (DragSource::palette(BlockKind::Header), DropTarget::Canvas),
        (DragSource::palette(BlockKind::TwoColumn), DropTarget::Canvas),
        (DragSource::palette(BlockKind::Divider), DropTarget::Canvas),
    ];
    for (source, target) in &steps {
        let resolution = resolver.resolve(store.document(), source, target);
        let command = resolution.command().cloned().unwrap();
        assert!(store.apply(command).is_applied());
    }

    let columns = store.document().blocks[1].id.clone();
    let divider = store.document().blocks[2].id.clone();

    // Drag the divider above the header
    let header = store.document().blocks[0].id.clone();
    let command = resolver
        .resolve(store.document(), &DragSource::existing(divider.clone()), &DropTarget::block(header))
        .command()
        .cloned()
        .unwrap();
    assert_eq!(
        command,
        Mutation::MoveBlock {
            scope: Containment::TopLevel,
            from: 2,
            to: 0,
        }
    );
    store.apply(command);
    assert_eq!(store.document().blocks[0].id, divider);

    // Fill the right column, then delete the whole layout
    for kind in [BlockKind::Image, BlockKind::Callout] {
        let target = DropTarget::Column {
            two_column_id: columns.clone(),
            side: ColumnSide::Right,
        };
        let command = resolver
            .resolve(store.document(), &DragSource::palette(kind), &target)
            .command()
            .cloned()
            .unwrap();
        store.apply(command);
    }
    assert_eq!(store.document().block_count(), 5);

    store.delete_node(columns);
    assert_eq!(store.document().block_count(), 2);
    assert_eq!(validate_document(store.document()), Ok(()));
}
