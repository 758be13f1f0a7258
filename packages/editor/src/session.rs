//! # Edit Session
//!
//! One editing session: a store, the resolver that turns drags into
//! commands, and the state of the drag in progress.
//!
//! A drag moves through `begin_drag → drag_over* → end_drag | cancel_drag`.
//! `end_drag` resolves and applies the command synchronously, then emits a
//! [`DragComplete`] event. Presentation code clears its highlight state in
//! response to that event; the document never waits on it.

use crate::intent::{DragSource, DropTarget, IgnoreReason, IntentResolver, Resolution};
use crate::locator::Located;
use crate::mutations::{Mutation, MutationResult};
use crate::properties::property_mutation;
use crate::store::{Snapshot, Store};
use crate::EditorError;
use pagebuilder_document::{BlockId, Document, IDGenerator};
use tracing::debug;

/// The drag in progress
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub source: DragSource,

    /// Last target the pointer passed over, for highlighting
    pub over: Option<DropTarget>,
}

/// Emitted once per finished or cancelled gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragComplete {
    pub source: DragSource,
    pub target: Option<DropTarget>,

    /// Whether the document changed
    pub applied: bool,
}

#[derive(Debug, Clone)]
pub struct DropOutcome {
    pub resolution: Resolution,

    /// Present when a command reached the store
    pub result: Option<MutationResult>,
}

impl DropOutcome {
    fn ignored(reason: IgnoreReason) -> Self {
        Self {
            resolution: Resolution::Ignored(reason),
            result: None,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.result.as_ref().is_some_and(MutationResult::is_applied)
    }
}

type DragListener = Box<dyn FnMut(&DragComplete)>;

pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    store: Store,
    resolver: IntentResolver,
    drag: Option<DragGesture>,
    listeners: Vec<DragListener>,
}

impl EditSession {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            resolver: IntentResolver::new(IDGenerator::new(&id)),
            store: Store::new(),
            drag: None,
            listeners: Vec::new(),
            id,
        }
    }

    /// Open an existing document. Fails if it breaks the tree invariants.
    pub fn with_document(id: impl Into<String>, doc: Document) -> Result<Self, EditorError> {
        let mut session = Self::new(id);
        session.store = Store::with_document(doc)?;
        Ok(session)
    }

    pub fn with_resolver(mut self, resolver: IntentResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        self.store.apply(mutation)
    }

    // Drag lifecycle

    pub fn begin_drag(&mut self, source: DragSource) {
        debug!(session = %self.id, ?source, "drag started");
        self.drag = Some(DragGesture { source, over: None });
    }

    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        if let Some(drag) = &mut self.drag {
            drag.over = target;
        }
    }

    pub fn drag(&self) -> Option<&DragGesture> {
        self.drag.as_ref()
    }

    pub fn end_drag(&mut self, target: Option<DropTarget>) -> DropOutcome {
        let Some(gesture) = self.drag.take() else {
            return DropOutcome::ignored(IgnoreReason::NoGesture);
        };

        let outcome = match &target {
            None => DropOutcome::ignored(IgnoreReason::NoTarget),
            Some(target) => {
                let resolution = self.resolver.resolve(self.store.document(), &gesture.source, target);
                let result = resolution.command().cloned().map(|command| self.store.apply(command));
                DropOutcome { resolution, result }
            }
        };

        self.emit(DragComplete {
            source: gesture.source,
            target,
            applied: outcome.is_applied(),
        });
        outcome
    }

    pub fn cancel_drag(&mut self) {
        if let Some(gesture) = self.drag.take() {
            self.emit(DragComplete {
                source: gesture.source,
                target: None,
                applied: false,
            });
        }
    }

    pub fn on_drag_complete(&mut self, listener: impl FnMut(&DragComplete) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: DragComplete) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    // Selection and properties

    pub fn select(&mut self, id: Option<BlockId>) -> MutationResult {
        self.store.select(id)
    }

    /// The selected block and where it lives, looked up in the current snapshot
    pub fn selected(&self) -> Option<Located<'_>> {
        let id = self.store.document().selected.as_ref()?;
        self.store.locate(id)
    }

    /// Set one field of the selected block
    pub fn edit_selected(&mut self, field: &str, value: &str) -> Result<MutationResult, EditorError> {
        let id = self.store.document().selected.clone().ok_or(EditorError::NoSelection)?;
        let mutation = property_mutation(self.store.document(), &id, field, value)?;
        Ok(self.store.apply(mutation))
    }

    pub fn delete_selected(&mut self) -> Result<MutationResult, EditorError> {
        let id = self.store.document().selected.clone().ok_or(EditorError::NoSelection)?;
        Ok(self.store.delete_node(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_document::{BlockKind, ColumnSide};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn drop_new(session: &mut EditSession, kind: BlockKind, target: DropTarget) -> DropOutcome {
        session.begin_drag(DragSource::palette(kind));
        session.drag_over(Some(target.clone()));
        session.end_drag(Some(target))
    }

    #[test]
    fn test_drop_applies_immediately() {
        let mut session = EditSession::new("test");
        let outcome = drop_new(&mut session, BlockKind::Header, DropTarget::Canvas);

        assert!(outcome.is_applied());
        assert_eq!(session.document().blocks.len(), 1);
        assert!(session.drag().is_none());
    }

    #[test]
    fn test_drag_complete_event() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = EditSession::new("test");
        let sink = Rc::clone(&events);
        session.on_drag_complete(move |event| sink.borrow_mut().push(event.clone()));

        drop_new(&mut session, BlockKind::TwoColumn, DropTarget::Canvas);
        let columns = session.document().blocks[0].id.clone();

        let target = DropTarget::Column {
            two_column_id: columns,
            side: ColumnSide::Left,
        };
        let outcome = drop_new(&mut session, BlockKind::TwoColumn, target);
        assert!(matches!(outcome.resolution, Resolution::Rejected(_)));
        assert!(outcome.result.is_none());

        session.begin_drag(DragSource::palette(BlockKind::Text));
        session.cancel_drag();

        let applied: Vec<bool> = events.borrow().iter().map(|e| e.applied).collect();
        assert_eq!(applied, vec![true, false, false]);
    }

    #[test]
    fn test_end_without_gesture_or_target() {
        let mut session = EditSession::new("test");
        let outcome = session.end_drag(Some(DropTarget::Canvas));
        assert_eq!(outcome.resolution, Resolution::Ignored(IgnoreReason::NoGesture));

        session.begin_drag(DragSource::palette(BlockKind::Text));
        let outcome = session.end_drag(None);
        assert_eq!(outcome.resolution, Resolution::Ignored(IgnoreReason::NoTarget));
        assert!(session.document().is_empty());
    }

    #[test]
    fn test_edit_selected_follows_location() {
        let mut session = EditSession::new("test");
        drop_new(&mut session, BlockKind::Card, DropTarget::Canvas);
        let card = session.document().blocks[0].id.clone();
        drop_new(&mut session, BlockKind::Heading, DropTarget::Card { card_id: card.clone() });
        let heading = session.document().blocks[0].card_children[0].id.clone();

        assert!(matches!(session.edit_selected("text", "x"), Err(EditorError::NoSelection)));

        session.select(Some(heading.clone()));
        let located = session.selected().unwrap();
        assert_eq!(located.block.id, heading);

        let result = session.edit_selected("level", "h4").unwrap();
        assert!(result.is_applied());
        assert_eq!(session.document().blocks[0].card_children[0].content.text("level"), Some("h4"));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = EditSession::new("test");
        drop_new(&mut session, BlockKind::Divider, DropTarget::Canvas);
        let id = session.document().blocks[0].id.clone();
        session.select(Some(id));

        assert!(session.delete_selected().unwrap().is_applied());
        assert!(session.document().selected.is_none());
        assert!(session.selected().is_none());
    }
}
