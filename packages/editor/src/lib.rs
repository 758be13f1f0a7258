//! # Pagebuilder Editor
//!
//! The document tree store and everything that issues commands to it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ drag gesture / property edit / delete click │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: drag lifecycle, selection          │
//! │  - intent: gesture → one command            │
//! │  - properties: field edit → scoped update   │
//! │  - locator: id → block + containment        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: validate → new snapshot              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//!        preview / static export (read only)
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are immutable**: every applied command produces a new one
//! 2. **Commands are total**: a command that cannot apply is reported, and
//!    the snapshot stays as it was
//! 3. **One locator**: every "where does this id live" question goes
//!    through [`locate`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagebuilder_editor::{EditSession, DragSource, DropTarget};
//! use pagebuilder_document::BlockKind;
//!
//! let mut session = EditSession::new("draft");
//!
//! session.begin_drag(DragSource::palette(BlockKind::Header));
//! let outcome = session.end_drag(Some(DropTarget::Canvas));
//! assert!(outcome.is_applied());
//!
//! let id = session.document().blocks[0].id.clone();
//! session.select(Some(id));
//! session.edit_selected("title", "Hello")?;
//! ```

mod defaults;
mod errors;
mod intent;
mod locator;
mod mutations;
mod nesting;
mod properties;
mod session;
mod store;

pub use defaults::{default_content, ContentProvider, DefaultContent};
pub use errors::EditorError;
pub use intent::{DragSource, DropTarget, IgnoreReason, IntentResolver, Resolution};
pub use locator::{index_of, locate, locate_mut, sequence, sequence_mut, Containment, Located};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use nesting::{check_placement, check_subtree, is_allowed, validate_document, Placement};
pub use properties::{
    check_field, field_spec, fields_for, property_mutation, scoped_update, FieldKind, FieldSpec, CALLOUT_COLORS,
    CALLOUT_ICONS, COLUMN_GAPS, DIVIDER_STYLES, HEADING_LEVELS,
};
pub use session::{DragComplete, DragGesture, DropOutcome, EditSession};
pub use store::{Snapshot, Store};
