//! # Pagebuilder Document
//!
//! The in-memory document model edited by the page builder: an ordered
//! sequence of top-level blocks, two container kinds (`two-column` and
//! `card`) owning child sequences, a selection and site-level settings.
//!
//! Structural rules (what may be nested where) are enforced by the editor;
//! this crate only describes the shape.

pub mod ast;
pub mod error;
pub mod id_generator;

pub use ast::{Block, BlockId, BlockKind, ColumnSide, Columns, Content, Document, SiteSettings, SiteSettingsPatch};
pub use error::DocumentError;
pub use id_generator::{get_session_seed, IDGenerator};
