//! Error types for the editor

use pagebuilder_document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("No block is selected")]
    NoSelection,
}
