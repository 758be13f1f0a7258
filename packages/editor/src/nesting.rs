//! Structural rules: which block kinds may be placed in which sequence.
//!
//! | placement              | allowed kinds          |
//! |------------------------|------------------------|
//! | top level              | every kind             |
//! | column of a two-column | every kind but `two-column` |
//! | card (any)             | leaf kinds only        |

use crate::locator::Containment;
use crate::mutations::MutationError;
use pagebuilder_document::{Block, BlockKind, Document};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The role of a sequence, independent of which container owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    TopLevel,
    Column,
    Card,
    NestedCard,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Placement::TopLevel => "the top level",
            Placement::Column => "a column",
            Placement::Card => "a card",
            Placement::NestedCard => "a card inside a column",
        })
    }
}

impl From<&Containment> for Placement {
    fn from(scope: &Containment) -> Self {
        match scope {
            Containment::TopLevel => Placement::TopLevel,
            Containment::Column { .. } => Placement::Column,
            Containment::Card { .. } => Placement::Card,
            Containment::NestedCard { .. } => Placement::NestedCard,
        }
    }
}

pub fn is_allowed(kind: BlockKind, placement: Placement) -> bool {
    match placement {
        Placement::TopLevel => true,
        Placement::Column => kind != BlockKind::TwoColumn,
        Placement::Card | Placement::NestedCard => !kind.is_container(),
    }
}

pub fn check_placement(kind: BlockKind, placement: Placement) -> Result<(), MutationError> {
    if is_allowed(kind, placement) {
        Ok(())
    } else {
        Err(MutationError::IllegalNesting { kind, placement })
    }
}

/// Check `block` and everything it carries for a placement at `placement`.
pub fn check_subtree(block: &Block, placement: Placement) -> Result<(), MutationError> {
    check_placement(block.kind, placement)?;

    match block.kind {
        BlockKind::TwoColumn => {
            if !block.card_children.is_empty() {
                return Err(MutationError::InvalidStructure(format!(
                    "two-column block {} carries card children",
                    block.id
                )));
            }
            for (_, column) in block.children.iter() {
                for child in column {
                    check_subtree(child, Placement::Column)?;
                }
            }
        }
        BlockKind::Card => {
            if !block.children.is_empty() {
                return Err(MutationError::InvalidStructure(format!(
                    "card block {} carries column children",
                    block.id
                )));
            }
            let inner = if placement == Placement::Column {
                Placement::NestedCard
            } else {
                Placement::Card
            };
            for child in &block.card_children {
                check_subtree(child, inner)?;
            }
        }
        kind => {
            if block.has_children() {
                return Err(MutationError::InvalidStructure(format!(
                    "{} block {} cannot have children",
                    kind, block.id
                )));
            }
        }
    }

    Ok(())
}

/// Check a whole document: unique ids at every depth and legal nesting.
pub fn validate_document(doc: &Document) -> Result<(), MutationError> {
    let mut seen = HashSet::new();
    for id in doc.all_ids() {
        if !seen.insert(id) {
            return Err(MutationError::DuplicateId(id.clone()));
        }
    }

    for block in &doc.blocks {
        check_subtree(block, Placement::TopLevel)?;
    }

    Ok(())
}
