use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_common::{load_document, traversal_order, RealFileSystem};
use pagebuilder_document::{BlockId, Document};
use pagebuilder_editor::{locate, validate_document, Containment, Located};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Page file to inspect
    pub file: String,

    /// Show where one block lives instead of the whole outline
    #[arg(long)]
    pub id: Option<String>,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.file);
    let document = load_document(&RealFileSystem, &path)?;

    if let Err(err) = validate_document(&document) {
        println!("{} {}", "⚠️  Invalid document:".yellow(), err);
    }

    match args.id {
        Some(id) => {
            let id = BlockId::from(id);
            let located = locate(&document, &id).ok_or_else(|| anyhow!("No block with id {:?}", id.as_str()))?;
            println!("{}", describe_location(&located));
        }
        None => {
            for line in outline(&document) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

/// One line per block in render order, indented by nesting depth
pub fn outline(document: &Document) -> Vec<String> {
    if document.is_empty() {
        return vec!["(empty page)".to_string()];
    }

    traversal_order(document)
        .iter()
        .filter_map(|id| locate(document, id))
        .map(|located| {
            let indent = "  ".repeat(depth(&located.context));
            let selected = if document.selected.as_ref() == Some(&located.block.id) {
                " *"
            } else {
                ""
            };
            format!(
                "{}{} {} [{}]{}",
                indent,
                located.block.kind.to_string().bold(),
                located.block.id,
                describe_context(&located.context),
                selected
            )
        })
        .collect()
}

fn depth(context: &Containment) -> usize {
    match context {
        Containment::TopLevel => 0,
        Containment::Column { .. } | Containment::Card { .. } => 1,
        Containment::NestedCard { .. } => 2,
    }
}

pub fn describe_context(context: &Containment) -> String {
    match context {
        Containment::TopLevel => "top-level".to_string(),
        Containment::Column { two_column_id, side } => format!("{} column of {}", side, two_column_id),
        Containment::Card { card_id } => format!("card {}", card_id),
        Containment::NestedCard {
            two_column_id,
            side,
            card_id,
        } => format!("card {} in {} column of {}", card_id, side, two_column_id),
    }
}

fn describe_location(located: &Located<'_>) -> String {
    format!(
        "{} {}: position {} in {}",
        located.block.kind,
        located.block.id,
        located.index,
        describe_context(&located.context)
    )
}
