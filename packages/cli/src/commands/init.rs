use crate::config::{Config, DEFAULT_CONFIG_NAME, PAGE_EXTENSION};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_common::{save_document, RealFileSystem};
use pagebuilder_document::{BlockId, BlockKind, ColumnSide, Document, SiteSettings, SiteSettingsPatch};
use pagebuilder_editor::{DragSource, DropTarget, EditSession, Mutation};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page directory
    #[arg(short, long, default_value = "pages")]
    pub src_dir: String,

    /// Site name for the example page
    #[arg(long)]
    pub site_name: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagebuilder project...".bright_blue().bold());

    let mut config = Config {
        src_dir: args.src_dir.clone(),
        ..Config::default()
    };
    if let Some(name) = args.site_name {
        config.site.site_name = name;
    }

    let src_dir = config.get_src_dir(cwd);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_name = format!("example{}", PAGE_EXTENSION);
    let example_file = src_dir.join(&example_name);
    if !example_file.exists() || args.force {
        let page = example_page(&config.site)?;
        save_document(&mut RealFileSystem, &example_file, &page)?;
        println!("  {} Created {}", "✓".green(), example_name);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/{}", args.src_dir, example_name);
    println!("  2. Run: pagebuilder export");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// A small page assembled the way the editor would: palette drops, then
/// property edits on the selection.
pub fn example_page(site: &SiteSettings) -> Result<Document> {
    let mut session = EditSession::new("init");

    let header = drop_new(&mut session, BlockKind::Header, DropTarget::Canvas)?;
    session.select(Some(header));
    session.edit_selected("author", &site.author)?;

    let columns = drop_new(&mut session, BlockKind::TwoColumn, DropTarget::Canvas)?;
    let card = drop_new(
        &mut session,
        BlockKind::Card,
        DropTarget::Column {
            two_column_id: columns.clone(),
            side: ColumnSide::Left,
        },
    )?;
    let text = drop_new(
        &mut session,
        BlockKind::Text,
        DropTarget::NestedCard {
            two_column_id: columns.clone(),
            side: ColumnSide::Left,
            card_id: card,
        },
    )?;
    drop_new(
        &mut session,
        BlockKind::Image,
        DropTarget::Column {
            two_column_id: columns,
            side: ColumnSide::Right,
        },
    )?;
    drop_new(&mut session, BlockKind::Callout, DropTarget::Canvas)?;

    session.select(Some(text));
    session.edit_selected("html", "<p>Edit this page in <strong>pages/</strong>, then export it.</p>")?;
    session.select(None);

    let settings = session.store_mut().update_site_settings(SiteSettingsPatch {
        site_name: Some(site.site_name.clone()),
        author: Some(site.author.clone()),
        base_url: Some(site.base_url.clone()),
    });
    if let Some(err) = settings.error() {
        return Err(anyhow!("{}", err));
    }

    Ok(session.document().clone())
}

/// Drop a new block of `kind` on `target`, returning its id
fn drop_new(session: &mut EditSession, kind: BlockKind, target: DropTarget) -> Result<BlockId> {
    session.begin_drag(DragSource::palette(kind));
    let outcome = session.end_drag(Some(target));

    match outcome.resolution.command() {
        Some(Mutation::InsertBlock { block, .. }) if outcome.is_applied() => Ok(block.id.clone()),
        _ => Err(anyhow!("could not place {} block: {:?}", kind, outcome.resolution)),
    }
}
