use crate::config::{Config, PAGE_EXTENSION};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_common::{load_document, RealFileSystem};
use pagebuilder_compiler_html::{compile_to_html, CompileOptions};
use pagebuilder_editor::validate_document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page file or directory to export (defaults to the configured srcDir)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Add data-block-id attributes to every block
    #[arg(long)]
    pub annotate_ids: bool,

    /// Emit text blocks' html as markup instead of escaping it
    #[arg(long)]
    pub trust_html: bool,

    /// Fail on content fields of unexpected shape
    #[arg(long)]
    pub strict: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };

    if !src.exists() {
        return Err(anyhow!("Source path does not exist: {:?}", src));
    }

    let (root, pages) = if src.is_file() {
        let root = src.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![src.clone()])
    } else {
        (src.clone(), find_page_files(&src))
    };

    if pages.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    if !args.stdout {
        println!("{}", "🔨 Exporting pages...".bright_blue().bold());
        println!("Found {} pages", pages.len());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for page in &pages {
        let relative_path = page.strip_prefix(&root).unwrap_or(page);
        match export_file(page, relative_path, &args, &out_dir) {
            Ok(output) => {
                success_count += 1;
                if !args.stdout {
                    println!("  {} {} → {}", "✓".green(), relative_path.display(), output);
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    info!(exported = success_count, failed = error_count, "export finished");

    if args.stdout {
        return match error_count {
            0 => Ok(()),
            n => Err(anyhow!("{} pages failed to export", n)),
        };
    }

    println!();
    if error_count == 0 {
        println!("{} Exported {} pages successfully", "✅".green(), success_count);
        Ok(())
    } else {
        println!(
            "{} Exported {} pages, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} pages failed to export", error_count))
    }
}

/// Every `*.page.json` under `dir`, sorted for stable output
pub fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_page_file(path))
        .collect();
    files.sort();
    files
}

fn is_page_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.len() > PAGE_EXTENSION.len() && name.ends_with(PAGE_EXTENSION))
}

/// `blog/post.page.json` → `blog/post.html`
pub fn output_path(relative: &Path) -> PathBuf {
    let name = relative
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.strip_suffix(PAGE_EXTENSION).unwrap_or(name))
        .unwrap_or("index");
    relative.with_file_name(format!("{}.html", name))
}

fn export_file(page: &Path, relative: &Path, args: &ExportArgs, out_dir: &Path) -> Result<String> {
    let document = load_document(&RealFileSystem, page)?;
    validate_document(&document)?;

    let options = CompileOptions {
        annotate_ids: args.annotate_ids,
        trust_text_html: args.trust_html,
        strict: args.strict,
        ..Default::default()
    };
    let html = compile_to_html(&document, options)?;

    if args.stdout {
        println!("{}", html);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(output_path(relative));
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, html)?;

    Ok(output_file.display().to_string())
}
