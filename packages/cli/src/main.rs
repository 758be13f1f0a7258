mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{export, init, inspect, ExportArgs, InitArgs, InspectArgs};
use tracing_subscriber::EnvFilter;

/// Pagebuilder CLI - build pages from blocks and export them as static HTML
#[derive(Parser, Debug)]
#[command(name = "pagebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor and export activity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagebuilder project with an example page
    Init(InitArgs),

    /// Export page files to static HTML
    Export(ExportArgs),

    /// Print the block outline of a page file
    Inspect(InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Export(args) => export(args, &cwd),
                Command::Inspect(args) => inspect(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
