mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, blocks, css, render, resolve, validate, ApplyArgs, BlocksArgs, CssArgs, RenderArgs,
    ResolveArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Blockcraft CLI - render, inspect and edit block documents
#[derive(Parser, Debug)]
#[command(name = "blockcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a document to HTML and CSS
    Render(RenderArgs),

    /// Print the published stylesheet of a document
    Css(CssArgs),

    /// Show the effective styles of one block on a device
    Resolve(ResolveArgs),

    /// List registered block types
    Blocks(BlocksArgs),

    /// Check a document for structural and attribute problems
    Validate(ValidateArgs),

    /// Apply a batch of mutations to a document as one edit
    Apply(ApplyArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Render(args) => render(args, &cwd),
        Command::Css(args) => css(args, &cwd),
        Command::Resolve(args) => resolve(args, &cwd),
        Command::Blocks(args) => blocks(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
