use crate::config::Config;
use anyhow::{anyhow, Result};
use blockcraft_document::SequentialIdGenerator;
use blockcraft_editor::{EditOutcome, EditSession, FileStore, Mutation};
use blockcraft_registry::BlockRegistry;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Document to edit (.json), saved in place
    pub input: PathBuf,

    /// JSON array of mutations, applied as one edit
    pub mutations: PathBuf,

    /// Report the outcome without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mutations: Vec<Mutation> = serde_json::from_str(&std::fs::read_to_string(&args.mutations)?)
        .map_err(|e| anyhow!("Invalid mutations in {}: {}", args.mutations.display(), e))?;

    let (mut store, key) = store_for(&args.input)?;
    let mut session = EditSession::open(&store, &key, &config.editor)?
        .with_registry(Arc::new(BlockRegistry::with_core_blocks()))
        .with_id_generator(SequentialIdGenerator::new(&key));

    let count = mutations.len();
    let outcome = session.transaction(|tx| {
        for mutation in mutations {
            tx.apply(mutation)?;
        }
        Ok(())
    });

    match outcome {
        EditOutcome::Noop { reason } => {
            println!("   {} Nothing applied: {}", "✗".yellow(), reason);
            Ok(())
        }
        EditOutcome::Applied { .. } => {
            for issue in session.validate() {
                println!("   {} {}", "⚠".yellow(), issue);
            }
            if args.dry_run {
                println!("   {} {} mutations (dry run, not saved)", "✓".green(), count);
                return Ok(());
            }
            session.save(&mut store, &key)?;
            println!(
                "✨ {} {} mutations to {}",
                "Applied".green().bold(),
                count,
                args.input.display()
            );
            Ok(())
        }
    }
}

fn store_for(path: &Path) -> Result<(FileStore, String)> {
    let key = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Not a file: {}", path.display()))?;
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((FileStore::new(root), key))
}
