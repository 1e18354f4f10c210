use super::load_document;
use crate::config::Config;
use anyhow::Result;
use blockcraft_styles::generate_document_css;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CssArgs {
    /// Input document (.json)
    pub input: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Published stylesheet for a document
pub fn css(args: CssArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&args.input)?;
    let css = generate_document_css(&document, &config.class_prefix, &config.breakpoints).to_css();

    match args.out {
        Some(path) => std::fs::write(path, css)?,
        None => print!("{}", css),
    }
    Ok(())
}
