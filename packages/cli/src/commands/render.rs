use super::{load_document, parse_device, parse_mode};
use crate::config::Config;
use anyhow::Result;
use blockcraft_registry::BlockRegistry;
use blockcraft_renderer::{RenderMode, RenderOptions, Renderer};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Input document (.json)
    pub input: PathBuf,

    /// Render mode (edit, save)
    #[arg(short, long, default_value = "save")]
    pub mode: String,

    /// Device to preview in edit mode (desktop, tablet, mobile)
    #[arg(short, long)]
    pub device: Option<String>,

    /// Output directory; prints to stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Page title for the written HTML document
    #[arg(long)]
    pub title: Option<String>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&args.input)?;
    let registry = BlockRegistry::with_core_blocks();

    let options = RenderOptions {
        mode: parse_mode(&args.mode)?,
        device: match &args.device {
            Some(device) => parse_device(device)?,
            None => config.editor.default_device,
        },
        class_prefix: config.class_prefix.clone(),
        breakpoints: config.breakpoints,
    };
    let page = Renderer::new(&registry, options.clone()).render(&document);

    for id in &page.missing {
        eprintln!("   {} Unsupported block: {}", "⚠".yellow(), id);
    }

    let Some(out_dir) = args.out else {
        println!("{}", page.html);
        if !page.css.is_empty() {
            println!();
            print!("{}", page.css);
        }
        return Ok(());
    };

    let stem = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "page".to_string());
    let title = args.title.unwrap_or_else(|| stem.clone());

    fs::create_dir_all(&out_dir)?;
    let html_path = out_dir.join(format!("{}.html", stem));
    let css_path = out_dir.join(format!("{}.css", stem));
    fs::write(&html_path, page.to_html_document(&title))?;
    fs::write(&css_path, &page.css)?;

    let mode = match options.mode {
        RenderMode::Edit => format!("edit, {}", options.device),
        RenderMode::Save => "save".to_string(),
    };
    println!("✨ {} {} ({})", "Rendered".green().bold(), args.input.display(), mode);
    println!("   {} {}", "✓".green(), html_path.display());
    println!("   {} {}", "✓".green(), css_path.display());

    Ok(())
}
