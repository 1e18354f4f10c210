use super::{load_document, parse_device};
use crate::config::Config;
use anyhow::{anyhow, Result};
use blockcraft_document::{BlockId, Breakpoint, Document};
use blockcraft_styles::{css_property_name, resolve_styles, to_inline_style};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Input document (.json)
    pub input: PathBuf,

    /// Block whose styles to resolve
    pub block_id: String,

    /// Device (desktop, tablet, mobile)
    #[arg(short, long)]
    pub device: Option<String>,

    /// Print a single inline `style` value instead of one property per line
    #[arg(long)]
    pub inline: bool,
}

pub fn resolve(args: ResolveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&args.input)?;
    let device = match &args.device {
        Some(device) => parse_device(device)?,
        None => config.editor.default_device,
    };

    let output = resolved_output(&document, &BlockId::from(args.block_id.as_str()), device, args.inline)?;
    if !args.inline {
        println!("{} {} @ {}", "Styles".green().bold(), args.block_id, device);
    }
    println!("{}", output);
    Ok(())
}

fn resolved_output(document: &Document, id: &BlockId, device: Breakpoint, inline: bool) -> Result<String> {
    let block = document
        .find(id)
        .ok_or_else(|| anyhow!("Block not found: {}", id))?;
    let resolved = resolve_styles(&block.styles, device);

    if inline {
        return Ok(to_inline_style(&resolved));
    }
    Ok(resolved
        .iter()
        .map(|(property, value)| format!("  {}: {}", css_property_name(property), value))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        serde_json::from_value(json!([{
            "id": "hero",
            "name": "core/group",
            "styles": {
                "fontSize": "48px",
                "color": "black",
                "responsive": {
                    "tablet": { "fontSize": "36px" },
                    "mobile": { "color": "" }
                }
            }
        }]))
        .unwrap()
    }

    #[test]
    fn test_mobile_falls_back_through_tablet() {
        let output = resolved_output(&doc(), &"hero".into(), Breakpoint::Mobile, false).unwrap();
        assert_eq!(output, "  color: black\n  font-size: 36px");
    }

    #[test]
    fn test_inline_output() {
        let output = resolved_output(&doc(), &"hero".into(), Breakpoint::Desktop, true).unwrap();
        assert_eq!(output, "color: black; font-size: 48px");
    }

    #[test]
    fn test_unknown_block() {
        assert!(resolved_output(&doc(), &"nope".into(), Breakpoint::Desktop, false).is_err());
    }
}
