pub mod apply;
pub mod blocks;
pub mod css;
pub mod render;
pub mod resolve;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use blocks::{blocks, BlocksArgs};
pub use css::{css, CssArgs};
pub use render::{render, RenderArgs};
pub use resolve::{resolve, ResolveArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{anyhow, Result};
use blockcraft_document::{Breakpoint, Document};
use blockcraft_renderer::RenderMode;
use std::path::Path;

fn load_document(path: &Path) -> Result<Document> {
    if !path.is_file() {
        return Err(anyhow!("Input file does not exist: {}", path.display()));
    }
    Document::load(path).map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))
}

fn parse_device(device: &str) -> Result<Breakpoint> {
    device.parse::<Breakpoint>().map_err(|e| anyhow!(e))
}

fn parse_mode(mode: &str) -> Result<RenderMode> {
    match mode {
        "edit" => Ok(RenderMode::Edit),
        "save" => Ok(RenderMode::Save),
        _ => Err(anyhow!("Invalid mode: {}. Use: edit or save", mode)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device() {
        assert_eq!(parse_device("Mobile").unwrap(), Breakpoint::Mobile);
        assert!(parse_device("watch").is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("edit").unwrap(), RenderMode::Edit);
        assert!(parse_mode("publish").is_err());
    }

    #[test]
    fn test_load_missing_document() {
        let err = load_document(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
