use anyhow::Result;
use blockcraft_registry::{BlockRegistry, BlockType};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// Filter by title, description or keyword
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by category ("all" for every category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Also list variations
    #[arg(long)]
    pub variations: bool,
}

/// List the block types the inserter would offer
pub fn blocks(args: BlocksArgs, _cwd: &str) -> Result<()> {
    let registry = BlockRegistry::with_core_blocks();
    let items = registry.inserter_items(args.search.as_deref(), args.category.as_deref());

    if items.is_empty() {
        println!("   {} No matching blocks", "✗".yellow());
        return Ok(());
    }

    println!("📦 {} ({})", "Blocks".green().bold(), items.len());
    println!("   Categories: {}", registry.categories().join(", "));
    println!();
    for line in format_items(&items, args.variations) {
        println!("{}", line);
    }
    Ok(())
}

fn format_items(items: &[&BlockType], with_variations: bool) -> Vec<String> {
    let width = items.iter().map(|b| b.name.len()).max().unwrap_or(0);
    let mut lines = Vec::new();

    for block_type in items {
        lines.push(format!(
            "   {:<width$}  {:<10}  {}",
            block_type.name,
            block_type.metadata.category,
            block_type.metadata.title,
            width = width
        ));
        if with_variations {
            for variation in &block_type.variations {
                let marker = if variation.is_default { " (default)" } else { "" };
                lines.push(format!(
                    "   {:<width$}    ↳ {}: {}{}",
                    "",
                    variation.name,
                    variation.title,
                    marker,
                    width = width
                ));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_aligns_columns() {
        let registry = BlockRegistry::with_core_blocks();
        let items = registry.inserter_items(Some("shop"), None);
        let lines = format_items(&items, false);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("   commerce/product-grid  commerce"));
    }

    #[test]
    fn test_format_lists_variations() {
        let registry = BlockRegistry::with_core_blocks();
        let items = registry.inserter_items(Some("columns"), Some("design"));
        let lines = format_items(&items, true);

        assert!(lines.iter().any(|l| l.contains("two-columns") && l.ends_with("(default)")));
        assert!(lines.iter().any(|l| l.contains("sidebar")));
    }
}
