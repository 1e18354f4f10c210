use super::load_document;
use anyhow::Result;
use blockcraft_document::Document;
use blockcraft_registry::BlockRegistry;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input document (.json)
    pub input: PathBuf,
}

pub fn validate(args: ValidateArgs, _cwd: &str) -> Result<()> {
    println!("🔍 {} {}", "Validating".green().bold(), args.input.display());

    let document = load_document(&args.input)?;
    let registry = BlockRegistry::with_core_blocks();
    let problems = collect_problems(&document, &registry);

    if problems.is_empty() {
        println!("   {} {} blocks, no issues found!", "✓".green(), document.len());
        return Ok(());
    }

    for problem in &problems {
        println!("   {} {}", "✗".red(), problem);
    }
    println!();
    println!("   {} {}", "Errors:".red(), problems.len());

    // Exit with error code if there are errors
    std::process::exit(1);
}

/// Structural issues plus attribute schema mismatches
fn collect_problems(document: &Document, registry: &BlockRegistry) -> Vec<String> {
    let mut problems: Vec<String> = document
        .validate_with(|name| registry.contains(name))
        .into_iter()
        .map(|issue| issue.to_string())
        .collect();

    for block in document.walk() {
        if !registry.contains(&block.name) {
            continue;
        }
        if let Err(err) = registry.validate_attributes(block) {
            problems.push(format!("[{}] {}", block.id, err));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_document() {
        let doc: Document = serde_json::from_value(json!([
            { "id": "a", "name": "core/heading", "attributes": { "text": "Hi", "level": 3 } }
        ]))
        .unwrap();
        assert!(collect_problems(&doc, &BlockRegistry::with_core_blocks()).is_empty());
    }

    #[test]
    fn test_reports_every_problem() {
        let doc: Document = serde_json::from_value(json!([
            { "id": "a", "name": "core/heading", "attributes": { "level": "big" } },
            { "id": "a", "name": "legacy/slider" }
        ]))
        .unwrap();

        let problems = collect_problems(&doc, &BlockRegistry::with_core_blocks());
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("level")));
        assert!(problems.iter().any(|p| p.contains("legacy/slider")));
    }
}
