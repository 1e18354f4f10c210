use blockcraft_editor::EditorConfig;
use blockcraft_styles::BreakpointConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "blockcraft.config.json";

/// Blockcraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Prefix of per-block CSS classes (`<prefix>-<id>`)
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,

    /// Media query widths
    #[serde(default)]
    pub breakpoints: BreakpointConfig,

    /// History limit, default device, zoom
    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_class_prefix() -> String {
    "bc".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config_path.display(), e))?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class_prefix: default_class_prefix(),
            breakpoints: BreakpointConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_document::Breakpoint;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "classPrefix": "shop",
            "historyLimit": 50,
            "defaultDevice": "mobile",
            "zoom": { "min": 0.5, "max": 3.0, "step": 0.5 },
            "breakpoints": { "tabletMaxWidth": 900 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.class_prefix, "shop");
        assert_eq!(config.editor.history_limit, 50);
        assert_eq!(config.editor.default_device, Breakpoint::Mobile);
        assert_eq!(config.editor.zoom.step, 0.5);
        assert_eq!(config.breakpoints.tablet_max_width, 900);
        assert_eq!(config.breakpoints.mobile_max_width, 767);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.class_prefix, "bc");
        assert_eq!(config.editor.history_limit, 100);
        assert_eq!(config.editor.default_device, Breakpoint::Desktop);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();
        let err = Config::load(&dir.path().display().to_string()).unwrap_err();
        assert!(err.to_string().contains("Invalid"));
    }
}
