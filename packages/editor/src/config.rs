use blockcraft_document::Breakpoint;
use serde::{Deserialize, Serialize};

/// Editor settings, read from the top level of `blockcraft.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum undo levels (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub default_device: Breakpoint,

    #[serde(default)]
    pub zoom: ZoomConfig,
}

fn default_history_limit() -> usize {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_device: Breakpoint::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

/// Canvas zoom bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 2.0,
            step: 0.25,
        }
    }
}

impl ZoomConfig {
    /// Clamp `zoom` into bounds, rounded to two decimals
    pub fn clamp(&self, zoom: f64) -> f64 {
        let (min, max) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };
        (zoom.clamp(min, max) * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "historyLimit": 20, "zoom": { "max": 4.0 } }"#).unwrap();

        assert_eq!(config.history_limit, 20);
        assert_eq!(config.default_device, Breakpoint::Desktop);
        assert_eq!(config.zoom.max, 4.0);
        assert_eq!(config.zoom.min, 0.25);
    }

    #[test]
    fn test_default_config() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_zoom_clamp() {
        let zoom = ZoomConfig::default();
        assert_eq!(zoom.clamp(10.0), 2.0);
        assert_eq!(zoom.clamp(0.0), 0.25);
        assert_eq!(zoom.clamp(0.3 + 0.45), 0.75);
        assert_eq!(zoom.clamp(f64::NAN), 1.0);
    }
}
