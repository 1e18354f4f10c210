use blockcraft_document::Breakpoint;
use serde::{Deserialize, Serialize};

/// Viewport widths behind the tablet and mobile media queries.
///
/// Desktop has no query: its styles form the unconditional base rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointConfig {
    /// Upper bound (inclusive) for tablet styles
    #[serde(default = "default_tablet_max_width")]
    pub tablet_max_width: u32,

    /// Upper bound (inclusive) for mobile styles
    #[serde(default = "default_mobile_max_width")]
    pub mobile_max_width: u32,
}

fn default_tablet_max_width() -> u32 {
    1024
}

fn default_mobile_max_width() -> u32 {
    767
}

impl BreakpointConfig {
    pub fn media_query(&self, breakpoint: Breakpoint) -> Option<String> {
        match breakpoint {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(format!("(max-width: {}px)", self.tablet_max_width)),
            Breakpoint::Mobile => Some(format!("(max-width: {}px)", self.mobile_max_width)),
        }
    }

    /// Breakpoint a viewport of `width` pixels falls into
    pub fn breakpoint_for_width(&self, width: u32) -> Breakpoint {
        if width <= self.mobile_max_width {
            Breakpoint::Mobile
        } else if width <= self.tablet_max_width {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            tablet_max_width: default_tablet_max_width(),
            mobile_max_width: default_mobile_max_width(),
        }
    }
}
