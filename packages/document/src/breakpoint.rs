use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device class used to key responsive overrides.
///
/// Ordered from largest to smallest, so `Desktop < Tablet < Mobile` in the
/// derived `Ord`. Styles are authored desktop-first: smaller breakpoints only
/// carry deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    /// All breakpoints, largest first
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }

    /// The next larger breakpoint, if any
    pub fn larger(&self) -> Option<Breakpoint> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(Breakpoint::Desktop),
            Breakpoint::Mobile => Some(Breakpoint::Tablet),
        }
    }

    /// This breakpoint followed by every larger one, ending at desktop.
    ///
    /// `Mobile.fallback_chain()` yields mobile, tablet, desktop.
    pub fn fallback_chain(&self) -> impl Iterator<Item = Breakpoint> {
        std::iter::successors(Some(*self), |bp| bp.larger())
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Breakpoint::Desktop
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Breakpoint::Desktop),
            "tablet" => Ok(Breakpoint::Tablet),
            "mobile" => Ok(Breakpoint::Mobile),
            other => Err(format!(
                "Invalid breakpoint: {}. Use: desktop, tablet, or mobile",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_chain_walks_upward() {
        let chain: Vec<_> = Breakpoint::Mobile.fallback_chain().collect();
        assert_eq!(
            chain,
            vec![Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop]
        );

        let chain: Vec<_> = Breakpoint::Desktop.fallback_chain().collect();
        assert_eq!(chain, vec![Breakpoint::Desktop]);
    }

    #[test]
    fn test_parse_breakpoint() {
        assert_eq!("Tablet".parse::<Breakpoint>(), Ok(Breakpoint::Tablet));
        assert!("watch".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Breakpoint::Mobile).unwrap();
        assert_eq!(json, "\"mobile\"");
    }
}
