//! Tile path template.

use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Template for tile paths relative to the tiles root.
///
/// The template holds exactly three `%d` slots which receive, in order, the
/// zoom level, the column index and the row index. It may contain path
/// separators; `3/5/2` style trees come from the default `%d/%d/%d`. The
/// format extension is appended by the writer, not part of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePattern {
    raw: String,
}

impl StorePattern {
    /// Parse a pattern, rejecting anything but exactly three `%d` slots.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let slots = pattern.split("%d").count() - 1;
        if slots != 3 {
            return Err(ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                slots,
            });
        }
        Ok(Self {
            raw: pattern.to_string(),
        })
    }

    /// Substitute zoom, column and row into the template.
    pub fn render(&self, zoom: u8, x: u32, y: u32) -> String {
        let mut parts = self.raw.split("%d");
        let mut out = String::with_capacity(self.raw.len() + 8);
        // parse() guarantees four literal parts around the three slots
        out.push_str(parts.next().unwrap_or(""));
        out.push_str(&zoom.to_string());
        out.push_str(parts.next().unwrap_or(""));
        out.push_str(&x.to_string());
        out.push_str(parts.next().unwrap_or(""));
        out.push_str(&y.to_string());
        out.push_str(parts.next().unwrap_or(""));
        out
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for StorePattern {
    fn default() -> Self {
        Self {
            raw: String::from("%d/%d/%d"),
        }
    }
}

impl fmt::Display for StorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for StorePattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
