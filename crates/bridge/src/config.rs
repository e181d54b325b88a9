//! Bridge settings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How tag payloads cross the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMode {
    /// Mirror every tag kind exactly.
    #[default]
    Structural,
    /// Drop all payload content; both directions yield an empty compound.
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Bootstrap also registers an item type for every block kind.
    pub register_block_items: bool,
    pub tag_mode: TagMode,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            register_block_items: true,
            tag_mode: TagMode::Structural,
        }
    }
}

impl BridgeConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = BridgeConfig::from_json("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());

        let config = BridgeConfig::from_json(r#"{"tag_mode": "discard"}"#).unwrap();
        assert_eq!(config.tag_mode, TagMode::Discard);
        assert!(config.register_block_items);
    }

    #[test]
    fn unknown_tag_mode_is_an_error() {
        assert!(BridgeConfig::from_json(r#"{"tag_mode": "lossy"}"#).is_err());
    }
}
