use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::theme::Theme;

/// Layout geometry. All distances are in canvas pixels; every field can be
/// overridden from a JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Vertical distance between generation rows.
    pub generation_spacing: f32,
    /// Horizontal gap reserved after each family cluster.
    pub min_family_spacing: f32,
    /// Minimum horizontal distance between cards in the same generation.
    pub card_spacing: f32,
    /// Distance between the two parents of a couple.
    pub spouse_spacing: f32,
    pub card_width: f32,
    pub card_height: f32,
    /// Radius of the rounded corners on L-shaped relationship lines.
    pub corner_radius: f32,
    pub initial_x: f32,
    pub initial_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            generation_spacing: 250.0,
            min_family_spacing: 450.0,
            card_spacing: 200.0,
            spouse_spacing: 180.0,
            card_width: 160.0,
            card_height: 120.0,
            corner_radius: 8.0,
            initial_x: 100.0,
            initial_y: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DataConfig {
    /// Generation assigned to persons with no explicit value and no family
    /// ancestry to derive one from.
    pub default_generation: i32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_generation: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Snapshot bound; the oldest entry is evicted past this.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 50 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub layout: LayoutConfig,
    pub data: DataConfig,
    pub history: HistoryConfig,
    pub theme: Theme,
}

/// Load configuration, merging a JSON file (possibly partial) over the
/// defaults when a path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let parsed: Config = serde_json::from_str(&contents)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.generation_spacing, 250.0);
        assert_eq!(config.min_family_spacing, 450.0);
        assert_eq!(config.card_spacing, 200.0);
        assert_eq!(config.spouse_spacing, 180.0);
        assert_eq!(config.corner_radius, 8.0);
        assert_eq!(config.initial_x, 100.0);
        assert_eq!(config.initial_y, 80.0);
        assert_eq!(HistoryConfig::default().max_entries, 50);
        assert_eq!(DataConfig::default().default_generation, 1);
    }

    #[test]
    fn partial_config_file_keeps_defaults_elsewhere() {
        let parsed: Config =
            serde_json::from_str(r#"{"layout": {"cardSpacing": 120.0}}"#).unwrap();
        assert_eq!(parsed.layout.card_spacing, 120.0);
        assert_eq!(parsed.layout.generation_spacing, 250.0);
        assert_eq!(parsed.history.max_entries, 50);
    }
}
