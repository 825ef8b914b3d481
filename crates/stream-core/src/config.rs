// File: crates/stream-core/src/config.rs
// Summary: Injected series configuration (date column, series names and colors).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// Column holding the record date in the default layout.
pub const DEFAULT_DATE_COLUMN: &str = "Date";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading series config {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },
    #[error("parsing series config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("series config lists no series")]
    Empty,
    #[error("series {0:?} is listed more than once")]
    Duplicate(String),
    #[error("series name must not be empty")]
    BlankName,
}

/// One tracked entity and its display color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub name: String,
    pub color: Color,
}

impl SeriesEntry {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self { name: name.into(), color }
    }
}

/// Ordered series list shared read-only by the ingestion step, the main chart and the tooltip.
/// The order is the stacking key order; the legend shows it reversed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default = "default_date_column")]
    pub date_column: String,
    pub series: Vec<SeriesEntry>,
}

fn default_date_column() -> String { DEFAULT_DATE_COLUMN.to_string() }

impl Default for SeriesConfig {
    /// The five benchmark entities the tool was built around.
    fn default() -> Self {
        Self {
            date_column: default_date_column(),
            series: vec![
                SeriesEntry::new("GPT-4", Color::rgb(0xe4, 0x1a, 0x1c)),
                SeriesEntry::new("Gemini", Color::rgb(0x37, 0x7e, 0xb8)),
                SeriesEntry::new("PaLM-2", Color::rgb(0x4d, 0xaf, 0x4a)),
                SeriesEntry::new("Claude", Color::rgb(0x98, 0x4e, 0xa3)),
                SeriesEntry::new("LLaMA-3.1", Color::rgb(0xff, 0x7f, 0x00)),
            ],
        }
    }
}

impl SeriesConfig {
    /// Build and validate a configuration from `(name, color)` pairs.
    pub fn new(date_column: impl Into<String>, series: Vec<SeriesEntry>) -> Result<Self, ConfigError> {
        let cfg = Self { date_column: date_column.into(), series };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.series.is_empty() {
            return Err(ConfigError::Empty);
        }
        let mut seen = HashSet::new();
        for entry in &self.series {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::BlankName);
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::Duplicate(entry.name.clone()));
            }
        }
        Ok(())
    }

    /// Series names in stacking order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.series.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize { self.series.len() }

    pub fn is_empty(&self) -> bool { self.series.is_empty() }

    pub fn color_of(&self, key: &str) -> Option<Color> {
        self.series.iter().find(|e| e.name == key).map(|e| e.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_five_entities_in_stack_order() {
        let cfg = SeriesConfig::default();
        let keys: Vec<_> = cfg.keys().collect();
        assert_eq!(keys, ["GPT-4", "Gemini", "PaLM-2", "Claude", "LLaMA-3.1"]);
        assert_eq!(cfg.color_of("Claude").unwrap().to_hex(), "#984ea3");
        assert_eq!(cfg.date_column, "Date");
    }

    #[test]
    fn json_round_trip_fills_date_column() {
        let cfg = SeriesConfig::from_json(r##"{"series":[{"name":"A","color":"#123456"}]}"##).unwrap();
        assert_eq!(cfg.date_column, "Date");
        assert_eq!(cfg.color_of("A").unwrap().to_hex(), "#123456");
    }

    #[test]
    fn loads_from_file_and_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        std::fs::write(&path, r##"{"date_column":"Day","series":[{"name":"North","color":"#0a0"},{"name":"South","color":"#00aa00"}]}"##).unwrap();
        let cfg = SeriesConfig::load(&path).unwrap();
        assert_eq!(cfg.date_column, "Day");
        assert_eq!(cfg.keys().collect::<Vec<_>>(), ["North", "South"]);
        assert_eq!(cfg.color_of("North"), cfg.color_of("South"));
        let missing = SeriesConfig::load(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn rejects_duplicates_and_empty_lists() {
        let dup = r##"{"series":[{"name":"A","color":"#111"},{"name":"A","color":"#222"}]}"##;
        assert!(matches!(SeriesConfig::from_json(dup), Err(ConfigError::Duplicate(n)) if n == "A"));
        assert!(matches!(SeriesConfig::from_json(r#"{"series":[]}"#), Err(ConfigError::Empty)));
        assert!(matches!(SeriesConfig::from_json(r#"{"series":[{"name":"A","color":"red"}]}"#), Err(ConfigError::Json(_))));
    }
}
