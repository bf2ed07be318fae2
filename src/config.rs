//! Report configuration, loaded from an optional JSON file.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 800.0,
            min_width: 1000.0,
            min_height: 600.0,
        }
    }
}

/// Look of the stacked bar chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub height: f32,
    pub bar_width: f64,
    pub label_size: f32,
    pub tick_angle_degrees: f32,
    pub approved_color: [u8; 3],
    pub expired_color: [u8; 3],
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 380.0,
            bar_width: 0.8,
            label_size: 11.0,
            tick_angle_degrees: 45.0,
            approved_color: [135, 206, 235], // skyblue
            expired_color: [244, 164, 96],   // sandybrown
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub window: WindowConfig,
    pub chart: ChartConfig,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            chart: ChartConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ReportConfig::from_json(indoc! {r#"
            {
                "chart": { "height": 500.0, "expired_color": [255, 0, 0] },
                "log_level": "debug"
            }
        "#})
        .unwrap();

        assert_eq!(config.chart.height, 500.0);
        assert_eq!(config.chart.expired_color, [255, 0, 0]);
        assert_eq!(config.chart.approved_color, ChartConfig::default().approved_color);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "window": {{ "width": 900.0 }} }}"#).unwrap();

        let config = ReportConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.window.width, 900.0);
        assert_eq!(config.window.height, 800.0);
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(ReportConfig::load_or_default(None).unwrap(), ReportConfig::default());
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(
            ReportConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
