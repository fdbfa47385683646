//! Dashboard configuration
//!
//! Loaded from a TOML or YAML file (chosen by extension). Every field has a
//! default, so an empty file or no file at all is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vis::ChartStyle;

pub const DEFAULT_TITLE: &str = "Customer Demography Dashboard";

pub const DEFAULT_DESCRIPTION: &str = "This dashboard will help us to understand more about our \
customers segment especially their generation class. This will track customer's generation \
proportion, customer's annual income and spendings, visualize customer distribution across \
provinces, and also customer's professions.";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub page: PageConfig,
    pub map: MapConfig,
    pub render: RenderConfig,
}

/// Input file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Customer table, `.json` or `.csv`
    pub customers: PathBuf,
    /// Province coordinate CSV
    pub coordinates: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            customers: PathBuf::from("data/customer_merge.json"),
            coordinates: PathBuf::from("data/coordinate.csv"),
        }
    }
}

/// Page text and chart theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub description: String,
    /// Theme name passed through to chart specs
    pub template: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            template: "plotly_dark".to_string(),
        }
    }
}

/// Bubble map settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub style: String,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            style: "carto-positron".to_string(),
            zoom: 3,
        }
    }
}

/// Terminal rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of one chart in characters
    pub width: usize,
    pub style: ChartStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 80,
            style: ChartStyle::Unicode,
        }
    }
}

impl DashboardConfig {
    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// Relative data paths are resolved against the directory of the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let mut config = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            _ => {
                return Err(Error::Format(format!(
                    "unsupported config format for '{}', expected .toml, .yaml or .yml",
                    path.display()
                )))
            }
        };

        if let Some(base) = path.parent() {
            config.data.customers = resolve(base, &config.data.customers);
            config.data.coordinates = resolve(base, &config.data.coordinates);
        }

        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // An empty YAML document deserializes as null
        if text.trim().is_empty() {
            return Ok(DashboardConfig::default());
        }
        let config: DashboardConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.render.width < 20 {
            return Err(Error::InvalidInput(format!(
                "render.width must be at least 20, got {}",
                self.render.width
            )));
        }
        if self.map.zoom > 22 {
            return Err(Error::InvalidInput(format!(
                "map.zoom must be between 0 and 22, got {}",
                self.map.zoom
            )));
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
