use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Dataset keys and display options resolved once at startup.
///
/// `y` is the only required key. Optional keys switch features on: an
/// unconfigured feature is skipped entirely at update time, a configured one
/// makes its key mandatory in every update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    pub y: String,
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub y2: Option<String>,
    #[serde(default)]
    pub fit: Option<String>,
    #[serde(default)]
    pub y_err: Option<String>,
    #[serde(default)]
    pub threshold: Option<String>,
    #[serde(default)]
    pub xmin: Option<f64>,
    #[serde(default)]
    pub xmax: Option<f64>,
    #[serde(default)]
    pub ymin: Option<f64>,
    #[serde(default)]
    pub ymax: Option<f64>,
    #[serde(default)]
    pub pen: bool,
    #[serde(default)]
    pub exp_label: Option<String>,
}

impl PlotConfig {
    pub fn new(y: impl Into<String>) -> Self {
        Self {
            y: y.into(),
            x: None,
            y2: None,
            fit: None,
            y_err: None,
            threshold: None,
            xmin: None,
            xmax: None,
            ymin: None,
            ymax: None,
            pen: false,
            exp_label: None,
        }
    }

    /// An X range override only makes sense when an `x` dataset is
    /// configured; the Y axis always has a data role through `y`. A min
    /// without its max is rejected, a max alone is fine (min defaults to 0).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x.is_none() {
            if self.xmax.is_some() {
                return Err(ConfigError::RangeWithoutAxis("xmax"));
            }
            if self.xmin.is_some() {
                return Err(ConfigError::RangeWithoutAxis("xmin"));
            }
        }
        if self.xmin.is_some() && self.xmax.is_none() {
            return Err(ConfigError::UnpairedBound("xmin", "xmax"));
        }
        if self.ymin.is_some() && self.ymax.is_none() {
            return Err(ConfigError::UnpairedBound("ymin", "ymax"));
        }
        Ok(())
    }

    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.xmax.map(|max| (self.xmin.unwrap_or(0.0), max))
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.ymax.map(|max| (self.ymin.unwrap_or(0.0), max))
    }

    pub fn title(&self, base: &str) -> String {
        match &self.exp_label {
            Some(label) => format!("{base} {label}"),
            None => base.to_string(),
        }
    }
}
