use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use liveplot_core::{ConfigError, HistApplet, PlotConfig, TrendApplet, TrendConfig, XyApplet};

use crate::app::{AppletKind, AppletPane};

/// One `[[applet]]` table in a layout file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppletDef {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub plot: Option<PlotConfig>,
    #[serde(default)]
    pub trend: Option<TrendConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutFile {
    #[serde(default)]
    pub applet: Vec<AppletDef>,
}

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("layout parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("applet '{name}' is missing its [applet.{section}] table")]
    MissingSection { name: String, section: &'static str },
    #[error("applet '{0}' has unknown kind '{1}'")]
    UnknownKind(String, String),
}

pub fn build_applet(def: &AppletDef) -> Result<AppletPane, LayoutError> {
    let plot = |def: &AppletDef| {
        def.plot.clone().ok_or_else(|| LayoutError::MissingSection {
            name: def.name.clone(),
            section: "plot",
        })
    };
    let kind = match def.kind.as_str() {
        "xy" => AppletKind::Xy(XyApplet::new(plot(def)?)?),
        "histogram" => AppletKind::Hist(HistApplet::new(plot(def)?)?),
        "trend" => {
            let trend = def
                .trend
                .clone()
                .ok_or_else(|| LayoutError::MissingSection {
                    name: def.name.clone(),
                    section: "trend",
                })?;
            AppletKind::Trend(TrendApplet::new(trend))
        }
        other => return Err(LayoutError::UnknownKind(def.name.clone(), other.to_string())),
    };
    Ok(AppletPane::new(def.name.clone(), kind))
}

pub fn load_layout(path: &Path) -> Result<Vec<AppletPane>, LayoutError> {
    let text = fs::read_to_string(path)?;
    let layout: LayoutFile = toml::from_str(&text)?;
    layout.applet.iter().map(build_applet).collect()
}
