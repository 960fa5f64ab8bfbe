//! Applet logic for dataset-driven live plots.
//!
//! An applet is configured once with the dataset keys it depends on, then
//! driven by push notifications carrying a full snapshot of dataset values.
//! Every notification rebuilds the chart [`Scene`] from scratch; renderers
//! consume it through the [`ChartSurface`] boundary.

pub mod config;
pub mod error;
pub mod fit;
pub mod hist;
pub mod lookup;
pub mod scene;
pub mod state;
pub mod timer;
pub mod trend;
pub mod window;
pub mod xy;

pub use config::PlotConfig;
pub use error::{AppletError, ConfigError};
pub use fit::{quad_fit, Quadratic};
pub use hist::HistApplet;
pub use scene::{ChartSurface, Color, Scene, SceneItem, POINT_SIZE};
pub use state::SyncState;
pub use timer::{WarnTimer, MISMATCH_WARN_DELAY};
pub use trend::{TrendApplet, TrendConfig};
pub use window::{RollingWindow, WINDOW_CAPACITY};
pub use xy::XyApplet;
