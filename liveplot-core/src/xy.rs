use dataset::Update;

use crate::config::PlotConfig;
use crate::error::{AppletError, ConfigError};
use crate::lookup::{require_array, require_scalar};
use crate::scene::{
    ChartSurface, Scene, ERROR_COLOR, FIT_COLOR, POINT_SIZE, RAW_COLOR, THRESHOLD_COLOR,
};
use crate::state::SyncState;

/// Scatter applet: one Y series against explicit X values or the index
/// sequence, optional fit overlay, error bars and threshold marker.
#[derive(Debug)]
pub struct XyApplet {
    config: PlotConfig,
    sync: SyncState,
}

impl XyApplet {
    pub fn new(config: PlotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sync: SyncState::default(),
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync
    }

    /// Keys whose changes this applet subscribes to.
    pub fn watched_keys(&self) -> Vec<&str> {
        let c = &self.config;
        std::iter::once(c.y.as_str())
            .chain(c.x.as_deref())
            .chain(c.fit.as_deref())
            .chain(c.y_err.as_deref())
            .chain(c.threshold.as_deref())
            .collect()
    }

    /// Rebuilds the scene from the snapshot. `Ok(None)` means the cycle was
    /// skipped without redrawing (first X/Y length mismatch). All configured
    /// keys are resolved before any state is touched, so a failed cycle
    /// leaves the applet as it was.
    pub fn on_update(&mut self, update: &Update) -> Result<Option<Scene>, AppletError> {
        let y = require_array(update, &self.config.y)?;
        let x: Vec<f64> = match &self.config.x {
            Some(key) => require_array(update, key)?.to_vec(),
            None => (0..y.len()).map(|i| i as f64).collect(),
        };
        let fit = match &self.config.fit {
            Some(key) => Some(require_array(update, key)?),
            None => None,
        };
        let y_err = match &self.config.y_err {
            Some(key) => Some(require_array(update, key)?),
            None => None,
        };
        let threshold = match &self.config.threshold {
            Some(key) => Some(require_scalar(update, key)?),
            None => None,
        };

        if !self.sync.reconcile(x.len(), y.len())? {
            log::debug!(
                "'{}': x/y lengths {}/{} disagree, waiting one cycle",
                self.config.y,
                x.len(),
                y.len()
            );
            return Ok(None);
        }

        let mut scene = Scene::new();
        scene.set_title(&self.config.title(&self.config.y));
        if let Some((min, max)) = self.config.x_range() {
            scene.set_x_range(min, max);
        }
        if let Some((min, max)) = self.config.y_range() {
            scene.set_y_range(min, max);
        }

        scene.points(&self.config.y, &x, y, RAW_COLOR, POINT_SIZE, self.config.pen);
        if let Some(err) = y_err {
            let n = x.len().min(err.len());
            scene.error_bars(&x[..n], &y[..n], &err[..n], ERROR_COLOR);
        }
        if let Some(fit) = fit {
            let n = x.len().min(fit.len());
            scene.line("fit", &x[..n], &fit[..n], FIT_COLOR, 2.0);
        }
        if let Some(threshold) = threshold {
            let max_y = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let label_y = if max_y.is_finite() { max_y / 2.0 } else { 0.0 };
            scene.vline(threshold, THRESHOLD_COLOR);
            scene.label(threshold, label_y, &format!("{threshold:.2}"));
        }
        Ok(Some(scene))
    }
}
