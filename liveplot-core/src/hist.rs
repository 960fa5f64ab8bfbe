use dataset::Update;

use crate::config::PlotConfig;
use crate::error::{AppletError, ConfigError};
use crate::lookup::require_array;
use crate::scene::{ChartSurface, Scene, RAW_COLOR, SECOND_COLOR};
use crate::timer::{WarnTimer, MISMATCH_WARN_DELAY};

/// Dual-histogram comparison applet: two Y series as step histograms over a
/// shared boundary array carrying one more element than each series.
///
/// A length violation is treated as "producer still writing", not as an
/// error: the plot is withheld and a one-shot countdown armed. Only when the
/// countdown expires without a valid update does a textual warning replace
/// the plot.
#[derive(Debug)]
pub struct HistApplet {
    config: PlotConfig,
    timer: WarnTimer,
    last_mismatch: Option<(usize, usize, usize)>,
}

impl HistApplet {
    pub fn new(config: PlotConfig) -> Result<Self, ConfigError> {
        if config.y2.is_none() || config.x.is_none() {
            return Err(ConfigError::HistogramKeysMissing);
        }
        config.validate()?;
        Ok(Self {
            config,
            timer: WarnTimer::default(),
            last_mismatch: None,
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Keys whose changes this applet subscribes to.
    pub fn watched_keys(&self) -> Vec<&str> {
        let c = &self.config;
        std::iter::once(c.y.as_str())
            .chain(c.y2.as_deref())
            .chain(c.x.as_deref())
            .collect()
    }

    /// `Ok(None)` withholds the plot while the countdown runs.
    pub fn on_update(&mut self, update: &Update, now: f64) -> Result<Option<Scene>, AppletError> {
        let edges_key = self.config.x.as_deref().expect("validated at construction");
        let y2_key = self.config.y2.as_deref().expect("validated at construction");
        let y = require_array(update, &self.config.y)?;
        let y2 = require_array(update, y2_key)?;
        let edges = require_array(update, edges_key)?;

        let valid = edges.len() == y.len() + 1 && edges.len() == y2.len() + 1;
        if !valid {
            log::debug!(
                "'{}': {} edges against {}/{} counts, arming warning countdown",
                self.config.y,
                edges.len(),
                y.len(),
                y2.len()
            );
            self.last_mismatch = Some((edges.len(), y.len(), y2.len()));
            self.timer.arm(now, MISMATCH_WARN_DELAY);
            return Ok(None);
        }

        self.timer.cancel();
        self.last_mismatch = None;

        let mut scene = Scene::new();
        scene.set_title(&self.config.title(&self.config.y));
        if let Some((min, max)) = self.config.x_range() {
            scene.set_x_range(min, max);
        }
        if let Some((min, max)) = self.config.y_range() {
            scene.set_y_range(min, max);
        }
        scene.step_histogram(&self.config.y, edges, y, RAW_COLOR);
        scene.step_histogram(y2_key, edges, y2, SECOND_COLOR);
        Ok(Some(scene))
    }

    /// The warning to display once the countdown has run out.
    pub fn warning(&self, now: f64) -> Option<String> {
        if !self.timer.expired(now) {
            return None;
        }
        let (edges, y, y2) = self.last_mismatch?;
        Some(format!(
            "histogram size mismatch: {edges} boundaries vs {y}/{y2} counts"
        ))
    }
}
