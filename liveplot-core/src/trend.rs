use dataset::{DatasetStore, Update};
use serde::{Deserialize, Serialize};

use crate::error::AppletError;
use crate::fit::{quad_fit, Quadratic};
use crate::lookup::require_scalar;
use crate::scene::{ChartSurface, Scene, FIT_COLOR, POINT_SIZE, RAW_COLOR};
use crate::window::{RollingWindow, WINDOW_CAPACITY};

fn default_span() -> f64 {
    3600.0
}

fn default_min_fit_points() -> usize {
    6
}

fn default_capacity() -> usize {
    WINDOW_CAPACITY
}

/// Trend applet configuration: the scalar key to track and the dataset
/// namespace the fitted coefficients are published under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    pub y: String,
    pub prefix: String,
    #[serde(default = "default_span")]
    pub span_seconds: f64,
    #[serde(default = "default_min_fit_points")]
    pub min_fit_points: usize,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl TrendConfig {
    pub fn new(y: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            y: y.into(),
            prefix: prefix.into(),
            span_seconds: default_span(),
            min_fit_points: default_min_fit_points(),
            capacity: default_capacity(),
        }
    }
}

/// Rolling-window trend applet: tracks one scalar over wall-clock time, fits
/// a quadratic to the recent window and publishes the coefficients back to
/// the dataset store as `<prefix>/a`, `<prefix>/b`, `<prefix>/c`.
#[derive(Debug)]
pub struct TrendApplet {
    config: TrendConfig,
    window: RollingWindow,
}

impl TrendApplet {
    pub fn new(config: TrendConfig) -> Self {
        let window = RollingWindow::with_capacity(config.capacity);
        Self { config, window }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Keys whose changes this applet subscribes to. The published
    /// coefficient keys are deliberately absent so the applet's own writes
    /// never feed back into it.
    pub fn watched_keys(&self) -> Vec<&str> {
        vec![self.config.y.as_str()]
    }

    /// Appends the sample, refits, publishes and renders. With fewer than
    /// `min_fit_points` samples inside the span the fit degenerates to
    /// `(0, 0, latest_y)`.
    ///
    /// The fit runs in seconds elapsed since the oldest in-span sample, and
    /// the published coefficients share that origin. Epoch-scale timestamps
    /// would otherwise wash out the normal-equation sums and every solve
    /// would come back singular.
    pub fn on_update(
        &mut self,
        update: &Update,
        now: f64,
        store: &mut dyn DatasetStore,
    ) -> Result<Scene, AppletError> {
        let sample = require_scalar(update, &self.config.y)?;
        self.window.push(now, sample);

        let recent = self.window.recent(now, self.config.span_seconds);
        let origin = recent.first().map(|&(t, _)| t).unwrap_or(now);
        let shifted: Vec<(f64, f64)> = recent
            .iter()
            .map(|&(t, value)| (t - origin, value))
            .collect();
        let fit = if shifted.len() >= self.config.min_fit_points {
            match quad_fit(&shifted) {
                Some(fit) => fit,
                None => {
                    log::warn!(
                        "'{}': quadratic solve was singular, publishing degenerate fit",
                        self.config.y
                    );
                    Quadratic::degenerate(sample)
                }
            }
        } else {
            Quadratic::degenerate(sample)
        };

        store.set_dataset(&format!("{}/a", self.config.prefix), fit.a.into())?;
        store.set_dataset(&format!("{}/b", self.config.prefix), fit.b.into())?;
        store.set_dataset(&format!("{}/c", self.config.prefix), fit.c.into())?;

        let (times, values): (Vec<f64>, Vec<f64>) = recent.iter().copied().unzip();
        let predicted: Vec<f64> = times.iter().map(|&t| fit.eval(t - origin)).collect();

        let mut scene = Scene::new();
        scene.set_title(&self.config.y);
        scene.points(&self.config.y, &times, &values, RAW_COLOR, POINT_SIZE, false);
        scene.line("trend", &times, &predicted, FIT_COLOR, 2.0);
        Ok(scene)
    }
}
