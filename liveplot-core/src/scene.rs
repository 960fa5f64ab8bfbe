use serde::{Deserialize, Serialize};

pub const POINT_SIZE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

/// Series palette, one distinguishable color per role.
pub const RAW_COLOR: Color = Color(86, 156, 214);
pub const FIT_COLOR: Color = Color(220, 122, 95);
pub const SECOND_COLOR: Color = Color(181, 206, 168);
pub const THRESHOLD_COLOR: Color = Color(220, 220, 170);
pub const ERROR_COLOR: Color = Color(156, 220, 254);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneItem {
    /// Point scatter, optionally connected in insertion order.
    Points {
        name: String,
        x: Vec<f64>,
        y: Vec<f64>,
        color: Color,
        size: f32,
        connect: bool,
    },
    /// Stroked curve with no point markers.
    Line {
        name: String,
        x: Vec<f64>,
        y: Vec<f64>,
        color: Color,
        width: f32,
    },
    /// Step-style filled histogram; `edges` has one more element than
    /// `heights`.
    StepHistogram {
        name: String,
        edges: Vec<f64>,
        heights: Vec<f64>,
        color: Color,
    },
    /// Per-point vertical error segments.
    ErrorBars {
        x: Vec<f64>,
        y: Vec<f64>,
        err: Vec<f64>,
        color: Color,
    },
    VLine { x: f64, color: Color },
    Label { x: f64, y: f64, text: String },
}

/// Abstract 2D chart boundary. Any renderer that supports these primitives
/// can display an applet: a retained scene, an immediate-mode canvas, a
/// terminal chart.
pub trait ChartSurface {
    fn clear(&mut self);
    fn set_title(&mut self, title: &str);
    fn set_x_range(&mut self, min: f64, max: f64);
    fn set_y_range(&mut self, min: f64, max: f64);
    fn points(&mut self, name: &str, x: &[f64], y: &[f64], color: Color, size: f32, connect: bool);
    fn line(&mut self, name: &str, x: &[f64], y: &[f64], color: Color, width: f32);
    fn step_histogram(&mut self, name: &str, edges: &[f64], heights: &[f64], color: Color);
    fn error_bars(&mut self, x: &[f64], y: &[f64], err: &[f64], color: Color);
    fn vline(&mut self, x: f64, color: Color);
    fn label(&mut self, x: f64, y: f64, text: &str);
}

/// Retained chart state, rebuilt from scratch on every notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks the scene over any chart surface in draw order.
    pub fn replay(&self, surface: &mut dyn ChartSurface) {
        surface.clear();
        surface.set_title(&self.title);
        if let Some((min, max)) = self.x_range {
            surface.set_x_range(min, max);
        }
        if let Some((min, max)) = self.y_range {
            surface.set_y_range(min, max);
        }
        for item in &self.items {
            match item {
                SceneItem::Points {
                    name,
                    x,
                    y,
                    color,
                    size,
                    connect,
                } => surface.points(name, x, y, *color, *size, *connect),
                SceneItem::Line {
                    name,
                    x,
                    y,
                    color,
                    width,
                } => surface.line(name, x, y, *color, *width),
                SceneItem::StepHistogram {
                    name,
                    edges,
                    heights,
                    color,
                } => surface.step_histogram(name, edges, heights, *color),
                SceneItem::ErrorBars { x, y, err, color } => {
                    surface.error_bars(x, y, err, *color)
                }
                SceneItem::VLine { x, color } => surface.vline(*x, *color),
                SceneItem::Label { x, y, text } => surface.label(*x, *y, text),
            }
        }
    }
}

impl ChartSurface for Scene {
    fn clear(&mut self) {
        self.items.clear();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_x_range(&mut self, min: f64, max: f64) {
        self.x_range = Some((min, max));
    }

    fn set_y_range(&mut self, min: f64, max: f64) {
        self.y_range = Some((min, max));
    }

    fn points(&mut self, name: &str, x: &[f64], y: &[f64], color: Color, size: f32, connect: bool) {
        self.items.push(SceneItem::Points {
            name: name.to_string(),
            x: x.to_vec(),
            y: y.to_vec(),
            color,
            size,
            connect,
        });
    }

    fn line(&mut self, name: &str, x: &[f64], y: &[f64], color: Color, width: f32) {
        self.items.push(SceneItem::Line {
            name: name.to_string(),
            x: x.to_vec(),
            y: y.to_vec(),
            color,
            width,
        });
    }

    fn step_histogram(&mut self, name: &str, edges: &[f64], heights: &[f64], color: Color) {
        self.items.push(SceneItem::StepHistogram {
            name: name.to_string(),
            edges: edges.to_vec(),
            heights: heights.to_vec(),
            color,
        });
    }

    fn error_bars(&mut self, x: &[f64], y: &[f64], err: &[f64], color: Color) {
        self.items.push(SceneItem::ErrorBars {
            x: x.to_vec(),
            y: y.to_vec(),
            err: err.to_vec(),
            color,
        });
    }

    fn vline(&mut self, x: f64, color: Color) {
        self.items.push(SceneItem::VLine { x, color });
    }

    fn label(&mut self, x: f64, y: f64, text: &str) {
        self.items.push(SceneItem::Label {
            x,
            y,
            text: text.to_string(),
        });
    }
}
