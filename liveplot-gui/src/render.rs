use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text, VLine};
use liveplot_core::scene::{ChartSurface, Color, Scene};

fn color32(color: Color) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

enum PlotItem {
    Points(Points),
    Line(Line),
    VLine(VLine),
    Text(Text),
}

/// Immediate-mode chart surface backed by egui_plot. A [`Scene`] is replayed
/// onto it once per frame, then `show` draws the collected items.
#[derive(Default)]
pub struct EguiSurface {
    title: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    data_min: Option<(f64, f64)>,
    data_max: Option<(f64, f64)>,
    items: Vec<PlotItem>,
}

impl EguiSurface {
    pub fn from_scene(scene: &Scene) -> Self {
        let mut surface = Self::default();
        scene.replay(&mut surface);
        surface
    }

    fn track(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.data_min = Some(match self.data_min {
            Some((mx, my)) => (mx.min(x), my.min(y)),
            None => (x, y),
        });
        self.data_max = Some(match self.data_max {
            Some((mx, my)) => (mx.max(x), my.max(y)),
            None => (x, y),
        });
    }

    fn track_all(&mut self, x: &[f64], y: &[f64]) {
        for (&xv, &yv) in x.iter().zip(y) {
            self.track(xv, yv);
        }
    }

    fn bounds(&self) -> Option<PlotBounds> {
        let ((data_min_x, data_min_y), (data_max_x, data_max_y)) =
            match (self.data_min, self.data_max) {
                (Some(min), Some(max)) => (min, max),
                _ => {
                    let (min_x, max_x) = self.x_range?;
                    let (min_y, max_y) = self.y_range?;
                    return Some(PlotBounds::from_min_max([min_x, min_y], [max_x, max_y]));
                }
            };
        let pad = |min: f64, max: f64| {
            if min == max {
                (min - 1.0, max + 1.0)
            } else {
                let pad = (max - min) * 0.05;
                (min - pad, max + pad)
            }
        };
        let (x0, x1) = self.x_range.unwrap_or_else(|| pad(data_min_x, data_max_x));
        let (y0, y1) = self.y_range.unwrap_or_else(|| pad(data_min_y, data_max_y));
        Some(PlotBounds::from_min_max([x0, y0], [x1, y1]))
    }

    pub fn show(self, ui: &mut egui::Ui, plot_id: &str) {
        if !self.title.is_empty() {
            ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(self.title.clone()).strong().size(16.0));
            });
        }
        let bounds = self.bounds();
        let plot = Plot::new(plot_id.to_string())
            .legend(Legend::default())
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_drag(false);
        plot.show(ui, |plot_ui| {
            for item in self.items {
                match item {
                    PlotItem::Points(points) => plot_ui.points(points),
                    PlotItem::Line(line) => plot_ui.line(line),
                    PlotItem::VLine(vline) => plot_ui.vline(vline),
                    PlotItem::Text(text) => plot_ui.text(text),
                }
            }
            if let Some(bounds) = bounds {
                plot_ui.set_plot_bounds(bounds);
            }
        });
    }
}

impl ChartSurface for EguiSurface {
    fn clear(&mut self) {
        self.items.clear();
        self.data_min = None;
        self.data_max = None;
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
        self.track_all(x, y);
        let coords: Vec<[f64; 2]> = x.iter().zip(y).map(|(&x, &y)| [x, y]).collect();
        if connect {
            self.items.push(PlotItem::Line(
                Line::new(PlotPoints::from(coords.clone()))
                    .color(color32(color))
                    .width(1.0),
            ));
        }
        self.items.push(PlotItem::Points(
            Points::new(PlotPoints::from(coords))
                .color(color32(color))
                .filled(true)
                .radius(size / 2.0)
                .name(name),
        ));
    }

    fn line(&mut self, name: &str, x: &[f64], y: &[f64], color: Color, width: f32) {
        self.track_all(x, y);
        let coords: Vec<[f64; 2]> = x.iter().zip(y).map(|(&x, &y)| [x, y]).collect();
        self.items.push(PlotItem::Line(
            Line::new(PlotPoints::from(coords))
                .color(color32(color))
                .width(width)
                .name(name),
        ));
    }

    fn step_histogram(&mut self, name: &str, edges: &[f64], heights: &[f64], color: Color) {
        // Step outline over the bin edges, filled down to zero.
        let mut coords = Vec::with_capacity(heights.len() * 2);
        for (i, &height) in heights.iter().enumerate() {
            coords.push([edges[i], height]);
            coords.push([edges[i + 1], height]);
            self.track(edges[i], height);
            self.track(edges[i + 1], height);
        }
        // Keep the fill baseline in view.
        if let Some(&first) = edges.first() {
            self.track(first, 0.0);
        }
        self.items.push(PlotItem::Line(
            Line::new(PlotPoints::from(coords))
                .color(color32(color))
                .width(1.5)
                .fill(0.0)
                .name(name),
        ));
    }

    fn error_bars(&mut self, x: &[f64], y: &[f64], err: &[f64], color: Color) {
        for ((&x, &y), &err) in x.iter().zip(y).zip(err) {
            self.track(x, y - err);
            self.track(x, y + err);
            self.items.push(PlotItem::Line(
                Line::new(PlotPoints::from(vec![[x, y - err], [x, y + err]]))
                    .color(color32(color))
                    .width(1.0),
            ));
        }
    }

    fn vline(&mut self, x: f64, color: Color) {
        self.items
            .push(PlotItem::VLine(VLine::new(x).color(color32(color))));
    }

    fn label(&mut self, x: f64, y: f64, text: &str) {
        self.items.push(PlotItem::Text(Text::new(
            PlotPoint::new(x, y),
            egui::RichText::new(text.to_string()).size(14.0),
        )));
    }
}
