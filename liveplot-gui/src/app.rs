use std::sync::mpsc::Receiver;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dataset::{MemoryStore, Update};
use liveplot_core::{AppletError, HistApplet, Scene, TrendApplet, XyApplet};

use crate::render::EguiSurface;
use crate::GuiError;

pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

pub enum AppletKind {
    Xy(XyApplet),
    Hist(HistApplet),
    Trend(TrendApplet),
}

impl AppletKind {
    fn watched_keys(&self) -> Vec<&str> {
        match self {
            AppletKind::Xy(applet) => applet.watched_keys(),
            AppletKind::Hist(applet) => applet.watched_keys(),
            AppletKind::Trend(applet) => applet.watched_keys(),
        }
    }

    fn handle(
        &mut self,
        update: &Update,
        now: f64,
        store: &mut MemoryStore,
    ) -> Result<Option<Scene>, AppletError> {
        match self {
            AppletKind::Xy(applet) => applet.on_update(update),
            AppletKind::Hist(applet) => applet.on_update(update, now),
            AppletKind::Trend(applet) => applet.on_update(update, now, store).map(Some),
        }
    }
}

/// One applet plus its last rendered scene and last per-cycle error. A failed
/// cycle keeps the stale scene on screen under a textual warning; it never
/// takes the process down.
pub struct AppletPane {
    pub name: String,
    pub kind: AppletKind,
    pub scene: Option<Scene>,
    pub error: Option<String>,
}

impl AppletPane {
    pub fn new(name: impl Into<String>, kind: AppletKind) -> Self {
        Self {
            name: name.into(),
            kind,
            scene: None,
            error: None,
        }
    }

    /// Dispatches the update if it touches any watched key.
    pub fn apply(&mut self, update: &Update, now: f64, store: &mut MemoryStore) {
        let watched = self.kind.watched_keys();
        let relevant = update.changed.is_empty()
            || update.changed.iter().any(|key| watched.contains(&key.as_str()));
        if !relevant {
            return;
        }
        match self.kind.handle(update, now, store) {
            Ok(Some(scene)) => {
                self.scene = Some(scene);
                self.error = None;
            }
            Ok(None) => {
                // Skipped cycle: keep whatever was on screen.
            }
            Err(err) => {
                log::warn!("applet '{}': {err}", self.name);
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, now: f64) {
        if let AppletKind::Hist(applet) = &self.kind {
            if let Some(warning) = applet.warning(now) {
                ui.colored_label(egui::Color32::YELLOW, warning);
                return;
            }
        }
        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::RED, error);
        }
        match &self.scene {
            Some(scene) => EguiSurface::from_scene(scene).show(ui, &self.name),
            None => {
                ui.label("waiting for data…");
            }
        }
    }
}

/// Applet host: drains dataset notifications once per frame and redraws every
/// applet window. Notifications arrive serialized over the channel, so no
/// applet is ever re-entered.
pub struct LiveApp {
    store: MemoryStore,
    updates: Receiver<Update>,
    panes: Vec<AppletPane>,
}

impl LiveApp {
    pub fn new(store: MemoryStore, panes: Vec<AppletPane>) -> Self {
        let updates = store.subscribe();
        Self {
            store,
            updates,
            panes,
        }
    }
}

impl eframe::App for LiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = wall_clock_seconds();
        let mut store = self.store.clone();
        while let Ok(update) = self.updates.try_recv() {
            for pane in &mut self.panes {
                pane.apply(&update, now, &mut store);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!("{} applet(s)", self.panes.len()));
        });
        for (idx, pane) in self.panes.iter_mut().enumerate() {
            egui::Window::new(&pane.name)
                .id(egui::Id::new(("applet", idx)))
                .resizable(true)
                .default_size(egui::vec2(480.0, 320.0))
                .show(ctx, |ui| pane.ui(ui, now));
        }

        // Wake up regularly so armed mismatch countdowns expire without a
        // new notification.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "liveplot".to_string(),
            width: 1100.0,
            height: 700.0,
        }
    }
}

pub fn run_gui(
    config: GuiConfig,
    store: MemoryStore,
    panes: Vec<AppletPane>,
) -> Result<(), GuiError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([config.width, config.height]),
        ..Default::default()
    };
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Box::new(LiveApp::new(store, panes))),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}
