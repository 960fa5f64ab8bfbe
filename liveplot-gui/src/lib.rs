//! egui frontend for the liveplot applets: renders [`liveplot_core::Scene`]
//! values through egui_plot and hosts one window per configured applet.

pub mod app;
pub mod layout;
pub mod render;

pub use app::{run_gui, wall_clock_seconds, AppletKind, AppletPane, GuiConfig, LiveApp};
pub use layout::{build_applet, load_layout, AppletDef, LayoutError, LayoutFile};
pub use render::EguiSurface;

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}
