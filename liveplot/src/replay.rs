use std::fs;
use std::path::Path;

use dataset::{MemoryStore, Update};
use liveplot_core::SceneItem;
use liveplot_gui::{load_layout, wall_clock_seconds, AppletKind};

/// Feeds one recorded snapshot through a configured applet and reports the
/// outcome, for debugging producers without a running GUI.
pub fn replay(
    layout_path: &Path,
    snapshot_path: &Path,
    applet_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut panes = load_layout(layout_path)?;
    let pane = panes
        .iter_mut()
        .find(|pane| pane.name == applet_name)
        .ok_or_else(|| format!("no applet named '{applet_name}' in layout"))?;

    let text = fs::read_to_string(snapshot_path)?;
    let update: Update = serde_json::from_str(&text)?;
    let now = wall_clock_seconds();
    let mut store = MemoryStore::new();

    let outcome = match &mut pane.kind {
        AppletKind::Xy(applet) => applet.on_update(&update),
        AppletKind::Hist(applet) => applet.on_update(&update, now),
        AppletKind::Trend(applet) => applet.on_update(&update, now, &mut store).map(Some),
    };

    match outcome {
        Ok(Some(scene)) => {
            println!("applet '{applet_name}': ok, {} scene item(s)", scene.items.len());
            for item in &scene.items {
                println!("  {}", describe(item));
            }
            for key in ["a", "b", "c"] {
                if let Some(value) = store.get(&format!(
                    "{}/{key}",
                    trend_prefix(&pane.kind).unwrap_or_default()
                )) {
                    println!("  published {key} = {value:?}");
                }
            }
        }
        Ok(None) => println!("applet '{applet_name}': cycle skipped, no redraw"),
        Err(err) => println!("applet '{applet_name}': error: {err}"),
    }
    Ok(())
}

fn trend_prefix(kind: &AppletKind) -> Option<String> {
    match kind {
        AppletKind::Trend(applet) => Some(applet.config().prefix.clone()),
        _ => None,
    }
}

fn describe(item: &SceneItem) -> String {
    match item {
        SceneItem::Points { name, x, connect, .. } => {
            format!("points '{name}': {} sample(s), connect={connect}", x.len())
        }
        SceneItem::Line { name, x, .. } => format!("line '{name}': {} point(s)", x.len()),
        SceneItem::StepHistogram { name, edges, .. } => {
            format!("histogram '{name}': {} bin(s)", edges.len().saturating_sub(1))
        }
        SceneItem::ErrorBars { x, .. } => format!("error bars: {} sample(s)", x.len()),
        SceneItem::VLine { x, .. } => format!("vline at {x}"),
        SceneItem::Label { text, .. } => format!("label '{text}'"),
    }
}
