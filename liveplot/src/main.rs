use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dataset::MemoryStore;
use liveplot_gui::{load_layout, run_gui, GuiConfig};

mod demo;
mod replay;

#[derive(Parser)]
#[command(name = "liveplot", version, about = "Dataset-driven live plot applets")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the applet GUI (default).
    Gui {
        /// Applet layout file; without one, a synthetic demo layout is used.
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Start the synthetic demo producer even with a layout file.
        #[arg(long)]
        demo: bool,
    },
    /// Feed one JSON snapshot through a configured applet and print the
    /// resulting scene or validation error.
    Replay {
        #[arg(long)]
        layout: PathBuf,
        #[arg(long)]
        applet: String,
        snapshot: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        None => launch_gui(None, false),
        Some(Commands::Gui { layout, demo }) => launch_gui(layout, demo),
        Some(Commands::Replay {
            layout,
            applet,
            snapshot,
        }) => replay::replay(&layout, &snapshot, &applet),
    }
}

fn launch_gui(layout: Option<PathBuf>, force_demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let panes = match &layout {
        Some(path) => load_layout(path)?,
        None => demo::demo_panes(),
    };
    if layout.is_none() || force_demo {
        log::info!("starting synthetic demo producer");
        demo::spawn_producer(store.clone());
    }
    run_gui(GuiConfig::default(), store, panes)?;
    Ok(())
}
