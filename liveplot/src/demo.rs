use std::thread;
use std::time::Duration;

use dataset::MemoryStore;
use liveplot_core::{PlotConfig, TrendConfig};
use liveplot_gui::{build_applet, AppletDef, AppletPane};

const SCAN_POINTS: usize = 61;
const HIST_BINS: usize = 20;

/// Applet set matching the datasets the demo producer writes.
pub fn demo_panes() -> Vec<AppletPane> {
    let mut scan = PlotConfig::new("scan/counts");
    scan.x = Some("scan/freq".to_string());
    scan.threshold = Some("scan/threshold".to_string());
    scan.pen = true;
    scan.exp_label = Some("(demo)".to_string());

    let mut hist = PlotConfig::new("hist/bright");
    hist.y2 = Some("hist/dark".to_string());
    hist.x = Some("hist/bins".to_string());

    let defs = vec![
        AppletDef {
            name: "Readout scan".to_string(),
            kind: "xy".to_string(),
            plot: Some(scan),
            trend: None,
        },
        AppletDef {
            name: "State histogram".to_string(),
            kind: "histogram".to_string(),
            plot: Some(hist),
            trend: None,
        },
        AppletDef {
            name: "Power drift".to_string(),
            kind: "trend".to_string(),
            plot: None,
            trend: Some(TrendConfig::new("beam/power", "beam/trend")),
        },
    ];
    defs.iter()
        .map(|def| build_applet(def).expect("demo layout is valid"))
        .collect()
}

/// Detached producer thread writing synthetic datasets at a steady cadence,
/// the role the experiment control system plays in production.
pub fn spawn_producer(store: MemoryStore) {
    thread::spawn(move || {
        let mut tick: u64 = 0;
        loop {
            let phase = tick as f64 * 0.05;

            let freq: Vec<f64> = (0..SCAN_POINTS).map(|i| 80.0 + i as f64 * 0.01).collect();
            let counts: Vec<f64> = (0..SCAN_POINTS)
                .map(|i| {
                    let detuning = (i as f64 - 30.0 - 5.0 * phase.sin()) / 6.0;
                    120.0 * (-detuning * detuning).exp() + 8.0 * ((i as f64 * 1.7).sin() + 1.0)
                })
                .collect();
            store.set_many(vec![
                ("scan/freq".to_string(), freq.into()),
                ("scan/counts".to_string(), counts.into()),
                ("scan/threshold".to_string(), (80.25 + 0.02 * phase.cos()).into()),
            ]);

            let bins: Vec<f64> = (0..=HIST_BINS).map(|i| i as f64 * 10.0).collect();
            let bright: Vec<f64> = (0..HIST_BINS)
                .map(|i| 50.0 * (-((i as f64 - 14.0) / 3.0).powi(2)).exp())
                .collect();
            let dark: Vec<f64> = (0..HIST_BINS)
                .map(|i| 40.0 * (-((i as f64 - 4.0) / 2.5).powi(2)).exp())
                .collect();
            store.set_many(vec![
                ("hist/bins".to_string(), bins.into()),
                ("hist/bright".to_string(), bright.into()),
                ("hist/dark".to_string(), dark.into()),
            ]);

            store.set_many(vec![(
                "beam/power".to_string(),
                (1.0 + 0.1 * phase.sin() + 0.002 * tick as f64).into(),
            )]);

            tick += 1;
            thread::sleep(Duration::from_millis(200));
        }
    });
}
