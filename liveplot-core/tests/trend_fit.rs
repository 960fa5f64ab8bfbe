use dataset::{MemoryStore, Update};
use liveplot_core::{SceneItem, TrendApplet, TrendConfig};

fn coefficient(store: &MemoryStore, key: &str) -> f64 {
    store.get(key).unwrap().as_scalar().unwrap()
}

#[test]
fn sparse_window_publishes_degenerate_fit() {
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let mut store = MemoryStore::new();

    for i in 0..5 {
        let update = Update::new().with_value("lock/power", 3.0 + i as f64);
        applet.on_update(&update, i as f64, &mut store).unwrap();
    }

    assert_eq!(coefficient(&store, "lock/trend/a"), 0.0);
    assert_eq!(coefficient(&store, "lock/trend/b"), 0.0);
    assert_eq!(coefficient(&store, "lock/trend/c"), 7.0);
}

#[test]
fn recovers_known_quadratic_within_tolerance() {
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let mut store = MemoryStore::new();

    for i in 0..20 {
        let t = i as f64;
        let y = 2.0 * t * t - 3.0 * t + 5.0;
        let update = Update::new().with_value("lock/power", y);
        applet.on_update(&update, t, &mut store).unwrap();
    }

    assert!((coefficient(&store, "lock/trend/a") - 2.0).abs() < 1e-6);
    assert!((coefficient(&store, "lock/trend/b") + 3.0).abs() < 1e-6);
    assert!((coefficient(&store, "lock/trend/c") - 5.0).abs() < 1e-6);
}

#[test]
fn wall_clock_timestamps_keep_the_fit_conditioned() {
    // Production passes SystemTime epoch seconds as `now`; the fit must not
    // collapse to the degenerate fallback at that scale.
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let mut store = MemoryStore::new();

    let t0 = 1.756e9;
    let mut scene = None;
    for i in 0..30 {
        let elapsed = (i * 60) as f64;
        let y = 2.0e-4 * elapsed * elapsed - 3.0e-2 * elapsed + 5.0;
        let update = Update::new().with_value("lock/power", y);
        scene = Some(applet.on_update(&update, t0 + elapsed, &mut store).unwrap());
    }

    // Coefficients are relative to the oldest in-span sample, so the exact
    // generating polynomial comes back.
    assert!((coefficient(&store, "lock/trend/a") - 2.0e-4).abs() < 1e-9);
    assert!((coefficient(&store, "lock/trend/b") + 3.0e-2).abs() < 1e-6);
    assert!((coefficient(&store, "lock/trend/c") - 5.0).abs() < 1e-6);

    // The rendered prediction tracks the raw samples point for point.
    let scene = scene.unwrap();
    match (&scene.items[0], &scene.items[1]) {
        (
            SceneItem::Points { y: raw_y, .. },
            SceneItem::Line { y: fit_y, .. },
        ) => {
            for (raw, fit) in raw_y.iter().zip(fit_y) {
                assert!((raw - fit).abs() < 1e-6, "residual too large: {raw} vs {fit}");
            }
        }
        other => panic!("unexpected scene items: {other:?}"),
    }
}

#[test]
fn samples_outside_span_are_ignored_by_the_fit() {
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let mut store = MemoryStore::new();

    // Old burst well outside the one-hour span.
    for i in 0..10 {
        let update = Update::new().with_value("lock/power", 100.0);
        applet.on_update(&update, i as f64, &mut store).unwrap();
    }
    // Five fresh samples: below the fit threshold, degenerate again.
    for i in 0..5 {
        let update = Update::new().with_value("lock/power", 1.0);
        applet
            .on_update(&update, 10_000.0 + i as f64, &mut store)
            .unwrap();
    }

    assert_eq!(coefficient(&store, "lock/trend/a"), 0.0);
    assert_eq!(coefficient(&store, "lock/trend/c"), 1.0);
}

#[test]
fn window_capacity_bounds_retained_samples() {
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let mut store = MemoryStore::new();

    for i in 0..150 {
        let update = Update::new().with_value("lock/power", i as f64);
        applet.on_update(&update, i as f64, &mut store).unwrap();
    }
    assert_eq!(applet.window_len(), 100);
}

#[test]
fn scene_holds_raw_scatter_and_prediction_curve() {
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let mut store = MemoryStore::new();

    let mut scene = None;
    for i in 0..10 {
        let t = i as f64;
        let update = Update::new().with_value("lock/power", t * t);
        scene = Some(applet.on_update(&update, t, &mut store).unwrap());
    }
    let scene = scene.unwrap();
    assert_eq!(scene.items.len(), 2);
    match (&scene.items[0], &scene.items[1]) {
        (
            SceneItem::Points { x: raw_t, .. },
            SceneItem::Line { x: fit_t, y: fit_y, .. },
        ) => {
            assert_eq!(raw_t, fit_t);
            // Exact quadratic input, so the prediction tracks the data.
            assert!((fit_y[9] - 81.0).abs() < 1e-6);
        }
        other => panic!("unexpected scene items: {other:?}"),
    }
}

#[test]
fn missing_tracked_key_is_an_error_and_appends_nothing() {
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let mut store = MemoryStore::new();
    let update = Update::new().with_value("other", 1.0);
    assert!(applet.on_update(&update, 0.0, &mut store).is_err());
    assert_eq!(applet.window_len(), 0);
    assert!(store.get("lock/trend/a").is_none());
}

#[test]
fn store_write_is_observable_by_subscribers() {
    let mut applet = TrendApplet::new(TrendConfig::new("lock/power", "lock/trend"));
    let store = MemoryStore::new();
    let rx = store.subscribe();

    let mut writer = store.clone();
    let update = Update::new().with_value("lock/power", 4.0);
    applet.on_update(&update, 0.0, &mut writer).unwrap();

    // Three coefficient writes, three notifications.
    let keys: Vec<String> = (0..3).map(|_| rx.recv().unwrap().changed[0].clone()).collect();
    assert_eq!(keys, vec!["lock/trend/a", "lock/trend/b", "lock/trend/c"]);
}
