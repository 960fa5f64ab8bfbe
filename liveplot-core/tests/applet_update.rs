use dataset::Update;
use liveplot_core::{
    AppletError, PlotConfig, Scene, SceneItem, SyncState, XyApplet, POINT_SIZE,
};

fn scene(applet: &mut XyApplet, update: &Update) -> Scene {
    applet.on_update(update).unwrap().expect("scene expected")
}

#[test]
fn x_defaults_to_index_sequence() {
    let mut applet = XyApplet::new(PlotConfig::new("scan/counts")).unwrap();
    let update = Update::new().with_value("scan/counts", vec![5.0, 7.0, 9.0]);
    let scene = scene(&mut applet, &update);
    match &scene.items[0] {
        SceneItem::Points { x, y, size, connect, .. } => {
            assert_eq!(x, &[0.0, 1.0, 2.0]);
            assert_eq!(y, &[5.0, 7.0, 9.0]);
            assert_eq!(*size, POINT_SIZE);
            assert!(!connect);
        }
        other => panic!("expected points, got {other:?}"),
    }
}

#[test]
fn missing_required_y_is_an_error() {
    let mut applet = XyApplet::new(PlotConfig::new("scan/counts")).unwrap();
    let update = Update::new().with_value("other", vec![1.0]);
    match applet.on_update(&update) {
        Err(AppletError::MissingDataset(key)) => assert_eq!(key, "scan/counts"),
        other => panic!("expected MissingDataset, got {other:?}"),
    }
}

#[test]
fn configured_optional_key_is_required() {
    let mut config = PlotConfig::new("scan/counts");
    config.fit = Some("scan/fit".to_string());
    let mut applet = XyApplet::new(config).unwrap();
    let update = Update::new().with_value("scan/counts", vec![1.0, 2.0]);
    assert!(matches!(
        applet.on_update(&update),
        Err(AppletError::MissingDataset(key)) if key == "scan/fit"
    ));
}

#[test]
fn unconfigured_keys_are_simply_inactive() {
    let mut applet = XyApplet::new(PlotConfig::new("scan/counts")).unwrap();
    // No threshold/fit configured and none present: not an error, one series.
    let update = Update::new().with_value("scan/counts", vec![1.0, 2.0]);
    let scene = scene(&mut applet, &update);
    assert_eq!(scene.items.len(), 1);
}

#[test]
fn first_mismatch_skips_second_raises() {
    let mut config = PlotConfig::new("scan/counts");
    config.x = Some("scan/freq".to_string());
    let mut applet = XyApplet::new(config).unwrap();

    let update = Update::new()
        .with_value("scan/freq", vec![1.0, 2.0, 3.0])
        .with_value("scan/counts", vec![10.0, 20.0, 30.0, 40.0]);

    assert!(applet.on_update(&update).unwrap().is_none());
    assert_eq!(applet.sync_state(), SyncState::PendingSizeCheck);

    match applet.on_update(&update) {
        Err(AppletError::SizeMismatch { x_len, y_len }) => {
            assert_eq!((x_len, y_len), (3, 4));
        }
        other => panic!("expected SizeMismatch, got {other:?}"),
    }
}

#[test]
fn mismatch_then_match_redraws_and_resyncs() {
    let mut config = PlotConfig::new("scan/counts");
    config.x = Some("scan/freq".to_string());
    let mut applet = XyApplet::new(config).unwrap();

    let staggered = Update::new()
        .with_value("scan/freq", vec![1.0, 2.0])
        .with_value("scan/counts", vec![10.0, 20.0, 30.0]);
    assert!(applet.on_update(&staggered).unwrap().is_none());

    let settled = Update::new()
        .with_value("scan/freq", vec![1.0, 2.0, 3.0])
        .with_value("scan/counts", vec![10.0, 20.0, 30.0]);
    let scene = applet.on_update(&settled).unwrap().expect("redraw");
    assert_eq!(scene.items.len(), 1);
    assert_eq!(applet.sync_state(), SyncState::Synced);
}

#[test]
fn failed_cycle_leaves_pending_state_untouched() {
    let mut config = PlotConfig::new("scan/counts");
    config.x = Some("scan/freq".to_string());
    config.threshold = Some("scan/threshold".to_string());
    let mut applet = XyApplet::new(config).unwrap();

    let staggered = Update::new()
        .with_value("scan/freq", vec![1.0, 2.0])
        .with_value("scan/counts", vec![10.0, 20.0, 30.0])
        .with_value("scan/threshold", 1.0);
    assert!(applet.on_update(&staggered).unwrap().is_none());

    // Threshold disappears: MissingDataset, and the pending flag survives
    // because the cycle fails before reconciliation.
    let broken = Update::new()
        .with_value("scan/freq", vec![1.0, 2.0])
        .with_value("scan/counts", vec![10.0, 20.0, 30.0]);
    assert!(matches!(
        applet.on_update(&broken),
        Err(AppletError::MissingDataset(_))
    ));
    assert_eq!(applet.sync_state(), SyncState::PendingSizeCheck);
}

#[test]
fn threshold_renders_vline_and_two_decimal_label() {
    let mut config = PlotConfig::new("scan/counts");
    config.threshold = Some("scan/threshold".to_string());
    let mut applet = XyApplet::new(config).unwrap();

    let update = Update::new()
        .with_value("scan/counts", vec![2.0, 8.0, 4.0])
        .with_value("scan/threshold", 3.14159);
    let scene = scene(&mut applet, &update);

    assert!(matches!(scene.items[1], SceneItem::VLine { x, .. } if (x - 3.14159).abs() < 1e-12));
    match &scene.items[2] {
        SceneItem::Label { y, text, .. } => {
            assert_eq!(text, "3.14");
            // Half the maximum Y value.
            assert_eq!(*y, 4.0);
        }
        other => panic!("expected label, got {other:?}"),
    }
}

#[test]
fn fit_overlay_and_error_bars_render_in_order() {
    let mut config = PlotConfig::new("scan/counts");
    config.fit = Some("scan/fit".to_string());
    config.y_err = Some("scan/err".to_string());
    config.pen = true;
    let mut applet = XyApplet::new(config).unwrap();

    let update = Update::new()
        .with_value("scan/counts", vec![1.0, 2.0])
        .with_value("scan/fit", vec![1.1, 1.9])
        .with_value("scan/err", vec![0.1, 0.2]);
    let scene = scene(&mut applet, &update);

    assert!(matches!(&scene.items[0], SceneItem::Points { connect, .. } if *connect));
    assert!(matches!(&scene.items[1], SceneItem::ErrorBars { .. }));
    assert!(matches!(&scene.items[2], SceneItem::Line { name, .. } if name == "fit"));
}

#[test]
fn wrong_kind_is_reported() {
    let mut applet = XyApplet::new(PlotConfig::new("scan/counts")).unwrap();
    let update = Update::new().with_value("scan/counts", 1.0);
    assert!(matches!(
        applet.on_update(&update),
        Err(AppletError::WrongKind { expected: "array", .. })
    ));
}

#[test]
fn range_overrides_land_in_scene() {
    let mut config = PlotConfig::new("scan/counts");
    config.x = Some("scan/freq".to_string());
    config.xmax = Some(20.0);
    config.ymin = Some(-1.0);
    config.ymax = Some(1.0);
    config.exp_label = Some("(run 12)".to_string());
    let mut applet = XyApplet::new(config).unwrap();

    let update = Update::new()
        .with_value("scan/freq", vec![1.0, 2.0])
        .with_value("scan/counts", vec![0.5, -0.5]);
    let scene = scene(&mut applet, &update);
    assert_eq!(scene.x_range, Some((0.0, 20.0)));
    assert_eq!(scene.y_range, Some((-1.0, 1.0)));
    assert_eq!(scene.title, "scan/counts (run 12)");
}
