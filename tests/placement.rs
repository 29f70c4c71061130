//! End-to-end placement scenarios against the in-memory host

use pinpoint::prelude::*;
use std::sync::Mutex as StdMutex;

/// Minimal host toolkit that records what the widget asked for
#[derive(Default)]
struct StubUi {
    next_id: ComponentId,
    mounted: Vec<(ComponentId, AttachTarget)>,
    unmounted: Vec<ComponentId>,
    dms_toggles: Vec<bool>,
    navigation: Option<String>,
    elements: Vec<String>,
}

impl UiHost for StubUi {
    fn create_button(&mut self, _spec: &ButtonSpec) -> ComponentId {
        self.next_id += 1;
        self.next_id
    }

    fn create_panel(&mut self, _view: &PanelView) -> ComponentId {
        self.next_id += 1;
        self.next_id
    }

    fn mount(&mut self, component: ComponentId, target: &AttachTarget) {
        self.mounted.push((component, target.clone()));
    }

    fn unmount(&mut self, component: ComponentId) {
        self.unmounted.push(component);
    }

    fn set_dms_visible(&mut self, _panel: ComponentId, visible: bool) {
        self.dms_toggles.push(visible);
    }

    fn navigation_target(&self) -> Option<String> {
        self.navigation.clone()
    }

    fn has_element(&self, id: &str) -> bool {
        self.elements.iter().any(|existing| existing == id)
    }
}

fn silent_config() -> FinderConfig {
    FinderConfig {
        log_level: LogLevel::Silent,
        ..FinderConfig::default()
    }
}

fn finder_with_map(config: FinderConfig, view_projection: &str) -> (CoordinateFinder, SharedMap) {
    let map = MemoryMap::new(view_projection).shared();
    let probe_map = map.clone();
    let bindings = HostBindings {
        map_access: MapAccess::new().with_probe(move || Some(probe_map.clone())),
        transform_utility: None,
    };
    (CoordinateFinder::new(config, bindings), map)
}

fn marker_features(map: &SharedMap) -> Vec<MarkerFeature> {
    let guard = map.lock().unwrap();
    let layers = guard.layers();
    assert_eq!(layers.len(), 1, "expected exactly one marker layer");
    let layer = layers[0].lock().unwrap();
    layer
        .as_any()
        .downcast_ref::<MarkerLayer>()
        .unwrap()
        .features()
        .to_vec()
}

#[test]
fn full_session_through_panel_events() {
    let (mut finder, map) = finder_with_map(silent_config(), "EPSG:3857");
    let mut ui = StubUi {
        navigation: Some("nav".to_string()),
        elements: vec!["nav".to_string()],
        ..StubUi::default()
    };

    finder.on_add(&mut ui).unwrap();
    assert_eq!(ui.mounted.len(), 1, "toolbar button mounted");
    assert_eq!(finder.button_id(), Some(ui.mounted[0].0));

    finder.handle_button_click(&mut ui);
    assert!(finder.is_panel_open());
    finder.handle_panel_event(PanelEvent::CrsSelected("EPSG:4326".to_string()), &mut ui);
    assert_eq!(finder.active_crs(), "EPSG:4326");
    assert_eq!(ui.dms_toggles, vec![true]);

    // first placement: DMS entry
    {
        let panel = finder.panel_mut().unwrap();
        panel.latitude.degrees = "57".to_string();
        panel.latitude.minutes = "42".to_string();
        panel.latitude.seconds = "13.8".to_string();
        panel.longitude.degrees = "11".to_string();
        panel.longitude.minutes = "58".to_string();
        panel.longitude.seconds = "30".to_string();
        panel.label_field = "harbor".to_string();
    }
    let outcome = finder
        .handle_panel_event(PanelEvent::Find, &mut ui)
        .unwrap();
    assert_eq!(
        outcome,
        PlacementOutcome::Placed {
            feature_id: "coordinate-1".to_string(),
            centered: true,
        }
    );

    // second placement: projected fields, DMS left blank
    {
        let panel = finder.panel_mut().unwrap();
        panel.latitude = DmsFieldGroup::default();
        panel.longitude = DmsFieldGroup::default();
        panel.x_field = "15.0".to_string();
        panel.y_field = "60.0".to_string();
        panel.label_field.clear();
    }
    let outcome = finder
        .handle_panel_event(PanelEvent::Find, &mut ui)
        .unwrap();
    assert!(matches!(outcome, PlacementOutcome::Placed { .. }));

    let features = marker_features(&map);
    assert_eq!(features.len(), 2);
    let label = features[0].property("label").and_then(|v| v.as_str()).unwrap();
    assert!(label.starts_with("1\nharbor\n"));
    let label = features[1].property("label").and_then(|v| v.as_str()).unwrap();
    assert!(label.starts_with("2\n"));
    assert_eq!(finder.counter(), 3);

    // clearing detaches the layer and resets the sequence
    finder.handle_panel_event(PanelEvent::Clear, &mut ui);
    assert_eq!(finder.counter(), 1);
    assert!(map.lock().unwrap().layers().is_empty());

    // closing releases everything the panel registered
    finder.handle_panel_event(PanelEvent::Close, &mut ui);
    assert!(!finder.is_panel_open());
    assert_eq!(ui.unmounted.len(), 1);
}

#[test]
fn feature_geometry_lands_in_rendering_target_system() {
    let (mut finder, map) = finder_with_map(silent_config(), "EPSG:3857");
    let mut ui = StubUi::default();
    finder.select_crs("EPSG:4326", &mut ui);

    finder.place(&CoordinateInput {
        x: Some(15.0),
        y: Some(60.0),
        ..CoordinateInput::default()
    });

    let features = marker_features(&map);
    let geometry = features[0].geometry;
    assert!((geometry.x() - 1_669_792.36).abs() < 1.0);
    assert!((geometry.y() - 8_399_737.89).abs() < 1.0);

    let view = map.lock().unwrap().view().unwrap();
    let guard = view.lock().unwrap();
    assert!((guard.center().x - 1_669_792.36).abs() < 1.0);
    assert_eq!(guard.zoom(), 20.0);
}

#[test]
fn centering_converts_into_a_differing_view_system() {
    // the view runs in geographic coordinates while markers are stored in
    // Web Mercator
    let (mut finder, map) = finder_with_map(silent_config(), "EPSG:4326");
    let mut ui = StubUi::default();
    finder.select_crs("EPSG:4326", &mut ui);

    let outcome = finder.place(&CoordinateInput {
        x: Some(15.0),
        y: Some(60.0),
        ..CoordinateInput::default()
    });
    assert!(matches!(
        outcome,
        PlacementOutcome::Placed { centered: true, .. }
    ));

    // stored geometry stays in the rendering target system
    let features = marker_features(&map);
    assert!(features[0].geometry.x() > 1_000_000.0);

    // the view center is back in degrees
    let view = map.lock().unwrap().view().unwrap();
    let center = view.lock().unwrap().center();
    assert!((center.x - 15.0).abs() < 1e-6);
    assert!((center.y - 60.0).abs() < 1e-6);
}

#[test]
fn marker_survives_centering_failure() {
    let map = MemoryMap::without_view().shared();
    let probe_map = map.clone();
    let bindings = HostBindings {
        map_access: MapAccess::new().with_probe(move || Some(probe_map.clone())),
        transform_utility: None,
    };
    let mut finder = CoordinateFinder::new(silent_config(), bindings);
    let mut ui = StubUi::default();
    finder.select_crs("EPSG:4326", &mut ui);

    let outcome = finder.place(&CoordinateInput {
        x: Some(15.0),
        y: Some(60.0),
        ..CoordinateInput::default()
    });
    assert_eq!(
        outcome,
        PlacementOutcome::Placed {
            feature_id: "coordinate-1".to_string(),
            centered: false,
        }
    );
    assert_eq!(marker_features(&map).len(), 1);
}

#[test]
fn centering_falls_back_to_a_fresh_accessor_probe() {
    // the first resolution hands out a degraded map without a view; by the
    // time centering runs, the probe serves a healthy instance
    let degraded = MemoryMap::without_view().shared();
    let healthy = MemoryMap::new("EPSG:3857").shared();

    let calls = StdMutex::new(0u32);
    let degraded_probe = degraded.clone();
    let healthy_probe = healthy.clone();
    let bindings = HostBindings {
        map_access: MapAccess::new().with_probe(move || {
            let mut count = calls.lock().unwrap();
            *count += 1;
            if *count == 1 {
                Some(degraded_probe.clone())
            } else {
                Some(healthy_probe.clone())
            }
        }),
        transform_utility: None,
    };
    let mut finder = CoordinateFinder::new(silent_config(), bindings);
    let mut ui = StubUi::default();
    finder.select_crs("EPSG:4326", &mut ui);

    let outcome = finder.place(&CoordinateInput {
        x: Some(15.0),
        y: Some(60.0),
        ..CoordinateInput::default()
    });
    assert!(matches!(
        outcome,
        PlacementOutcome::Placed { centered: true, .. }
    ));

    // the marker landed on the map that was live at placement time
    assert_eq!(marker_features(&degraded).len(), 1);
    // and the fallback centered the healthy one
    let view = healthy.lock().unwrap().view().unwrap();
    assert!(view.lock().unwrap().center().x > 1_000_000.0);
}

#[test]
fn host_transform_utility_is_tried_first() {
    let map = MemoryMap::new("EPSG:3857").shared();
    let probe_map = map.clone();
    let utility: HostTransformFn = Arc::new(|pair, _from, _to| {
        // a host that shifts everything east by one unit, to be recognizable
        Some(CoordinatePair::new(pair.x + 1.0, pair.y))
    });
    let bindings = HostBindings {
        map_access: MapAccess::new().with_probe(move || Some(probe_map.clone())),
        transform_utility: Some(utility),
    };
    let mut finder = CoordinateFinder::new(silent_config(), bindings);
    let mut ui = StubUi::default();
    finder.select_crs("EPSG:3857", &mut ui);

    finder.place(&CoordinateInput {
        x: Some(100.0),
        y: Some(50.0),
        ..CoordinateInput::default()
    });

    let features = marker_features(&map);
    assert_eq!(features[0].geometry.x(), 101.0);
    assert_eq!(features[0].geometry.y(), 50.0);
}

#[test]
fn external_layer_removal_triggers_recreation() {
    let (mut finder, map) = finder_with_map(silent_config(), "EPSG:3857");
    let mut ui = StubUi::default();
    finder.select_crs("EPSG:4326", &mut ui);

    finder.place(&CoordinateInput {
        x: Some(15.0),
        y: Some(60.0),
        ..CoordinateInput::default()
    });

    // the host drops the layer behind the widget's back
    {
        let mut guard = map.lock().unwrap();
        let layer = guard.layers()[0].clone();
        guard.remove_layer(&layer);
    }

    finder.place(&CoordinateInput {
        x: Some(16.0),
        y: Some(61.0),
        ..CoordinateInput::default()
    });

    // a fresh layer holds only the second marker, numbered where the
    // sequence left off
    let features = marker_features(&map);
    assert_eq!(features.len(), 1);
    let label = features[0].property("label").and_then(|v| v.as_str()).unwrap();
    assert!(label.starts_with("2\n"));
}
