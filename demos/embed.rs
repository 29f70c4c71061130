//! Headless embedding walkthrough
//!
//! Wires the widget to the in-memory host, places two markers and clears
//! them again, printing what a real viewer would render. Run with
//! `RUST_LOG=info cargo run --example embed`.

use pinpoint::prelude::*;

/// A host toolkit that narrates every call to stdout
#[derive(Default)]
struct ConsoleUi {
    next_id: ComponentId,
}

impl UiHost for ConsoleUi {
    fn create_button(&mut self, spec: &ButtonSpec) -> ComponentId {
        self.next_id += 1;
        println!("[ui] button #{} ({})", self.next_id, spec.tooltip);
        self.next_id
    }

    fn create_panel(&mut self, view: &PanelView) -> ComponentId {
        self.next_id += 1;
        println!("[ui] panel #{} \"{}\"", self.next_id, view.title);
        for (code, name) in &view.crs_options {
            let marker = if *code == view.selected_crs { "*" } else { " " };
            println!("[ui]   {marker} {name} ({code})");
        }
        self.next_id
    }

    fn mount(&mut self, component: ComponentId, target: &AttachTarget) {
        println!("[ui] mount #{component} -> {target:?}");
    }

    fn unmount(&mut self, component: ComponentId) {
        println!("[ui] unmount #{component}");
    }

    fn set_dms_visible(&mut self, panel: ComponentId, visible: bool) {
        println!("[ui] panel #{panel} DMS section visible: {visible}");
    }

    fn navigation_target(&self) -> Option<String> {
        Some("nav".to_string())
    }

    fn has_element(&self, id: &str) -> bool {
        id == "nav"
    }
}

fn print_layer(map: &SharedMap) {
    let guard = map.lock().unwrap();
    for layer in guard.layers() {
        let layer = layer.lock().unwrap();
        println!("[map] layer {}", layer.options());
        if let Some(markers) = layer.as_any().downcast_ref::<MarkerLayer>() {
            for feature in markers.features() {
                let label = feature
                    .property("label")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                println!(
                    "[map]   {} at ({:.1}, {:.1})\n        {}",
                    feature.id,
                    feature.geometry.x(),
                    feature.geometry.y(),
                    label.replace('\n', " | ")
                );
            }
        }
    }
}

fn main() -> pinpoint::Result<()> {
    env_logger::init();

    let config: FinderConfig = serde_json::from_str(
        r#"{
            "button_text": "Find coordinates",
            "extra_crs": ["EPSG:3021"],
            "crs_names": { "EPSG:3021": "RT90 2.5 gon V" },
            "log_level": "info"
        }"#,
    )?;

    let map = MemoryMap::new("EPSG:3857").shared();
    let probe_map = map.clone();
    let bindings = HostBindings {
        map_access: MapAccess::new().with_probe(move || Some(probe_map.clone())),
        transform_utility: None,
    };

    let mut finder = CoordinateFinder::new(config, bindings);
    let mut ui = ConsoleUi::default();
    finder.on_add(&mut ui)?;

    finder.handle_button_click(&mut ui);
    finder.handle_panel_event(PanelEvent::CrsSelected("EPSG:4326".to_string()), &mut ui);

    // a DMS entry for central Gothenburg
    if let Some(panel) = finder.panel_mut() {
        panel.latitude.degrees = "57".to_string();
        panel.latitude.minutes = "42".to_string();
        panel.latitude.seconds = "13.8".to_string();
        panel.longitude.degrees = "11".to_string();
        panel.longitude.minutes = "58".to_string();
        panel.longitude.seconds = "30".to_string();
        panel.label_field = "harbor".to_string();
    }
    let outcome = finder.handle_panel_event(PanelEvent::Find, &mut ui);
    println!("[demo] first placement: {outcome:?}");

    // a plain decimal entry
    if let Some(panel) = finder.panel_mut() {
        panel.latitude = DmsFieldGroup::default();
        panel.longitude = DmsFieldGroup::default();
        panel.x_field = "18.063".to_string();
        panel.y_field = "59.334".to_string();
        panel.label_field.clear();
    }
    let outcome = finder.handle_panel_event(PanelEvent::Find, &mut ui);
    println!("[demo] second placement: {outcome:?}");

    print_layer(&map);
    if let Some(view) = map.lock().unwrap().view() {
        let view = view.lock().unwrap();
        println!(
            "[map] view centered at ({:.1}, {:.1}), zoom {}",
            view.center().x,
            view.center().y,
            view.zoom()
        );
    }

    finder.handle_panel_event(PanelEvent::Clear, &mut ui);
    println!("[demo] after clear, next sequence number: {}", finder.counter());
    finder.handle_panel_event(PanelEvent::Close, &mut ui);

    Ok(())
}
