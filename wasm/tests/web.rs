//! Browser tests, run with `wasm-pack test --headless --firefox wasm`

#![cfg(target_arch = "wasm32")]

use olor_sustainability_wasm::storage::LocalStorageStore;
use olor_sustainability_wasm::ImpactDashboard;
use shared::storage::KeyValueStore;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TEST_CONFIG: &str = r#"{"storage": {"key": "olorImpactTest"}}"#;

fn fresh_dashboard() -> ImpactDashboard {
    let mut store = LocalStorageStore::open();
    store.set("olorImpactTest", "").unwrap();
    ImpactDashboard::new(Some(TEST_CONFIG.to_string())).unwrap()
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let mut store = LocalStorageStore::open();
    assert!(store.is_available());
    store.set("olorImpactProbe", "42").unwrap();
    assert_eq!(store.get("olorImpactProbe").unwrap().as_deref(), Some("42"));
}

#[wasm_bindgen_test]
fn input_survives_reload() {
    let mut dashboard = fresh_dashboard();
    assert!(dashboard.is_sample());
    dashboard.set_bean_kg("60").unwrap();

    let reloaded = ImpactDashboard::new(Some(TEST_CONFIG.to_string())).unwrap();
    assert!(!reloaded.is_sample());
    assert_eq!(reloaded.input_text(), "60");
}

#[wasm_bindgen_test]
fn generate_report_delivers_bytes() {
    let mut dashboard = fresh_dashboard();
    dashboard.set_bean_kg("60").unwrap();
    let render = js_sys::Function::new_with_args(
        "json",
        "JSON.parse(json); return new Uint8Array([37, 80, 68, 70]);",
    );

    let bytes = dashboard.generate_report(render).unwrap();
    assert_eq!(bytes, b"%PDF".to_vec());

    let status: serde_json::Value = serde_json::from_str(&dashboard.poll_report().unwrap()).unwrap();
    assert_eq!(status["state"], "delivered");
}

#[wasm_bindgen_test]
fn throwing_renderer_marks_failure() {
    let mut dashboard = fresh_dashboard();
    let render = js_sys::Function::new_with_args("json", "throw new Error('canvas lost');");

    assert!(dashboard.generate_report(render).is_err());
    let status: serde_json::Value = serde_json::from_str(&dashboard.poll_report().unwrap()).unwrap();
    assert_eq!(status["state"], "failed");
    assert!(status["error"].as_str().unwrap().contains("canvas lost"));
}
