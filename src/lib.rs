//! Map widgets for the geo challenge admin forms, compiled to wasm and
//! driven from the plugin's create and update scripts.

mod boot;
mod dom_form;
mod leaflet;
mod leaflet_surface;
mod mount;
mod mount_config;
mod submission_links;

use geo_challenge_core::distance::{judge, Verdict};
use geo_challenge_core::{LatLng, ToleranceRadius, WidgetMode};
use wasm_bindgen::prelude::*;

/// Mounts the create-form widget into `#map-create` once Leaflet is loaded.
/// `config_json` is an optional partial `WidgetConfig` overlay.
#[wasm_bindgen(js_name = mountCreateMap)]
pub fn mount_create_map(config_json: Option<String>) {
    start(WidgetMode::Create, config_json.as_deref());
}

/// Mounts the update-form widget into `#map-update` once Leaflet is loaded.
#[wasm_bindgen(js_name = mountUpdateMap)]
pub fn mount_update_map(config_json: Option<String>) {
    start(WidgetMode::Update, config_json.as_deref());
}

/// `"idle"`, `"pending"` or `"mounted"`.
#[wasm_bindgen(js_name = mapWidgetState)]
pub fn map_widget_state(mount_id: &str) -> String {
    if mount::is_mounted(mount_id) {
        "mounted".to_string()
    } else if mount::is_pending(mount_id) {
        "pending".to_string()
    } else {
        "idle".to_string()
    }
}

/// Current marker position of a mounted widget as `[lat, lng]`.
#[wasm_bindgen(js_name = mapWidgetPosition)]
pub fn map_widget_position(mount_id: &str) -> Option<Vec<f64>> {
    mount::mounted_position(mount_id).map(|pos| vec![pos.lat, pos.lng])
}

#[wasm_bindgen(js_name = formatSubmission)]
pub fn format_submission(value: &str) -> String {
    geo_challenge_core::submission::format_submission(value)
}

/// Verdict text for a player's answer. An unreadable target or radius counts
/// as an invalid submission.
#[wasm_bindgen(js_name = checkAnswer)]
pub fn check_answer(
    target_lat: f64,
    target_lng: f64,
    tolerance: &str,
    lat: &str,
    lng: &str,
) -> String {
    let verdict = match (LatLng::new(target_lat, target_lng), ToleranceRadius::parse(tolerance)) {
        (Ok(target), Some(radius)) => judge(target, radius, lat, lng),
        _ => Verdict::Invalid,
    };
    verdict.message().to_string()
}

/// True for form fields injected by map controls, which the server drops
/// before saving a challenge.
#[wasm_bindgen(js_name = isMapControlField)]
pub fn is_map_control_field(name: &str) -> bool {
    geo_challenge_core::payload::is_map_control_field(name)
}

#[wasm_bindgen(js_name = decorateSubmissionLinks)]
pub fn decorate_submission_links() -> u32 {
    web_sys::window()
        .and_then(|window| window.document())
        .map(|document| submission_links::decorate(&document))
        .unwrap_or(0)
}

#[wasm_bindgen(js_name = watchSubmissionLinks)]
pub fn watch_submission_links() -> bool {
    decorate_submission_links();
    submission_links::watch()
}

#[wasm_bindgen(js_name = unwatchSubmissionLinks)]
pub fn unwatch_submission_links() -> bool {
    submission_links::stop_watching()
}

fn start(mode: WidgetMode, config_json: Option<&str>) {
    let config = mount_config::load_widget_config(mode, config_json);
    mount::mount(config);
}
