//! Bindings for the parts of Leaflet and leaflet-control-geocoder the widget
//! touches. Everything here assumes `window.L` is loaded; callers go through
//! the readiness gate first.

use geo_challenge_core::{LatLng, LatLngBounds};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn new_map(container_id: &str) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &Array, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &Map, bounds: &Array) -> Map;

    #[wasm_bindgen(method, js_name = removeLayer)]
    pub fn remove_layer(this: &Map, layer: &Layer) -> Map;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &Function) -> Map;

    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn new_tile_layer(url_template: &str, options: &Object) -> TileLayer;

    #[wasm_bindgen(extends = Layer)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn new_marker(at: &Array) -> Marker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    pub fn set_lat_lng(this: &Marker, at: &Array) -> Marker;

    #[wasm_bindgen(extends = Layer)]
    pub type Circle;

    #[wasm_bindgen(js_namespace = L, js_name = circle)]
    pub fn new_circle(center: &Array, options: &Object) -> Circle;

    pub type Control;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Control, map: &Map) -> Control;

    #[wasm_bindgen(method, js_name = getContainer)]
    pub fn get_container(this: &Control) -> Option<web_sys::HtmlElement>;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = layers)]
    pub fn new_layers_control(base_layers: &Object) -> Control;

    #[wasm_bindgen(extends = Control)]
    pub type Geocoder;

    #[wasm_bindgen(js_namespace = ["L", "Control"], js_name = geocoder)]
    pub fn new_geocoder(options: &Object) -> Geocoder;

    #[wasm_bindgen(method)]
    pub fn on(this: &Geocoder, event: &str, handler: &Function) -> Geocoder;
}

pub fn lat_lng(pos: LatLng) -> Array {
    Array::of2(&JsValue::from_f64(pos.lat), &JsValue::from_f64(pos.lng))
}

pub fn bounds(bounds: LatLngBounds) -> Array {
    Array::of2(&lat_lng(bounds.south_west), &lat_lng(bounds.north_east))
}

pub fn options(entries: &[(&str, JsValue)]) -> Object {
    let object = Object::new();
    for (key, value) in entries {
        let _ = Reflect::set(&object, &JsValue::from_str(key), value);
    }
    object
}

pub fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_null() || value.is_undefined() {
        None
    } else {
        Some(value)
    }
}

/// Reads `{lat, lng}` from a Leaflet `LatLng` or any object shaped like one.
/// No range check; the sync layer normalises.
pub fn read_lat_lng(value: &JsValue) -> Option<(f64, f64)> {
    let lat = get(value, "lat")?.as_f64()?;
    let lng = get(value, "lng")?.as_f64()?;
    Some((lat, lng))
}

/// Reads a Leaflet `LatLngBounds`, falling back to `[[s, w], [n, e]]` arrays.
pub fn read_bounds(value: &JsValue) -> Option<LatLngBounds> {
    let (sw, ne) = match (call0(value, "getSouthWest"), call0(value, "getNorthEast")) {
        (Some(sw), Some(ne)) => (read_lat_lng(&sw)?, read_lat_lng(&ne)?),
        _ => {
            let array = value.dyn_ref::<Array>()?;
            (read_pair(&array.get(0))?, read_pair(&array.get(1))?)
        }
    };
    Some(LatLngBounds::from_corners(
        LatLng { lat: sw.0, lng: sw.1 },
        LatLng { lat: ne.0, lng: ne.1 },
    ))
}

fn read_pair(value: &JsValue) -> Option<(f64, f64)> {
    let pair = value.dyn_ref::<Array>()?;
    Some((pair.get(0).as_f64()?, pair.get(1).as_f64()?))
}

fn call0(target: &JsValue, method: &str) -> Option<JsValue> {
    let func = get(target, method)?.dyn_into::<Function>().ok()?;
    func.call0(target).ok()
}

/// True once both Leaflet and the geocoder plugin are on `window`.
pub fn library_ready() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(leaflet) = get(&window, "L") else {
        return false;
    };
    get(&leaflet, "Control")
        .and_then(|control| get(&control, "Geocoder"))
        .is_some()
}
