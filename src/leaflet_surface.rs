use geo_challenge_core::{CircleStyle, LatLng, LatLngBounds, MapSurface, ToleranceRadius};
use wasm_bindgen::JsValue;

use crate::leaflet::{self, Circle, Map, Marker};

pub(crate) struct LeafletSurface {
    map: Map,
}

impl LeafletSurface {
    pub(crate) fn new(map: Map) -> Self {
        Self { map }
    }
}

impl MapSurface for LeafletSurface {
    type Marker = Marker;
    type Overlay = Circle;

    fn add_marker(&mut self, at: LatLng) -> Marker {
        let marker = leaflet::new_marker(&leaflet::lat_lng(at));
        marker.add_to(&self.map);
        marker
    }

    fn move_marker(&mut self, marker: &Marker, at: LatLng) {
        marker.set_lat_lng(&leaflet::lat_lng(at));
    }

    fn add_circle(&mut self, center: LatLng, radius: ToleranceRadius, style: &CircleStyle) -> Circle {
        let options = leaflet::options(&[
            ("radius", JsValue::from_f64(radius.meters())),
            ("color", JsValue::from_str(&style.color)),
            ("fillColor", JsValue::from_str(&style.fill_color)),
            ("fillOpacity", JsValue::from_f64(style.fill_opacity)),
        ]);
        let circle = leaflet::new_circle(&leaflet::lat_lng(center), &options);
        circle.add_to(&self.map);
        circle
    }

    fn remove_overlay(&mut self, overlay: Circle) {
        self.map.remove_layer(&overlay);
    }

    fn recenter(&mut self, center: LatLng) {
        let zoom = self.map.get_zoom();
        self.map.set_view(&leaflet::lat_lng(center), zoom);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.map.fit_bounds(&leaflet::bounds(bounds));
    }
}
