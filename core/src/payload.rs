use std::collections::HashMap;

const CONTROL_MARKERS: &[&str] = &["leaflet", "layer"];

/// True for field names that belong to map controls rather than the
/// challenge form.
pub fn is_map_control_field(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    CONTROL_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Drops map control fields from a submitted form, returning how many were
/// removed.
pub fn strip_map_control_fields<V>(fields: &mut HashMap<String, V>) -> usize {
    let before = fields.len();
    fields.retain(|name, _| !is_map_control_field(name));
    before - fields.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leaflet_and_layer_keys() {
        let mut fields: HashMap<String, String> = [
            ("name", "Eiffel"),
            ("latitude", "48.8584"),
            ("leaflet-base-layers_42", "on"),
            ("BaseLayer", "Satellite"),
            ("tolerance_radius", "25"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(strip_map_control_fields(&mut fields), 2);
        let mut keys: Vec<_> = fields.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["latitude", "name", "tolerance_radius"]);
    }
}
