use geo_challenge_core::{WidgetConfig, WidgetMode};

pub(crate) const CONFIG_ATTRIBUTE: &str = "data-map-config";

/// Resolves the widget config: explicit JSON from the caller first, then the
/// mount element's `data-map-config` attribute, then the preset for `mode`.
/// Invalid JSON is reported and skipped.
pub(crate) fn load_widget_config(mode: WidgetMode, explicit: Option<&str>) -> WidgetConfig {
    let preset = WidgetConfig::preset(mode);
    if let Some(config) = non_empty(explicit).and_then(|raw| overlay(&preset, raw, "argument")) {
        return pin_mode(config, mode);
    }
    let attribute = config_attribute(&preset.mount_id);
    if let Some(config) = non_empty(attribute.as_deref())
        .and_then(|raw| overlay(&preset, raw, CONFIG_ATTRIBUTE))
    {
        return pin_mode(config, mode);
    }
    preset
}

fn overlay(preset: &WidgetConfig, raw: &str, source: &str) -> Option<WidgetConfig> {
    match WidgetConfig::overlay_json(preset, raw) {
        Ok(config) => Some(config),
        Err(err) => {
            gloo::console::warn!("geo map: ignoring config from", source, err.to_string());
            None
        }
    }
}

// Mount functions are per mode; a config cannot switch a create form to
// update behaviour.
fn pin_mode(mut config: WidgetConfig, mode: WidgetMode) -> WidgetConfig {
    config.mode = mode;
    config
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|raw| !raw.is_empty())
}

fn config_attribute(mount_id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .get_element_by_id(mount_id)?
        .get_attribute(CONFIG_ATTRIBUTE)
}
