use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::coord::{CoordError, LatLng};

pub const CREATE_MOUNT_ID: &str = "map-create";
pub const UPDATE_MOUNT_ID: &str = "map-update";

pub const WORLD_ZOOM: f64 = 2.0;
pub const DETAIL_ZOOM: f64 = 13.0;
pub const DEFAULT_MAX_ZOOM: u8 = 19;
pub const READINESS_POLL_MS: u32 = 100;

const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const ESRI_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const ESRI_ATTRIBUTION: &str = "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid widget config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("mount id must not be empty")]
    EmptyMountId,
    #[error("at least one base layer is required")]
    NoBaseLayers,
    #[error("poll interval must be positive")]
    ZeroPollInterval,
    #[error("zoom {0} outside [0, 19]")]
    ZoomOutOfRange(f64),
    #[error("view center: {0}")]
    CenterOutOfRange(#[source] CoordError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetMode {
    /// No position yet; the marker appears on the first interaction.
    Create,
    /// Position comes from the pre-filled form; the marker exists from the start.
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            color: "green".to_string(),
            fill_color: "#3f3".to_string(),
            fill_opacity: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNames {
    pub latitude_id: String,
    pub longitude_id: String,
    pub tolerance_name: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            latitude_id: "latitude".to_string(),
            longitude_id: "longitude".to_string(),
            tolerance_name: "tolerance_radius".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    pub poll_interval_ms: u32,
    /// `None` keeps polling until the map library shows up.
    pub max_attempts: Option<u32>,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: READINESS_POLL_MS,
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub mode: WidgetMode,
    pub mount_id: String,
    /// Create mode uses the whole view; update mode only takes the zoom and
    /// centres on the stored position.
    pub view: MapView,
    /// The first layer is active on load.
    pub base_layers: Vec<BaseLayer>,
    pub circle: CircleStyle,
    pub fields: FieldNames,
    pub readiness: ReadinessConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::create()
    }
}

impl WidgetConfig {
    pub fn create() -> Self {
        Self {
            mode: WidgetMode::Create,
            mount_id: CREATE_MOUNT_ID.to_string(),
            view: MapView {
                center: LatLng::ORIGIN,
                zoom: WORLD_ZOOM,
            },
            base_layers: default_base_layers(),
            circle: CircleStyle::default(),
            fields: FieldNames::default(),
            readiness: ReadinessConfig::default(),
        }
    }

    pub fn update() -> Self {
        Self {
            mode: WidgetMode::Update,
            mount_id: UPDATE_MOUNT_ID.to_string(),
            view: MapView {
                center: LatLng::ORIGIN,
                zoom: DETAIL_ZOOM,
            },
            ..Self::create()
        }
    }

    pub fn preset(mode: WidgetMode) -> Self {
        match mode {
            WidgetMode::Create => Self::create(),
            WidgetMode::Update => Self::update(),
        }
    }

    /// Overlays a partial JSON object on top of `base`. Keys missing from
    /// `raw` keep the base value, nested objects merge key by key and arrays
    /// replace wholesale.
    pub fn overlay_json(base: &WidgetConfig, raw: &str) -> Result<Self, ConfigError> {
        let overlay: Value = serde_json::from_str(raw)?;
        let mut merged = serde_json::to_value(base)?;
        merge_json(&mut merged, overlay);
        let config: WidgetConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mount_id.trim().is_empty() {
            return Err(ConfigError::EmptyMountId);
        }
        if self.base_layers.is_empty() {
            return Err(ConfigError::NoBaseLayers);
        }
        if self.readiness.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        let zoom = self.view.zoom;
        if !zoom.is_finite() || zoom < 0.0 || zoom > f64::from(DEFAULT_MAX_ZOOM) {
            return Err(ConfigError::ZoomOutOfRange(zoom));
        }
        let center = self.view.center;
        LatLng::new(center.lat, center.lng).map_err(ConfigError::CenterOutOfRange)?;
        Ok(())
    }

    /// Initial viewport given the position known at mount time.
    pub fn initial_view(&self, position: Option<LatLng>) -> MapView {
        match (self.mode, position) {
            (WidgetMode::Update, Some(center)) => MapView {
                center,
                zoom: self.view.zoom,
            },
            _ => self.view,
        }
    }
}

pub fn default_base_layers() -> Vec<BaseLayer> {
    vec![
        BaseLayer {
            name: "Street Map".to_string(),
            url_template: OSM_TILES.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            max_zoom: DEFAULT_MAX_ZOOM,
        },
        BaseLayer {
            name: "Satellite".to_string(),
            url_template: ESRI_TILES.to_string(),
            attribution: ESRI_ATTRIBUTION.to_string(),
            max_zoom: DEFAULT_MAX_ZOOM,
        },
    ]
}

fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
