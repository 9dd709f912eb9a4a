pub mod bounds;
pub mod config;
pub mod coord;
pub mod distance;
pub mod gate;
pub mod payload;
pub mod submission;
pub mod surface;
pub mod sync;
pub mod tolerance;

pub use bounds::LatLngBounds;
pub use config::{CircleStyle, ConfigError, MapView, WidgetConfig, WidgetMode};
pub use coord::{format_coordinate, CoordError, LatLng, COORD_DECIMALS};
pub use gate::{GateStep, ReadinessGate};
pub use surface::{CoordinateForm, MapSurface};
pub use sync::{GeocodeResult, IgnoreReason, InitialPosition, OverlayState, PositionSync, SyncOutcome};
pub use tolerance::ToleranceRadius;
