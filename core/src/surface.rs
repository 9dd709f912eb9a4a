use crate::bounds::LatLngBounds;
use crate::config::CircleStyle;
use crate::coord::LatLng;
use crate::tolerance::ToleranceRadius;

/// What the widget needs from a mapping library.
///
/// Handles returned by `add_marker` and `add_circle` are owned by the widget;
/// an implementation must not hand out the same overlay twice.
pub trait MapSurface {
    type Marker;
    type Overlay;

    fn add_marker(&mut self, at: LatLng) -> Self::Marker;
    fn move_marker(&mut self, marker: &Self::Marker, at: LatLng);
    fn add_circle(
        &mut self,
        center: LatLng,
        radius: ToleranceRadius,
        style: &CircleStyle,
    ) -> Self::Overlay;
    fn remove_overlay(&mut self, overlay: Self::Overlay);
    /// Pans to `center` keeping the current zoom.
    fn recenter(&mut self, center: LatLng);
    fn fit_bounds(&mut self, bounds: LatLngBounds);
}

/// The form fields the widget reads and writes.
pub trait CoordinateForm {
    fn latitude(&self) -> String;
    fn longitude(&self) -> String;
    fn tolerance(&self) -> String;
    fn set_latitude(&mut self, value: &str);
    fn set_longitude(&mut self, value: &str);

    fn write_position(&mut self, position: LatLng) {
        self.set_latitude(&position.formatted_lat());
        self.set_longitude(&position.formatted_lng());
    }
}
