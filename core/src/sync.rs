use crate::bounds::LatLngBounds;
use crate::config::{CircleStyle, WidgetMode};
use crate::coord::LatLng;
use crate::surface::{CoordinateForm, MapSurface};
use crate::tolerance::ToleranceRadius;

/// A geocoder search result picked by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeResult {
    pub center: LatLng,
    pub bbox: LatLngBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A latitude or longitude field did not hold a valid number in range.
    UnparsableCoordinates,
    /// The map reported a NaN or infinite coordinate.
    NonFiniteMapCoordinate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    Applied(LatLng),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayState {
    Drawn(ToleranceRadius),
    Cleared,
}

/// Where the update form's stored position came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialPosition {
    None,
    Stored(LatLng),
    /// The fields did not parse; the storage default is used instead.
    Fallback(LatLng),
}

impl InitialPosition {
    pub fn resolve<F: CoordinateForm>(mode: WidgetMode, form: &F) -> Self {
        match mode {
            WidgetMode::Create => InitialPosition::None,
            WidgetMode::Update => match LatLng::parse_fields(&form.latitude(), &form.longitude()) {
                Ok(position) => InitialPosition::Stored(position),
                Err(_) => InitialPosition::Fallback(LatLng::ORIGIN),
            },
        }
    }

    pub fn position(self) -> Option<LatLng> {
        match self {
            InitialPosition::None => None,
            InitialPosition::Stored(position) | InitialPosition::Fallback(position) => {
                Some(position)
            }
        }
    }
}

struct Placed<M> {
    marker: M,
    position: LatLng,
}

/// Keeps the marker, the coordinate fields and the tolerance circle in step.
pub struct PositionSync<S: MapSurface, F: CoordinateForm> {
    mode: WidgetMode,
    surface: S,
    form: F,
    circle: CircleStyle,
    placed: Option<Placed<S::Marker>>,
    overlay: Option<S::Overlay>,
}

impl<S: MapSurface, F: CoordinateForm> PositionSync<S, F> {
    /// Creates the widget state. With an initial position the marker is
    /// placed right away and the overlay drawn.
    pub fn new(
        mode: WidgetMode,
        circle: CircleStyle,
        surface: S,
        form: F,
        initial: InitialPosition,
    ) -> Self {
        let mut sync = Self {
            mode,
            surface,
            form,
            circle,
            placed: None,
            overlay: None,
        };
        if let InitialPosition::Fallback(position) = initial {
            sync.form.write_position(position);
        }
        if let Some(position) = initial.position() {
            sync.place_marker(position);
            sync.refresh_overlay();
        }
        sync
    }

    pub fn mode(&self) -> WidgetMode {
        self.mode
    }

    pub fn position(&self) -> Option<LatLng> {
        self.placed.as_ref().map(|placed| placed.position)
    }

    pub fn has_marker(&self) -> bool {
        self.placed.is_some()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// A click on a wrapped world copy lands the marker on the primary copy,
    /// so the view follows it there. Ordinary clicks leave the view alone.
    pub fn on_map_click(&mut self, lat: f64, lng: f64) -> SyncOutcome {
        let Ok(position) = LatLng::from_map(lat, lng) else {
            return SyncOutcome::Ignored(IgnoreReason::NonFiniteMapCoordinate);
        };
        self.form.write_position(position);
        self.place_marker(position);
        self.refresh_overlay();
        if position.lng != lng {
            self.surface.recenter(position);
        }
        SyncOutcome::Applied(position)
    }

    pub fn on_geocode(&mut self, result: GeocodeResult) -> SyncOutcome {
        let center = result.center;
        let Ok(position) = LatLng::from_map(center.lat, center.lng) else {
            return SyncOutcome::Ignored(IgnoreReason::NonFiniteMapCoordinate);
        };
        self.form.write_position(position);
        self.place_marker(position);
        self.refresh_overlay();
        self.surface.fit_bounds(result.bbox);
        SyncOutcome::Applied(position)
    }

    /// Handles a committed edit of either coordinate field. A valid pair is
    /// written back in canonical form; an invalid one is left as typed.
    pub fn on_coordinates_edited(&mut self) -> SyncOutcome {
        let Ok(position) = LatLng::parse_fields(&self.form.latitude(), &self.form.longitude())
        else {
            return SyncOutcome::Ignored(IgnoreReason::UnparsableCoordinates);
        };
        self.form.write_position(position);
        self.place_marker(position);
        self.surface.recenter(position);
        self.refresh_overlay();
        SyncOutcome::Applied(position)
    }

    pub fn on_tolerance_edited(&mut self) -> OverlayState {
        self.refresh_overlay()
    }

    /// Drops the current circle and draws a new one if both a marker and a
    /// valid radius are present.
    pub fn refresh_overlay(&mut self) -> OverlayState {
        if let Some(overlay) = self.overlay.take() {
            self.surface.remove_overlay(overlay);
        }
        let Some(center) = self.position() else {
            return OverlayState::Cleared;
        };
        let Some(radius) = ToleranceRadius::parse(&self.form.tolerance()) else {
            return OverlayState::Cleared;
        };
        let overlay = self.surface.add_circle(center, radius, &self.circle);
        self.overlay = Some(overlay);
        OverlayState::Drawn(radius)
    }

    fn place_marker(&mut self, position: LatLng) {
        match self.placed.as_mut() {
            Some(placed) => {
                self.surface.move_marker(&placed.marker, position);
                placed.position = position;
            }
            None => {
                let marker = self.surface.add_marker(position);
                self.placed = Some(Placed { marker, position });
            }
        }
    }
}
