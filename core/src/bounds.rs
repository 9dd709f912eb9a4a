use serde::{Deserialize, Serialize};

use crate::coord::LatLng;

/// Axis-aligned box in degrees, as reported by a geocoder result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Accepts corners in any order.
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng {
                lat: a.lat.min(b.lat),
                lng: a.lng.min(b.lng),
            },
            north_east: LatLng {
                lat: a.lat.max(b.lat),
                lng: a.lng.max(b.lng),
            },
        }
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south() + self.north()) * 0.5,
            lng: (self.west() + self.east()) * 0.5,
        }
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south()
            && point.lat <= self.north()
            && point.lng >= self.west()
            && point.lng <= self.east()
    }

    pub fn contains_bounds(&self, other: &LatLngBounds) -> bool {
        self.contains(other.south_west) && self.contains(other.north_east)
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }

    #[test]
    fn corners_are_normalised() {
        let bounds = LatLngBounds::from_corners(at(5.0, 10.0), at(-5.0, -10.0));
        assert_eq!(bounds.south_west, at(-5.0, -10.0));
        assert_eq!(bounds.north_east, at(5.0, 10.0));
        assert_eq!(bounds.center(), at(0.0, 0.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = LatLngBounds::from_corners(at(0.0, 0.0), at(1.0, 1.0));
        assert!(bounds.contains(at(0.0, 1.0)));
        assert!(!bounds.contains(at(1.1, 0.5)));
        let mut grown = bounds;
        grown.extend(at(2.0, -1.0));
        assert!(grown.contains_bounds(&bounds));
        assert!(!bounds.contains_bounds(&grown));
    }
}
