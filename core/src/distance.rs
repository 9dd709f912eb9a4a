use crate::coord::{parse_degrees, LatLng};
use crate::tolerance::ToleranceRadius;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in metres.
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Correct { distance_m: f64 },
    Incorrect { distance_m: f64 },
    Invalid,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Correct { .. } => "Correct! You found the location!",
            Verdict::Incorrect { .. } => "Incorrect location. Try again!",
            Verdict::Invalid => "Invalid coordinates submitted",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }
}

/// Checks a raw answer against the target. The boundary counts as a hit.
pub fn judge(target: LatLng, tolerance: ToleranceRadius, lat: &str, lon: &str) -> Verdict {
    let (Ok(lat), Ok(lon)) = (parse_degrees(lat), parse_degrees(lon)) else {
        return Verdict::Invalid;
    };
    let distance_m = haversine_m(target, LatLng { lat, lng: lon });
    if distance_m <= tolerance.meters() {
        Verdict::Correct { distance_m }
    } else {
        Verdict::Incorrect { distance_m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_m(at(0.0, 0.0), at(1.0, 0.0));
        assert!((d - 111_194.93).abs() < 1.0, "{d}");
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine_m(at(48.85, 2.29), at(48.85, 2.29)), 0.0);
    }

    #[test]
    fn judge_uses_tolerance() {
        let target = at(48.8584, 2.2945);
        let radius = ToleranceRadius::from_meters(100.0).unwrap();
        assert!(judge(target, radius, "48.8585", "2.2946").is_correct());
        let far = judge(target, radius, "48.8700", "2.2945");
        assert!(matches!(far, Verdict::Incorrect { distance_m } if distance_m > 1000.0));
        assert_eq!(far.message(), "Incorrect location. Try again!");
        assert_eq!(judge(target, radius, "north", "2.0"), Verdict::Invalid);
        assert_eq!(Verdict::Invalid.message(), "Invalid coordinates submitted");
    }
}
