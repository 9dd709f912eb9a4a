use thiserror::Error;

use crate::coord::{parse_degrees, CoordError, LatLng};

const LAT_PREFIX: &str = "lat:";
const LON_SEPARATOR: &str = ",lon:";
const PIN: &str = "📍";
const OSM_LINK_ZOOM: u8 = 15;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("submission does not match lat:<lat>,lon:<lon>")]
    Shape,
    #[error(transparent)]
    Coordinate(#[from] CoordError),
}

/// Stored form of a player's answer, e.g. `lat:48.85,lon:2.35`.
pub fn encode_submission(lat: &str, lon: &str) -> String {
    format!("{LAT_PREFIX}{lat}{LON_SEPARATOR}{lon}")
}

pub fn parse_submission(value: &str) -> Result<LatLng, SubmissionError> {
    let rest = value.strip_prefix(LAT_PREFIX).ok_or(SubmissionError::Shape)?;
    let (lat, lon) = rest.split_once(LON_SEPARATOR).ok_or(SubmissionError::Shape)?;
    let lat = parse_degrees(lat)?;
    let lon = parse_degrees(lon)?;
    Ok(LatLng::new(lat, lon)?)
}

/// Text shown to admins for a stored submission. Anything that does not
/// parse is echoed behind the pin.
pub fn format_submission(value: &str) -> String {
    match parse_submission(value) {
        Ok(pos) => format!("{PIN} Latitude: {:.6}, Longitude: {:.6}", pos.lat, pos.lng),
        Err(_) => format!("{PIN} {value}"),
    }
}

pub fn osm_link(pos: LatLng) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={}&mlon={}&zoom={OSM_LINK_ZOOM}",
        pos.lat, pos.lng
    )
}

/// Link target for a cell whose whole text is a stored submission.
pub fn submission_link(text: &str) -> Option<String> {
    parse_submission(text.trim()).ok().map(osm_link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_parse() {
        let raw = encode_submission("48.8584", "2.2945");
        assert_eq!(raw, "lat:48.8584,lon:2.2945");
        let pos = parse_submission(&raw).unwrap();
        assert_eq!(pos, LatLng { lat: 48.8584, lng: 2.2945 });
    }

    #[test]
    fn parse_rejects_other_shapes() {
        assert_eq!(parse_submission("48.8,2.3"), Err(SubmissionError::Shape));
        assert_eq!(parse_submission("lat:48.8;lon:2.3"), Err(SubmissionError::Shape));
        assert!(matches!(
            parse_submission("lat:abc,lon:2.3"),
            Err(SubmissionError::Coordinate(CoordError::Unparsable(_)))
        ));
        assert!(matches!(
            parse_submission("lat:123,lon:2.3"),
            Err(SubmissionError::Coordinate(CoordError::LatitudeOutOfRange(_)))
        ));
    }

    #[test]
    fn format_rounds_to_six_digits() {
        assert_eq!(
            format_submission("lat:48.858370123,lon:2.294481"),
            "📍 Latitude: 48.858370, Longitude: 2.294481"
        );
        assert_eq!(format_submission("somewhere"), "📍 somewhere");
        assert_eq!(format_submission("lat:x,lon:y"), "📍 lat:x,lon:y");
    }

    #[test]
    fn link_points_at_openstreetmap() {
        assert_eq!(
            submission_link(" lat:-33.5,lon:151 ").as_deref(),
            Some("https://www.openstreetmap.org/?mlat=-33.5&mlon=151&zoom=15")
        );
        assert_eq!(submission_link("Incorrect"), None);
    }
}
