//! Great-circle distance math.
//!
//! Distance computation is a pure function of two coordinates so the same
//! math backs both the radius filter and the distance reported to callers.

use crate::{AppError, AppResult};

/// Mean earth radius in kilometers.
///
/// Every distance and radius in the proximity path uses this single
/// constant; mixing earth radii between the filter and the reported
/// distance skews results by a few percent.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Validate a latitude/longitude pair.
///
/// Latitude must be within [-90, 90] and longitude within [-180, 180].
pub fn validate_coordinate(lat: f64, lng: f64) -> AppResult<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::InvalidCoordinate(format!(
            "latitude {lat} outside [-90, 90]"
        )));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::InvalidCoordinate(format!(
            "longitude {lng} outside [-180, 180]"
        )));
    }
    Ok(())
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Haversine formula over a spherical earth of [`EARTH_RADIUS_KM`].
#[must_use]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let d = haversine_km(24.6339, 73.2496, 24.6339, 73.2496);
        assert!(d < 0.001);
    }

    #[test]
    fn test_known_distances() {
        // Two points roughly a kilometer apart.
        let d = haversine_km(24.6339, 73.2496, 24.6400, 73.2550);
        assert!(d > 0.5 && d < 1.5, "expected ~1 km, got {d}");

        // A point well outside any city-scale radius.
        let d = haversine_km(24.6339, 73.2496, 24.9000, 73.9000);
        assert!(d > 60.0 && d < 75.0, "expected ~65 km, got {d}");
    }

    #[test]
    fn test_validate_coordinate() {
        assert!(validate_coordinate(0.0, 0.0).is_ok());
        assert!(validate_coordinate(-90.0, 180.0).is_ok());
        assert!(validate_coordinate(90.1, 0.0).is_err());
        assert!(validate_coordinate(0.0, -180.5).is_err());
        assert!(validate_coordinate(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_invalid_coordinate_error_code() {
        let err = validate_coordinate(91.0, 0.0);
        match err {
            Err(e) => assert_eq!(e.error_code(), "INVALID_COORDINATE"),
            Ok(()) => panic!("expected an error"),
        }
    }
}
