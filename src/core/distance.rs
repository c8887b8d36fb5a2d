use crate::models::GeoPoint;

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `from` - First point
/// * `to` - Second point
///
/// # Returns
/// Great-circle distance in kilometers on a sphere of radius [`EARTH_RADIUS_KM`]
#[inline]
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let delta_lat = lat2 - lat1;
    let delta_lon = lon2 - lon1;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::HaversineDistance;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_one_degree_at_equator() {
        let distance = haversine_distance(point(0.0, 0.0), point(0.0, 1.0));
        assert!((distance - 111.19).abs() < 0.01, "Expected ~111.19km, got {}", distance);
    }

    #[test]
    fn test_london_to_new_york_fixture() {
        let london = point(51.5007, 0.1246);
        let new_york = point(40.6892, 74.0445);

        let distance = haversine_distance(london, new_york);
        assert!((distance - 5574.0).abs() < 5.0, "Expected ~5574km, got {}", distance);
    }

    #[test]
    fn test_same_point_is_zero() {
        for &(lat, lon) in &[(0.0, 0.0), (90.0, 0.0), (-90.0, 180.0), (40.7128, -74.0060)] {
            let p = point(lat, lon);
            assert!(haversine_distance(p, p).abs() < 1e-9);
        }
    }

    #[test]
    fn test_symmetric() {
        let a = point(-33.8688, 151.2093);
        let b = point(35.6762, 139.6503);
        assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
    }

    #[test]
    fn test_across_antimeridian_is_short() {
        let distance = haversine_distance(point(0.0, 179.5), point(0.0, -179.5));
        assert!((distance - 111.19).abs() < 0.01, "Got {}", distance);
    }

    #[test]
    fn test_agrees_with_geo_crate() {
        // geo uses the IUGG mean radius (6371.0088 km), so allow for the scale difference
        let a = point(48.8566, 2.3522);
        let b = point(52.5200, 13.4050);

        let ours = haversine_distance(a, b);
        let theirs = geo::Point::from(a).haversine_distance(&geo::Point::from(b)) / 1000.0;
        assert!((ours - theirs).abs() < 0.01, "ours={} geo={}", ours, theirs);
    }
}
