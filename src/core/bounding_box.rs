use crate::core::distance::EARTH_RADIUS_KM;
use crate::models::{BoundingBox, GeoPoint};

/// Calculate a bounding box around a center point
///
/// Every point whose haversine distance from `center` is at most `radius_km`
/// lies inside the returned box. The box is a superset: its corners are
/// farther away than the radius, so exact membership needs a distance check.
///
/// The longitude half-width is `asin(sin(d) / cos(lat))`, which widens the
/// box as meridians converge towards the poles.
///
/// Singular cases:
/// * If the circle reaches over a pole (any positive radius at ±90° included)
///   the latitude range is clamped to [-90, 90] and all longitudes are covered.
/// * If the box crosses the antimeridian its longitudes are wrapped back into
///   [-180, 180] and `min_lon > max_lon` (see [`BoundingBox::is_wrapped`]).
///
/// `radius_km` must be non-negative. A zero radius yields a point box.
pub fn calculate_bounding_box(center: GeoPoint, radius_km: f64) -> BoundingBox {
    let lat = center.latitude();
    let lon = center.longitude();
    let dist = radius_km / EARTH_RADIUS_KM;

    // Bounds are offsets from the center in degrees so a zero radius
    // reproduces the center exactly
    let dist_deg = dist.to_degrees();
    let min_lat = lat - dist_deg;
    let max_lat = lat + dist_deg;

    if min_lat < -90.0 || max_lat > 90.0 {
        return BoundingBox {
            min_lat: min_lat.max(-90.0),
            max_lat: max_lat.min(90.0),
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    // Rounding can push the ratio just past 1 when the circle touches a pole
    let delta_lon = (dist.sin() / lat.to_radians().cos())
        .min(1.0)
        .asin()
        .to_degrees();

    let mut min_lon = lon - delta_lon;
    let mut max_lon = lon + delta_lon;
    if min_lon < -180.0 {
        min_lon += 360.0;
    }
    if max_lon > 180.0 {
        max_lon -= 360.0;
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}
