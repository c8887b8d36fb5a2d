// Unit tests for the geo core

use address_book::core::{
    bounding_box::calculate_bounding_box,
    distance::{haversine_distance, EARTH_RADIUS_KM},
};
use address_book::models::{BoundingBox, GeoPoint};

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

/// Point reached by travelling `distance_km` from `start` on initial `bearing_deg`
fn destination(start: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let (lat1, lon1) = start.to_radians();
    let bearing = bearing_deg.to_radians();
    let d = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * bearing.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1
        + (bearing.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat2.sin());

    let lon_deg = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    point(lat2.to_degrees().clamp(-90.0, 90.0), lon_deg)
}

/// Containment with a small tolerance and explicit ±360° handling
fn contains_within(bbox: &BoundingBox, p: GeoPoint, eps: f64) -> bool {
    let lat_ok = p.latitude() >= bbox.min_lat - eps && p.latitude() <= bbox.max_lat + eps;

    let (lo, hi) = if bbox.is_wrapped() {
        (bbox.min_lon, bbox.max_lon + 360.0)
    } else {
        (bbox.min_lon, bbox.max_lon)
    };
    let lon_ok = [p.longitude(), p.longitude() + 360.0, p.longitude() - 360.0]
        .iter()
        .any(|&lon| lon >= lo - eps && lon <= hi + eps);

    lat_ok && lon_ok
}

#[test]
fn test_haversine_distance_zero() {
    for &(lat, lon) in &[(0.0, 0.0), (51.5007, 0.1246), (-33.86, 151.2), (90.0, 0.0), (-90.0, -180.0)] {
        let p = point(lat, lon);
        assert!(haversine_distance(p, p) < 1e-9);
    }
}

#[test]
fn test_haversine_distance_symmetric() {
    let points = [
        point(0.0, 0.0),
        point(51.5007, 0.1246),
        point(40.6892, 74.0445),
        point(-45.0, 179.9),
        point(89.9, -120.0),
    ];

    for &a in &points {
        for &b in &points {
            assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
        }
    }
}

#[test]
fn test_haversine_known_fixtures() {
    let equator = haversine_distance(point(0.0, 0.0), point(0.0, 1.0));
    assert!((equator - 111.19).abs() < 0.01, "Got {}", equator);

    let london_new_york = haversine_distance(point(51.5007, 0.1246), point(40.6892, 74.0445));
    assert!((london_new_york - 5574.0).abs() < 5.0, "Got {}", london_new_york);
}

#[test]
fn test_haversine_antipodes() {
    let distance = haversine_distance(point(0.0, 0.0), point(0.0, 180.0));
    let half_circumference = EARTH_RADIUS_KM * std::f64::consts::PI;
    assert!((distance - half_circumference).abs() < 1e-6);
}

#[test]
fn test_bounding_box_zero_radius() {
    let center = point(-33.8688, 151.2093);
    let bbox = calculate_bounding_box(center, 0.0);

    assert!((bbox.min_lat - center.latitude()).abs() < 1e-9);
    assert!((bbox.max_lat - center.latitude()).abs() < 1e-9);
    assert!((bbox.min_lon - center.longitude()).abs() < 1e-9);
    assert!((bbox.max_lon - center.longitude()).abs() < 1e-9);
}

#[test]
fn test_bounding_box_contains_circle_boundary() {
    let latitudes = [-89.0, -85.0, -60.0, -30.0, 0.0, 30.0, 60.0, 85.0, 89.0];
    let longitudes = [-180.0, -179.9, -90.0, 0.0, 90.0, 179.9, 180.0];
    let radii = [0.5, 10.0, 150.0, 1200.0, 4000.0];

    for &lat in &latitudes {
        for &lon in &longitudes {
            let center = point(lat, lon);
            for &radius in &radii {
                let bbox = calculate_bounding_box(center, radius);

                for step in 0..72 {
                    let bearing = step as f64 * 5.0;
                    let q = destination(center, bearing, radius);
                    assert!(
                        contains_within(&bbox, q, 1e-9),
                        "center=({}, {}) r={} bearing={} q=({}, {}) bbox={:?}",
                        lat, lon, radius, bearing, q.latitude(), q.longitude(), bbox
                    );
                }
            }
        }
    }
}

#[test]
fn test_bounding_box_contains_interior_points() {
    let center = point(47.3769, 8.5417);
    let radius = 25.0;
    let bbox = calculate_bounding_box(center, radius);

    for step in 0..36 {
        for fraction in [0.1, 0.5, 0.9] {
            let q = destination(center, step as f64 * 10.0, radius * fraction);
            assert!(haversine_distance(center, q) <= radius);
            assert!(bbox.contains(&q));
        }
    }
}

#[test]
fn test_bounding_box_poles_do_not_produce_nan() {
    for &lat in &[90.0, -90.0] {
        for &radius in &[0.0, 1.0, 500.0, 20_000.0] {
            let bbox = calculate_bounding_box(point(lat, 45.0), radius);
            for value in [bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon] {
                assert!(value.is_finite(), "lat={} r={} bbox={:?}", lat, radius, bbox);
            }
            assert!(bbox.min_lat <= bbox.max_lat);
            if radius > 0.0 {
                assert!(bbox.covers_all_longitudes());
            }
        }
    }
}

#[test]
fn test_bounding_box_antimeridian_is_wrapped() {
    let bbox = calculate_bounding_box(point(-16.5, 179.8), 100.0);

    assert!(bbox.is_wrapped());
    assert_eq!(bbox.longitude_ranges().len(), 2);
    assert!(bbox.contains(&point(-16.5, -179.7)));
    assert!(bbox.contains(&point(-16.5, 179.5)));
    assert!(!bbox.contains(&point(-16.5, 170.0)));
}
