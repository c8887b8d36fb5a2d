use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building geo values from untrusted input
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("Invalid latitude {0}: must be a finite value in [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Invalid longitude {0}: must be a finite value in [-180, 180]")]
    InvalidLongitude(f64),

    #[error("Invalid radius {0}: must be a finite, non-negative number of kilometers")]
    InvalidRadius(f64),
}

/// A validated latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// (latitude, longitude) in radians
    #[inline]
    pub fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        GeoPoint::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        // geo uses (x, y) = (longitude, latitude)
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl TryFrom<geo::Point<f64>> for GeoPoint {
    type Error = GeoError;

    fn try_from(point: geo::Point<f64>) -> Result<Self, Self::Error> {
        GeoPoint::new(point.y(), point.x())
    }
}

/// Check that a search radius is usable by the geo calculations
pub fn validate_radius(radius_km: f64) -> Result<f64, GeoError> {
    if radius_km.is_finite() && radius_km >= 0.0 {
        Ok(radius_km)
    } else {
        Err(GeoError::InvalidRadius(radius_km))
    }
}

/// Geospatial bounding box in degrees
///
/// When the box crosses the antimeridian `min_lon` is greater than `max_lon`
/// and the longitude range is `[min_lon, 180] ∪ [-180, max_lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// True when the longitude range wraps across ±180°
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// True when the box spans every longitude
    pub fn covers_all_longitudes(&self) -> bool {
        self.min_lon <= -180.0 && self.max_lon >= 180.0
    }

    /// Check if a point is within the box
    #[inline]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let lat = point.latitude();
        let lon = point.longitude();

        if lat < self.min_lat || lat > self.max_lat {
            return false;
        }

        if self.is_wrapped() {
            lon >= self.min_lon || lon <= self.max_lon
        } else {
            lon >= self.min_lon && lon <= self.max_lon
        }
    }

    /// The one or two plain longitude intervals covered by the box
    pub fn longitude_ranges(&self) -> Vec<(f64, f64)> {
        if self.is_wrapped() {
            vec![(self.min_lon, 180.0), (-180.0, self.max_lon)]
        } else {
            vec![(self.min_lon, self.max_lon)]
        }
    }
}

/// Address record as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Address {
    /// Location of the address, `None` if the stored coordinates are out of range
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude, self.longitude).ok()
    }
}

/// Address annotated with its distance from a search center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyAddress {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}
