use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{validate_radius, GeoError, GeoPoint};

/// Stored coordinates keep four decimal places (about 11 m)
pub fn round_coordinate(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Request to create an address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAddressRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl CreateAddressRequest {
    /// Rounded, range-checked location to store
    pub fn location(&self) -> Result<GeoPoint, GeoError> {
        GeoPoint::new(round_coordinate(self.latitude), round_coordinate(self.longitude))
    }
}

/// Partial update of an address; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAddressRequest {
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl UpdateAddressRequest {
    /// Rounded, range-checked values to apply
    pub fn changes(&self) -> Result<(Option<f64>, Option<f64>), GeoError> {
        let latitude = self.latitude.map(round_coordinate);
        let longitude = self.longitude.map(round_coordinate);

        // Range-check each present field independently of the other
        if let Some(lat) = latitude {
            GeoPoint::new(lat, 0.0)?;
        }
        if let Some(lon) = longitude {
            GeoPoint::new(0.0, lon)?;
        }

        Ok((latitude, longitude))
    }

    pub fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }
}

/// Pagination for the address listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListAddressesQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

/// Proximity search parameters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Search radius in kilometers
    #[validate(range(min = 0.0))]
    pub distance: f64,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

impl NearbyQuery {
    /// Center point and radius, rejecting values the range checks let through (NaN)
    pub fn search_area(&self) -> Result<(GeoPoint, f64), GeoError> {
        let center = GeoPoint::new(self.latitude, self.longitude)?;
        let radius_km = validate_radius(self.distance)?;
        Ok((center, radius_km))
    }
}
