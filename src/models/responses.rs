use serde::{Deserialize, Serialize};
use crate::models::domain::{GeoPoint, NearbyAddress};

/// Response for the nearby search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct NearbyAddressesResponse {
    pub center: GeoPoint,
    pub distance_km: f64,
    pub addresses: Vec<NearbyAddress>,
    pub total_candidates: usize,
}

/// Response for a soft delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAddressResponse {
    pub address_id: i64,
    pub detail: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
