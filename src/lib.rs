//! Address Book - address records with soft deletes and proximity search
//!
//! Addresses are latitude/longitude pairs stored in PostgreSQL. Nearby search
//! narrows candidates with a bounding box range query, then keeps only those
//! within the exact great-circle distance of the search center.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_bounding_box, haversine_distance, ProximityFilter, EARTH_RADIUS_KM};
pub use crate::models::{Address, BoundingBox, GeoError, GeoPoint, NearbyAddress};
