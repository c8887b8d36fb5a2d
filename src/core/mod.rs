// Core geo exports
pub mod bounding_box;
pub mod distance;
pub mod nearby;

pub use bounding_box::calculate_bounding_box;
pub use distance::{haversine_distance, EARTH_RADIUS_KM};
pub use nearby::{NearbyResult, ProximityFilter};
