// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{validate_radius, Address, BoundingBox, GeoError, GeoPoint, NearbyAddress};
pub use requests::{round_coordinate, CreateAddressRequest, ListAddressesQuery, NearbyQuery, UpdateAddressRequest};
pub use responses::{DeleteAddressResponse, ErrorResponse, HealthResponse, NearbyAddressesResponse};
