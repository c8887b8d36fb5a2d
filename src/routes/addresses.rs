use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::AddressSettings;
use crate::core::{calculate_bounding_box, ProximityFilter};
use crate::models::{
    CreateAddressRequest, DeleteAddressResponse, ErrorResponse, HealthResponse, ListAddressesQuery,
    NearbyAddressesResponse, NearbyQuery, UpdateAddressRequest,
};
use crate::services::PostgresClient;
use std::sync::Arc;

pub const ADDRESS_NOT_FOUND: &str = "Address is not present in the system.";
pub const ADDRESS_DELETED: &str = "Address deleted successfully.";
pub const INTERNAL_SERVER_ERROR: &str = "Something went wrong, please try again later.";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub proximity: ProximityFilter,
    pub addresses: AddressSettings,
}

/// Configure all address routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/addresses", web::get().to(list_addresses))
        .route("/addresses", web::post().to(create_address))
        // Registered before /addresses/{id} so "nearby" is not parsed as an id
        .route("/addresses/nearby", web::get().to(nearby_addresses))
        .route("/addresses/{id}", web::get().to(get_address))
        .route("/addresses/{id}", web::put().to(update_address))
        .route("/addresses/{id}", web::delete().to(delete_address));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Not found".to_string(),
        message: ADDRESS_NOT_FOUND.to_string(),
        status_code: 404,
    })
}

fn internal_error(error: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message: INTERNAL_SERVER_ERROR.to_string(),
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List addresses
///
/// GET /api/v1/addresses?skip=0&limit=100
async fn list_addresses(
    state: web::Data<AppState>,
    query: web::Query<ListAddressesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let limit = query
        .limit
        .unwrap_or(state.addresses.default_page_size)
        .min(state.addresses.max_page_size);

    tracing::info!("Listing addresses: skip={}, limit={}", query.skip, limit);

    match state.postgres.list_addresses(query.skip, limit).await {
        Ok(addresses) => HttpResponse::Ok().json(addresses),
        Err(e) => {
            tracing::error!("Failed to list addresses: {}", e);
            internal_error("Failed to list addresses")
        }
    }
}

/// Fetch a single address
///
/// GET /api/v1/addresses/{id}
async fn get_address(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    tracing::info!("Fetching address #{}", id);

    match state.postgres.get_address(id).await {
        Ok(Some(address)) => HttpResponse::Ok().json(address),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!("Failed to fetch address #{}: {}", id, e);
            internal_error("Failed to fetch address")
        }
    }
}

/// Create an address
///
/// POST /api/v1/addresses
///
/// Request body:
/// ```json
/// { "latitude": 51.5007, "longitude": -0.1246 }
/// ```
async fn create_address(
    state: web::Data<AppState>,
    req: web::Json<CreateAddressRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let location = match req.location() {
        Ok(location) => location,
        Err(e) => return bad_request("Invalid location", e.to_string()),
    };

    match state.postgres.create_address(location).await {
        Ok(address) => {
            tracing::info!("Created address #{}", address.id);
            HttpResponse::Created().json(address)
        }
        Err(e) => {
            tracing::error!("Failed to create address: {}", e);
            internal_error("Failed to create address")
        }
    }
}

/// Partially update an address
///
/// PUT /api/v1/addresses/{id}
///
/// Request body (every field optional):
/// ```json
/// { "latitude": 40.6892, "longitude": -74.0445 }
/// ```
async fn update_address(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<UpdateAddressRequest>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let (latitude, longitude) = match req.changes() {
        Ok(changes) => changes,
        Err(e) => return bad_request("Invalid location", e.to_string()),
    };

    tracing::info!("Updating address #{}", id);

    let result = if req.is_empty() {
        state.postgres.get_address(id).await
    } else {
        state.postgres.update_address(id, latitude, longitude).await
    };

    match result {
        Ok(Some(address)) => HttpResponse::Ok().json(address),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!("Failed to update address #{}: {}", id, e);
            internal_error("Failed to update address")
        }
    }
}

/// Soft-delete an address
///
/// DELETE /api/v1/addresses/{id}
async fn delete_address(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    tracing::info!("Deleting address #{}", id);

    match state.postgres.soft_delete_address(id).await {
        Ok(true) => HttpResponse::Ok().json(DeleteAddressResponse {
            address_id: id,
            detail: ADDRESS_DELETED.to_string(),
        }),
        Ok(false) => not_found(),
        Err(e) => {
            tracing::error!("Failed to delete address #{}: {}", id, e);
            internal_error("Failed to delete address")
        }
    }
}

/// Addresses within a distance of a point
///
/// GET /api/v1/addresses/nearby?latitude=51.5&longitude=-0.12&distance=10&limit=20
///
/// The store narrows candidates with the bounding box, then each candidate
/// is checked against the exact great-circle distance.
async fn nearby_addresses(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let (center, radius_km) = match query.search_area() {
        Ok(area) => area,
        Err(e) => return bad_request("Invalid search area", e.to_string()),
    };

    let limit = query
        .limit
        .map(|l| l as usize)
        .unwrap_or(state.proximity.max_results());

    let bounding_box = calculate_bounding_box(center, radius_km);

    tracing::info!(
        "Nearby search around ({}, {}) within {}km",
        center.latitude(),
        center.longitude(),
        radius_km
    );

    let candidates = match state.postgres.addresses_in_bounding_box(&bounding_box).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query nearby candidates: {}", e);
            return internal_error("Failed to fetch nearby addresses");
        }
    };

    let result = state
        .proximity
        .find_nearby_within(center, radius_km, &bounding_box, candidates, limit);

    HttpResponse::Ok().json(NearbyAddressesResponse {
        center,
        distance_km: radius_km,
        addresses: result.addresses,
        total_candidates: result.total_candidates,
    })
}
