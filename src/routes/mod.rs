// Route exports
pub mod addresses;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;

pub use addresses::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(addresses::configure),
    );
}

/// JSON error for payloads rejected by actix extractors
#[derive(Debug)]
pub struct ExtractorError(ErrorResponse);

impl ExtractorError {
    fn bad_request(error: &str, message: String) -> Self {
        Self(ErrorResponse {
            error: error.to_string(),
            message,
            status_code: 400,
        })
    }
}

impl std::fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl error::ResponseError for ExtractorError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ExtractorError::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ExtractorError::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}

/// Handle path errors such as a non-numeric address id
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    ExtractorError::bad_request("invalid_path", format!("Invalid path: {}", err)).into()
}

/// Apply the JSON error handlers to the Json, Query and Path extractors
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};

    async fn echo_id(path: web::Path<i64>) -> HttpResponse {
        HttpResponse::Ok().body(path.into_inner().to_string())
    }

    #[actix_web::test]
    async fn test_bad_path_returns_json_400() {
        let app = actix_test::init_service(
            App::new()
                .configure(configure_extractors)
                .route("/items/{id}", web::get().to(echo_id)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/items/abc").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = actix_test::read_body_json(resp).await;
        assert_eq!(body.error, "invalid_path");
    }

    #[test]
    fn test_extractor_error_display() {
        let err = ExtractorError::bad_request("invalid_query", "Invalid query: missing field".to_string());
        assert_eq!(err.to_string(), "invalid_query: Invalid query: missing field");
    }
}
