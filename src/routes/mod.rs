//! HTTP layer: handlers, error responses and extractor configuration.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod api;

/// Renders a service error as a JSON error response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::InvalidQuery(_) | ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}

/// Runs a synchronous service call on the blocking thread pool.
pub async fn blocking<F, T>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(f).await {
        Ok(result) => result,
        Err(err) => {
            log::error!("Blocking task failed: {err}");
            Err(ServiceError::Internal)
        }
    }
}

/// Malformed JSON bodies get the same `{"error": ...}` shape as other 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let response = error_response(ServiceError::Form(err.to_string()));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Undecodable query strings are reported as invalid queries.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = error_response(ServiceError::InvalidQuery(err.to_string()));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    use super::*;

    #[actix_web::test]
    async fn errors_map_to_status_codes() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                ServiceError::InvalidQuery("invalid sort field: pan".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::Form("bad".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::TypeConstraint("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(error_response(err).status(), status);
        }
    }

    #[actix_web::test]
    async fn internal_errors_do_not_leak_details() {
        let response = error_response(ServiceError::Internal);
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "error": "internal server error" }));
    }

    #[actix_web::test]
    async fn blocking_returns_the_service_result() {
        let value = blocking(|| Ok(41 + 1)).await.unwrap();
        assert_eq!(value, 42);
        assert_eq!(
            blocking(|| Err::<(), _>(ServiceError::NotFound)).await,
            Err(ServiceError::NotFound)
        );
    }
}
