use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Domain(e) => domain_error_response(e),
            AppError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            AppError::Internal(msg) => {
                log::error!("internal error: {msg}");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

/// Business-rule failures carry their detail to the client; infrastructure
/// failures are collapsed into an opaque 500 and logged server-side.
fn domain_error_response(e: &DomainError) -> HttpResponse {
    match e {
        DomainError::ValidationFailed { violations } => HttpResponse::BadRequest().json(json!({
            "error": "validation failed",
            "violations": violations
                .iter()
                .map(|v| json!({ "field": v.field, "message": v.message }))
                .collect::<Vec<_>>(),
        })),
        DomainError::InsufficientInventory { shortages } => HttpResponse::Conflict().json(json!({
            "error": "insufficient inventory",
            "shortages": shortages
                .iter()
                .map(|s| json!({
                    "productId": s.product_id,
                    "requested": s.requested,
                    "available": s.available,
                }))
                .collect::<Vec<_>>(),
        })),
        // Safe for the client to resubmit: nothing was persisted.
        DomainError::DuplicateOrderNumber => HttpResponse::ServiceUnavailable().json(json!({
            "error": "could not allocate an order number, please retry"
        })),
        DomainError::NotFound => HttpResponse::NotFound().json(json!({
            "error": e.to_string()
        })),
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(json!({
            "error": e.to_string()
        })),
        DomainError::Forbidden => HttpResponse::Forbidden().json(json!({
            "error": e.to_string()
        })),
        DomainError::Unavailable(msg) => {
            log::error!("storage unavailable: {msg}");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}
