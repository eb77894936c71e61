pub mod dishes;
pub mod health;
pub mod orders;

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{Map, Value};
use tracing::debug;

use crate::entities::Payload;
use crate::errors::ApiError;

/// Body of a request whose extraction is allowed to fail, so the route
/// can answer 404 for a missing record before it complains about the body.
pub type MaybePayload = Result<web::Json<Payload>, actix_web::Error>;

fn body(payload: MaybePayload) -> Result<Map<String, Value>, ApiError> {
    payload.map(|p| p.into_inner().data).map_err(|e| {
        e.as_error::<ApiError>()
            .cloned()
            .unwrap_or_else(|| ApiError::BadRequest(e.to_string()))
    })
}

fn log_rejection(e: &ApiError) {
    debug!(error = %e, "request rejected");
}

/// Fallback for a known path hit with a verb it does not support.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed(format!(
        "{} not allowed for {}",
        req.method(),
        req.path()
    )))
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(format!("Path not found: {}", req.path())))
}
