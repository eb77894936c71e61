use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde::Serialize;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[display("{}", _0)]
    NotFound(String),
    #[display("{}", _0)]
    BadRequest(String),
    #[display("{}", _0)]
    MethodNotAllowed(String),
    #[display("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrBody {
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrBody {
            message: self.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepoErr {
    #[error("not found")]
    NotFound,
    #[error("duplicate id {0}")]
    Duplicate(String),
    #[error("{0}")]
    Rejected(ApiError),
}

impl RepoErr {
    /// Maps a store failure onto the HTTP error, using `missing` to describe an absent record.
    pub fn into_api(self, missing: impl FnOnce() -> String) -> ApiError {
        match self {
            Self::NotFound => ApiError::NotFound(missing()),
            Self::Rejected(e) => e,
            Self::Duplicate(id) => {
                tracing::error!(%id, "generated id collided with an existing record");
                ApiError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn error_body_carries_message() {
        let resp = ApiError::BadRequest("Dish must include a name".into()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["message"], "Dish must include a name");
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MethodNotAllowed("x".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejected_repo_error_keeps_its_api_error() {
        let err = RepoErr::Rejected(ApiError::BadRequest("nope".into()));
        assert_eq!(
            err.into_api(|| unreachable!()),
            ApiError::BadRequest("nope".into())
        );
        let err = RepoErr::NotFound.into_api(|| "Order 7 does not exist.".into());
        assert_eq!(err, ApiError::NotFound("Order 7 does not exist.".into()));
    }
}
