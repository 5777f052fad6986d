use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Marketplace API error variants.
///
/// Every variant maps to an HTTP status and the uniform `{success, message,
/// data}` body that all endpoints share. Rejected writes that would break
/// referential integrity surface as [`ApiError::Conflict`] with a 400, so a
/// client sees the same shape for "name taken" and "has dependents".
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("unauthorized")]
    Unauthorized(&'static str),
    #[error("forbidden")]
    Forbidden(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("upstream service error")]
    Upstream(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Upstream(_) => "UPSTREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Unauthorized(detail) => (*detail).to_owned(),
            Self::Forbidden(detail) => (*detail).to_owned(),
            // Never leak upstream or internal detail to the client.
            Self::Upstream(_) | Self::Internal(_) => "internal error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = self.kind(), "internal error");
            }
            Self::Upstream(detail) => {
                tracing::error!(detail = %detail, kind = self.kind(), "upstream error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "success": false,
            "message": self.message(),
            "data": null,
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(error: ApiError, expected_status: StatusCode, expected_message: &str) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], expected_message);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn should_return_validation_as_bad_request() {
        assert_error(
            ApiError::Validation("name is required"),
            StatusCode::BAD_REQUEST,
            "name is required",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_conflict_as_bad_request() {
        assert_error(
            ApiError::Conflict("cannot delete category with 3 subcategories".into()),
            StatusCode::BAD_REQUEST,
            "cannot delete category with 3 subcategories",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_unauthorized() {
        assert_error(
            ApiError::Unauthorized("invalid token"),
            StatusCode::UNAUTHORIZED,
            "invalid token",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_forbidden() {
        assert_error(
            ApiError::Forbidden("super admin access required"),
            StatusCode::FORBIDDEN,
            "super admin access required",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_not_found() {
        assert_error(
            ApiError::NotFound("product"),
            StatusCode::NOT_FOUND,
            "product not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_not_leak_internal_detail() {
        assert_error(
            ApiError::Internal(anyhow::anyhow!("connection refused on 5432")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal error",
        )
        .await;
    }

    #[tokio::test]
    async fn should_not_leak_upstream_detail() {
        assert_error(
            ApiError::Upstream("onesignal returned 503".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal error",
        )
        .await;
    }
}
