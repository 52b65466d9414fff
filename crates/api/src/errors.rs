use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, warn};
use zns_domain::DomainError;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            DomainError::BadRequest(_)
            | DomainError::DecodeError(_)
            | DomainError::EncodeError(_) => StatusCode::BAD_REQUEST,

            DomainError::UpstreamError { .. } | DomainError::UpstreamTimeout { .. } => {
                StatusCode::BAD_GATEWAY
            }

            DomainError::NotSupported(_) => StatusCode::CONFLICT,

            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        } else {
            warn!(error = %self.0, status = status.as_u16(), "Request failed");
        }

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "internal error".to_string(),
            _ => self.0.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_errors_are_bad_request() {
        assert_eq!(
            ApiError(DomainError::DecodeError("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(DomainError::EncodeError("too large".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(DomainError::DatabaseError("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
