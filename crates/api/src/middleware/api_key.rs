use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::debug;

const API_KEY_HEADER: &str = "X-Api-Key";

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    match state.api_key.as_deref() {
        None => {
            debug!(path = %request.uri().path(), "Admin route refused: no api key configured");
            Err(StatusCode::FORBIDDEN)
        }
        Some(expected) => verify_request(request, next, expected).await,
    }
}

async fn verify_request(
    request: Request,
    next: Next,
    expected: &str,
) -> Result<Response, StatusCode> {
    let provided = extract_api_key(&request).ok_or(StatusCode::UNAUTHORIZED)?;
    if !timing_safe_eq(provided.as_bytes(), expected.as_bytes()) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

fn extract_api_key(request: &Request) -> Option<String> {
    request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_safe_eq() {
        assert!(timing_safe_eq(b"secret", b"secret"));
        assert!(!timing_safe_eq(b"secret", b"secreT"));
        assert!(!timing_safe_eq(b"secret", b"secret-longer"));
        assert!(!timing_safe_eq(b"", b"x"));
    }
}
