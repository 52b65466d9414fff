//! DNS-over-HTTPS endpoint (RFC 8484), one route per access token.
//!
//!   GET  /dns/{token}?dns=<base64url>   base64url-encoded DNS wire format
//!   POST /dns/{token}                   body is raw DNS wire format
//!
//! Response: `Content-Type: application/dns-message`, body is the upstream answer.
use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use zns_domain::{DohRequest, DomainError};

use crate::{errors::ApiError, state::AppState};

const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";
/// RFC 8484 §6: maximum wire-format message size for DoH.
const MAX_DNS_MESSAGE_BYTES: usize = 65_535;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dns/{token}", get(get_query).post(post_query))
        .route("/dns", any(missing_token))
        .route("/dns/", any(missing_token))
}

#[derive(Deserialize)]
pub struct DohGetParams {
    dns: Option<String>,
}

async fn get_query(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(token): Path<String>,
    Query(params): Query<DohGetParams>,
) -> Result<Response, ApiError> {
    let request = DohRequest::get(token, params.dns.unwrap_or_default(), peer.ip());
    resolve_doh(state, request).await
}

async fn post_query(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if body.len() > MAX_DNS_MESSAGE_BYTES {
        return Ok((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(json!({ "error": "DNS message too large" })),
        )
            .into_response());
    }

    let request = DohRequest::post(token, body.to_vec(), peer.ip());
    resolve_doh(state, request).await
}

async fn missing_token() -> ApiError {
    ApiError(DomainError::Unauthorized("missing token".to_string()))
}

async fn resolve_doh(state: AppState, request: DohRequest) -> Result<Response, ApiError> {
    let answer = state.doh.execute(request).await?;

    let mut res = Response::new(Body::from(answer.wire));
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(DNS_MESSAGE_CONTENT_TYPE),
    );
    res.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(res)
}
