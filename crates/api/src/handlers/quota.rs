use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::debug;

use crate::{
    dto::{CreditQuotaRequest, QuotaResponse},
    errors::ApiError,
    state::AppState,
};

pub async fn get_quota(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<QuotaResponse>, ApiError> {
    let view = state.get_quota.execute(&token).await?;
    Ok(Json(QuotaResponse::from_view(token, view)))
}

pub async fn credit_quota(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<CreditQuotaRequest>,
) -> Result<Json<QuotaResponse>, ApiError> {
    let view = state.credit_quota.execute(&token, request.bytes).await?;
    debug!(bytes = request.bytes, "Quota credited via admin API");
    Ok(Json(QuotaResponse::from_view(token, view)))
}
