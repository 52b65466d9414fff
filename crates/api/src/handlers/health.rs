use axum::{extract::State, Json};

use crate::{dto::HealthResponse, state::AppState};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        mode: state.doh.router().mode_name().to_string(),
    })
}
