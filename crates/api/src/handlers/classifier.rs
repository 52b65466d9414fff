use axum::{extract::State, response::Json};

use crate::{dto::ClassifierReloadResponse, errors::ApiError, state::AppState};

pub async fn reload_classifier(
    State(state): State<AppState>,
) -> Result<Json<ClassifierReloadResponse>, ApiError> {
    let stats = state.reload_classifier.execute().await?;
    Ok(Json(stats.into()))
}
