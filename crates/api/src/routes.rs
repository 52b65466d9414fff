use crate::handlers;
use crate::middleware::require_api_key;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_api_routes(state: AppState) -> Router {
    let admin = Router::new()
        .route("/admin/quota/{token}", post(handlers::credit_quota))
        .route("/admin/classifier/reload", post(handlers::reload_classifier))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .merge(handlers::doh::routes())
        .route("/health", get(handlers::health_check))
        .route("/quota/{token}", get(handlers::get_quota))
        .merge(admin)
        .with_state(state)
}
