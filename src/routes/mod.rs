pub mod damage_routes;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware_for;
use crate::state::AppState;

/// Router completo del servicio
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware_for(&state.config.cors_origins);

    Router::new()
        .route("/", get(home))
        .nest("/damage", damage_routes::create_damage_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Identidad del servicio
async fn home() -> Json<Value> {
    Json(json!({
        "service": "Damage Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "A RESTful API for managing car damages"
    }))
}
