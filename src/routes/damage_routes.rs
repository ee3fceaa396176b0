use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::damage_controller::DamageController;
use crate::dto::damage_dto::{CreateDamageRequest, DamageResponse, MessageResponse, UpdateDamageRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_damage_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_damage).get(list_damage))
        .route("/add", post(create_damage))
        .route("/:car_id", get(list_damage_by_car))
        .route("/change/:damage_id", put(update_damage).delete(delete_damage))
}

async fn create_damage(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(body) = payload?;
    let controller = DamageController::new(state.pool.clone());
    let response = controller.create(CreateDamageRequest::from(body)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_damage(State(state): State<AppState>) -> Result<Json<Vec<DamageResponse>>, AppError> {
    let controller = DamageController::new(state.pool.clone());
    let response = controller.list_all().await?;
    Ok(Json(response))
}

async fn list_damage_by_car(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
) -> Result<Json<Vec<DamageResponse>>, AppError> {
    let controller = DamageController::new(state.pool.clone());
    let response = controller.list_by_car(car_id).await?;
    Ok(Json(response))
}

async fn update_damage(
    State(state): State<AppState>,
    Path(damage_id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = payload?;
    let controller = DamageController::new(state.pool.clone());
    let response = controller.update(damage_id, UpdateDamageRequest::from(body)).await?;
    Ok(Json(response))
}

async fn delete_damage(
    State(state): State<AppState>,
    Path(damage_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = DamageController::new(state.pool.clone());
    let response = controller.delete(damage_id).await?;
    Ok(Json(response))
}
