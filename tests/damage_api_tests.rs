use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use damage_service::config::{DatabaseConfig, EnvironmentConfig};
use damage_service::database::DatabaseConnection;
use damage_service::{create_app, AppState};

// Función helper para crear la app de test sobre un SQLite temporal
async fn create_test_app() -> (Router, sqlx::SqlitePool, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("damage_test.db");
    let config = DatabaseConfig::new(path.to_string_lossy().to_string());

    let pool = DatabaseConnection::new(&config).await.unwrap().pool().clone();
    let app = create_app(AppState::new(pool.clone(), EnvironmentConfig::default()));

    (app, pool, dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

async fn row_count(pool: &sqlx::SqlitePool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM damage")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

const CATEGORIES: [&str; 9] = [
    "engine_damage",
    "tire_damage",
    "brake_damage",
    "bodywork_damage",
    "interior_damage",
    "electronic_damage",
    "glass_damage",
    "undercarriage_damage",
    "light_damage",
];

#[tokio::test]
async fn test_home_returns_service_metadata() {
    let (app, _pool, _dir) = create_test_app().await;
    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "Damage Service");
    assert!(body["version"].is_string());
    assert!(body["description"].is_string());
}

#[tokio::test]
async fn test_create_defaults_all_categories_to_none() {
    let (app, _pool, _dir) = create_test_app().await;

    let (status, body) = send(&app, "POST", "/damage", Some(json!({ "car_id": 123 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Damage registered successfully");
    assert!(body["damage_id"].as_i64().unwrap() > 0);

    let (status, body) = send(&app, "GET", "/damage/123", None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    for category in CATEGORIES {
        assert_eq!(records[0][category], "none", "{}", category);
    }
    // Sin date_reported se usa la hora de creación
    assert!(records[0]["date_reported"].is_string());
}

#[tokio::test]
async fn test_create_via_add_alias_and_vehicle_id_key() {
    let (app, _pool, _dir) = create_test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/damage/add",
        Some(json!({
            "vehicleId": 77,
            "reportedAt": "2024-05-01 09:15:00",
            "tire_damage": "worn out",
            "light_damage": "not working"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", "/damage/77", None).await;
    assert_eq!(body[0]["tire_damage"], "worn out");
    assert_eq!(body[0]["light_damage"], "not working");
    assert_eq!(body[0]["date_reported"], "2024-05-01T09:15:00");
}

#[tokio::test]
async fn test_create_without_car_id_is_rejected() {
    let (app, pool, _dir) = create_test_app().await;

    for payload in [json!({}), json!({ "car_id": 0 }), json!({ "car_id": "" }), json!({ "engine_damage": "minor" })] {
        let (status, body) = send(&app, "POST", "/damage", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "car_id is required");
    }

    assert_eq!(row_count(&pool).await, 0);
}

#[tokio::test]
async fn test_create_with_unknown_category_value_is_rejected() {
    let (app, pool, _dir) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/damage",
        Some(json!({ "car_id": 123, "engine_damage": "destroyed" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(row_count(&pool).await, 0);
}

#[tokio::test]
async fn test_list_all_and_by_vehicle() {
    let (app, _pool, _dir) = create_test_app().await;

    send(&app, "POST", "/damage", Some(json!({ "car_id": 123, "glass_damage": "cracked" }))).await;
    send(&app, "POST", "/damage", Some(json!({ "car_id": 456 }))).await;

    let (status, body) = send(&app, "GET", "/damage", None).await;
    assert_eq!(status, StatusCode::OK);
    let cars: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["car_id"].as_i64().unwrap())
        .collect();
    assert_eq!(cars, vec![123, 456]);

    let (status, body) = send(&app, "GET", "/damage/123", None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["car_id"], 123);
    assert_eq!(records[0]["glass_damage"], "cracked");

    let (status, body) = send(&app, "GET", "/damage/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No damage data found for this car");
}

#[tokio::test]
async fn test_list_all_on_empty_table_is_empty_array() {
    let (app, _pool, _dir) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/damage", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_non_numeric_vehicle_id_is_bad_request() {
    let (app, _pool, _dir) = create_test_app().await;

    let (status, _) = send(&app, "GET", "/damage/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_changes_only_the_given_field() {
    let (app, _pool, _dir) = create_test_app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/damage",
        Some(json!({ "car_id": 123, "engine_damage": "minor", "tire_damage": "bald" })),
    )
    .await;
    let id = created["damage_id"].as_i64().unwrap();
    let (_, before) = send(&app, "GET", "/damage/123", None).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/damage/change/{}", id),
        Some(json!({ "brake_damage": "broken", "car_id": 999, "unknown": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Damage report {} updated successfully", id));

    let (_, after) = send(&app, "GET", "/damage/123", None).await;
    let before = &before[0];
    let after = &after[0];
    assert_eq!(after["brake_damage"], "broken");
    assert_eq!(after["car_id"], 123);
    assert_eq!(after["date_reported"], before["date_reported"]);
    for category in CATEGORIES.iter().filter(|c| **c != "brake_damage") {
        assert_eq!(after[*category], before[*category], "{}", category);
    }
}

#[tokio::test]
async fn test_update_without_valid_fields_is_bad_request() {
    let (app, _pool, _dir) = create_test_app().await;

    let (_, created) = send(&app, "POST", "/damage", Some(json!({ "car_id": 5 }))).await;
    let id = created["damage_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/damage/change/{}", id),
        Some(json!({ "car_id": 6, "damage_id": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No valid fields to update");
}

#[tokio::test]
async fn test_update_with_unknown_category_value_is_rejected() {
    let (app, _pool, _dir) = create_test_app().await;

    let (_, created) = send(&app, "POST", "/damage", Some(json!({ "car_id": 5 }))).await;
    let id = created["damage_id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/damage/change/{}", id),
        Some(json!({ "interior_damage": "burnt" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/damage/5", None).await;
    assert_eq!(body[0]["interior_damage"], "none");
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let (app, pool, _dir) = create_test_app().await;

    send(&app, "POST", "/damage", Some(json!({ "car_id": 1 }))).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/damage/change/4242",
        Some(json!({ "brake_damage": "broken" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No report found with id 4242");

    let (_, body) = send(&app, "GET", "/damage/1", None).await;
    assert_eq!(body[0]["brake_damage"], "none");
    assert_eq!(row_count(&pool).await, 1);
}

#[tokio::test]
async fn test_delete_removes_exactly_one_row() {
    let (app, pool, _dir) = create_test_app().await;

    let (_, first) = send(&app, "POST", "/damage", Some(json!({ "car_id": 8 }))).await;
    send(&app, "POST", "/damage", Some(json!({ "car_id": 9 }))).await;
    let id = first["damage_id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/damage/change/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Damage report {} deleted successfully", id));
    assert_eq!(row_count(&pool).await, 1);

    let (status, _) = send(&app, "GET", "/damage/8", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &format!("/damage/change/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("No damage report found with id {}", id));
    assert_eq!(row_count(&pool).await, 1);
}

#[tokio::test]
async fn test_create_with_wrongly_typed_category_is_validation_error() {
    let (app, pool, _dir) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/damage",
        Some(json!({ "car_id": 1, "engine_damage": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "engine_damage must be a string");
    assert_eq!(row_count(&pool).await, 0);
}

#[tokio::test]
async fn test_create_with_car_id_and_vehicle_id_uses_car_id() {
    let (app, _pool, _dir) = create_test_app().await;

    let (status, _) = send(&app, "POST", "/damage", Some(json!({ "car_id": 1, "vehicleId": 2 }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "GET", "/damage/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let (app, pool, _dir) = create_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/damage")
        .header("content-type", "application/json")
        .body(Body::from("{\"car_id\": 1,"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(row_count(&pool).await, 0);
}

#[tokio::test]
async fn test_storage_failure_is_reported_as_db_error() {
    let (app, pool, _dir) = create_test_app().await;

    sqlx::query("DROP TABLE damage").execute(&pool).await.unwrap();

    let (status, body) = send(&app, "POST", "/damage", Some(json!({ "car_id": 1 }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "DB_ERROR");

    let sql_error = body["details"]["sql_error"].as_str().unwrap();
    assert!(sql_error.contains("no such table"), "{}", sql_error);
    assert!(body["message"].as_str().unwrap().contains(sql_error));
}

#[tokio::test]
async fn test_existing_table_with_null_categories_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    let config = DatabaseConfig::new(path.to_string_lossy().to_string());

    // Tabla creada antes sin DEFAULT ni NOT NULL en las categorías
    let legacy = config.create_pool().await.unwrap();
    sqlx::query(
        r#"
        CREATE TABLE damage (
            damage_id INTEGER PRIMARY KEY AUTOINCREMENT,
            car_id INTEGER,
            date_reported DATETIME,
            engine_damage TEXT CHECK(engine_damage IN ('none', 'minor', 'major')),
            tire_damage TEXT CHECK(tire_damage IN ('none', 'puncture', 'worn out', 'bald')),
            brake_damage TEXT CHECK(brake_damage IN ('none', 'squealing', 'broken')),
            bodywork_damage TEXT CHECK(bodywork_damage IN ('none', 'dent', 'scratched')),
            interior_damage TEXT CHECK(interior_damage IN ('none', 'scratched', 'torn', 'stained')),
            electronic_damage TEXT CHECK(electronic_damage IN ('none', 'minor', 'major')),
            glass_damage TEXT CHECK(glass_damage IN ('none', 'cracked', 'shattered')),
            undercarriage_damage TEXT CHECK(undercarriage_damage IN ('none', 'scraped', 'dented')),
            light_damage TEXT CHECK(light_damage IN ('none', 'broken', 'not working'))
        )
        "#,
    )
    .execute(&legacy)
    .await
    .unwrap();
    sqlx::query("INSERT INTO damage (car_id, engine_damage) VALUES (31, 'major')")
        .execute(&legacy)
        .await
        .unwrap();
    legacy.close().await;

    let pool = DatabaseConnection::new(&config).await.unwrap().pool().clone();
    let app = create_app(AppState::new(pool, EnvironmentConfig::default()));

    let (status, body) = send(&app, "GET", "/damage", None).await;
    assert_eq!(status, StatusCode::OK);
    let record = &body[0];
    assert_eq!(record["car_id"], 31);
    assert_eq!(record["engine_damage"], "major");
    assert_eq!(record["tire_damage"], "none");
    assert_eq!(record["light_damage"], "none");
    assert!(record["date_reported"].is_null());
}
