//! Integration tests for reference data endpoints and the operational routes

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::TestApp;

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::new();

    let (status, json) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Airport Server");
    assert_eq!(json["status"], "running");

    let (status, json) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["storage"], "memory");
}

#[tokio::test]
async fn test_airport_crud() {
    let app = TestApp::new();

    let id = app.create_airport("Boryspil", "Kyiv").await;

    let (status, json) = app.get(&format!("/api/v1/airports/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!({ "id": id, "name": "Boryspil", "closest_big_city": "Kyiv" })
    );

    let (status, json) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/airports/{}", id),
            Some(json!({ "name": "Kyiv Boryspil" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Kyiv Boryspil");
    assert_eq!(json["data"]["closest_big_city"], "Kyiv");

    let (_, json) = app.get("/api/v1/airports").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&format!("/api/v1/airports/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, json) = app.get(&format!("/api/v1/airports/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_blank_airport_name_is_validation_error() {
    let app = TestApp::new();
    let (status, json) = app
        .post(
            "/api/v1/airports",
            json!({ "name": "  ", "closest_big_city": "Kyiv" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["details"]["field"], "name");
}

#[tokio::test]
async fn test_empty_update_is_validation_error() {
    let app = TestApp::new();
    let id = app.create_airport("Boryspil", "Kyiv").await;
    let (status, json) = app.put(&format!("/api/v1/airports/{}", id), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"]["field"], "non_field_errors");
}

#[tokio::test]
async fn test_update_missing_resource_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app
        .put("/api/v1/crews/77", json!({ "first_name": "Nobody" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/v1/airplanes/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_representations() {
    let app = TestApp::new();
    let kyiv = app.create_airport("Boryspil", "Kyiv").await;
    let lviv = app.create_airport("Danylo Halytskyi", "Lviv").await;

    let (status, json) = app
        .post(
            "/api/v1/routes",
            json!({ "source": kyiv, "destination": lviv, "distance": 470 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let route = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["source"], kyiv);
    assert_eq!(json["data"]["destination"], lviv);

    let (_, json) = app.get("/api/v1/routes").await;
    assert_eq!(
        json["data"][0],
        json!({ "id": route, "source": "Boryspil", "destination": "Danylo Halytskyi", "distance": 470 })
    );

    let (_, json) = app.get(&format!("/api/v1/routes/{}", route)).await;
    assert_eq!(json["data"]["source"]["name"], "Boryspil");
    assert_eq!(json["data"]["destination"]["closest_big_city"], "Lviv");
}

#[tokio::test]
async fn test_route_validation() {
    let app = TestApp::new();
    let kyiv = app.create_airport("Boryspil", "Kyiv").await;

    let (status, json) = app
        .post(
            "/api/v1/routes",
            json!({ "source": kyiv, "destination": kyiv, "distance": -5 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"]["field"], "distance");

    let (status, json) = app
        .post(
            "/api/v1/routes",
            json!({ "source": kyiv, "destination": 404, "distance": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"], json!({ "entity": "Airport", "id": 404 }));
}

#[tokio::test]
async fn test_crew_full_name() {
    let app = TestApp::new();
    let id = app.create_crew("Olena", "Kovalenko").await;

    let (_, json) = app.get(&format!("/api/v1/crews/{}", id)).await;
    assert_eq!(json["data"]["full_name"], "Olena Kovalenko");
}

#[tokio::test]
async fn test_airplane_representation() {
    let app = TestApp::new();
    let id = app.create_airplane("UR-BAA", 10, 5).await;

    let (status, json) = app.get(&format!("/api/v1/airplanes/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!({
            "id": id,
            "name": "UR-BAA",
            "rows": 10,
            "seats_in_row": 5,
            "airplane_type": "Boeing 737",
            "capacity": 50
        })
    );
}

#[tokio::test]
async fn test_airplane_needs_a_seat_grid() {
    let app = TestApp::new();
    let airplane_type = app
        .create("/api/v1/airplane-types", json!({ "name": "Antonov" }))
        .await;

    let (status, json) = app
        .post(
            "/api/v1/airplanes",
            json!({ "name": "UR-ANT", "rows": 0, "seats_in_row": 4, "airplane_type": airplane_type }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["details"]["field"], "rows");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .post("/api/v1/airports", json!({ "name": "Boryspil" }))
        .await;
    assert!(status.is_client_error());
}
