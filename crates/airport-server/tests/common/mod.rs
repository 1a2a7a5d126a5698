//! Shared helpers for the HTTP integration tests
//!
//! Every test builds the full router over a fresh [`MemoryRepository`] and
//! drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use airport_server::{api, config::CorsConfig, db::MemoryRepository};

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let cors = CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
        };
        let router = api::create_router(repo.clone(), &cors);
        Self { router, repo }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        customer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(customer) = customer {
            builder = builder.header("x-user-id", customer);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// POST and return the created id, asserting `201 Created`
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let (status, json) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected response: {}", json);
        json["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_airport(&self, name: &str, city: &str) -> i64 {
        self.create(
            "/api/v1/airports",
            json!({ "name": name, "closest_big_city": city }),
        )
        .await
    }

    pub async fn create_route(&self, source: i64, destination: i64, distance: i32) -> i64 {
        self.create(
            "/api/v1/routes",
            json!({ "source": source, "destination": destination, "distance": distance }),
        )
        .await
    }

    pub async fn create_crew(&self, first_name: &str, last_name: &str) -> i64 {
        self.create(
            "/api/v1/crews",
            json!({ "first_name": first_name, "last_name": last_name }),
        )
        .await
    }

    pub async fn create_airplane(&self, name: &str, rows: i32, seats_in_row: i32) -> i64 {
        let airplane_type = self
            .create("/api/v1/airplane-types", json!({ "name": "Boeing 737" }))
            .await;
        self.create(
            "/api/v1/airplanes",
            json!({
                "name": name,
                "rows": rows,
                "seats_in_row": seats_in_row,
                "airplane_type": airplane_type
            }),
        )
        .await
    }

    pub async fn create_flight(&self, route: i64, airplane: i64, crew: &[i64]) -> i64 {
        self.create(
            "/api/v1/flights",
            json!({
                "route": route,
                "airplane": airplane,
                "crew": crew,
                "departure_time": "2024-05-01T10:00:00Z",
                "arrival_time": "2024-05-01T12:00:00Z"
            }),
        )
        .await
    }

    /// One route and one airplane of `rows` x `seats_in_row`, with a flight
    pub async fn seed_flight(&self, airplane_name: &str, rows: i32, seats_in_row: i32) -> i64 {
        let kyiv = self.create_airport("Boryspil", "Kyiv").await;
        let lviv = self.create_airport("Danylo Halytskyi", "Lviv").await;
        let route = self.create_route(kyiv, lviv, 470).await;
        let airplane = self.create_airplane(airplane_name, rows, seats_in_row).await;
        self.create_flight(route, airplane, &[]).await
    }

    pub async fn book(&self, tickets: Value, customer: Option<&str>) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "tickets": tickets })),
            customer,
        )
        .await
    }

    pub async fn tickets_available(&self, flight: i64) -> i64 {
        let (status, json) = self.get(&format!("/api/v1/flights/{}", flight)).await;
        assert_eq!(status, StatusCode::OK);
        json["data"]["tickets_available"].as_i64().unwrap()
    }
}
