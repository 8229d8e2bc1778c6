//! Shared test harness for E2E integration tests.
//!
//! Drives the real router over in-memory state, so every request crosses
//! the API, intake and accounting crates.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use ec_api::routes::build_router;
use ec_api::state::AppState;
use ec_intake::{DialogueConfig, ExtractionEngine, TranslatorConfig};

/// End-to-end test harness around the API router.
pub struct TestHarness {
    /// Application state (in-memory sessions).
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
}

impl TestHarness {
    /// Rule-based extraction only.
    pub fn new() -> Self {
        Self::from_state(AppState::new())
    }

    /// Custom extraction provider and dialogue settings.
    pub fn with_extractor(
        extractor: Arc<dyn ExtractionEngine>,
        dialogue: DialogueConfig,
        translator: TranslatorConfig,
    ) -> Self {
        Self::from_state(AppState::with_extractor(extractor, dialogue, translator))
    }

    fn from_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Send a request and decode the JSON body (Null when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST /api/v1/calculate.
    pub async fn calculate(&self, profile: &Value) -> (StatusCode, Value) {
        self.post("/api/v1/calculate", profile).await
    }

    /// Open a session and return its id.
    pub async fn open_session(&self) -> String {
        let (status, json) = self.post("/api/v1/sessions", &json!({})).await;
        assert_eq!(status, StatusCode::CREATED);
        json["session_id"].as_str().unwrap().to_string()
    }

    /// Send one message to a session. Panics unless the turn succeeds.
    pub async fn say(&self, session_id: &str, message: &str) -> Value {
        let (status, json) = self
            .post(
                &format!("/api/v1/sessions/{session_id}/messages"),
                &json!({ "message": message }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "turn failed: {json}");
        json
    }

    /// POST /api/v1/sessions/{id}/calculate.
    pub async fn calculate_session(&self, session_id: &str) -> (StatusCode, Value) {
        self.post(
            &format!("/api/v1/sessions/{session_id}/calculate"),
            &json!({}),
        )
        .await
    }
}

/// Festival profile shared by the comparison scenarios.
pub fn festival_profile(power: &str, locally_sourced: bool) -> Value {
    json!({
        "event_type": "festival",
        "attendance": 1000,
        "duration": { "days": 3, "hours_per_day": 10.0 },
        "power": { "source": power },
        "catering": { "locally_sourced": locally_sourced }
    })
}

/// Relative float comparison.
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1e-12)
}
