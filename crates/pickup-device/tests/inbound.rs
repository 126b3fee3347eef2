//! Inbound endpoint behavior: sanitization, state flags, malformed bodies.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use pickup_device::{SharedState, http};

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn valid_message_shows_and_raises_alert() {
    let state = SharedState::new();
    let app = http::router(state.clone());

    let response = app
        .oneshot(post_json(r#"{"content": "Äpfel für Mädchen!!", "id": 4}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.message_id(), Some(4));
    assert!(state.visible());
    assert!(state.alert());
    let (text, _) = state.begin_render_pass();
    assert_eq!(text, "Aepfel fuer Maedchen!!");
}

#[tokio::test]
async fn unprintable_content_blanks_without_alert() {
    let state = SharedState::new();
    let app = http::router(state.clone());

    let response = app
        .oneshot(post_json(r#"{"content": "€€€", "id": 9}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!state.visible());
    assert!(state.is_dirty());
    assert!(!state.alert());
    assert_eq!(state.message_id(), None);
}

#[tokio::test]
async fn malformed_payloads_get_a_structured_400() {
    for body in [r#"{"content": "Max"}"#, "not json", ""] {
        let state = SharedState::new();
        let app = http::router(state.clone());

        let response = app.oneshot(post_json(body)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {body:?} should be rejected"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json.get("error").is_some());

        // Nothing flipped on a rejected payload.
        assert!(!state.visible());
        assert!(!state.is_dirty());
    }
}

#[tokio::test]
async fn live_probe_answers_statically() {
    let state = SharedState::new();
    let app = http::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "running");
}
