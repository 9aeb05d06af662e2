pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contracts::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Contracts API
        .route("/api/v1/contracts", post(handlers::handle_compose))
        .route(
            "/api/v1/contracts/from-message",
            post(handlers::handle_compose_from_message),
        )
        .route("/api/v1/contracts/render", post(handlers::handle_render))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::contracts::delivery::today_contract_date;
    use crate::layout::LayoutEngine;
    use crate::models::contract::sample_record;
    use crate::render::TextRenderer;

    const SAMPLE_MESSAGE: &str = "John Smith\nul. Prosta 1, Warsaw\n+48 600 000 000\n\
                                  john@example.com\nItaly\n15.08.2023\n25.08.2023\n2\n\
                                  Flight from Warsaw to Rome\nHotel Roma, double room\n2500\nEUR";

    fn app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let engine = LayoutEngine::new(config.geometry.clone()).unwrap();
        build_router(AppState {
            engine: Arc::new(engine),
            renderer: Arc::new(TextRenderer),
        })
    }

    async fn post_json(path: &str, body: Value) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_compose_returns_stream_and_metadata() {
        let response = post_json("/api/v1/contracts", json!(sample_record())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["metadata"]["page_count"], 2);
        assert_eq!(body["metadata"]["section_count"], 9);
        assert!(body["document_id"]
            .as_str()
            .and_then(|id| uuid::Uuid::parse_str(id).ok())
            .is_some());

        let filename = body["filename"].as_str().unwrap();
        assert!(filename.starts_with("contract_John_Smith_"), "{filename}");
        assert!(filename.ends_with(".txt"));

        let instructions = body["instructions"].as_array().unwrap();
        assert_eq!(instructions[0]["op"], "place_cell");
        assert_eq!(instructions[0]["text"], "EUROLUXE Sp. z o.o.");
        assert_eq!(body["overflows"], json!([]));
    }

    #[tokio::test]
    async fn test_compose_defaults_contract_date_to_today() {
        let mut record = json!(sample_record());
        record.as_object_mut().unwrap().remove("contract_date");

        let body = json_body(post_json("/api/v1/contracts", record).await).await;
        let subtitle = format!("concluded on {} between:", today_contract_date());
        let instructions = body["instructions"].as_array().unwrap();
        assert!(instructions.iter().any(|i| i["text"] == subtitle.as_str()));
    }

    #[tokio::test]
    async fn test_compose_incomplete_record_is_unprocessable() {
        let mut record = json!(sample_record());
        record["price"] = json!("");

        let response = post_json("/api/v1/contracts", record).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_RECORD");
        assert!(body["error"]["message"].as_str().unwrap().contains("price"));
    }

    #[tokio::test]
    async fn test_compose_from_message() {
        let response = post_json(
            "/api/v1/contracts/from-message",
            json!({ "text": SAMPLE_MESSAGE, "contract_date": "01.08.2023" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let texts: Vec<&str> = body["instructions"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|i| i["text"].as_str())
            .collect();
        assert!(texts.contains(&"concluded on 01.08.2023 between:"));
        assert!(texts.contains(&"Flight from Warsaw to Rome"));
    }

    #[tokio::test]
    async fn test_compose_from_short_message_is_rejected() {
        let response = post_json(
            "/api/v1/contracts/from-message",
            json!({ "text": "John Smith\nWarsaw\n+48 600 000 000" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("found 3"));
    }

    #[tokio::test]
    async fn test_render_returns_text_attachment() {
        let response = post_json("/api/v1/contracts/render", json!(sample_record())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers().clone();
        assert_eq!(headers["x-page-count"], "2");
        assert_eq!(headers["x-section-count"], "9");
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("contract_John_Smith_"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("AGREEMENT FOR THE PROVISION OF TOURIST SERVICES"));
        assert!(text.contains("Page 2"));
    }
}
