pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::listing::handlers as listing;
use crate::pricing::handlers as pricing;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pricing API
        .route("/api/v1/pricing", post(pricing::handle_compute_pricing))
        .route(
            "/api/v1/pricing/defaults",
            get(pricing::handle_pricing_defaults),
        )
        // Listing Builder API
        .route(
            "/api/v1/listing/generate",
            post(listing::handle_generate_listing),
        )
        .route(
            "/api/v1/listing/status",
            get(listing::handle_generation_status),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use super::*;
    use crate::listing::generator::ContentGenerator;
    use crate::listing::models::GeneratedContent;
    use crate::llm_client::LlmError;

    struct FixedGenerator;

    #[async_trait]
    impl ContentGenerator for FixedGenerator {
        async fn generate(&self, description: &str) -> Result<GeneratedContent, LlmError> {
            Ok(GeneratedContent {
                title: format!("Premium {description}"),
                keywords: vec!["mug".to_string()],
                long_description: "A sturdy mug.".to_string(),
                features: vec!["Dishwasher safe".to_string()],
            })
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl ContentGenerator for FailingGenerator {
        async fn generate(&self, _description: &str) -> Result<GeneratedContent, LlmError> {
            Err(LlmError::Api {
                status: 403,
                message: "API key not valid. Please pass a valid API key.".to_string(),
            })
        }
    }

    /// Parks inside `generate` until released.
    struct BlockingGenerator {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl ContentGenerator for BlockingGenerator {
        async fn generate(&self, description: &str) -> Result<GeneratedContent, LlmError> {
            self.entered.notify_one();
            self.release.notified().await;
            FixedGenerator.generate(description).await
        }
    }

    fn router_with(generator: impl ContentGenerator + 'static) -> Router {
        build_router(AppState::new(Arc::new(generator)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router_with(FixedGenerator).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "seller-api");
    }

    #[tokio::test]
    async fn test_pricing_reference_scenario() {
        let request = post_json(
            "/api/v1/pricing",
            json!({
                "target_net_settlement": 1000,
                "gst_percentage": 18,
                "shipping_charges": 80,
                "platform_fee_percentage": 10,
                "fixed_fee": 20
            }),
        );
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["result"]["listing_price"], 1567);
        assert_eq!(body["result"]["gst_amount"], 268);
        assert_eq!(body["result"]["total_fees"], 257);
        assert_eq!(body["result"]["net_settlement"], 1000.0);
        assert_eq!(body["breakdown"].as_array().unwrap().len(), 4);
        assert!(body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pricing_degenerate_config_warns_but_prices() {
        let request = post_json("/api/v1/pricing", json!({ "platform_fee_percentage": 100 }));
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["result"]["listing_price"], 0);
        assert!(!body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pricing_strict_rejects_degenerate_config() {
        let request = post_json(
            "/api/v1/pricing?strict=true",
            json!({ "platform_fee_percentage": 100 }),
        );
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pricing_mistyped_field_uses_error_envelope() {
        let request = post_json("/api/v1/pricing", json!({ "gst_percentage": "eighteen" }));
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_pricing_bad_query_uses_error_envelope() {
        let request = post_json("/api/v1/pricing?strict=maybe", json!({}));
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_listing_malformed_body_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/listing/generate")
            .header("content-type", "application/json")
            .body(Body::from("{\"description\": "))
            .unwrap();
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pricing_defaults() {
        let response = router_with(FixedGenerator)
            .oneshot(get("/api/v1/pricing/defaults"))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["config"]["target_net_settlement"], 1000.0);
        assert_eq!(body["result"]["listing_price"], 1567);
    }

    #[tokio::test]
    async fn test_generate_listing() {
        let request = post_json(
            "/api/v1/listing/generate",
            json!({ "description": "  ceramic mug  " }),
        );
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["content"]["title"], "Premium ceramic mug");
        assert_eq!(body["content"]["longDescription"], "A sturdy mug.");
        assert!(body["request_id"].is_string());
        assert!(body["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_generate_listing_rejects_blank_description() {
        let request = post_json("/api/v1/listing/generate", json!({ "description": "   " }));
        let response = router_with(FixedGenerator).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generation_failure_is_one_generic_message() {
        let router = router_with(FailingGenerator);
        let request = post_json("/api/v1/listing/generate", json!({ "description": "mug" }));
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Failed to generate content. Please try again."
        );
        assert!(!body.to_string().contains("API key"));

        // The slot is free again after a failure.
        let status = json_body(router.oneshot(get("/api/v1/listing/status")).await.unwrap()).await;
        assert_eq!(status["in_progress"], false);
    }

    #[tokio::test]
    async fn test_overlapping_generation_is_refused() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let router = router_with(BlockingGenerator {
            entered: entered.clone(),
            release: release.clone(),
        });

        let first = tokio::spawn(
            router
                .clone()
                .oneshot(post_json("/api/v1/listing/generate", json!({ "description": "mug" }))),
        );
        entered.notified().await;

        let status = json_body(
            router
                .clone()
                .oneshot(get("/api/v1/listing/status"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status["in_progress"], true);

        let second = router
            .clone()
            .oneshot(post_json("/api/v1/listing/generate", json!({ "description": "mug" })))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body = json_body(second).await;
        assert_eq!(body["error"]["code"], "GENERATION_IN_PROGRESS");

        release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let status = json_body(router.oneshot(get("/api/v1/listing/status")).await.unwrap()).await;
        assert_eq!(status["in_progress"], false);
    }
}
