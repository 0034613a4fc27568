//! HTTP contract tests for the generate endpoint
//!
//! Drives the router in-process with a mocked CopyService.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use copywriter::{CopywriterError, ProviderError};
use serde_json::{Value, json};
use shared::{CampaignType, GeneratedVariants, Persona, SmsContent, Tone, VariantContent};
use tower::ServiceExt;

use webserver::{MAX_BODY_BYTES, MockCopyService, WebServer, WebServerState};

fn router(service: MockCopyService) -> axum::Router {
    let bind = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5174);
    WebServer::new(WebServerState::new(bind, "gemini-2.5-flash"), service).build_router()
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn sms_variants() -> GeneratedVariants {
    GeneratedVariants {
        a: VariantContent::Sms(SmsContent {
            part1: "Hey Maria, 20% off ends tonight.".to_string(),
            part2: None,
        }),
        b: VariantContent::Sms(SmsContent {
            part1: "Hey Maria!".to_string(),
            part2: Some("Don't miss out!".to_string()),
        }),
    }
}

#[tokio::test]
async fn test_missing_prompt_is_bad_request() {
    let mut service = MockCopyService::new();
    service.expect_generate().times(0);

    let (status, body) = send(router(service), post_json(json!({ "campaignType": "SMS" }).to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "prompt required" }));
}

#[tokio::test]
async fn test_blank_prompt_is_bad_request() {
    let mut service = MockCopyService::new();
    service.expect_generate().times(0);

    let (status, body) = send(router(service), post_json(json!({ "prompt": "   " }).to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "prompt required");
}

#[tokio::test]
async fn test_generate_returns_variants() {
    let mut service = MockCopyService::new();
    service
        .expect_generate()
        .withf(|request| {
            request.prompt == "Flash sale for Maria"
                && request.campaign_type == CampaignType::Sms
                && request.tone == Tone::Urgent
                && request.persona == Persona::Playful
        })
        .times(1)
        .returning(|_| Ok(sms_variants()));

    let payload = json!({
        "prompt": "Flash sale for Maria",
        "campaignType": "SMS",
        "tone": "Urgent",
        "persona": "Playful"
    });
    let (status, body) = send(router(service), post_json(payload.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "A": { "part1": "Hey Maria, 20% off ends tonight." },
            "B": { "part1": "Hey Maria!", "part2": "Don't miss out!" }
        })
    );
}

#[tokio::test]
async fn test_defaults_fill_omitted_settings() {
    let mut service = MockCopyService::new();
    service
        .expect_generate()
        .withf(|request| {
            request.campaign_type == CampaignType::ImageEmail
                && request.tone == Tone::Empathetic
                && request.persona == Persona::Luxury
        })
        .times(1)
        .returning(|_| Ok(sms_variants()));

    let (status, _) = send(router(service), post_json(json!({ "prompt": "Welcome" }).to_string())).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_lowercase_settings_are_accepted() {
    let mut service = MockCopyService::new();
    service
        .expect_generate()
        .withf(|request| {
            request.campaign_type == CampaignType::Sms
                && request.tone == Tone::VipHype
                && request.persona == Persona::EcoConscious
        })
        .times(1)
        .returning(|_| Ok(sms_variants()));

    let body = json!({
        "prompt": "Flash sale",
        "campaignType": "sms",
        "tone": "vip-hype",
        "persona": "eco conscious"
    });
    let (status, _) = send(router(service), post_json(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_campaign_type_is_bad_request() {
    let mut service = MockCopyService::new();
    service.expect_generate().times(0);

    let body = json!({ "prompt": "Hi", "campaignType": "fax" });
    let (status, body) = send(router(service), post_json(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("fax"));
}

#[tokio::test]
async fn test_generation_failure_is_internal_error() {
    let mut service = MockCopyService::new();
    service.expect_generate().times(1).returning(|_| {
        Err(CopywriterError::Overloaded {
            attempts: 5,
            last_error: ProviderError::new("The model is overloaded.").with_status(503),
        })
    });

    let (status, body) = send(router(service), post_json(json!({ "prompt": "Hi" }).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Model currently overloaded after multiple retries"));
    assert!(message.ends_with("The model is overloaded."));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let mut service = MockCopyService::new();
    service.expect_generate().times(0);

    let (status, body) = send(router(service), post_json("{\"prompt\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut service = MockCopyService::new();
    service.expect_generate().times(0);

    let prompt = "x".repeat(MAX_BODY_BYTES + 1);
    let (status, _) = send(router(service), post_json(json!({ "prompt": prompt }).to_string())).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(router(MockCopyService::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "gemini-2.5-flash");
}
