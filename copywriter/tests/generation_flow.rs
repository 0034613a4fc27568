//! End-to-end generation tests: mocked provider seam and a local Gemini stand-in

use std::sync::Arc;
use std::time::Duration;

use copywriter::{
    CopyGenerator, CopywriterError, GeneratorConfig, MockTextProvider, ModelInvoker, NormalizationPolicy,
    Normalizer, RetryPolicy,
};
use serde_json::json;
use shared::{CampaignType, GenerationRequest, Persona, SmsContent, Tone, VariantContent};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn no_wait() -> RetryPolicy {
    RetryPolicy::new(5, Duration::ZERO, Duration::ZERO)
}

fn generator(provider: MockTextProvider) -> CopyGenerator<MockTextProvider> {
    CopyGenerator::new(
        ModelInvoker::new(Arc::new(provider), no_wait()),
        Normalizer::new(NormalizationPolicy::default()).unwrap(),
    )
}

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
}

#[tokio::test]
async fn test_sms_for_maria_is_normalized() {
    let mut provider = MockTextProvider::new();
    provider
        .expect_generate()
        .withf(|request| {
            request.system_instruction.contains("Tone: Urgent. Persona: Playful.")
                && request.prompt.contains("Maria")
        })
        .times(1)
        .returning(|_| {
            Ok(json!({
                "A": { "part1": "Hello Maria, you are a valued customer with exquisite taste." },
                "B": { "part1": "Hey Maria!", "part2": "Don't miss out!" }
            })
            .to_string())
        });

    let request = GenerationRequest::new(
        "Write a flash sale SMS for Maria",
        CampaignType::Sms,
        Tone::Urgent,
        Persona::Playful,
    );
    let variants = generator(provider).generate(&request).await.unwrap();

    assert_eq!(
        variants.a,
        VariantContent::Sms(SmsContent {
            part1: "Hey Maria, you're a with taste.".to_string(),
            part2: None,
        })
    );
    assert_eq!(
        variants.b,
        VariantContent::Sms(SmsContent {
            part1: "Hey Maria!".to_string(),
            part2: Some("Don't miss out!".to_string()),
        })
    );

    println!("✅ SMS variants normalized end to end");
}

#[tokio::test]
async fn test_image_email_through_gemini_with_retries() {
    let server = MockServer::start().await;
    let endpoint = "/v1beta/models/gemini-2.5-flash:generateContent";

    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    let payload = json!({
        "A": {
            "subject": "Your exclusive cart is waiting for you right now!!!",
            "body": "Hello, your favourites are still here.",
            "imageUrl": "https://images.example.com/cart.png",
            "ctaText": "Back To Cart",
            "couponCode": "vip-20"
        },
        "B": {
            "subject": "Still thinking it over?",
            "body": "We kept everything in your bag.",
            "imageUrl": "https://images.example.com/bag.png",
            "ctaText": "Shop Now",
            "couponCode": ""
        }
    });
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(&payload.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let config = GeneratorConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        retry: no_wait(),
        ..GeneratorConfig::default()
    };
    let generator = config.build_generator().unwrap();

    let request = GenerationRequest::new(
        "Abandoned cart reminder",
        CampaignType::ImageEmail,
        Tone::Empathetic,
        Persona::Luxury,
    );
    let variants = generator.generate(&request).await.unwrap();

    match (&variants.a, &variants.b) {
        (VariantContent::ImageEmail(a), VariantContent::ImageEmail(b)) => {
            assert_eq!(a.subject, "Your exclusive cart is waiting for you right");
            assert_eq!(a.body, "your favourites are still here.");
            assert_eq!(a.cta_text, "Shop Back To Cart");
            assert_eq!(a.coupon_code.as_deref(), Some("VIP20"));
            assert_eq!(b.subject, "Still thinking it over?");
            assert_eq!(b.coupon_code.as_deref(), Some("SAVE15"));
        }
        other => panic!("Expected image email variants, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_key_surfaces_provider_message() {
    let generator = GeneratorConfig::default().build_generator().unwrap();
    let request = GenerationRequest::new("Hi", CampaignType::TextEmail, Tone::Witty, Persona::Minimalist);

    let error = generator.generate(&request).await.unwrap_err();

    assert!(matches!(error, CopywriterError::Provider(_)));
    assert!(error.to_string().contains("GEMINI_API_KEY"));
}
