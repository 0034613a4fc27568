//! CopyService backed by the copywriter generator

use async_trait::async_trait;
use copywriter::{CopyGenerator, CopywriterResult, TextProvider};
use shared::{GeneratedVariants, GenerationRequest};

use crate::traits::CopyService;

/// Real copy service; one generator (and its HTTP client) serves every request
pub struct RealCopyService<P: TextProvider> {
    generator: CopyGenerator<P>,
}

impl<P: TextProvider> RealCopyService<P> {
    pub fn new(generator: CopyGenerator<P>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl<P: TextProvider + 'static> CopyService for RealCopyService<P> {
    async fn generate(&self, request: GenerationRequest) -> CopywriterResult<GeneratedVariants> {
        self.generator.generate(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copywriter::{
        CopywriterError, MockTextProvider, ModelInvoker, NormalizationPolicy, Normalizer, RetryPolicy,
    };
    use shared::{CampaignType, EmailContent, Persona, Tone, VariantContent};
    use std::sync::Arc;
    use std::time::Duration;

    fn service(provider: MockTextProvider) -> RealCopyService<MockTextProvider> {
        let invoker = ModelInvoker::new(Arc::new(provider), RetryPolicy::new(5, Duration::ZERO, Duration::ZERO));
        let normalizer = Normalizer::new(NormalizationPolicy::default()).unwrap();
        RealCopyService::new(CopyGenerator::new(invoker, normalizer))
    }

    #[tokio::test]
    async fn test_generates_normalized_text_email() {
        let mut provider = MockTextProvider::new();
        provider.expect_generate().times(1).returning(|_| {
            Ok(r#"{"A":{"subject":"Wow!!!","body":"Hello, welcome back."},"B":{"subject":"Hi","body":"Glad you're here."}}"#
                .to_string())
        });

        let request = GenerationRequest::new("Welcome back", CampaignType::TextEmail, Tone::Witty, Persona::Minimalist);
        let variants = service(provider).generate(request).await.unwrap();

        assert_eq!(
            variants.a,
            VariantContent::TextEmail(EmailContent {
                subject: "Wow!".to_string(),
                body: "welcome back.".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_blank_prompt_is_input_error() {
        let mut provider = MockTextProvider::new();
        provider.expect_generate().times(0);

        let request = GenerationRequest::new("   ", CampaignType::Sms, Tone::Urgent, Persona::Playful);
        let error = service(provider).generate(request).await.unwrap_err();

        assert!(matches!(error, CopywriterError::InvalidInput { .. }));
    }
}
