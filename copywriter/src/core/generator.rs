//! Campaign copy generation: one request, or a fail-fast batch of customers

use shared::{
    CampaignType, Customer, GeneratedCopy, GeneratedVariants, GenerationRequest, Persona, ProcessId, Tone,
    process_error, process_info,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::core::invoker::ModelInvoker;
use crate::core::normalizer::Normalizer;
use crate::core::prompt::{build_system_instruction, personalize};
use crate::core::schema::response_schema;
use crate::error::{CopywriterError, CopywriterResult};
use crate::traits::TextProvider;
use crate::types::ProviderRequest;

/// Produces normalized A/B variants from a prompt
///
/// Holds no state across invocations besides the shared provider handle.
pub struct CopyGenerator<P: TextProvider> {
    invoker: ModelInvoker<P>,
    normalizer: Normalizer,
}

impl<P: TextProvider> CopyGenerator<P> {
    pub fn new(invoker: ModelInvoker<P>, normalizer: Normalizer) -> Self {
        Self { invoker, normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Generate both variants for one request
    ///
    /// Fails without calling the provider when the prompt is blank. A
    /// response that is not JSON, or lacks either variant, is an
    /// `InvalidResponse` and is not retried.
    pub async fn generate(&self, request: &GenerationRequest) -> CopywriterResult<GeneratedVariants> {
        if request.prompt.trim().is_empty() {
            return Err(CopywriterError::invalid_input("prompt required"));
        }

        let span = tracing::info_span!("generate", invocation = %Uuid::new_v4(), campaign = %request.campaign_type);
        self.generate_inner(request).instrument(span).await
    }

    async fn generate_inner(&self, request: &GenerationRequest) -> CopywriterResult<GeneratedVariants> {
        process_info!(
            ProcessId::current(),
            "✍️ Generating {} copy (tone: {}, persona: {})",
            request.campaign_type,
            request.tone,
            request.persona
        );

        let provider_request = ProviderRequest {
            prompt: request.prompt.clone(),
            system_instruction: build_system_instruction(request.tone, request.persona),
            response_schema: response_schema(request.campaign_type),
        };

        let raw = self.invoker.invoke(&provider_request).await?;

        let variants = GeneratedVariants::from_json(request.campaign_type, &raw).map_err(|e| {
            process_error!(ProcessId::current(), "❌ Provider output rejected: {}", e);
            CopywriterError::InvalidResponse { message: e.to_string() }
        })?;

        Ok(self.normalizer.normalize_variants(&variants))
    }

    /// Generate copy for each customer in order, stopping at the first failure
    ///
    /// Results produced before the failure are discarded.
    pub async fn generate_batch(
        &self,
        template: &str,
        customers: &[Customer],
        campaign_type: CampaignType,
        tone: Tone,
        persona: Persona,
    ) -> CopywriterResult<Vec<GeneratedCopy>> {
        if customers.is_empty() {
            return Err(CopywriterError::invalid_input(
                "Please add at least one customer before generating copy.",
            ));
        }
        if template.trim().is_empty() {
            return Err(CopywriterError::invalid_input("prompt required"));
        }

        let mut results = Vec::with_capacity(customers.len());
        for (index, customer) in customers.iter().enumerate() {
            process_info!(
                ProcessId::current(),
                "👤 Customer {}/{}: {}",
                index + 1,
                customers.len(),
                customer.name
            );

            let request = GenerationRequest::new(personalize(template, customer), campaign_type, tone, persona);
            match self.generate(&request).await {
                Ok(variants) => results.push(GeneratedCopy {
                    customer: customer.clone(),
                    variants,
                }),
                Err(error) => {
                    process_error!(
                        ProcessId::current(),
                        "❌ Batch aborted at customer {}/{} ({}): {}",
                        index + 1,
                        customers.len(),
                        customer.name,
                        error
                    );
                    return Err(CopywriterError::BatchAborted {
                        customer: customer.name.clone(),
                        source: Box::new(error),
                    });
                }
            }
        }

        Ok(results)
    }
}
