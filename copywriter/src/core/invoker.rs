//! Retrying model invoker

use std::sync::Arc;

use shared::{ProcessId, process_debug};
use tokio_util::sync::CancellationToken;

use crate::core::retry::{RetryPolicy, call_with_retry};
use crate::error::CopywriterResult;
use crate::traits::TextProvider;
use crate::types::ProviderRequest;

/// Executes one logical provider call through the retry protocol
///
/// The provider handle is shared and stateless; every `invoke` starts its own
/// attempt counter.
pub struct ModelInvoker<P: TextProvider> {
    provider: Arc<P>,
    policy: RetryPolicy,
    cancellation: Option<CancellationToken>,
}

impl<P: TextProvider> ModelInvoker<P> {
    pub fn new(provider: Arc<P>, policy: RetryPolicy) -> Self {
        Self {
            provider,
            policy,
            cancellation: None,
        }
    }

    /// Abort pending backoff and further attempts once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Return the provider's raw text, not yet parsed or normalized
    pub async fn invoke(&self, request: &ProviderRequest) -> CopywriterResult<String> {
        let provider = self.provider.as_ref();
        let max_attempts = self.policy.max_attempts;

        call_with_retry(&self.policy, self.cancellation.as_ref(), |attempt| {
            process_debug!(
                ProcessId::current(),
                "Sending provider request (attempt {}/{})",
                attempt + 1,
                max_attempts
            );
            provider.generate(request)
        })
        .await
    }
}
