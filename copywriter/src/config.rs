//! Environment-driven configuration for the generator

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::{CopyGenerator, ModelInvoker, NormalizationPolicy, Normalizer, RetryPolicy};
use crate::error::{CopywriterError, CopywriterResult};
use crate::services::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, RealGeminiProvider};

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub normalization: NormalizationPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            retry: RetryPolicy::default(),
            normalization: NormalizationPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> CopywriterResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    ///
    /// Blank values count as unset. A value that is present but unparsable
    /// is a `ConfigError`.
    pub fn from_lookup<F>(lookup: F) -> CopywriterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = API_KEY_VARS.iter().find_map(|&name| get(name));

        if let Some(model) = get("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = get("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(raw) = get("GEMINI_TIMEOUT_MS") {
            let ms: u64 = parse_var("GEMINI_TIMEOUT_MS", &raw)?;
            if ms == 0 {
                return Err(CopywriterError::config("GEMINI_TIMEOUT_MS must be greater than zero"));
            }
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = get("COPY_SUBJECT_WORD_CAP") {
            config.normalization.subject_word_cap = parse_var("COPY_SUBJECT_WORD_CAP", &raw)?;
        }
        if let Some(raw) = get("COPY_SMS_CHAR_CAP") {
            config.normalization.sms_char_cap = parse_var("COPY_SMS_CHAR_CAP", &raw)?;
        }

        config.normalization.validate()?;
        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Wire the Gemini provider, retry policy and normalizer together
    pub fn build_generator(&self) -> CopywriterResult<CopyGenerator<RealGeminiProvider>> {
        self.assemble(None)
    }

    /// Same as [`build_generator`](Self::build_generator), but retry backoff
    /// stops as soon as `token` is cancelled
    pub fn build_cancellable_generator(
        &self,
        token: CancellationToken,
    ) -> CopywriterResult<CopyGenerator<RealGeminiProvider>> {
        self.assemble(Some(token))
    }

    fn assemble(&self, token: Option<CancellationToken>) -> CopywriterResult<CopyGenerator<RealGeminiProvider>> {
        let provider = RealGeminiProvider::from_config(self)?;
        let normalizer = Normalizer::new(self.normalization.clone())?;
        let mut invoker = ModelInvoker::new(Arc::new(provider), self.retry.clone());
        if let Some(token) = token {
            invoker = invoker.with_cancellation(token);
        }
        Ok(CopyGenerator::new(invoker, normalizer))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> CopywriterResult<T> {
    raw.parse()
        .map_err(|_| CopywriterError::config(format!("Invalid value for {}: '{}'", name, raw)))
}
