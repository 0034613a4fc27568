//! HTTP wire messages between a browser client and the webserver

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{CampaignType, GenerationRequest, Persona, Tone};

/// Body of `POST /api/generate`
///
/// Every field is optional on the wire so that a missing prompt can be
/// reported as a caller error instead of a deserialization failure.
/// Enum fields accept any spelling their `FromStr` accepts ("SMS", "sms",
/// "vip-hype"); anything else is still a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub campaign_type: CampaignType,
    #[serde(default, deserialize_with = "lenient")]
    pub tone: Tone,
    #[serde(default, deserialize_with = "lenient")]
    pub persona: Persona,
}

impl GenerateBody {
    /// Convert into a generation request, or `None` when the prompt is missing or blank
    pub fn into_request(self) -> Option<GenerationRequest> {
        let prompt = self.prompt.filter(|p| !p.trim().is_empty())?;
        Some(GenerationRequest::new(prompt, self.campaign_type, self.tone, self.persona))
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Error body returned with any non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_body_defaults() {
        let body: GenerateBody = serde_json::from_str(r#"{"prompt":"Hi [Name]"}"#).unwrap();
        let request = body.into_request().unwrap();

        assert_eq!(request.campaign_type, CampaignType::ImageEmail);
        assert_eq!(request.tone, Tone::Empathetic);
        assert_eq!(request.persona, Persona::Luxury);
    }

    #[test]
    fn test_generate_body_requires_prompt() {
        let body: GenerateBody = serde_json::from_str(r#"{"campaignType":"SMS"}"#).unwrap();
        assert!(body.into_request().is_none());

        let blank: GenerateBody = serde_json::from_str(r#"{"prompt":"   "}"#).unwrap();
        assert!(blank.into_request().is_none());
    }

    #[test]
    fn test_generate_body_accepts_loose_spellings() {
        let body: GenerateBody = serde_json::from_str(
            r#"{"prompt":"Hi","campaignType":"sms","tone":"vip-hype","persona":"eco conscious"}"#,
        )
        .unwrap();

        assert_eq!(body.campaign_type, CampaignType::Sms);
        assert_eq!(body.tone, Tone::VipHype);
        assert_eq!(body.persona, Persona::EcoConscious);

        let exact: GenerateBody =
            serde_json::from_str(r#"{"prompt":"Hi","campaignType":"Text Email","persona":"Eco-conscious"}"#).unwrap();
        assert_eq!(exact.campaign_type, CampaignType::TextEmail);
        assert_eq!(exact.persona, Persona::EcoConscious);
    }

    #[test]
    fn test_generate_body_rejects_unknown_values() {
        let err = serde_json::from_str::<GenerateBody>(r#"{"prompt":"Hi","campaignType":"fax"}"#).unwrap_err();
        assert!(err.to_string().contains("fax"));
    }
}
