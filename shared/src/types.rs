//! Core shared types: campaign vocabulary and generated variant shapes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::errors::{SharedError, SharedResult};

static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();
static DEFAULT_PROCESS_ID: ProcessId = ProcessId::Copywriter;

/// Process identifier attached to every log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Copywriter CLI process
    Copywriter,
    /// HTTP front end
    WebServer,
}

impl ProcessId {
    /// Initialize the global process ID for the copywriter CLI
    pub fn init_copywriter() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Copywriter)
    }

    /// Initialize the global process ID for the webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Get the global process ID, falling back to the copywriter when uninitialized
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&DEFAULT_PROCESS_ID)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Copywriter => write!(f, "copywriter"),
            ProcessId::WebServer => write!(f, "webserver"),
        }
    }
}

/// Channel and format of the generated copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CampaignType {
    #[default]
    #[serde(rename = "Image Email")]
    ImageEmail,
    #[serde(rename = "Text Email")]
    TextEmail,
    #[serde(rename = "SMS")]
    Sms,
}

impl CampaignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::ImageEmail => "Image Email",
            CampaignType::TextEmail => "Text Email",
            CampaignType::Sms => "SMS",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "imageemail" | "image" => Ok(CampaignType::ImageEmail),
            "textemail" | "text" => Ok(CampaignType::TextEmail),
            "sms" => Ok(CampaignType::Sms),
            _ => Err(SharedError::UnknownVariant { kind: "campaign type", value: s.to_string() }),
        }
    }
}

/// Voice the copy is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Empathetic,
    Urgent,
    #[serde(rename = "VIP Hype")]
    VipHype,
    Professional,
    Witty,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Empathetic => "Empathetic",
            Tone::Urgent => "Urgent",
            Tone::VipHype => "VIP Hype",
            Tone::Professional => "Professional",
            Tone::Witty => "Witty",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "empathetic" => Ok(Tone::Empathetic),
            "urgent" => Ok(Tone::Urgent),
            "viphype" => Ok(Tone::VipHype),
            "professional" => Ok(Tone::Professional),
            "witty" => Ok(Tone::Witty),
            _ => Err(SharedError::UnknownVariant { kind: "tone", value: s.to_string() }),
        }
    }
}

/// Brand persona the copy speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Persona {
    #[default]
    Luxury,
    Minimalist,
    Playful,
    #[serde(rename = "Eco-conscious")]
    EcoConscious,
}

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Luxury => "Luxury",
            Persona::Minimalist => "Minimalist",
            Persona::Playful => "Playful",
            Persona::EcoConscious => "Eco-conscious",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "luxury" => Ok(Persona::Luxury),
            "minimalist" => Ok(Persona::Minimalist),
            "playful" => Ok(Persona::Playful),
            "ecoconscious" => Ok(Persona::EcoConscious),
            _ => Err(SharedError::UnknownVariant { kind: "persona", value: s.to_string() }),
        }
    }
}

// Lowercase and drop separators so "VIP Hype", "vip-hype" and "viphype" agree
fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// One generation request, consumed once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub campaign_type: CampaignType,
    pub tone: Tone,
    pub persona: Persona,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, campaign_type: CampaignType, tone: Tone, persona: Persona) -> Self {
        Self {
            prompt: prompt.into(),
            campaign_type,
            tone,
            persona,
        }
    }
}

/// Customer record a batch prompt is personalised for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub segment: String,
    pub last_purchase: String,
    pub sentiment: String,
}

/// Image email variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEmailContent {
    pub subject: String,
    pub body: String,
    pub image_url: String,
    pub cta_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// Plain text email variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// SMS variant, optionally split over two messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsContent {
    pub part1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part2: Option<String>,
}

/// Content of a single variant, shaped by the campaign type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantContent {
    ImageEmail(ImageEmailContent),
    TextEmail(EmailContent),
    Sms(SmsContent),
}

impl VariantContent {
    /// Parse a JSON object as the content shape required by `campaign_type`
    pub fn from_value(campaign_type: CampaignType, value: serde_json::Value) -> SharedResult<Self> {
        let parsed = match campaign_type {
            CampaignType::ImageEmail => serde_json::from_value(value).map(VariantContent::ImageEmail),
            CampaignType::TextEmail => serde_json::from_value(value).map(VariantContent::TextEmail),
            CampaignType::Sms => serde_json::from_value(value).map(VariantContent::Sms),
        };

        parsed.map_err(|e| SharedError::DeserializationError {
            message: format!("{} variant: {}", campaign_type, e),
        })
    }
}

/// The A/B pair produced for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVariants {
    #[serde(rename = "A")]
    pub a: VariantContent,
    #[serde(rename = "B")]
    pub b: VariantContent,
}

impl GeneratedVariants {
    /// Parse raw provider text into a variant pair for `campaign_type`
    ///
    /// Both `A` and `B` must be present and non-null; a missing variant is an
    /// error, never a partial result.
    pub fn from_json(campaign_type: CampaignType, text: &str) -> SharedResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text.trim()).map_err(|e| SharedError::DeserializationError {
                message: format!("invalid JSON from model: {}", e),
            })?;

        let mut object = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(SharedError::DeserializationError {
                    message: format!("expected an object with variants A and B, got {}", other),
                });
            }
        };

        let mut take = |key: &'static str| match object.remove(key) {
            Some(serde_json::Value::Null) | None => Err(SharedError::MissingField {
                field: key,
                context: "generated variants".to_string(),
            }),
            Some(value) => VariantContent::from_value(campaign_type, value),
        };

        let a = take("A")?;
        let b = take("B")?;
        Ok(Self { a, b })
    }
}

/// Batch result entry: the variants generated for one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCopy {
    pub customer: Customer,
    pub variants: GeneratedVariants,
}
