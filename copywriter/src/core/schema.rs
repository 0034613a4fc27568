//! Response schema descriptors per campaign type
//!
//! Every field is listed as required in the descriptor sent to the provider;
//! `couponCode` and `part2` may still come back empty and are treated as
//! optional when parsing.

use serde_json::{Map, Value, json};
use shared::CampaignType;

const IMAGE_EMAIL_FIELDS: &[&str] = &["subject", "body", "imageUrl", "ctaText", "couponCode"];

const TEXT_EMAIL_FIELDS: &[&str] = &["subject", "body"];

const SMS_FIELDS: &[&str] = &["part1", "part2"];

/// Structural contract for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantSchema {
    ImageEmail,
    TextEmail,
    Sms,
}

impl VariantSchema {
    pub fn for_campaign(campaign_type: CampaignType) -> Self {
        match campaign_type {
            CampaignType::ImageEmail => VariantSchema::ImageEmail,
            CampaignType::TextEmail => VariantSchema::TextEmail,
            CampaignType::Sms => VariantSchema::Sms,
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            VariantSchema::ImageEmail => IMAGE_EMAIL_FIELDS,
            VariantSchema::TextEmail => TEXT_EMAIL_FIELDS,
            VariantSchema::Sms => SMS_FIELDS,
        }
    }

    /// Provider-facing descriptor: an object of string properties, all requested
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields()
            .iter()
            .map(|name| (name.to_string(), json!({ "type": "STRING" })))
            .collect();
        
        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": self.fields(),
        })
    }
}

/// Full response descriptor `{A, B}` with both variants required
pub fn response_schema(campaign_type: CampaignType) -> Value {
    let variant = VariantSchema::for_campaign(campaign_type).to_json();

    json!({
        "type": "OBJECT",
        "properties": {
            "A": variant.clone(),
            "B": variant,
        },
        "required": ["A", "B"],
    })
}
