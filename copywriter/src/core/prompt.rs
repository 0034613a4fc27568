//! Prompt construction: system instruction, customer placeholders, prompt library

use shared::{Customer, Persona, Tone};

const NAME_PLACEHOLDER: &str = "[Name]";
const SEGMENT_PLACEHOLDER: &str = "[Segment]";
const LAST_PURCHASE_PLACEHOLDER: &str = "[Last Purchase]";
const SENTIMENT_PLACEHOLDER: &str = "[Sentiment]";

/// Style instruction sent alongside every prompt
pub fn build_system_instruction(tone: Tone, persona: Persona) -> String {
    format!(
        "You are an AI Marketing Copywriter specializing in e-commerce conversion rate optimization (CRO). \
         Generate persuasive short-form copy. Tone: {}. Persona: {}.",
        tone, persona
    )
}

/// Substitute every customer placeholder in `template`
pub fn personalize(template: &str, customer: &Customer) -> String {
    template
        .replace(NAME_PLACEHOLDER, &customer.name)
        .replace(SEGMENT_PLACEHOLDER, &customer.segment)
        .replace(LAST_PURCHASE_PLACEHOLDER, &customer.last_purchase)
        .replace(SENTIMENT_PLACEHOLDER, &customer.sentiment)
}

/// Named prompt template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub text: &'static str,
}

pub const PROMPT_LIBRARY: &[PromptTemplate] = &[
    PromptTemplate {
        id: "abandoned-cart",
        name: "Abandoned Cart Recovery",
        text: "Customer Profile: [Name] is a [Segment] customer who abandoned their cart. Current sentiment: [Sentiment]. Last purchase: [Last Purchase].\n\n\
               Mission: Create urgency to complete purchase. Use segment psychology - VIP gets exclusivity angle, Churn Risk gets win-back incentive, \
               New gets reassurance and social proof. Reference specific items they left behind. Drive immediate action.",
    },
    PromptTemplate {
        id: "vip-loyalty",
        name: "VIP Loyalty Reward",
        text: "Customer Profile: [Name] is a [Segment] customer. Last purchase: [Last Purchase]. Sentiment: [Sentiment].\n\n\
               Mission: Reward loyalty with exclusive perks. VIP segment gets early access and premium benefits. Regular segment gets appreciation \
               with upgrade path. Create sense of being valued and special. Include time-sensitive reward.",
    },
    PromptTemplate {
        id: "product-launch",
        name: "New Product Launch",
        text: "Customer Profile: [Name] is a [Segment] customer. Purchase history: [Last Purchase]. Sentiment: [Sentiment].\n\n\
               Mission: Generate excitement for new product launch. VIP gets first access, New customers get education + social proof, \
               Churn Risk gets comeback incentive. Create FOMO and anticipation. Include specific product benefits.",
    },
    PromptTemplate {
        id: "seasonal-sale",
        name: "Seasonal Sale Blast",
        text: "Customer Profile: [Name] ([Segment]) with [Sentiment] sentiment. Last engaged: [Last Purchase].\n\n\
               Mission: Drive seasonal purchases with targeted offers. Reference their past purchase patterns. VIP gets bigger discounts, \
               New gets welcome offer, Churn Risk gets aggressive win-back. Create urgency with limited time.",
    },
    PromptTemplate {
        id: "cross-sell",
        name: "Cross-Sell Recommendation",
        text: "Customer Profile: [Name] is a [Segment] customer. Previous purchase: [Last Purchase]. Current sentiment: [Sentiment].\n\n\
               Mission: Recommend complementary products based on purchase history. Use social proof and benefit stacking. \
               Create natural progression from what they already bought. Include bundle incentive.",
    },
    PromptTemplate {
        id: "service-recovery",
        name: "Service Recovery Apology",
        text: "Generate a personalized message for [Name] ([Segment] customer) who recently had an issue or refund. Their sentiment is [Sentiment].\n\n\
               Objective: Acknowledge their frustration, rebuild trust, and offer a goodwill gesture. Focus on the relationship over the transaction. \
               Honor provided image override if any.",
    },
    PromptTemplate {
        id: "churn-reengagement",
        name: "Churn Risk Re-Engagement",
        text: "Generate a personalized message for [Name] who is a [Segment] customer at risk of churning. Their last purchase was on [Last Purchase].\n\n\
               Objective: Re-engage them by using urgency (a limited-time discount) or curiosity (new arrivals) to spark a return purchase. \
               If an image override is provided, weave its theme into copy.",
    },
];

pub fn find_template(id: &str) -> Option<&'static PromptTemplate> {
    PROMPT_LIBRARY.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn maria() -> Customer {
        Customer {
            id: 2,
            name: "Maria Garcia".to_string(),
            segment: "New".to_string(),
            last_purchase: "2024-07-28".to_string(),
            sentiment: "Neutral".to_string(),
        }
    }

    #[test]
    fn test_system_instruction_carries_tone_and_persona() {
        let instruction = build_system_instruction(Tone::VipHype, Persona::EcoConscious);
        assert!(instruction.contains("Tone: VIP Hype."));
        assert!(instruction.contains("Persona: Eco-conscious."));
    }

    #[test]
    fn test_personalize_replaces_every_placeholder() {
        let prompt = personalize("[Name] / [Segment] / [Last Purchase] / [Sentiment] / [Name]", &maria());
        assert_eq!(prompt, "Maria Garcia / New / 2024-07-28 / Neutral / Maria Garcia");
    }

    #[test]
    fn test_library_templates_personalize_fully() {
        let ids: HashSet<&str> = PROMPT_LIBRARY.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), PROMPT_LIBRARY.len());

        for template in PROMPT_LIBRARY {
            let prompt = personalize(template.text, &maria());
            assert!(!prompt.contains('['), "unreplaced placeholder in {}", template.id);
        }
    }

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("VIP-Loyalty").map(|t| t.name), Some("VIP Loyalty Reward"));
        assert!(find_template("unknown").is_none());
    }
}
