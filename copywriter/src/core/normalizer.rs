//! Deterministic post-processing of generated variants
//!
//! The provider cannot be trusted to respect hard formatting limits, so every
//! variant passes through these rules before it reaches the caller. All rules
//! are idempotent: normalizing an already normalized variant is a no-op.

use regex::{Captures, Regex};
use shared::{EmailContent, GeneratedVariants, ImageEmailContent, SmsContent, VariantContent};

use crate::error::{CopywriterError, CopywriterResult};

pub const DEFAULT_SUBJECT_WORD_CAP: usize = 8;
pub const DEFAULT_SMS_CHAR_CAP: usize = 160;
pub const DEFAULT_FALLBACK_COUPON: &str = "SAVE15";
pub const DEFAULT_CTA_PREFIX: &str = "Shop";

const DEFAULT_CTA_VERBS: [&str; 10] = [
    "shop", "claim", "get", "discover", "unlock", "grab", "secure", "explore", "buy", "order",
];
const DEFAULT_SMS_DENYLIST: [&str; 4] = ["exquisite", "patiently awaiting", "valued customer", "selections"];

const ELLIPSIS: &str = "...";
/// A re-split point must leave at least this many characters after it
const SMS_SPLIT_TAIL: usize = 20;

const GREETING_PATTERN: &str = r"(?i)^(?:\s*(?:hi there|hello|hope you['’]re well),)+\s*";
const OPENER_PATTERN: &str = r"(?i)^(?:hello|hi there)\b[\s,!.]*";

/// Formatting policy applied to every variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationPolicy {
    pub subject_word_cap: usize,
    /// Cap on `part1 + " " + part2`, in characters
    pub sms_char_cap: usize,
    pub fallback_coupon: String,
    /// Verb prepended to CTAs that contain no action verb
    pub cta_prefix: String,
    pub cta_verbs: Vec<String>,
    pub sms_denylist: Vec<String>,
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        Self {
            subject_word_cap: DEFAULT_SUBJECT_WORD_CAP,
            sms_char_cap: DEFAULT_SMS_CHAR_CAP,
            fallback_coupon: DEFAULT_FALLBACK_COUPON.to_string(),
            cta_prefix: DEFAULT_CTA_PREFIX.to_string(),
            cta_verbs: DEFAULT_CTA_VERBS.iter().map(|v| v.to_string()).collect(),
            sms_denylist: DEFAULT_SMS_DENYLIST.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl NormalizationPolicy {
    /// Reject policies under which normalization could not be idempotent
    pub fn validate(&self) -> CopywriterResult<()> {
        if self.subject_word_cap == 0 {
            return Err(CopywriterError::config("subject word cap must be at least 1"));
        }
        if self.sms_char_cap <= ELLIPSIS.len() {
            return Err(CopywriterError::config(format!(
                "SMS character cap must exceed {}, got {}",
                ELLIPSIS.len(),
                self.sms_char_cap
            )));
        }
        if self.fallback_coupon.is_empty()
            || !self.fallback_coupon.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(CopywriterError::config(format!(
                "fallback coupon must be non-empty [A-Z0-9], got {:?}",
                self.fallback_coupon
            )));
        }
        let prefix = self.cta_prefix.to_lowercase();
        if !self.cta_verbs.iter().any(|verb| prefix.contains(&verb.to_lowercase())) {
            return Err(CopywriterError::config(format!(
                "CTA prefix {:?} must contain one of the action verbs",
                self.cta_prefix
            )));
        }
        Ok(())
    }
}

/// Applies a [`NormalizationPolicy`] to generated variants
pub struct Normalizer {
    policy: NormalizationPolicy,
    cta_verbs: Vec<String>,
    repeated_bangs: Regex,
    repeated_questions: Regex,
    greeting: Regex,
    opener: Regex,
    denylist: Option<Regex>,
    contractions: Vec<(Regex, &'static str)>,
    repeated_spaces: Regex,
}

impl Normalizer {
    pub fn new(policy: NormalizationPolicy) -> CopywriterResult<Self> {
        policy.validate()?;

        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| CopywriterError::config(format!("invalid pattern {:?}: {}", pattern, e)))
        };

        let denylist = if policy.sms_denylist.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = policy
                .sms_denylist
                .iter()
                .map(|phrase| regex::escape(phrase.trim()).replace(' ', r"\s+"))
                .collect();
            Some(compile(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))?)
        };

        let contractions = vec![
            (compile(r"(?i)\byou\s+are\b")?, "you're"),
            (compile(r"(?i)\bdo\s+not\b")?, "don't"),
            (compile(r"(?i)\bcannot\b")?, "can't"),
        ];

        Ok(Self {
            cta_verbs: policy.cta_verbs.iter().map(|v| v.to_lowercase()).collect(),
            repeated_bangs: compile(r"!{2,}")?,
            repeated_questions: compile(r"\?{2,}")?,
            greeting: compile(GREETING_PATTERN)?,
            opener: compile(OPENER_PATTERN)?,
            denylist,
            contractions,
            repeated_spaces: compile(r"[ \t]{2,}")?,
            policy,
        })
    }

    pub fn policy(&self) -> &NormalizationPolicy {
        &self.policy
    }

    pub fn normalize_variants(&self, variants: &GeneratedVariants) -> GeneratedVariants {
        GeneratedVariants {
            a: self.normalize(&variants.a),
            b: self.normalize(&variants.b),
        }
    }

    pub fn normalize(&self, content: &VariantContent) -> VariantContent {
        match content {
            VariantContent::ImageEmail(email) => VariantContent::ImageEmail(ImageEmailContent {
                subject: self.normalize_subject(&email.subject),
                body: self.normalize_body(&email.body),
                image_url: email.image_url.clone(),
                cta_text: self.normalize_cta(&email.cta_text),
                coupon_code: email.coupon_code.as_deref().map(|code| self.normalize_coupon(code)),
            }),
            VariantContent::TextEmail(email) => VariantContent::TextEmail(EmailContent {
                subject: self.normalize_subject(&email.subject),
                body: self.normalize_body(&email.body),
            }),
            VariantContent::Sms(sms) => VariantContent::Sms(self.normalize_sms(sms)),
        }
    }

    /// Trim, collapse repeated `!`/`?`, and cap the word count
    pub fn normalize_subject(&self, subject: &str) -> String {
        let collapsed = self.repeated_bangs.replace_all(subject.trim(), "!");
        let collapsed = self.repeated_questions.replace_all(&collapsed, "?");

        let words: Vec<&str> = collapsed.split_whitespace().collect();
        if words.len() > self.policy.subject_word_cap {
            words[..self.policy.subject_word_cap].join(" ")
        } else {
            collapsed.into_owned()
        }
    }

    /// Trim and drop generic greetings at the very start
    pub fn normalize_body(&self, body: &str) -> String {
        self.greeting.replace(body.trim(), "").trim().to_string()
    }

    /// Force action orientation on the call to action
    pub fn normalize_cta(&self, cta: &str) -> String {
        let trimmed = cta.trim();
        if trimmed.is_empty() {
            return format!("{} Now", self.policy.cta_prefix);
        }

        let lower = trimmed.to_lowercase();
        if self.cta_verbs.iter().any(|verb| lower.contains(verb.as_str())) {
            trimmed.to_string()
        } else {
            format!("{} {}", self.policy.cta_prefix, trimmed)
        }
    }

    /// Uppercase, keep only `[A-Z0-9]`, fall back when nothing is left
    pub fn normalize_coupon(&self, code: &str) -> String {
        let cleaned: String = code
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            .collect();

        if cleaned.is_empty() {
            self.policy.fallback_coupon.clone()
        } else {
            cleaned
        }
    }

    /// Tone rewrites and the combined length cap, run to a fixed point
    ///
    /// Every rewrite that changes the text makes it strictly shorter, so the
    /// loop always terminates.
    pub fn normalize_sms(&self, sms: &SmsContent) -> SmsContent {
        let mut current = (sms.part1.clone(), sms.part2.clone());

        loop {
            let next = self.sms_pass(&current.0, current.1.as_deref());
            if next == current {
                break;
            }
            current = next;
        }

        SmsContent {
            part1: current.0,
            part2: current.1,
        }
    }

    fn sms_pass(&self, part1: &str, part2: Option<&str>) -> (String, Option<String>) {
        let part1 = self.rewrite_sms_part(part1);
        let part2 = part2
            .map(|p| self.rewrite_sms_part(p))
            .filter(|p| !p.is_empty());

        self.enforce_sms_length(part1, part2)
    }

    fn rewrite_sms_part(&self, text: &str) -> String {
        let mut text = match &self.denylist {
            Some(denylist) => self.strip_denylisted(denylist, text),
            None => text.to_string(),
        };

        text = self.opener.replace(&text, "Hey ").into_owned();

        for (pattern, replacement) in &self.contractions {
            text = pattern
                .replace_all(&text, |caps: &Captures| match_case(&caps[0], replacement))
                .into_owned();
        }

        self.repeated_spaces.replace_all(&text, " ").trim().to_string()
    }

    // A deletion can join the halves of a nested phrase into a new match
    fn strip_denylisted(&self, denylist: &Regex, text: &str) -> String {
        let mut text = text.to_string();
        loop {
            let stripped = denylist.replace_all(&text, "");
            let stripped = self.repeated_spaces.replace_all(&stripped, " ").into_owned();
            if stripped == text {
                return text;
            }
            text = stripped;
        }
    }

    fn enforce_sms_length(&self, part1: String, part2: Option<String>) -> (String, Option<String>) {
        let cap = self.policy.sms_char_cap;
        let combined_len = part1.chars().count() + part2.as_ref().map_or(0, |p| 1 + p.chars().count());
        if combined_len <= cap {
            return (part1, part2);
        }

        let combined = match part2 {
            Some(part2) => format!("{} {}", part1, part2),
            None => part1,
        };

        let mut chars: Vec<char> = combined.chars().take(cap - ELLIPSIS.len()).collect();
        chars.extend(ELLIPSIS.chars());

        let len = chars.len();
        let midpoint = len / 2;
        let upper = len.saturating_sub(SMS_SPLIT_TAIL);
        let split = chars
            .iter()
            .enumerate()
            .filter(|(i, c)| **c == ' ' && *i > 0 && *i < upper)
            .min_by_key(|(i, _)| i.abs_diff(midpoint))
            .map(|(i, _)| i);

        match split {
            Some(index) => {
                let head: String = chars[..index].iter().collect();
                let tail: String = chars[index + 1..].iter().collect();
                (head.trim_end().to_string(), Some(tail.trim_start().to_string()))
            }
            None => (chars.into_iter().collect(), None),
        }
    }
}

// Carry the capitalisation of the first matched letter over to the replacement
fn match_case(matched: &str, replacement: &str) -> String {
    if matched.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
