//! Parsing of short effect labels such as ark-passive node descriptions.
//!
//! Matching runs an ordered chain, most specific first:
//! 1. [`match_tiered`]: `"[prefix] <N>티어 <name>[ Lv[.]<M>]"`
//! 2. [`match_leveled`]: `"<name> Lv[.]<M>"`
//! 3. the whole text as the skill name.
//!
//! The order matters: the leveled pattern also accepts tier-prefixed text
//! and would fold the tier into the name.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::markup::clean_text;

static TIERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+티어)\s+(.+?)(?:\s+(?i:Lv)\.?\s*(\d+))?$").expect("valid tiered regex")
});
static LEVELED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(?i:Lv)\.?\s*(\d+)$").expect("valid leveled regex")
});

/// Display-ready effect badge fields. Unmatched fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectDescriptor {
    pub tier: String,
    pub skill_name: String,
    pub level: String,
}

/// Parses an effect label into tier, skill name and level.
///
/// `None` input, or input with no text once markup is stripped, yields
/// `None`. Any other input yields a descriptor.
#[must_use]
pub fn parse_effect_description(desc: Option<&str>) -> Option<EffectDescriptor> {
    let text = clean_text(desc?);
    if text.is_empty() {
        return None;
    }

    let descriptor = match_tiered(&text)
        .or_else(|| match_leveled(&text))
        .unwrap_or_else(|| {
            tracing::debug!(text = %text, "effect description matched no pattern");
            EffectDescriptor {
                skill_name: text.clone(),
                ..EffectDescriptor::default()
            }
        });
    Some(descriptor)
}

/// `"1티어 수라의 길 Lv.1"` → tier `"1티어"`, name `"수라의 길"`, level `"1"`.
/// The level suffix is optional, and any text before the tier (such as the
/// `진화` category label) is dropped.
#[must_use]
pub fn match_tiered(text: &str) -> Option<EffectDescriptor> {
    let cap = TIERED_RE.captures(text)?;
    Some(EffectDescriptor {
        tier: cap.get(1)?.as_str().to_string(),
        skill_name: cap.get(2)?.as_str().trim().to_string(),
        level: cap
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

/// `"치명 Lv.30"` → name `"치명"`, level `"30"`, no tier.
#[must_use]
pub fn match_leveled(text: &str) -> Option<EffectDescriptor> {
    let cap = LEVELED_RE.captures(text)?;
    Some(EffectDescriptor {
        tier: String::new(),
        skill_name: cap.get(1)?.as_str().trim().to_string(),
        level: cap.get(2)?.as_str().to_string(),
    })
}
