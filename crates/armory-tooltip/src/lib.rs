//! Lost Ark armory tooltip decoding and fact extraction.
//!
//! Every public entry point is total: malformed or unexpected input yields
//! an empty result or `None`, never a panic. [`try_parse_tooltip`] is the
//! one place that reports why a payload was rejected.

pub mod classify;
pub mod colors;
pub mod effect;
pub mod error;
pub mod facts;
pub mod markup;
pub mod section;
pub mod tree;

pub use classify::{classify_item_type, short_type, ItemTypeCategory};
pub use colors::{ark_passive_colors, grade_color, CategoryColors};
pub use effect::{parse_effect_description, EffectDescriptor};
pub use error::TooltipError;
pub use facts::{
    extract_accessory_stats, extract_bracelet_stats, extract_enhance_level, extract_item_grade,
    extract_item_tier_and_level, extract_quality, extract_rank_and_level,
    extract_stone_engravings, ItemFacts, StoneEngraving, TierInfo,
};
pub use markup::{clean_text, font_to_span, strip_html, StyledRun, StyledText};
pub use section::{extract_all_tooltip_sections, sections_in, TooltipSection, NO_QUALITY};
pub use tree::{
    collect_text, collect_text_joined, find_field, parse_tooltip, try_parse_tooltip, NodeKind,
    NodePayload, TooltipNode, TooltipTree,
};
