//! Narrow, independent extractors for the scalar facts list rows need.
//!
//! Every `extract_*` function takes the raw tooltip (or item name) and
//! degrades to "no data" on malformed input. The `*_in` variants take an
//! already parsed [`TooltipTree`] so a caller that memoizes the parse can
//! pull several facts without reparsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::colors::KNOWN_GRADES;
use crate::markup::{clean_text, strip_html, text_lines};
use crate::section::{indent_item_markups, quality_from_value};
use crate::tree::{ordered_entries, parse_tooltip, NodeKind, TooltipTree};

static ENHANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+(\d+)").expect("valid enhance regex"));
static TIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"티어\s*(\d+)").expect("valid tier regex"));
static ITEM_LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"아이템\s*레벨\s*([\d,]+)").expect("valid item level regex"));
static RANK_LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*랭크\s*(\d+)\s*레벨").expect("valid rank regex"));
static ENGRAVING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*([^\]]+?)\s*\]\s*(?:활성도\s*\+?\s*(\d+)|(?i:Lv)\.?\s*(\d+))?")
        .expect("valid engraving regex")
});
static BARE_ENGRAVING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*(?:활성도\s*\+?\s*(\d+)|(?i:Lv)\.?\s*(\d+))?$")
        .expect("valid bare engraving regex")
});
static NEGATIVE_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)color\s*=\s*['"]?#?FE2E2E"#).expect("valid negative color regex")
});

/// Part-box titles whose lines are accessory secondary stats.
const ACCESSORY_STAT_BOXES: [&str; 2] = ["추가 효과", "연마 효과"];
/// Part-box titles whose lines are bracelet stats.
const BRACELET_STAT_BOXES: [&str; 1] = ["팔찌 효과"];
/// Indent-group heading fragment marking ability-stone engravings.
const STONE_ENGRAVING_HEADING: &str = "각인 효과";
/// Stone engravings that are always penalties.
const NEGATIVE_ENGRAVINGS: [&str; 4] = ["공격력 감소", "방어력 감소", "공격속도 감소", "이동속도 감소"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub tier: u32,
    /// `0` when the tier line carried no item level.
    pub item_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoneEngraving {
    pub name: String,
    /// Display-ready level digits; empty when the entry had none.
    pub level: String,
    pub is_negative: bool,
}

/// Every scalar fact of one item, from a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFacts {
    pub quality: Option<i32>,
    pub enhance_level: Option<u32>,
    pub tier_info: Option<TierInfo>,
    pub grade: Option<String>,
    pub rank_and_level: Option<(u32, u32)>,
    pub accessory_stats: Vec<String>,
    pub bracelet_stats: Vec<String>,
    pub stone_engravings: Vec<StoneEngraving>,
}

impl ItemFacts {
    /// Parses `raw` once and runs every extractor. `name` feeds only the
    /// enhancement level.
    #[must_use]
    pub fn from_tooltip(name: &str, raw: &str) -> Self {
        let enhance_level = extract_enhance_level(name);
        match parse_tooltip(raw) {
            Some(tree) => Self {
                enhance_level,
                ..Self::from_tree(&tree)
            },
            None => Self {
                enhance_level,
                ..Self::default()
            },
        }
    }

    /// Facts derivable from the tree alone (`enhance_level` stays `None`).
    #[must_use]
    pub fn from_tree(tree: &TooltipTree) -> Self {
        Self {
            quality: quality_in(tree),
            enhance_level: None,
            tier_info: tier_info_in(tree),
            grade: item_grade_in(tree),
            rank_and_level: rank_and_level_in(tree),
            accessory_stats: accessory_stats_in(tree),
            bracelet_stats: bracelet_stats_in(tree),
            stone_engravings: stone_engravings_in(tree),
        }
    }
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Item quality: `None` when the tooltip has no quality marker at all,
/// `Some(-1)` when the marker says "not ranked", else `Some(0..=100)`.
#[must_use]
pub fn extract_quality(raw: &str) -> Option<i32> {
    parse_tooltip(raw).and_then(|tree| quality_in(&tree))
}

/// The title block's marker wins; otherwise the first marker anywhere.
#[must_use]
pub fn quality_in(tree: &TooltipTree) -> Option<i32> {
    let from_title = tree
        .nodes_of(&NodeKind::ItemTitle)
        .find_map(|node| node.payload.as_fields()?.get("qualityValue"));
    from_title
        .or_else(|| {
            tree.nodes()
                .iter()
                .find_map(|node| node.payload.find_field("qualityValue"))
        })
        .map(quality_from_value)
}

// ---------------------------------------------------------------------------
// Enhancement level
// ---------------------------------------------------------------------------

/// Leading `+N` of an item name (`"+15 칼날 방패"` → `15`).
///
/// Reads only the name; markup around it is stripped first.
#[must_use]
pub fn extract_enhance_level(name: &str) -> Option<u32> {
    let stripped = strip_html(name);
    ENHANCE_RE
        .captures(stripped.trim())
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

// ---------------------------------------------------------------------------
// Tier and item level
// ---------------------------------------------------------------------------

#[must_use]
pub fn extract_item_tier_and_level(raw: &str) -> Option<TierInfo> {
    parse_tooltip(raw).and_then(|tree| tier_info_in(&tree))
}

/// Finds the first line mentioning a tier, preferring the title block.
///
/// The item level is read from that same line; a tier with no level yields
/// `item_level: 0`.
#[must_use]
pub fn tier_info_in(tree: &TooltipTree) -> Option<TierInfo> {
    let title_line = tree
        .nodes_of(&NodeKind::ItemTitle)
        .filter_map(|node| node.payload.as_fields()?.get("leftStr2")?.as_str())
        .map(clean_text)
        .find_map(|line| tier_info_from_line(&line));
    title_line.or_else(|| {
        tree.collect_text()
            .iter()
            .find_map(|line| tier_info_from_line(line))
    })
}

fn tier_info_from_line(line: &str) -> Option<TierInfo> {
    let tier = TIER_RE
        .captures(line)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())?;
    let item_level = ITEM_LEVEL_RE
        .captures(line)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
        .unwrap_or(0);
    Some(TierInfo { tier, item_level })
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Grade word leading the title's type line (`"고대 머리 방어구"` → `"고대"`).
#[must_use]
pub fn extract_item_grade(raw: &str) -> Option<String> {
    parse_tooltip(raw).and_then(|tree| item_grade_in(&tree))
}

#[must_use]
pub fn item_grade_in(tree: &TooltipTree) -> Option<String> {
    tree.nodes_of(&NodeKind::ItemTitle)
        .filter_map(|node| node.payload.as_fields()?.get("leftStr0")?.as_str())
        .map(clean_text)
        .find_map(|line| {
            let first = line.split_whitespace().next()?;
            KNOWN_GRADES
                .iter()
                .find(|grade| first.starts_with(*grade))
                .map(|grade| (*grade).to_string())
        })
}

// ---------------------------------------------------------------------------
// Rank / level
// ---------------------------------------------------------------------------

/// First `"N랭크 M레벨"` found anywhere in the tooltip text.
#[must_use]
pub fn extract_rank_and_level(raw: &str) -> Option<(u32, u32)> {
    parse_tooltip(raw).and_then(|tree| rank_and_level_in(&tree))
}

#[must_use]
pub fn rank_and_level_in(tree: &TooltipTree) -> Option<(u32, u32)> {
    let text = tree.collect_text().join("\n");
    let cap = RANK_LEVEL_RE.captures(&text)?;
    let rank = cap.get(1)?.as_str().parse().ok()?;
    let level = cap.get(2)?.as_str().parse().ok()?;
    Some((rank, level))
}

// ---------------------------------------------------------------------------
// Accessory / bracelet stat lines
// ---------------------------------------------------------------------------

#[must_use]
pub fn extract_accessory_stats(raw: &str) -> Vec<String> {
    parse_tooltip(raw)
        .map(|tree| accessory_stats_in(&tree))
        .unwrap_or_default()
}

#[must_use]
pub fn accessory_stats_in(tree: &TooltipTree) -> Vec<String> {
    part_box_lines(tree, &ACCESSORY_STAT_BOXES)
}

#[must_use]
pub fn extract_bracelet_stats(raw: &str) -> Vec<String> {
    parse_tooltip(raw)
        .map(|tree| bracelet_stats_in(&tree))
        .unwrap_or_default()
}

#[must_use]
pub fn bracelet_stats_in(tree: &TooltipTree) -> Vec<String> {
    part_box_lines(tree, &BRACELET_STAT_BOXES)
}

/// Body lines of every part box whose title contains one of `titles`.
fn part_box_lines(tree: &TooltipTree, titles: &[&str]) -> Vec<String> {
    let mut lines = Vec::new();
    for node in tree.nodes_of(&NodeKind::ItemPartBox) {
        let Some(fields) = node.payload.as_fields() else {
            continue;
        };
        let mut entries = ordered_entries(fields).into_iter();
        let Some(title) = entries.next().and_then(|(_, value)| value.as_str()) else {
            continue;
        };
        let title = clean_text(title);
        if !titles.iter().any(|wanted| title.contains(wanted)) {
            continue;
        }
        lines.extend(
            entries
                .filter_map(|(_, value)| value.as_str())
                .flat_map(text_lines),
        );
    }
    lines
}

// ---------------------------------------------------------------------------
// Ability stone engravings
// ---------------------------------------------------------------------------

#[must_use]
pub fn extract_stone_engravings(raw: &str) -> Vec<StoneEngraving> {
    parse_tooltip(raw)
        .map(|tree| stone_engravings_in(&tree))
        .unwrap_or_default()
}

/// Engravings listed under an indent group headed "... 각인 효과".
#[must_use]
pub fn stone_engravings_in(tree: &TooltipTree) -> Vec<StoneEngraving> {
    let mut engravings = Vec::new();
    for node in tree.nodes_of(&NodeKind::IndentStringGroup) {
        let Some(fields) = node.payload.as_fields() else {
            continue;
        };
        for (_, group) in ordered_entries(fields) {
            let Some(group) = group.as_object() else {
                continue;
            };
            let heading = group
                .get("topStr")
                .and_then(Value::as_str)
                .map(clean_text)
                .unwrap_or_default();
            if !heading.contains(STONE_ENGRAVING_HEADING) {
                continue;
            }
            let Some(content) = group.get("contentStr") else {
                continue;
            };
            engravings.extend(
                indent_item_markups(content)
                    .iter()
                    .filter_map(|markup| parse_engraving_entry(markup)),
            );
        }
    }
    engravings
}

/// Parses `"[<FONT ...>name</FONT>] 활성도 +6"` or `"[name] Lv.2"`.
///
/// Entries without brackets keep everything before the level suffix as the
/// name, so a bare `"공격력 감소 Lv.1"` still counts.
fn parse_engraving_entry(markup: &str) -> Option<StoneEngraving> {
    let text = clean_text(markup);
    let cap = ENGRAVING_RE
        .captures(&text)
        .or_else(|| BARE_ENGRAVING_RE.captures(&text))?;
    let name = cap.get(1)?.as_str().trim().to_string();
    if name.is_empty() {
        return None;
    }
    let level = cap
        .get(2)
        .or_else(|| cap.get(3))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let is_negative = is_negative_engraving(markup, &name);
    Some(StoneEngraving {
        name,
        level,
        is_negative,
    })
}

/// Whether a stone engraving entry is a penalty.
///
/// Upstream has no sign field. Penalties are drawn in the debuff red
/// (`#FE2E2E`) and are always one of a handful of stat reductions; either
/// signal marks the entry negative.
#[must_use]
pub fn is_negative_engraving(entry_markup: &str, name: &str) -> bool {
    NEGATIVE_COLOR_RE.is_match(entry_markup) || NEGATIVE_ENGRAVINGS.contains(&name.trim())
}

#[cfg(test)]
#[path = "facts_test.rs"]
mod tests;
