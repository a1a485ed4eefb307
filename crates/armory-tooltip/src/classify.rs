//! Coarse item categories keyed by the upstream equipment type label.

use serde::Serialize;

const ARMOR_TYPES: [&str; 6] = ["투구", "어깨", "상의", "하의", "장갑", "무기"];
const ACCESSORY_TYPES: [&str; 3] = ["목걸이", "귀걸이", "반지"];
const BRACELET_TYPES: [&str; 1] = ["팔찌"];
const STONE_TYPES: [&str; 1] = ["어빌리티 스톤"];
const ELIXIR_TYPES: [&str; 2] = ["나침반", "부적"];
const JEWEL_TYPES: [&str; 1] = ["보주"];

/// Compact labels for list rows; labels not listed pass through unchanged.
const SHORT_TYPES: [(&str, &str); 5] = [
    ("어빌리티 스톤", "스톤"),
    ("목걸이", "목걸"),
    ("귀걸이", "귀걸"),
    ("나침반", "나침"),
    ("보주", "보주"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemTypeCategory {
    Armor,
    Accessory,
    Bracelet,
    Stone,
    Elixir,
    Jewel,
    Other,
}

impl std::fmt::Display for ItemTypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemTypeCategory::Armor => write!(f, "armor"),
            ItemTypeCategory::Accessory => write!(f, "accessory"),
            ItemTypeCategory::Bracelet => write!(f, "bracelet"),
            ItemTypeCategory::Stone => write!(f, "stone"),
            ItemTypeCategory::Elixir => write!(f, "elixir"),
            ItemTypeCategory::Jewel => write!(f, "jewel"),
            ItemTypeCategory::Other => write!(f, "other"),
        }
    }
}

fn is_member(set: &[&str], label: &str) -> bool {
    set.contains(&label.trim())
}

#[must_use]
pub fn is_armor_type(label: &str) -> bool {
    is_member(&ARMOR_TYPES, label)
}

#[must_use]
pub fn is_accessory_type(label: &str) -> bool {
    is_member(&ACCESSORY_TYPES, label)
}

#[must_use]
pub fn is_bracelet_type(label: &str) -> bool {
    is_member(&BRACELET_TYPES, label)
}

#[must_use]
pub fn is_stone_type(label: &str) -> bool {
    is_member(&STONE_TYPES, label)
}

#[must_use]
pub fn is_elixir_type(label: &str) -> bool {
    is_member(&ELIXIR_TYPES, label)
}

#[must_use]
pub fn is_jewel_type(label: &str) -> bool {
    is_member(&JEWEL_TYPES, label)
}

/// Category of a type label; unknown labels are [`ItemTypeCategory::Other`].
#[must_use]
pub fn classify_item_type(label: &str) -> ItemTypeCategory {
    if is_armor_type(label) {
        ItemTypeCategory::Armor
    } else if is_accessory_type(label) {
        ItemTypeCategory::Accessory
    } else if is_bracelet_type(label) {
        ItemTypeCategory::Bracelet
    } else if is_stone_type(label) {
        ItemTypeCategory::Stone
    } else if is_elixir_type(label) {
        ItemTypeCategory::Elixir
    } else if is_jewel_type(label) {
        ItemTypeCategory::Jewel
    } else {
        ItemTypeCategory::Other
    }
}

#[must_use]
pub fn short_type(label: &str) -> &str {
    let trimmed = label.trim();
    SHORT_TYPES
        .iter()
        .find(|(full, _)| *full == trimmed)
        .map_or(label, |(_, short)| *short)
}
