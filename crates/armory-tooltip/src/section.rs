//! Conversion of a parsed tooltip into renderer-facing sections.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::markup::{clean_text, strip_html, styled_lines, StyledText};
use crate::tree::{
    collect_text, ordered_entries, parse_tooltip, NodeKind, NodePayload, TooltipNode,
    TooltipTree,
};

/// Quality value reported when a title block carries no quality.
pub const NO_QUALITY: i32 = -1;

/// One displayable block of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TooltipSection {
    /// `quality_value < 0` means the item has no displayable quality.
    Title {
        item_name: StyledText,
        tier_line: Option<String>,
        quality_value: i32,
    },
    Text {
        lines: Vec<StyledText>,
    },
    PartBox {
        title: String,
        lines: Vec<StyledText>,
    },
    Indent {
        label: Option<StyledText>,
        items: Vec<StyledText>,
    },
    /// A `0 / 0` gauge is still emitted; hiding it is up to the renderer.
    Progress {
        title: Option<StyledText>,
        current: u32,
        max: u32,
    },
    Set {
        text: String,
    },
}

impl TooltipSection {
    /// True for a gauge that carries no data (`current == 0 && max == 0`).
    #[must_use]
    pub fn is_empty_progress(&self) -> bool {
        matches!(self, Self::Progress { current: 0, max: 0, .. })
    }
}

/// Parses `raw` and extracts every section; unparseable input yields no sections.
#[must_use]
pub fn extract_all_tooltip_sections(raw: &str) -> Vec<TooltipSection> {
    parse_tooltip(raw)
        .map(|tree| sections_in(&tree))
        .unwrap_or_default()
}

/// Extracts sections from an already parsed tree, in node order.
///
/// A `NameTagBox` supplies the item name of the following `ItemTitle` block
/// (the name is empty without one) and emits nothing of its own; only when the tree has no `ItemTitle` does
/// it become a bare [`TooltipSection::Title`].
#[must_use]
pub fn sections_in(tree: &TooltipTree) -> Vec<TooltipSection> {
    let has_item_title = tree.nodes_of(&NodeKind::ItemTitle).next().is_some();
    let mut pending_name = tree
        .nodes_of(&NodeKind::NameTagBox)
        .find_map(|node| node.payload.as_text());

    let mut sections = Vec::new();
    for node in tree.nodes() {
        match &node.kind {
            NodeKind::NameTagBox => {
                if !has_item_title {
                    if let Some(name) = node.payload.as_text() {
                        sections.push(TooltipSection::Title {
                            item_name: StyledText::from_markup(name),
                            tier_line: None,
                            quality_value: NO_QUALITY,
                        });
                    }
                }
            }
            NodeKind::ItemTitle => match node.payload.as_fields() {
                Some(fields) => sections.push(item_title(fields, pending_name.take())),
                None => skip_malformed(node),
            },
            NodeKind::CommonSkillTitle => match node.payload.as_fields() {
                Some(fields) => sections.push(skill_title(fields)),
                None => skip_malformed(node),
            },
            NodeKind::SingleTextBox | NodeKind::MultiTextBox => match text_markup(&node.payload) {
                Some(markup) => sections.push(TooltipSection::Text {
                    lines: styled_lines(&markup),
                }),
                None => skip_malformed(node),
            },
            NodeKind::ItemPartBox => match part_box(&node.payload) {
                Some(section) => sections.push(section),
                None => skip_malformed(node),
            },
            NodeKind::IndentStringGroup => match node.payload.as_fields() {
                Some(fields) => sections.extend(indent_groups(fields)),
                None => skip_malformed(node),
            },
            NodeKind::Progress => match &node.payload {
                NodePayload::Gauge(gauge) => sections.push(TooltipSection::Progress {
                    title: gauge
                        .title
                        .as_deref()
                        .map(StyledText::from_markup)
                        .filter(|title| !title.is_empty()),
                    current: gauge.current,
                    max: gauge.max,
                }),
                _ => skip_malformed(node),
            },
            NodeKind::SetItemGroup => {
                let text = node.payload.text_leaves().join("\n");
                sections.push(TooltipSection::Set { text });
            }
            NodeKind::Unknown(tag) => {
                tracing::debug!(key = %node.key, tag = %tag, "skipping unrecognized tooltip node");
            }
        }
    }
    sections
}

fn skip_malformed(node: &TooltipNode) {
    tracing::debug!(
        key = %node.key,
        kind = ?node.kind,
        "tooltip node payload has an unexpected shape"
    );
}

fn item_title(fields: &Map<String, Value>, name_markup: Option<&str>) -> TooltipSection {
    // leftStr0 is the grade/type line, not a name.
    let name_markup = name_markup.unwrap_or_default();
    let tier_line = fields
        .get("leftStr2")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|line| !line.is_empty());
    let quality_value = fields
        .get("qualityValue")
        .map_or(NO_QUALITY, quality_from_value);

    TooltipSection::Title {
        item_name: StyledText::from_markup(name_markup),
        tier_line,
        quality_value,
    }
}

fn skill_title(fields: &Map<String, Value>) -> TooltipSection {
    let name_markup = fields
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let tier_line = fields
        .get("level")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|line| !line.is_empty());

    TooltipSection::Title {
        item_name: StyledText::from_markup(name_markup),
        tier_line,
        quality_value: NO_QUALITY,
    }
}

/// Reads a quality marker value, clamped into `-1..=100`.
///
/// Negative numbers, `null` and anything non-numeric all mean "present but
/// unranked" and map to `-1`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn quality_from_value(value: &Value) -> i32 {
    let number = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n >= 0 => i32::try_from(n.min(100)).unwrap_or(100),
        _ => NO_QUALITY,
    }
}

fn text_markup(payload: &NodePayload) -> Option<String> {
    match payload {
        NodePayload::Text(text) => Some(text.clone()),
        NodePayload::Lines(lines) => Some(lines.join("\n")),
        NodePayload::Raw(Value::Null) => Some(String::new()),
        _ => None,
    }
}

fn part_box(payload: &NodePayload) -> Option<TooltipSection> {
    match payload {
        NodePayload::Fields(fields) => {
            let entries = ordered_entries(fields);
            let mut entries = entries.into_iter();
            let title = entries
                .next()
                .and_then(|(_, value)| value.as_str())
                .map(clean_text)
                .unwrap_or_default();
            let lines = entries
                .filter_map(|(_, value)| value.as_str())
                .flat_map(styled_lines)
                .collect();
            Some(TooltipSection::PartBox { title, lines })
        }
        NodePayload::Text(text) => Some(TooltipSection::PartBox {
            title: String::new(),
            lines: styled_lines(text),
        }),
        _ => None,
    }
}

/// One [`TooltipSection::Indent`] per group entry of an `IndentStringGroup`.
fn indent_groups(fields: &Map<String, Value>) -> Vec<TooltipSection> {
    ordered_entries(fields)
        .into_iter()
        .filter_map(|(_, group)| group.as_object())
        .map(|group| {
            let label = group
                .get("topStr")
                .and_then(Value::as_str)
                .map(StyledText::from_markup)
                .filter(|label| !label.is_empty());
            let items = group
                .get("contentStr")
                .map(indent_item_markups)
                .unwrap_or_default()
                .iter()
                .map(|markup| StyledText::from_markup(markup))
                .filter(|item| !item.is_empty())
                .collect();
            TooltipSection::Indent { label, items }
        })
        .collect()
}

/// Raw markup of every bullet under an indent group's `contentStr`.
///
/// Entries are either plain strings or `{"contentStr": "...", "bPoint": ...}`
/// objects; anything else contributes its collected text.
pub(crate) fn indent_item_markups(content: &Value) -> Vec<String> {
    match content {
        Value::String(text) => vec![text.clone()],
        Value::Object(entries) => ordered_entries(entries)
            .into_iter()
            .filter_map(|(_, entry)| match entry {
                Value::String(text) => Some(text.clone()),
                Value::Object(item) => match item.get("contentStr") {
                    Some(Value::String(text)) => Some(text.clone()),
                    _ => Some(collect_text(entry).join(" ")),
                },
                Value::Null => None,
                other => Some(collect_text(other).join(" ")),
            })
            .filter(|markup| !strip_html(markup).trim().is_empty())
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "section_test.rs"]
mod tests;
