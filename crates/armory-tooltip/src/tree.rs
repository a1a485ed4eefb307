//! Deserialization of raw tooltip payloads into an ordered node tree.
//!
//! ## Observed payload shape
//!
//! A tooltip is a JSON object keyed by sequentially numbered identifiers
//! (`"Element_000"`, `"Element_001"`, ...). Each value is normally
//! `{"type": "<tag>", "value": <payload>}` where the payload is a string, an
//! object of further numbered entries, or `null`. Object key order in the
//! serialized form is not trusted, so nodes are sorted by the digits embedded
//! in their key.
//!
//! Some API responses wrap the object in a JSON string (double encoding);
//! that outer layer is unwrapped once.
//!
//! Tags the engine does not know become [`NodeKind::Unknown`] and keep their
//! entire raw value so text collection can still reach into them.

use serde_json::{Map, Value};

use crate::error::TooltipError;
use crate::markup::strip_html;

/// Presentation node tags with a known meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeKind {
    /// Item name banner above the title block.
    NameTagBox,
    /// Title block: grade/type line, item level line, quality gauge.
    ItemTitle,
    /// Title block of a skill tooltip.
    CommonSkillTitle,
    SingleTextBox,
    MultiTextBox,
    /// Bordered box: first entry is the box title, the rest are body lines.
    ItemPartBox,
    /// Groups of indented bullet lines under an optional heading.
    IndentStringGroup,
    Progress,
    SetItemGroup,
    /// Anything else. Holds the raw tag (empty when the node had none).
    Unknown(String),
}

impl NodeKind {
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "NameTagBox" => Self::NameTagBox,
            "ItemTitle" => Self::ItemTitle,
            "CommonSkillTitle" => Self::CommonSkillTitle,
            "SingleTextBox" => Self::SingleTextBox,
            "MultiTextBox" => Self::MultiTextBox,
            "ItemPartBox" => Self::ItemPartBox,
            "IndentStringGroup" => Self::IndentStringGroup,
            "Progress" => Self::Progress,
            "SetItemGroup" => Self::SetItemGroup,
            other => Self::Unknown(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

/// Numeric pair carried by a `Progress` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gauge {
    /// Raw markup of the gauge caption, if any.
    pub title: Option<String>,
    pub current: u32,
    pub max: u32,
}

/// Kind-specific node data.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    Text(String),
    Lines(Vec<String>),
    Fields(Map<String, Value>),
    Gauge(Gauge),
    /// Unrecognized shape, or the whole raw node for [`NodeKind::Unknown`].
    Raw(Value),
}

impl NodePayload {
    fn from_value(kind: &NodeKind, value: Value) -> Self {
        match (kind, value) {
            (NodeKind::Progress, Value::Object(fields)) => {
                Self::Gauge(gauge_from_fields(&fields))
            }
            (_, Value::String(text)) => Self::Text(text),
            (_, Value::Object(fields)) => Self::Fields(fields),
            (_, Value::Array(items)) if items.iter().all(Value::is_string) => Self::Lines(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            (_, other) => Self::Raw(other),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_fields(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// Depth-first search for the first value stored under `key`.
    #[must_use]
    pub fn find_field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Fields(fields) => find_in_map(fields, key),
            Self::Raw(value) => find_field(value, key),
            Self::Text(_) | Self::Lines(_) | Self::Gauge(_) => None,
        }
    }

    /// Markup-stripped, non-blank string leaves in source order.
    #[must_use]
    pub fn text_leaves(&self) -> Vec<String> {
        let mut out = Vec::new();
        match self {
            Self::Text(text) => push_leaf(text, &mut out),
            Self::Lines(lines) => lines.iter().for_each(|line| push_leaf(line, &mut out)),
            Self::Fields(fields) => push_map_leaves(fields, &mut out),
            Self::Gauge(gauge) => {
                if let Some(title) = &gauge.title {
                    push_leaf(title, &mut out);
                }
            }
            Self::Raw(value) => push_leaves(value, &mut out),
        }
        out
    }
}

/// One addressable node of a parsed tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipNode {
    pub key: String,
    pub kind: NodeKind,
    pub payload: NodePayload,
}

/// Parsed tooltip: nodes in ascending key-ordinal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipTree {
    nodes: Vec<TooltipNode>,
}

impl TooltipTree {
    #[must_use]
    pub fn nodes(&self) -> &[TooltipNode] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes of one kind, in order.
    pub fn nodes_of<'a>(&'a self, kind: &'a NodeKind) -> impl Iterator<Item = &'a TooltipNode> {
        self.nodes.iter().filter(move |node| &node.kind == kind)
    }

    /// Every text leaf of every node, unknown nodes included.
    #[must_use]
    pub fn collect_text(&self) -> Vec<String> {
        self.nodes
            .iter()
            .flat_map(|node| node.payload.text_leaves())
            .collect()
    }
}

/// Parses a raw tooltip, returning `None` for anything that is not a JSON object.
#[must_use]
pub fn parse_tooltip(raw: &str) -> Option<TooltipTree> {
    match try_parse_tooltip(raw) {
        Ok(tree) => Some(tree),
        Err(error) => {
            tracing::debug!(%error, len = raw.len(), "tooltip payload could not be parsed");
            None
        }
    }
}

/// Fallible form of [`parse_tooltip`] for callers that want the reason.
///
/// # Errors
///
/// Returns [`TooltipError`] when the input is blank, not JSON, or not a JSON
/// object (after unwrapping one level of string encoding).
pub fn try_parse_tooltip(raw: &str) -> Result<TooltipTree, TooltipError> {
    if raw.trim().is_empty() {
        return Err(TooltipError::Empty);
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|source| TooltipError::InvalidJson { source })?;

    let fields = match value {
        Value::Object(fields) => fields,
        Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(TooltipError::NotAnObject {
                    found: value_kind(&other),
                })
            }
            Err(_) => return Err(TooltipError::NotAnObject { found: "string" }),
        },
        other => {
            return Err(TooltipError::NotAnObject {
                found: value_kind(&other),
            })
        }
    };

    let mut nodes: Vec<TooltipNode> = fields
        .into_iter()
        .map(|(key, value)| build_node(key, value))
        .collect();
    nodes.sort_by(|a, b| ordering_key(&a.key).cmp(&ordering_key(&b.key)));

    Ok(TooltipTree { nodes })
}

fn build_node(key: String, value: Value) -> TooltipNode {
    let tag = value.get("type").and_then(Value::as_str).map(str::to_owned);
    let kind = tag
        .as_deref()
        .map_or_else(|| NodeKind::Unknown(String::new()), NodeKind::from_tag);

    let payload = if kind.is_unknown() {
        NodePayload::Raw(value)
    } else {
        let inner = match value {
            Value::Object(mut fields) => fields.remove("value").unwrap_or(Value::Null),
            other => other,
        };
        NodePayload::from_value(&kind, inner)
    };

    TooltipNode { key, kind, payload }
}

fn gauge_from_fields(fields: &Map<String, Value>) -> Gauge {
    let title = fields
        .get("title")
        .and_then(Value::as_str)
        .filter(|s| !strip_html(s).trim().is_empty())
        .map(str::to_owned);
    Gauge {
        title,
        current: fields.get("value").map_or(0, value_to_u32),
        max: fields.get("maximum").map_or(0, value_to_u32),
    }
}

/// Reads a non-negative integer from a number or numeric string; anything else is `0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn value_to_u32(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok(),
        _ => None,
    };
    raw.map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Sort key for node identifiers: keys with an embedded ordinal first, in
/// numeric order, then the rest by plain string order.
fn ordering_key(key: &str) -> (bool, u64, &str) {
    match key_ordinal(key) {
        Some(ordinal) => (false, ordinal, key),
        None => (true, 0, key),
    }
}

/// Trailing digits of a key (`"Element_012"` → `12`), else its first digit run.
pub(crate) fn key_ordinal(key: &str) -> Option<u64> {
    let head = key.trim_end_matches(|c: char| c.is_ascii_digit());
    if head.len() < key.len() {
        return key[head.len()..].parse().ok();
    }
    let rest = key.trim_start_matches(|c: char| !c.is_ascii_digit());
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Map entries sorted the same way top-level nodes are.
pub(crate) fn ordered_entries(fields: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|(a, _), (b, _)| ordering_key(a).cmp(&ordering_key(b)));
    entries
}

/// Recursively collects every string leaf under `value`, markup stripped.
///
/// Objects are walked in key-ordinal order and arrays in index order; blank
/// leaves are skipped. Use this to search a subtree for text whose node kind
/// is not modelled.
#[must_use]
pub fn collect_text(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    push_leaves(value, &mut out);
    out
}

/// [`collect_text`] joined with newlines, ready for substring or regex search.
#[must_use]
pub fn collect_text_joined(value: &Value) -> String {
    collect_text(value).join("\n")
}

/// Depth-first search for the first value stored under `key`.
#[must_use]
pub fn find_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => find_in_map(fields, key),
        Value::Array(items) => items.iter().find_map(|item| find_field(item, key)),
        _ => None,
    }
}

fn find_in_map<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(found) = fields.get(key) {
        return Some(found);
    }
    ordered_entries(fields)
        .into_iter()
        .find_map(|(_, child)| find_field(child, key))
}

fn push_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) => push_leaf(text, out),
        Value::Array(items) => items.iter().for_each(|item| push_leaves(item, out)),
        Value::Object(fields) => push_map_leaves(fields, out),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn push_map_leaves(fields: &Map<String, Value>, out: &mut Vec<String>) {
    for (_, child) in ordered_entries(fields) {
        push_leaves(child, out);
    }
}

fn push_leaf(text: &str, out: &mut Vec<String>) {
    let stripped = strip_html(text);
    let trimmed = stripped.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
