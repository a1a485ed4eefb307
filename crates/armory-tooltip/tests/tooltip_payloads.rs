//! End-to-end tests over whole tooltip payloads shaped like the armory API
//! returns them: string in, sections and facts out.

use serde_json::json;

use armory_tooltip::{
    collect_text, extract_all_tooltip_sections, font_to_span, parse_tooltip, strip_html,
    try_parse_tooltip, ItemFacts, TooltipError, TooltipSection, NO_QUALITY,
};

/// A full weapon tooltip with one node of every modelled kind.
fn weapon_payload() -> serde_json::Value {
    json!({
        "Element_000": {"type": "NameTagBox", "value": "<P ALIGN='CENTER'><FONT COLOR='#E3C7A1'>+22 운명의 업화 대검</FONT></P>"},
        "Element_001": {"type": "ItemTitle", "value": {
            "leftStr0": "<FONT SIZE='12'><FONT COLOR='#E3C7A1'>고대 무기</FONT></FONT>",
            "leftStr2": "<FONT SIZE='14'>아이템 레벨 1,700 (티어 4)</FONT>",
            "qualityValue": 100
        }},
        "Element_2": {"type": "SingleTextBox", "value": "<FONT SIZE='12'>버서커 전용</FONT>"},
        "Element_3": {"type": "ItemPartBox", "value": {
            "Element_000": "<FONT COLOR='#A9D0F5'>기본 효과</FONT>",
            "Element_001": "무기 공격력 +101,202"
        }},
        "Element_9": {"type": "Progress", "value": {
            "title": "<FONT COLOR='#FFFFFF'>상급 재련 경험치</FONT>",
            "value": 0,
            "maximum": 0
        }},
        "Element_10": {"type": "SetItemGroup", "value": {
            "firstMsg": "<FONT COLOR='#91FE02'>세트 효과</FONT>",
            "itemData": {"Element_000": {"label": "업화 세트"}}
        }},
        "Element_11": {"type": "ShowMeTheMoney", "value": "<FONT COLOR='#FFFFFF'>거래 불가</FONT>"}
    })
}

fn section_kind(section: &TooltipSection) -> &'static str {
    match section {
        TooltipSection::Title { .. } => "title",
        TooltipSection::Text { .. } => "text",
        TooltipSection::PartBox { .. } => "partBox",
        TooltipSection::Indent { .. } => "indent",
        TooltipSection::Progress { .. } => "progress",
        TooltipSection::Set { .. } => "set",
    }
}

#[test]
fn full_payload_sections_follow_numeric_key_order() {
    let raw = weapon_payload().to_string();
    let sections = extract_all_tooltip_sections(&raw);
    let kinds: Vec<_> = sections.iter().map(section_kind).collect();
    assert_eq!(kinds, vec!["title", "text", "partBox", "progress", "set"]);

    match &sections[0] {
        TooltipSection::Title {
            item_name,
            tier_line,
            quality_value,
        } => {
            assert_eq!(item_name.plain_text(), "+22 운명의 업화 대검");
            assert_eq!(tier_line.as_deref(), Some("아이템 레벨 1,700 (티어 4)"));
            assert_eq!(*quality_value, 100);
        }
        other => panic!("expected title, got {other:?}"),
    }
    assert!(sections[3].is_empty_progress());
    match &sections[4] {
        TooltipSection::Set { text } => {
            assert_eq!(text, "세트 효과\n업화 세트");
        }
        other => panic!("expected set, got {other:?}"),
    }
}

#[test]
fn double_encoded_payload_matches_plain_payload() {
    let plain = weapon_payload().to_string();
    let wrapped = serde_json::Value::String(plain.clone()).to_string();
    assert_eq!(
        extract_all_tooltip_sections(&wrapped),
        extract_all_tooltip_sections(&plain)
    );
}

#[test]
fn facts_from_full_payload() {
    let raw = weapon_payload().to_string();
    let facts = ItemFacts::from_tooltip("+22 운명의 업화 대검", &raw);
    assert_eq!(facts.quality, Some(100));
    assert_eq!(facts.enhance_level, Some(22));
    let tier = facts.tier_info.expect("tier line present");
    assert_eq!((tier.tier, tier.item_level), (4, 1700));
    assert_eq!(facts.grade.as_deref(), Some("고대"));
    assert!(facts.accessory_stats.is_empty());
    assert!(facts.stone_engravings.is_empty());
}

#[test]
fn arbitrary_input_never_panics() {
    let inputs = [
        "",
        "   ",
        "null",
        "42",
        "true",
        "[]",
        "\"\"",
        "\"{}\"",
        "\"[1,2]\"",
        "{",
        "{}",
        r#"{"a":null}"#,
        r#"{"Element_000":{"type":"ItemTitle","value":null}}"#,
        r#"{"Element_000":{"type":"Progress","value":"x"}}"#,
        r#"{"Element_000":{"type":"IndentStringGroup","value":[1,{"x":2}]}}"#,
        r#"{"Element_000":{"type":42}}"#,
        "<FONT COLOR='#FFF'>not json</FONT>",
    ];
    for input in inputs {
        let _ = extract_all_tooltip_sections(input);
        let _ = ItemFacts::from_tooltip(input, input);
        let _ = font_to_span(input);
        assert_eq!(strip_html(&strip_html(input)), strip_html(input));
    }
}

#[test]
fn rejection_reasons_are_reported() {
    assert!(matches!(try_parse_tooltip("  "), Err(TooltipError::Empty)));
    assert!(matches!(
        try_parse_tooltip("{"),
        Err(TooltipError::InvalidJson { .. })
    ));
    assert!(matches!(
        try_parse_tooltip("[]"),
        Err(TooltipError::NotAnObject { found: "array" })
    ));
    assert!(parse_tooltip("[]").is_none());
}

#[test]
fn font_to_span_rewrites_colored_font() {
    assert_eq!(
        font_to_span("<font color='#FF0000'>hi</font>"),
        r#"<span style="color:#FF0000">hi</span>"#
    );
    assert_eq!(
        font_to_span("<TEXTFORMAT LEADING='2'><FONT SIZE='12'>plain</FONT></TEXTFORMAT>  "),
        "plain"
    );
}

#[test]
fn collect_text_reads_unmodelled_subtrees() {
    let payload = weapon_payload();
    let set_node = &payload["Element_10"]["value"];
    assert_eq!(collect_text(set_node), vec!["세트 효과", "업화 세트"]);
}

#[test]
fn sections_serialize_with_type_tag() {
    let raw = json!({
        "Element_000": {"type": "ItemTitle", "value": {"leftStr0": "유물 팔찌"}}
    })
    .to_string();
    let sections = extract_all_tooltip_sections(&raw);
    let value = serde_json::to_value(&sections).expect("sections serialize");
    assert_eq!(value[0]["type"], "title");
    assert_eq!(value[0]["qualityValue"], NO_QUALITY);
}
