//! Normalization of the pseudo-HTML markup embedded in tooltip strings.
//!
//! Upstream text uses a Flash-era subset: `<FONT COLOR='#RRGGBB'>`,
//! `<FONT SIZE='12'>`, `<TEXTFORMAT ...>`, `<BR>`, `<P ALIGN=...>`,
//! occasionally `<b>` and `<img ...></img>` icons. Tag names are upper- or
//! lower-case depending on the item class, so every pattern here is
//! case-insensitive.
//!
//! Three output forms are offered:
//! - [`strip_html`]: plain text, every tag removed.
//! - [`font_to_span`]: a narrow markup dialect containing only
//!   `<span style="color:...">` for renderers that accept pre-sanitized markup.
//! - [`StyledText`]: flat colored runs for renderers that draw natively.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static TEXTFORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?\s*textformat\b[^>]*>").expect("valid textformat regex")
});
static FONT_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<font\b[^>]*?\bcolor\s*=\s*['"]?([^'"\s>]+)['"]?[^>]*>(.*?)</font\s*>"#,
    )
    .expect("valid font color regex")
});
static FONT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?\s*font\b[^>]*>").expect("valid font tag regex"));
static COLOR_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bcolor\s*=\s*['"]?([^'"\s>]+)"#).expect("valid color attribute regex")
});

/// Removes every `<...>` tag and returns the remaining text unchanged.
///
/// A `<` with no closing `>` after it is kept as literal text, which makes the
/// function idempotent: stripping already-stripped text is a no-op.
#[must_use]
pub fn strip_html(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

/// Rewrites `<font color='X'>body</font>` into `<span style="color:X">body</span>`.
///
/// `<textformat>` wrappers are dropped, font tags that carry no color (or are
/// left unbalanced by the non-greedy match) are removed, and the result is
/// trimmed. The output is NOT escaped further.
#[must_use]
pub fn font_to_span(input: &str) -> String {
    let without_textformat = TEXTFORMAT_RE.replace_all(input, "");
    let spans = FONT_COLOR_RE.replace_all(
        &without_textformat,
        r#"<span style="color:${1}">${2}</span>"#,
    );
    let without_fonts = FONT_TAG_RE.replace_all(&spans, "");
    without_fonts.trim().to_string()
}

/// One run of text sharing a single color and weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledRun {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
}

/// Renderer-neutral text: an ordered list of flat, non-nested runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyledText {
    pub runs: Vec<StyledRun>,
}

impl StyledText {
    /// Unstyled text as a single run. Empty input yields no runs.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            runs: vec![StyledRun {
                text,
                color: None,
                bold: false,
            }],
        }
    }

    /// Builds runs from tooltip markup.
    ///
    /// Nested `<font>` tags push onto a color stack (a font without a color
    /// inherits the enclosing one), `<b>` toggles the weight flag and `<br>`
    /// becomes `\n`. Any other tag is dropped. Leading and trailing whitespace
    /// of the whole text is trimmed.
    #[must_use]
    pub fn from_markup(markup: &str) -> Self {
        let mut builder = RunBuilder::default();
        let mut cursor = 0;

        for tag in TAG_RE.find_iter(markup) {
            builder.push_text(&markup[cursor..tag.start()]);
            builder.apply_tag(tag.as_str());
            cursor = tag.end();
        }
        builder.push_text(&markup[cursor..]);

        let mut text = Self { runs: builder.runs };
        text.trim_edges();
        text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }

    /// Concatenated text of every run.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Splits on `\n`, keeping each run's style, and drops blank lines.
    #[must_use]
    pub fn lines(&self) -> Vec<StyledText> {
        let mut lines = Vec::new();
        let mut current = StyledText::default();

        for run in &self.runs {
            for (idx, piece) in run.text.split('\n').enumerate() {
                if idx > 0 {
                    lines.push(std::mem::take(&mut current));
                }
                if !piece.is_empty() {
                    current.push_run(StyledRun {
                        text: piece.to_string(),
                        color: run.color.clone(),
                        bold: run.bold,
                    });
                }
            }
        }
        lines.push(current);

        lines
            .into_iter()
            .map(|mut line| {
                line.trim_edges();
                line
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Re-encodes the runs in the `<span style="...">` dialect produced by
    /// [`font_to_span`]. Stray angle brackets in run text are escaped.
    #[must_use]
    pub fn to_span_markup(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            let text = run.text.replace('<', "&lt;").replace('>', "&gt;");
            let style = match (&run.color, run.bold) {
                (Some(color), true) => Some(format!("color:{color};font-weight:bold")),
                (Some(color), false) => Some(format!("color:{color}")),
                (None, true) => Some("font-weight:bold".to_string()),
                (None, false) => None,
            };
            match style {
                Some(style) => {
                    out.push_str(&format!("<span style=\"{style}\">{text}</span>"));
                }
                None => out.push_str(&text),
            }
        }
        out
    }

    fn push_run(&mut self, run: StyledRun) {
        if let Some(last) = self.runs.last_mut() {
            if last.color == run.color && last.bold == run.bold {
                last.text.push_str(&run.text);
                return;
            }
        }
        self.runs.push(run);
    }

    fn trim_edges(&mut self) {
        while let Some(first) = self.runs.first_mut() {
            let trimmed = first.text.trim_start();
            if trimmed.is_empty() {
                self.runs.remove(0);
            } else {
                first.text = trimmed.to_string();
                break;
            }
        }
        while let Some(last) = self.runs.last_mut() {
            let trimmed = last.text.trim_end();
            if trimmed.is_empty() {
                self.runs.pop();
            } else {
                last.text = trimmed.to_string();
                break;
            }
        }
    }
}

impl std::fmt::Display for StyledText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for run in &self.runs {
            f.write_str(&run.text)?;
        }
        Ok(())
    }
}

/// Markup split into styled lines on `<br>` and newlines, blank lines dropped.
#[must_use]
pub fn styled_lines(markup: &str) -> Vec<StyledText> {
    StyledText::from_markup(markup).lines()
}

/// Like [`styled_lines`] but plain text with inner whitespace collapsed.
#[must_use]
pub fn text_lines(markup: &str) -> Vec<String> {
    styled_lines(markup)
        .iter()
        .map(|line| collapse_whitespace(&line.plain_text()))
        .collect()
}

/// Plain text with every whitespace run collapsed to a single space.
#[must_use]
pub fn clean_text(markup: &str) -> String {
    collapse_whitespace(&strip_html(markup))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Default)]
struct RunBuilder {
    runs: Vec<StyledRun>,
    colors: Vec<Option<String>>,
    bold_depth: usize,
}

impl RunBuilder {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let color = self.colors.last().cloned().flatten();
        let bold = self.bold_depth > 0;
        if let Some(last) = self.runs.last_mut() {
            if last.color == color && last.bold == bold {
                last.text.push_str(text);
                return;
            }
        }
        self.runs.push(StyledRun {
            text: text.to_string(),
            color,
            bold,
        });
    }

    fn apply_tag(&mut self, tag: &str) {
        let Some((closing, name)) = tag_name(tag) else {
            return;
        };
        match (closing, name.as_str()) {
            (false, "font") => {
                let inherited = self.colors.last().cloned().flatten();
                let color = COLOR_ATTR_RE
                    .captures(tag)
                    .and_then(|cap| cap.get(1))
                    .map(|m| m.as_str().to_string())
                    .or(inherited);
                self.colors.push(color);
            }
            (true, "font") => {
                self.colors.pop();
            }
            (false, "b") => self.bold_depth += 1,
            (true, "b") => self.bold_depth = self.bold_depth.saturating_sub(1),
            (_, "br") => self.push_text("\n"),
            _ => {}
        }
    }
}

/// Returns `(is_closing, lowercase_name)` for a `<...>` tag.
fn tag_name(tag: &str) -> Option<(bool, String)> {
    let inner = tag.strip_prefix('<')?.trim_start();
    let (closing, rest) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, inner),
    };
    let name: String = rest
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some((closing, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // strip_html
    // -----------------------------------------------------------------------

    #[test]
    fn strip_html_removes_nested_font_tags() {
        let raw = "<FONT SIZE='12'><FONT COLOR='#E3C7A1'>고대 머리 방어구</FONT></FONT>";
        assert_eq!(strip_html(raw), "고대 머리 방어구");
    }

    #[test]
    fn strip_html_removes_malformed_tags_too() {
        assert_eq!(strip_html("a<<b>c<img src='x'></img>d"), "acd");
    }

    #[test]
    fn strip_html_keeps_unclosed_angle_bracket() {
        assert_eq!(strip_html("치명 < 특화"), "치명 < 특화");
    }

    #[test]
    fn strip_html_is_idempotent() {
        let inputs = [
            "<P ALIGN='CENTER'><FONT COLOR='#F99200'>+25 운명의 전율 투구</FONT></P>",
            "a<<b>c>d",
            "<a<b>>x",
            "plain text",
            "",
            "< not a tag",
        ];
        for input in inputs {
            let once = strip_html(input);
            assert_eq!(strip_html(&once), once, "input: {input:?}");
        }
    }

    // -----------------------------------------------------------------------
    // font_to_span
    // -----------------------------------------------------------------------

    #[test]
    fn font_to_span_rewrites_simple_font() {
        assert_eq!(
            font_to_span("<font color='#FF0000'>hi</font>"),
            "<span style=\"color:#FF0000\">hi</span>"
        );
    }

    #[test]
    fn font_to_span_is_case_insensitive() {
        assert_eq!(
            font_to_span("<FONT COLOR='#99ff99'>치명 +120</FONT>"),
            "<span style=\"color:#99ff99\">치명 +120</span>"
        );
    }

    #[test]
    fn font_to_span_drops_textformat_and_sizeless_fonts() {
        let raw = "  <TEXTFORMAT LEADING='-5'><FONT SIZE='12'><FONT COLOR='#FFD200'>세트</FONT> 효과</FONT></TEXTFORMAT> ";
        assert_eq!(
            font_to_span(raw),
            "<span style=\"color:#FFD200\">세트</span> 효과"
        );
    }

    #[test]
    fn font_to_span_handles_double_quoted_color() {
        assert_eq!(
            font_to_span(r##"<font color="#A9D0F5">기본 효과</font>"##),
            "<span style=\"color:#A9D0F5\">기본 효과</span>"
        );
    }

    // -----------------------------------------------------------------------
    // StyledText
    // -----------------------------------------------------------------------

    #[test]
    fn styled_text_tracks_color_runs() {
        let text = StyledText::from_markup("[<FONT COLOR='#FFFFAC'>원한</FONT>] 활성도 +6");
        assert_eq!(text.runs.len(), 3);
        assert_eq!(text.runs[0].text, "[");
        assert_eq!(text.runs[1].text, "원한");
        assert_eq!(text.runs[1].color.as_deref(), Some("#FFFFAC"));
        assert_eq!(text.runs[2].text, "] 활성도 +6");
        assert_eq!(text.plain_text(), "[원한] 활성도 +6");
    }

    #[test]
    fn styled_text_inherits_color_through_colorless_font() {
        let text =
            StyledText::from_markup("<FONT COLOR='#E3C7A1'><FONT SIZE='14'>고대</FONT></FONT>");
        assert_eq!(text.runs.len(), 1);
        assert_eq!(text.runs[0].color.as_deref(), Some("#E3C7A1"));
    }

    #[test]
    fn styled_text_marks_bold_runs() {
        let text = StyledText::from_markup("기본 <b>강조</b>");
        assert!(!text.runs[0].bold);
        assert!(text.runs[1].bold);
        assert_eq!(text.runs[1].text, "강조");
    }

    #[test]
    fn styled_text_survives_unbalanced_closing_tags() {
        let text = StyledText::from_markup("</FONT></b>텍스트</FONT>");
        assert_eq!(text.plain_text(), "텍스트");
    }

    #[test]
    fn styled_lines_split_on_br_and_keep_color() {
        let lines =
            styled_lines("<FONT COLOR='#99ff99'>치명 +512<BR>특화 +498</FONT><br/><BR>");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].plain_text(), "치명 +512");
        assert_eq!(lines[1].plain_text(), "특화 +498");
        assert_eq!(lines[1].runs[0].color.as_deref(), Some("#99ff99"));
    }

    #[test]
    fn text_lines_collapses_inner_whitespace() {
        let lines = text_lines("<img src='emoticon_tooltip_bracelet_locked'></img>  신속   +88");
        assert_eq!(lines, vec!["신속 +88".to_string()]);
    }

    #[test]
    fn to_span_markup_matches_font_to_span_dialect() {
        let text = StyledText::from_markup("<font color='#FF0000'>hi</font> there");
        assert_eq!(
            text.to_span_markup(),
            "<span style=\"color:#FF0000\">hi</span> there"
        );
    }

    #[test]
    fn to_span_markup_escapes_stray_brackets() {
        let text = StyledText::plain("a < b");
        assert_eq!(text.to_span_markup(), "a &lt; b");
    }

    #[test]
    fn clean_text_strips_and_collapses() {
        assert_eq!(clean_text("<P>  1티어   수라의 길 </P>"), "1티어 수라의 길");
    }
}
