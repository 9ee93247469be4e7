/*!
 * Tests for the sanitizer engine, presets and threat detection
 */

use std::str::FromStr;

use subsafe::sanitizer::{
    audit_cues, contains_dangerous_content, detect_threats, escape_html, is_subtitle_text_safe,
    remove_dangerous_patterns, sanitize_css_value, sanitize_for_dom, sanitize_plain_text,
    sanitize_style, sanitize_subtitle_text, sanitize_translation, sanitize_vtt_cue,
    strip_html_tags, unescape_html, SanitizeOptions, SanitizePreset, ThreatTag,
};
use subsafe::subtitle::parse_srt;

use crate::common;

/// Test the script removal example
#[test]
fn test_sanitizeSubtitleText_withScript_shouldRemoveAndFlag() {
    let options = SanitizeOptions::default();
    let result = sanitize_subtitle_text("<script>evil()</script>Hello", &options);
    assert_eq!(result.text, "Hello");
    assert!(result.was_modified);
}

/// Test the style allowlist example
#[test]
fn test_sanitizeVttCue_withMixedStyle_shouldKeepOnlyAllowedProperties() {
    let output = sanitize_vtt_cue(r#"<span style="color: yellow; position: absolute">Text</span>"#);
    assert!(output.contains("color: yellow"));
    assert!(!output.contains("position"));
    assert_eq!(output, r#"<span style="color: yellow">Text</span>"#);
}

#[test]
fn test_sanitizeVttCue_withEventHandlerOnAllowedTag_shouldDropAttribute() {
    assert_eq!(sanitize_vtt_cue(r#"<b onmouseover="x()">Hover</b>"#), "<b>Hover</b>");
}

#[test]
fn test_presets_onHostileFile_shouldNeutraliseEveryCue() {
    let cues = parse_srt(common::HOSTILE_SRT).cues;

    let default = SanitizePreset::Default.apply_to_cues(&cues, None);
    let texts: Vec<&str> = default.cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "World", "Click", "Bold", "Encoded"]);
    assert_eq!(default.total_modified, 5);

    let vtt = SanitizePreset::Vtt.apply_to_cues(&cues, None);
    assert_eq!(vtt.cues[3].text, "<b>Bold</b>");

    for cue in SanitizePreset::Plain.apply_to_cues(&cues, None).cues {
        assert!(is_subtitle_text_safe(&cue.text), "unsafe output {:?}", cue.text);
        assert!(!cue.text.contains('<'));
    }
}

#[test]
fn test_presetNone_shouldLeaveTextUntouched() {
    let cues = parse_srt(common::HOSTILE_SRT).cues;
    let result = SanitizePreset::None.apply_to_cues(&cues, Some(3));

    assert_eq!(result.total_modified, 0);
    assert_eq!(result.cues, cues);
}

#[test]
fn test_sanitizeForDom_shouldEscapeEverythingLeft() {
    assert_eq!(
        sanitize_for_dom("<b>Bold</b> & <script>x()</script>"),
        "&lt;b&gt;Bold&lt;/b&gt; &amp; "
    );
    assert_eq!(sanitize_translation("it's \"fine\""), "it&#39;s &quot;fine&quot;");
}

#[test]
fn test_sanitizePlainText_withMaxLength_shouldCountCharacters() {
    let options = SanitizeOptions::PLAIN_TEXT.with_max_length(5);
    let result = sanitize_subtitle_text("<i>ありがとう</i>ございます", &options);
    assert_eq!(result.text, "ありがとう");
    assert_eq!(sanitize_plain_text("<u>Under</u>"), "Under");
}

#[test]
fn test_sanitizePreset_fromStr_shouldAcceptAnyCase() {
    assert_eq!(SanitizePreset::from_str("VTT").unwrap(), SanitizePreset::Vtt);
    assert_eq!(SanitizePreset::Translation.to_string(), "translation");
    assert!(SanitizePreset::from_str("strict").is_err());
}

#[test]
fn test_sanitizeCssValue_shouldRejectExecutableValues() {
    assert_eq!(sanitize_css_value("font-weight", " bold "), Some("bold".to_string()));
    assert_eq!(sanitize_css_value("color", "red"), Some("red".to_string()));
    assert_eq!(sanitize_css_value("color", "expression(alert(1))"), None);
    assert_eq!(sanitize_css_value("background-color", "url(javascript:x)"), None);
    assert_eq!(sanitize_css_value("position", "absolute"), None);
    assert_eq!(
        sanitize_style("font-style: italic; top: 0; color: blue"),
        "font-style: italic; color: blue"
    );
}

#[test]
fn test_removeDangerousPatterns_shouldReportCategories() {
    let result = remove_dangerous_patterns("<!-- hi --><svg onload=x()><form>a</form></svg>ok");
    assert_eq!(result.text, "ok");
    assert!(result.removed.contains(&ThreatTag::HtmlComment));
    assert!(result.removed.contains(&ThreatTag::SvgTag));
}

#[test]
fn test_stripHtmlTags_shouldRemoveEveryBracketedSpan() {
    assert_eq!(strip_html_tags("<i>a</i> < b > c"), "a  c");
    assert_eq!(sanitize_plain_text("x &lt; y &gt; z"), "x z");
    assert_eq!(sanitize_plain_text("I <3 subtitles"), "I <3 subtitles");
}

#[test]
fn test_sanitizeSubtitleText_withMultiLineCue_shouldJoinLines() {
    let result = sanitize_subtitle_text("<i>Line one</i>\nLine two", &SanitizeOptions::default());
    assert_eq!(result.text, "Line one Line two");
    assert!(result.was_modified);

    let clean = sanitize_subtitle_text("Line one\nLine two", &SanitizeOptions::default());
    assert_eq!(clean.text, "Line one Line two");
    assert!(!clean.was_modified);
}

#[test]
fn test_sanitizeSubtitleText_withTwentyEncodingLayers_shouldBeIdempotent() {
    let encoded = (0..20).fold("<b>x</b>".to_string(), |acc, _| escape_html(&acc));
    let options = SanitizeOptions::default();

    let once = sanitize_subtitle_text(&encoded, &options);
    let twice = sanitize_subtitle_text(&once.text, &options);

    assert_eq!(once.text, "x");
    assert_eq!(twice.text, once.text);
    assert!(!twice.was_modified);
}

#[test]
fn test_dangerousContent_withUntypedDataUrls_shouldBeDetectedAndRemoved() {
    let text = r#"<a href="data:,alert(1)">x</a>"#;
    assert_eq!(detect_threats(text), vec![ThreatTag::DataUrl]);
    assert!(contains_dangerous_content("data:;base64,PHNjcmlwdD4="));

    let removed = remove_dangerous_patterns("data:;base64,PHNjcmlwdD4=");
    assert_eq!(removed.text, "base64,PHNjcmlwdD4=");
    assert_eq!(sanitize_css_value("background-color", "data:,x"), None);
}

#[test]
fn test_escapeHtml_thenUnescape_shouldRestoreText() {
    let text = "<a href='x'>Tom & \"Jerry\"</a>";
    assert_eq!(unescape_html(&escape_html(text)), text);
}

#[test]
fn test_detectThreats_onHostileFile_shouldAuditPerCue() {
    let cues = parse_srt(common::HOSTILE_SRT).cues;
    let report = audit_cues(&cues);

    let indices: Vec<usize> = report.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(report[0].threats, vec![ThreatTag::ScriptTag]);
    assert_eq!(report[1].threats, vec![ThreatTag::EventHandler]);
    assert_eq!(report[2].threats, vec![ThreatTag::JavascriptUrl]);
    assert_eq!(report[3].threats, vec![ThreatTag::Iframe]);
}

#[test]
fn test_containsDangerousContent_withOrdinaryProse_shouldBeFalse() {
    for text in ["Meet me at one = two o'clock", "The data: all of it", "<i>Plain</i> italics"] {
        assert!(!contains_dangerous_content(text), "false positive on {:?}", text);
        assert!(detect_threats(text).is_empty());
    }
}
