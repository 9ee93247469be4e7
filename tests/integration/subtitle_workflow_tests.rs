/*!
 * Integration tests for the parse, sanitize and write workflow
 */

use anyhow::Result;
use std::fs;

use subsafe::sanitizer::{audit_cues, sanitize_subtitle_cues, SanitizePreset};
use subsafe::subtitle::{parse_subtitles, to_srt_windows, to_webvtt};

use crate::common;

/// Load a hostile file from disk, sanitize it and save a clean copy
#[test]
fn test_subtitle_workflow_withHostileFile_shouldWriteCleanCopy() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "hostile.srt", common::HOSTILE_SRT)?;

    // 1. Load and parse
    let content = fs::read_to_string(&source)?;
    let parsed = parse_subtitles(&content)?;
    assert_eq!(parsed.len(), 5);
    assert!(!audit_cues(&parsed.cues).is_empty());

    // 2. Sanitize
    let sanitized = sanitize_subtitle_cues(&parsed.cues);
    assert_eq!(sanitized.total_modified, 5);

    // 3. Save and reload
    let output = temp_dir.path().join("clean.srt");
    fs::write(&output, to_srt_windows(&sanitized.cues))?;
    let reloaded = parse_subtitles(&fs::read_to_string(&output)?)?;

    assert_eq!(reloaded.cues, sanitized.cues);
    assert!(audit_cues(&reloaded.cues).is_empty());
    Ok(())
}

/// WebVTT formatting survives the vtt preset and the writer
#[test]
fn test_subtitle_workflow_withVttPreset_shouldKeepSafeFormatting() -> Result<()> {
    let parsed = parse_subtitles(common::SAMPLE_VTT)?;
    let sanitized = SanitizePreset::Vtt.apply_to_cues(&parsed.cues, None);

    assert_eq!(sanitized.cues[0].text, "Hi <b>there</b>");
    assert_eq!(sanitized.cues[1].text, r#"<span style="color: yellow">Styled</span>"#);
    assert_eq!(sanitized.total_modified, 1);

    let written = to_webvtt(&sanitized.cues, parsed.metadata.header.as_deref());
    assert!(written.contains("<v Alice>Hi <b>there</b></v>"));

    let reparsed = parse_subtitles(&written)?;
    assert_eq!(reparsed.cues, sanitized.cues);
    Ok(())
}

/// Sanitized cues serialize with camelCase keys and no empty speaker
#[test]
fn test_subtitle_workflow_jsonOutput_shouldUseCamelCase() -> Result<()> {
    let parsed = parse_subtitles(common::SIMPLE_SRT)?;
    let sanitized = SanitizePreset::Plain.apply_to_cues(&parsed.cues, Some(10));

    let json = serde_json::to_value(&sanitized)?;
    assert_eq!(json["totalModified"], 3);
    assert_eq!(json["cues"][0]["startTime"], 1000);
    assert_eq!(json["cues"][0]["text"], "This is a");
    assert!(json["cues"][0].get("speaker").is_none());
    Ok(())
}
