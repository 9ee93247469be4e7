/*!
 * Common test utilities for the subsafe test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use subsafe::subtitle::Cue;

/// Three clean SRT cues
pub const SIMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// SRT carrying a payload in every dangerous category
pub const HOSTILE_SRT: &str = "1
00:00:01,000 --> 00:00:02,000
<script>alert('xss')</script>Hello

2
00:00:02,500 --> 00:00:03,000
<img src=x onerror=alert(1)>World

3
00:00:03,500 --> 00:00:04,000
<a href=\"javascript:steal()\">Click</a>

4
00:00:04,500 --> 00:00:05,000
<iframe src=\"https://evil.example\"></iframe><b>Bold</b>

5
00:00:05,500 --> 00:00:06,000
&lt;script&gt;alert(1)&lt;/script&gt;Encoded
";

/// WebVTT with header text, a NOTE, a STYLE block and voice tags
pub const SAMPLE_VTT: &str = "WEBVTT - Sample

NOTE this is a comment

STYLE
::cue { color: red }

intro
00:00:01.000 --> 00:00:03.000 align:start
<v Alice>Hi <b>there</b></v>

00:00:04.000 --> 00:00:06.500
<span style=\"color: yellow; position: absolute\">Styled</span>
";

/// Route library logs to the test harness; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// `count` cues one second apart with plain text
pub fn numbered_cues(count: usize) -> Vec<Cue> {
    (0..count)
        .map(|i| Cue::new(i, i as u64 * 1000, i as u64 * 1000 + 800, format!("Line number {}", i)))
        .collect()
}
