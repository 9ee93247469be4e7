/*!
 * Tests for error types and conversions
 */

use std::io;

use subsafe::errors::{AppError, ProviderError, SubtitleError, TranslationError};
use subsafe::subtitle::parse_subtitles;
use subsafe::subtitle::{parse_srt_timestamp, parse_vtt_timestamp, SubtitleFormat};

#[test]
fn test_timestampParse_shouldNameFormatAndInput() {
    let error = parse_srt_timestamp("00:61:00,000").unwrap_err();
    assert_eq!(
        error,
        SubtitleError::TimestampParse {
            format: SubtitleFormat::Srt,
            input: "00:61:00,000".to_string()
        }
    );
    assert_eq!(error.to_string(), "Invalid SRT timestamp: '00:61:00,000'");

    let error = parse_vtt_timestamp("1:02.000").unwrap_err();
    assert!(error.to_string().contains("WebVTT"));
}

#[test]
fn test_providerError_isRetryable_shouldSeparateTransientFailures() {
    assert!(ProviderError::RequestFailed("timeout".into()).is_retryable());
    assert!(ProviderError::RateLimitExceeded("slow down".into()).is_retryable());
    assert!(ProviderError::ApiError { status_code: 503, message: "busy".into() }.is_retryable());
    assert!(!ProviderError::ApiError { status_code: 400, message: "bad".into() }.is_retryable());
    assert!(!ProviderError::AuthenticationError("key".into()).is_retryable());
    assert!(!ProviderError::ParseError("json".into()).is_retryable());
}

#[test]
fn test_errorConversions_shouldWrapSources() {
    let translation: TranslationError = ProviderError::ParseError("x".into()).into();
    assert!(matches!(translation, TranslationError::Provider(_)));
    assert!(translation.to_string().starts_with("Provider error:"));

    let app: AppError = parse_subtitles("no cues here").unwrap_err().into();
    assert!(matches!(app, AppError::Subtitle(SubtitleError::FormatParse { .. })));
    assert!(app.to_string().starts_with("Subtitle error:"));

    let app: AppError = io::Error::new(io::ErrorKind::NotFound, "missing.srt").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app, AppError::Unknown(_)));
}
