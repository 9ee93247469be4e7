/*!
 * Integration tests for batch translation through the mock provider
 */

use std::sync::Arc;

use subsafe::app_config::TranslationConfig;
use subsafe::errors::TranslationError;
use subsafe::providers::MockProvider;
use subsafe::subtitle::{parse_srt, Cue};
use subsafe::translation::BatchTranslator;

use crate::common;

fn test_config(batch_size: usize, concurrent_requests: usize) -> TranslationConfig {
    TranslationConfig {
        batch_size,
        context_size: 1,
        concurrent_requests,
        retry_backoff_ms: vec![0],
        ..TranslationConfig::default()
    }
}

/// Many batches in flight still come back in source order
#[tokio::test]
async fn test_translateCues_withConcurrentBatches_shouldPreserveOrder() {
    common::init_logging();
    let cues = common::numbered_cues(25);
    let provider = Arc::new(MockProvider::working());
    let translator = BatchTranslator::new(provider.clone(), test_config(4, 3));

    let translated = translator.translate_cues(&cues).await.unwrap();

    assert_eq!(translated.len(), 25);
    for (source, output) in cues.iter().zip(&translated) {
        assert_eq!(output.index, source.index);
        assert_eq!(output.start_time, source.start_time);
        assert_eq!(output.text, format!("[xx] {}", source.text));
    }
    assert_eq!(provider.request_count(), 7);
}

/// Hostile cue text never reaches the provider as markup
#[tokio::test]
async fn test_translateCues_withHostileCues_shouldSendSanitizedPrompts() {
    common::init_logging();
    let cues = parse_srt(common::HOSTILE_SRT).cues;
    let provider = Arc::new(MockProvider::working());
    let translator = BatchTranslator::new(provider.clone(), test_config(2, 1));

    let translated = translator.translate_cues(&cues).await.unwrap();

    for prompt in provider.prompts() {
        assert!(!prompt.contains("<script"));
        assert!(!prompt.contains("<iframe"));
        assert!(!prompt.contains("onerror"));
        assert!(!prompt.contains("javascript:"));
    }
    for cue in &translated {
        assert!(!cue.text.contains('<'), "markup in {:?}", cue.text);
    }
}

#[tokio::test]
async fn test_translateCues_withFailingProvider_shouldReturnProviderError() {
    let translator = BatchTranslator::new(Arc::new(MockProvider::failing()), test_config(5, 2));

    let result = translator.translate_cues(&common::numbered_cues(3)).await;

    assert!(matches!(result, Err(TranslationError::Provider(_))));
}

#[tokio::test]
async fn test_translateCues_withNoCues_shouldNotCallProvider() {
    let provider = Arc::new(MockProvider::working());
    let translator = BatchTranslator::new(provider.clone(), test_config(5, 2));

    let translated: Vec<Cue> = translator.translate_cues(&[]).await.unwrap();

    assert!(translated.is_empty());
    assert_eq!(provider.request_count(), 0);
}
