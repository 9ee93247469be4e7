/*!
 * Batch translation driver.
 *
 * Cues are split into batches, each batch becomes one prompt, and up to
 * `concurrent_requests` prompts are in flight at once. Results come back in
 * batch order. A translated line is sanitized as plain text before it
 * replaces the source text; a missing line keeps the source text.
 */

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::batch::{create_batches, TranslationBatch};
use super::prompts::{build_translation_prompt, parse_translation_response};
use crate::app_config::TranslationConfig;
use crate::errors::TranslationError;
use crate::providers::TranslationProvider;
use crate::sanitizer::sanitize_plain_text;
use crate::subtitle::Cue;

/// Drives a provider over a cue list
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    provider: Arc<dyn TranslationProvider>,
    config: TranslationConfig,
}

impl BatchTranslator {
    pub fn new(provider: Arc<dyn TranslationProvider>, config: TranslationConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// Translate every cue, returning cues with the same timing in the same order.
    ///
    /// # Errors
    /// Fails on a non-retryable provider error, or when a batch is still
    /// failing or empty after `max_retries` retries.
    pub async fn translate_cues(&self, cues: &[Cue]) -> Result<Vec<Cue>, TranslationError> {
        if cues.is_empty() {
            return Ok(Vec::new());
        }

        let batches = create_batches(cues, self.config.batch_size, self.config.context_size);
        let total_batches = batches.len();
        let start_time = Instant::now();
        info!(
            "Translating {} cues in {} batches with provider '{}'",
            cues.len(),
            total_batches,
            self.provider.name()
        );

        let translated: Vec<Vec<Cue>> = stream::iter(batches.iter().enumerate())
            .map(|(batch_number, batch)| self.translate_batch(batch_number, total_batches, batch))
            .buffered(self.config.concurrent_requests.max(1))
            .try_collect()
            .await?;

        info!("Translation finished in {:?}", start_time.elapsed());
        Ok(translated.into_iter().flatten().collect())
    }

    async fn translate_batch(
        &self,
        batch_number: usize,
        total_batches: usize,
        batch: &TranslationBatch,
    ) -> Result<Vec<Cue>, TranslationError> {
        let prompt = build_translation_prompt(batch, &self.config.target_language);
        let expected = batch.cues.len();
        let mut attempt: u32 = 0;

        loop {
            debug!(
                "Batch {}/{} (cues {}-{}), attempt {}",
                batch_number + 1,
                total_batches,
                batch.start_index,
                batch.end_index,
                attempt + 1
            );

            match self.provider.complete(&prompt).await {
                Ok(response) => {
                    let translations = parse_translation_response(&response, expected);
                    if translations.iter().any(|line| !line.is_empty()) {
                        return Ok(merge_translations(&batch.cues, &translations));
                    }
                    if attempt >= self.config.max_retries {
                        return Err(TranslationError::EmptyBatch {
                            batch: batch_number,
                            expected,
                        });
                    }
                    warn!("Batch {} returned no translations, retrying", batch_number + 1);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    warn!("Batch {} failed: {}, retrying", batch_number + 1, e);
                }
                Err(e) => return Err(e.into()),
            }

            let delay = self.config.backoff_ms(attempt as usize);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            attempt += 1;
        }
    }
}

fn merge_translations(cues: &[Cue], translations: &[String]) -> Vec<Cue> {
    cues.iter()
        .zip(translations)
        .map(|(cue, translation)| {
            let text = sanitize_plain_text(translation);
            if text.is_empty() {
                cue.clone()
            } else {
                cue.with_text(text)
            }
        })
        .collect()
}
