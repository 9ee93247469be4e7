/*!
 * Batch translation of cue lists through a [`TranslationProvider`].
 *
 * - `batch`: splitting cues into batches with context
 * - `prompts`: prompt building and response parsing
 * - `core`: the concurrent, retrying driver
 *
 * [`TranslationProvider`]: crate::providers::TranslationProvider
 */

pub mod batch;
pub mod core;
pub mod prompts;

pub use self::core::BatchTranslator;
pub use batch::{create_batches, TranslationBatch};
pub use prompts::{build_translation_prompt, parse_translation_response};
