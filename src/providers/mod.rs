/*!
 * Translation provider interface.
 *
 * Network clients live outside this crate; they plug in by implementing
 * [`TranslationProvider`]. Everything handed to `complete` has already been
 * through `sanitize_translation`.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

pub mod mock;

pub use mock::{MockBehavior, MockProvider};

/// Common trait for all translation providers
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Send a prompt and return the raw completion text
    ///
    /// # Arguments
    /// * `prompt` - Prompt built from sanitized cue text
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}
