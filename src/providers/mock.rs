/*!
 * Mock provider for tests and dry runs.
 *
 * - `MockProvider::working()` - answers every numbered line with `[xx] text`
 * - `MockProvider::intermittent(n)` - fails every n-th request
 * - `MockProvider::failing()` - always fails
 * - `MockProvider::empty()` - returns an empty completion
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::TranslationProvider;
use crate::errors::ProviderError;
use crate::translation::prompts::{TO_TRANSLATE_MARKER, numbered_line};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails with a retryable error on every Nth request (1-based)
    Intermittent { fail_every: usize },
    /// Always fails with an authentication error
    Failing,
    /// Returns an empty completion
    Empty,
}

/// Mock provider recording every prompt it receives
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    request_count: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of `complete` calls so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every prompt received
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    /// Answer each numbered line of the prompt's translate section
    pub fn echo_translation(prompt: &str) -> String {
        prompt
            .lines()
            .skip_while(|line| *line != TO_TRANSLATE_MARKER)
            .skip(1)
            .take_while(|line| !line.trim().is_empty())
            .filter_map(numbered_line)
            .map(|(number, text)| format!("{}. [xx] {}", number, text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match self.behavior {
            MockBehavior::Working => Ok(Self::echo_translation(prompt)),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    let message = format!("simulated failure on request {}", count);
                    Err(ProviderError::RequestFailed(message))
                } else {
                    Ok(Self::echo_translation(prompt))
                }
            }
            MockBehavior::Failing => Err(ProviderError::AuthenticationError(
                "mock provider always fails".to_string(),
            )),
            MockBehavior::Empty => Ok(String::new()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
