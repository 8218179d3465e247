//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockBehavior {
    Echo,
    Fixed(String),
    Fail(String),
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl MockTextProvider {
    /// Reply with the prompt itself.
    pub fn echo() -> Self {
        Self::with_behavior(MockBehavior::Echo)
    }

    /// Reply with `text` regardless of the prompt.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fixed(text.into()))
    }

    /// Fail every call with an API error whose message is exactly `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(message.into()))
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Prompts and parameters received so far.
    pub fn calls(&self) -> Vec<(String, GenerationParams)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), params.clone()));
        }

        let text = match &self.behavior {
            MockBehavior::Echo => prompt.to_string(),
            MockBehavior::Fixed(text) => text.clone(),
            MockBehavior::Fail(message) => return Err(ProviderError::ApiError(message.clone())),
        };

        Ok(ProviderResponse {
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: text.len() as i32 / 4,
            text,
            finish_reason: FinishReason::Complete,
        })
    }

    fn model(&self) -> &str {
        "mock"
    }
}
