use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;

#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError>;

    fn name(&self) -> &str;

    fn model_info(&self) -> Option<String> {
        None
    }

    /// Whether the backend honors a constrained JSON response mode. When
    /// false the structured-output attempt is skipped entirely.
    fn supports_structured_output(&self) -> bool {
        false
    }
}
