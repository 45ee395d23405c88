//! GenAI-based LLM client implementation
//!
//! Backs the story gateway with the `genai` crate, covering the OpenAI and
//! Gemini chat APIs behind one client.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{
    ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest,
    ChatResponseFormat,
};
use genai::resolver::{AuthData, ServiceTargetResolver};
use genai::{Client, ServiceTarget};
use std::time::Duration;
use tracing::{debug, error};

/// GenAI-based LLM client
///
/// The API key comes from configuration rather than provider-specific
/// environment variables, so the client installs a service-target resolver
/// that injects it for whichever adapter is selected.
pub struct GenAIClient {
    client: Client,
    model: String,
    provider: AdapterKind,
    timeout: Duration,
}

impl GenAIClient {
    pub fn new(
        provider: AdapterKind,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        if api_key.is_empty() {
            return Err(BackendError::ConfigurationError {
                message: format!("API key is missing for {} provider", provider.as_str()),
            });
        }

        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                Ok(ServiceTarget {
                    auth: AuthData::from_single(api_key.clone()),
                    ..service_target
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        debug!(
            provider = provider.as_str(),
            model = %model,
            "Creating GenAI client"
        );

        Ok(Self {
            client,
            model,
            provider,
            timeout,
        })
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = std::time::Instant::now();

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(GenAIChatMessage::system(system));
        }
        messages.push(GenAIChatMessage::user(&request.prompt));

        let genai_request = GenAIChatRequest::new(messages);

        let mut options = ChatOptions::default();
        if let Some(temp) = request.temperature {
            options = options.with_temperature(temp as f64);
        }
        if let Some(max_tokens) = request.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        if request.json_response {
            options = options.with_response_format(ChatResponseFormat::JsonMode);
        }

        let response = match tokio::time::timeout(
            self.timeout,
            self.client
                .exec_chat(&self.model, genai_request, Some(&options)),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!(provider = self.provider.as_str(), error = %e, "API request failed");
                return Err(BackendError::ApiError {
                    message: format!("{} request failed: {}", self.provider.as_str(), e),
                    status_code: None,
                });
            }
            Err(_) => {
                error!(
                    provider = self.provider.as_str(),
                    timeout_secs = self.timeout.as_secs(),
                    "Request timed out"
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let content = response.first_text().unwrap_or_default().to_string();
        Ok(LLMResponse::text(content, start.elapsed()))
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }

    fn supports_structured_output(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
