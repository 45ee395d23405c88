//! Story generation gateway
//!
//! Wraps an [`LLMClient`] with the degrading request chain: constrained
//! JSON mode first, then a free-text completion parsed strictly, then a
//! fresh completion run through lenient JSON extraction. Only parse-class
//! failures trigger the next rung; transport, auth and configuration errors
//! propagate immediately.

use super::client::LLMClient;
use super::error::BackendError;
use super::schema::{extract_json, parse_story_output, LlmStoryOutput};
use super::types::LLMRequest;
use crate::model::ComponentMeta;
use crate::prompt::SYSTEM_PROMPT;
use std::sync::Arc;
use tracing::{debug, info, warn};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 4096;

pub struct StoryGateway {
    client: Arc<dyn LLMClient>,
}

impl StoryGateway {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Runs the request chain for one component and returns the validated
    /// story output.
    pub async fn generate(
        &self,
        prompt: &str,
        meta: &ComponentMeta,
    ) -> Result<LlmStoryOutput, BackendError> {
        if self.client.supports_structured_output() {
            debug!(backend = self.client.name(), "Attempting structured JSON output");
            match self.attempt(prompt, true, false).await {
                Ok(output) => {
                    info!(component = %meta.component_name, "Structured output succeeded");
                    return Ok(self.post_validate(output, meta));
                }
                Err(e) if e.is_parse_failure() => {
                    warn!(error = %e, "Structured output failed to parse, retrying as free text");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(backend = self.client.name(), "Attempting free-text completion");
        match self.attempt(prompt, false, false).await {
            Ok(output) => {
                info!(component = %meta.component_name, "Free-text completion parsed");
                return Ok(self.post_validate(output, meta));
            }
            Err(e) if e.is_parse_failure() => {
                warn!(error = %e, "Strict parse failed, retrying with manual JSON extraction");
            }
            Err(e) => return Err(e),
        }

        let output = self.attempt(prompt, false, true).await?;
        info!(component = %meta.component_name, "Manual JSON extraction succeeded");
        Ok(self.post_validate(output, meta))
    }

    async fn attempt(
        &self,
        prompt: &str,
        json_response: bool,
        lenient: bool,
    ) -> Result<LlmStoryOutput, BackendError> {
        let request = LLMRequest::new(prompt)
            .with_system(SYSTEM_PROMPT)
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS)
            .with_json_response(json_response);

        let response = self.client.chat(request).await?;
        debug!(
            response_ms = response.response_time.as_millis() as u64,
            lenient, "LLM responded"
        );

        if lenient {
            parse_story_output(&extract_json(&response.content)).map_err(|e| {
                let raw: String = response.content.chars().take(500).collect();
                warn!(raw = %raw, "Manual JSON extraction failed");
                e
            })
        } else {
            parse_story_output(response.content.trim())
        }
    }

    /// Soft checks applied after a successful parse. Violations are logged
    /// and the output is used as-is.
    fn post_validate(&self, output: LlmStoryOutput, meta: &ComponentMeta) -> LlmStoryOutput {
        if output.component_name != meta.component_name {
            warn!(
                expected = %meta.component_name,
                received = %output.component_name,
                "LLM returned a different component name"
            );
        }

        for scenario in &output.stories_scenarios {
            for prop_name in scenario.props.keys() {
                if !meta.has_prop(prop_name) {
                    warn!(
                        scenario = %scenario.name,
                        prop = %prop_name,
                        "Scenario references a prop the component does not declare"
                    );
                }
            }
        }

        output
    }
}

impl std::fmt::Debug for StoryGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGateway")
            .field("backend", &self.client.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{MockLLMClient, MockResponse};
    use crate::model::PropDef;

    fn meta() -> ComponentMeta {
        ComponentMeta::new(
            "Button",
            "/app/Button.tsx",
            vec![PropDef::new("label", "string", true)],
            "",
        )
    }

    fn valid_json() -> String {
        r#"{
            "ComponentName": "Button",
            "Summary": "A button.",
            "PropsDefinition": [],
            "StoriesScenarios": [
                {"name": "Primary", "description": "", "props": {"label": "Go"}},
                {"name": "Disabled", "description": "", "props": {"label": "No"}},
                {"name": "Long", "description": "", "props": {"label": "A very long label"}}
            ]
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn test_clean_response_parses_first_try() {
        let client = Arc::new(MockLLMClient::new());
        client.add_response(MockResponse::text(valid_json()));

        let gateway = StoryGateway::new(client.clone());
        let output = gateway.generate("prompt", &meta()).await.unwrap();
        assert_eq!(output.component_name, "Button");
        assert_eq!(client.remaining_responses(), 0);
    }

    #[tokio::test]
    async fn test_fenced_response_recovered_by_manual_extraction() {
        let client = Arc::new(MockLLMClient::new());
        let fenced = format!("```json\n{}\n```", valid_json());
        // Strict parse consumes the first response; the lenient retry gets
        // the second one.
        client.add_responses(vec![
            MockResponse::text(fenced.clone()),
            MockResponse::text(fenced),
        ]);

        let gateway = StoryGateway::new(client.clone());
        let output = gateway.generate("prompt", &meta()).await.unwrap();
        assert_eq!(output.stories_scenarios.len(), 3);
        assert_eq!(client.remaining_responses(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_propagates_without_retry() {
        let client = Arc::new(MockLLMClient::new());
        client.add_responses(vec![
            MockResponse::error(BackendError::AuthenticationError {
                message: "bad key".to_string(),
            }),
            MockResponse::text(valid_json()),
        ]);

        let gateway = StoryGateway::new(client.clone());
        let result = gateway.generate("prompt", &meta()).await;
        assert!(matches!(
            result,
            Err(BackendError::AuthenticationError { .. })
        ));
        // The queued fallback response was never consumed.
        assert_eq!(client.remaining_responses(), 1);
    }

    #[tokio::test]
    async fn test_bad_scenario_count_fails_after_chain() {
        let two_scenarios = r#"{
            "ComponentName": "Button",
            "Summary": "A button.",
            "PropsDefinition": [],
            "StoriesScenarios": [
                {"name": "Primary", "description": "", "props": {}},
                {"name": "Disabled", "description": "", "props": {}}
            ]
        }"#;
        let client = Arc::new(MockLLMClient::new());
        client.add_responses(vec![
            MockResponse::text(two_scenarios),
            MockResponse::text(two_scenarios),
        ]);

        let gateway = StoryGateway::new(client);
        let result = gateway.generate("prompt", &meta()).await;
        assert!(matches!(result, Err(BackendError::InvalidResponse { .. })));
    }
}
