//! Story output schema and response parsing
//!
//! The LLM is asked for one JSON object whose field names match the prompt's
//! schema exactly. Parsing is two-layered: [`extract_json`] recovers the
//! object from responses that ignored the formatting contract, and
//! [`parse_story_output`] deserializes and validates it.

use super::error::BackendError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_SCENARIOS: usize = 3;
pub const MAX_SCENARIOS: usize = 4;

/// The complete structured response for one component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmStoryOutput {
    #[serde(rename = "ComponentName")]
    pub component_name: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "PropsDefinition")]
    pub props_definition: Vec<PropDefinition>,
    #[serde(rename = "StoriesScenarios")]
    pub stories_scenarios: Vec<StoryScenario>,
}

/// The model's enriched view of one prop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub required: bool,
    #[serde(rename = "defaultValue", default)]
    pub default_value: serde_json::Value,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "mockValue", default)]
    pub mock_value: serde_json::Value,
}

/// One named story with the prop values it passes.
///
/// `props` is a sorted map so rendering the same output twice produces
/// byte-identical story files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub props: BTreeMap<String, serde_json::Value>,
}

/// Recovers a JSON object from a response that may be wrapped in markdown
/// fences or surrounded by commentary. Strips a leading/trailing fence, then
/// slices from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> String {
    let json_text = text.trim();

    if json_text.starts_with("```") {
        let mut lines: Vec<&str> = json_text.lines().collect();
        lines.remove(0);
        if lines
            .last()
            .map(|l| l.trim().starts_with("```"))
            .unwrap_or(false)
        {
            lines.pop();
        }
        return extract_braces(lines.join("\n").trim());
    }

    extract_braces(json_text)
}

fn extract_braces(text: &str) -> String {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => text[first..=last].to_string(),
        _ => text.to_string(),
    }
}

/// Deserializes `text` (already reduced to a JSON object) and enforces the
/// structural rules the prompt states.
pub fn parse_story_output(text: &str) -> Result<LlmStoryOutput, BackendError> {
    let output: LlmStoryOutput =
        serde_json::from_str(text).map_err(|e| BackendError::ParseError {
            message: e.to_string(),
            context: "story output".to_string(),
        })?;
    validate(&output)?;
    Ok(output)
}

/// Structural validation. Scenario count is a hard requirement; everything
/// softer (name mismatches, prop subsets) is a gateway warning instead.
pub fn validate(output: &LlmStoryOutput) -> Result<(), BackendError> {
    if output.component_name.is_empty() {
        return Err(BackendError::InvalidResponse {
            message: "ComponentName is empty".to_string(),
            raw_response: None,
        });
    }

    let count = output.stories_scenarios.len();
    if !(MIN_SCENARIOS..=MAX_SCENARIOS).contains(&count) {
        return Err(BackendError::InvalidResponse {
            message: format!(
                "Expected {} to {} story scenarios, got {}",
                MIN_SCENARIOS, MAX_SCENARIOS, count
            ),
            raw_response: None,
        });
    }

    for scenario in &output.stories_scenarios {
        if scenario.name.is_empty() {
            return Err(BackendError::InvalidResponse {
                message: "Story scenario with empty name".to_string(),
                raw_response: None,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_with_scenarios(count: usize) -> LlmStoryOutput {
        LlmStoryOutput {
            component_name: "Button".to_string(),
            summary: "A button".to_string(),
            props_definition: vec![],
            stories_scenarios: (0..count)
                .map(|i| StoryScenario {
                    name: format!("Scenario{i}"),
                    description: String::new(),
                    props: BTreeMap::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_extract_json_plain() {
        assert_eq!(extract_json(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_json_strips_fences() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json(fenced), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_json_slices_surrounding_text() {
        let noisy = "Here is the JSON you asked for:\n{\"a\": 1}\nHope that helps!";
        assert_eq!(extract_json(noisy), r#"{"a": 1}"#);
    }

    #[test]
    fn test_scenario_count_bounds() {
        assert!(validate(&output_with_scenarios(2)).is_err());
        assert!(validate(&output_with_scenarios(3)).is_ok());
        assert!(validate(&output_with_scenarios(4)).is_ok());
        assert!(validate(&output_with_scenarios(5)).is_err());
    }

    #[test]
    fn test_parse_full_output() {
        let json = r#"{
            "ComponentName": "Button",
            "Summary": "A clickable button.",
            "PropsDefinition": [
                {
                    "name": "label",
                    "type": "string",
                    "required": true,
                    "defaultValue": null,
                    "description": "",
                    "mockValue": "Click me"
                }
            ],
            "StoriesScenarios": [
                {"name": "Primary", "description": "Default", "props": {"label": "Click me"}},
                {"name": "Disabled", "description": "Disabled state", "props": {"label": "Nope"}},
                {"name": "Empty", "description": "Edge case", "props": {}}
            ]
        }"#;
        let output = parse_story_output(json).unwrap();
        assert_eq!(output.component_name, "Button");
        assert_eq!(output.stories_scenarios.len(), 3);
        assert_eq!(
            output.stories_scenarios[0].props.get("label"),
            Some(&serde_json::json!("Click me"))
        );
    }

    #[test]
    fn test_parse_error_is_parse_class() {
        let err = parse_story_output("not json").unwrap_err();
        assert!(err.is_parse_failure());
    }
}
