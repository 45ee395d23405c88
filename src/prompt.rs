//! Prompt construction for story generation
//!
//! The prompt carries the full output contract: a single JSON object, exact
//! field names, 3 to 4 scenarios, and props restricted to the declared set.
//! Everything the model needs is inlined; no follow-up turns are used.

use crate::model::{ComponentMeta, Framework};
use anyhow::Result;
use tracing::debug;

/// System role sent separately from the task prompt when the transport
/// supports it, prepended otherwise.
pub const SYSTEM_PROMPT: &str =
    "You are a Senior Frontend Architect specializing in component libraries and Storybook.";

/// Builds the generation prompt for one component.
///
/// `available_components` is the sibling allow-list from discovery; when
/// non-empty the prompt permits referencing those names in mock content and
/// nothing else.
pub fn build_prompt(
    meta: &ComponentMeta,
    framework: Framework,
    available_components: &[String],
) -> Result<String> {
    let props_json = serde_json::to_string_pretty(&meta.props)?;
    debug!(
        component = %meta.component_name,
        props = meta.props.len(),
        "Building prompt"
    );

    let siblings = if available_components.is_empty() {
        String::new()
    } else {
        format!(
            "\nOther components available in this project (you MAY reference these names \
             inside mock content, and MUST NOT invent any others):\n{}\n\
             When no listed component fits, prefer simple placeholder values \
             (short strings, emoji, or null) over inventing component names.\n",
            available_components
                .iter()
                .map(|name| format!("- {name}"))
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    Ok(format!(
        r#"Your task:
Analyze the following {framework_name} component metadata and produce a VALID JSON object (no markdown, no explanation) matching the schema below.

IMPORTANT OUTPUT RULES:
- You MUST return ONLY a single JSON object.
- The FIRST character of your response MUST be "{{".
- The LAST character of your response MUST be "}}".
- Do NOT include backticks, code fences, markdown, or natural language.
- The JSON MUST be syntactically valid and parseable by a strict JSON parser.
- Use only JSON-compatible values: string, number, boolean, null, arrays, or plain objects.
- Never output "undefined", functions, or other non-JSON values.

INPUT:
ComponentName: "{component_name}"
Props (array of prop metadata):
{props_json}
{siblings}
OUTPUT SCHEMA (structure and field names must match exactly):
{{
  "ComponentName": string,            // MUST equal the input ComponentName
  "Summary": string,                 // One-sentence description of the component purpose
  "PropsDefinition": [
    {{
      "name": string,                // Prop name as in input
      "type": string,                // Human-readable type, for enums list allowed values
      "required": boolean,
      "defaultValue": any | null,    // Use null if unknown
      "description": string,         // Use "" if no information
      "mockValue": any               // JSON-safe mock, see rules below
    }}
  ],
  "StoriesScenarios": [
    {{
      "name": string,                // Story name (e.g. "Primary", "Disabled")
      "description": string,         // What this scenario demonstrates
      "props": {{                     // Props to pass to the component for this scenario
        "<propName>": <mockValue>
      }}
    }}
  ]
}}

ADDITIONAL RULES:
- "ComponentName" in the output MUST exactly match the input ComponentName.
- "PropsDefinition":
  - Include ONLY props that appear in the input Props array.
  - For props with no description or default value, set:
    - "description": ""
    - "defaultValue": null
  - For enum-like types, include all possible literal options in "type", e.g. "primary | secondary | ghost".
- "mockValue":
  - MUST be JSON-safe: string, number, boolean, null, array, or plain object.
  - For function props (like onClick), set:
    - "mockValue": "console.log('clicked')" (string, not a real function).
- "StoriesScenarios":
  - MUST contain between 3 and 4 items (inclusive).
  - Each scenario's "props" object:
    - MUST only use prop names from "PropsDefinition".
    - MUST use realistic combinations of mock values for meaningful scenarios.
  - For content props (children, slots, projected content) use non-null, human-readable
    text in every scenario except a deliberate empty-state edge case.
  - Cover typical states such as:
    - default/primary usage,
    - disabled/readonly,
    - variant values (size, appearance, tone),
    - and one edge case or less common but useful state if applicable.

Your response must be ONLY the JSON object described above. Do not write any explanatory text.

Begin now."#,
        framework_name = framework.display_name(),
        component_name = meta.component_name,
        props_json = props_json,
        siblings = siblings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropDef;

    fn button_meta() -> ComponentMeta {
        ComponentMeta::new(
            "Button",
            "/app/src/components/Button/Button.tsx",
            vec![
                PropDef::new("label", "string", true),
                PropDef::new("variant", "'primary' | 'secondary'", false)
                    .with_default(serde_json::json!("primary")),
            ],
            "",
        )
    }

    #[test]
    fn test_prompt_contains_name_props_and_contract() {
        let prompt = build_prompt(&button_meta(), Framework::React, &[]).unwrap();
        assert!(prompt.contains(r#"ComponentName: "Button""#));
        assert!(prompt.contains(r#""name": "label""#));
        assert!(prompt.contains("'primary' | 'secondary'"));
        assert!(prompt.contains("between 3 and 4 items"));
        assert!(prompt.contains("React component metadata"));
        assert!(!prompt.contains("Other components available"));
    }

    #[test]
    fn test_prompt_lists_available_components() {
        let siblings = vec!["Icon".to_string(), "Spinner".to_string()];
        let prompt = build_prompt(&button_meta(), Framework::Vue, &siblings).unwrap();
        assert!(prompt.contains("- Icon"));
        assert!(prompt.contains("- Spinner"));
        assert!(prompt.contains("prefer simple placeholder values"));
        assert!(prompt.contains("Vue component metadata"));
    }
}
