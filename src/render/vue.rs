//! Vue story template
//!
//! Emits typed CSF3 (`Meta`/`StoryObj` from `@storybook/vue3`) with the
//! component imported from its `.vue` file. The `default` pseudo-prop is
//! lifted out of args and rendered as slot content inside an explicit
//! render function.

use super::{
    component_file_stem, default_slot_content, derive_title, escape_template_content,
    story_pascal_case, StoryTemplate,
};
use crate::llm::LlmStoryOutput;
use crate::model::{ComponentMeta, Framework};
use crate::parser::{DEFAULT_SLOT_PROP, SLOT_TYPE};
use std::collections::BTreeMap;
use tracing::debug;

pub struct VueStoryTemplate;

impl StoryTemplate for VueStoryTemplate {
    fn framework(&self) -> Framework {
        Framework::Vue
    }

    fn story_file_extension(&self) -> &'static str {
        ".stories.ts"
    }

    fn render_story(&self, meta: &ComponentMeta, output: &LlmStoryOutput) -> String {
        debug!(
            component = %meta.component_name,
            scenarios = output.stories_scenarios.len(),
            "Rendering Vue stories"
        );

        let import_path = format!("./{}.vue", component_file_stem(meta));
        let name = &meta.component_name;
        let mut file = format!(
            "import type {{ Meta, StoryObj }} from '@storybook/vue3';\n\
             import {name} from \"{import_path}\";\n\n\
             const meta: Meta<typeof {name}> = {{\n  title: '{title}',\n  component: {name},\n  tags: ['autodocs'],\n}};\n\n\
             export default meta;\ntype Story = StoryObj<typeof {name}>;\n\n",
            name = name,
            import_path = import_path,
            title = derive_title(meta, Framework::Vue),
        );

        let has_default_slot = meta
            .props
            .iter()
            .any(|p| p.name == DEFAULT_SLOT_PROP && p.type_text == SLOT_TYPE);

        for scenario in &output.stories_scenarios {
            let mut slot_content: Option<String> = None;
            let mut args: BTreeMap<&String, &serde_json::Value> = BTreeMap::new();

            for (key, value) in &scenario.props {
                if key == DEFAULT_SLOT_PROP {
                    slot_content = Some(value.as_str().unwrap_or_default().to_string());
                    continue;
                }
                args.insert(key, value);
            }

            file.push_str(&format!(
                "export const {}: Story = {{\n",
                story_pascal_case(&scenario.name)
            ));

            if !args.is_empty() {
                let args_json =
                    serde_json::to_string_pretty(&args).unwrap_or_else(|_| "{}".to_string());
                file.push_str(&format!("  args: {args_json},\n"));
            }

            if slot_content.is_some() || has_default_slot {
                let content = match slot_content.as_deref() {
                    Some(text) if !text.is_empty() => text.to_string(),
                    _ => default_slot_content(name, &scenario.name),
                };
                let escaped = escape_template_content(&content);

                file.push_str("  render: (args) => ({\n");
                file.push_str(&format!("    components: {{ {name} }},\n"));
                file.push_str("    setup() {\n      return { args };\n    },\n");
                file.push_str(&format!(
                    "    template: `<{name} v-bind=\"args\">{escaped}</{name}>`,\n"
                ));
                file.push_str("  }),\n");
            }

            file.push_str("};\n\n");
        }

        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::StoryScenario;
    use crate::model::PropDef;

    fn button_meta() -> ComponentMeta {
        ComponentMeta::new(
            "BaseButton",
            "/app/src/components/atoms/BaseButton.vue",
            vec![
                PropDef::new("variant", "string", false),
                PropDef::new(DEFAULT_SLOT_PROP, SLOT_TYPE, false),
            ],
            "",
        )
    }

    fn output(scenarios: Vec<StoryScenario>) -> LlmStoryOutput {
        LlmStoryOutput {
            component_name: "BaseButton".to_string(),
            summary: String::new(),
            props_definition: vec![],
            stories_scenarios: scenarios,
        }
    }

    fn scenario(name: &str, props: &[(&str, serde_json::Value)]) -> StoryScenario {
        StoryScenario {
            name: name.to_string(),
            description: String::new(),
            props: props
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_typed_header_and_vue_import() {
        let rendered = VueStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario("Primary", &[])]),
        );
        assert!(rendered.contains("import type { Meta, StoryObj } from '@storybook/vue3';"));
        assert!(rendered.contains(r#"import BaseButton from "./BaseButton.vue";"#));
        assert!(rendered.contains("const meta: Meta<typeof BaseButton> = {"));
        assert!(rendered.contains("title: 'Atoms/BaseButton'"));
        assert!(rendered.contains("type Story = StoryObj<typeof BaseButton>;"));
    }

    #[test]
    fn test_slot_content_rendered_via_render_function() {
        let rendered = VueStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario(
                "Primary",
                &[
                    ("variant", serde_json::json!("primary")),
                    (DEFAULT_SLOT_PROP, serde_json::json!("Click me")),
                ],
            )]),
        );
        assert!(rendered.contains("components: { BaseButton }"));
        assert!(rendered.contains(
            r#"template: `<BaseButton v-bind="args">Click me</BaseButton>`"#
        ));
        assert!(!rendered.contains(r#""default""#));
        assert!(rendered.contains(r#""variant": "primary""#));
    }

    #[test]
    fn test_placeholder_slot_content_from_story_name() {
        let rendered = VueStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario("Loading", &[])]),
        );
        assert!(rendered.contains(">Loading...</BaseButton>`"));
    }

    #[test]
    fn test_backticks_in_slot_content_are_escaped() {
        let rendered = VueStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario(
                "Primary",
                &[(DEFAULT_SLOT_PROP, serde_json::json!("use `code` here"))],
            )]),
        );
        assert!(rendered.contains("use \\`code\\` here"));
    }

    #[test]
    fn test_no_render_function_without_slot() {
        let meta = ComponentMeta::new(
            "BaseIcon",
            "/app/src/components/atoms/BaseIcon.vue",
            vec![PropDef::new("name", "string", true)],
            "",
        );
        let rendered = VueStoryTemplate.render_story(
            &meta,
            &output(vec![scenario("Primary", &[("name", serde_json::json!("check"))])]),
        );
        assert!(!rendered.contains("render: (args)"));
        assert!(rendered.contains(r#""name": "check""#));
    }
}
