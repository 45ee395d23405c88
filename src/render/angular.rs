//! Angular story template
//!
//! Emits typed CSF3 (`Meta`/`StoryObj` from `@storybook/angular`). Null
//! values are dropped from args because Angular inputs expect `undefined`,
//! not `null`, for absent optional values. The `ngContent` pseudo-prop is
//! lifted out of args and rendered as projected content inside an explicit
//! render function.

use super::{
    component_file_stem, default_slot_content, derive_title, escape_template_content,
    story_pascal_case, StoryTemplate,
};
use crate::llm::LlmStoryOutput;
use crate::model::{ComponentMeta, Framework};
use crate::parser::{CONTENT_PROJECTION_TYPE, NG_CONTENT_PROP};
use std::collections::BTreeMap;
use tracing::debug;

pub struct AngularStoryTemplate;

impl AngularStoryTemplate {
    /// Selector derived from the class name: `ButtonComponent` becomes
    /// `app-button`.
    fn selector(component_name: &str) -> String {
        let name = component_name
            .strip_suffix("Component")
            .unwrap_or(component_name);
        let mut kebab = String::with_capacity(name.len() + 4);
        for (i, ch) in name.chars().enumerate() {
            if ch.is_uppercase() && i > 0 {
                kebab.push('-');
            }
            kebab.extend(ch.to_lowercase());
        }
        format!("app-{kebab}")
    }
}

impl StoryTemplate for AngularStoryTemplate {
    fn framework(&self) -> Framework {
        Framework::Angular
    }

    fn story_file_extension(&self) -> &'static str {
        ".stories.ts"
    }

    fn render_story(&self, meta: &ComponentMeta, output: &LlmStoryOutput) -> String {
        debug!(
            component = %meta.component_name,
            scenarios = output.stories_scenarios.len(),
            "Rendering Angular stories"
        );

        let import_path = format!("./{}", component_file_stem(meta));
        let name = &meta.component_name;
        let mut file = format!(
            "import type {{ Meta, StoryObj }} from '@storybook/angular';\n\
             import {{ {name} }} from \"{import_path}\";\n\n\
             const meta: Meta<{name}> = {{\n  title: '{title}',\n  component: {name},\n  tags: ['autodocs'],\n}};\n\n\
             export default meta;\ntype Story = StoryObj<{name}>;\n\n",
            name = name,
            import_path = import_path,
            title = derive_title(meta, Framework::Angular),
        );

        let has_ng_content = meta
            .props
            .iter()
            .any(|p| p.name == NG_CONTENT_PROP && p.type_text == CONTENT_PROJECTION_TYPE);
        let selector = Self::selector(name);

        for scenario in &output.stories_scenarios {
            let mut projection: Option<String> = None;
            let mut args: BTreeMap<&String, &serde_json::Value> = BTreeMap::new();

            for (key, value) in &scenario.props {
                if key == NG_CONTENT_PROP {
                    projection = Some(value.as_str().unwrap_or_default().to_string());
                    continue;
                }
                if !value.is_null() {
                    args.insert(key, value);
                }
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

            if projection.is_some() || has_ng_content {
                let content = match projection.as_deref() {
                    Some(text) if !text.is_empty() => text.to_string(),
                    _ => default_slot_content(name, &scenario.name),
                };
                let escaped = escape_template_content(&content);
                let bindings = args
                    .keys()
                    .map(|key| format!("[{key}]=\"{key}\""))
                    .collect::<Vec<_>>()
                    .join(" ");

                file.push_str("  render: (args) => ({\n    props: args,\n");
                file.push_str(&format!(
                    "    template: `<{selector} {bindings}>{escaped}</{selector}>`,\n"
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
            "ButtonComponent",
            "/app/src/components/atoms/button.component.ts",
            vec![
                PropDef::new("variant", "string", false),
                PropDef::new(NG_CONTENT_PROP, CONTENT_PROJECTION_TYPE, false),
            ],
            "",
        )
    }

    fn output(scenarios: Vec<StoryScenario>) -> LlmStoryOutput {
        LlmStoryOutput {
            component_name: "ButtonComponent".to_string(),
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
    fn test_selector_derivation() {
        assert_eq!(AngularStoryTemplate::selector("ButtonComponent"), "app-button");
        assert_eq!(
            AngularStoryTemplate::selector("UserCardComponent"),
            "app-user-card"
        );
        assert_eq!(AngularStoryTemplate::selector("Badge"), "app-badge");
    }

    #[test]
    fn test_typed_header_and_import() {
        let rendered = AngularStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario("Primary", &[])]),
        );
        assert!(rendered.contains("import type { Meta, StoryObj } from '@storybook/angular';"));
        assert!(rendered.contains(r#"import { ButtonComponent } from "./button.component";"#));
        assert!(rendered.contains("const meta: Meta<ButtonComponent> = {"));
        assert!(rendered.contains("title: 'Atoms/ButtonComponent'"));
        assert!(rendered.contains("type Story = StoryObj<ButtonComponent>;"));
    }

    #[test]
    fn test_null_args_are_dropped() {
        let rendered = AngularStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario(
                "Primary",
                &[
                    ("variant", serde_json::json!("primary")),
                    ("label", serde_json::Value::Null),
                ],
            )]),
        );
        assert!(rendered.contains(r#""variant": "primary""#));
        assert!(!rendered.contains(r#""label""#));
    }

    #[test]
    fn test_ng_content_becomes_projected_content() {
        let rendered = AngularStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario(
                "Primary",
                &[
                    ("variant", serde_json::json!("primary")),
                    (NG_CONTENT_PROP, serde_json::json!("Click me")),
                ],
            )]),
        );
        assert!(rendered.contains(
            r#"template: `<app-button [variant]="variant">Click me</app-button>`"#
        ));
        // the pseudo-prop never appears in args
        assert!(!rendered.contains(r#""ngContent""#));
    }

    #[test]
    fn test_projection_placeholder_when_content_missing() {
        let rendered = AngularStoryTemplate.render_story(
            &button_meta(),
            &output(vec![scenario("Disabled", &[])]),
        );
        // component declares ng-content, so a render function is emitted
        // with keyword placeholder content
        assert!(rendered.contains(">Disabled</app-button>`"));
    }
}
