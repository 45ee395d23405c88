//! React story template
//!
//! Emits a CSF3 story file: a default export with title/component/autodocs
//! and one `export const` per scenario carrying its args verbatim.
//! `children` needs no special casing; Storybook for React accepts it as a
//! regular arg.

use super::{component_file_stem, derive_title, story_pascal_case, StoryTemplate};
use crate::llm::LlmStoryOutput;
use crate::model::{ComponentMeta, Framework};
use tracing::debug;

pub struct ReactStoryTemplate;

impl StoryTemplate for ReactStoryTemplate {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn story_file_extension(&self) -> &'static str {
        ".stories.tsx"
    }

    fn render_story(&self, meta: &ComponentMeta, output: &LlmStoryOutput) -> String {
        debug!(
            component = %meta.component_name,
            scenarios = output.stories_scenarios.len(),
            "Rendering React stories"
        );

        let import_path = format!("./{}", component_file_stem(meta));
        let mut file = format!(
            "import {{ {name} }} from \"{import_path}\";\n\n\
             export default {{\n  title: \"{title}\",\n  component: {name},\n  tags: ['autodocs'],\n}};\n\n",
            name = meta.component_name,
            import_path = import_path,
            title = derive_title(meta, Framework::React),
        );

        for scenario in &output.stories_scenarios {
            let args = serde_json::to_string_pretty(&scenario.props)
                .unwrap_or_else(|_| "{}".to_string());
            file.push_str(&format!(
                "export const {} = {{\n  args: {},\n}};\n\n",
                story_pascal_case(&scenario.name),
                args
            ));
        }

        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::StoryScenario;
    use std::collections::BTreeMap;

    fn output(scenarios: Vec<StoryScenario>) -> LlmStoryOutput {
        LlmStoryOutput {
            component_name: "Button".to_string(),
            summary: "A button.".to_string(),
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
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_renders_csf_header_and_stories() {
        let meta = ComponentMeta::new(
            "Button",
            "/app/src/components/atoms/Button.tsx",
            vec![],
            "",
        );
        let out = output(vec![
            scenario("Primary", &[("label", serde_json::json!("Click me"))]),
            scenario("Disabled", &[("disabled", serde_json::json!(true))]),
        ]);

        let rendered = ReactStoryTemplate.render_story(&meta, &out);
        assert!(rendered.contains(r#"import { Button } from "./Button";"#));
        assert!(rendered.contains(r#"title: "Atoms/Button""#));
        assert!(rendered.contains("component: Button"));
        assert!(rendered.contains("tags: ['autodocs']"));
        assert!(rendered.contains("export const Primary = {"));
        assert!(rendered.contains(r#""label": "Click me""#));
        assert!(rendered.contains("export const Disabled = {"));
    }

    #[test]
    fn test_story_names_become_identifiers() {
        let meta = ComponentMeta::new("Button", "/app/Button.tsx", vec![], "");
        let out = output(vec![scenario("with long label", &[])]);
        let rendered = ReactStoryTemplate.render_story(&meta, &out);
        assert!(rendered.contains("export const WithLongLabel = {"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let meta = ComponentMeta::new("Button", "/app/Button.tsx", vec![], "");
        let out = output(vec![scenario(
            "Primary",
            &[
                ("variant", serde_json::json!("primary")),
                ("label", serde_json::json!("Go")),
            ],
        )]);
        let first = ReactStoryTemplate.render_story(&meta, &out);
        let second = ReactStoryTemplate.render_story(&meta, &out);
        assert_eq!(first, second);
    }
}
