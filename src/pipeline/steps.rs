//! Per-file generation steps
//!
//! Each step reads what earlier steps produced on [`FileState`] and writes
//! its own output back. Steps never touch other files' state; failure
//! containment happens at the step boundary in the pipeline loop.

use super::context::{FileState, RunContext};
use crate::parser::parser_for;
use crate::prompt::build_prompt;
use crate::render::template_for;
use crate::writer::write_story_file;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait GenerationStep: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&self, run: &RunContext, state: &mut FileState) -> Result<()>;
}

/// Parses the component file into metadata. Files without a recognizable
/// component are skipped, not failed.
pub struct ParseStep;

#[async_trait]
impl GenerationStep for ParseStep {
    fn name(&self) -> &'static str {
        "parse"
    }

    async fn execute(&self, run: &RunContext, state: &mut FileState) -> Result<()> {
        let parser = parser_for(run.framework);
        match parser.parse_component_file(&state.file_path)? {
            Some(meta) => {
                debug!(component = %meta.component_name, "Component parsed");
                state.meta = Some(meta);
            }
            None => state.skip("no recognizable component"),
        }
        Ok(())
    }
}

/// Builds the LLM prompt from the parsed metadata. The allow-list excludes
/// the component itself.
pub struct PromptStep;

#[async_trait]
impl GenerationStep for PromptStep {
    fn name(&self) -> &'static str {
        "prompt"
    }

    async fn execute(&self, run: &RunContext, state: &mut FileState) -> Result<()> {
        let meta = state.meta.as_ref().context("prompt step requires metadata")?;
        let siblings: Vec<String> = run
            .available_components
            .iter()
            .filter(|name| **name != meta.component_name)
            .cloned()
            .collect();
        state.prompt = Some(build_prompt(meta, run.framework, &siblings)?);
        Ok(())
    }
}

/// Sends the prompt through the gateway and stores the validated output.
pub struct LlmStep;

#[async_trait]
impl GenerationStep for LlmStep {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn execute(&self, run: &RunContext, state: &mut FileState) -> Result<()> {
        let meta = state.meta.as_ref().context("llm step requires metadata")?;
        let prompt = state.prompt.as_ref().context("llm step requires a prompt")?;
        let output = run.gateway.generate(prompt, meta).await?;
        state.llm_output = Some(output);
        Ok(())
    }
}

/// Renders the story file text for the run's framework.
pub struct RenderStep;

#[async_trait]
impl GenerationStep for RenderStep {
    fn name(&self) -> &'static str {
        "render"
    }

    async fn execute(&self, run: &RunContext, state: &mut FileState) -> Result<()> {
        let meta = state.meta.as_ref().context("render step requires metadata")?;
        let output = state
            .llm_output
            .as_ref()
            .context("render step requires LLM output")?;
        let template = template_for(run.framework);
        state.story_code = Some(template.render_story(meta, output));
        Ok(())
    }
}

/// Writes the story next to the component file.
pub struct WriteStep;

#[async_trait]
impl GenerationStep for WriteStep {
    fn name(&self) -> &'static str {
        "write"
    }

    async fn execute(&self, run: &RunContext, state: &mut FileState) -> Result<()> {
        let story_code = state
            .story_code
            .as_ref()
            .context("write step requires rendered story code")?;
        let path = write_story_file(&state.file_path, run.framework, story_code)?;
        state.written_path = Some(path);
        Ok(())
    }
}

/// The per-file step sequence, in execution order.
pub fn generation_steps() -> Vec<Box<dyn GenerationStep>> {
    vec![
        Box::new(ParseStep),
        Box::new(PromptStep),
        Box::new(LlmStep),
        Box::new(RenderStep),
        Box::new(WriteStep),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockLLMClient, StoryGateway};
    use crate::model::Framework;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn run_context(input_dir: PathBuf) -> RunContext {
        RunContext {
            input_dir,
            framework: Framework::React,
            available_components: vec!["Button".to_string(), "Icon".to_string()],
            files: vec![],
            gateway: Arc::new(StoryGateway::new(Arc::new(MockLLMClient::new()))),
        }
    }

    #[tokio::test]
    async fn test_parse_step_skips_non_component_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("helpers.tsx");
        std::fs::write(&path, "const add = (a, b) => a + b;").unwrap();

        let run = run_context(dir.path().to_path_buf());
        let mut state = FileState::new(path);
        ParseStep.execute(&run, &mut state).await.unwrap();
        assert!(state.is_skipped());
        assert!(state.meta.is_none());
    }

    #[tokio::test]
    async fn test_prompt_step_excludes_own_component_from_allow_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Button.tsx");
        std::fs::write(
            &path,
            "export function Button({ label }: { label: string }) { return null; }",
        )
        .unwrap();

        let run = run_context(dir.path().to_path_buf());
        let mut state = FileState::new(path);
        ParseStep.execute(&run, &mut state).await.unwrap();
        PromptStep.execute(&run, &mut state).await.unwrap();

        let prompt = state.prompt.unwrap();
        assert!(prompt.contains("- Icon"));
        assert!(!prompt.contains("- Button"));
    }

    #[test]
    fn test_step_order() {
        let names: Vec<_> = generation_steps().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["parse", "prompt", "llm", "render", "write"]);
    }
}
