//! Run-level and per-file pipeline state

use crate::llm::{LlmStoryOutput, StoryGateway};
use crate::model::{ComponentMeta, Framework};
use std::path::PathBuf;
use std::sync::Arc;

/// Immutable state shared by every file in one generation run.
pub struct RunContext {
    /// Directory the run scans
    pub input_dir: PathBuf,
    /// Framework resolved for this run
    pub framework: Framework,
    /// Component names discovered across the run, used as the prompt
    /// allow-list
    pub available_components: Vec<String>,
    /// Component files to process, in deterministic order
    pub files: Vec<PathBuf>,
    /// LLM gateway shared across files
    pub gateway: Arc<StoryGateway>,
}

/// Mutable state for one component file. A fresh value is created per file
/// so nothing leaks between files.
#[derive(Debug, Default)]
pub struct FileState {
    pub file_path: PathBuf,
    pub meta: Option<ComponentMeta>,
    pub prompt: Option<String>,
    pub llm_output: Option<LlmStoryOutput>,
    pub story_code: Option<String>,
    pub written_path: Option<PathBuf>,
    /// Set when a step decides the file cannot produce a story; later steps
    /// become no-ops.
    pub skip_reason: Option<String>,
}

impl FileState {
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            ..Default::default()
        }
    }

    pub fn skip(&mut self, reason: impl Into<String>) {
        self.skip_reason = Some(reason.into());
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }
}
