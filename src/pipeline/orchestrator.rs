//! Generation pipeline
//!
//! Runs discovery once, then pushes every component file through the step
//! sequence with fresh per-file state. A failing file is reported and
//! skipped; the run continues with the next file.

use super::context::{FileState, RunContext};
use super::discover::{
    available_components, discover_component_files, filter_to_staged, staged_files,
};
use super::steps::generation_steps;
use crate::config::GeneratorConfig;
use crate::llm::StoryGateway;
use crate::model::detect_framework;
use crate::progress::{NoOpProgressHandler, ProgressEvent, ProgressHandler};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Outcome counts for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_files: usize,
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

pub struct GenerationPipeline {
    gateway: Arc<StoryGateway>,
    progress: Arc<dyn ProgressHandler>,
    cancel: CancellationToken,
}

impl GenerationPipeline {
    pub fn new(gateway: Arc<StoryGateway>) -> Self {
        Self {
            gateway,
            progress: Arc::new(NoOpProgressHandler),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn run(&self, config: &GeneratorConfig) -> Result<RunSummary> {
        let start = Instant::now();

        let framework = match config.framework {
            Some(framework) => framework,
            None => {
                let root = project_root(&config.input_directory);
                let detected = detect_framework(&root);
                info!(framework = %detected, "Framework auto-detected");
                detected
            }
        };

        let mut files = discover_component_files(&config.input_directory, framework)?;
        if config.use_git_diff {
            let staged = staged_files(&config.input_directory);
            files = filter_to_staged(files, &staged);
            info!(count = files.len(), "Restricted to staged files");
        }

        let components = available_components(&files, framework);
        info!(
            files = files.len(),
            components = components.len(),
            framework = %framework,
            backend = self.gateway.client_name(),
            "Starting story generation"
        );

        let run = RunContext {
            input_dir: config.input_directory.clone(),
            framework,
            available_components: components,
            files,
            gateway: Arc::clone(&self.gateway),
        };

        self.progress.on_event(&ProgressEvent::Started {
            total_files: run.files.len(),
        });

        let steps = generation_steps();
        let mut generated = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;

        for (index, file) in run.files.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(
                    remaining = run.files.len() - index,
                    "Cancellation requested, stopping run"
                );
                break;
            }

            self.progress
                .on_event(&ProgressEvent::file_started(file, index));

            let mut state = FileState::new(file.clone());
            let mut failure: Option<(&'static str, anyhow::Error)> = None;

            for step in &steps {
                if state.is_skipped() {
                    break;
                }
                if let Err(e) = step.execute(&run, &mut state).await {
                    failure = Some((step.name(), e));
                    break;
                }
            }

            if let Some((stage, error)) = failure {
                warn!(
                    file = %file.display(),
                    stage,
                    error = format!("{error:#}"),
                    "File failed, continuing with next file"
                );
                failed += 1;
                self.progress.on_event(&ProgressEvent::file_skipped(
                    file,
                    format!("{stage} failed: {error:#}"),
                ));
            } else if let Some(reason) = state.skip_reason {
                skipped += 1;
                self.progress
                    .on_event(&ProgressEvent::file_skipped(file, reason));
            } else {
                generated += 1;
                if let Some(story_path) = state.written_path {
                    self.progress.on_event(&ProgressEvent::FileCompleted {
                        path: file.clone(),
                        story_path,
                    });
                }
            }
        }

        let summary = RunSummary {
            total_files: run.files.len(),
            generated,
            skipped: skipped + failed,
            failed,
            elapsed: start.elapsed(),
        };

        self.progress.on_event(&ProgressEvent::Completed {
            generated: summary.generated,
            skipped: summary.skipped,
            total_time: summary.elapsed,
        });
        info!(
            generated = summary.generated,
            skipped = summary.skipped,
            failed = summary.failed,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "Run complete"
        );

        Ok(summary)
    }
}

/// Walks up from the input directory to the nearest `package.json`, which
/// anchors framework detection. Falls back to the input directory itself.
fn project_root(input_dir: &Path) -> std::path::PathBuf {
    input_dir
        .ancestors()
        .find(|dir| dir.join("package.json").exists())
        .unwrap_or(input_dir)
        .to_path_buf()
}
