//! Run progress reporting
//!
//! The pipeline emits coarse events through a [`ProgressHandler`] so front
//! ends can show progress without the pipeline knowing about terminals.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Events emitted while a generation run executes.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Discovery finished; per-file processing is about to begin.
    Started { total_files: usize },
    /// One component file entered the per-file pipeline.
    FileStarted { path: PathBuf, index: usize },
    /// A story file was written for this component.
    FileCompleted { path: PathBuf, story_path: PathBuf },
    /// The file was skipped; `reason` says why.
    FileSkipped { path: PathBuf, reason: String },
    /// The whole run finished.
    Completed {
        generated: usize,
        skipped: usize,
        total_time: Duration,
    },
}

pub trait ProgressHandler: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

/// Discards all events.
#[derive(Debug, Default)]
pub struct NoOpProgressHandler;

impl ProgressHandler for NoOpProgressHandler {
    fn on_event(&self, _event: &ProgressEvent) {}
}

/// Reports events through the tracing subscriber.
#[derive(Debug, Default)]
pub struct LoggingProgressHandler;

impl ProgressHandler for LoggingProgressHandler {
    fn on_event(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total_files } => {
                info!(total_files, "Generation started");
            }
            ProgressEvent::FileStarted { path, index } => {
                info!(file = %path.display(), index, "Processing component file");
            }
            ProgressEvent::FileCompleted { path, story_path } => {
                info!(
                    file = %path.display(),
                    story = %story_path.display(),
                    "Story generated"
                );
            }
            ProgressEvent::FileSkipped { path, reason } => {
                info!(file = %path.display(), reason = %reason, "File skipped");
            }
            ProgressEvent::Completed {
                generated,
                skipped,
                total_time,
            } => {
                info!(
                    generated,
                    skipped,
                    elapsed_secs = total_time.as_secs_f64(),
                    "Generation completed"
                );
            }
        }
    }
}

impl ProgressEvent {
    pub fn file_started(path: &Path, index: usize) -> Self {
        ProgressEvent::FileStarted {
            path: path.to_path_buf(),
            index,
        }
    }

    pub fn file_skipped(path: &Path, reason: impl Into<String>) -> Self {
        ProgressEvent::FileSkipped {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
