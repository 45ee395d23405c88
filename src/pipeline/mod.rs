//! The story generation pipeline
//!
//! Discovery runs once per invocation; the per-file steps (parse, prompt,
//! llm, render, write) run in sequence with fresh state for every file.

pub mod context;
pub mod discover;
pub mod orchestrator;
pub mod steps;

pub use context::{FileState, RunContext};
pub use discover::{available_components, discover_component_files};
pub use orchestrator::{GenerationPipeline, RunSummary};
pub use steps::GenerationStep;
