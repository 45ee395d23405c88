//! storygen - AI-powered Storybook story generation
//!
//! This library scans a directory for UI component files (React, Angular or
//! Vue), extracts component metadata with lightweight text parsing, asks an
//! LLM for realistic story scenarios, and renders Storybook CSF3 story files
//! next to each component.
//!
//! # Core Concepts
//!
//! - **Parsers**: One per framework, turning raw source text into
//!   [`model::ComponentMeta`] with regex heuristics
//! - **Gateway**: [`llm::StoryGateway`] wraps a pluggable LLM client with a
//!   degrading request chain (JSON mode, strict parse, lenient extraction)
//! - **Templates**: One renderer per framework emitting CSF3 story text
//! - **Pipeline**: Discovery once, then parse/prompt/llm/render/write per
//!   file with failure containment at each step boundary
//!
//! # Example Usage
//!
//! ```ignore
//! use storygen::config::GeneratorConfig;
//! use storygen::llm::StoryGateway;
//! use storygen::pipeline::GenerationPipeline;
//! use std::sync::Arc;
//!
//! async fn generate() -> anyhow::Result<()> {
//!     let config = GeneratorConfig::load(std::path::Path::new("."))?;
//!     config.validate()?;
//!
//!     let gateway = Arc::new(StoryGateway::new(config.create_client()?));
//!     let summary = GenerationPipeline::new(gateway).run(&config).await?;
//!
//!     println!("Generated {} story file(s)", summary.generated);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod llm;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod render;
pub mod writer;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
