//! LLM client abstraction and the story generation gateway
//!
//! A trait-based client layer (GenAI for production, Mock for tests) sits
//! under [`StoryGateway`], which owns the degrading request chain and the
//! response schema.

mod client;
mod error;
mod gateway;
mod genai;
mod mock;
mod schema;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use gateway::StoryGateway;
pub use genai::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use schema::{
    extract_json, parse_story_output, LlmStoryOutput, PropDefinition, StoryScenario,
    MAX_SCENARIOS, MIN_SCENARIOS,
};
pub use types::{LLMRequest, LLMResponse};
