//! Plain data types shared across the pipeline

mod component;
mod framework;

pub use component::{ComponentMeta, PropDef};
pub use framework::{detect_framework, Framework};
