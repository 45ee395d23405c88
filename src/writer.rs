//! Story file output
//!
//! Stories land next to their component, named from the component file stem
//! plus the framework's story suffix. Existing story files are overwritten;
//! regeneration is the expected workflow.

use crate::model::Framework;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the rendered story next to the component file and returns the
/// story path.
pub fn write_story_file(
    component_path: &Path,
    framework: Framework,
    content: &str,
) -> Result<PathBuf> {
    let directory = component_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let stem = component_path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Invalid component path: {}", component_path.display()))?;

    let story_path = directory.join(format!("{}{}", stem, framework.story_suffix()));

    std::fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create {}", directory.display()))?;
    std::fs::write(&story_path, content)
        .with_context(|| format!("Failed to write {}", story_path.display()))?;

    info!(path = %story_path.display(), "Story file written");
    Ok(story_path)
}
