//! Component file discovery
//!
//! Walks the input directory for files matching the framework's component
//! conventions, builds the run-wide component name list, and optionally
//! narrows the set to git-staged files.

use crate::model::Framework;
use crate::parser::parser_for;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Enumerates component files under `input_dir` in deterministic (sorted)
/// order. Story files and `node_modules` never match.
pub fn discover_component_files(input_dir: &Path, framework: Framework) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(input_dir)
        .hidden(true)
        .git_ignore(true)
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name != "node_modules")
                .unwrap_or(true)
        })
        .build();

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", input_dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.into_path();
        if framework.matches_component_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    debug!(
        directory = %input_dir.display(),
        framework = %framework,
        count = files.len(),
        "Discovered component files"
    );
    Ok(files)
}

/// Extracts the exported component name from every discovered file. Files
/// whose name cannot be determined are logged and left out; they still go
/// through the full pipeline later.
pub fn available_components(files: &[PathBuf], framework: Framework) -> Vec<String> {
    let parser = parser_for(framework);
    let mut names: Vec<String> = Vec::new();

    for path in files {
        match parser.extract_component_name(path) {
            Ok(Some(name)) => {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            Ok(None) => {
                debug!(file = %path.display(), "No component name found");
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Failed to extract component name");
            }
        }
    }

    names.sort();
    names
}

/// Returns the set of files staged in git under `input_dir`. A failed query
/// (git unavailable, not a repository) is logged and yields an empty set, so
/// staged-only runs process zero files rather than silently processing all.
pub fn staged_files(input_dir: &Path) -> HashSet<PathBuf> {
    let output = Command::new("git")
        .args(["diff", "--name-only", "--cached", "--"])
        .arg(input_dir)
        .output();

    let output = match output {
        Ok(out) if out.status.success() => out,
        Ok(out) => {
            warn!(
                status = %out.status,
                "git diff failed, treating staged set as empty"
            );
            return HashSet::new();
        }
        Err(e) => {
            warn!(error = %e, "git unavailable, treating staged set as empty");
            return HashSet::new();
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let staged: HashSet<PathBuf> = stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();

    debug!(staged = staged.len(), "Staged file filter active");
    staged
}

/// Filters `files` down to those appearing in the staged set. Paths are
/// compared by suffix because git prints repository-relative paths.
pub fn filter_to_staged(files: Vec<PathBuf>, staged: &HashSet<PathBuf>) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|file| staged.iter().any(|s| file.ends_with(s) || s.ends_with(file)))
        .collect()
}
