//! Supported UI frameworks and project auto-detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// The closed set of supported frameworks.
///
/// The parser and template tables in [`crate::parser`] and [`crate::render`]
/// are both indexed by this enum; adding a framework means adding one variant
/// and two table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Angular,
    Vue,
}

impl Framework {
    /// Display name used in prompts and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Angular => "Angular",
            Framework::Vue => "Vue",
        }
    }

    /// Suffix appended to the component base name for generated stories.
    pub fn story_suffix(&self) -> &'static str {
        match self {
            Framework::React => ".stories.tsx",
            Framework::Angular | Framework::Vue => ".stories.ts",
        }
    }

    /// Fallback title group when no `components` path segment is found.
    pub fn default_title_group(&self) -> &'static str {
        match self {
            Framework::React => "Atoms",
            Framework::Angular | Framework::Vue => "Components",
        }
    }

    /// Whether a path looks like a component source file for this framework.
    pub fn matches_component_file(&self, path: &Path) -> bool {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => return false,
        };
        if name.contains(".stories.") || name.contains(".story.") {
            return false;
        }
        match self {
            Framework::React => name.ends_with(".tsx") || name.ends_with(".jsx"),
            Framework::Angular => name.ends_with(".component.ts"),
            Framework::Vue => name.ends_with(".vue"),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Framework::React => "react",
            Framework::Angular => "angular",
            Framework::Vue => "vue",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "react" => Ok(Framework::React),
            "angular" => Ok(Framework::Angular),
            "vue" => Ok(Framework::Vue),
            other => Err(format!(
                "Unknown framework: {}. Valid options: react, angular, vue",
                other
            )),
        }
    }
}

/// Auto-detects the framework used by a project.
///
/// Checks `package.json` dependencies first (Angular is most specific, React
/// most common, so the priority order is angular > vue > react), then falls
/// back to scanning `src/` for framework-characteristic file names, and
/// finally defaults to React.
pub fn detect_framework(project_root: &Path) -> Framework {
    if let Some(framework) = detect_from_manifest(project_root) {
        return framework;
    }

    debug!("No framework found in package.json, checking file patterns");
    let src_dir = project_root.join("src");
    if src_dir.is_dir() {
        if has_file_matching(&src_dir, |name| name.ends_with(".vue")) {
            debug!("Detected Vue from .vue files");
            return Framework::Vue;
        }
        if has_file_matching(&src_dir, |name| name.ends_with(".component.ts")) {
            debug!("Detected Angular from .component.ts files");
            return Framework::Angular;
        }
    }

    debug!("Defaulting to React");
    Framework::React
}

fn detect_from_manifest(project_root: &Path) -> Option<Framework> {
    let manifest_path = project_root.join("package.json");
    let content = std::fs::read_to_string(&manifest_path).ok()?;

    let manifest: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Failed to parse package.json");
            return None;
        }
    };

    let has_dep = |name: &str| {
        ["dependencies", "devDependencies"]
            .iter()
            .any(|section| manifest.get(section).and_then(|d| d.get(name)).is_some())
    };

    if has_dep("@angular/core") {
        debug!("Detected Angular from package.json");
        return Some(Framework::Angular);
    }
    if has_dep("vue") || has_dep("@vue/runtime-core") {
        debug!("Detected Vue from package.json");
        return Some(Framework::Vue);
    }
    if has_dep("react") || has_dep("react-dom") {
        debug!("Detected React from package.json");
        return Some(Framework::React);
    }

    None
}

fn has_file_matching(dir: &Path, predicate: impl Fn(&str) -> bool) -> bool {
    ignore::WalkBuilder::new(dir)
        .hidden(false)
        .git_global(false)
        .git_exclude(false)
        .build()
        .filter_map(|entry| entry.ok())
        .any(|entry| {
            entry.path().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(&predicate)
                    .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_roundtrip() {
        for fw in [Framework::React, Framework::Angular, Framework::Vue] {
            assert_eq!(fw.to_string().parse::<Framework>().unwrap(), fw);
        }
        assert!("svelte".parse::<Framework>().is_err());
    }

    #[test]
    fn test_story_files_never_match() {
        assert!(!Framework::React.matches_component_file(Path::new("Button.stories.tsx")));
        assert!(!Framework::Vue.matches_component_file(Path::new("Button.story.vue")));
    }

    #[test]
    fn test_component_file_matching() {
        assert!(Framework::React.matches_component_file(Path::new("Button.tsx")));
        assert!(Framework::React.matches_component_file(Path::new("Button.jsx")));
        assert!(!Framework::React.matches_component_file(Path::new("button.ts")));
        assert!(Framework::Angular.matches_component_file(Path::new("button.component.ts")));
        assert!(!Framework::Angular.matches_component_file(Path::new("button.service.ts")));
        assert!(Framework::Vue.matches_component_file(Path::new("Button.vue")));
    }

    #[test]
    fn test_detect_from_package_json_priority() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"@angular/core": "^17.0.0", "react": "^18.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(detect_framework(dir.path()), Framework::Angular);
    }

    #[test]
    fn test_detect_from_dev_dependencies() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"vue": "^3.4.0"}}"#,
        )
        .unwrap();
        assert_eq!(detect_framework(dir.path()), Framework::Vue);
    }

    #[test]
    fn test_detect_from_file_patterns() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/components")).unwrap();
        fs::write(dir.path().join("src/components/App.vue"), "<template/>").unwrap();
        assert_eq!(detect_framework(dir.path()), Framework::Vue);
    }

    #[test]
    fn test_detect_defaults_to_react() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_framework(dir.path()), Framework::React);
    }
}
