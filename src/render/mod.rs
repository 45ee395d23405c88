//! Story file renderers
//!
//! One template per framework, all driven by the same validated story
//! output. Shared text helpers (title derivation, story identifiers,
//! template-literal escaping, placeholder content) live here so the three
//! templates stay format-only.

mod angular;
mod react;
mod vue;

pub use angular::AngularStoryTemplate;
pub use react::ReactStoryTemplate;
pub use vue::VueStoryTemplate;

use crate::llm::LlmStoryOutput;
use crate::model::{ComponentMeta, Framework};

/// Renders one story file from component metadata and the LLM output.
pub trait StoryTemplate: Send + Sync {
    fn framework(&self) -> Framework;

    /// Suffix appended to the component file stem, e.g. `.stories.tsx`.
    fn story_file_extension(&self) -> &'static str;

    fn render_story(&self, meta: &ComponentMeta, output: &LlmStoryOutput) -> String;
}

static REACT: ReactStoryTemplate = ReactStoryTemplate;
static ANGULAR: AngularStoryTemplate = AngularStoryTemplate;
static VUE: VueStoryTemplate = VueStoryTemplate;

/// Maps a framework identifier to its story template.
pub fn template_for(framework: Framework) -> &'static dyn StoryTemplate {
    match framework {
        Framework::React => &REACT,
        Framework::Angular => &ANGULAR,
        Framework::Vue => &VUE,
    }
}

/// Converts a story name to a valid exported identifier: non-alphanumeric
/// runs become word boundaries and each word is capitalized.
pub(crate) fn story_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derives the Storybook title from the component's directory: the segment
/// after the last `components` directory becomes the group, otherwise the
/// framework default group is used.
pub(crate) fn derive_title(meta: &ComponentMeta, framework: Framework) -> String {
    let parts: Vec<String> = meta
        .directory
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => s.to_str().map(str::to_string),
            _ => None,
        })
        .collect();

    if let Some(idx) = parts.iter().rposition(|p| p == "components") {
        if idx + 1 < parts.len() {
            return format!("{}/{}", capitalize(&parts[idx + 1]), meta.component_name);
        }
    }
    format!(
        "{}/{}",
        framework.default_title_group(),
        meta.component_name
    )
}

/// Escapes text for embedding in a JavaScript template literal. Backslashes
/// must go first so later escapes are not doubled.
pub(crate) fn escape_template_content(content: &str) -> String {
    content
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Placeholder content for slot/projection scenarios whose output left the
/// content empty. Keyed off component and story names.
pub(crate) fn default_slot_content(component_name: &str, story_name: &str) -> String {
    let component = component_name.to_lowercase();
    let story = story_name.to_lowercase();

    if component.contains("button") || component.contains("btn") {
        if story.contains("disabled") {
            return "Disabled".to_string();
        }
        if story.contains("loading") {
            return "Loading...".to_string();
        }
        if story.contains("primary") {
            return "Click me".to_string();
        }
        if story.contains("secondary") {
            return "Secondary".to_string();
        }
        if story.contains("outline") {
            return "Outline".to_string();
        }
        if story.contains("icon") {
            return "With Icon".to_string();
        }
        if story.contains("full") {
            return "Full Width Button".to_string();
        }
        if story.contains("empty") {
            return String::new();
        }
        return "Button".to_string();
    }

    if component.contains("card") {
        if story.contains("empty") {
            return String::new();
        }
        return "Card content goes here".to_string();
    }

    if component.contains("link") {
        return "Link text".to_string();
    }

    if component.contains("tab") {
        return "Tab content".to_string();
    }

    if component.contains("modal") || component.contains("dialog") {
        return "Modal content".to_string();
    }

    if component.contains("alert") || component.contains("notification") {
        return "Alert message".to_string();
    }

    if story.contains("empty") {
        return String::new();
    }
    "Content".to_string()
}

/// Import stem for the component file: the file name without its final
/// extension.
pub(crate) fn component_file_stem(meta: &ComponentMeta) -> String {
    meta.file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(&meta.component_name)
        .to_string()
}
