//! Component metadata extracted by the framework parsers

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One declared component input.
///
/// `type_text` is the human-readable type signature. Parsers resolve named
/// type aliases into inline literal-union text (e.g. `ButtonVariant` becomes
/// `'primary' | 'secondary'`) because nothing downstream resolves aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Literal initializer value, when one could be parsed. Always a
    /// JSON-safe value (string, number, boolean or null).
    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl PropDef {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            required,
            description: None,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Metadata for one discovered, parseable component.
///
/// Constructed once by a parser from a single file and immutable afterward.
#[derive(Debug, Clone)]
pub struct ComponentMeta {
    /// Exported symbol or class name; used as the import identifier in
    /// generated code.
    pub component_name: String,
    /// Absolute path to the source file.
    pub file_path: PathBuf,
    /// Parent directory of `file_path`.
    pub directory: PathBuf,
    /// Declared props in declaration order, plus any synthetic
    /// content-slot pseudo-props appended by the parser.
    pub props: Vec<PropDef>,
    /// Full original file text, retained for heuristic re-scanning.
    pub raw_code: String,
}

impl ComponentMeta {
    pub fn new(
        component_name: impl Into<String>,
        file_path: impl Into<PathBuf>,
        props: Vec<PropDef>,
        raw_code: impl Into<String>,
    ) -> Self {
        let file_path = file_path.into();
        let directory = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            component_name: component_name.into(),
            file_path,
            directory,
            props,
            raw_code: raw_code.into(),
        }
    }

    pub fn prop(&self, name: &str) -> Option<&PropDef> {
        self.props.iter().find(|p| p.name == name)
    }

    pub fn has_prop(&self, name: &str) -> bool {
        self.prop(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_derived_from_file_path() {
        let meta = ComponentMeta::new(
            "Button",
            "/app/src/components/Button/Button.tsx",
            vec![],
            "",
        );
        assert_eq!(
            meta.directory,
            PathBuf::from("/app/src/components/Button")
        );
    }

    #[test]
    fn test_prop_lookup() {
        let meta = ComponentMeta::new(
            "Button",
            "/app/Button.tsx",
            vec![PropDef::new("label", "string", true)],
            "",
        );
        assert!(meta.has_prop("label"));
        assert!(!meta.has_prop("variant"));
    }

    #[test]
    fn test_prop_def_serializes_type_field() {
        let prop = PropDef::new("variant", "'primary' | 'secondary'", false)
            .with_default(serde_json::json!("primary"));
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json["type"], "'primary' | 'secondary'");
        assert_eq!(json["defaultValue"], "primary");
        assert!(json.get("description").is_none());
    }
}
