//! React function-component parser
//!
//! Recognizes an exported function, arrow-function constant or class as the
//! component, locates the associated props interface, and scans the raw
//! source for implicit `children` usage that declared props do not capture.

use super::common::{literal_union_aliases, parse_type_members};
use super::ComponentParser;
use crate::model::{ComponentMeta, Framework, PropDef};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

pub struct ReactParser;

fn re(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).unwrap())
}

impl ReactParser {
    /// Finds the exported component symbol, preferring named exports and
    /// falling back to the default-export identifier.
    fn find_component_name(source: &str) -> Option<String> {
        static FUNCTION: OnceLock<Regex> = OnceLock::new();
        static CONST: OnceLock<Regex> = OnceLock::new();
        static CLASS: OnceLock<Regex> = OnceLock::new();
        static DEFAULT: OnceLock<Regex> = OnceLock::new();

        let patterns = [
            re(&FUNCTION, r"export\s+(?:default\s+)?function\s+(\w+)"),
            re(&CONST, r"export\s+const\s+(\w+)\s*(?::[^=\n]+)?="),
            re(&CLASS, r"export\s+(?:default\s+)?class\s+(\w+)"),
            re(&DEFAULT, r"export\s+default\s+(\w+)\s*;?"),
        ];

        patterns
            .iter()
            .find_map(|pattern| pattern.captures(source).map(|c| c[1].to_string()))
    }

    /// Locates the props type name: (a) an interface whose name contains
    /// "props", (b) the generic argument of the component's declared type,
    /// (c) the type annotation of the first function parameter.
    fn find_props_type_name(source: &str, component_name: &str) -> Option<String> {
        static INTERFACE: OnceLock<Regex> = OnceLock::new();
        let interface_re = re(&INTERFACE, r"(?:export\s+)?interface\s+(\w+)");
        for caps in interface_re.captures_iter(source) {
            if caps[1].to_lowercase().contains("props") {
                return Some(caps[1].to_string());
            }
        }

        let generic_re = Regex::new(&format!(
            r"const\s+{}\s*:\s*[\w.]+\s*<\s*(\w+)\s*>",
            regex::escape(component_name)
        ))
        .ok()?;
        if let Some(caps) = generic_re.captures(source) {
            return Some(caps[1].to_string());
        }

        let param_re = Regex::new(&format!(
            r"(?:function\s+{name}|const\s+{name}\s*=)\s*\(\s*(?:\{{[^}}]*\}}|\w+)\s*:\s*(\w+)",
            name = regex::escape(component_name)
        ))
        .ok()?;
        param_re.captures(source).map(|caps| caps[1].to_string())
    }

    fn parse_props(source: &str, interface_name: &str) -> Vec<PropDef> {
        let body_re = match Regex::new(&format!(
            r"(?:export\s+)?interface\s+{}\s*(?:extends[^{{]*)?\{{([\s\S]*?)\n\}}",
            regex::escape(interface_name)
        )) {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };
        let aliases = literal_union_aliases(source);
        body_re
            .captures(source)
            .map(|caps| parse_type_members(&caps[1], &aliases))
            .unwrap_or_default()
    }

    /// Heuristics for implicit children usage, in priority order: parameter
    /// destructuring, arrow-function initializer text, raw `{children}` /
    /// `{ children }` pattern.
    fn detects_children(source: &str) -> bool {
        static PARAM: OnceLock<Regex> = OnceLock::new();
        static ARROW: OnceLock<Regex> = OnceLock::new();

        let param_re = re(&PARAM, r"\(\s*\{[^)]*\bchildren\b[^)]*\}");
        if param_re.is_match(source) {
            return true;
        }
        let arrow_re = re(&ARROW, r"=\s*\([^)]*\bchildren\b[^)]*\)\s*(?::[^=]+)?=>");
        if arrow_re.is_match(source) {
            return true;
        }
        source.contains("{children}") || source.contains("{ children }")
    }
}

impl ComponentParser for ReactParser {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn parse_component_file(&self, path: &Path) -> Result<Option<ComponentMeta>> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let component_name = match Self::find_component_name(&source) {
            Some(name) => name,
            None => {
                debug!(file = %path.display(), "No component export detected");
                return Ok(None);
            }
        };

        let mut props = Self::find_props_type_name(&source, &component_name)
            .map(|iface| Self::parse_props(&source, &iface))
            .unwrap_or_default();

        if Self::detects_children(&source) && !props.iter().any(|p| p.name == "children") {
            debug!(component = %component_name, "Detected implicit children usage");
            props.push(
                PropDef::new("children", "ReactNode", false)
                    .with_description("Renderable content passed between the component tags"),
            );
        }

        debug!(
            component = %component_name,
            props = props.len(),
            "Parsed React component"
        );

        Ok(Some(ComponentMeta::new(component_name, path, props, source)))
    }

    fn extract_component_name(&self, path: &Path) -> Result<Option<String>> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::find_component_name(&source))
    }
}
