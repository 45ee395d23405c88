//! Angular decorator-class component parser
//!
//! Only accepts files whose class declarations carry an `@Component`
//! decorator. Props are class properties marked `@Input()`; literal-union
//! type aliases are inlined and literal initializers become defaults.
//! `<ng-content>` usage is surfaced as a synthetic content-projection prop.

use super::common::{literal_union_aliases, parse_literal, resolve_alias};
use super::ComponentParser;
use crate::model::{ComponentMeta, Framework, PropDef};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Synthetic prop name carrying projected content in story scenarios.
pub const NG_CONTENT_PROP: &str = "ngContent";
/// Type marker for the content-projection pseudo-prop.
pub const CONTENT_PROJECTION_TYPE: &str = "content-projection";

pub struct AngularParser;

impl AngularParser {
    fn component_class_name(source: &str) -> Option<String> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let class_re = RE.get_or_init(|| {
            Regex::new(r"@Component\s*\(([\s\S]*?)\)\s*(?:export\s+)?class\s+(\w+)").unwrap()
        });
        class_re.captures(source).map(|caps| caps[2].to_string())
    }

    fn extract_inputs(source: &str) -> Vec<PropDef> {
        // @Input() name?: Type = initializer; the `!` definite-assignment
        // marker is consumed so the type annotation still matches.
        static RE: OnceLock<Regex> = OnceLock::new();
        let input_re = RE.get_or_init(|| {
            Regex::new(r"@Input\(\)\s+(\w+)(\?)?!?(?:\s*:\s*([^=;\n]+))?(?:\s*=\s*([^;\n]+))?")
                .unwrap()
        });

        let aliases = literal_union_aliases(source);
        let mut props: Vec<PropDef> = Vec::new();

        for caps in input_re.captures_iter(source) {
            let name = caps[1].to_string();
            let optional = caps.get(2).is_some();
            let type_text = caps
                .get(3)
                .map(|m| resolve_alias(m.as_str(), &aliases))
                .unwrap_or_else(|| "any".to_string());
            let initializer = caps.get(4).map(|m| m.as_str().trim().to_string());
            let required = !optional && initializer.is_none();

            let mut prop = PropDef::new(name, type_text, required);
            if let Some(init) = initializer {
                if let Some(value) = parse_literal(&init) {
                    prop.default_value = Some(value);
                }
            }
            if let Some(doc) = Self::doc_comment_before(source, caps.get(0).unwrap().start()) {
                prop.description = Some(doc);
            }

            props.retain(|p| p.name != prop.name);
            props.push(prop);
        }

        props
    }

    /// Captures a `/** ... */` comment that immediately precedes the given
    /// offset, ignoring whitespace between them.
    fn doc_comment_before(source: &str, offset: usize) -> Option<String> {
        let head = source[..offset].trim_end();
        if !head.ends_with("*/") {
            return None;
        }
        let start = head.rfind("/**")?;
        let body = &head[start + 3..head.len() - 2];
        let text = body
            .lines()
            .map(|l| l.trim().trim_start_matches('*').trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Content projection is detected from the decorator's inline template
    /// when present, else from the raw file text.
    fn detects_ng_content(source: &str) -> bool {
        static RE: OnceLock<Regex> = OnceLock::new();
        let template_re =
            RE.get_or_init(|| Regex::new(r"template\s*:\s*`([\s\S]*?)`").unwrap());
        if let Some(caps) = template_re.captures(source) {
            if caps[1].contains("<ng-content") {
                return true;
            }
        }
        source.contains("<ng-content")
    }
}

impl ComponentParser for AngularParser {
    fn framework(&self) -> Framework {
        Framework::Angular
    }

    fn parse_component_file(&self, path: &Path) -> Result<Option<ComponentMeta>> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let component_name = match Self::component_class_name(&source) {
            Some(name) => name,
            None => {
                debug!(file = %path.display(), "No @Component decorator found");
                return Ok(None);
            }
        };

        let mut props = Self::extract_inputs(&source);

        if Self::detects_ng_content(&source) {
            debug!(component = %component_name, "Detected ng-content usage");
            props.push(
                PropDef::new(NG_CONTENT_PROP, CONTENT_PROJECTION_TYPE, false)
                    .with_description("Content projection (ng-content)"),
            );
        }

        debug!(
            component = %component_name,
            props = props.len(),
            "Parsed Angular component"
        );

        Ok(Some(ComponentMeta::new(component_name, path, props, source)))
    }

    fn extract_component_name(&self, path: &Path) -> Result<Option<String>> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::component_class_name(&source))
    }
}
