//! Vue single-file component parser
//!
//! The component name comes from the file name, not the source. Props are
//! recovered from whichever declaration style the SFC uses: a typed
//! `defineProps` (inline literal or interface reference, optionally wrapped
//! in `withDefaults`), a runtime `defineProps({...})` object, or an Options
//! API `props:` block in a plain script when the setup script declares none.
//! Files without any script section are skipped. An unnamed `<slot>` in the
//! template is surfaced as a synthetic "default" prop unless a prop of that
//! name is already declared.

use super::common::{literal_union_aliases, parse_literal, parse_type_members, pascal_case};
use super::ComponentParser;
use crate::model::{ComponentMeta, Framework, PropDef};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Synthetic prop name carrying default-slot content in story scenarios.
pub const DEFAULT_SLOT_PROP: &str = "default";
/// Type marker for the default-slot pseudo-prop.
pub const SLOT_TYPE: &str = "slot";

pub struct VueParser;

struct SfcSections {
    script_setup: Option<String>,
    script: Option<String>,
    template: Option<String>,
}

fn split_sections(source: &str) -> SfcSections {
    static SCRIPT: OnceLock<Regex> = OnceLock::new();
    static TEMPLATE: OnceLock<Regex> = OnceLock::new();
    let script_re = SCRIPT
        .get_or_init(|| Regex::new(r"<script([^>]*)>([\s\S]*?)</script>").unwrap());
    let template_re =
        TEMPLATE.get_or_init(|| Regex::new(r"<template[^>]*>([\s\S]*?)</template>").unwrap());

    let mut script_setup = None;
    let mut script = None;
    for caps in script_re.captures_iter(source) {
        let attrs = &caps[1];
        if attrs.contains("setup") {
            script_setup.get_or_insert_with(|| caps[2].to_string());
        } else {
            script.get_or_insert_with(|| caps[2].to_string());
        }
    }

    SfcSections {
        script_setup,
        script,
        template: template_re.captures(source).map(|c| c[1].to_string()),
    }
}

/// Extracts the brace-balanced block starting at the first `{` at or after
/// `from`. Returns the text between the outer braces.
fn balanced_block(text: &str, from: usize) -> Option<String> {
    let bytes = text.as_bytes();
    let open = text[from..].find('{')? + from;
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[open + 1..i].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

impl VueParser {
    fn parse_script_setup(script: &str) -> Vec<PropDef> {
        let aliases = literal_union_aliases(script);

        // withDefaults(defineProps<X>(), { ... }) flips required off for
        // every prop named in the defaults block.
        if let Some(pos) = script.find("withDefaults") {
            let mut props = Self::typed_define_props(script, &aliases);
            let after_call = script[pos..]
                .find(')')
                .map(|end| pos + end)
                .unwrap_or(pos);
            if let Some(block) = balanced_block(script, after_call) {
                for (name, value) in Self::literal_entries(&block) {
                    if let Some(prop) = props.iter_mut().find(|p| p.name == name) {
                        prop.required = false;
                        prop.default_value = Some(value);
                    }
                }
            }
            return props;
        }

        if script.contains("defineProps<") {
            return Self::typed_define_props(script, &aliases);
        }

        if let Some(pos) = script.find("defineProps(") {
            if let Some(block) = balanced_block(script, pos) {
                return Self::runtime_props(&block);
            }
        }

        Vec::new()
    }

    /// Handles `defineProps<{...}>()` and `defineProps<Name>()`.
    fn typed_define_props(
        script: &str,
        aliases: &std::collections::HashMap<String, String>,
    ) -> Vec<PropDef> {
        static INLINE: OnceLock<Regex> = OnceLock::new();
        static NAMED: OnceLock<Regex> = OnceLock::new();
        let inline_re =
            INLINE.get_or_init(|| Regex::new(r"defineProps\s*<\s*\{([\s\S]*?)\}\s*>").unwrap());
        if let Some(caps) = inline_re.captures(script) {
            return parse_type_members(&caps[1], aliases);
        }

        let named_re =
            NAMED.get_or_init(|| Regex::new(r"defineProps\s*<\s*(\w+)\s*>").unwrap());
        if let Some(caps) = named_re.captures(script) {
            let iface_re = match Regex::new(&format!(
                r"(?:export\s+)?interface\s+{}\s*\{{([\s\S]*?)\n\s*\}}",
                regex::escape(&caps[1])
            )) {
                Ok(re) => re,
                Err(_) => return Vec::new(),
            };
            if let Some(body) = iface_re.captures(script) {
                return parse_type_members(&body[1], aliases);
            }
        }

        Vec::new()
    }

    /// Handles the runtime object form: `name: { type: String, required:
    /// true, default: ... }` entries and `name: String` shorthands.
    fn runtime_props(block: &str) -> Vec<PropDef> {
        static ENTRY: OnceLock<Regex> = OnceLock::new();
        static SHORTHAND: OnceLock<Regex> = OnceLock::new();
        let entry_re = ENTRY
            .get_or_init(|| Regex::new(r"(?m)^\s*(\w+)\s*:\s*\{([^}]*)\}").unwrap());
        let shorthand_re = SHORTHAND.get_or_init(|| {
            Regex::new(r"(?m)^\s*(\w+)\s*:\s*(String|Number|Boolean|Array|Object|Function)\s*,?\s*$")
                .unwrap()
        });

        let mut props: Vec<PropDef> = Vec::new();

        for caps in entry_re.captures_iter(block) {
            let name = caps[1].to_string();
            let body = &caps[2];
            let type_text = Regex::new(r"type\s*:\s*(\w+)")
                .ok()
                .and_then(|re| re.captures(body).map(|c| c[1].to_lowercase()))
                .unwrap_or_else(|| "any".to_string());
            let required = body.contains("required: true") || body.contains("required:true");
            let default_value = Regex::new(r"default\s*:\s*([^,\n]+)")
                .ok()
                .and_then(|re| re.captures(body).map(|c| c[1].trim().to_string()))
                .and_then(|text| parse_literal(&text));
            let mut prop = PropDef::new(name, type_text, required && default_value.is_none());
            prop.default_value = default_value;
            props.retain(|p| p.name != prop.name);
            props.push(prop);
        }

        for caps in shorthand_re.captures_iter(block) {
            let name = caps[1].to_string();
            if props.iter().any(|p| p.name == name) {
                continue;
            }
            props.push(PropDef::new(name, caps[2].to_lowercase(), false));
        }

        props
    }

    /// Collects `key: literal` pairs from an object block, skipping entries
    /// whose value is not a plain literal.
    fn literal_entries(block: &str) -> Vec<(String, serde_json::Value)> {
        static PAIR: OnceLock<Regex> = OnceLock::new();
        let pair_re =
            PAIR.get_or_init(|| Regex::new(r"(?m)^\s*(\w+)\s*:\s*([^,\n]+)").unwrap());
        pair_re
            .captures_iter(block)
            .filter_map(|caps| {
                let value = parse_literal(caps[2].trim().trim_end_matches(','))?;
                Some((caps[1].to_string(), value))
            })
            .collect()
    }

    /// Options API `props:` block in a plain `<script>`.
    fn parse_options_script(script: &str) -> Vec<PropDef> {
        if let Some(pos) = script.find("props:") {
            if let Some(block) = balanced_block(script, pos) {
                return Self::runtime_props(&block);
            }
        }
        Vec::new()
    }

    /// An unnamed `<slot>` in the template is the default slot.
    fn detects_default_slot(template: &str) -> bool {
        static SLOT: OnceLock<Regex> = OnceLock::new();
        let slot_re = SLOT.get_or_init(|| Regex::new(r"<slot\b([^>]*)>").unwrap());
        slot_re
            .captures_iter(template)
            .any(|caps| !caps[1].contains("name="))
    }
}

impl ComponentParser for VueParser {
    fn framework(&self) -> Framework {
        Framework::Vue
    }

    fn parse_component_file(&self, path: &Path) -> Result<Option<ComponentMeta>> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => return Ok(None),
        };
        let component_name = pascal_case(stem);

        let sections = split_sections(&source);
        if sections.script_setup.is_none() && sections.script.is_none() {
            debug!(file = %path.display(), "No script section, skipping");
            return Ok(None);
        }

        let mut props = sections
            .script_setup
            .as_deref()
            .map(Self::parse_script_setup)
            .unwrap_or_default();
        if props.is_empty() {
            if let Some(script) = &sections.script {
                props = Self::parse_options_script(script);
            }
        }

        if let Some(template) = &sections.template {
            if Self::detects_default_slot(template)
                && !props.iter().any(|p| p.name == DEFAULT_SLOT_PROP)
            {
                debug!(component = %component_name, "Detected default slot");
                props.push(
                    PropDef::new(DEFAULT_SLOT_PROP, SLOT_TYPE, false)
                        .with_description("Content rendered into the default slot"),
                );
            }
        }

        debug!(
            component = %component_name,
            props = props.len(),
            "Parsed Vue component"
        );

        Ok(Some(ComponentMeta::new(component_name, path, props, source)))
    }

    fn extract_component_name(&self, path: &Path) -> Result<Option<String>> {
        Ok(path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(pascal_case))
    }
}
