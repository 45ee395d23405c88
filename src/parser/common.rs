//! Shared text heuristics used by the framework parsers
//!
//! All three parsers analyze raw source text with regular expressions rather
//! than a structural parser. The heuristics live here, behind the
//! [`super::ComponentParser`] boundary, so they can be swapped for a real
//! parser without touching the pipeline.

use crate::model::PropDef;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Converts kebab-case, snake_case or camelCase text to PascalCase.
pub fn pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = true;
    for ch in s.chars() {
        if ch == '-' || ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Parses a literal initializer into a JSON-safe value.
///
/// Only literals are handled (`true`/`false`, quoted strings, integers);
/// computed initializers return `None` and the default stays unset.
pub fn parse_literal(text: &str) -> Option<serde_json::Value> {
    let trimmed = text.trim();
    match trimmed {
        "true" => return Some(serde_json::Value::Bool(true)),
        "false" => return Some(serde_json::Value::Bool(false)),
        "null" => return Some(serde_json::Value::Null),
        _ => {}
    }
    if trimmed.len() >= 2 {
        let bytes = trimmed.as_bytes();
        let quote = bytes[0];
        if (quote == b'\'' || quote == b'"') && bytes[bytes.len() - 1] == quote {
            return Some(serde_json::Value::String(
                trimmed[1..trimmed.len() - 1].to_string(),
            ));
        }
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(serde_json::Value::from(n));
    }
    None
}

fn alias_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:export\s+)?type\s+(\w+)\s*=\s*([^;]+);").unwrap()
    })
}

/// Builds a table of type-alias names that resolve to literal-union text
/// within the same file. Only aliases whose right-hand side contains quoted
/// literals are kept.
pub fn literal_union_aliases(source: &str) -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    for caps in alias_regex().captures_iter(source) {
        let rhs = caps[2].trim();
        if rhs.contains('\'') || rhs.contains('"') {
            aliases.insert(caps[1].to_string(), rhs.to_string());
        }
    }
    aliases
}

/// Substitutes a type (or any member of a union type) that matches a known
/// alias name with its literal-union text.
pub fn resolve_alias(type_text: &str, aliases: &HashMap<String, String>) -> String {
    let trimmed = type_text.trim();
    if let Some(resolved) = aliases.get(trimmed) {
        return resolved.clone();
    }
    if trimmed.contains(" | ") {
        return trimmed
            .split(" | ")
            .map(|part| {
                let part = part.trim();
                aliases
                    .get(part)
                    .map(String::as_str)
                    .unwrap_or(part)
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(" | ");
    }
    trimmed.to_string()
}

/// Parses the members of a type literal or interface body into prop
/// definitions. Handles optional markers, trailing separators and an
/// immediately preceding `/** ... */` documentation comment per member.
pub fn parse_type_members(block: &str, aliases: &HashMap<String, String>) -> Vec<PropDef> {
    static MEMBER_RE: OnceLock<Regex> = OnceLock::new();
    let member_re = MEMBER_RE
        .get_or_init(|| Regex::new(r"^(\w+)(\?)?\s*:\s*(.+?)[;,]?$").unwrap());

    let mut props: Vec<PropDef> = Vec::new();
    let mut pending_doc: Vec<String> = Vec::new();
    let mut in_doc = false;

    for raw_line in block.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("/**") {
            in_doc = true;
            pending_doc.clear();
            let inner = line
                .trim_start_matches("/**")
                .trim_end_matches("*/")
                .trim();
            if !inner.is_empty() {
                pending_doc.push(inner.to_string());
            }
            if line.ends_with("*/") {
                in_doc = false;
            }
            continue;
        }
        if in_doc {
            if line.ends_with("*/") {
                in_doc = false;
            }
            let inner = line
                .trim_start_matches('*')
                .trim_end_matches("*/")
                .trim_start_matches('*')
                .trim();
            if !inner.is_empty() {
                pending_doc.push(inner.to_string());
            }
            continue;
        }
        if line.starts_with("//") {
            continue;
        }

        if let Some(caps) = member_re.captures(line) {
            let name = caps[1].to_string();
            let required = caps.get(2).is_none();
            let type_text = resolve_alias(&caps[3], aliases);
            let mut prop = PropDef::new(name, type_text, required);
            if !pending_doc.is_empty() {
                prop.description = Some(pending_doc.join("\n"));
            }
            // last-wins on duplicate member names
            props.retain(|p| p.name != prop.name);
            props.push(prop);
        }
        pending_doc.clear();
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("my-button"), "MyButton");
        assert_eq!(pascal_case("user_card"), "UserCard");
        assert_eq!(pascal_case("button"), "Button");
        assert_eq!(pascal_case("BaseInput"), "BaseInput");
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("true"), Some(serde_json::json!(true)));
        assert_eq!(parse_literal("'primary'"), Some(serde_json::json!("primary")));
        assert_eq!(parse_literal("\"md\""), Some(serde_json::json!("md")));
        assert_eq!(parse_literal("42"), Some(serde_json::json!(42)));
        assert_eq!(parse_literal("someFn()"), None);
        assert_eq!(parse_literal("{ a: 1 }"), None);
    }

    #[test]
    fn test_literal_union_aliases() {
        let source = r#"
export type ButtonVariant = 'primary' | 'secondary';
type Size = "sm" | "md" | "lg";
type Handler = () => void;
"#;
        let aliases = literal_union_aliases(source);
        assert_eq!(
            aliases.get("ButtonVariant").unwrap(),
            "'primary' | 'secondary'"
        );
        assert_eq!(aliases.get("Size").unwrap(), r#""sm" | "md" | "lg""#);
        assert!(!aliases.contains_key("Handler"));
    }

    #[test]
    fn test_resolve_alias_in_union() {
        let mut aliases = HashMap::new();
        aliases.insert(
            "ButtonVariant".to_string(),
            "'primary' | 'secondary'".to_string(),
        );
        assert_eq!(
            resolve_alias("ButtonVariant", &aliases),
            "'primary' | 'secondary'"
        );
        assert_eq!(
            resolve_alias("ButtonVariant | undefined", &aliases),
            "'primary' | 'secondary' | undefined"
        );
        assert_eq!(resolve_alias("string", &aliases), "string");
    }

    #[test]
    fn test_parse_type_members() {
        let block = r#"
  /** The button label */
  label: string;
  disabled?: boolean;
  onClick?: () => void;
"#;
        let props = parse_type_members(block, &HashMap::new());
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].name, "label");
        assert!(props[0].required);
        assert_eq!(props[0].description.as_deref(), Some("The button label"));
        assert_eq!(props[1].name, "disabled");
        assert!(!props[1].required);
        assert_eq!(props[2].type_text, "() => void");
    }

    #[test]
    fn test_parse_type_members_duplicate_last_wins() {
        let block = "size: string;\nsize?: number;";
        let props = parse_type_members(block, &HashMap::new());
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].type_text, "number");
        assert!(!props[0].required);
    }
}
