//! Framework-specific component parsers
//!
//! Each parser turns raw source text into a [`ComponentMeta`] for one
//! framework. The pipeline is agnostic to which parser is selected; the
//! table in [`parser_for`] is the only place the mapping lives.

mod angular;
mod common;
mod react;
mod vue;

pub use angular::{AngularParser, CONTENT_PROJECTION_TYPE, NG_CONTENT_PROP};
pub use react::ReactParser;
pub use vue::{VueParser, DEFAULT_SLOT_PROP, SLOT_TYPE};

use crate::model::{ComponentMeta, Framework};
use anyhow::Result;
use std::path::Path;

/// Capability contract implemented once per supported framework.
pub trait ComponentParser: Send + Sync {
    /// The framework this parser handles.
    fn framework(&self) -> Framework;

    /// Whether this parser can handle the given file.
    fn can_parse(&self, path: &Path) -> bool {
        self.framework().matches_component_file(path)
    }

    /// Parse a component file into metadata.
    ///
    /// Returns `Ok(None)` when the file contains no recognizable component;
    /// the caller skips the file. Errors are recovered at the pipeline step
    /// boundary and never abort the run.
    fn parse_component_file(&self, path: &Path) -> Result<Option<ComponentMeta>>;

    /// Cheap name-only extraction, used to build the available-components
    /// list without a full parse.
    fn extract_component_name(&self, path: &Path) -> Result<Option<String>>;
}

static REACT: ReactParser = ReactParser;
static ANGULAR: AngularParser = AngularParser;
static VUE: VueParser = VueParser;

/// Maps a framework identifier to its parser.
pub fn parser_for(framework: Framework) -> &'static dyn ComponentParser {
    match framework {
        Framework::React => &REACT,
        Framework::Angular => &ANGULAR,
        Framework::Vue => &VUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_table_covers_all_frameworks() {
        for fw in [Framework::React, Framework::Angular, Framework::Vue] {
            assert_eq!(parser_for(fw).framework(), fw);
        }
    }

    #[test]
    fn test_can_parse_follows_framework_matching() {
        assert!(parser_for(Framework::React).can_parse(Path::new("Button.tsx")));
        assert!(!parser_for(Framework::React).can_parse(Path::new("Button.vue")));
        assert!(parser_for(Framework::Vue).can_parse(Path::new("Button.vue")));
    }
}
