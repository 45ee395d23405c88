use crate::config::LlmProvider;
use crate::model::Framework;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AI-powered Storybook story generator
#[derive(Parser, Debug)]
#[command(
    name = "storygen",
    about = "AI-powered Storybook story generator for UI components",
    version,
    author,
    long_about = "storygen scans a directory for UI component files (React, Angular or Vue), \
                  extracts their props with lightweight parsing, asks an LLM for realistic \
                  story scenarios, and writes Storybook CSF3 story files next to each component."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate story files for the components in a directory",
        long_about = "Scans the input directory for component files, generates story \
                      scenarios with the configured LLM, and writes one story file next \
                      to each component.\n\n\
                      Examples:\n  \
                      storygen generate\n  \
                      storygen generate ./src/components\n  \
                      storygen generate --framework vue\n  \
                      storygen generate --staged --provider gemini --model gemini-2.0-flash"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Write a starter storygen.toml into the current directory",
        long_about = "Creates a commented storygen.toml template in the current directory. \
                      Refuses to overwrite an existing file."
    )]
    InitConfig,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        value_name = "PATH",
        help = "Directory to scan for components (defaults to the configured input directory)"
    )]
    pub input_directory: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_parser = clap::value_parser!(Framework),
        help = "Target framework (react|angular|vue); auto-detected when omitted"
    )]
    pub framework: Option<Framework>,

    #[arg(long, help = "Only process files staged in git")]
    pub staged: bool,

    #[arg(
        short = 'p',
        long,
        value_parser = clap::value_parser!(LlmProvider),
        help = "LLM provider (openai|gemini)"
    )]
    pub provider: Option<LlmProvider>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name (provider-specific, e.g. 'gpt-4.1-mini')"
    )]
    pub model: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Request timeout in seconds")]
    pub timeout: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args_parse() {
        let args = CliArgs::parse_from([
            "storygen",
            "generate",
            "./src/components",
            "--framework",
            "vue",
            "--staged",
            "--provider",
            "gemini",
            "--model",
            "gemini-2.0-flash",
            "--timeout",
            "90",
        ]);
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(
                    generate.input_directory,
                    Some(PathBuf::from("./src/components"))
                );
                assert_eq!(generate.framework, Some(Framework::Vue));
                assert!(generate.staged);
                assert_eq!(generate.provider, Some(LlmProvider::Gemini));
                assert_eq!(generate.model.as_deref(), Some("gemini-2.0-flash"));
                assert_eq!(generate.timeout, Some(90));
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_init_config_parses() {
        let args = CliArgs::parse_from(["storygen", "init-config"]);
        assert!(matches!(args.command, Commands::InitConfig));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(CliArgs::try_parse_from(["storygen", "-v", "-q", "generate"]).is_err());
    }
}
