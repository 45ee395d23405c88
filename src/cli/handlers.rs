//! Command handlers
//!
//! Each handler owns one subcommand end to end and returns a process exit
//! code. Configuration precedence is CLI flags over environment over
//! `storygen.toml`.

use super::commands::GenerateArgs;
use crate::config::{write_config_template, GeneratorConfig};
use crate::llm::StoryGateway;
use crate::pipeline::GenerationPipeline;
use crate::progress::{LoggingProgressHandler, NoOpProgressHandler, ProgressHandler};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::error;

pub async fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!(error = %e, "Cannot determine working directory");
            return 1;
        }
    };

    let mut config = match GeneratorConfig::load(&cwd) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if let Some(input) = &args.input_directory {
        config.input_directory = input.clone();
    }
    if let Some(framework) = args.framework {
        config.framework = Some(framework);
    }
    if args.staged {
        config.use_git_diff = true;
    }
    if let Some(provider) = args.provider {
        config.llm_provider = provider;
    }
    if let Some(model) = &args.model {
        config.llm_model = model.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("Error: {e}");
        return 1;
    }

    let client = match config.create_client() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create LLM client");
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let progress: Arc<dyn ProgressHandler> = if quiet {
        Arc::new(NoOpProgressHandler)
    } else {
        Arc::new(LoggingProgressHandler)
    };

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let pipeline = GenerationPipeline::new(Arc::new(StoryGateway::new(client)))
        .with_progress(progress)
        .with_cancellation(cancel);

    match pipeline.run(&config).await {
        Ok(summary) => {
            if !quiet {
                println!(
                    "Generated {} story file(s), skipped {} of {} in {:.1}s",
                    summary.generated,
                    summary.skipped,
                    summary.total_files,
                    summary.elapsed.as_secs_f64()
                );
            }
            if summary.failed > 0 && summary.generated == 0 {
                1
            } else {
                0
            }
        }
        Err(e) => {
            error!(error = format!("{e:#}"), "Generation run failed");
            eprintln!("Error: {e:#}");
            1
        }
    }
}

pub fn handle_init_config(dir: &Path, quiet: bool) -> i32 {
    match write_config_template(dir) {
        Ok(path) => {
            if !quiet {
                println!("Wrote {}", path.display());
                println!("Set LLM_API_KEY in your environment before running `storygen generate`.");
            }
            0
        }
        Err(e) => {
            error!(error = %e, "init-config failed");
            eprintln!("Error: {e}");
            1
        }
    }
}
